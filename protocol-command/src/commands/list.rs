use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::{Result, invalid_argument};

/// End of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListDirection {
    Left,
    Right,
}

impl ListDirection {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            ListDirection::Left => b"LEFT",
            ListDirection::Right => b"RIGHT",
        }
    }
}

/// Where LINSERT places the new element relative to the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertPosition {
    Before,
    After,
}

impl InsertPosition {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            InsertPosition::Before => b"BEFORE",
            InsertPosition::After => b"AFTER",
        }
    }
}

fn push<I>(request_type: RequestType, key: impl AsRef<[u8]>, elements: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(request_type);
    cmd.arg(key).args(elements);
    cmd.finish()
}

fn pop(request_type: RequestType, key: impl AsRef<[u8]>, count: Option<u64>) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    cmd.arg(key);
    if let Some(count) = count {
        cmd.int(count);
    }
    cmd.finish()
}

// ── Push and pop ────────────────────────────────────────────────────────

pub fn create_lpush<I>(key: impl AsRef<[u8]>, elements: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    push(RequestType::LPush, key, elements)
}

pub fn create_lpushx<I>(key: impl AsRef<[u8]>, elements: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    push(RequestType::LPushX, key, elements)
}

pub fn create_rpush<I>(key: impl AsRef<[u8]>, elements: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    push(RequestType::RPush, key, elements)
}

pub fn create_rpushx<I>(key: impl AsRef<[u8]>, elements: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    push(RequestType::RPushX, key, elements)
}

/// `LPOP key [count]`
pub fn create_lpop(key: impl AsRef<[u8]>, count: Option<u64>) -> CommandSpec {
    pop(RequestType::LPop, key, count)
}

/// `RPOP key [count]`
pub fn create_rpop(key: impl AsRef<[u8]>, count: Option<u64>) -> CommandSpec {
    pop(RequestType::RPop, key, count)
}

/// `BLPOP key [key ...] timeout`
pub fn create_blpop<I>(keys: I, timeout: f64) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    blocking_pop(RequestType::BLPop, keys, timeout)
}

/// `BRPOP key [key ...] timeout`
pub fn create_brpop<I>(keys: I, timeout: f64) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    blocking_pop(RequestType::BRPop, keys, timeout)
}

fn blocking_pop<I>(request_type: RequestType, keys: I, timeout: f64) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let timeout = super::timeout(timeout)?;
    let keys = super::collect(keys);
    super::non_empty("keys", &keys)?;
    let mut cmd = Builder::new(request_type);
    for key in keys {
        cmd.token(key);
    }
    cmd.float(timeout);
    Ok(cmd.finish())
}

/// `LMPOP numkeys key [key ...] LEFT|RIGHT [COUNT n]`
pub fn create_lmpop<I>(keys: I, direction: ListDirection, count: Option<u64>) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::LMPop);
    multi_pop(&mut cmd, keys, direction, count)?;
    Ok(cmd.finish())
}

/// `BLMPOP timeout numkeys key [key ...] LEFT|RIGHT [COUNT n]`
pub fn create_blmpop<I>(
    keys: I,
    direction: ListDirection,
    timeout: f64,
    count: Option<u64>,
) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let timeout = super::timeout(timeout)?;
    let mut cmd = Builder::new(RequestType::BLMPop);
    cmd.float(timeout);
    multi_pop(&mut cmd, keys, direction, count)?;
    Ok(cmd.finish())
}

fn multi_pop<I>(
    cmd: &mut Builder,
    keys: I,
    direction: ListDirection,
    count: Option<u64>,
) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let keys = super::collect(keys);
    super::non_empty("keys", &keys)?;
    cmd.int(keys.len());
    for key in keys {
        cmd.token(key);
    }
    cmd.keyword(direction.as_bytes());
    if let Some(count) = count {
        cmd.keyword(b"COUNT").int(count);
    }
    Ok(())
}

// ── Access ──────────────────────────────────────────────────────────────

pub fn create_lrange(key: impl AsRef<[u8]>, start: i64, end: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::LRange);
    cmd.arg(key).int(start).int(end);
    cmd.finish()
}

pub fn create_llen(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::LLen);
    cmd.arg(key);
    cmd.finish()
}

pub fn create_lindex(key: impl AsRef<[u8]>, index: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::LIndex);
    cmd.arg(key).int(index);
    cmd.finish()
}

pub fn create_lset(key: impl AsRef<[u8]>, index: i64, element: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::LSet);
    cmd.arg(key).int(index).arg(element);
    cmd.finish()
}

pub fn create_ltrim(key: impl AsRef<[u8]>, start: i64, end: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::LTrim);
    cmd.arg(key).int(start).int(end);
    cmd.finish()
}

/// `LREM key count element`
pub fn create_lrem(key: impl AsRef<[u8]>, count: i64, element: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::LRem);
    cmd.arg(key).int(count).arg(element);
    cmd.finish()
}

/// `LINSERT key BEFORE|AFTER pivot element`
pub fn create_linsert(
    key: impl AsRef<[u8]>,
    position: InsertPosition,
    pivot: impl AsRef<[u8]>,
    element: impl AsRef<[u8]>,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::LInsert);
    cmd.arg(key)
        .keyword(position.as_bytes())
        .arg(pivot)
        .arg(element);
    cmd.finish()
}

/// `LMOVE source destination LEFT|RIGHT LEFT|RIGHT`
pub fn create_lmove(
    source: impl AsRef<[u8]>,
    destination: impl AsRef<[u8]>,
    where_from: ListDirection,
    where_to: ListDirection,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::LMove);
    cmd.arg(source)
        .arg(destination)
        .keyword(where_from.as_bytes())
        .keyword(where_to.as_bytes());
    cmd.finish()
}

/// `BLMOVE source destination LEFT|RIGHT LEFT|RIGHT timeout`
pub fn create_blmove(
    source: impl AsRef<[u8]>,
    destination: impl AsRef<[u8]>,
    where_from: ListDirection,
    where_to: ListDirection,
    timeout: f64,
) -> Result<CommandSpec> {
    let timeout = super::timeout(timeout)?;
    let mut cmd = Builder::new(RequestType::BLMove);
    cmd.arg(source)
        .arg(destination)
        .keyword(where_from.as_bytes())
        .keyword(where_to.as_bytes())
        .float(timeout);
    Ok(cmd.finish())
}

/// Options for LPOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LPosOptions {
    /// Which match to return; negative searches from the tail. Never zero.
    pub rank: Option<i64>,
    /// Number of matches to return; zero returns all.
    pub count: Option<u64>,
    /// Compare at most this many elements.
    pub max_length: Option<u64>,
}

/// `LPOS key element [RANK r] [COUNT n] [MAXLEN m]`
pub fn create_lpos(
    key: impl AsRef<[u8]>,
    element: impl AsRef<[u8]>,
    options: LPosOptions,
) -> Result<CommandSpec> {
    if options.rank == Some(0) {
        return Err(invalid_argument("LPOS rank must not be zero"));
    }
    let mut cmd = Builder::new(RequestType::LPos);
    cmd.arg(key).arg(element);
    if let Some(rank) = options.rank {
        cmd.keyword(b"RANK").int(rank);
    }
    if let Some(count) = options.count {
        cmd.keyword(b"COUNT").int(count);
    }
    if let Some(max_length) = options.max_length {
        cmd.keyword(b"MAXLEN").int(max_length);
    }
    Ok(cmd.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        assert_eq!(create_lpush("l", ["a", "b"]).args(), &["l", "a", "b"]);
        assert_eq!(create_rpushx("l", ["c"]).request_type(), RequestType::RPushX);
        assert_eq!(create_lpop("l", None).args(), &["l"]);
        assert_eq!(create_rpop("l", Some(3)).args(), &["l", "3"]);
    }

    #[test]
    fn test_blocking_pop_timeout_last() {
        let cmd = create_blpop(["a", "b"], 0.5).unwrap();
        assert_eq!(cmd.args(), &["a", "b", "0.5"]);
        assert!(create_brpop(["a"], -1.0).unwrap_err().is_invalid_argument());
        assert!(create_brpop(Vec::<&str>::new(), 1.0).is_err());
    }

    #[test]
    fn test_lmpop() {
        let cmd = create_lmpop(["a", "b"], ListDirection::Left, Some(2)).unwrap();
        assert_eq!(cmd.args(), &["2", "a", "b", "LEFT", "COUNT", "2"]);
    }

    #[test]
    fn test_blmpop_timeout_first() {
        let cmd = create_blmpop(["a"], ListDirection::Right, 1.0, None).unwrap();
        assert_eq!(cmd.args(), &["1", "1", "a", "RIGHT"]);
    }

    #[test]
    fn test_linsert_and_lmove() {
        assert_eq!(
            create_linsert("l", InsertPosition::Before, "p", "e").args(),
            &["l", "BEFORE", "p", "e"]
        );
        assert_eq!(
            create_lmove("s", "d", ListDirection::Right, ListDirection::Left).args(),
            &["s", "d", "RIGHT", "LEFT"]
        );
        assert_eq!(
            create_blmove("s", "d", ListDirection::Left, ListDirection::Left, 0.0)
                .unwrap()
                .args(),
            &["s", "d", "LEFT", "LEFT", "0"]
        );
    }

    #[test]
    fn test_lpos_options() {
        let opts = LPosOptions {
            rank: Some(-1),
            count: Some(0),
            max_length: Some(100),
        };
        assert_eq!(
            create_lpos("l", "x", opts).unwrap().args(),
            &["l", "x", "RANK", "-1", "COUNT", "0", "MAXLEN", "100"]
        );
    }

    #[test]
    fn test_lpos_zero_rank() {
        let opts = LPosOptions {
            rank: Some(0),
            ..Default::default()
        };
        assert!(create_lpos("l", "x", opts).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_index_commands() {
        assert_eq!(create_lrange("l", 0, -1).args(), &["l", "0", "-1"]);
        assert_eq!(create_lindex("l", -2).args(), &["l", "-2"]);
        assert_eq!(create_lset("l", 1, "v").args(), &["l", "1", "v"]);
        assert_eq!(create_lrem("l", -2, "v").args(), &["l", "-2", "v"]);
    }
}
