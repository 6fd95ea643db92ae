use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::Result;
use crate::scan::ScanOptions;

fn key_members<I>(request_type: RequestType, key: impl AsRef<[u8]>, members: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(request_type);
    cmd.arg(key).args(members);
    cmd.finish()
}

fn keys_only<I>(request_type: RequestType, keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(request_type);
    cmd.args(keys);
    cmd.finish()
}

pub fn create_sadd<I>(key: impl AsRef<[u8]>, members: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    key_members(RequestType::SAdd, key, members)
}

pub fn create_srem<I>(key: impl AsRef<[u8]>, members: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    key_members(RequestType::SRem, key, members)
}

pub fn create_smembers(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::SMembers);
    cmd.arg(key);
    cmd.finish()
}

pub fn create_scard(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::SCard);
    cmd.arg(key);
    cmd.finish()
}

/// `SMOVE source destination member`
pub fn create_smove(
    source: impl AsRef<[u8]>,
    destination: impl AsRef<[u8]>,
    member: impl AsRef<[u8]>,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::SMove);
    cmd.arg(source).arg(destination).arg(member);
    cmd.finish()
}

pub fn create_sismember(key: impl AsRef<[u8]>, member: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::SIsMember);
    cmd.arg(key).arg(member);
    cmd.finish()
}

pub fn create_smismember<I>(key: impl AsRef<[u8]>, members: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    key_members(RequestType::SMIsMember, key, members)
}

/// `SPOP key [count]`
pub fn create_spop(key: impl AsRef<[u8]>, count: Option<u64>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::SPop);
    cmd.arg(key);
    if let Some(count) = count {
        cmd.int(count);
    }
    cmd.finish()
}

/// `SRANDMEMBER key [count]`; a negative count allows repeats.
pub fn create_srandmember(key: impl AsRef<[u8]>, count: Option<i64>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::SRandMember);
    cmd.arg(key);
    if let Some(count) = count {
        cmd.int(count);
    }
    cmd.finish()
}

// ── Set algebra ─────────────────────────────────────────────────────────

pub fn create_sinter<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    keys_only(RequestType::SInter, keys)
}

/// `SINTERCARD numkeys key [key ...] [LIMIT n]`
pub fn create_sintercard<I>(keys: I, limit: Option<u64>) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let keys = super::collect(keys);
    super::non_empty("keys", &keys)?;
    let mut cmd = Builder::new(RequestType::SInterCard);
    cmd.int(keys.len());
    for key in keys {
        cmd.token(key);
    }
    if let Some(limit) = limit {
        cmd.keyword(b"LIMIT").int(limit);
    }
    Ok(cmd.finish())
}

pub fn create_sinterstore<I>(destination: impl AsRef<[u8]>, keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    key_members(RequestType::SInterStore, destination, keys)
}

pub fn create_sdiff<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    keys_only(RequestType::SDiff, keys)
}

pub fn create_sdiffstore<I>(destination: impl AsRef<[u8]>, keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    key_members(RequestType::SDiffStore, destination, keys)
}

pub fn create_sunion<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    keys_only(RequestType::SUnion, keys)
}

pub fn create_sunionstore<I>(destination: impl AsRef<[u8]>, keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    key_members(RequestType::SUnionStore, destination, keys)
}

/// `SSCAN key cursor [MATCH p] [COUNT n]`
pub fn create_sscan(
    key: impl AsRef<[u8]>,
    cursor: impl AsRef<[u8]>,
    options: &ScanOptions,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::SScan);
    cmd.arg(key).arg(cursor);
    options.encode(&mut cmd, RequestType::SScan)?;
    Ok(cmd.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members() {
        assert_eq!(create_sadd("s", ["a", "b"]).args(), &["s", "a", "b"]);
        assert_eq!(create_smove("s", "d", "a").args(), &["s", "d", "a"]);
        assert_eq!(create_spop("s", None).args(), &["s"]);
        assert_eq!(create_srandmember("s", Some(-2)).args(), &["s", "-2"]);
    }

    #[test]
    fn test_sintercard() {
        let cmd = create_sintercard(["a", "b"], Some(10)).unwrap();
        assert_eq!(cmd.args(), &["2", "a", "b", "LIMIT", "10"]);
        assert!(create_sintercard(Vec::<&str>::new(), None).is_err());
    }

    #[test]
    fn test_store_destination_first() {
        let cmd = create_sunionstore("dst", ["a", "b"]);
        assert_eq!(cmd.args(), &["dst", "a", "b"]);
    }

    #[test]
    fn test_sscan_rejects_noscores() {
        let err = create_sscan("s", "0", &ScanOptions::new().no_scores()).unwrap_err();
        assert!(err.is_unsupported_combination());
    }
}
