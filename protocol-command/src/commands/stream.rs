use bytes::Bytes;

use crate::boundary::StreamBoundary;
use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::{Result, unsupported_combination};
use crate::normalize::Entries;

// ── Trimming ────────────────────────────────────────────────────────────

/// What a stream is trimmed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimStrategy {
    /// `MAXLEN`: keep at most this many entries.
    MaxLen(u64),
    /// `MINID`: evict entries with lower ids.
    MinId(Bytes),
}

/// Trim options for XADD and XTRIM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTrimOptions {
    pub strategy: TrimStrategy,
    /// `=` when set, `~` (approximate) otherwise.
    pub exact: bool,
    /// Maximum entries evicted per call. Approximate trimming only.
    pub limit: Option<u64>,
}

impl StreamTrimOptions {
    pub fn max_len(threshold: u64, exact: bool) -> Self {
        Self {
            strategy: TrimStrategy::MaxLen(threshold),
            exact,
            limit: None,
        }
    }

    pub fn min_id(threshold: impl AsRef<[u8]>, exact: bool) -> Self {
        Self {
            strategy: TrimStrategy::MinId(crate::token::bytes(threshold)),
            exact,
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Append `MAXLEN|MINID =|~ threshold [LIMIT n]`.
    fn encode(&self, cmd: &mut Builder) -> Result<()> {
        if self.exact && self.limit.is_some() {
            return Err(unsupported_combination(
                "LIMIT is only valid with approximate trimming",
            ));
        }
        let exactness: &'static [u8] = if self.exact { b"=" } else { b"~" };
        match &self.strategy {
            TrimStrategy::MaxLen(threshold) => {
                cmd.keyword(b"MAXLEN").keyword(exactness).int(*threshold);
            }
            TrimStrategy::MinId(threshold) => {
                cmd.keyword(b"MINID")
                    .keyword(exactness)
                    .token(threshold.clone());
            }
        }
        if let Some(limit) = self.limit {
            cmd.keyword(b"LIMIT").int(limit);
        }
        Ok(())
    }
}

// ── XADD ────────────────────────────────────────────────────────────────

/// Options for XADD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamAddOptions {
    /// Explicit entry id; `*` (server-generated) when unset.
    pub id: Option<Bytes>,
    /// Create the stream if missing. Sends `NOMKSTREAM` when false.
    pub make_stream: bool,
    pub trim: Option<StreamTrimOptions>,
}

impl Default for StreamAddOptions {
    fn default() -> Self {
        Self {
            id: None,
            make_stream: true,
            trim: None,
        }
    }
}

/// `XADD key [NOMKSTREAM] [MAXLEN|MINID =|~ t [LIMIT n]] id|* field value ...`
pub fn create_xadd(
    key: impl AsRef<[u8]>,
    values: Entries<Bytes>,
    options: &StreamAddOptions,
) -> Result<CommandSpec> {
    let values = values.normalize()?;
    super::non_empty("field/value entries", &values)?;
    let mut cmd = Builder::new(RequestType::XAdd);
    cmd.arg(key).flag(!options.make_stream, b"NOMKSTREAM");
    if let Some(trim) = &options.trim {
        trim.encode(&mut cmd)?;
    }
    match &options.id {
        Some(id) => cmd.token(id.clone()),
        None => cmd.keyword(b"*"),
    };
    for (field, value) in values {
        cmd.token(field).token(value);
    }
    Ok(cmd.finish())
}

/// `XTRIM key MAXLEN|MINID =|~ threshold [LIMIT n]`
pub fn create_xtrim(key: impl AsRef<[u8]>, options: &StreamTrimOptions) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::XTrim);
    cmd.arg(key);
    options.encode(&mut cmd)?;
    Ok(cmd.finish())
}

pub fn create_xdel<I>(key: impl AsRef<[u8]>, ids: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::XDel);
    cmd.arg(key).args(ids);
    cmd.finish()
}

pub fn create_xlen(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XLen);
    cmd.arg(key);
    cmd.finish()
}

// ── Ranges ──────────────────────────────────────────────────────────────

/// `XRANGE key start end [COUNT n]`
pub fn create_xrange(
    key: impl AsRef<[u8]>,
    start: &StreamBoundary,
    end: &StreamBoundary,
    count: Option<u64>,
) -> CommandSpec {
    range(RequestType::XRange, key, start, end, count)
}

/// `XREVRANGE key end start [COUNT n]`; the higher id comes first.
pub fn create_xrevrange(
    key: impl AsRef<[u8]>,
    end: &StreamBoundary,
    start: &StreamBoundary,
    count: Option<u64>,
) -> CommandSpec {
    range(RequestType::XRevRange, key, end, start, count)
}

fn range(
    request_type: RequestType,
    key: impl AsRef<[u8]>,
    first: &StreamBoundary,
    second: &StreamBoundary,
    count: Option<u64>,
) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    cmd.arg(key)
        .token(first.encode_stream_id())
        .token(second.encode_stream_id());
    if let Some(count) = count {
        cmd.keyword(b"COUNT").int(count);
    }
    cmd.finish()
}

// ── Reading ─────────────────────────────────────────────────────────────

/// Options for XREAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamReadOptions {
    /// Block for up to this many milliseconds; zero blocks indefinitely.
    pub block: Option<u64>,
    pub count: Option<u64>,
}

impl StreamReadOptions {
    fn encode(&self, cmd: &mut Builder) {
        if let Some(block) = self.block {
            cmd.keyword(b"BLOCK").int(block);
        }
        if let Some(count) = self.count {
            cmd.keyword(b"COUNT").int(count);
        }
    }
}

/// Options for XREADGROUP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamReadGroupOptions {
    pub read: StreamReadOptions,
    /// Skip the pending entries list (`NOACK`).
    pub no_ack: bool,
}

/// Append `STREAMS key [key ...] id [id ...]`.
fn encode_streams(cmd: &mut Builder, keys_and_ids: Entries<Bytes>) -> Result<()> {
    let keys_and_ids = keys_and_ids.normalize()?;
    super::non_empty("stream keys", &keys_and_ids)?;
    cmd.keyword(b"STREAMS");
    for (key, _) in &keys_and_ids {
        cmd.token(key.clone());
    }
    for (_, id) in keys_and_ids {
        cmd.token(id);
    }
    Ok(())
}

/// `XREAD [BLOCK ms] [COUNT n] STREAMS key ... id ...`
pub fn create_xread(keys_and_ids: Entries<Bytes>, options: StreamReadOptions) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::XRead);
    options.encode(&mut cmd);
    encode_streams(&mut cmd, keys_and_ids)?;
    Ok(cmd.finish())
}

/// `XREADGROUP GROUP group consumer [BLOCK ms] [COUNT n] [NOACK] STREAMS key ... id ...`
pub fn create_xreadgroup(
    group: impl AsRef<[u8]>,
    consumer: impl AsRef<[u8]>,
    keys_and_ids: Entries<Bytes>,
    options: StreamReadGroupOptions,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::XReadGroup);
    cmd.keyword(b"GROUP").arg(group).arg(consumer);
    options.read.encode(&mut cmd);
    cmd.flag(options.no_ack, b"NOACK");
    encode_streams(&mut cmd, keys_and_ids)?;
    Ok(cmd.finish())
}

pub fn create_xack<I>(key: impl AsRef<[u8]>, group: impl AsRef<[u8]>, ids: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::XAck);
    cmd.arg(key).arg(group).args(ids);
    cmd.finish()
}

// ── Consumer groups ─────────────────────────────────────────────────────

/// Options for XGROUP CREATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamGroupOptions {
    /// Create an empty stream if missing (`MKSTREAM`).
    pub make_stream: bool,
    pub entries_read: Option<u64>,
}

/// `XGROUP CREATE key group id [MKSTREAM] [ENTRIESREAD n]`
pub fn create_xgroup_create(
    key: impl AsRef<[u8]>,
    group: impl AsRef<[u8]>,
    id: impl AsRef<[u8]>,
    options: StreamGroupOptions,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XGroupCreate);
    cmd.arg(key)
        .arg(group)
        .arg(id)
        .flag(options.make_stream, b"MKSTREAM");
    if let Some(entries_read) = options.entries_read {
        cmd.keyword(b"ENTRIESREAD").int(entries_read);
    }
    cmd.finish()
}

pub fn create_xgroup_destroy(key: impl AsRef<[u8]>, group: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XGroupDestroy);
    cmd.arg(key).arg(group);
    cmd.finish()
}

pub fn create_xgroup_create_consumer(
    key: impl AsRef<[u8]>,
    group: impl AsRef<[u8]>,
    consumer: impl AsRef<[u8]>,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XGroupCreateConsumer);
    cmd.arg(key).arg(group).arg(consumer);
    cmd.finish()
}

pub fn create_xgroup_del_consumer(
    key: impl AsRef<[u8]>,
    group: impl AsRef<[u8]>,
    consumer: impl AsRef<[u8]>,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XGroupDelConsumer);
    cmd.arg(key).arg(group).arg(consumer);
    cmd.finish()
}

/// `XGROUP SETID key group id [ENTRIESREAD n]`
pub fn create_xgroup_set_id(
    key: impl AsRef<[u8]>,
    group: impl AsRef<[u8]>,
    id: impl AsRef<[u8]>,
    entries_read: Option<u64>,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XGroupSetId);
    cmd.arg(key).arg(group).arg(id);
    if let Some(entries_read) = entries_read {
        cmd.keyword(b"ENTRIESREAD").int(entries_read);
    }
    cmd.finish()
}

// ── Pending entries and claiming ────────────────────────────────────────

/// Range form of XPENDING.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamPendingOptions {
    /// Only entries idle for at least this many milliseconds.
    pub min_idle_time: Option<u64>,
    pub start: StreamBoundary,
    pub end: StreamBoundary,
    pub count: u64,
    pub consumer: Option<Bytes>,
}

/// `XPENDING key group`: the summary form.
pub fn create_xpending(key: impl AsRef<[u8]>, group: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XPending);
    cmd.arg(key).arg(group);
    cmd.finish()
}

/// `XPENDING key group [IDLE ms] start end count [consumer]`
pub fn create_xpending_with_options(
    key: impl AsRef<[u8]>,
    group: impl AsRef<[u8]>,
    options: &StreamPendingOptions,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XPending);
    cmd.arg(key).arg(group);
    if let Some(idle) = options.min_idle_time {
        cmd.keyword(b"IDLE").int(idle);
    }
    cmd.token(options.start.encode_stream_id())
        .token(options.end.encode_stream_id())
        .int(options.count);
    if let Some(consumer) = &options.consumer {
        cmd.token(consumer.clone());
    }
    cmd.finish()
}

/// Options for XCLAIM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamClaimOptions {
    /// `IDLE ms`
    pub idle: Option<u64>,
    /// `TIME unix-ms`
    pub idle_unix_time: Option<u64>,
    /// `RETRYCOUNT n`
    pub retry_count: Option<u64>,
    /// `FORCE`
    pub is_force: bool,
}

/// `XCLAIM key group consumer min-idle id ... [IDLE] [TIME] [RETRYCOUNT] [FORCE] [JUSTID]`
pub fn create_xclaim<I>(
    key: impl AsRef<[u8]>,
    group: impl AsRef<[u8]>,
    consumer: impl AsRef<[u8]>,
    min_idle_time: u64,
    ids: I,
    options: StreamClaimOptions,
    just_id: bool,
) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::XClaim);
    cmd.arg(key)
        .arg(group)
        .arg(consumer)
        .int(min_idle_time)
        .args(ids);
    if let Some(idle) = options.idle {
        cmd.keyword(b"IDLE").int(idle);
    }
    if let Some(time) = options.idle_unix_time {
        cmd.keyword(b"TIME").int(time);
    }
    if let Some(retry_count) = options.retry_count {
        cmd.keyword(b"RETRYCOUNT").int(retry_count);
    }
    cmd.flag(options.is_force, b"FORCE")
        .flag(just_id, b"JUSTID");
    cmd.finish()
}

/// `XAUTOCLAIM key group consumer min-idle start [COUNT n] [JUSTID]`
pub fn create_xautoclaim(
    key: impl AsRef<[u8]>,
    group: impl AsRef<[u8]>,
    consumer: impl AsRef<[u8]>,
    min_idle_time: u64,
    start: impl AsRef<[u8]>,
    count: Option<u64>,
    just_id: bool,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XAutoClaim);
    cmd.arg(key)
        .arg(group)
        .arg(consumer)
        .int(min_idle_time)
        .arg(start);
    if let Some(count) = count {
        cmd.keyword(b"COUNT").int(count);
    }
    cmd.flag(just_id, b"JUSTID");
    cmd.finish()
}

// ── XINFO ───────────────────────────────────────────────────────────────

/// `XINFO STREAM key`
pub fn create_xinfo_stream(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XInfoStream);
    cmd.arg(key);
    cmd.finish()
}

/// `XINFO STREAM key FULL [COUNT n]`
pub fn create_xinfo_stream_full(key: impl AsRef<[u8]>, count: Option<u64>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XInfoStream);
    cmd.arg(key).keyword(b"FULL");
    if let Some(count) = count {
        cmd.keyword(b"COUNT").int(count);
    }
    cmd.finish()
}

pub fn create_xinfo_groups(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XInfoGroups);
    cmd.arg(key);
    cmd.finish()
}

pub fn create_xinfo_consumers(key: impl AsRef<[u8]>, group: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::XInfoConsumers);
    cmd.arg(key).arg(group);
    cmd.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;

    fn fields() -> Entries<Bytes> {
        Entries::pairs([("temp", "21"), ("hum", "40")])
    }

    #[test]
    fn test_xadd_defaults() {
        let cmd = create_xadd("s", fields(), &StreamAddOptions::default()).unwrap();
        assert_eq!(cmd.args(), &["s", "*", "temp", "21", "hum", "40"]);
    }

    #[test]
    fn test_xadd_full_option_order() {
        let opts = StreamAddOptions {
            id: Some(Bytes::from_static(b"1-0")),
            make_stream: false,
            trim: Some(StreamTrimOptions::max_len(1000, false).limit(10)),
        };
        let cmd = create_xadd("s", fields(), &opts).unwrap();
        assert_eq!(
            cmd.args(),
            &[
                "s", "NOMKSTREAM", "MAXLEN", "~", "1000", "LIMIT", "10", "1-0", "temp", "21",
                "hum", "40"
            ]
        );
    }

    #[test]
    fn test_xadd_exact_trim_with_limit() {
        let opts = StreamAddOptions {
            trim: Some(StreamTrimOptions::min_id("5-0", true).limit(1)),
            ..Default::default()
        };
        let err = create_xadd("s", fields(), &opts).unwrap_err();
        assert!(err.is_unsupported_combination());
    }

    #[test]
    fn test_xadd_requires_fields() {
        let empty: Entries<Bytes> = Entries::pairs(Vec::<(&str, &str)>::new());
        assert!(create_xadd("s", empty, &StreamAddOptions::default()).is_err());
    }

    #[test]
    fn test_xtrim_min_id() {
        let cmd = create_xtrim("s", &StreamTrimOptions::min_id("5-0", true)).unwrap();
        assert_eq!(cmd.args(), &["s", "MINID", "=", "5-0"]);
    }

    #[test]
    fn test_xrange_boundaries() {
        let cmd = create_xrange(
            "s",
            &Boundary::exclusive("1-0"),
            &Boundary::PositiveInfinity,
            Some(5),
        );
        assert_eq!(cmd.args(), &["s", "(1-0", "+", "COUNT", "5"]);
        let cmd = create_xrevrange("s", &Boundary::PositiveInfinity, &Boundary::NegativeInfinity, None);
        assert_eq!(cmd.args(), &["s", "+", "-"]);
    }

    #[test]
    fn test_xread_keys_then_ids() {
        let streams = Entries::pairs([("a", "0-0"), ("b", "$")]);
        let opts = StreamReadOptions {
            block: Some(100),
            count: Some(2),
        };
        let cmd = create_xread(streams, opts).unwrap();
        assert_eq!(
            cmd.args(),
            &["BLOCK", "100", "COUNT", "2", "STREAMS", "a", "b", "0-0", "$"]
        );
    }

    #[test]
    fn test_xreadgroup() {
        let streams = Entries::map([("s", ">")]);
        let opts = StreamReadGroupOptions {
            read: StreamReadOptions {
                block: None,
                count: Some(1),
            },
            no_ack: true,
        };
        let cmd = create_xreadgroup("g", "c", streams, opts).unwrap();
        assert_eq!(
            cmd.args(),
            &["GROUP", "g", "c", "COUNT", "1", "NOACK", "STREAMS", "s", ">"]
        );
    }

    #[test]
    fn test_xgroup_commands() {
        let cmd = create_xgroup_create(
            "s",
            "g",
            "$",
            StreamGroupOptions {
                make_stream: true,
                entries_read: Some(3),
            },
        );
        assert_eq!(cmd.args(), &["s", "g", "$", "MKSTREAM", "ENTRIESREAD", "3"]);
        assert_eq!(
            cmd.command_line(),
            vec!["XGROUP", "CREATE", "s", "g", "$", "MKSTREAM", "ENTRIESREAD", "3"]
        );
        assert_eq!(
            create_xgroup_set_id("s", "g", "0", None).args(),
            &["s", "g", "0"]
        );
    }

    #[test]
    fn test_xpending_with_options() {
        let opts = StreamPendingOptions {
            min_idle_time: Some(60_000),
            start: Boundary::NegativeInfinity,
            end: Boundary::PositiveInfinity,
            count: 10,
            consumer: Some(Bytes::from_static(b"alice")),
        };
        let cmd = create_xpending_with_options("s", "g", &opts);
        assert_eq!(
            cmd.args(),
            &["s", "g", "IDLE", "60000", "-", "+", "10", "alice"]
        );
    }

    #[test]
    fn test_xclaim() {
        let opts = StreamClaimOptions {
            idle: Some(5),
            idle_unix_time: None,
            retry_count: Some(2),
            is_force: true,
        };
        let cmd = create_xclaim("s", "g", "c", 100, ["1-0", "2-0"], opts, true);
        assert_eq!(
            cmd.args(),
            &[
                "s", "g", "c", "100", "1-0", "2-0", "IDLE", "5", "RETRYCOUNT", "2", "FORCE",
                "JUSTID"
            ]
        );
    }

    #[test]
    fn test_xautoclaim() {
        let cmd = create_xautoclaim("s", "g", "c", 100, "0-0", Some(25), false);
        assert_eq!(cmd.args(), &["s", "g", "c", "100", "0-0", "COUNT", "25"]);
    }

    #[test]
    fn test_xinfo() {
        assert_eq!(
            create_xinfo_stream_full("s", Some(10)).args(),
            &["s", "FULL", "COUNT", "10"]
        );
        assert_eq!(create_xinfo_consumers("s", "g").args(), &["s", "g"]);
    }
}
