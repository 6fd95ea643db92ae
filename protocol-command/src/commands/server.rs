use bytes::Bytes;

use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::Result;
use crate::normalize::Entries;

/// `SYNC` / `ASYNC` for the flush commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlushMode {
    Sync,
    Async,
}

impl FlushMode {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            FlushMode::Sync => b"SYNC",
            FlushMode::Async => b"ASYNC",
        }
    }
}

/// A section of the INFO reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoSection {
    Server,
    Clients,
    Memory,
    Persistence,
    Stats,
    Replication,
    Cpu,
    CommandStats,
    LatencyStats,
    Sentinel,
    Cluster,
    Modules,
    Keyspace,
    ErrorStats,
    All,
    Default,
    Everything,
}

impl InfoSection {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            InfoSection::Server => b"server",
            InfoSection::Clients => b"clients",
            InfoSection::Memory => b"memory",
            InfoSection::Persistence => b"persistence",
            InfoSection::Stats => b"stats",
            InfoSection::Replication => b"replication",
            InfoSection::Cpu => b"cpu",
            InfoSection::CommandStats => b"commandstats",
            InfoSection::LatencyStats => b"latencystats",
            InfoSection::Sentinel => b"sentinel",
            InfoSection::Cluster => b"cluster",
            InfoSection::Modules => b"modules",
            InfoSection::Keyspace => b"keyspace",
            InfoSection::ErrorStats => b"errorstats",
            InfoSection::All => b"all",
            InfoSection::Default => b"default",
            InfoSection::Everything => b"everything",
        }
    }
}

fn bare(request_type: RequestType) -> CommandSpec {
    Builder::new(request_type).finish()
}

fn flush(request_type: RequestType, mode: Option<FlushMode>) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    if let Some(mode) = mode {
        cmd.keyword(mode.as_bytes());
    }
    cmd.finish()
}

// ── Connection ──────────────────────────────────────────────────────────

/// `PING [message]`
pub fn create_ping<M: AsRef<[u8]>>(message: Option<M>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Ping);
    if let Some(message) = message {
        cmd.arg(message);
    }
    cmd.finish()
}

pub fn create_echo(message: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Echo);
    cmd.arg(message);
    cmd.finish()
}

pub fn create_select(index: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Select);
    cmd.int(index);
    cmd.finish()
}

pub fn create_client_id() -> CommandSpec {
    bare(RequestType::ClientId)
}

pub fn create_client_get_name() -> CommandSpec {
    bare(RequestType::ClientGetName)
}

// ── Server ──────────────────────────────────────────────────────────────

/// `INFO [section ...]`
pub fn create_info(sections: &[InfoSection]) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Info);
    for section in sections {
        cmd.keyword(section.as_bytes());
    }
    cmd.finish()
}

pub fn create_dbsize() -> CommandSpec {
    bare(RequestType::DbSize)
}

pub fn create_time() -> CommandSpec {
    bare(RequestType::Time)
}

pub fn create_lastsave() -> CommandSpec {
    bare(RequestType::LastSave)
}

/// `FLUSHALL [SYNC|ASYNC]`
pub fn create_flushall(mode: Option<FlushMode>) -> CommandSpec {
    flush(RequestType::FlushAll, mode)
}

/// `FLUSHDB [SYNC|ASYNC]`
pub fn create_flushdb(mode: Option<FlushMode>) -> CommandSpec {
    flush(RequestType::FlushDb, mode)
}

/// `CONFIG GET parameter [parameter ...]`
pub fn create_config_get<I>(parameters: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::ConfigGet);
    cmd.args(parameters);
    cmd.finish()
}

/// `CONFIG SET parameter value [parameter value ...]`
pub fn create_config_set(parameters: Entries<Bytes>) -> Result<CommandSpec> {
    let parameters = parameters.normalize()?;
    super::non_empty("parameters", &parameters)?;
    let mut cmd = Builder::new(RequestType::ConfigSet);
    for (name, value) in parameters {
        cmd.token(name).token(value);
    }
    Ok(cmd.finish())
}

pub fn create_config_rewrite() -> CommandSpec {
    bare(RequestType::ConfigRewrite)
}

pub fn create_config_reset_stat() -> CommandSpec {
    bare(RequestType::ConfigResetStat)
}

/// Options for LOLWUT.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LolwutOptions {
    pub version: Option<i64>,
    /// Version-specific numeric parameters.
    pub parameters: Vec<i64>,
}

/// `LOLWUT [VERSION v] [param ...]`
pub fn create_lolwut(options: &LolwutOptions) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Lolwut);
    if let Some(version) = options.version {
        cmd.keyword(b"VERSION").int(version);
    }
    for param in &options.parameters {
        cmd.int(*param);
    }
    cmd.finish()
}

/// `WAIT numreplicas timeout-ms`
pub fn create_wait(num_replicas: u64, timeout_ms: u64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Wait);
    cmd.int(num_replicas).int(timeout_ms);
    cmd.finish()
}

// ── Pub/Sub ─────────────────────────────────────────────────────────────

/// `PUBLISH channel message`, or `SPUBLISH` when `sharded`.
pub fn create_publish(
    message: impl AsRef<[u8]>,
    channel: impl AsRef<[u8]>,
    sharded: bool,
) -> CommandSpec {
    let request_type = if sharded {
        RequestType::SPublish
    } else {
        RequestType::Publish
    };
    let mut cmd = Builder::new(request_type);
    cmd.arg(channel).arg(message);
    cmd.finish()
}

/// `PUBSUB CHANNELS [pattern]`
pub fn create_pubsub_channels<P: AsRef<[u8]>>(pattern: Option<P>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::PubSubChannels);
    if let Some(pattern) = pattern {
        cmd.arg(pattern);
    }
    cmd.finish()
}

pub fn create_pubsub_numpat() -> CommandSpec {
    bare(RequestType::PubSubNumPat)
}

/// `PUBSUB NUMSUB [channel ...]`
pub fn create_pubsub_numsub<I>(channels: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::PubSubNumSub);
    cmd.args(channels);
    cmd.finish()
}

/// `PUBSUB SHARDCHANNELS [pattern]`
pub fn create_pubsub_shard_channels<P: AsRef<[u8]>>(pattern: Option<P>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::PubSubShardChannels);
    if let Some(pattern) = pattern {
        cmd.arg(pattern);
    }
    cmd.finish()
}

/// `PUBSUB SHARDNUMSUB [channel ...]`
pub fn create_pubsub_shard_numsub<I>(channels: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::PubSubShardNumSub);
    cmd.args(channels);
    cmd.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping() {
        assert!(create_ping(None::<&str>).args().is_empty());
        assert_eq!(create_ping(Some("hi")).args(), &["hi"]);
    }

    #[test]
    fn test_info_sections() {
        let cmd = create_info(&[InfoSection::Server, InfoSection::CommandStats]);
        assert_eq!(cmd.args(), &["server", "commandstats"]);
        assert!(create_info(&[]).args().is_empty());
    }

    #[test]
    fn test_flush_modes() {
        assert_eq!(create_flushall(Some(FlushMode::Async)).args(), &["ASYNC"]);
        assert!(create_flushdb(None).args().is_empty());
    }

    #[test]
    fn test_config() {
        let cmd = create_config_get(["maxmemory", "timeout"]);
        assert_eq!(
            cmd.command_line(),
            vec!["CONFIG", "GET", "maxmemory", "timeout"]
        );
        let cmd = create_config_set(Entries::map([("timeout", "100"), ("maxmemory", "1gb")])).unwrap();
        assert_eq!(cmd.args(), &["maxmemory", "1gb", "timeout", "100"]);
    }

    #[test]
    fn test_lolwut() {
        let opts = LolwutOptions {
            version: Some(6),
            parameters: vec![40, 20],
        };
        assert_eq!(create_lolwut(&opts).args(), &["VERSION", "6", "40", "20"]);
    }

    #[test]
    fn test_publish_channel_first() {
        let cmd = create_publish("hello", "news", false);
        assert_eq!(cmd.request_type(), RequestType::Publish);
        assert_eq!(cmd.args(), &["news", "hello"]);
        assert_eq!(
            create_publish("hello", "news", true).request_type(),
            RequestType::SPublish
        );
    }

    #[test]
    fn test_pubsub() {
        assert_eq!(create_pubsub_channels(Some("news.*")).args(), &["news.*"]);
        assert!(create_pubsub_shard_channels(None::<&str>).args().is_empty());
        assert_eq!(create_pubsub_numsub(["a", "b"]).args(), &["a", "b"]);
    }

    #[test]
    fn test_misc() {
        assert_eq!(create_select(3).args(), &["3"]);
        assert_eq!(create_wait(1, 500).args(), &["1", "500"]);
        assert_eq!(create_time().request_type(), RequestType::Time);
    }
}
