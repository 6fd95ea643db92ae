//! Assembled commands.
//!
//! A [`CommandSpec`] pairs a [`RequestType`] tag with the ordered argument
//! tokens for one call. The tag names the command, so the argument list does
//! not repeat the command name; [`CommandSpec::command_line`] rebuilds the
//! full token sequence when a transport wants it.

use bytes::Bytes;

use crate::token::{self, Token};

macro_rules! request_types {
    ($($variant:ident => $name:literal, $keyed:literal;)*) => {
        /// The command-name tag carried by every [`CommandSpec`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum RequestType {
            $($variant,)*
        }

        impl RequestType {
            /// Returns the command name as sent on the wire.
            ///
            /// Container commands such as `CONFIG GET` return both words.
            /// [`RequestType::CustomCommand`] returns an empty string because
            /// its name travels in the argument list.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(RequestType::$variant => $name,)*
                }
            }

            /// Returns true if the first argument of this command is a key.
            pub const fn is_keyed(&self) -> bool {
                match self {
                    $(RequestType::$variant => $keyed,)*
                }
            }
        }
    };
}

request_types! {
    // strings
    Get => "GET", true;
    GetDel => "GETDEL", true;
    GetRange => "GETRANGE", true;
    GetEx => "GETEX", true;
    Set => "SET", true;
    MGet => "MGET", true;
    MSet => "MSET", true;
    MSetNX => "MSETNX", true;
    Incr => "INCR", true;
    IncrBy => "INCRBY", true;
    IncrByFloat => "INCRBYFLOAT", true;
    Decr => "DECR", true;
    DecrBy => "DECRBY", true;
    Append => "APPEND", true;
    Strlen => "STRLEN", true;
    SetRange => "SETRANGE", true;
    Lcs => "LCS", true;
    // keys
    Del => "DEL", true;
    Exists => "EXISTS", true;
    Unlink => "UNLINK", true;
    Touch => "TOUCH", true;
    Type => "TYPE", true;
    Rename => "RENAME", true;
    RenameNX => "RENAMENX", true;
    Persist => "PERSIST", true;
    Ttl => "TTL", true;
    PTtl => "PTTL", true;
    Expire => "EXPIRE", true;
    ExpireAt => "EXPIREAT", true;
    PExpire => "PEXPIRE", true;
    PExpireAt => "PEXPIREAT", true;
    ExpireTime => "EXPIRETIME", true;
    PExpireTime => "PEXPIRETIME", true;
    Copy => "COPY", true;
    Move => "MOVE", true;
    Dump => "DUMP", true;
    Restore => "RESTORE", true;
    Sort => "SORT", true;
    SortReadOnly => "SORT_RO", true;
    Scan => "SCAN", false;
    RandomKey => "RANDOMKEY", false;
    Watch => "WATCH", true;
    UnWatch => "UNWATCH", false;
    ObjectEncoding => "OBJECT ENCODING", true;
    ObjectFreq => "OBJECT FREQ", true;
    ObjectIdleTime => "OBJECT IDLETIME", true;
    ObjectRefCount => "OBJECT REFCOUNT", true;
    // hashes
    HGet => "HGET", true;
    HSet => "HSET", true;
    HSetNX => "HSETNX", true;
    HDel => "HDEL", true;
    HMGet => "HMGET", true;
    HExists => "HEXISTS", true;
    HGetAll => "HGETALL", true;
    HLen => "HLEN", true;
    HKeys => "HKEYS", true;
    HVals => "HVALS", true;
    HIncrBy => "HINCRBY", true;
    HIncrByFloat => "HINCRBYFLOAT", true;
    HStrlen => "HSTRLEN", true;
    HRandField => "HRANDFIELD", true;
    HScan => "HSCAN", true;
    // lists
    LPush => "LPUSH", true;
    LPushX => "LPUSHX", true;
    RPush => "RPUSH", true;
    RPushX => "RPUSHX", true;
    LPop => "LPOP", true;
    RPop => "RPOP", true;
    LRange => "LRANGE", true;
    LLen => "LLEN", true;
    LIndex => "LINDEX", true;
    LSet => "LSET", true;
    LTrim => "LTRIM", true;
    LRem => "LREM", true;
    LInsert => "LINSERT", true;
    LMove => "LMOVE", true;
    BLMove => "BLMOVE", true;
    LPos => "LPOS", true;
    LMPop => "LMPOP", false;
    BLMPop => "BLMPOP", false;
    BLPop => "BLPOP", true;
    BRPop => "BRPOP", true;
    // sets
    SAdd => "SADD", true;
    SRem => "SREM", true;
    SMembers => "SMEMBERS", true;
    SMove => "SMOVE", true;
    SCard => "SCARD", true;
    SInter => "SINTER", true;
    SInterCard => "SINTERCARD", false;
    SInterStore => "SINTERSTORE", true;
    SDiff => "SDIFF", true;
    SDiffStore => "SDIFFSTORE", true;
    SUnion => "SUNION", true;
    SUnionStore => "SUNIONSTORE", true;
    SIsMember => "SISMEMBER", true;
    SMIsMember => "SMISMEMBER", true;
    SPop => "SPOP", true;
    SRandMember => "SRANDMEMBER", true;
    SScan => "SSCAN", true;
    // sorted sets
    ZAdd => "ZADD", true;
    ZIncrBy => "ZINCRBY", true;
    ZRem => "ZREM", true;
    ZCard => "ZCARD", true;
    ZScore => "ZSCORE", true;
    ZMScore => "ZMSCORE", true;
    ZCount => "ZCOUNT", true;
    ZLexCount => "ZLEXCOUNT", true;
    ZRange => "ZRANGE", true;
    ZRangeStore => "ZRANGESTORE", true;
    ZRank => "ZRANK", true;
    ZRevRank => "ZREVRANK", true;
    ZRemRangeByRank => "ZREMRANGEBYRANK", true;
    ZRemRangeByLex => "ZREMRANGEBYLEX", true;
    ZRemRangeByScore => "ZREMRANGEBYSCORE", true;
    ZPopMin => "ZPOPMIN", true;
    ZPopMax => "ZPOPMAX", true;
    BZPopMin => "BZPOPMIN", true;
    BZPopMax => "BZPOPMAX", true;
    ZMPop => "ZMPOP", false;
    BZMPop => "BZMPOP", false;
    ZInter => "ZINTER", false;
    ZUnion => "ZUNION", false;
    ZInterStore => "ZINTERSTORE", true;
    ZUnionStore => "ZUNIONSTORE", true;
    ZInterCard => "ZINTERCARD", false;
    ZDiff => "ZDIFF", false;
    ZDiffStore => "ZDIFFSTORE", true;
    ZRandMember => "ZRANDMEMBER", true;
    ZScan => "ZSCAN", true;
    // streams
    XAdd => "XADD", true;
    XTrim => "XTRIM", true;
    XDel => "XDEL", true;
    XLen => "XLEN", true;
    XRange => "XRANGE", true;
    XRevRange => "XREVRANGE", true;
    XRead => "XREAD", false;
    XReadGroup => "XREADGROUP", false;
    XAck => "XACK", true;
    XGroupCreate => "XGROUP CREATE", true;
    XGroupDestroy => "XGROUP DESTROY", true;
    XGroupCreateConsumer => "XGROUP CREATECONSUMER", true;
    XGroupDelConsumer => "XGROUP DELCONSUMER", true;
    XGroupSetId => "XGROUP SETID", true;
    XPending => "XPENDING", true;
    XClaim => "XCLAIM", true;
    XAutoClaim => "XAUTOCLAIM", true;
    XInfoStream => "XINFO STREAM", true;
    XInfoGroups => "XINFO GROUPS", true;
    XInfoConsumers => "XINFO CONSUMERS", true;
    // geo
    GeoAdd => "GEOADD", true;
    GeoPos => "GEOPOS", true;
    GeoDist => "GEODIST", true;
    GeoHash => "GEOHASH", true;
    GeoSearch => "GEOSEARCH", true;
    GeoSearchStore => "GEOSEARCHSTORE", true;
    // bitmaps
    SetBit => "SETBIT", true;
    GetBit => "GETBIT", true;
    BitCount => "BITCOUNT", true;
    BitPos => "BITPOS", true;
    BitOp => "BITOP", false;
    BitField => "BITFIELD", true;
    BitFieldReadOnly => "BITFIELD_RO", true;
    // hyperloglog
    PfAdd => "PFADD", true;
    PfCount => "PFCOUNT", true;
    PfMerge => "PFMERGE", true;
    // server and connection
    Ping => "PING", false;
    Echo => "ECHO", false;
    Info => "INFO", false;
    Select => "SELECT", false;
    DbSize => "DBSIZE", false;
    Time => "TIME", false;
    LastSave => "LASTSAVE", false;
    FlushAll => "FLUSHALL", false;
    FlushDb => "FLUSHDB", false;
    ConfigGet => "CONFIG GET", false;
    ConfigSet => "CONFIG SET", false;
    ConfigRewrite => "CONFIG REWRITE", false;
    ConfigResetStat => "CONFIG RESETSTAT", false;
    ClientId => "CLIENT ID", false;
    ClientGetName => "CLIENT GETNAME", false;
    Lolwut => "LOLWUT", false;
    Wait => "WAIT", false;
    Publish => "PUBLISH", false;
    SPublish => "SPUBLISH", false;
    PubSubChannels => "PUBSUB CHANNELS", false;
    PubSubNumPat => "PUBSUB NUMPAT", false;
    PubSubNumSub => "PUBSUB NUMSUB", false;
    PubSubShardChannels => "PUBSUB SHARDCHANNELS", false;
    PubSubShardNumSub => "PUBSUB SHARDNUMSUB", false;
    // scripting
    FCall => "FCALL", false;
    FCallReadOnly => "FCALL_RO", false;
    FunctionLoad => "FUNCTION LOAD", false;
    FunctionDelete => "FUNCTION DELETE", false;
    FunctionFlush => "FUNCTION FLUSH", false;
    FunctionList => "FUNCTION LIST", false;
    FunctionStats => "FUNCTION STATS", false;
    FunctionKill => "FUNCTION KILL", false;
    FunctionDump => "FUNCTION DUMP", false;
    FunctionRestore => "FUNCTION RESTORE", false;
    ScriptExists => "SCRIPT EXISTS", false;
    ScriptFlush => "SCRIPT FLUSH", false;
    ScriptKill => "SCRIPT KILL", false;
    ScriptShow => "SCRIPT SHOW", false;
    // arbitrary
    CustomCommand => "", false;
}

/// A fully assembled command: a request type plus its ordered arguments.
///
/// A `CommandSpec` has no mutating methods. It is built once by one of the
/// `create_*` functions and then handed, unchanged, to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    request_type: RequestType,
    args: Vec<Token>,
}

impl CommandSpec {
    /// Returns the request type tag.
    #[inline]
    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// Returns the arguments, excluding the command name.
    #[inline]
    pub fn args(&self) -> &[Token] {
        &self.args
    }

    /// Consume the command, yielding the tag and arguments for a transport.
    #[inline]
    pub fn into_parts(self) -> (RequestType, Vec<Token>) {
        (self.request_type, self.args)
    }

    /// Returns the full token sequence, command name words first.
    pub fn command_line(&self) -> Vec<Token> {
        let name = self.request_type.name();
        let mut line = Vec::with_capacity(2 + self.args.len());
        line.extend(
            name.split(' ')
                .filter(|w| !w.is_empty())
                .map(|w| Bytes::from_static(w.as_bytes())),
        );
        line.extend(self.args.iter().cloned());
        line
    }
}

/// Accumulates the arguments of a command under construction.
pub(crate) struct Builder {
    request_type: RequestType,
    args: Vec<Token>,
}

impl Builder {
    #[inline]
    pub(crate) fn new(request_type: RequestType) -> Self {
        Self {
            request_type,
            args: Vec::new(),
        }
    }

    /// Append a binary-safe argument.
    #[inline]
    pub(crate) fn arg(&mut self, arg: impl AsRef<[u8]>) -> &mut Self {
        self.args.push(token::bytes(arg));
        self
    }

    /// Append every argument of an iterator, in order.
    pub(crate) fn args<I>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.args.extend(args.into_iter().map(token::bytes));
        self
    }

    /// Append a fixed protocol keyword.
    #[inline]
    pub(crate) fn keyword(&mut self, keyword: &'static [u8]) -> &mut Self {
        self.args.push(Bytes::from_static(keyword));
        self
    }

    /// Append an already-encoded token.
    #[inline]
    pub(crate) fn token(&mut self, token: Token) -> &mut Self {
        self.args.push(token);
        self
    }

    #[inline]
    pub(crate) fn int<I: itoa::Integer>(&mut self, n: I) -> &mut Self {
        self.args.push(token::int(n));
        self
    }

    #[inline]
    pub(crate) fn float(&mut self, n: f64) -> &mut Self {
        self.args.push(token::float(n));
        self
    }

    /// Append `keyword` only when `flag` is set.
    #[inline]
    pub(crate) fn flag(&mut self, flag: bool, keyword: &'static [u8]) -> &mut Self {
        if flag {
            self.args.push(Bytes::from_static(keyword));
        }
        self
    }

    pub(crate) fn finish(self) -> CommandSpec {
        tracing::trace!(
            command = self.request_type.name(),
            args = self.args.len(),
            "assembled command"
        );
        CommandSpec {
            request_type: self.request_type,
            args: self.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_type_names() {
        assert_eq!(RequestType::Get.name(), "GET");
        assert_eq!(RequestType::SortReadOnly.name(), "SORT_RO");
        assert_eq!(RequestType::ConfigGet.name(), "CONFIG GET");
        assert_eq!(RequestType::XGroupCreateConsumer.name(), "XGROUP CREATECONSUMER");
        assert_eq!(RequestType::CustomCommand.name(), "");
    }

    #[test]
    fn test_request_type_keyed() {
        assert!(RequestType::Set.is_keyed());
        assert!(!RequestType::Ping.is_keyed());
        assert!(!RequestType::ZMPop.is_keyed());
    }

    #[test]
    fn test_builder_preserves_order() {
        let mut b = Builder::new(RequestType::Set);
        b.arg("k").arg(b"v").keyword(b"NX").int(10).float(1.5);
        let cmd = b.finish();
        assert_eq!(cmd.request_type(), RequestType::Set);
        assert_eq!(cmd.args(), &["k", "v", "NX", "10", "1.5"]);
    }

    #[test]
    fn test_builder_flag() {
        let mut b = Builder::new(RequestType::ZAdd);
        b.flag(false, b"CH").flag(true, b"INCR");
        assert_eq!(b.finish().args(), &["INCR"]);
    }

    #[test]
    fn test_command_line_prepends_name_words() {
        let mut b = Builder::new(RequestType::ConfigGet);
        b.arg("maxmemory");
        let cmd = b.finish();
        assert_eq!(cmd.command_line(), vec!["CONFIG", "GET", "maxmemory"]);
    }

    #[test]
    fn test_command_line_custom_has_no_prefix() {
        let mut b = Builder::new(RequestType::CustomCommand);
        b.args(["CLIENT", "LIST"]);
        assert_eq!(b.finish().command_line(), vec!["CLIENT", "LIST"]);
    }

    #[test]
    fn test_into_parts() {
        let mut b = Builder::new(RequestType::Get);
        b.arg("k");
        let (rt, args) = b.finish().into_parts();
        assert_eq!(rt, RequestType::Get);
        assert_eq!(args, vec![Bytes::from_static(b"k")]);
    }

    #[test]
    fn test_command_spec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CommandSpec>();
        assert_send_sync::<RequestType>();
    }
}
