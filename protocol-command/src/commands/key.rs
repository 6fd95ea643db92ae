use bytes::Bytes;

use crate::boundary::Limit;
use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::{Result, invalid_argument};
use crate::geo::SortOrder;
use crate::scan::ScanOptions;

fn keyed(request_type: RequestType, key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    cmd.arg(key);
    cmd.finish()
}

fn multi_key<I>(request_type: RequestType, keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(request_type);
    cmd.args(keys);
    cmd.finish()
}

// ── Existence and removal ───────────────────────────────────────────────

pub fn create_del<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    multi_key(RequestType::Del, keys)
}

pub fn create_exists<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    multi_key(RequestType::Exists, keys)
}

pub fn create_unlink<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    multi_key(RequestType::Unlink, keys)
}

pub fn create_touch<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    multi_key(RequestType::Touch, keys)
}

pub fn create_type(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::Type, key)
}

pub fn create_rename(key: impl AsRef<[u8]>, new_key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Rename);
    cmd.arg(key).arg(new_key);
    cmd.finish()
}

pub fn create_rename_nx(key: impl AsRef<[u8]>, new_key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::RenameNX);
    cmd.arg(key).arg(new_key);
    cmd.finish()
}

pub fn create_random_key() -> CommandSpec {
    Builder::new(RequestType::RandomKey).finish()
}

// ── Expiry ──────────────────────────────────────────────────────────────

/// Condition for EXPIRE and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpireOptions {
    /// `NX`
    HasNoExpiry,
    /// `XX`
    HasExistingExpiry,
    /// `GT`
    NewExpiryGreaterThanCurrent,
    /// `LT`
    NewExpiryLessThanCurrent,
}

impl ExpireOptions {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            ExpireOptions::HasNoExpiry => b"NX",
            ExpireOptions::HasExistingExpiry => b"XX",
            ExpireOptions::NewExpiryGreaterThanCurrent => b"GT",
            ExpireOptions::NewExpiryLessThanCurrent => b"LT",
        }
    }
}

fn expire(
    request_type: RequestType,
    key: impl AsRef<[u8]>,
    amount: i64,
    option: Option<ExpireOptions>,
) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    cmd.arg(key).int(amount);
    if let Some(option) = option {
        cmd.keyword(option.as_bytes());
    }
    cmd.finish()
}

/// `EXPIRE key seconds [NX|XX|GT|LT]`
pub fn create_expire(key: impl AsRef<[u8]>, seconds: i64, option: Option<ExpireOptions>) -> CommandSpec {
    expire(RequestType::Expire, key, seconds, option)
}

/// `EXPIREAT key unix-seconds [NX|XX|GT|LT]`
pub fn create_expire_at(
    key: impl AsRef<[u8]>,
    unix_seconds: i64,
    option: Option<ExpireOptions>,
) -> CommandSpec {
    expire(RequestType::ExpireAt, key, unix_seconds, option)
}

/// `PEXPIRE key milliseconds [NX|XX|GT|LT]`
pub fn create_pexpire(
    key: impl AsRef<[u8]>,
    milliseconds: i64,
    option: Option<ExpireOptions>,
) -> CommandSpec {
    expire(RequestType::PExpire, key, milliseconds, option)
}

/// `PEXPIREAT key unix-milliseconds [NX|XX|GT|LT]`
pub fn create_pexpire_at(
    key: impl AsRef<[u8]>,
    unix_milliseconds: i64,
    option: Option<ExpireOptions>,
) -> CommandSpec {
    expire(RequestType::PExpireAt, key, unix_milliseconds, option)
}

pub fn create_expire_time(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::ExpireTime, key)
}

pub fn create_pexpire_time(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::PExpireTime, key)
}

pub fn create_ttl(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::Ttl, key)
}

pub fn create_pttl(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::PTtl, key)
}

pub fn create_persist(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::Persist, key)
}

// ── Copy, move, dump, restore ───────────────────────────────────────────

/// Options for COPY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyOptions {
    pub destination_db: Option<i64>,
    pub replace: bool,
}

/// `COPY source destination [DB n] [REPLACE]`
pub fn create_copy(
    source: impl AsRef<[u8]>,
    destination: impl AsRef<[u8]>,
    options: CopyOptions,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Copy);
    cmd.arg(source).arg(destination);
    if let Some(db) = options.destination_db {
        cmd.keyword(b"DB").int(db);
    }
    cmd.flag(options.replace, b"REPLACE");
    cmd.finish()
}

/// `MOVE key db`
pub fn create_move(key: impl AsRef<[u8]>, db_index: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Move);
    cmd.arg(key).int(db_index);
    cmd.finish()
}

pub fn create_dump(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::Dump, key)
}

/// Options for RESTORE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestoreOptions {
    pub replace: bool,
    /// Interpret the ttl as an absolute Unix time in milliseconds.
    pub abs_ttl: bool,
    /// `IDLETIME seconds`; excludes `frequency`.
    pub idle_time: Option<u64>,
    /// `FREQ n`; excludes `idle_time`.
    pub frequency: Option<u64>,
}

/// `RESTORE key ttl value [REPLACE] [ABSTTL] [IDLETIME s | FREQ n]`
pub fn create_restore(
    key: impl AsRef<[u8]>,
    ttl: u64,
    value: impl AsRef<[u8]>,
    options: RestoreOptions,
) -> Result<CommandSpec> {
    if options.idle_time.is_some() && options.frequency.is_some() {
        return Err(invalid_argument(
            "RESTORE accepts either IDLETIME or FREQ, not both",
        ));
    }
    let mut cmd = Builder::new(RequestType::Restore);
    cmd.arg(key).int(ttl).arg(value);
    cmd.flag(options.replace, b"REPLACE")
        .flag(options.abs_ttl, b"ABSTTL");
    if let Some(idle) = options.idle_time {
        cmd.keyword(b"IDLETIME").int(idle);
    }
    if let Some(freq) = options.frequency {
        cmd.keyword(b"FREQ").int(freq);
    }
    Ok(cmd.finish())
}

// ── SORT ────────────────────────────────────────────────────────────────

/// Options for SORT and SORT_RO.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortOptions {
    /// `BY pattern`: sort by external keys.
    pub by_pattern: Option<Bytes>,
    pub limit: Option<Limit>,
    /// `GET pattern`, repeated.
    pub get_patterns: Vec<Bytes>,
    pub order_by: Option<SortOrder>,
    /// Sort lexicographically (`ALPHA`).
    pub is_alpha: bool,
}

impl SortOptions {
    fn encode(&self, cmd: &mut Builder) {
        if let Some(pattern) = &self.by_pattern {
            cmd.keyword(b"BY").token(pattern.clone());
        }
        if let Some(limit) = self.limit {
            cmd.keyword(b"LIMIT").int(limit.offset).int(limit.count);
        }
        for pattern in &self.get_patterns {
            cmd.keyword(b"GET").token(pattern.clone());
        }
        if let Some(order) = self.order_by {
            cmd.keyword(order.as_bytes());
        }
        cmd.flag(self.is_alpha, b"ALPHA");
    }
}

/// `SORT key [BY p] [LIMIT o c] [GET p ...] [ASC|DESC] [ALPHA]`
pub fn create_sort(key: impl AsRef<[u8]>, options: &SortOptions) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Sort);
    cmd.arg(key);
    options.encode(&mut cmd);
    cmd.finish()
}

/// `SORT key ... STORE destination`
pub fn create_sort_store(
    key: impl AsRef<[u8]>,
    destination: impl AsRef<[u8]>,
    options: &SortOptions,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Sort);
    cmd.arg(key);
    options.encode(&mut cmd);
    cmd.keyword(b"STORE").arg(destination);
    cmd.finish()
}

/// `SORT_RO key ...`
pub fn create_sort_read_only(key: impl AsRef<[u8]>, options: &SortOptions) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::SortReadOnly);
    cmd.arg(key);
    options.encode(&mut cmd);
    cmd.finish()
}

// ── Iteration and transactions ──────────────────────────────────────────

/// `SCAN cursor [MATCH p] [COUNT n] [TYPE t]`
pub fn create_scan(cursor: impl AsRef<[u8]>, options: &ScanOptions) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::Scan);
    cmd.arg(cursor);
    options.encode(&mut cmd, RequestType::Scan)?;
    Ok(cmd.finish())
}

pub fn create_watch<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    multi_key(RequestType::Watch, keys)
}

pub fn create_unwatch() -> CommandSpec {
    Builder::new(RequestType::UnWatch).finish()
}

// ── OBJECT ──────────────────────────────────────────────────────────────

pub fn create_object_encoding(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::ObjectEncoding, key)
}

pub fn create_object_freq(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::ObjectFreq, key)
}

pub fn create_object_idle_time(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::ObjectIdleTime, key)
}

pub fn create_object_ref_count(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::ObjectRefCount, key)
}
