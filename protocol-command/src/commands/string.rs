use bytes::Bytes;

use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::{Result, invalid_argument};
use crate::normalize::Entries;
use crate::token;

// ── Expiry ──────────────────────────────────────────────────────────────

/// How an expiry amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// `EX`: relative, in seconds.
    Seconds,
    /// `PX`: relative, in milliseconds.
    Milliseconds,
    /// `EXAT`: absolute Unix time in seconds.
    UnixSeconds,
    /// `PXAT`: absolute Unix time in milliseconds.
    UnixMilliseconds,
}

impl TimeUnit {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            TimeUnit::Seconds => b"EX",
            TimeUnit::Milliseconds => b"PX",
            TimeUnit::UnixSeconds => b"EXAT",
            TimeUnit::UnixMilliseconds => b"PXAT",
        }
    }
}

/// Expiry for SET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetExpiry {
    /// `KEEPTTL`: retain the key's current time to live.
    KeepExisting,
    Expire { unit: TimeUnit, count: u64 },
}

/// Expiry for GETEX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GetExExpiry {
    /// `PERSIST`: remove the time to live.
    Persist,
    Expire { unit: TimeUnit, count: u64 },
}

// ── SET ─────────────────────────────────────────────────────────────────

/// The write condition of a SET, resolved from [`SetOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetCondition {
    /// `XX`
    OnlyIfExists,
    /// `NX`
    OnlyIfDoesNotExist,
    /// `IFEQ comparison-value`
    OnlyIfEqual(Bytes),
}

/// Options for SET.
///
/// At most one write condition may be chosen; [`create_set`] rejects
/// options with more than one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetOptions {
    pub only_if_exists: bool,
    pub only_if_does_not_exist: bool,
    pub only_if_equal: Option<Bytes>,
    /// Return the previous value (`GET`).
    pub return_old_value: bool,
    pub expiry: Option<SetExpiry>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only_if_exists(mut self) -> Self {
        self.only_if_exists = true;
        self
    }

    pub fn only_if_does_not_exist(mut self) -> Self {
        self.only_if_does_not_exist = true;
        self
    }

    pub fn only_if_equal(mut self, comparison_value: impl AsRef<[u8]>) -> Self {
        self.only_if_equal = Some(token::bytes(comparison_value));
        self
    }

    pub fn return_old_value(mut self) -> Self {
        self.return_old_value = true;
        self
    }

    pub fn expiry(mut self, expiry: SetExpiry) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Resolve the chosen write condition, failing if more than one is set.
    pub fn condition(&self) -> Result<Option<SetCondition>> {
        let chosen = usize::from(self.only_if_exists)
            + usize::from(self.only_if_does_not_exist)
            + usize::from(self.only_if_equal.is_some());
        if chosen > 1 {
            return Err(invalid_argument(
                "SET accepts only one of only-if-exists, only-if-does-not-exist and only-if-equal",
            ));
        }
        Ok(if self.only_if_exists {
            Some(SetCondition::OnlyIfExists)
        } else if self.only_if_does_not_exist {
            Some(SetCondition::OnlyIfDoesNotExist)
        } else {
            self.only_if_equal.clone().map(SetCondition::OnlyIfEqual)
        })
    }
}

/// `SET key value [NX|XX|IFEQ v] [GET] [KEEPTTL|EX|PX|EXAT|PXAT n]`
pub fn create_set(
    key: impl AsRef<[u8]>,
    value: impl AsRef<[u8]>,
    options: &SetOptions,
) -> Result<CommandSpec> {
    let condition = options.condition()?;
    let mut cmd = Builder::new(RequestType::Set);
    cmd.arg(key).arg(value);
    match condition {
        Some(SetCondition::OnlyIfExists) => {
            cmd.keyword(b"XX");
        }
        Some(SetCondition::OnlyIfDoesNotExist) => {
            cmd.keyword(b"NX");
        }
        Some(SetCondition::OnlyIfEqual(v)) => {
            cmd.keyword(b"IFEQ").token(v);
        }
        None => {}
    }
    cmd.flag(options.return_old_value, b"GET");
    match options.expiry {
        Some(SetExpiry::KeepExisting) => {
            cmd.keyword(b"KEEPTTL");
        }
        Some(SetExpiry::Expire { unit, count }) => {
            cmd.keyword(unit.as_bytes()).int(count);
        }
        None => {}
    }
    Ok(cmd.finish())
}

// ── Reads ───────────────────────────────────────────────────────────────

pub fn create_get(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Get);
    cmd.arg(key);
    cmd.finish()
}

pub fn create_get_del(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::GetDel);
    cmd.arg(key);
    cmd.finish()
}

/// `GETRANGE key start end`; negative offsets count from the end.
pub fn create_get_range(key: impl AsRef<[u8]>, start: i64, end: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::GetRange);
    cmd.arg(key).int(start).int(end);
    cmd.finish()
}

/// `GETEX key [PERSIST|EX|PX|EXAT|PXAT n]`
pub fn create_get_ex(key: impl AsRef<[u8]>, expiry: Option<GetExExpiry>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::GetEx);
    cmd.arg(key);
    match expiry {
        Some(GetExExpiry::Persist) => {
            cmd.keyword(b"PERSIST");
        }
        Some(GetExExpiry::Expire { unit, count }) => {
            cmd.keyword(unit.as_bytes()).int(count);
        }
        None => {}
    }
    cmd.finish()
}

pub fn create_mget<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::MGet);
    cmd.args(keys);
    cmd.finish()
}

pub fn create_strlen(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Strlen);
    cmd.arg(key);
    cmd.finish()
}

// ── Writes ──────────────────────────────────────────────────────────────

/// `MSET key value [key value ...]`
pub fn create_mset(entries: Entries<Bytes>) -> Result<CommandSpec> {
    multi_set(RequestType::MSet, entries)
}

/// `MSETNX key value [key value ...]`
pub fn create_msetnx(entries: Entries<Bytes>) -> Result<CommandSpec> {
    multi_set(RequestType::MSetNX, entries)
}

fn multi_set(request_type: RequestType, entries: Entries<Bytes>) -> Result<CommandSpec> {
    let entries = entries.normalize()?;
    super::non_empty("key/value entries", &entries)?;
    let mut cmd = Builder::new(request_type);
    for (key, value) in entries {
        cmd.token(key).token(value);
    }
    Ok(cmd.finish())
}

pub fn create_append(key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Append);
    cmd.arg(key).arg(value);
    cmd.finish()
}

/// `SETRANGE key offset value`
pub fn create_set_range(key: impl AsRef<[u8]>, offset: u64, value: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::SetRange);
    cmd.arg(key).int(offset).arg(value);
    cmd.finish()
}

// ── Counters ────────────────────────────────────────────────────────────

pub fn create_incr(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Incr);
    cmd.arg(key);
    cmd.finish()
}

pub fn create_incr_by(key: impl AsRef<[u8]>, amount: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::IncrBy);
    cmd.arg(key).int(amount);
    cmd.finish()
}

/// `INCRBYFLOAT key amount`; the amount must be finite.
pub fn create_incr_by_float(key: impl AsRef<[u8]>, amount: f64) -> Result<CommandSpec> {
    let amount = token::finite("increment", amount)?;
    let mut cmd = Builder::new(RequestType::IncrByFloat);
    cmd.arg(key).float(amount);
    Ok(cmd.finish())
}

pub fn create_decr(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Decr);
    cmd.arg(key);
    cmd.finish()
}

pub fn create_decr_by(key: impl AsRef<[u8]>, amount: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::DecrBy);
    cmd.arg(key).int(amount);
    cmd.finish()
}

// ── LCS ─────────────────────────────────────────────────────────────────

/// What LCS returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LcsMode {
    /// The common subsequence itself.
    #[default]
    String,
    /// `LEN`: only its length.
    Len,
    /// `IDX`: match positions.
    Idx {
        min_match_len: Option<u64>,
        with_match_len: bool,
    },
}

/// `LCS key1 key2 [LEN | IDX [MINMATCHLEN n] [WITHMATCHLEN]]`
pub fn create_lcs(key1: impl AsRef<[u8]>, key2: impl AsRef<[u8]>, mode: LcsMode) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::Lcs);
    cmd.arg(key1).arg(key2);
    match mode {
        LcsMode::String => {}
        LcsMode::Len => {
            cmd.keyword(b"LEN");
        }
        LcsMode::Idx {
            min_match_len,
            with_match_len,
        } => {
            cmd.keyword(b"IDX");
            if let Some(len) = min_match_len {
                cmd.keyword(b"MINMATCHLEN").int(len);
            }
            cmd.flag(with_match_len, b"WITHMATCHLEN");
        }
    }
    cmd.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_plain() {
        let cmd = create_set("k", "v", &SetOptions::new()).unwrap();
        assert_eq!(cmd.request_type(), RequestType::Set);
        assert_eq!(cmd.args(), &["k", "v"]);
    }

    #[test]
    fn test_set_full_option_order() {
        let opts = SetOptions::new()
            .only_if_does_not_exist()
            .return_old_value()
            .expiry(SetExpiry::Expire {
                unit: TimeUnit::Milliseconds,
                count: 1500,
            });
        let cmd = create_set("k", "v", &opts).unwrap();
        assert_eq!(cmd.args(), &["k", "v", "NX", "GET", "PX", "1500"]);
    }

    #[test]
    fn test_set_if_equal_keep_ttl() {
        let opts = SetOptions::new()
            .only_if_equal("old")
            .expiry(SetExpiry::KeepExisting);
        let cmd = create_set("k", "new", &opts).unwrap();
        assert_eq!(cmd.args(), &["k", "new", "IFEQ", "old", "KEEPTTL"]);
    }

    #[test]
    fn test_set_conflicting_conditions() {
        let opts = SetOptions::new().only_if_exists().only_if_equal("x");
        assert!(create_set("k", "v", &opts).unwrap_err().is_invalid_argument());
        let opts = SetOptions::new().only_if_exists().only_if_does_not_exist();
        assert!(create_set("k", "v", &opts).is_err());
    }

    #[test]
    fn test_set_binary_value_untouched() {
        let value = [0u8, b' ', b'"', 0xff];
        let cmd = create_set("k", value, &SetOptions::new()).unwrap();
        assert_eq!(&cmd.args()[1][..], &value[..]);
    }

    #[test]
    fn test_get_ex() {
        assert_eq!(create_get_ex("k", None).args(), &["k"]);
        assert_eq!(
            create_get_ex("k", Some(GetExExpiry::Persist)).args(),
            &["k", "PERSIST"]
        );
        let cmd = create_get_ex(
            "k",
            Some(GetExExpiry::Expire {
                unit: TimeUnit::UnixSeconds,
                count: 1_700_000_000,
            }),
        );
        assert_eq!(cmd.args(), &["k", "EXAT", "1700000000"]);
    }

    #[test]
    fn test_mset_from_map_and_pairs() {
        let from_pairs = create_mset(Entries::pairs([("a", "1"), ("b", "2")])).unwrap();
        let from_map = create_mset(Entries::map([("b", "2"), ("a", "1")])).unwrap();
        assert_eq!(from_pairs, from_map);
        assert_eq!(from_pairs.args(), &["a", "1", "b", "2"]);
    }

    #[test]
    fn test_msetnx_rejects_empty() {
        let empty: Entries<Bytes> = Entries::pairs(Vec::<(&str, &str)>::new());
        assert!(create_msetnx(empty).is_err());
    }

    #[test]
    fn test_counters() {
        assert_eq!(create_incr_by("c", -5).args(), &["c", "-5"]);
        assert_eq!(create_decr_by("c", 7).args(), &["c", "7"]);
        assert_eq!(create_incr_by_float("c", 0.5).unwrap().args(), &["c", "0.5"]);
        assert!(create_incr_by_float("c", f64::NAN).is_err());
    }

    #[test]
    fn test_ranges() {
        assert_eq!(create_get_range("k", 0, -1).args(), &["k", "0", "-1"]);
        assert_eq!(create_set_range("k", 6, "x").args(), &["k", "6", "x"]);
    }

    #[test]
    fn test_lcs_modes() {
        assert_eq!(create_lcs("a", "b", LcsMode::String).args(), &["a", "b"]);
        assert_eq!(create_lcs("a", "b", LcsMode::Len).args(), &["a", "b", "LEN"]);
        let cmd = create_lcs(
            "a",
            "b",
            LcsMode::Idx {
                min_match_len: Some(4),
                with_match_len: true,
            },
        );
        assert_eq!(
            cmd.args(),
            &["a", "b", "IDX", "MINMATCHLEN", "4", "WITHMATCHLEN"]
        );
    }
}
