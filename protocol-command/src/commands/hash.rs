use bytes::Bytes;

use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::Result;
use crate::normalize::Entries;
use crate::scan::ScanOptions;
use crate::token;

fn keyed(request_type: RequestType, key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    cmd.arg(key);
    cmd.finish()
}

fn key_field(
    request_type: RequestType,
    key: impl AsRef<[u8]>,
    field: impl AsRef<[u8]>,
) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    cmd.arg(key).arg(field);
    cmd.finish()
}

fn key_fields<I>(request_type: RequestType, key: impl AsRef<[u8]>, fields: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(request_type);
    cmd.arg(key).args(fields);
    cmd.finish()
}

pub fn create_hget(key: impl AsRef<[u8]>, field: impl AsRef<[u8]>) -> CommandSpec {
    key_field(RequestType::HGet, key, field)
}

/// `HSET key field value [field value ...]`
pub fn create_hset(key: impl AsRef<[u8]>, entries: Entries<Bytes>) -> Result<CommandSpec> {
    let entries = entries.normalize()?;
    super::non_empty("field/value entries", &entries)?;
    let mut cmd = Builder::new(RequestType::HSet);
    cmd.arg(key);
    for (field, value) in entries {
        cmd.token(field).token(value);
    }
    Ok(cmd.finish())
}

pub fn create_hsetnx(
    key: impl AsRef<[u8]>,
    field: impl AsRef<[u8]>,
    value: impl AsRef<[u8]>,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::HSetNX);
    cmd.arg(key).arg(field).arg(value);
    cmd.finish()
}

pub fn create_hdel<I>(key: impl AsRef<[u8]>, fields: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    key_fields(RequestType::HDel, key, fields)
}

pub fn create_hmget<I>(key: impl AsRef<[u8]>, fields: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    key_fields(RequestType::HMGet, key, fields)
}

pub fn create_hexists(key: impl AsRef<[u8]>, field: impl AsRef<[u8]>) -> CommandSpec {
    key_field(RequestType::HExists, key, field)
}

pub fn create_hgetall(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::HGetAll, key)
}

pub fn create_hlen(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::HLen, key)
}

pub fn create_hkeys(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::HKeys, key)
}

pub fn create_hvals(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::HVals, key)
}

pub fn create_hstrlen(key: impl AsRef<[u8]>, field: impl AsRef<[u8]>) -> CommandSpec {
    key_field(RequestType::HStrlen, key, field)
}

pub fn create_hincr_by(key: impl AsRef<[u8]>, field: impl AsRef<[u8]>, amount: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::HIncrBy);
    cmd.arg(key).arg(field).int(amount);
    cmd.finish()
}

/// `HINCRBYFLOAT key field amount`; the amount must be finite.
pub fn create_hincr_by_float(
    key: impl AsRef<[u8]>,
    field: impl AsRef<[u8]>,
    amount: f64,
) -> Result<CommandSpec> {
    let amount = token::finite("increment", amount)?;
    let mut cmd = Builder::new(RequestType::HIncrByFloat);
    cmd.arg(key).arg(field).float(amount);
    Ok(cmd.finish())
}

/// `HRANDFIELD key`: one random field.
pub fn create_hrandfield(key: impl AsRef<[u8]>) -> CommandSpec {
    keyed(RequestType::HRandField, key)
}

/// `HRANDFIELD key count [WITHVALUES]`
///
/// A negative count allows repeated fields.
pub fn create_hrandfield_count(key: impl AsRef<[u8]>, count: i64, with_values: bool) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::HRandField);
    cmd.arg(key).int(count).flag(with_values, b"WITHVALUES");
    cmd.finish()
}

/// `HSCAN key cursor [MATCH p] [COUNT n] [NOVALUES]`
pub fn create_hscan(
    key: impl AsRef<[u8]>,
    cursor: impl AsRef<[u8]>,
    options: &ScanOptions,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::HScan);
    cmd.arg(key).arg(cursor);
    options.encode(&mut cmd, RequestType::HScan)?;
    Ok(cmd.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hset_pairs_order() {
        let cmd = create_hset("h", Entries::pairs([("f2", "v2"), ("f1", "v1")])).unwrap();
        assert_eq!(cmd.args(), &["h", "f2", "v2", "f1", "v1"]);
    }

    #[test]
    fn test_hset_map_empty_field_rejected() {
        let err = create_hset("h", Entries::map([("", "v")])).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_hset_rejects_no_entries() {
        let none: Entries<Bytes> = Entries::map(Vec::<(&str, &str)>::new());
        assert!(create_hset("h", none).is_err());
    }

    #[test]
    fn test_field_commands() {
        assert_eq!(create_hmget("h", ["a", "b"]).args(), &["h", "a", "b"]);
        assert_eq!(create_hdel("h", ["a"]).request_type(), RequestType::HDel);
        assert_eq!(create_hsetnx("h", "f", "v").args(), &["h", "f", "v"]);
        assert_eq!(create_hincr_by("h", "f", -2).args(), &["h", "f", "-2"]);
        assert_eq!(
            create_hincr_by_float("h", "f", 2.5).unwrap().args(),
            &["h", "f", "2.5"]
        );
    }

    #[test]
    fn test_hrandfield() {
        assert_eq!(create_hrandfield("h").args(), &["h"]);
        assert_eq!(
            create_hrandfield_count("h", -3, true).args(),
            &["h", "-3", "WITHVALUES"]
        );
    }

    #[test]
    fn test_hscan_novalues() {
        let cmd = create_hscan("h", "17", &ScanOptions::new().count(5).no_values()).unwrap();
        assert_eq!(cmd.args(), &["h", "17", "COUNT", "5", "NOVALUES"]);
    }
}
