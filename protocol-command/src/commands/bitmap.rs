use crate::bitfield::{self, BitFieldSubCommand, BitOffsetOptions, BitwiseOperation};
use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::{Result, invalid_argument, unsupported_combination};

// ── Single bits ─────────────────────────────────────────────────────────

/// `SETBIT key offset 0|1`
pub fn create_setbit(key: impl AsRef<[u8]>, offset: u64, value: u8) -> Result<CommandSpec> {
    if value > 1 {
        return Err(invalid_argument(format!("bit value must be 0 or 1, got {value}")));
    }
    let mut cmd = Builder::new(RequestType::SetBit);
    cmd.arg(key).int(offset).int(value);
    Ok(cmd.finish())
}

pub fn create_getbit(key: impl AsRef<[u8]>, offset: u64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::GetBit);
    cmd.arg(key).int(offset);
    cmd.finish()
}

/// `BITCOUNT key [start [end [BYTE|BIT]]]`
pub fn create_bitcount(key: impl AsRef<[u8]>, options: Option<BitOffsetOptions>) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::BitCount);
    cmd.arg(key);
    if let Some(options) = options {
        options.encode(&mut cmd)?;
    }
    Ok(cmd.finish())
}

/// `BITPOS key 0|1 [start [end [BYTE|BIT]]]`
pub fn create_bitpos(
    key: impl AsRef<[u8]>,
    bit: u8,
    options: Option<BitOffsetOptions>,
) -> Result<CommandSpec> {
    if bit > 1 {
        return Err(invalid_argument(format!("bit must be 0 or 1, got {bit}")));
    }
    let mut cmd = Builder::new(RequestType::BitPos);
    cmd.arg(key).int(bit);
    if let Some(options) = options {
        options.encode(&mut cmd)?;
    }
    Ok(cmd.finish())
}

/// `BITOP AND|OR|XOR|NOT destination key [key ...]`
///
/// NOT takes exactly one source key.
pub fn create_bitop<I>(
    operation: BitwiseOperation,
    destination: impl AsRef<[u8]>,
    keys: I,
) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let keys = super::collect(keys);
    super::non_empty("source keys", &keys)?;
    if operation == BitwiseOperation::Not && keys.len() != 1 {
        return Err(invalid_argument(format!(
            "BITOP NOT takes one source key, got {}",
            keys.len()
        )));
    }
    let mut cmd = Builder::new(RequestType::BitOp);
    cmd.keyword(operation.as_bytes()).arg(destination);
    for key in keys {
        cmd.token(key);
    }
    Ok(cmd.finish())
}

// ── BITFIELD ────────────────────────────────────────────────────────────

/// `BITFIELD key [subcommand ...]`, subcommands in the given order.
pub fn create_bitfield(key: impl AsRef<[u8]>, subcommands: &[BitFieldSubCommand]) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::BitField);
    cmd.arg(key);
    bitfield::encode_subcommands(&mut cmd, subcommands);
    cmd.finish()
}

/// `BITFIELD_RO key [GET encoding offset ...]`
pub fn create_bitfield_read_only(
    key: impl AsRef<[u8]>,
    subcommands: &[BitFieldSubCommand],
) -> Result<CommandSpec> {
    if let Some(sub) = subcommands.iter().find(|s| !s.is_read_only()) {
        return Err(unsupported_combination(format!(
            "BITFIELD_RO only accepts GET subcommands, got {sub:?}"
        )));
    }
    let mut cmd = Builder::new(RequestType::BitFieldReadOnly);
    cmd.arg(key);
    bitfield::encode_subcommands(&mut cmd, subcommands);
    Ok(cmd.finish())
}

// ── HyperLogLog ─────────────────────────────────────────────────────────

pub fn create_pfadd<I>(key: impl AsRef<[u8]>, elements: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::PfAdd);
    cmd.arg(key).args(elements);
    cmd.finish()
}

pub fn create_pfcount<I>(keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::PfCount);
    cmd.args(keys);
    cmd.finish()
}

pub fn create_pfmerge<I>(destination: impl AsRef<[u8]>, source_keys: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::PfMerge);
    cmd.arg(destination).args(source_keys);
    cmd.finish()
}
