//! BITFIELD subcommands and bitmap range options.

use bytes::{BufMut, Bytes, BytesMut};

use crate::command::Builder;
use crate::error::{Result, invalid_argument, unsupported_combination};
use crate::token;

/// Integer encoding of a bitfield: signed or unsigned, with a bit width.
///
/// Signed widths are 1..=64, unsigned widths 1..=63. Out-of-range widths
/// cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitEncoding {
    signed: bool,
    width: u8,
}

impl BitEncoding {
    pub const MAX_SIGNED_WIDTH: u8 = 64;
    pub const MAX_UNSIGNED_WIDTH: u8 = 63;

    /// A signed integer of `width` bits.
    pub fn signed(width: u8) -> Result<Self> {
        if width == 0 || width > Self::MAX_SIGNED_WIDTH {
            return Err(invalid_argument(format!(
                "signed bitfield width must be 1..={}, got {width}",
                Self::MAX_SIGNED_WIDTH
            )));
        }
        Ok(Self {
            signed: true,
            width,
        })
    }

    /// An unsigned integer of `width` bits.
    pub fn unsigned(width: u8) -> Result<Self> {
        if width == 0 || width > Self::MAX_UNSIGNED_WIDTH {
            return Err(invalid_argument(format!(
                "unsigned bitfield width must be 1..={}, got {width}",
                Self::MAX_UNSIGNED_WIDTH
            )));
        }
        Ok(Self {
            signed: false,
            width,
        })
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Encode as `i<width>` or `u<width>`.
    pub fn encode(&self) -> Bytes {
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(self.width).as_bytes();
        let mut out = BytesMut::with_capacity(1 + digits.len());
        out.put_u8(if self.signed { b'i' } else { b'u' });
        out.put_slice(digits);
        out.freeze()
    }
}

/// Bit offset of a bitfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitFieldOffset {
    /// A raw bit index.
    Absolute(u64),
    /// An index in units of the paired encoding's width, sent as `#k`.
    Multiplier(u64),
}

impl BitFieldOffset {
    pub fn encode(&self) -> Bytes {
        match self {
            BitFieldOffset::Absolute(k) => token::int(*k),
            BitFieldOffset::Multiplier(k) => {
                let mut buf = itoa::Buffer::new();
                let digits = buf.format(*k).as_bytes();
                let mut out = BytesMut::with_capacity(1 + digits.len());
                out.put_u8(b'#');
                out.put_slice(digits);
                out.freeze()
            }
        }
    }

    /// The bit index the server resolves this offset to, or `None` on
    /// overflow.
    pub fn bit_index(&self, encoding: &BitEncoding) -> Option<u64> {
        match self {
            BitFieldOffset::Absolute(k) => Some(*k),
            BitFieldOffset::Multiplier(k) => k.checked_mul(u64::from(encoding.width())),
        }
    }
}

/// Behaviour of SET and INCRBY on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOverflowControl {
    Wrap,
    Sat,
    Fail,
}

impl BitOverflowControl {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BitOverflowControl::Wrap => b"WRAP",
            BitOverflowControl::Sat => b"SAT",
            BitOverflowControl::Fail => b"FAIL",
        }
    }
}

/// One BITFIELD subcommand.
///
/// `Overflow` affects every SET and INCRBY that follows it in the same
/// command, so subcommand order is significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitFieldSubCommand {
    Get {
        encoding: BitEncoding,
        offset: BitFieldOffset,
    },
    Set {
        encoding: BitEncoding,
        offset: BitFieldOffset,
        value: i64,
    },
    IncrBy {
        encoding: BitEncoding,
        offset: BitFieldOffset,
        increment: i64,
    },
    Overflow(BitOverflowControl),
}

impl BitFieldSubCommand {
    pub fn get(encoding: BitEncoding, offset: BitFieldOffset) -> Self {
        BitFieldSubCommand::Get { encoding, offset }
    }

    pub fn set(encoding: BitEncoding, offset: BitFieldOffset, value: i64) -> Self {
        BitFieldSubCommand::Set {
            encoding,
            offset,
            value,
        }
    }

    pub fn incr_by(encoding: BitEncoding, offset: BitFieldOffset, increment: i64) -> Self {
        BitFieldSubCommand::IncrBy {
            encoding,
            offset,
            increment,
        }
    }

    pub fn overflow(control: BitOverflowControl) -> Self {
        BitFieldSubCommand::Overflow(control)
    }

    /// Returns true for GET, the only subcommand BITFIELD_RO accepts.
    pub fn is_read_only(&self) -> bool {
        matches!(self, BitFieldSubCommand::Get { .. })
    }

    pub(crate) fn encode(&self, cmd: &mut Builder) {
        match self {
            BitFieldSubCommand::Get { encoding, offset } => {
                cmd.keyword(b"GET")
                    .token(encoding.encode())
                    .token(offset.encode());
            }
            BitFieldSubCommand::Set {
                encoding,
                offset,
                value,
            } => {
                cmd.keyword(b"SET")
                    .token(encoding.encode())
                    .token(offset.encode())
                    .int(*value);
            }
            BitFieldSubCommand::IncrBy {
                encoding,
                offset,
                increment,
            } => {
                cmd.keyword(b"INCRBY")
                    .token(encoding.encode())
                    .token(offset.encode())
                    .int(*increment);
            }
            BitFieldSubCommand::Overflow(control) => {
                cmd.keyword(b"OVERFLOW").keyword(control.as_bytes());
            }
        }
    }
}

/// Encode subcommands in caller order.
pub(crate) fn encode_subcommands(cmd: &mut Builder, subcommands: &[BitFieldSubCommand]) {
    for sub in subcommands {
        sub.encode(cmd);
    }
}

/// Unit of the start/end range of BITCOUNT and BITPOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitmapIndexType {
    Byte,
    Bit,
}

impl BitmapIndexType {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BitmapIndexType::Byte => b"BYTE",
            BitmapIndexType::Bit => b"BIT",
        }
    }
}

/// `start [end [BYTE|BIT]]` for BITCOUNT and BITPOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitOffsetOptions {
    pub start: i64,
    pub end: Option<i64>,
    pub index_type: Option<BitmapIndexType>,
}

impl BitOffsetOptions {
    pub fn new(start: i64) -> Self {
        Self {
            start,
            end: None,
            index_type: None,
        }
    }

    pub fn with_end(start: i64, end: i64) -> Self {
        Self {
            start,
            end: Some(end),
            index_type: None,
        }
    }

    pub fn index_type(mut self, index_type: BitmapIndexType) -> Self {
        self.index_type = Some(index_type);
        self
    }

    pub(crate) fn encode(&self, cmd: &mut Builder) -> Result<()> {
        cmd.int(self.start);
        match (self.end, self.index_type) {
            (None, Some(_)) => {
                return Err(unsupported_combination(
                    "BYTE|BIT index type requires an end offset",
                ));
            }
            (None, None) => {}
            (Some(end), index_type) => {
                cmd.int(end);
                if let Some(index_type) = index_type {
                    cmd.keyword(index_type.as_bytes());
                }
            }
        }
        Ok(())
    }
}

/// BITOP operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitwiseOperation {
    And,
    Or,
    Xor,
    Not,
}

impl BitwiseOperation {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BitwiseOperation::And => b"AND",
            BitwiseOperation::Or => b"OR",
            BitwiseOperation::Xor => b"XOR",
            BitwiseOperation::Not => b"NOT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RequestType;

    #[test]
    fn test_encoding_widths() {
        assert_eq!(BitEncoding::signed(1).unwrap().encode(), "i1");
        assert_eq!(BitEncoding::signed(64).unwrap().encode(), "i64");
        assert_eq!(BitEncoding::unsigned(63).unwrap().encode(), "u63");
        assert_eq!(BitEncoding::unsigned(8).unwrap().width(), 8);
        assert!(!BitEncoding::unsigned(8).unwrap().is_signed());
    }

    #[test]
    fn test_encoding_width_bounds() {
        assert!(BitEncoding::signed(0).unwrap_err().is_invalid_argument());
        assert!(BitEncoding::signed(65).unwrap_err().is_invalid_argument());
        assert!(BitEncoding::unsigned(0).unwrap_err().is_invalid_argument());
        assert!(BitEncoding::unsigned(64).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_offsets() {
        assert_eq!(BitFieldOffset::Absolute(100).encode(), "100");
        assert_eq!(BitFieldOffset::Multiplier(3).encode(), "#3");
    }

    #[test]
    fn test_bit_index() {
        let u8_ = BitEncoding::unsigned(8).unwrap();
        assert_eq!(BitFieldOffset::Multiplier(3).bit_index(&u8_), Some(24));
        assert_eq!(BitFieldOffset::Absolute(3).bit_index(&u8_), Some(3));
        assert_eq!(BitFieldOffset::Multiplier(u64::MAX).bit_index(&u8_), None);
    }

    #[test]
    fn test_subcommands_fold_in_order() {
        let u8_ = BitEncoding::unsigned(8).unwrap();
        let i8_ = BitEncoding::signed(8).unwrap();
        let subs = [
            BitFieldSubCommand::set(u8_, BitFieldOffset::Absolute(0), 255),
            BitFieldSubCommand::overflow(BitOverflowControl::Fail),
            BitFieldSubCommand::incr_by(i8_, BitFieldOffset::Multiplier(1), -3),
        ];
        let mut cmd = Builder::new(RequestType::BitField);
        encode_subcommands(&mut cmd, &subs);
        assert_eq!(
            cmd.finish().args(),
            &["SET", "u8", "0", "255", "OVERFLOW", "FAIL", "INCRBY", "i8", "#1", "-3"]
        );
    }

    #[test]
    fn test_read_only_subcommands() {
        let u1 = BitEncoding::unsigned(1).unwrap();
        assert!(BitFieldSubCommand::get(u1, BitFieldOffset::Absolute(0)).is_read_only());
        assert!(!BitFieldSubCommand::overflow(BitOverflowControl::Wrap).is_read_only());
    }

    #[test]
    fn test_bit_offset_options() {
        let mut cmd = Builder::new(RequestType::BitCount);
        BitOffsetOptions::with_end(1, -1)
            .index_type(BitmapIndexType::Bit)
            .encode(&mut cmd)
            .unwrap();
        assert_eq!(cmd.finish().args(), &["1", "-1", "BIT"]);

        let mut cmd = Builder::new(RequestType::BitCount);
        BitOffsetOptions::new(2).encode(&mut cmd).unwrap();
        assert_eq!(cmd.finish().args(), &["2"]);
    }

    #[test]
    fn test_index_type_without_end() {
        let mut cmd = Builder::new(RequestType::BitPos);
        let err = BitOffsetOptions::new(0)
            .index_type(BitmapIndexType::Byte)
            .encode(&mut cmd)
            .unwrap_err();
        assert!(err.is_unsupported_combination());
    }
}
