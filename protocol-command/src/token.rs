//! Wire tokens.
//!
//! A token is one element of the flat argument sequence. Binary inputs are
//! copied verbatim; numbers are rendered to plain ASCII text, never
//! locale-formatted.

use bytes::Bytes;

use crate::error::{Result, invalid_argument};

/// One element of a command's argument sequence.
pub type Token = Bytes;

/// Copy a binary-safe input into a token.
#[inline]
pub fn bytes(data: impl AsRef<[u8]>) -> Token {
    Bytes::copy_from_slice(data.as_ref())
}

/// Render an integer as a token.
#[inline]
pub fn int<I: itoa::Integer>(n: I) -> Token {
    let mut buf = itoa::Buffer::new();
    Bytes::copy_from_slice(buf.format(n).as_bytes())
}

/// Render a float as a token.
///
/// Integral values below 2^53 render without a fractional part (`3`, not
/// `3.0`), infinities render as `+inf` / `-inf`, everything else goes
/// through `ryu`. NaN must be rejected by the caller; see [`finite`].
pub fn float(n: f64) -> Token {
    if n.is_infinite() {
        return Bytes::from_static(if n > 0.0 { b"+inf" } else { b"-inf" });
    }
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        return int(n as i64);
    }
    let mut buf = ryu::Buffer::new();
    Bytes::copy_from_slice(buf.format(n).as_bytes())
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Reject NaN and infinite values for a named parameter.
pub(crate) fn finite(name: &str, n: f64) -> Result<f64> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(invalid_argument(format!("{name} must be a finite number, got {n}")))
    }
}

/// Reject NaN for a named parameter; infinities are allowed.
pub(crate) fn not_nan(name: &str, n: f64) -> Result<f64> {
    if n.is_nan() {
        Err(invalid_argument(format!("{name} must not be NaN")))
    } else {
        Ok(n)
    }
}
