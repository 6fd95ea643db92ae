//! Range endpoints and sorted-set range queries.
//!
//! The server expresses inclusivity only through a one-byte prefix on the
//! endpoint, and each range family uses a different convention:
//!
//! | family    | +∞     | −∞     | inclusive | exclusive |
//! |-----------|--------|--------|-----------|-----------|
//! | score     | `+inf` | `-inf` | `1.5`     | `(1.5`    |
//! | lex       | `+`    | `-`    | `[abc`    | `(abc`    |
//! | stream id | `+`    | `-`    | `0-1`     | `(0-1`    |

use bytes::{BufMut, Bytes, BytesMut};

use crate::command::Builder;
use crate::error::{Result, invalid_argument};
use crate::token;

/// Unbounded range endpoint markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfBoundary {
    PositiveInfinity,
    NegativeInfinity,
}

impl InfBoundary {
    /// Returns the marker as sent for lex and stream-id ranges.
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            InfBoundary::PositiveInfinity => b"+",
            InfBoundary::NegativeInfinity => b"-",
        }
    }
}

/// One endpoint of a range query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary<T> {
    PositiveInfinity,
    NegativeInfinity,
    Finite { value: T, inclusive: bool },
}

impl<T> Boundary<T> {
    /// An inclusive finite endpoint.
    pub fn inclusive(value: impl Into<T>) -> Self {
        Boundary::Finite {
            value: value.into(),
            inclusive: true,
        }
    }

    /// An exclusive finite endpoint.
    pub fn exclusive(value: impl Into<T>) -> Self {
        Boundary::Finite {
            value: value.into(),
            inclusive: false,
        }
    }
}

impl<T> From<InfBoundary> for Boundary<T> {
    fn from(inf: InfBoundary) -> Self {
        match inf {
            InfBoundary::PositiveInfinity => Boundary::PositiveInfinity,
            InfBoundary::NegativeInfinity => Boundary::NegativeInfinity,
        }
    }
}

/// A score range endpoint.
pub type ScoreBoundary = Boundary<f64>;

/// A lexicographic range endpoint.
pub type LexBoundary = Boundary<Bytes>;

/// A stream id range endpoint.
pub type StreamBoundary = Boundary<Bytes>;

impl Boundary<f64> {
    /// A finite score endpoint; NaN and infinite values are rejected.
    ///
    /// Use [`Boundary::PositiveInfinity`] / [`Boundary::NegativeInfinity`]
    /// for unbounded ends.
    pub fn score(value: f64, inclusive: bool) -> Result<Self> {
        let value = token::finite("score boundary", value)?;
        Ok(Boundary::Finite { value, inclusive })
    }

    /// Encode as a score endpoint.
    pub fn encode_score(&self) -> Result<Bytes> {
        match self {
            Boundary::PositiveInfinity => Ok(Bytes::from_static(b"+inf")),
            Boundary::NegativeInfinity => Ok(Bytes::from_static(b"-inf")),
            Boundary::Finite { value, inclusive } => {
                let value = token::finite("score boundary", *value)?;
                let number = token::float(value);
                if *inclusive {
                    Ok(number)
                } else {
                    Ok(prefixed(b'(', &number))
                }
            }
        }
    }
}

impl<T: AsRef<[u8]>> Boundary<T> {
    /// Encode as a lexicographic endpoint: finite values always carry a
    /// `[` or `(` prefix; only the infinities are sent bare.
    pub fn encode_lex(&self) -> Bytes {
        match self {
            Boundary::PositiveInfinity => Bytes::from_static(b"+"),
            Boundary::NegativeInfinity => Bytes::from_static(b"-"),
            Boundary::Finite { value, inclusive } => {
                prefixed(if *inclusive { b'[' } else { b'(' }, value.as_ref())
            }
        }
    }

    /// Encode as a stream id endpoint.
    pub fn encode_stream_id(&self) -> Bytes {
        match self {
            Boundary::PositiveInfinity => Bytes::from_static(b"+"),
            Boundary::NegativeInfinity => Bytes::from_static(b"-"),
            Boundary::Finite {
                value,
                inclusive: true,
            } => token::bytes(value),
            Boundary::Finite {
                value,
                inclusive: false,
            } => prefixed(b'(', value.as_ref()),
        }
    }
}

fn prefixed(prefix: u8, value: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(1 + value.len());
    buf.put_u8(prefix);
    buf.put_slice(value);
    buf.freeze()
}

/// Parse an encoded score endpoint back into a [`ScoreBoundary`].
pub fn parse_score_boundary(token: &[u8]) -> Result<ScoreBoundary> {
    match token {
        b"+inf" | b"inf" | b"+" => return Ok(Boundary::PositiveInfinity),
        b"-inf" | b"-" => return Ok(Boundary::NegativeInfinity),
        _ => {}
    }
    let (digits, inclusive) = match token.split_first() {
        Some((b'(', rest)) => (rest, false),
        _ => (token, true),
    };
    let value = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| {
            invalid_argument(format!(
                "not a score boundary: {:?}",
                String::from_utf8_lossy(token)
            ))
        })?;
    Boundary::score(value, inclusive)
}

/// `LIMIT offset count` for score and lex range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: i64,
    /// A negative count returns every element from `offset`.
    pub count: i64,
}

impl Limit {
    pub fn new(offset: i64, count: i64) -> Self {
        Self { offset, count }
    }
}

/// A sorted-set range query.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeQuery {
    /// Zero-based ranks; negative values count from the end.
    ByIndex { start: i64, end: i64 },
    ByScore {
        start: ScoreBoundary,
        end: ScoreBoundary,
        limit: Option<Limit>,
    },
    ByLex {
        start: LexBoundary,
        end: LexBoundary,
        limit: Option<Limit>,
    },
}

impl RangeQuery {
    /// Append `start end [BYSCORE|BYLEX] [REV] [LIMIT offset count]`.
    ///
    /// With `reverse`, the caller supplies the higher endpoint as `start`.
    pub(crate) fn encode(&self, cmd: &mut Builder, reverse: bool) -> Result<()> {
        let limit = match self {
            RangeQuery::ByIndex { start, end } => {
                cmd.int(*start).int(*end);
                None
            }
            RangeQuery::ByScore { start, end, limit } => {
                let (start, end) = (start.encode_score()?, end.encode_score()?);
                cmd.token(start).token(end).keyword(b"BYSCORE");
                limit.as_ref()
            }
            RangeQuery::ByLex { start, end, limit } => {
                cmd.token(start.encode_lex())
                    .token(end.encode_lex())
                    .keyword(b"BYLEX");
                limit.as_ref()
            }
        };
        cmd.flag(reverse, b"REV");
        if let Some(limit) = limit {
            cmd.keyword(b"LIMIT").int(limit.offset).int(limit.count);
        }
        Ok(())
    }
}
