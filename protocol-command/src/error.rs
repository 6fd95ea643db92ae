//! Error types for command argument encoding.

/// Error type for command construction.
///
/// Both variants are raised before any token of the command is emitted, so a
/// partially built [`CommandSpec`](crate::CommandSpec) is never observable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A parameter violates a structural invariant (bad width, bad unit,
    /// conflicting options, non-finite number, empty mapping key).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The options are individually valid but the protocol has no way to
    /// express them together.
    #[error("unsupported combination: {0}")]
    UnsupportedCombination(String),
}

impl Error {
    /// Returns true if this is an [`Error::InvalidArgument`].
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Returns true if this is an [`Error::UnsupportedCombination`].
    #[inline]
    pub fn is_unsupported_combination(&self) -> bool {
        matches!(self, Error::UnsupportedCombination(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn invalid_argument(msg: impl Into<String>) -> Error {
    let msg = msg.into();
    tracing::debug!(reason = %msg, "rejected command argument");
    Error::InvalidArgument(msg)
}

pub(crate) fn unsupported_combination(msg: impl Into<String>) -> Error {
    let msg = msg.into();
    tracing::debug!(reason = %msg, "rejected option combination");
    Error::UnsupportedCombination(msg)
}
