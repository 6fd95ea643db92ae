//! Limits applied to assembled commands.

use crate::command::CommandSpec;
use crate::error::{Result, invalid_argument};

/// Default maximum number of arguments in a single command.
pub const DEFAULT_MAX_ARG_COUNT: usize = 1024 * 1024;

/// Default maximum size of a single argument in bytes.
///
/// Matches the server's default `proto-max-bulk-len` of 512 MiB.
pub const DEFAULT_MAX_ARG_LEN: usize = 512 * 1024 * 1024;

/// Default maximum key length in bytes.
pub const DEFAULT_MAX_KEY_LEN: usize = DEFAULT_MAX_ARG_LEN;

/// Size limits checked by [`CommandSpec::validate`].
///
/// Assembly itself never consults these limits; callers that want to refuse
/// oversized commands before handing them to a transport validate explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Maximum number of arguments, excluding the command name.
    pub max_arg_count: usize,
    /// Maximum size of any single argument.
    pub max_arg_len: usize,
    /// Maximum size of the first argument when the command is keyed.
    pub max_key_len: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeOptions {
    /// Create new encode options with default values.
    pub const fn new() -> Self {
        Self {
            max_arg_count: DEFAULT_MAX_ARG_COUNT,
            max_arg_len: DEFAULT_MAX_ARG_LEN,
            max_key_len: DEFAULT_MAX_KEY_LEN,
        }
    }

    /// Set the maximum argument count.
    pub const fn max_arg_count(mut self, count: usize) -> Self {
        self.max_arg_count = count;
        self
    }

    /// Set the maximum argument length.
    pub const fn max_arg_len(mut self, len: usize) -> Self {
        self.max_arg_len = len;
        self
    }

    /// Set the maximum key length.
    pub const fn max_key_len(mut self, len: usize) -> Self {
        self.max_key_len = len;
        self
    }
}

impl CommandSpec {
    /// Check this command against the given limits.
    pub fn validate(&self, options: &EncodeOptions) -> Result<()> {
        let args = self.args();
        if args.len() > options.max_arg_count {
            return Err(invalid_argument(format!(
                "{} arguments exceeds limit of {}",
                args.len(),
                options.max_arg_count
            )));
        }
        if self.request_type().is_keyed()
            && let Some(key) = args.first()
            && key.len() > options.max_key_len
        {
            return Err(invalid_argument(format!(
                "key of {} bytes exceeds {} byte limit",
                key.len(),
                options.max_key_len
            )));
        }
        if let Some(arg) = args.iter().find(|a| a.len() > options.max_arg_len) {
            return Err(invalid_argument(format!(
                "argument of {} bytes exceeds {} byte limit",
                arg.len(),
                options.max_arg_len
            )));
        }
        Ok(())
    }
}
