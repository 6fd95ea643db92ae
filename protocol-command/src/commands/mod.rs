//! Command constructors.
//!
//! Each `create_*` function assembles one [`CommandSpec`](crate::CommandSpec):
//! positional arguments first, then optional arguments in the order the
//! server documents them. Constructors that can reject their input return
//! [`Result`](crate::Result); the rest are infallible.

mod bitmap;
mod geo;
mod hash;
mod key;
mod list;
mod scripting;
mod server;
mod set;
mod sorted_set;
mod stream;
mod string;

pub use bitmap::*;
pub use geo::*;
pub use hash::*;
pub use key::*;
pub use list::*;
pub use scripting::*;
pub use server::*;
pub use set::*;
pub use sorted_set::*;
pub use stream::*;
pub use string::*;

use crate::error::{Result, invalid_argument};
use crate::token;

/// Validate a blocking timeout in seconds. Zero blocks indefinitely.
fn timeout(seconds: f64) -> Result<f64> {
    let seconds = token::finite("timeout", seconds)?;
    if seconds < 0.0 {
        return Err(invalid_argument(format!(
            "timeout must not be negative, got {seconds}"
        )));
    }
    Ok(seconds)
}

/// Reject an empty key list for commands that need at least one key.
fn non_empty<T>(what: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(invalid_argument(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Collect binary-safe inputs into owned tokens.
fn collect<I>(items: I) -> Vec<bytes::Bytes>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    items.into_iter().map(token::bytes).collect()
}
