//! Command-argument encoding for Redis/Valkey clients.
//!
//! This crate turns option-laden, typed calls into the exact ordered token
//! sequence the server expects, and parses the few textual replies that are
//! not native protocol values. It performs no I/O and no RESP framing: the
//! output is a [`CommandSpec`], a request-type tag plus argument tokens,
//! which a transport sends verbatim.
//!
//! - **Tokens**: binary-safe byte strings; numbers rendered as ASCII text
//! - **Normalizer**: ordered pairs or mappings reduced to one canonical form
//! - **Encoders**: range boundaries, BITFIELD subcommands, geo shapes, scan options
//! - **Assembler**: one `create_*` function per command
//! - **Reply parser**: the `INFO` text blob
//!
//! # Example
//!
//! ```
//! use command_proto::{SetExpiry, SetOptions, TimeUnit, create_set};
//!
//! let options = SetOptions::new()
//!     .only_if_does_not_exist()
//!     .expiry(SetExpiry::Expire { unit: TimeUnit::Seconds, count: 60 });
//! let cmd = create_set("session:1", "token", &options).unwrap();
//! assert_eq!(cmd.args(), &["session:1", "token", "NX", "EX", "60"]);
//! ```
//!
//! # Example - BITFIELD
//!
//! ```
//! use command_proto::{
//!     BitEncoding, BitFieldOffset, BitFieldSubCommand, BitOverflowControl, create_bitfield,
//! };
//!
//! let u8_ = BitEncoding::unsigned(8).unwrap();
//! let cmd = create_bitfield("counters", &[
//!     BitFieldSubCommand::overflow(BitOverflowControl::Sat),
//!     BitFieldSubCommand::incr_by(u8_, BitFieldOffset::Multiplier(2), 10),
//! ]);
//! assert_eq!(cmd.args(), &["counters", "OVERFLOW", "SAT", "INCRBY", "u8", "#2", "10"]);
//! ```

pub mod bitfield;
pub mod boundary;
mod command;
pub mod commands;
mod config;
mod error;
pub mod geo;
mod info;
mod normalize;
pub mod scan;
pub mod token;

pub use bitfield::{
    BitEncoding, BitFieldOffset, BitFieldSubCommand, BitOffsetOptions, BitOverflowControl,
    BitmapIndexType, BitwiseOperation,
};
pub use boundary::{
    Boundary, InfBoundary, LexBoundary, Limit, RangeQuery, ScoreBoundary, StreamBoundary,
    parse_score_boundary,
};
pub use command::{CommandSpec, RequestType};
pub use commands::*;
pub use config::{DEFAULT_MAX_ARG_COUNT, DEFAULT_MAX_ARG_LEN, DEFAULT_MAX_KEY_LEN, EncodeOptions};
pub use error::{Error, Result};
pub use geo::{
    ConditionalChange, GeoAddOptions, GeoOrigin, GeoSearchResultOptions,
    GeoSearchStoreResultOptions, GeoShape, GeoUnit, GeospatialData, SortOrder,
};
pub use info::parse_info_response;
pub use normalize::{Entries, EntryValue};
pub use scan::{INITIAL_CURSOR, ObjectType, ScanOptions};
pub use token::Token;
