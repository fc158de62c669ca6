//! # relay-types
//!
//! Shared wire types for the relay platform: a microsecond-precision
//! [`Timestamp`] and a 64-bit record [`Id`], built to cross three
//! boundaries without losing information:
//!
//! - JSON (custom wire shapes: timestamps as RFC 3339 strings or `null`,
//!   IDs as decimal strings)
//! - the generic SQL driver value interface ([`ColumnValue`])
//! - a fixed, versioned binary encoding for caches and RPC
//!
//! ## Design Principles
//!
//! - Values are immutable and `Copy`; safe to share across threads
//! - Every representation a storage engine can produce normalizes to one
//!   canonical in-memory value, including the "zero date" sentinels
//! - No global state: the base zone is an explicit [`ZoneConfig`] passed
//!   by the caller, defaulting to the host's local offset
//! - Parse failures surface the underlying error verbatim
//!
//! ## Timestamp Layouts
//!
//! Column values use `YYYY-MM-DD HH:MM:SS.nnnnnnnnn` (nine fractional
//! digits, microsecond precision) in the configured base zone. Strings
//! carrying a `T` separator are parsed as RFC 3339 with an optional
//! fraction and `Z`/`±HH:MM` offset. JSON and plain text use RFC 3339;
//! the zero value is JSON `null`.

mod column;
mod error;
mod id;
mod timestamp;
mod zone;

pub use column::ColumnValue;
pub use error::{InvalidParameter, TimestampError};
pub use id::Id;
pub use timestamp::Timestamp;
pub use zone::{cst8, ZoneConfig};
