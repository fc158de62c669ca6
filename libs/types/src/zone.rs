//! Zone configuration for parsing and rendering column values.
//!
//! The original storage layer used a process-global base zone; here it is
//! an explicit value constructed once at startup and passed by reference.
//! `ZoneConfig` is `Copy` with no interior mutability, so concurrent
//! readers need no synchronization.

use chrono::{FixedOffset, Local};

/// The fixed UTC+8 offset (China Standard Time), for callers that store
/// or display wall-clock times in that zone.
#[must_use]
pub fn cst8() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid fixed offset")
}

/// Base zone applied to timestamp text that carries no offset of its own,
/// and used when rendering column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneConfig {
    base: FixedOffset,
}

impl ZoneConfig {
    /// Creates a config with an explicit base offset.
    #[must_use]
    pub const fn new(base: FixedOffset) -> Self {
        Self { base }
    }

    /// Creates a config using the host's current local offset.
    #[must_use]
    pub fn local() -> Self {
        Self {
            base: *Local::now().offset(),
        }
    }

    /// Returns the base offset.
    #[must_use]
    pub const fn base(&self) -> FixedOffset {
        self.base
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self::local()
    }
}
