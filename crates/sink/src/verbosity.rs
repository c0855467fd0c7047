//! Sink verbosity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// How chatty a sink is. Records at levels up to the verbosity are emitted.
///
/// Levels run from 0 to `i32::MAX`; small values (0 to 3) are the norm.
/// Anything above 1 switches records to developer mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Verbosity(u32);

impl Verbosity {
    /// The quietest verbosity.
    pub const ZERO: Self = Self(0);
    /// The largest supported verbosity.
    pub const MAX: Self = Self(i32::MAX.unsigned_abs());

    /// Wrap a raw level.
    #[must_use]
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// The raw level.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns true when records at `level` pass this verbosity.
    #[must_use]
    pub const fn allows(self, level: u32) -> bool {
        self.0 >= level
    }

    /// Returns true when records carry the call site.
    #[must_use]
    pub const fn is_developer(self) -> bool {
        self.0 > 1
    }
}

impl From<u32> for Verbosity {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

impl From<Verbosity> for u32 {
    fn from(verbosity: Verbosity) -> Self {
        verbosity.0
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for Verbosity {
    type Err = ParseIntError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.trim().parse().map(Self)
    }
}
