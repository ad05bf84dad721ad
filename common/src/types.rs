//! Core scalar types for trade records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol identifier for a tradable instrument
///
/// Ordering is byte-lexicographic over the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a new Symbol
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the symbol as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the symbol is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Px(pub u32);

impl Px {
    /// Zero price
    pub const ZERO: Self = Self(0);

    /// Create a new price
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the price as u32
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Notional value of `qty` units at this price, widened to u64
    #[must_use]
    pub const fn notional(self, qty: Qty) -> u64 {
        self.0 as u64 * qty.0 as u64
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer traded quantity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qty(pub u32);

impl Qty {
    /// Zero quantity
    pub const ZERO: Self = Self(0);

    /// Create a new quantity
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the quantity as u32
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Get the quantity widened to u64
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp in microsecond ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ts(pub u64);

impl Ts {
    /// Create timestamp from microseconds
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Get timestamp as microseconds
    #[must_use]
    pub const fn as_micros(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}
