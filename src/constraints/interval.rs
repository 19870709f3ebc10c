//! Closed integer interval of possible card counts.

use serde::{Deserialize, Serialize};

/// `[min, max]` range of cards a player may hold in one suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub min: u8,
    pub max: u8,
}

impl Interval {
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Interval pinned to a single value.
    #[must_use]
    pub const fn exactly(n: u8) -> Self {
        Self { min: n, max: n }
    }

    #[must_use]
    pub fn contains(&self, n: u8) -> bool {
        self.min <= n && n <= self.max
    }

    /// True when the count is fully determined.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// True if `other` is no wider than `self` on either side.
    #[must_use]
    pub fn encloses(&self, other: &Interval) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_exact() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}
