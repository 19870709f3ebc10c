//! Suit identifiers and the name registry.
//!
//! Suits are not fixed up front: players invent names as they ask for them.
//! The registry hands out indices in first-seen order and stops at its
//! capacity (one suit per player).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Suit index, assigned in first-seen order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SuitId(pub u8);

impl SuitId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all suit IDs for `suit_count` suits.
    pub fn all(suit_count: usize) -> impl Iterator<Item = SuitId> {
        (0..suit_count as u8).map(SuitId)
    }
}

impl std::fmt::Display for SuitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Suit {}", self.0)
    }
}

/// Outcome of looking a name up without registering it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuitLookup {
    /// The name is already registered.
    Known(SuitId),
    /// The name is new and would receive this index.
    New(SuitId),
    /// The name is new and every index is taken.
    Full,
}

/// Bidirectional suit name <-> index map with a fixed capacity.
#[derive(Clone, Debug, Default)]
pub struct SuitRegistry {
    names: SmallVec<[String; 8]>,
    by_name: FxHashMap<String, SuitId>,
    capacity: usize,
}

impl SuitRegistry {
    /// Create an empty registry holding at most `capacity` suits.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity <= 255, "At most 255 suits supported");
        Self {
            names: SmallVec::new(),
            by_name: FxHashMap::default(),
            capacity,
        }
    }

    /// Rebuild a registry from names in index order.
    ///
    /// Returns `None` if there are more names than `capacity` or a name
    /// repeats after normalisation.
    pub fn from_names<I, S>(capacity: usize, names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new(capacity);
        for name in names {
            match registry.lookup(name.as_ref()) {
                SuitLookup::New(_) => {
                    registry.insert(name.as_ref());
                }
                SuitLookup::Known(_) | SuitLookup::Full => return None,
            }
        }
        Some(registry)
    }

    /// Canonical form of a suit name: trimmed and lowercased.
    #[must_use]
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Look a name up without registering it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> SuitLookup {
        let key = Self::normalize(name);
        if let Some(&id) = self.by_name.get(&key) {
            SuitLookup::Known(id)
        } else if self.is_full() {
            SuitLookup::Full
        } else {
            SuitLookup::New(SuitId(self.names.len() as u8))
        }
    }

    /// Resolve a name, registering it if new.
    ///
    /// Returns `None` (and registers nothing) when the name is new and the
    /// registry is full.
    pub fn insert(&mut self, name: &str) -> Option<SuitId> {
        match self.lookup(name) {
            SuitLookup::Known(id) => Some(id),
            SuitLookup::New(id) => {
                let key = Self::normalize(name);
                self.by_name.insert(key.clone(), id);
                self.names.push(key);
                Some(id)
            }
            SuitLookup::Full => None,
        }
    }

    /// Name registered for a suit index.
    #[must_use]
    pub fn name(&self, suit: SuitId) -> Option<&str> {
        self.names.get(suit.index()).map(String::as_str)
    }

    /// Registered names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.names.len() >= self.capacity
    }
}
