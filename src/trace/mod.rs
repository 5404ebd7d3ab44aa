//! Access traces and the binary trace readers.
//!
//! Only the key of each record matters to the analyzer; timestamps, sizes
//! and TTLs are skipped while reading.

pub mod reader;

pub use reader::{read_trace, TraceFormat};

/// Object identifier
pub type Key = u64;

/// Immutable ordered sequence of accessed keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessTrace {
    keys: Vec<Key>,
}

impl AccessTrace {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<Vec<Key>> for AccessTrace {
    fn from(keys: Vec<Key>) -> Self {
        Self::new(keys)
    }
}

impl FromIterator<Key> for AccessTrace {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
