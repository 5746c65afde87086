use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use crate::data::EventStore;

pub type DigestOutput = u64;

/// A cheap fingerprint of a value's contents. Two values with equal contents
/// have equal digests within one process, so a view can skip re-rendering
/// while the digest of what it shows stays the same.
pub trait Digestible {
    fn digest(&self) -> DigestOutput;
}

impl Digestible for EventStore {
    /// Covers the events and categories only; view state such as the selected
    /// date does not affect the digest.
    fn digest(&self) -> DigestOutput {
        let mut hasher = DefaultHasher::new();
        self.events().hash(&mut hasher);
        self.categories().hash(&mut hasher);
        hasher.finish()
    }
}
