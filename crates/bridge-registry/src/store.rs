//! Identifier-keyed object mapping
//!
//! [`ObjectRegistry`] is the one mapping type behind every namespace of the
//! session registry. It is generic over the stored value so that calls,
//! legacy calls, conversations, messages and view options share the same
//! logic while keeping separate key spaces.
//!
//! Each operation is atomic for its key: the backing [`DashMap`] serializes
//! writers per shard, so concurrent inserts, lookups and removals from the
//! command thread and engine callbacks never observe a torn entry.

use dashmap::DashMap;
use tracing::{debug, warn};

/// Concurrent mapping from identifier to a stored value
///
/// Values are handed out by clone. For the native object namespaces the value
/// is an `Arc`, so a lookup shares the object without moving it out of the
/// registry.
#[derive(Debug)]
pub struct ObjectRegistry<V> {
    /// Namespace name used in log fields
    namespace: &'static str,
    /// Size at which a growth warning fires (0 disables it)
    growth_warning_threshold: usize,
    entries: DashMap<String, V>,
}

impl<V: Clone> ObjectRegistry<V> {
    /// Create an empty mapping
    pub fn new(namespace: &'static str, growth_warning_threshold: usize) -> Self {
        Self {
            namespace,
            growth_warning_threshold,
            entries: DashMap::new(),
        }
    }

    /// Namespace this mapping was created for
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Store `value` under `id`, replacing any previous entry.
    ///
    /// Re-registration after a reconnect or a retried setup is expected, so an
    /// existing entry is overwritten silently and handed back to the caller.
    pub fn insert(&self, id: impl Into<String>, value: V) -> Option<V> {
        let id = id.into();
        let previous = self.entries.insert(id.clone(), value);

        if previous.is_some() {
            debug!(namespace = self.namespace, id = %id, "Replaced registry entry");
        } else {
            debug!(namespace = self.namespace, id = %id, "Registered entry");
            self.check_growth();
        }

        previous
    }

    /// Look up the value stored under `id`
    pub fn get(&self, id: &str) -> Option<V> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Remove the entry for `id`; unknown identifiers are ignored
    pub fn remove(&self, id: &str) -> Option<V> {
        let removed = self.entries.remove(id).map(|(_, value)| value);
        if removed.is_some() {
            debug!(namespace = self.namespace, id = %id, "Removed registry entry");
        }
        removed
    }

    /// Check whether `id` is currently registered
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Snapshot of the identifiers currently registered
    pub fn list(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Snapshot of every entry
    pub fn snapshot(&self) -> Vec<(String, V)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Remove and return every entry present when the call started.
    ///
    /// Entries inserted concurrently after the key snapshot survive; entries
    /// removed concurrently are skipped.
    pub fn take_all(&self) -> Vec<(String, V)> {
        let taken: Vec<(String, V)> = self
            .list()
            .into_iter()
            .filter_map(|id| self.entries.remove(&id))
            .collect();

        if !taken.is_empty() {
            debug!(namespace = self.namespace, count = taken.len(), "Cleared registry entries");
        }
        taken
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Nothing is ever evicted; this only makes missed removals visible.
    // `len` is read after the insert, so racing inserts may both hit or both
    // skip a multiple. Good enough for a diagnostic.
    fn check_growth(&self) {
        let threshold = self.growth_warning_threshold;
        if threshold == 0 {
            return;
        }

        let len = self.entries.len();
        if len > 0 && len % threshold == 0 {
            warn!(
                namespace = self.namespace,
                entries = len,
                "Registry mapping keeps growing; check that terminal events remove their entries"
            );
        }
    }
}
