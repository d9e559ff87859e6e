//! Expiring registries: entries are dropped after a fixed idle window.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    last_touched: Instant,
}

/// A keyed store whose entries expire after `ttl` without being touched.
///
/// Lookups refresh the idle clock; a periodic [`purge_expired`] drops
/// everything stale. The window is explicit per map, so each registry
/// states its own staleness policy instead of sharing implicit globals.
///
/// [`purge_expired`]: ExpiringMap::purge_expired
pub struct ExpiringMap<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> ExpiringMap<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                last_touched: Instant::now(),
            },
        );
    }

    /// Look up an entry, refreshing its idle clock.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let entry = self.entries.get_mut(key)?;
        entry.last_touched = Instant::now();
        Some(&entry.value)
    }

    /// Mutable lookup, refreshing the idle clock.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let entry = self.entries.get_mut(key)?;
        entry.last_touched = Instant::now();
        Some(&mut entry.value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Values without touching idle clocks (for listings).
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|e| &e.value)
    }

    /// Mutable values without touching idle clocks (for cross-entry sweeps).
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut().map(|e| &mut e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries idle for longer than the window. Returns how many were
    /// removed.
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_touched.elapsed() < ttl);
        before - self.entries.len()
    }
}
