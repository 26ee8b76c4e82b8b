//! The keyed store itself.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// An in-memory map from string keys to values, safe for concurrent use.
///
/// Each value lives behind its own `Mutex`, while the map structure is
/// guarded by a `RwLock`. Lookups and insertions touch the map lock only
/// briefly; [`KeyedStore::with_mut`] holds just the entry's mutex for the
/// duration of the closure, which is the locking granularity the engine
/// needs for per-instance critical sections.
pub struct KeyedStore<V> {
    entries: RwLock<HashMap<String, Arc<Mutex<V>>>>,
}

impl<V> Default for KeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedStore<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Whether `key` is currently present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `value` under `key` only if the key is vacant.
    ///
    /// The vacancy check and the insert happen under one write lock, so two
    /// racing `try_insert` calls for the same key resolve to exactly one
    /// winner. The loser gets its value back.
    pub fn try_insert(&self, key: &str, value: V) -> Result<(), V> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.contains_key(key) {
            return Err(value);
        }
        entries.insert(key.to_owned(), Arc::new(Mutex::new(value)));
        Ok(())
    }

    /// Run `f` with exclusive access to the entry for `key`.
    ///
    /// Returns `None` if the key is absent. The map lock is released before
    /// the entry mutex is taken, so long-running closures on one key do not
    /// block access to other keys.
    pub fn with_mut<T>(&self, key: &str, f: impl FnOnce(&mut V) -> T) -> Option<T> {
        let entry = {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            entries.get(key)?.clone()
        };
        let mut value = entry.lock().unwrap_or_else(|e| e.into_inner());
        Some(f(&mut value))
    }
}

impl<V: Clone> KeyedStore<V> {
    /// Snapshot of the value under `key`, if present.
    pub fn get(&self, key: &str) -> Option<V> {
        self.with_mut(key, |v| v.clone())
    }

    /// Snapshot of every value. Order is unspecified but stable within the
    /// one call (the map is read-locked while cloning).
    pub fn list(&self) -> Vec<V> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .values()
            .map(|e| e.lock().unwrap_or_else(|p| p.into_inner()).clone())
            .collect()
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn insert_then_get_returns_value() {
        let store = KeyedStore::new();
        store.try_insert("a", 1).expect("vacant key");
        assert_eq!(store.get("a"), Some(1));
        assert_eq!(store.get("b"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn second_insert_of_same_key_is_rejected() {
        let store = KeyedStore::new();
        store.try_insert("a", 1).expect("vacant key");
        assert_eq!(store.try_insert("a", 2), Err(2));
        // First value is retained.
        assert_eq!(store.get("a"), Some(1));
    }

    #[test]
    fn with_mut_on_missing_key_returns_none() {
        let store: KeyedStore<i32> = KeyedStore::new();
        assert_eq!(store.with_mut("ghost", |v| *v += 1), None);
    }

    #[test]
    fn with_mut_mutates_in_place() {
        let store = KeyedStore::new();
        store.try_insert("counter", 0).expect("vacant key");
        for _ in 0..3 {
            store.with_mut("counter", |v| *v += 1);
        }
        assert_eq!(store.get("counter"), Some(3));
    }

    #[test]
    fn concurrent_try_insert_has_exactly_one_winner() {
        let store = Arc::new(KeyedStore::new());
        let wins = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let wins = Arc::clone(&wins);
                thread::spawn(move || {
                    if store.try_insert("contested", i).is_ok() {
                        wins.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(wins.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_with_mut_increments_are_not_lost() {
        let store = Arc::new(KeyedStore::new());
        store.try_insert("counter", 0u64).expect("vacant key");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        store.with_mut("counter", |v| *v += 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.get("counter"), Some(4000));
    }
}
