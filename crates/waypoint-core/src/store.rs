//! Readers-writer protected hash map shared across threads.
//!
//! Lookups vastly outnumber writes once an app has finished registering its
//! routes, so readers share the lock and only writers take it exclusively.
//! Values are handed out as clones; store `Arc`s when values are expensive.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Map safe for concurrent `get`/`insert` from any number of threads.
///
/// A poisoned lock is recovered rather than propagated: every operation
/// leaves the map in a consistent state before it can panic, and entries do
/// not depend on each other.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for ConcurrentMap<K, V> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clone of the value stored under `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.read().get(key).cloned()
    }

    /// Insert or replace the value for `key`. Returns the replaced value, or
    /// `None` if the key was new.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.write().insert(key, value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().contains_key(key)
    }

    /// Drop every entry.
    pub fn remove_all(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// An arbitrary entry; no ordering is implied.
    pub fn first(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.read()
            .iter()
            .next()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Snapshot of the current keys.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn insert_returns_previous_value() {
        let map = ConcurrentMap::new();
        assert_eq!(map.insert("home".to_string(), 1), None);
        assert_eq!(map.insert("home".to_string(), 2), Some(1));
        assert_eq!(map.get("home"), Some(2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_all_empties_the_map() {
        let map = ConcurrentMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        assert!(!map.is_empty());
        map.remove_all();
        assert!(map.is_empty());
        assert_eq!(map.first(), None);
        assert_eq!(map.get("a"), None);
    }

    #[test]
    fn first_and_keys_reflect_contents() {
        let map = ConcurrentMap::new();
        map.insert("only".to_string(), 7);
        assert_eq!(map.first(), Some(("only".to_string(), 7)));
        assert_eq!(map.keys(), vec!["only".to_string()]);
        assert!(map.contains_key("only"));
        assert!(!map.contains_key("other"));
    }

    #[test]
    fn concurrent_writers_on_distinct_keys() {
        let map = Arc::new(ConcurrentMap::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let map = Arc::clone(&map);
                thread::spawn(move || {
                    for i in 0..100 {
                        map.insert(format!("{t}-{i}"), t * 1000 + i);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(map.len(), 800);
        assert_eq!(map.get("3-42"), Some(3042));
    }

    #[test]
    fn survives_poisoned_lock() {
        let map = Arc::new(ConcurrentMap::new());
        map.insert("k".to_string(), 1);
        let poisoner = Arc::clone(&map);
        let _ = thread::spawn(move || {
            let _guard = poisoner.write();
            panic!("poison the lock");
        })
        .join();
        assert_eq!(map.get("k"), Some(1));
        map.insert("k".to_string(), 2);
        assert_eq!(map.get("k"), Some(2));
    }
}
