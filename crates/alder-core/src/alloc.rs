//! Optimized allocation and collection types for Alder.
//!
//! Re-exports hash collections backed by AHash. The control arena and
//! animation scheduler are hot paths, so every map keyed by a control
//! id goes through these aliases.

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Type alias for the standard HashMap with AHash for better performance.
pub type AHashMap<K, V> = ahash::AHashMap<K, V>;

/// Type alias for the standard HashSet with AHash for better performance.
pub type AHashSet<T> = ahash::AHashSet<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keyed_by_node_and_kind() {
        // The animation scheduler keys running transitions on a
        // (node id, state kind) pair.
        let mut running: HashMap<(u64, &str), f32> = HashMap::new();
        running.insert((1, "checked"), 0.0);
        running.insert((1, "disabled"), 0.5);
        running.insert((2, "checked"), 0.25);
        assert_eq!(running.get(&(1, "checked")), Some(&0.0));
        running.retain(|(id, _), _| *id != 1);
        assert_eq!(running.len(), 1);
    }

    #[test]
    fn set_deduplicates_registrations() {
        let mut focusable = HashSet::new();
        assert!(focusable.insert(7u64));
        assert!(!focusable.insert(7));
        focusable.remove(&7);
        assert!(focusable.is_empty());
    }
}
