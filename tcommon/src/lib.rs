//! Shared primitives for the tiddlywinks workspace crates.
//!
//! ```rust
//! use tcommon::OrderedRegistry;
//!
//! let mut registry = OrderedRegistry::new();
//! registry.insert("beta".to_string(), 2_u32);
//! registry.insert("alpha".to_string(), 1_u32);
//!
//! let keys: Vec<&String> = registry.keys().collect();
//! assert_eq!(keys, [&"beta".to_string(), &"alpha".to_string()]);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use tcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod registry {
    //! Insertion-ordered registry map used by name-keyed runtime collections.
    //!
    //! Unlike a plain `HashMap`, iteration yields entries in the order they
    //! were inserted, which callers rely on for stable serialization.
    //!
    //! ```rust
    //! use tcommon::OrderedRegistry;
    //!
    //! let mut registry = OrderedRegistry::new();
    //! registry.insert("alpha".to_string(), 1_u32);
    //!
    //! assert_eq!(registry.get("alpha"), Some(&1));
    //! assert!(registry.contains_key("alpha"));
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct OrderedRegistry<K, V> {
        order: Vec<K>,
        items: HashMap<K, V>,
    }

    impl<K, V> Default for OrderedRegistry<K, V>
    where
        K: Eq + Hash + Clone,
    {
        fn default() -> Self {
            Self {
                order: Vec::new(),
                items: HashMap::new(),
            }
        }
    }

    impl<K, V> OrderedRegistry<K, V>
    where
        K: Eq + Hash + Clone,
    {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            let previous = self.items.insert(key.clone(), value);
            if previous.is_none() {
                self.order.push(key);
            }
            previous
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.get(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.order.iter()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.order.iter().filter_map(|key| self.items.get(key))
        }

        pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
            self.order
                .iter()
                .filter_map(|key| self.items.get(key).map(|value| (key, value)))
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub use future::BoxFuture;
pub use registry::OrderedRegistry;

#[cfg(test)]
mod tests {
    use super::OrderedRegistry;

    #[test]
    fn ordered_registry_basic_lifecycle() {
        let mut registry = OrderedRegistry::new();
        assert!(registry.is_empty());

        registry.insert("alpha".to_string(), 1_u32);
        assert_eq!(registry.get("alpha"), Some(&1));
        assert!(registry.contains_key("alpha"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut registry = OrderedRegistry::new();
        registry.insert("zed".to_string(), 26_u32);
        registry.insert("alpha".to_string(), 1);
        registry.insert("mid".to_string(), 13);

        let keys: Vec<&str> = registry.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zed", "alpha", "mid"]);

        let values: Vec<u32> = registry.values().copied().collect();
        assert_eq!(values, [26, 1, 13]);
    }

    #[test]
    fn reinserting_a_key_replaces_without_reordering() {
        let mut registry = OrderedRegistry::new();
        registry.insert("first".to_string(), 1_u32);
        registry.insert("second".to_string(), 2);

        let previous = registry.insert("first".to_string(), 10);
        assert_eq!(previous, Some(1));
        assert_eq!(registry.len(), 2);

        let pairs: Vec<(&str, u32)> = registry
            .iter()
            .map(|(key, value)| (key.as_str(), *value))
            .collect();
        assert_eq!(pairs, [("first", 10), ("second", 2)]);
    }
}
