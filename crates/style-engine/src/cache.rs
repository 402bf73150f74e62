//! LRU cache of resolved styles, keyed by attribute values.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::feature::AttributeValue;
use crate::style::Style;

/// Key component for an attribute that is unset or absent on the feature.
pub const ABSENT_KEY: &str = "|||";

/// Separator between key components.
pub const KEY_SEPARATOR: &str = ":::";

/// Build a cache key from the color, text and radius attribute values.
///
/// Present values are tagged with their type (`n` number, `s` text) and
/// length-prefixed, so `1` and `"1"` get distinct keys and no value,
/// including the literal sentinel or separator text, collides with an
/// absent one.
pub fn style_key(values: &[Option<&AttributeValue>]) -> String {
    values
        .iter()
        .map(|value| match value {
            Some(value) => {
                let tag = match value {
                    AttributeValue::Number(_) => 'n',
                    AttributeValue::Text(_) => 's',
                };
                let text = value.to_string();
                format!("{}{}:{}", tag, text.len(), text)
            }
            None => ABSENT_KEY.to_string(),
        })
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate (0.0 - 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded cache of shared styles.
pub struct StyleCache {
    cache: LruCache<String, Arc<Style>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl StyleCache {
    /// Create a cache holding at most `capacity` styles (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Return the cached style for `key`, building and inserting it on a
    /// miss.
    pub fn get_or_insert_with(
        &mut self,
        key: String,
        build: impl FnOnce() -> Style,
    ) -> Arc<Style> {
        if let Some(style) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(style);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let style = Arc::new(build());
        if self.cache.push(key, Arc::clone(&style)).is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        style
    }

    /// Check if a key exists in the cache without updating LRU order.
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Clear all entries from the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sentinels() {
        let fox = AttributeValue::from("fox");
        assert_eq!(style_key(&[Some(&fox), None]), "s3:fox:::|||");
        assert_eq!(style_key(&[None, None, None]), "|||:::|||:::|||");
    }

    #[test]
    fn test_literal_sentinel_is_not_absent() {
        let literal = AttributeValue::from(ABSENT_KEY);
        assert_ne!(style_key(&[Some(&literal)]), style_key(&[None]));

        let tricky = AttributeValue::from("a:::b");
        let a = AttributeValue::from("a");
        let b = AttributeValue::from("b");
        assert_ne!(style_key(&[Some(&tricky)]), style_key(&[Some(&a), Some(&b)]));
    }

    #[test]
    fn test_number_and_text_keys_differ() {
        let number = AttributeValue::Number(1.0);
        let text = AttributeValue::from("1");
        assert_eq!(style_key(&[Some(&number)]), "n1:1");
        assert_eq!(style_key(&[Some(&text)]), "s1:1");
    }

    #[test]
    fn test_cache_hit_returns_same_style() {
        let mut cache = StyleCache::new(8);
        let first = cache.get_or_insert_with("k".to_string(), Style::default);
        let second = cache.get_or_insert_with("k".to_string(), || panic!("rebuilt on hit"));

        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cache_lru_eviction() {
        let mut cache = StyleCache::new(2);
        for key in ["a", "b", "c"] {
            cache.get_or_insert_with(key.to_string(), Style::default);
        }

        assert!(!cache.contains("a"));
        assert!(cache.contains("c"));
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache = StyleCache::new(0);
        cache.get_or_insert_with("a".to_string(), Style::default);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = StyleCache::new(4);
        cache.get_or_insert_with("a".to_string(), Style::default);
        cache.clear();
        assert!(cache.is_empty());
    }
}
