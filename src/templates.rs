//! Bounded template cache.
//!
//! # Design Decisions
//! - Fixed capacity with least-recently-used eviction; the cache can
//!   never grow without bound
//! - Entries are shared as `Arc<String>` so eviction never invalidates
//!   a template a request is still rendering

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fixed-capacity template cache with LRU eviction.
pub struct TemplateCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, Arc<String>>,
    /// Usage order, least recently used first.
    order: Vec<String>,
}

impl TemplateCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("template cache mutex poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a template, rendering and inserting it on a miss. Once the
    /// cache is full, the least recently used entry is evicted to make
    /// room.
    pub fn get_or_load(&self, name: &str) -> Arc<String> {
        let mut inner = self.inner.lock().expect("template cache mutex poisoned");

        if let Some(template) = inner.entries.get(name).cloned() {
            inner.order.retain(|entry| entry != name);
            inner.order.push(name.to_string());
            return template;
        }

        let template = Arc::new(render_template(name));

        if inner.entries.len() >= self.capacity {
            let evicted = inner.order.remove(0);
            inner.entries.remove(&evicted);
        }
        inner.entries.insert(name.to_string(), template.clone());
        inner.order.push(name.to_string());

        template
    }
}

fn render_template(name: &str) -> String {
    format!("Template content for {}", name).repeat(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_same_content() {
        let cache = TemplateCache::new(4);
        let first = cache.get_or_load("welcome");
        let second = cache.get_or_load("welcome");
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let cache = TemplateCache::new(3);
        for i in 0..10 {
            cache.get_or_load(&format!("template-{}", i));
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let cache = TemplateCache::new(2);
        cache.get_or_load("a");
        cache.get_or_load("b");
        // Touch "a" so "b" becomes the eviction candidate.
        cache.get_or_load("a");
        cache.get_or_load("c");

        let inner = cache.inner.lock().unwrap();
        assert!(inner.entries.contains_key("a"));
        assert!(!inner.entries.contains_key("b"));
        assert!(inner.entries.contains_key("c"));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = TemplateCache::new(0);
        cache.get_or_load("only");
        assert_eq!(cache.len(), 1);
    }
}
