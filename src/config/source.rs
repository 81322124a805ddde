//! Flat key/value configuration sources.

use std::collections::HashMap;
use std::sync::RwLock;

/// A live, flat key/value configuration source.
///
/// Implementations return raw values; the presence and non-emptiness
/// policy belongs to the validator. The readiness probe queries this
/// trait directly so it observes drift in the live source, not the
/// snapshot cached at startup.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Source backed by the process environment.
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mutable in-memory source.
///
/// Used by tests to model startup gaps and post-startup configuration
/// drift without touching the process environment.
#[derive(Default)]
pub struct MapSource {
    values: RwLock<HashMap<String, String>>,
}

impl MapSource {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write().expect("map source lock poisoned");
        values.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        let mut values = self.values.write().expect("map source lock poisoned");
        values.remove(key);
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().expect("map source lock poisoned");
        values.get(key).cloned()
    }
}
