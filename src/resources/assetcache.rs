//! Memoizing asset cache.
//!
//! [`AssetCache`] owns every asset it has successfully loaded, keyed by the
//! path (or any string key) used to request it. The first request for a key
//! runs the loader; later requests return the stored asset. Failed loads are
//! not remembered, so the next request for the same key tries again.
//!
//! Loaders are pluggable through [`AssetLoader`], which is implemented for
//! any `FnMut(&str) -> Option<A>`. Asset kinds whose loading needs borrowed
//! context (for example the raylib handle) use [`AssetCache::get_with`]
//! instead of a stored loader.
//!
//! Entries are never evicted while the cache is alive. Assets are boxed so a
//! hit always hands back the same instance, even after the map grows.

use log::{info, warn};
use raylib::prelude::{Font, Texture2D};
use rustc_hash::FxHashMap;

/// Loads one asset kind from a key.
///
/// Every failure reason (missing file, malformed content, ...) is folded into
/// `None`.
pub trait AssetLoader<A> {
    fn load(&mut self, key: &str) -> Option<A>;
}

impl<A, F> AssetLoader<A> for F
where
    F: FnMut(&str) -> Option<A>,
{
    fn load(&mut self, key: &str) -> Option<A> {
        self(key)
    }
}

/// Loader placeholder for caches that are only filled through
/// [`AssetCache::get_with`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextLoaded;

/// A successfully loaded asset and the key it was requested with.
#[derive(Debug)]
pub struct AssetRecord<A> {
    pub key: String,
    pub asset: Box<A>,
}

/// Key → asset store that loads on first request.
pub struct AssetCache<A, L = ContextLoaded> {
    entries: FxHashMap<String, AssetRecord<A>>,
    loader: L,
}

/// Fonts loaded through raylib, keyed by file path.
///
/// Non-send: insert with `insert_non_send_resource`.
pub type FontCache = AssetCache<Font>;

/// Textures loaded through raylib, keyed by file path.
///
/// Non-send: insert with `insert_non_send_resource`.
pub type TextureCache = AssetCache<Texture2D>;

impl<A> AssetCache<A, ContextLoaded> {
    /// Create an empty cache filled only through [`AssetCache::get_with`].
    pub fn new() -> Self {
        Self::with_loader(ContextLoaded)
    }
}

impl<A> Default for AssetCache<A, ContextLoaded> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, L> AssetCache<A, L> {
    /// Create an empty cache that loads misses with `loader`.
    pub fn with_loader(loader: L) -> Self {
        Self {
            entries: FxHashMap::default(),
            loader,
        }
    }

    /// Return the asset for `key`, loading it with `load` on a miss.
    ///
    /// `load` is only called when `key` has no entry yet.
    pub fn get_with<F>(&mut self, key: &str, load: F) -> Option<&A>
    where
        F: FnOnce(&str) -> Option<A>,
    {
        fetch(&mut self.entries, key, load)
    }

    /// Return the asset for `key` without loading.
    pub fn peek(&self, key: &str) -> Option<&A> {
        self.entries.get(key).map(|record| record.asset.as_ref())
    }

    /// Return the full record for `key` without loading.
    pub fn record(&self, key: &str) -> Option<&AssetRecord<A>> {
        self.entries.get(key)
    }

    /// Whether `key` has been loaded successfully.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of loaded assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of all loaded assets, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<A, L: AssetLoader<A>> AssetCache<A, L> {
    /// Return the asset for `key`, loading it with the stored loader on a miss.
    pub fn get(&mut self, key: &str) -> Option<&A> {
        let loader = &mut self.loader;
        fetch(&mut self.entries, key, |k| loader.load(k))
    }
}

fn fetch<'a, A, F>(
    entries: &'a mut FxHashMap<String, AssetRecord<A>>,
    key: &str,
    load: F,
) -> Option<&'a A>
where
    F: FnOnce(&str) -> Option<A>,
{
    if !entries.contains_key(key) {
        let Some(asset) = load(key) else {
            warn!("Asset not found: {}", key);
            return None;
        };
        info!("Loaded asset: {}", key);
        entries.insert(
            key.to_string(),
            AssetRecord {
                key: key.to_string(),
                asset: Box::new(asset),
            },
        );
    }
    entries.get(key).map(|record| record.asset.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_hit_returns_same_instance() {
        let mut cache: AssetCache<usize, _> = AssetCache::with_loader(|key: &str| Some(key.len()));
        let first = cache.get("abc").map(|v| v as *const usize);
        let second = cache.get("abc").map(|v| v as *const usize);
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_loader_runs_once_per_key() {
        let calls = Cell::new(0);
        let mut cache: AssetCache<String, _> = AssetCache::with_loader(|key: &str| {
            calls.set(calls.get() + 1);
            Some(key.to_uppercase())
        });
        assert_eq!(cache.get("a").map(String::as_str), Some("A"));
        assert_eq!(cache.get("a").map(String::as_str), Some("A"));
        assert_eq!(cache.get("b").map(String::as_str), Some("B"));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let available = Cell::new(false);
        let mut cache: AssetCache<u32, _> = AssetCache::with_loader(|_: &str| available.get().then_some(7u32));
        assert!(cache.get("x").is_none());
        assert!(!cache.contains("x"));
        available.set(true);
        assert_eq!(cache.get("x"), Some(&7));
        assert!(cache.contains("x"));
    }

    #[test]
    fn test_get_with_skips_loader_on_hit() {
        let mut cache: AssetCache<i32> = AssetCache::new();
        assert_eq!(cache.get_with("k", |_| Some(1)), Some(&1));
        assert_eq!(
            cache.get_with("k", |_| panic!("loader must not run on a hit")),
            Some(&1)
        );
        assert_eq!(cache.peek("k"), Some(&1));
        assert_eq!(cache.record("k").map(|r| r.key.as_str()), Some("k"));
    }

    #[test]
    fn test_peek_does_not_load() {
        let mut cache: AssetCache<i32> = AssetCache::new();
        assert!(cache.peek("missing").is_none());
        assert!(cache.is_empty());
        cache.get_with("missing", |_| None);
        assert!(cache.is_empty());
    }
}
