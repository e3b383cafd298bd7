use lru::LruCache;
use std::{
    collections::HashSet,
    num::NonZeroUsize,
    sync::{Arc, Mutex},
};

/// URL keyed LRU shared between the update loop and loader tasks.
///
/// Besides finished entries it tracks which URLs have a load in flight, so the
/// same image is never requested twice at once.
#[derive(Clone)]
pub struct UrlCache<V> {
    entries: Arc<Mutex<LruCache<String, V>>>,
    pending: Arc<Mutex<HashSet<String>>>,
}

impl<V: Clone> UrlCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(Self::capacity(capacity)))),
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn resize(&self, capacity: usize) {
        if let Ok(mut cache) = self.entries.lock() {
            cache.resize(Self::capacity(capacity));
        }
    }

    pub fn get(&self, url: &str) -> Option<V> {
        self.entries.lock().ok()?.get(url).cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries
            .lock()
            .map(|cache| cache.contains(url))
            .unwrap_or(false)
    }

    pub fn insert(&self, url: String, value: V) {
        self.clear_pending(&url);
        if let Ok(mut cache) = self.entries.lock() {
            cache.put(url, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark `url` as loading. Returns false when it is cached or already in flight.
    pub fn begin(&self, url: &str) -> bool {
        if self.contains(url) {
            return false;
        }

        match self.pending.lock() {
            Ok(mut set) => set.insert(url.to_string()),
            Err(e) => {
                tracing::warn!("pending set poisoned: {e}");
                false
            }
        }
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending
            .lock()
            .map(|set| set.contains(url))
            .unwrap_or(false)
    }

    pub fn clear_pending(&self, url: &str) {
        if let Ok(mut set) = self.pending.lock() {
            set.remove(url);
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|set| set.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.entries.lock() {
            cache.clear();
        }

        if let Ok(mut set) = self.pending.lock() {
            set.clear();
        }
    }

    fn capacity(capacity: usize) -> NonZeroUsize {
        NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN)
    }
}

impl<V: Clone> Default for UrlCache<V> {
    fn default() -> Self {
        Self::new(32)
    }
}

impl<V> std::fmt::Debug for UrlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.entries.lock().map(|cache| cache.len()).unwrap_or(0);
        f.debug_struct("UrlCache")
            .field("len", &len)
            .finish_non_exhaustive()
    }
}
