#[cfg(test)]
mod tests {
    use shared::cache::UrlCache;

    #[test]
    fn test_pending_lifecycle() {
        let cache: UrlCache<Vec<u8>> = UrlCache::new(8);
        let url = "https://cdn.example.com/product_800.jpg";

        // First request wins, the second sees it in flight
        assert!(cache.begin(url));
        assert!(!cache.begin(url));
        assert!(cache.is_pending(url));
        assert_eq!(cache.pending_count(), 1);

        // Finishing the load clears the pending flag
        cache.insert(url.to_string(), vec![1, 2, 3]);
        assert!(!cache.is_pending(url));
        assert!(!cache.begin(url));
    }

    #[test]
    fn test_failed_load_can_be_retried() {
        let cache: UrlCache<Vec<u8>> = UrlCache::new(8);
        let url = "https://cdn.example.com/broken.jpg";

        assert!(cache.begin(url));
        cache.clear_pending(url);
        assert!(cache.begin(url));
    }

    #[test]
    fn test_cache_clear() {
        let cache: UrlCache<Vec<u8>> = UrlCache::new(8);
        cache.insert("key1".to_string(), vec![1]);
        cache.insert("key2".to_string(), vec![2]);
        cache.begin("key3");

        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.pending_count(), 0);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache: UrlCache<u8> = UrlCache::new(8);
        let handle = cache.clone();

        handle.insert("shared".to_string(), 7);
        assert_eq!(cache.get("shared"), Some(7));
    }

    #[tokio::test]
    async fn test_loader_tasks_share_cache() {
        let cache: UrlCache<usize> = UrlCache::new(16);
        let urls: Vec<String> = (0..4)
            .map(|idx| format!("https://cdn.example.com/image_{idx}.jpg"))
            .collect();

        let mut handles = Vec::new();
        for (idx, url) in urls.iter().cloned().enumerate() {
            assert!(cache.begin(&url));
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.insert(url, idx);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.pending_count(), 0);
        assert_eq!(cache.get(&urls[2]), Some(2));
    }
}
