use storefront_types::{DisplayImage, ImageRecord};

/// Alt text used when a record has none, numbered from 1.
pub fn fallback_alt_text(index: usize) -> String {
    format!("Product image {}", index + 1)
}

/// Turn raw records into render-ready images, one for one and in order.
pub fn normalize_images(images: &[ImageRecord]) -> Vec<DisplayImage> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| DisplayImage {
            key: format!("{}-{}", image.url, index),
            url: image.url.clone(),
            url_large: image
                .url_large
                .clone()
                .unwrap_or_else(|| image.url.clone()),
            alt_text: image
                .alt_text
                .as_deref()
                .map(str::trim)
                .filter(|alt| !alt.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| fallback_alt_text(index)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn records() -> Vec<ImageRecord> {
        vec![
            ImageRecord::new("https://cdn/a.jpg")
                .with_large("https://cdn/a_2000.jpg")
                .with_alt("Front panel"),
            ImageRecord::new("https://cdn/b.jpg"),
            ImageRecord::new("https://cdn/b.jpg").with_alt("   "),
        ]
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_images(&[]).is_empty());
    }

    #[test]
    fn test_length_and_order_preserved() {
        let images = normalize_images(&records());
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].url, "https://cdn/a.jpg");
        assert_eq!(images[2].url, "https://cdn/b.jpg");
    }

    #[test]
    fn test_keys_unique_with_duplicate_urls() {
        let images = normalize_images(&records());
        let keys: HashSet<_> = images.iter().map(|image| image.key.as_str()).collect();
        assert_eq!(keys.len(), images.len());
        assert_eq!(images[1].key, "https://cdn/b.jpg-1");
    }

    #[test]
    fn test_large_url_fallback() {
        let images = normalize_images(&records());
        assert_eq!(images[0].url_large, "https://cdn/a_2000.jpg");
        assert_eq!(images[1].url_large, images[1].url);
    }

    #[test]
    fn test_alt_text_fallback() {
        let images = normalize_images(&records());
        assert_eq!(images[0].alt_text, "Front panel");
        assert_eq!(images[1].alt_text, "Product image 2");
        // Blank after trimming counts as missing
        assert_eq!(images[2].alt_text, "Product image 3");
    }

    #[test]
    fn test_alt_text_is_trimmed() {
        let images = normalize_images(&[ImageRecord::new("u").with_alt("  Knobs  ")]);
        assert_eq!(images[0].alt_text, "Knobs");
    }

    #[test]
    fn test_idempotent() {
        let input = records();
        assert_eq!(normalize_images(&input), normalize_images(&input));
    }
}
