use cosmic::widget::image::Handle;
use shared::UrlCache;

#[derive(Clone)]
pub struct CachedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for CachedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Decoded images keyed by the URL they were downloaded from.
pub type ImageCache = UrlCache<CachedImage>;
