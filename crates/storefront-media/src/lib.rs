pub mod cache;
pub mod gallery;
pub mod lightbox;
pub mod loader;
pub mod normalize;

pub use cache::{CachedImage, ImageCache};
pub use gallery::{MediaGallery, ScrollRequest};
pub use lightbox::LightboxController;
pub use loader::{LoadError, LoadedImage, load_image};
pub use normalize::{fallback_alt_text, normalize_images};
