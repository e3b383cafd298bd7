use cosmic::widget::image::Handle;
use reqwest::Client;
use std::fmt::{self, Debug, Formatter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to download image: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Image request failed with status {0}")]
    Status(u16),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Task cancelled")]
    Cancelled,
}

#[derive(Clone)]
pub struct LoadedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
    pub url: String,
}

impl Debug for LoadedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("url", &self.url)
            .finish()
    }
}

/// Download `url` and decode it off the async runtime.
pub async fn load_image(client: Client, url: String) -> Result<LoadedImage, LoadError> {
    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    tracing::debug!("downloaded {} bytes from {url}", bytes.len());

    let (tx, rx) = tokio::sync::oneshot::channel();

    rayon::spawn(move || {
        let result = decode(&bytes, url);
        let _ = tx.send(result);
    });

    rx.await.map_err(|_| LoadError::Cancelled)?
}

fn decode(bytes: &[u8], url: String) -> Result<LoadedImage, LoadError> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba.into_raw();

    Ok(LoadedImage {
        handle: Handle::from_rgba(width, height, pixels),
        width,
        height,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_reports_dimensions() {
        let loaded = decode(&png_bytes(4, 3), "https://cdn/a.png".to_string()).unwrap();
        assert_eq!((loaded.width, loaded.height), (4, 3));
        assert_eq!(loaded.url, "https://cdn/a.png");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(b"not an image", "u".to_string()).unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }
}
