use cosmic::widget::image::Handle;
use std::sync::Arc;
use storefront_config::AppTheme;
use storefront_types::{Layout, Product};

pub use crate::{key_binds::MenuAction, views::ProductTab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextPage {
    About,
    Settings,
}

#[derive(Debug, Clone)]
pub enum Message {
    ProductLoaded(Result<Option<Product>, Arc<String>>),
    Image(ImageMessage),
    Gallery(GalleryMessage),
    Settings(SettingsMessage),
    KeyBind(MenuAction),
    ToggleContextPage(ContextPage),
    TabSelected(ProductTab),
    BuyNow,
    OpenUrl(String),
    UrlOpened(Result<(), String>),
    Retry,
    WindowResized { width: f32, height: f32 },
    Cancelled,
    Quit,
    Surface(cosmic::surface::Action),
}

#[derive(Debug, Clone)]
pub enum ImageMessage {
    Loaded {
        url: String,
        handle: Handle,
        width: u32,
        height: u32,
    },
    LoadFailed {
        url: String,
        error: String,
    },
}

#[derive(Debug, Clone)]
pub enum GalleryMessage {
    /// A layout's scrollable moved, carries the relative horizontal offset
    Scrolled(Layout, f32),
    /// No scroll event arrived for a while after the numbered one
    ScrollSettled(u64),
    /// Thumbnail or position dot pressed
    Select(usize),
    Prev,
    Next,
    OpenLightbox(usize),
    OpenSelected,
    CloseLightbox,
}

#[derive(Debug, Clone)]
pub enum SettingsMessage {
    AppTheme(AppTheme),
    Breakpoint(u32),
    CacheSize(usize),
}
