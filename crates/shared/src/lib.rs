pub mod cache;
pub mod loading_state;

pub use cache::UrlCache;
pub use loading_state::{LoadingEvent, LoadingState};
