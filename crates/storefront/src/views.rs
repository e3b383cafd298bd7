pub mod footer;
pub mod media;
pub mod product;
pub mod tabs;

pub use tabs::ProductTab;
