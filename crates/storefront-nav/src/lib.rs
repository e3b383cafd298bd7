pub mod carousel;
pub mod viewport;

pub use carousel::{CarouselController, CarouselEvent};
pub use viewport::ViewportClassifier;
