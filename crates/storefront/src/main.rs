pub mod app;
pub mod key_binds;
pub mod localize;
pub mod menu;
pub mod message;
pub mod views;

use app::Storefront;

const INITIAL_WIDTH: f32 = 1024.0;
const INITIAL_HEIGHT: f32 = 800.0;

fn main() -> cosmic::iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(INITIAL_WIDTH, INITIAL_HEIGHT))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(320.0)
                .min_height(480.0),
        );

    // The window opens at this width, the layout is classified from it before the first frame
    cosmic::app::run::<Storefront>(settings, Some(INITIAL_WIDTH))
}
