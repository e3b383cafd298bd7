pub mod checkout;
pub mod client;
pub mod graphql;
pub mod price;

pub use checkout::{BuyNow, buy_now_target, checkout_url};
pub use client::{ClientError, StorefrontClient};
pub use graphql::{PRODUCT_QUERY, parse_product};
pub use price::format_price;
