use storefront_config::StorefrontConfig;
use storefront_types::Product;

/// Where the Buy Now button sends the shopper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuyNow {
    /// Hosted cart for the first variant
    Checkout(String),
    /// Externally configured purchase page
    External(String),
}

impl BuyNow {
    pub fn url(&self) -> &str {
        match self {
            BuyNow::Checkout(url) | BuyNow::External(url) => url,
        }
    }
}

/// Cart permalink for a variant. Accepts a full GID (`gid://shopify/ProductVariant/123`)
/// or a bare numeric id.
pub fn checkout_url(store_domain: &str, variant_id: &str, quantity: u32) -> String {
    let numeric_id = variant_id.rsplit('/').next().unwrap_or(variant_id);
    format!("https://{store_domain}/cart/{numeric_id}:{quantity}")
}

pub fn buy_now_target(config: &StorefrontConfig, product: &Product) -> Option<BuyNow> {
    let store_domain = config
        .store_domain
        .as_deref()
        .map(str::trim)
        .filter(|domain| !domain.is_empty());

    if config.use_shopify_checkout
        && let Some(domain) = store_domain
        && let Some(variant) = product.first_variant()
    {
        return Some(BuyNow::Checkout(checkout_url(domain, &variant.id, 1)));
    }

    config
        .buy_now_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| BuyNow::External(url.to_string()))
}
