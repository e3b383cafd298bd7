pub mod types;

pub use types::{DisplayImage, ImageRecord, Layout};

/// Price of a variant as returned by the storefront API
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub price: Money,
}

/// The one product this storefront sells
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub description_html: String,
    pub images: Vec<ImageRecord>,
    pub variants: Vec<ProductVariant>,
}

impl Product {
    pub fn first_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }
}
