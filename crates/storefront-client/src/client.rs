use std::time::Duration;

use reqwest::Client;
use storefront_config::{ConfigError, Credentials, StorefrontConfig};
use storefront_types::Product;
use thiserror::Error;

use crate::graphql::{self, PRODUCT_QUERY};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storefront returned HTTP {0}")]
    Status(u16),
    #[error("storefront query failed: {0}")]
    GraphQl(String),
    #[error("storefront credentials are not configured: {0}")]
    MissingCredentials(#[from] ConfigError),
    #[error("malformed storefront response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storefront API client bound to one shop
#[derive(Clone, Debug)]
pub struct StorefrontClient {
    client: Client,
    credentials: Credentials,
}

impl StorefrontClient {
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, credentials))
    }

    /// Share an existing connection pool, e.g. the one used for image downloads
    pub fn with_client(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn from_config(config: &StorefrontConfig, client: Client) -> Result<Self, ClientError> {
        let credentials = config.credentials()?;
        Ok(Self::with_client(client, credentials))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoint(&self) -> String {
        endpoint(&self.credentials)
    }

    /// Fetch the first product of the shop. `Ok(None)` when the shop has none.
    pub async fn fetch_product(&self) -> Result<Option<Product>, ClientError> {
        let url = self.endpoint();
        tracing::debug!("Fetching product from {url}");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(ACCESS_TOKEN_HEADER, &self.credentials.access_token)
            .json(&serde_json::json!({ "query": PRODUCT_QUERY }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let product = graphql::parse_product(&body)?;

        match &product {
            Some(product) => tracing::info!(
                "Loaded product {} with {} images and {} variants",
                product.id,
                product.images.len(),
                product.variants.len()
            ),
            None => tracing::warn!("Storefront has no products"),
        }

        Ok(product)
    }
}

fn endpoint(credentials: &Credentials) -> String {
    format!(
        "https://{}/api/{}/graphql.json",
        credentials.store_domain, credentials.api_version
    )
}
