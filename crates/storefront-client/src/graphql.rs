//! Product query and the shape of its response.

use serde::Deserialize;
use storefront_types::{ImageRecord, Product, ProductVariant};

use crate::client::ClientError;

pub const PRODUCT_QUERY: &str = r#"
  query GetFirstProduct {
    products(first: 1) {
      edges {
        node {
          id
          title
          description
          descriptionHtml
          images(first: 10) {
            edges {
              node {
                url(transform: { maxWidth: 800, maxHeight: 800 })
                urlLarge: url(transform: { maxWidth: 2000, maxHeight: 2000 })
                altText
              }
            }
          }
          variants(first: 10) {
            edges {
              node {
                id
                title
                price {
                  amount
                  currencyCode
                }
              }
            }
          }
        }
      }
    }
  }
"#;

#[derive(Debug, Deserialize)]
struct Response {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Data {
    products: Option<Connection<ProductNode>>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    description_html: String,
    images: Option<Connection<ImageRecord>>,
    variants: Option<Connection<ProductVariant>>,
}

impl<T> Connection<T> {
    fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

impl From<ProductNode> for Product {
    fn from(node: ProductNode) -> Self {
        Product {
            id: node.id,
            title: node.title,
            description: node.description,
            description_html: node.description_html,
            images: node.images.map(Connection::into_nodes).unwrap_or_default(),
            variants: node.variants.map(Connection::into_nodes).unwrap_or_default(),
        }
    }
}

/// Map a raw response body to the first product, if the shop has one.
pub fn parse_product(body: &str) -> Result<Option<Product>, ClientError> {
    let response: Response = serde_json::from_str(body)?;

    let messages = || {
        response
            .errors
            .iter()
            .map(|err| err.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    };

    let Some(data) = response.data else {
        if response.errors.is_empty() {
            return Ok(None);
        }
        return Err(ClientError::GraphQl(messages()));
    };

    if !response.errors.is_empty() {
        tracing::warn!("Storefront returned partial data: {}", messages());
    }

    let product = data
        .products
        .and_then(|products| products.edges.into_iter().next())
        .map(|edge| Product::from(edge.node));

    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_requests_both_image_sizes() {
        assert!(PRODUCT_QUERY.contains("maxWidth: 800, maxHeight: 800"));
        assert!(PRODUCT_QUERY.contains("urlLarge: url(transform: { maxWidth: 2000, maxHeight: 2000 })"));
        assert!(PRODUCT_QUERY.contains("variants(first: 10)"));
    }

    #[test]
    fn test_empty_products() {
        let body = r#"{"data":{"products":{"edges":[]}}}"#;
        assert_eq!(parse_product(body).unwrap(), None);
    }

    #[test]
    fn test_null_data_without_errors() {
        assert_eq!(parse_product(r#"{"data":null}"#).unwrap(), None);
    }

    #[test]
    fn test_errors_without_data() {
        let body = r#"{"data":null,"errors":[{"message":"Access denied"},{"message":"Throttled"}]}"#;
        match parse_product(body) {
            Err(ClientError::GraphQl(msg)) => assert_eq!(msg, "Access denied; Throttled"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_partial_data_is_kept() {
        let body = r#"{
            "data": {"products": {"edges": [{"node": {"id": "gid://shopify/Product/1", "title": "LFO"}}]}},
            "errors": [{"message": "images unavailable"}]
        }"#;
        let product = parse_product(body).unwrap().unwrap();

        assert_eq!(product.title, "LFO");
        assert!(product.images.is_empty());
        assert!(product.variants.is_empty());
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(parse_product("<html>"), Err(ClientError::Json(_))));
    }
}
