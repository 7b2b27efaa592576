//! Catalog endpoints: categories, products and their reviews

use super::{PublicClient, error::ClientError};
use crate::types::{Category, Product, Review};
use reqwest::Method;

impl PublicClient {
    /// List all categories
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        let request = self.request(Method::GET, "/categories");
        self.execute(request).await
    }

    /// List products, optionally restricted to one category
    pub async fn products(&self, category_id: Option<i64>) -> Result<Vec<Product>, ClientError> {
        let mut request = self.request(Method::GET, "/products");
        if let Some(category_id) = category_id {
            request = request.query(&[("category_id", category_id)]);
        }
        self.execute(request).await
    }

    /// Get a single product
    pub async fn product(&self, product_id: i64) -> Result<Product, ClientError> {
        let request = self.request(Method::GET, &format!("/products/{product_id}"));
        self.execute(request).await
    }

    /// List the reviews of a product
    pub async fn product_reviews(&self, product_id: i64) -> Result<Vec<Review>, ClientError> {
        let request = self.request(Method::GET, &format!("/reviews/product/{product_id}"));
        self.execute(request).await
    }
}
