//! Cart endpoints

use super::{AuthenticatedClient, error::ClientError};
use crate::types::{CartItem, MessageResponse, NewCartItem, QuantityUpdate};
use reqwest::Method;

impl AuthenticatedClient {
    /// List the items in the user's cart
    pub async fn cart_items(&self) -> Result<Vec<CartItem>, ClientError> {
        let request = self.request(Method::GET, "/cart/items");
        self.execute(request).await
    }

    /// Add a product to the cart
    pub async fn add_cart_item(&self, item: &NewCartItem) -> Result<CartItem, ClientError> {
        let request = self.request(Method::POST, "/cart/items").json(item);
        self.execute(request).await
    }

    /// Set the quantity of a cart item
    pub async fn update_cart_item(
        &self,
        item_id: i64,
        quantity: u32,
    ) -> Result<CartItem, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/cart/items/{item_id}"))
            .json(&QuantityUpdate { quantity });
        self.execute(request).await
    }

    /// Remove an item from the cart
    pub async fn remove_cart_item(&self, item_id: i64) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::DELETE, &format!("/cart/items/{item_id}"));
        self.execute(request).await
    }
}
