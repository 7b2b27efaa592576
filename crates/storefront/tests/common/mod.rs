#![allow(dead_code)]

use serde_json::{Value, json};
use std::sync::Arc;
use techhub_http::PublicClient;
use techhub_storefront::{AuthContext, MemorySessionStore, SessionFailurePolicy};
use wiremock::MockServer;

pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MemorySessionStore>,
    pub auth: AuthContext,
}

impl Harness {
    pub async fn anonymous() -> Self {
        Self::build(MemorySessionStore::new(), SessionFailurePolicy::default()).await
    }

    pub async fn signed_in(token: &str) -> Self {
        Self::build(MemorySessionStore::with_token(token), SessionFailurePolicy::default()).await
    }

    pub async fn build(store: MemorySessionStore, policy: SessionFailurePolicy) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);
        let client = PublicClient::new(server.uri()).unwrap();
        let auth = AuthContext::new(store.clone(), client, policy);
        Self {
            server,
            store,
            auth,
        }
    }
}

pub fn user_json() -> Value {
    json!({"id": 1, "email": "ann@example.com", "username": "ann", "is_admin": false})
}

pub fn product_json(id: i64, stock: i64, rating: f64) -> Value {
    json!({
        "id": id,
        "name": format!("Product {id}"),
        "description": "A component",
        "price": 1000.0,
        "stock": stock,
        "category_id": 1,
        "image_url": null,
        "rating": rating,
        "reviews_count": 1,
        "category": {"id": 1, "name": "GPU", "description": "Graphics"}
    })
}

pub fn cart_item_json(id: i64, quantity: u32, price: f64) -> Value {
    json!({
        "id": id,
        "product_id": id * 10,
        "quantity": quantity,
        "product": {"id": id * 10, "name": format!("Item {id}"), "price": price, "image_url": null}
    })
}

pub fn review_json(id: i64, rating: u8) -> Value {
    json!({
        "id": id,
        "rating": rating,
        "comment": "Solid card",
        "created_at": "2024-03-02T11:45:00",
        "user": {"username": "ann"}
    })
}

pub fn user_review_json(id: i64, rating: u8, comment: &str) -> Value {
    json!({
        "id": id,
        "rating": rating,
        "comment": comment,
        "created_at": "2024-03-02T11:45:00.000000",
        "product": {"id": 3, "name": "Product 3", "price": 1000.0, "image_url": null}
    })
}
