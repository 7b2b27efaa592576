//! Wire types exchanged with the storefront API

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile returned by `GET /users/me` and `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Bearer token issued by `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Registration request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Login form, sent as `application/x-www-form-urlencoded`.
///
/// The API's OAuth2 password flow names the e-mail field `username`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Product as embedded in cart items and in the user's own reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    #[serde(default)]
    pub product_id: i64,
    pub quantity: u32,
    pub product: ProductSummary,
}

impl CartItem {
    /// Price of this line (`price × quantity`)
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartItem {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub username: String,
}

/// Review as listed under a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub rating: u8,
    pub comment: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub user: ReviewAuthor,
}

/// Review as listed on the author's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReview {
    pub id: i64,
    pub rating: u8,
    pub comment: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub product: ProductSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub product_id: i64,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub rating: u8,
    pub comment: String,
}

/// Acknowledgement body returned by DELETE endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body produced by the API for non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

/// Parse an API timestamp.
///
/// The API serialises naive UTC datetimes (`2024-05-01T10:00:00.123456`);
/// offset-carrying RFC 3339 values are accepted as well.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()))
}

mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_parse_naive_timestamp() {
        let parsed = parse_timestamp("2024-05-01T10:20:30.123456").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.hour(), 10);
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let parsed = parse_timestamp("2024-05-01T10:20:30+03:00").unwrap();
        assert_eq!(parsed.hour(), 7);
    }

    #[test]
    fn test_product_tolerates_missing_optional_fields() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "RTX 4070",
            "price": 59990.0
        }))
        .unwrap();
        assert_eq!(product.reviews_count, 0);
        assert!(!product.in_stock());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_cart_item_subtotal() {
        let item: CartItem = serde_json::from_value(json!({
            "id": 7,
            "product_id": 1,
            "quantity": 3,
            "user_id": 1,
            "product": {"id": 1, "name": "SSD", "price": 2500.5, "image_url": null}
        }))
        .unwrap();
        assert_eq!(item.subtotal(), 7501.5);
    }
}
