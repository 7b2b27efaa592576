//! Integration tests for the storefront HTTP client

use serde_json::json;
use techhub_http::types::{NewCartItem, NewReview, RegisterRequest, ReviewUpdate};
use techhub_http::{ApiClientBuilder, ClientError, PublicClient};
use wiremock::matchers::{
    body_json, body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product_json(id: i64, price: f64, rating: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Product {id}"),
        "description": "A component",
        "price": price,
        "stock": 4,
        "category_id": 1,
        "image_url": null,
        "rating": rating,
        "reviews_count": 2,
        "category": {"id": 1, "name": "GPU", "description": "Graphics"}
    })
}

#[tokio::test]
async fn test_client_builder() {
    let client = ApiClientBuilder::new()
        .base_url("http://localhost:8002/")
        .build_public();

    assert!(client.is_ok());
    assert_eq!(client.unwrap().base_url(), "http://localhost:8002");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = ApiClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));

    let result = ApiClientBuilder::new().base_url("  ").build_authenticated("t");
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_sends_form_encoded_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=ann%40example.com"))
        .and(body_string_contains("password=s3cret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-1", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let token = client.login("ann@example.com", "s3cret").await.unwrap();
    assert_eq!(token.access_token, "tok-1");
}

#[tokio::test]
async fn test_register_error_carries_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .and(body_json(json!({
            "email": "ann@example.com",
            "username": "ann",
            "password": "pw"
        })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let request = RegisterRequest {
        email: "ann@example.com".into(),
        username: "ann".into(),
        password: "pw".into(),
    };

    let err = client.register(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::BadRequest(_)));
    assert_eq!(err.detail(), Some("Email already registered"));
}

#[tokio::test]
async fn test_me_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "email": "ann@example.com",
            "username": "ann",
            "is_admin": false
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated("tok-1")
        .unwrap();

    let user = client.me().await.unwrap();
    assert_eq!(user.username, "ann");
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri())
        .unwrap()
        .authenticate("expired");

    let result = client.me().await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert!(result.unwrap_err().is_auth_expired());
}

#[tokio::test]
async fn test_malformed_body_is_a_serialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let result = client.categories().await;
    assert!(matches!(result, Err(ClientError::Serialization(_))));
}

#[tokio::test]
async fn test_transport_failure_is_classified() {
    // Nothing listens on the discard port
    let client = PublicClient::new("http://127.0.0.1:9").unwrap();
    let err = client.categories().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn test_products_filtered_by_category() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .and(query_param("category_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json(5, 100.0, 4.5)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let products = client.products(Some(3)).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category.as_ref().map(|c| c.name.as_str()), Some("GPU"));
}

#[tokio::test]
async fn test_product_reviews_parse_naive_timestamps() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reviews/product/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "rating": 5,
            "comment": "Great",
            "created_at": "2024-03-02T11:45:00.512000",
            "user_id": 2,
            "product_id": 5,
            "user": {"id": 2, "username": "bob", "email": "bob@example.com", "is_admin": false}
        }])))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let reviews = client.product_reviews(5).await.unwrap();
    assert_eq!(reviews[0].user.username, "bob");
    assert_eq!(reviews[0].created_at.format("%Y-%m-%d").to_string(), "2024-03-02");
}

#[tokio::test]
async fn test_cart_mutations() {
    let mock_server = MockServer::start().await;
    let item = json!({
        "id": 7,
        "product_id": 5,
        "user_id": 1,
        "quantity": 5,
        "product": product_json(5, 10.0, 4.0)
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/cart/items"))
        .and(body_json(json!({"product_id": 5, "quantity": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&item))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/cart/items/7"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"quantity": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&item))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/cart/items/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Item removed from cart"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap().authenticate("tok");

    let added = client
        .add_cart_item(&NewCartItem { product_id: 5, quantity: 1 })
        .await
        .unwrap();
    assert_eq!(added.id, 7);

    let updated = client.update_cart_item(7, 5).await.unwrap();
    assert_eq!(updated.quantity, 5);

    let removed = client.remove_cart_item(7).await.unwrap();
    assert_eq!(removed.message, "Item removed from cart");
}

#[tokio::test]
async fn test_review_endpoints() {
    let mock_server = MockServer::start().await;
    let review = json!({
        "id": 11,
        "rating": 4,
        "comment": "Solid",
        "created_at": "2024-03-02T11:45:00",
        "user": {"username": "ann"}
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/reviews/"))
        .and(body_json(json!({"product_id": 5, "rating": 4, "comment": "Solid"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&review))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/reviews/11"))
        .and(body_json(json!({"rating": 2, "comment": "Changed my mind"})))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"detail": "Недостаточно прав для редактирования этого отзыва"})),
        )
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap().authenticate("tok");

    let created = client
        .create_review(&NewReview {
            product_id: 5,
            rating: 4,
            comment: "Solid".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 11);

    let err = client
        .update_review(
            11,
            &ReviewUpdate {
                rating: 2,
                comment: "Changed my mind".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
    assert_eq!(
        err.detail(),
        Some("Недостаточно прав для редактирования этого отзыва")
    );
}
