//! Storefront views
//!
//! A view owns its data fetching and its inline error/notice strings. Views
//! never share fetched data; each one talks to the API through the
//! [`AuthContext`](crate::AuthContext) it was given and reports navigation
//! as a [`Route`] instead of performing it.

pub mod auth;
pub mod cart;
pub mod home;
pub mod navbar;
pub mod product_detail;
pub mod products;
pub mod profile;
pub mod review_form;
pub mod review_list;

pub use auth::{AuthTab, AuthView, LoginCredentials};
pub use cart::CartView;
pub use home::HomeView;
pub use navbar::{NavLink, Navbar};
pub use product_detail::ProductDetailView;
pub use products::ProductsView;
pub use profile::{ProfileView, ReviewEditor};
pub use review_form::{Rating, ReviewForm};
pub use review_list::{ReviewList, ReviewRow};

use crate::format;
use techhub_http::types::Product;

/// Screens a view can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Products,
    Product(i64),
    Cart,
    Profile,
    Auth,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Products => "/categories".to_string(),
            Self::Product(id) => format!("/product/{id}"),
            Self::Cart => "/cart".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Auth => "/auth".to_string(),
        }
    }
}

/// Result of a view action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// View state was replaced with fresh data
    Updated,
    /// Preconditions not met; nothing was requested
    Ignored,
    /// The user must be sent elsewhere
    Redirect(Route),
    /// The action failed; the view's error string says why
    Failed,
    /// The view was torn down before the response arrived
    Discarded,
}

/// Text of a product card as shown in listings
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub rating: f64,
    pub rating_summary: String,
    pub excerpt: String,
    pub stock: String,
    pub in_stock: bool,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: format::price(product.price),
            rating: product.rating,
            rating_summary: format::rating_summary(product.rating, product.reviews_count),
            excerpt: format::excerpt(&product.description),
            stock: format::stock_label(product.stock),
            in_stock: product.in_stock(),
            image_url: product.image_url.clone(),
        }
    }
}
