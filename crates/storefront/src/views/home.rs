//! Landing page: top-rated products and the category list

use super::{Outcome, ProductCard};
use crate::auth::AuthContext;
use crate::scope::{ScopeHandle, ViewScope};
use techhub_http::types::{Category, Product};
use tracing::error;

pub const LOAD_FAILED: &str = "Ошибка при загрузке данных";

pub struct HomeView {
    auth: AuthContext,
    scope: ViewScope,
    featured_count: usize,
    featured: Vec<Product>,
    categories: Vec<Category>,
    loading: bool,
    error: Option<String>,
}

impl HomeView {
    pub fn new(auth: AuthContext, featured_count: usize) -> Self {
        Self {
            auth,
            scope: ViewScope::new(),
            featured_count,
            featured: Vec::new(),
            categories: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Fetch products and categories together; both must succeed
    pub async fn load(&mut self) -> Outcome {
        self.loading = true;
        let client = self.auth.public_client().clone();
        let fetch = async { futures::try_join!(client.products(None), client.categories()) };

        let Some(result) = self.scope.run(fetch).await else {
            self.loading = false;
            return Outcome::Discarded;
        };
        self.loading = false;

        match result {
            Ok((products, categories)) => {
                self.featured = top_rated(products, self.featured_count);
                self.categories = categories;
                self.error = None;
                Outcome::Updated
            }
            Err(e) => {
                error!("Error fetching data: {e}");
                self.error = Some(LOAD_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    pub fn featured(&self) -> &[Product] {
        &self.featured
    }

    pub fn featured_cards(&self) -> Vec<ProductCard> {
        self.featured.iter().map(ProductCard::from).collect()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }
}

/// The `count` highest-rated products; ties keep API order
pub fn top_rated(mut products: Vec<Product>, count: usize) -> Vec<Product> {
    products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    products.truncate(count);
    products
}
