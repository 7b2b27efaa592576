//! Catalog listing with a category filter

use super::{Outcome, ProductCard};
use crate::auth::AuthContext;
use crate::scope::{ScopeHandle, ViewScope};
use techhub_http::types::{Category, Product};
use tracing::error;

pub const LOAD_FAILED: &str = "Ошибка при загрузке товаров";

pub struct ProductsView {
    auth: AuthContext,
    scope: ViewScope,
    categories: Vec<Category>,
    products: Vec<Product>,
    selected_category: Option<i64>,
    loading: bool,
    error: Option<String>,
}

impl ProductsView {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            scope: ViewScope::new(),
            categories: Vec::new(),
            products: Vec::new(),
            selected_category: None,
            loading: false,
            error: None,
        }
    }

    /// Fetch the category list and the products for the current filter.
    ///
    /// A failed category fetch is only logged; the filter then offers
    /// "all categories" alone.
    pub async fn load(&mut self) -> Outcome {
        self.loading = true;
        let client = self.auth.public_client().clone();
        let category = self.selected_category;
        let fetch = async { futures::join!(client.categories(), client.products(category)) };

        let Some((categories, products)) = self.scope.run(fetch).await else {
            self.loading = false;
            return Outcome::Discarded;
        };
        self.loading = false;

        match categories {
            Ok(categories) => self.categories = categories,
            Err(e) => error!("Error fetching categories: {e}"),
        }
        self.apply_products(products)
    }

    /// Change the filter (`None` = all categories) and refetch products
    pub async fn select_category(&mut self, category_id: Option<i64>) -> Outcome {
        self.selected_category = category_id;
        self.loading = true;
        let client = self.auth.public_client().clone();

        let Some(products) = self.scope.run(client.products(category_id)).await else {
            self.loading = false;
            return Outcome::Discarded;
        };
        self.loading = false;
        self.apply_products(products)
    }

    fn apply_products(&mut self, result: Result<Vec<Product>, techhub_http::ClientError>) -> Outcome {
        match result {
            Ok(products) => {
                self.products = products;
                self.error = None;
                Outcome::Updated
            }
            Err(e) => {
                error!("Error fetching products: {e}");
                self.error = Some(LOAD_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cards(&self) -> Vec<ProductCard> {
        self.products.iter().map(ProductCard::from).collect()
    }

    pub fn selected_category(&self) -> Option<i64> {
        self.selected_category
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
