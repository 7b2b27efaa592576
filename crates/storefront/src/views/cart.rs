//! Shopping cart

use super::{Outcome, Route};
use crate::auth::AuthContext;
use crate::format;
use crate::scope::{ScopeHandle, ViewScope};
use techhub_http::types::CartItem;
use tracing::error;

pub const LOAD_FAILED: &str = "Ошибка при загрузке корзины";
pub const UPDATE_FAILED: &str = "Ошибка при обновлении количества";
pub const REMOVE_FAILED: &str = "Ошибка при удалении товара";
pub const EMPTY_MESSAGE: &str = "Корзина пуста";

pub struct CartView {
    auth: AuthContext,
    scope: ViewScope,
    items: Vec<CartItem>,
    loading: bool,
    error: Option<String>,
}

impl CartView {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            scope: ViewScope::new(),
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) -> Outcome {
        let Some(client) = self.auth.authenticated_client() else {
            return Outcome::Redirect(Route::Auth);
        };

        self.loading = true;
        let Some(result) = self.scope.run(client.cart_items()).await else {
            self.loading = false;
            return Outcome::Discarded;
        };
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                Outcome::Updated
            }
            Err(e) => {
                error!("Error fetching cart: {e}");
                self.error = Some(LOAD_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    /// Set an item's quantity. Quantities below 1 are ignored.
    pub async fn update_quantity(&mut self, item_id: i64, quantity: u32) -> Outcome {
        if quantity < 1 {
            return Outcome::Ignored;
        }
        let Some(client) = self.auth.authenticated_client() else {
            return Outcome::Ignored;
        };

        let Some(result) = self.scope.run(client.update_cart_item(item_id, quantity)).await else {
            return Outcome::Discarded;
        };

        match result {
            Ok(updated) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
                    *item = CartItem { quantity, ..updated };
                }
                self.error = None;
                Outcome::Updated
            }
            Err(e) => {
                error!("Error updating quantity: {e}");
                self.error = Some(UPDATE_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    pub async fn remove_item(&mut self, item_id: i64) -> Outcome {
        let Some(client) = self.auth.authenticated_client() else {
            return Outcome::Ignored;
        };

        let Some(result) = self.scope.run(client.remove_cart_item(item_id)).await else {
            return Outcome::Discarded;
        };

        match result {
            Ok(_) => {
                self.items.retain(|item| item.id != item_id);
                self.error = None;
                Outcome::Updated
            }
            Err(e) => {
                error!("Error removing item: {e}");
                self.error = Some(REMOVE_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price × quantity over all items
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn total_label(&self) -> String {
        format::price(self.total())
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
