//! Single product page with its reviews

use super::{Outcome, ReviewForm, ReviewList, Route};
use crate::auth::AuthContext;
use crate::auth::error_messages::detail_or;
use crate::format;
use crate::scope::{ScopeHandle, ViewScope};
use techhub_http::types::{NewCartItem, Product, Review};
use techhub_http::{ClientError, PublicClient};
use tracing::{error, warn};

pub const ADDED_TO_CART: &str = "Товар добавлен в корзину!";
pub const ADD_TO_CART_FAILED: &str = "Ошибка при добавлении товара в корзину";
pub const OUT_OF_STOCK: &str = "Нет в наличии";

pub struct ProductDetailView {
    auth: AuthContext,
    scope: ViewScope,
    product_id: i64,
    product: Option<Product>,
    reviews: Vec<Review>,
    review_form: ReviewForm,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

async fn fetch_both(
    client: &PublicClient,
    product_id: i64,
) -> (Result<Product, ClientError>, Result<Vec<Review>, ClientError>) {
    // Independent requests; either may complete first
    futures::join!(client.product(product_id), client.product_reviews(product_id))
}

impl ProductDetailView {
    pub fn new(auth: AuthContext, product_id: i64) -> Self {
        let scope = ViewScope::new();
        let review_form = ReviewForm::with_scope(auth.clone(), product_id, scope.child());
        Self {
            auth,
            scope,
            product_id,
            product: None,
            reviews: Vec::new(),
            review_form,
            loading: false,
            error: None,
            notice: None,
        }
    }

    /// Fetch the product and its reviews.
    ///
    /// A missing product sends the user home; failed reviews leave the list
    /// as it was.
    pub async fn load(&mut self) -> Outcome {
        self.loading = true;
        let client = self.auth.public_client().clone();

        let Some((product, reviews)) = self.scope.run(fetch_both(&client, self.product_id)).await
        else {
            self.loading = false;
            return Outcome::Discarded;
        };
        self.loading = false;

        match reviews {
            Ok(reviews) => self.reviews = reviews,
            Err(e) => error!("Error fetching reviews: {e}"),
        }

        match product {
            Ok(product) => {
                self.product = Some(product);
                Outcome::Updated
            }
            Err(e) => {
                warn!("Error fetching product {}: {e}", self.product_id);
                Outcome::Redirect(Route::Home)
            }
        }
    }

    /// Refetch after a new review; failures keep the current data
    async fn refresh(&mut self) -> Outcome {
        let client = self.auth.public_client().clone();

        let Some((product, reviews)) = self.scope.run(fetch_both(&client, self.product_id)).await
        else {
            return Outcome::Discarded;
        };

        match reviews {
            Ok(reviews) => self.reviews = reviews,
            Err(e) => error!("Error fetching reviews: {e}"),
        }
        match product {
            Ok(product) => self.product = Some(product),
            Err(e) => error!("Error fetching product: {e}"),
        }
        Outcome::Updated
    }

    /// Put one unit of the product into the cart
    pub async fn add_to_cart(&mut self) -> Outcome {
        let Some(client) = self.auth.authenticated_client() else {
            return Outcome::Redirect(Route::Auth);
        };
        let Some(product) = &self.product else {
            return Outcome::Ignored;
        };
        if !product.in_stock() {
            self.error = Some(OUT_OF_STOCK.to_string());
            return Outcome::Ignored;
        }

        let item = NewCartItem {
            product_id: product.id,
            quantity: 1,
        };

        let Some(result) = self.scope.run(client.add_cart_item(&item)).await else {
            return Outcome::Discarded;
        };

        match result {
            Ok(_) => {
                self.error = None;
                self.notice = Some(ADDED_TO_CART.to_string());
                Outcome::Updated
            }
            Err(e) => {
                error!("Error adding to cart: {e}");
                self.notice = None;
                self.error = Some(detail_or(&e, ADD_TO_CART_FAILED));
                Outcome::Failed
            }
        }
    }

    /// Submit the embedded review form, reloading the page on success
    pub async fn submit_review(&mut self) -> Outcome {
        match self.review_form.submit().await {
            Outcome::Updated => self.refresh().await,
            other => other,
        }
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn price(&self) -> Option<String> {
        self.product.as_ref().map(|p| format::price(p.price))
    }

    pub fn stock_label(&self) -> Option<String> {
        self.product.as_ref().map(|p| format::stock_label(p.stock))
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn review_list(&self) -> ReviewList<'_> {
        ReviewList::new(&self.reviews)
    }

    pub fn review_form(&self) -> &ReviewForm {
        &self.review_form
    }

    pub fn review_form_mut(&mut self) -> &mut ReviewForm {
        &mut self.review_form
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }
}
