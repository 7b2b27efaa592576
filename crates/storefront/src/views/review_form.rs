//! Form for reviewing a product

use super::{Outcome, Route};
use crate::auth::AuthContext;
use crate::auth::error_messages::detail_or_transport;
use crate::scope::ViewScope;
use serde::{Deserialize, Serialize};
use std::fmt;
use techhub_http::types::NewReview;
use tracing::error;

pub const RATING_REQUIRED: &str = "Пожалуйста, поставьте оценку";
pub const COMMENT_REQUIRED: &str = "Пожалуйста, напишите комментарий";
pub const SUBMITTED: &str = "Отзыв успешно добавлен!";
pub const SUBMIT_FAILED: &str = "Ошибка при добавлении отзыва";
pub const SEND_FAILED: &str = "Ошибка при отправке отзыва";
pub const LOGIN_PROMPT: &str = "Войдите в аккаунт, чтобы оставить отзыв";

/// Star rating from 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating must be between 1 and 5, got {value}"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct ReviewForm {
    auth: AuthContext,
    scope: ViewScope,
    product_id: i64,
    rating: Option<Rating>,
    comment: String,
    error: Option<String>,
    notice: Option<String>,
    submitting: bool,
}

impl ReviewForm {
    pub fn new(auth: AuthContext, product_id: i64) -> Self {
        Self::with_scope(auth, product_id, ViewScope::new())
    }

    /// Form living inside another view, sharing that view's lifetime
    pub fn with_scope(auth: AuthContext, product_id: i64, scope: ViewScope) -> Self {
        Self {
            auth,
            scope,
            product_id,
            rating: None,
            comment: String::new(),
            error: None,
            notice: None,
            submitting: false,
        }
    }

    /// Whether the form is offered at all; otherwise [`LOGIN_PROMPT`] is shown
    pub fn is_available(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) {
        self.rating = rating;
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Validate and publish the review.
    ///
    /// Returns [`Outcome::Updated`] after a successful submission so the
    /// owner can reload the product and its reviews.
    pub async fn submit(&mut self) -> Outcome {
        if self.scope.is_closed() {
            return Outcome::Discarded;
        }
        if !self.is_available() {
            return Outcome::Redirect(Route::Auth);
        }
        let Some(client) = self.auth.authenticated_client() else {
            return Outcome::Redirect(Route::Auth);
        };

        let Some(rating) = self.rating else {
            self.error = Some(RATING_REQUIRED.to_string());
            return Outcome::Ignored;
        };

        let comment = self.comment.trim();
        if comment.is_empty() {
            self.error = Some(COMMENT_REQUIRED.to_string());
            return Outcome::Ignored;
        }

        let review = NewReview {
            product_id: self.product_id,
            rating: rating.get(),
            comment: comment.to_string(),
        };

        self.submitting = true;
        self.error = None;
        self.notice = None;

        let Some(result) = self.scope.run(client.create_review(&review)).await else {
            self.submitting = false;
            return Outcome::Discarded;
        };
        self.submitting = false;

        match result {
            Ok(_) => {
                self.notice = Some(SUBMITTED.to_string());
                self.rating = None;
                self.comment.clear();
                Outcome::Updated
            }
            Err(e) => {
                error!("Error submitting review: {e}");
                self.error = Some(detail_or_transport(&e, SUBMIT_FAILED, SEND_FAILED));
                Outcome::Failed
            }
        }
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
