//! Account page: profile card and the user's own reviews

use super::{Outcome, Rating, Route};
use crate::auth::AuthContext;
use crate::auth::error_messages::detail_or;
use crate::scope::{ScopeHandle, ViewScope};
use techhub_http::AuthenticatedClient;
use techhub_http::types::{ReviewUpdate, User, UserReview};
use tracing::{error, warn};

pub const FIELDS_REQUIRED: &str = "Пожалуйста, заполните все поля";
pub const UPDATED: &str = "Отзыв успешно обновлен!";
pub const UPDATE_FAILED: &str = "Ошибка при обновлении отзыва";
pub const DELETED: &str = "Отзыв успешно удален!";
pub const DELETE_FAILED: &str = "Ошибка при удалении отзыва";
pub const NO_REVIEWS: &str = "У вас пока нет отзывов. Оставьте свой первый отзыв!";

/// Draft of an edit to one of the user's reviews
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEditor {
    pub review_id: i64,
    pub rating: Option<Rating>,
    pub comment: String,
}

pub struct ProfileView {
    auth: AuthContext,
    scope: ViewScope,
    reviews: Vec<UserReview>,
    editor: Option<ReviewEditor>,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl ProfileView {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            scope: ViewScope::new(),
            reviews: Vec::new(),
            editor: None,
            loading: false,
            error: None,
            notice: None,
        }
    }

    /// Load the profile (if not yet known) and the user's reviews
    pub async fn load(&mut self) -> Outcome {
        if !self.auth.is_authenticated() {
            return Outcome::Redirect(Route::Auth);
        }
        let Some(client) = self.auth.authenticated_client() else {
            return Outcome::Redirect(Route::Auth);
        };

        self.loading = true;
        if self.auth.user().is_none() {
            let auth = self.auth.clone();
            match self.scope.run(auth.refresh_user()).await {
                None => {
                    self.loading = false;
                    return Outcome::Discarded;
                }
                Some(Err(e)) => warn!("Error fetching user: {e}"),
                Some(Ok(_)) => {}
            }
        }

        self.fetch_reviews(&client).await
    }

    async fn fetch_reviews(&mut self, client: &AuthenticatedClient) -> Outcome {
        let Some(result) = self.scope.run(client.my_reviews()).await else {
            self.loading = false;
            return Outcome::Discarded;
        };
        self.loading = false;

        match result {
            Ok(reviews) => {
                self.reviews = reviews;
                Outcome::Updated
            }
            Err(e) => {
                error!("Error fetching user reviews: {e}");
                Outcome::Failed
            }
        }
    }

    /// Open the editor on one of the listed reviews
    pub fn begin_edit(&mut self, review_id: i64) -> bool {
        let Some(review) = self.reviews.iter().find(|r| r.id == review_id) else {
            return false;
        };

        self.editor = Some(ReviewEditor {
            review_id,
            rating: Rating::new(review.rating),
            comment: review.comment.clone(),
        });
        self.error = None;
        self.notice = None;
        true
    }

    pub fn set_edit_rating(&mut self, rating: Option<Rating>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.rating = rating;
        }
    }

    pub fn set_edit_comment(&mut self, comment: impl Into<String>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.comment = comment.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Save the open edit, then refetch the review list
    pub async fn submit_edit(&mut self) -> Outcome {
        let Some((review_id, update)) = self.editor.as_ref().and_then(|editor| {
            let rating = editor.rating?;
            let comment = editor.comment.trim();
            (!comment.is_empty()).then(|| {
                (
                    editor.review_id,
                    ReviewUpdate {
                        rating: rating.get(),
                        comment: comment.to_string(),
                    },
                )
            })
        }) else {
            self.error = Some(FIELDS_REQUIRED.to_string());
            return Outcome::Ignored;
        };

        let Some(client) = self.auth.authenticated_client() else {
            return Outcome::Redirect(Route::Auth);
        };

        let Some(result) = self.scope.run(client.update_review(review_id, &update)).await else {
            return Outcome::Discarded;
        };

        match result {
            Ok(_) => {
                self.error = None;
                self.notice = Some(UPDATED.to_string());
                self.editor = None;
                self.fetch_reviews(&client).await;
                Outcome::Updated
            }
            Err(e) => {
                error!("Error updating review: {e}");
                self.error = Some(detail_or(&e, UPDATE_FAILED));
                Outcome::Failed
            }
        }
    }

    /// Delete a review, then refetch the list. Confirmation is the caller's job.
    pub async fn delete_review(&mut self, review_id: i64) -> Outcome {
        let Some(client) = self.auth.authenticated_client() else {
            return Outcome::Redirect(Route::Auth);
        };

        let Some(result) = self.scope.run(client.delete_review(review_id)).await else {
            return Outcome::Discarded;
        };

        match result {
            Ok(_) => {
                self.error = None;
                self.notice = Some(DELETED.to_string());
                self.fetch_reviews(&client).await;
                Outcome::Updated
            }
            Err(e) => {
                error!("Error deleting review: {e}");
                self.error = Some(detail_or(&e, DELETE_FAILED));
                Outcome::Failed
            }
        }
    }

    pub fn user(&self) -> Option<User> {
        self.auth.user()
    }

    pub fn reviews(&self) -> &[UserReview] {
        &self.reviews
    }

    /// `Мои отзывы (n)`
    pub fn reviews_heading(&self) -> String {
        format!("Мои отзывы ({})", self.reviews.len())
    }

    pub fn editor(&self) -> Option<&ReviewEditor> {
        self.editor.as_ref()
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
