//! Review endpoints that act on behalf of the user

use super::{AuthenticatedClient, error::ClientError};
use crate::types::{MessageResponse, NewReview, Review, ReviewUpdate, UserReview};
use reqwest::Method;

impl AuthenticatedClient {
    /// Reviews written by the current user
    pub async fn my_reviews(&self) -> Result<Vec<UserReview>, ClientError> {
        let request = self.request(Method::GET, "/reviews/user/me");
        self.execute(request).await
    }

    /// Publish a review. The trailing slash is part of the route.
    pub async fn create_review(&self, review: &NewReview) -> Result<Review, ClientError> {
        let request = self.request(Method::POST, "/reviews/").json(review);
        self.execute(request).await
    }

    pub async fn update_review(
        &self,
        review_id: i64,
        update: &ReviewUpdate,
    ) -> Result<Review, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/reviews/{review_id}"))
            .json(update);
        self.execute(request).await
    }

    pub async fn delete_review(&self, review_id: i64) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::DELETE, &format!("/reviews/{review_id}"));
        self.execute(request).await
    }
}
