//! Authentication endpoints

use super::{AuthenticatedClient, PublicClient, error::ClientError};
use crate::types::{LoginForm, RegisterRequest, Token, User};
use reqwest::Method;

/// Authentication endpoints for public client
impl PublicClient {
    /// Create an account (`POST /auth/register`)
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        let req = self.request(Method::POST, "/auth/register").json(request);
        self.execute(req).await
    }

    /// Exchange credentials for a bearer token (`POST /auth/login`).
    ///
    /// Sent as a form body; the e-mail goes in the `username` field.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, ClientError> {
        let req = self.request(Method::POST, "/auth/login").form(&LoginForm {
            username: email,
            password,
        });
        self.execute(req).await
    }
}

/// Authentication endpoints for authenticated client
impl AuthenticatedClient {
    /// Get current user info (`GET /users/me`)
    pub async fn me(&self) -> Result<User, ClientError> {
        let request = self.request(Method::GET, "/users/me");
        self.execute(request).await
    }
}
