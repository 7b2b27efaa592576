//! Sign-up and sign-in screen

use super::{Outcome, Route};
use crate::auth::AuthContext;
use crate::auth::error_messages::detail_or;
use crate::scope::ViewScope;
use techhub_http::types::RegisterRequest;
use tracing::{error, info};

pub const REGISTER_FAILED: &str = "Ошибка при регистрации";
pub const LOGIN_FAILED: &str = "Ошибка при входе";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Register,
    Login,
}

#[derive(Debug, Clone, Default)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

pub struct AuthView {
    auth: AuthContext,
    scope: ViewScope,
    tab: AuthTab,
    register_form: RegisterRequest,
    login_form: LoginCredentials,
    error: Option<String>,
}

impl AuthView {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            scope: ViewScope::new(),
            tab: AuthTab::default(),
            register_form: RegisterRequest::default(),
            login_form: LoginCredentials::default(),
            error: None,
        }
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    /// Switch tabs, dropping any error shown for the previous one
    pub fn set_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
        self.error = None;
    }

    pub fn register_form_mut(&mut self) -> &mut RegisterRequest {
        &mut self.register_form
    }

    pub fn login_form_mut(&mut self) -> &mut LoginCredentials {
        &mut self.login_form
    }

    /// Create the account; on success the login tab is shown
    pub async fn register(&mut self) -> Outcome {
        let client = self.auth.public_client().clone();

        let Some(result) = self.scope.run(client.register(&self.register_form)).await else {
            return Outcome::Discarded;
        };

        match result {
            Ok(user) => {
                info!(user_id = user.id, "Registered new account");
                self.tab = AuthTab::Login;
                self.error = None;
                Outcome::Updated
            }
            Err(e) => {
                error!("Registration error: {e}");
                self.error = Some(detail_or(&e, REGISTER_FAILED));
                Outcome::Failed
            }
        }
    }

    /// Sign in, store the token and go home
    pub async fn login(&mut self) -> Outcome {
        let client = self.auth.public_client().clone();
        let form = &self.login_form;

        let Some(result) = self
            .scope
            .run(client.login(&form.email, &form.password))
            .await
        else {
            return Outcome::Discarded;
        };

        match result {
            Ok(token) => {
                self.auth.login(&token.access_token);
                self.error = None;
                Outcome::Redirect(Route::Home)
            }
            Err(e) => {
                error!("Login error: {e}");
                self.error = Some(detail_or(&e, LOGIN_FAILED));
                Outcome::Failed
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
