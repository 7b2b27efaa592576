//! Top navigation bar

use super::{Outcome, Route};
use crate::auth::AuthContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub route: Route,
}

impl NavLink {
    fn new(label: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            route,
        }
    }
}

pub struct Navbar {
    auth: AuthContext,
}

impl Navbar {
    pub fn new(auth: AuthContext) -> Self {
        Self { auth }
    }

    /// Links for the current session state.
    ///
    /// Signed-in users see their username (or "Профиль" while the profile
    /// is unknown) instead of the sign-in link.
    pub fn links(&self) -> Vec<NavLink> {
        let mut links = vec![
            NavLink::new("Главная", Route::Home),
            NavLink::new("Категории", Route::Products),
            NavLink::new("Корзина", Route::Cart),
        ];

        if self.auth.is_authenticated() {
            let label = self
                .auth
                .user()
                .map_or_else(|| "Профиль".to_string(), |user| user.username);
            links.push(NavLink::new(label, Route::Profile));
        } else {
            links.push(NavLink::new("Войти", Route::Auth));
        }

        links
    }

    pub fn can_logout(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn logout(&self) -> Outcome {
        self.auth.logout();
        Outcome::Redirect(Route::Home)
    }
}
