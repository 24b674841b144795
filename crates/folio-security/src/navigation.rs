//! Page navigation requested by the guard

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum NavigationTarget {
    /// Leave for the auth provider's login page.
    Login { url: String },
    AdminPage,
    PublicPage,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, target: NavigationTarget);
}
