//! View routing
//!
//! Decides which screen renders for a requested view given who is signed in.

use serde::{Deserialize, Serialize};

use market_core::entities::User;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Auth,
    Buy,
    Sell,
    Admin,
    Chat,
}

impl View {
    /// Whether the view needs a signed-in user
    pub fn requires_session(self) -> bool {
        matches!(self, Self::Sell | Self::Admin | Self::Chat)
    }
}

/// Tracks the requested view and resolves what actually renders
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    requested: View,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// What renders when `requested` is asked for
    ///
    /// Anonymous users are sent to sign in for protected views; signed-in
    /// users without the admin role are sent home from the admin view.
    pub fn resolve(requested: View, user: Option<&User>) -> View {
        match user {
            None if requested.requires_session() => View::Auth,
            Some(user) if requested == View::Admin && !user.is_admin() => View::Home,
            _ => requested,
        }
    }

    pub fn navigate(&mut self, view: View) {
        tracing::debug!(?view, "Navigate");
        self.requested = view;
    }

    pub fn requested(&self) -> View {
        self.requested
    }

    /// The view to render right now
    pub fn current(&self, user: Option<&User>) -> View {
        Self::resolve(self.requested, user)
    }

    /// Return home once sign-in completes
    pub fn after_auth(&mut self) -> View {
        self.requested = View::Home;
        self.requested
    }
}
