//! Navigation targets.
//!
//! Page controllers return the [`Route`] to go to next instead of navigating
//! themselves; the frontend decides how to get there.

use core::fmt;

/// Pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page, shown to unauthenticated users.
    Entry,
    Login,
    Signup,
    /// Catalog of available cards.
    Menu,
    /// Cart contents ("bag").
    Bag,
}

impl Route {
    /// Whether the page requires a stored session token.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::Menu | Self::Bag)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Login => write!(f, "login"),
            Self::Signup => write!(f, "signup"),
            Self::Menu => write!(f, "menu"),
            Self::Bag => write!(f, "bag"),
        }
    }
}
