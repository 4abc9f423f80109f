//! Page controllers.
//!
//! # Synchronization model
//!
//! - A page mounts only if a session token is stored; otherwise it redirects
//!   to [`Route::Entry`] without touching the network
//! - Local collections are snapshots, replaced wholesale after a successful
//!   fetch and left untouched when a fetch fails
//! - Every successful mutation is followed by a refetch of the collections
//!   it may have changed; nothing is patched locally
//! - Membership (`is_in_cart`) is derived from the current cart snapshot on
//!   every call
//! - Backend errors end the action: the user is notified, details are
//!   logged, nothing is retried
//!
//! # Pages
//!
//! - [`MenuPage`] - catalog plus cart, add/remove and card authoring
//! - [`BagPage`] - cart contents, remove and checkout
//! - [`auth`] - login, signup and logout flows

pub mod auth;
mod bag;
mod menu;
mod scope;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use bag::BagPage;
pub use menu::MenuPage;
pub use scope::{LeaveHandle, PageScope};
pub use view::{CartView, CatalogView, Listing};

use crate::api::ApiError;
use crate::dialogs::Notice;
use crate::error::report_unexpected;
use crate::routes::Route;
use crate::session::Session;
use crate::state::AppContext;

/// Result of mounting an authenticated page.
#[derive(Debug)]
pub enum Mount<P> {
    /// The page is loaded and ready to render.
    Ready(P),
    /// No session: go here instead. No request was made.
    Redirect(Route),
}

impl<P> Mount<P> {
    /// The mounted page, if it did not redirect.
    #[must_use]
    pub fn ready(self) -> Option<P> {
        match self {
            Self::Ready(page) => Some(page),
            Self::Redirect(_) => None,
        }
    }
}

/// How a user action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend accepted the change and the page was refreshed.
    Completed,
    /// The user answered "no" or cancelled a form.
    Declined,
    /// Rejected locally before any request was sent.
    Rejected,
    /// The backend call failed; local state is unchanged.
    Failed,
}

/// Session guard run at the start of every authenticated page mount.
///
/// Returns `None` when no token is stored.
fn guard(ctx: &AppContext) -> crate::error::Result<Option<Session>> {
    let token = ctx.store().load()?;
    if token.is_none() {
        tracing::debug!("No session token stored, redirecting to entry");
    }
    Ok(token.map(Session::new))
}

/// Turn a backend result into a value, notifying the user on failure.
///
/// A not-found error shows `on_not_found` when given; any other failure is
/// reported as unexpected.
fn settle<T>(
    ctx: &AppContext,
    action: &str,
    result: Result<T, ApiError>,
    on_not_found: Option<Notice>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            match on_not_found {
                Some(notice) if e.is_not_found() => {
                    tracing::info!(action, error = %e, "Backend reported resource missing");
                    ctx.dialogs().notify(notice);
                }
                _ => {
                    report_unexpected(action, &e);
                    ctx.dialogs().notify(Notice::Unexpected);
                }
            }
            None
        }
    }
}
