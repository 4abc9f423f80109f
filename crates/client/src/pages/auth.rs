//! Login, signup and logout flows.
//!
//! These run outside any page scope: each is a single request (or none) and
//! hands back the route to show next.

use cardshop_core::{Credentials, SignupForm};
use tracing::instrument;

use crate::api::ApiError;
use crate::dialogs::Notice;
use crate::error::{Result, add_breadcrumb, report_unexpected};
use crate::routes::Route;
use crate::state::AppContext;

/// Exchange credentials for a session token and store it.
///
/// Returns the route to go to, or `None` to stay on the login page.
///
/// # Errors
///
/// Returns [`PageError::Store`](crate::error::PageError::Store) if the token
/// could not be persisted.
#[instrument(skip_all)]
pub async fn login(ctx: &AppContext, credentials: &Credentials) -> Result<Option<Route>> {
    add_breadcrumb("auth", "Login", None);

    match ctx.backend().login(credentials).await {
        Ok(token) => {
            ctx.store().save(&token)?;
            tracing::info!("Logged in");
            ctx.dialogs().notify(Notice::LoggedIn);
            Ok(Some(Route::Menu))
        }
        Err(ApiError::Unauthorized(_) | ApiError::NotFound(_)) => {
            tracing::info!("Login rejected");
            ctx.dialogs().notify(Notice::InvalidCredentials);
            Ok(None)
        }
        Err(e) => {
            report_unexpected("login", &e);
            ctx.dialogs().notify(Notice::Unexpected);
            Ok(None)
        }
    }
}

/// Register a new account.
///
/// A password mismatch is caught locally and no request is sent. On success
/// the user is sent to the login page; no session is created.
#[instrument(skip_all)]
pub async fn signup(ctx: &AppContext, form: &SignupForm) -> Option<Route> {
    add_breadcrumb("auth", "Signup", None);

    if form.validate().is_err() {
        ctx.dialogs().notify(Notice::PasswordMismatch);
        return None;
    }

    match ctx.backend().signup(form).await {
        Ok(()) => {
            tracing::info!("Account created");
            ctx.dialogs().notify(Notice::AccountCreated);
            Some(Route::Login)
        }
        Err(ApiError::Conflict(_)) => {
            ctx.dialogs().notify(Notice::AccountExists);
            None
        }
        Err(e) => {
            report_unexpected("signup", &e);
            ctx.dialogs().notify(Notice::Unexpected);
            None
        }
    }
}

/// Forget the stored token.
///
/// # Errors
///
/// Returns [`PageError::Store`](crate::error::PageError::Store) if the token
/// could not be removed.
pub fn logout(ctx: &AppContext) -> Result<Route> {
    add_breadcrumb("auth", "Logout", None);
    ctx.store().clear()?;
    tracing::info!("Logged out");
    ctx.dialogs().notify(Notice::LoggedOut);
    Ok(Route::Entry)
}
