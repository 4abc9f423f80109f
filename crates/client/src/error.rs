//! Page-level errors and diagnostic reporting with Sentry integration.
//!
//! Backend failures do not surface as `Err` from page actions: the action
//! catches them, notifies the user and leaves local state untouched. Only
//! conditions the frontend itself must react to are returned as
//! [`PageError`].

use thiserror::Error;

use crate::session::StoreError;

/// Errors a page controller hands back to the frontend.
#[derive(Debug, Error)]
pub enum PageError {
    /// The page was left while a request was in flight. Nothing was committed.
    #[error("page was left before the request settled")]
    Cancelled,

    /// The session token could not be read or written.
    #[error("Token store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for `PageError`.
pub type Result<T> = std::result::Result<T, PageError>;

/// Record an unexpected failure with enough detail to debug it later.
///
/// Logs at error level and captures the error to Sentry (a no-op when
/// Sentry is not initialized).
pub fn report_unexpected<E>(action: &str, error: &E)
where
    E: std::error::Error + ?Sized,
{
    let event_id = sentry::capture_error(error);
    tracing::error!(
        action,
        error = %error,
        sentry_event_id = %event_id,
        "Unexpected failure"
    );
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Add to cart", Some(&[("card_id", "64f1c0ffee")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
