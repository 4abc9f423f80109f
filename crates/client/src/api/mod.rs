//! Marketplace backend API.
//!
//! # Architecture
//!
//! - [`Backend`] is the seam between page controllers and the network; pages
//!   only ever talk to `Arc<dyn Backend>`
//! - [`HttpBackend`] is the `reqwest` implementation used in production
//! - The backend is the source of truth - NO local caching, every read is a
//!   full fetch
//!
//! # Endpoints
//!
//! | Operation        | Request                                  |
//! |------------------|------------------------------------------|
//! | Signup           | `POST /user/signup`                      |
//! | Login            | `POST /user/login`                       |
//! | List catalog     | `GET /card/cards`                        |
//! | Create card      | `POST /card/add-card`                    |
//! | Get cart         | `GET /cart/get-cards-on-cart`            |
//! | Add to cart      | `POST /cart/add-to-cart`                 |
//! | Remove from cart | `DELETE /cart/remove-from-cart`          |
//! | Checkout         | `POST /cart/checkout`                    |
//!
//! Every call except signup and login carries `Authorization: Bearer <token>`.

mod http;
pub mod types;

pub use http::HttpBackend;

use async_trait::async_trait;
use cardshop_core::{Card, CardId, Credentials, NewCard, SessionToken, SignupForm};
use thiserror::Error;

use crate::session::Session;

/// Errors that can occur when interacting with the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The referenced card or cart does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected the credentials or the session token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request conflicts with existing state (e.g. duplicate account).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured base URL cannot be extended with an endpoint path.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Whether the backend reported the referenced resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Build an error from a non-success status and its response body.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Api { status, message },
        }
    }
}

/// Operations offered by the marketplace backend.
///
/// Implementations must not cache: page controllers rely on every call
/// reflecting the backend's current state.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Register a new account.
    async fn signup(&self, form: &SignupForm) -> Result<(), ApiError>;

    /// Exchange credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError>;

    /// Fetch the full catalog, sold cards included.
    async fn list_cards(&self, session: &Session) -> Result<Vec<Card>, ApiError>;

    /// Create a new card in the catalog.
    async fn add_card(&self, session: &Session, card: &NewCard) -> Result<(), ApiError>;

    /// Fetch the cards currently in the session's cart.
    async fn cart_cards(&self, session: &Session) -> Result<Vec<Card>, ApiError>;

    /// Reserve a card in the session's cart.
    async fn add_to_cart(&self, session: &Session, card_id: &CardId) -> Result<(), ApiError>;

    /// Release a card from the session's cart.
    async fn remove_from_cart(&self, session: &Session, card_id: &CardId) -> Result<(), ApiError>;

    /// Buy everything in the cart. Returns the replacement session token.
    async fn checkout(&self, session: &Session) -> Result<SessionToken, ApiError>;
}
