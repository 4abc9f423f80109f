//! `reqwest` implementation of [`Backend`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cardshop_core::{Card, CardId, Credentials, NewCard, SessionToken, SignupForm};
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::types::{
    AddCardRequest, CardIdRequest, CartResponse, CheckoutResponse, LoginRequest, LoginResponse,
    SignupRequest,
};
use super::{ApiError, Backend};
use crate::config::ClientConfig;
use crate::session::Session;

const SIGNUP_PATH: &str = "user/signup";
const LOGIN_PATH: &str = "user/login";
const CARDS_PATH: &str = "card/cards";
const ADD_CARD_PATH: &str = "card/add-card";
const CART_PATH: &str = "cart/get-cards-on-cart";
const ADD_TO_CART_PATH: &str = "cart/add-to-cart";
const REMOVE_FROM_CART_PATH: &str = "cart/remove-from-cart";
const CHECKOUT_PATH: &str = "cart/checkout";

/// Characters of a response body kept in log lines.
const LOG_BODY_LIMIT: usize = 500;
/// Characters of a response body kept in error messages.
const ERROR_BODY_LIMIT: usize = 200;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// HttpBackend
// =============================================================================

/// HTTP client for the marketplace backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpBackend {
    inner: Arc<HttpBackendInner>,
}

struct HttpBackendInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::build(config.api_url.clone(), config.http_timeout)
    }

    /// Create a backend client for `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_base_url(base_url: Url) -> Result<Self, ApiError> {
        Self::build(base_url, DEFAULT_TIMEOUT)
    }

    fn build(mut base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        // Endpoint paths are joined relative to the base, which requires a trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(HttpBackendInner { client, base_url }),
        })
    }

    /// The base URL endpoint paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        let url = self.inner.base_url.join(path)?;
        Ok(self.inner.client.request(method, url))
    }

    fn authorized(
        &self,
        method: Method,
        path: &str,
        session: &Session,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(self
            .request(method, path)?
            .header(AUTHORIZATION, session.token().bearer()))
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %truncate(&body, LOG_BODY_LIMIT),
                "Backend returned non-success status"
            );
            return Err(ApiError::from_status(
                status.as_u16(),
                truncate(&body, ERROR_BODY_LIMIT),
            ));
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body, LOG_BODY_LIMIT),
                "Failed to parse backend response"
            );
            ApiError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip_all)]
    async fn signup(&self, form: &SignupForm) -> Result<(), ApiError> {
        let body = SignupRequest {
            name: &form.name,
            email: &form.email,
            password: form.password.expose_secret(),
        };
        self.send(self.request(Method::POST, SIGNUP_PATH)?.json(&body))
            .await?;
        debug!("Account created");
        Ok(())
    }

    #[instrument(skip_all)]
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError> {
        let body = LoginRequest {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };
        let response: LoginResponse = self
            .send_json(self.request(Method::POST, LOGIN_PATH)?.json(&body))
            .await?;
        Ok(SessionToken::new(response.token))
    }

    #[instrument(skip_all)]
    async fn list_cards(&self, session: &Session) -> Result<Vec<Card>, ApiError> {
        let cards: Vec<Card> = self
            .send_json(self.authorized(Method::GET, CARDS_PATH, session)?)
            .await?;
        debug!(count = cards.len(), "Fetched catalog");
        Ok(cards)
    }

    #[instrument(skip_all)]
    async fn add_card(&self, session: &Session, card: &NewCard) -> Result<(), ApiError> {
        let body = AddCardRequest {
            name: &card.name,
            value: card.value,
        };
        self.send(
            self.authorized(Method::POST, ADD_CARD_PATH, session)?
                .json(&body),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn cart_cards(&self, session: &Session) -> Result<Vec<Card>, ApiError> {
        let cart: CartResponse = self
            .send_json(self.authorized(Method::GET, CART_PATH, session)?)
            .await?;
        debug!(count = cart.cards.len(), "Fetched cart");
        Ok(cart.cards)
    }

    #[instrument(skip(self, session), fields(card_id = %card_id))]
    async fn add_to_cart(&self, session: &Session, card_id: &CardId) -> Result<(), ApiError> {
        self.send(
            self.authorized(Method::POST, ADD_TO_CART_PATH, session)?
                .json(&CardIdRequest { card_id }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self, session), fields(card_id = %card_id))]
    async fn remove_from_cart(&self, session: &Session, card_id: &CardId) -> Result<(), ApiError> {
        // The card id travels in the body of the DELETE, not in the path
        self.send(
            self.authorized(Method::DELETE, REMOVE_FROM_CART_PATH, session)?
                .json(&CardIdRequest { card_id }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn checkout(&self, session: &Session) -> Result<SessionToken, ApiError> {
        let response: CheckoutResponse = self
            .send_json(
                self.authorized(Method::POST, CHECKOUT_PATH, session)?
                    .json(&serde_json::json!({})),
            )
            .await?;
        Ok(SessionToken::new(response.new_token))
    }
}

fn truncate(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}
