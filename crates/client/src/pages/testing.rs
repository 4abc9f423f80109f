//! In-memory collaborators for page controller tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cardshop_core::{Card, CardId, Credentials, NewCard, SessionToken, SignupForm};
use secrecy::ExposeSecret;

use crate::api::{ApiError, Backend};
use crate::dialogs::{CardFormInput, Confirm, Dialogs, Notice};
use crate::session::{MemoryTokenStore, Session};
use crate::state::AppContext;

pub(crate) fn context(
    backend: &Arc<FakeBackend>,
    store: &Arc<MemoryTokenStore>,
    dialogs: &Arc<ScriptedDialogs>,
) -> AppContext {
    AppContext::new(backend.clone(), store.clone(), dialogs.clone())
}

// =============================================================================
// FakeBackend
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    Signup,
    Login,
    ListCards,
    AddCard,
    CartCards,
    AddToCart,
    RemoveFromCart,
    Checkout,
}

#[derive(Default)]
struct FakeState {
    catalog: Vec<Card>,
    cart: Vec<CardId>,
    accounts: Vec<(String, String)>,
    calls: HashMap<Op, usize>,
    failures: HashMap<Op, u16>,
    last_token: Option<String>,
    issued: usize,
}

/// A backend that behaves like the real one, minus the network.
#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<FakeState>,
    delay: Option<Duration>,
}

impl FakeBackend {
    pub(crate) fn with_catalog(catalog: Vec<Card>) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().catalog = catalog;
        backend
    }

    /// Make every call take `delay` before answering.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn put_in_cart(&self, id: &CardId) {
        self.state.lock().unwrap().cart.push(id.clone());
    }

    pub(crate) fn register(&self, email: &str, password: &str) {
        self.state
            .lock()
            .unwrap()
            .accounts
            .push((email.to_owned(), password.to_owned()));
    }

    /// Make every subsequent call of `op` fail with `status`.
    pub(crate) fn fail(&self, op: Op, status: u16) {
        self.state.lock().unwrap().failures.insert(op, status);
    }

    pub(crate) fn calls(&self, op: Op) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(&op)
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.values().sum()
    }

    pub(crate) fn last_token(&self) -> Option<String> {
        self.state.lock().unwrap().last_token.clone()
    }

    pub(crate) fn catalog(&self) -> Vec<Card> {
        self.state.lock().unwrap().catalog.clone()
    }

    async fn begin(&self, op: Op, session: Option<&Session>) -> Result<(), ApiError> {
        let failure = {
            let mut state = self.state.lock().unwrap();
            *state.calls.entry(op).or_insert(0) += 1;
            if let Some(session) = session {
                state.last_token = Some(session.token().expose().to_owned());
            }
            state.failures.get(&op).copied()
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(status) => Err(ApiError::from_status(status, "injected".to_owned())),
            None => Ok(()),
        }
    }

    fn cart_cards_now(&self) -> Vec<Card> {
        let state = self.state.lock().unwrap();
        state
            .catalog
            .iter()
            .filter(|card| state.cart.contains(&card.id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn signup(&self, form: &SignupForm) -> Result<(), ApiError> {
        self.begin(Op::Signup, None).await?;
        let mut state = self.state.lock().unwrap();
        if state.accounts.iter().any(|(email, _)| email == &form.email) {
            return Err(ApiError::Conflict("email taken".to_owned()));
        }
        state
            .accounts
            .push((form.email.clone(), form.password.expose_secret().to_owned()));
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError> {
        self.begin(Op::Login, None).await?;
        let state = self.state.lock().unwrap();
        let known = state.accounts.iter().any(|(email, password)| {
            email == &credentials.email && password == credentials.password.expose_secret()
        });
        if known {
            Ok(SessionToken::new(format!("token-{}", credentials.email)))
        } else {
            Err(ApiError::Unauthorized("bad credentials".to_owned()))
        }
    }

    async fn list_cards(&self, session: &Session) -> Result<Vec<Card>, ApiError> {
        self.begin(Op::ListCards, Some(session)).await?;
        Ok(self.catalog())
    }

    async fn add_card(&self, session: &Session, card: &NewCard) -> Result<(), ApiError> {
        self.begin(Op::AddCard, Some(session)).await?;
        let mut state = self.state.lock().unwrap();
        let id = format!("card-{}", state.catalog.len() + 1);
        state
            .catalog
            .push(Card::new(id, card.name.clone(), card.value));
        Ok(())
    }

    async fn cart_cards(&self, session: &Session) -> Result<Vec<Card>, ApiError> {
        self.begin(Op::CartCards, Some(session)).await?;
        Ok(self.cart_cards_now())
    }

    async fn add_to_cart(&self, session: &Session, card_id: &CardId) -> Result<(), ApiError> {
        self.begin(Op::AddToCart, Some(session)).await?;
        let mut state = self.state.lock().unwrap();
        let available = state
            .catalog
            .iter()
            .any(|card| &card.id == card_id && !card.sold);
        if !available {
            return Err(ApiError::NotFound("card not found".to_owned()));
        }
        if !state.cart.contains(card_id) {
            state.cart.push(card_id.clone());
        }
        Ok(())
    }

    async fn remove_from_cart(&self, session: &Session, card_id: &CardId) -> Result<(), ApiError> {
        self.begin(Op::RemoveFromCart, Some(session)).await?;
        let mut state = self.state.lock().unwrap();
        let before = state.cart.len();
        state.cart.retain(|id| id != card_id);
        if state.cart.len() == before {
            return Err(ApiError::NotFound("card not in cart".to_owned()));
        }
        Ok(())
    }

    async fn checkout(&self, session: &Session) -> Result<SessionToken, ApiError> {
        self.begin(Op::Checkout, Some(session)).await?;
        let mut state = self.state.lock().unwrap();
        if state.cart.is_empty() {
            return Err(ApiError::NotFound("cart is empty".to_owned()));
        }
        let bought = std::mem::take(&mut state.cart);
        for card in &mut state.catalog {
            if bought.contains(&card.id) {
                card.sold = true;
            }
        }
        state.issued += 1;
        Ok(SessionToken::new(format!("token-{}", state.issued)))
    }
}

// =============================================================================
// ScriptedDialogs
// =============================================================================

/// Dialogs that answer from a script and record what they were shown.
pub(crate) struct ScriptedDialogs {
    answer: bool,
    card_form: Option<CardFormInput>,
    questions: Mutex<Vec<Confirm>>,
    notices: Mutex<Vec<Notice>>,
}

impl ScriptedDialogs {
    /// Dialogs that confirm everything and cancel the card form.
    pub(crate) fn new() -> Self {
        Self {
            answer: true,
            card_form: None,
            questions: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn answering(mut self, answer: bool) -> Self {
        self.answer = answer;
        self
    }

    pub(crate) fn with_card_form(mut self, name: &str, value: &str) -> Self {
        self.card_form = Some(CardFormInput {
            name: name.to_owned(),
            value: value.to_owned(),
        });
        self
    }

    pub(crate) fn questions(&self) -> Vec<Confirm> {
        self.questions.lock().unwrap().clone()
    }

    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, question: &Confirm) -> bool {
        self.questions.lock().unwrap().push(question.clone());
        self.answer
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    fn card_form(&self) -> Option<CardFormInput> {
        self.card_form.clone()
    }
}
