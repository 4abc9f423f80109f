//! Integration tests for Cardshop.
//!
//! The client is driven against an `httpmock` server standing in for the
//! backend, so every test asserts the exact requests a page sends: paths,
//! bearer header, JSON bodies and how many times each endpoint was hit.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cardshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_sync` - Page mount, session guard, catalog and cart loading
//! - `cart_actions` - Add, remove and card authoring from the menu
//! - `checkout` - Bag page and token rotation
//! - `auth_flow` - Login, signup and logout

use std::sync::{Arc, Mutex};

use cardshop_client::AppContext;
use cardshop_client::api::HttpBackend;
use cardshop_client::dialogs::{CardFormInput, Confirm, Dialogs, Notice};
use cardshop_client::session::MemoryTokenStore;
use httpmock::MockServer;
use url::Url;

/// A client wired to a fresh mock backend.
pub struct TestContext {
    pub server: MockServer,
    pub store: Arc<MemoryTokenStore>,
    pub dialogs: Arc<RecordingDialogs>,
    pub app: AppContext,
}

impl TestContext {
    /// No session stored.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryTokenStore::new(), RecordingDialogs::new())
    }

    /// A session with `token` already stored.
    #[must_use]
    pub fn logged_in(token: &str) -> Self {
        Self::with_store(MemoryTokenStore::with_token(token), RecordingDialogs::new())
    }

    /// Like [`TestContext::logged_in`] with custom dialog answers.
    #[must_use]
    pub fn logged_in_with(token: &str, dialogs: RecordingDialogs) -> Self {
        Self::with_store(MemoryTokenStore::with_token(token), dialogs)
    }

    fn with_store(store: MemoryTokenStore, dialogs: RecordingDialogs) -> Self {
        let server = MockServer::start();
        let base_url = Url::parse(&server.base_url()).expect("mock server URL");
        let backend = HttpBackend::with_base_url(base_url).expect("HTTP client");
        let store = Arc::new(store);
        let dialogs = Arc::new(dialogs);
        let app = AppContext::new(Arc::new(backend), store.clone(), dialogs.clone());
        Self {
            server,
            store,
            dialogs,
            app,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Dialogs with fixed answers that record every notice shown.
pub struct RecordingDialogs {
    answer: bool,
    card_form: Option<CardFormInput>,
    questions: Mutex<Vec<Confirm>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingDialogs {
    /// Confirms everything, cancels the card form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            answer: true,
            card_form: None,
            questions: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn answering(mut self, answer: bool) -> Self {
        self.answer = answer;
        self
    }

    #[must_use]
    pub fn with_card_form(mut self, name: &str, value: &str) -> Self {
        self.card_form = Some(CardFormInput {
            name: name.to_owned(),
            value: value.to_owned(),
        });
        self
    }

    /// Questions asked so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous test thread panicked while recording.
    #[must_use]
    pub fn questions(&self) -> Vec<Confirm> {
        self.questions.lock().expect("dialog lock").clone()
    }

    /// Notices shown so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous test thread panicked while recording.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("dialog lock").clone()
    }
}

impl Default for RecordingDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialogs for RecordingDialogs {
    fn confirm(&self, question: &Confirm) -> bool {
        self.questions
            .lock()
            .expect("dialog lock")
            .push(question.clone());
        self.answer
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("dialog lock").push(notice);
    }

    fn card_form(&self) -> Option<CardFormInput> {
        self.card_form.clone()
    }
}
