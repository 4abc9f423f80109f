//! Application context shared across pages.

use std::sync::Arc;

use crate::api::Backend;
use crate::dialogs::Dialogs;
use crate::session::TokenStore;

/// Collaborators shared by every page.
///
/// This struct is cheaply cloneable via `Arc`. It holds no
/// session: pages load the token from the store at mount and carry their
/// own [`Session`](crate::session::Session) from then on.
#[derive(Clone)]
pub struct AppContext {
    inner: Arc<AppContextInner>,
}

struct AppContextInner {
    backend: Arc<dyn Backend>,
    store: Arc<dyn TokenStore>,
    dialogs: Arc<dyn Dialogs>,
}

impl AppContext {
    /// Create a new application context.
    #[must_use]
    pub fn new(
        backend: Arc<dyn Backend>,
        store: Arc<dyn TokenStore>,
        dialogs: Arc<dyn Dialogs>,
    ) -> Self {
        Self {
            inner: Arc::new(AppContextInner {
                backend,
                store,
                dialogs,
            }),
        }
    }

    /// Get the backend client.
    #[must_use]
    pub fn backend(&self) -> &dyn Backend {
        self.inner.backend.as_ref()
    }

    /// Get the session token store.
    #[must_use]
    pub fn store(&self) -> &dyn TokenStore {
        self.inner.store.as_ref()
    }

    /// Get the dialog surface.
    #[must_use]
    pub fn dialogs(&self) -> &dyn Dialogs {
        self.inner.dialogs.as_ref()
    }
}
