//! Cancellation scope of a page activation.
//!
//! Every mounted page owns a [`PageScope`]. Leaving the page (explicitly
//! through a [`LeaveHandle`], or by dropping the page) cancels the scope:
//! the request in flight is abandoned and its response is never committed
//! to page state.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{PageError, Result};

/// Cancellation scope owned by one page activation.
#[derive(Debug, Default)]
pub struct PageScope {
    cancel: CancellationToken,
}

/// Cloneable handle that leaves the page it was taken from.
#[derive(Debug, Clone)]
pub struct LeaveHandle {
    cancel: CancellationToken,
}

impl PageScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle other tasks can use to leave this page.
    #[must_use]
    pub fn leave_handle(&self) -> LeaveHandle {
        LeaveHandle {
            cancel: self.cancel.clone(),
        }
    }

    /// Drive `fut` to completion unless the page is left first.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`] if the page was left before or while
    /// `fut` ran. The output of a future that finished after the page was
    /// left is discarded.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(PageError::Cancelled),
            output = fut => {
                if self.cancel.is_cancelled() {
                    Err(PageError::Cancelled)
                } else {
                    Ok(output)
                }
            }
        }
    }
}

impl Drop for PageScope {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl LeaveHandle {
    /// Leave the page. Idempotent.
    pub fn leave(&self) {
        self.cancel.cancel();
    }

    /// Whether the page has been left.
    #[must_use]
    pub fn is_left(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
