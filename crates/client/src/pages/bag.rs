//! Bag page: the cart contents and checkout.

use cardshop_core::Card;
use tracing::instrument;

use super::{ActionOutcome, CartView, LeaveHandle, Mount, PageScope};
use crate::dialogs::{Confirm, Notice};
use crate::error::{Result, add_breadcrumb, report_unexpected};
use crate::routes::Route;
use crate::session::Session;
use crate::state::AppContext;

/// Controller of the bag page.
pub struct BagPage {
    ctx: AppContext,
    session: Session,
    cart: CartView,
    scope: PageScope,
}

impl BagPage {
    /// Mount the page in a fresh scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub async fn mount(ctx: AppContext) -> Result<Mount<Self>> {
        Self::mount_in(ctx, PageScope::new()).await
    }

    /// Mount the page in `scope`.
    ///
    /// Without a stored token, redirects to [`Route::Entry`] and makes no
    /// request. Otherwise fetches the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read, or
    /// [`PageError::Cancelled`](crate::error::PageError::Cancelled) if the
    /// page was left during the initial load.
    pub async fn mount_in(ctx: AppContext, scope: PageScope) -> Result<Mount<Self>> {
        let Some(session) = super::guard(&ctx)? else {
            return Ok(Mount::Redirect(Route::Entry));
        };

        let mut page = Self {
            ctx,
            session,
            cart: CartView::default(),
            scope,
        };
        page.fetch_cart().await?;
        Ok(Mount::Ready(page))
    }

    #[must_use]
    pub const fn cart(&self) -> &CartView {
        &self.cart
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Whether `card` is in the cart, as of the last successful cart fetch.
    #[must_use]
    pub fn is_in_cart(&self, card: &Card) -> bool {
        self.cart.contains(&card.id)
    }

    #[must_use]
    pub fn leave_handle(&self) -> LeaveHandle {
        self.scope.leave_handle()
    }

    /// Refetch the cart. An empty cart is a valid result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`](crate::error::PageError::Cancelled)
    /// if the page was left before the fetch settled.
    pub async fn fetch_cart(&mut self) -> Result<()> {
        let result = self
            .scope
            .run(self.ctx.backend().cart_cards(&self.session))
            .await?;
        match result {
            Ok(cards) => self.cart = CartView::from_fetched(cards),
            Err(e) => {
                report_unexpected("fetch cart", &e);
                self.ctx.dialogs().notify(Notice::Unexpected);
            }
        }
        Ok(())
    }

    /// Release `card` from the cart and refetch it.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`](crate::error::PageError::Cancelled)
    /// if the page was left mid-action.
    #[instrument(skip_all, fields(card_id = %card.id))]
    pub async fn remove_from_cart(&mut self, card: &Card) -> Result<ActionOutcome> {
        add_breadcrumb(
            "cart",
            "Remove from bag",
            Some(&[("card_id", card.id.as_str())]),
        );

        let question = Confirm::RemoveFromCart {
            card_name: card.name.clone(),
        };
        if !self.ctx.dialogs().confirm(&question) {
            return Ok(ActionOutcome::Declined);
        }

        let result = self
            .scope
            .run(self.ctx.backend().remove_from_cart(&self.session, &card.id))
            .await?;
        if super::settle(&self.ctx, "remove from bag", result, Some(Notice::CartProblem)).is_none()
        {
            return Ok(ActionOutcome::Failed);
        }

        self.ctx.dialogs().notify(Notice::RemovedFromCart);
        self.fetch_cart().await?;
        Ok(ActionOutcome::Completed)
    }

    /// Buy everything in the cart.
    ///
    /// On success the backend re-issues the session token; it replaces the
    /// page's session and the stored token before the cart is refetched.
    /// The catalog is not touched here: the menu page refetches it when it
    /// mounts again.
    ///
    /// The purchase is final once the backend accepts it, so a failure to
    /// persist the new token is reported as unexpected but still completes
    /// the action with the rotated in-memory session.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`](crate::error::PageError::Cancelled)
    /// if the page was left mid-action.
    #[instrument(skip_all)]
    pub async fn checkout(&mut self) -> Result<ActionOutcome> {
        add_breadcrumb("cart", "Checkout", None);

        if !self.ctx.dialogs().confirm(&Confirm::Checkout) {
            return Ok(ActionOutcome::Declined);
        }

        let result = self
            .scope
            .run(self.ctx.backend().checkout(&self.session))
            .await?;
        let Some(new_token) =
            super::settle(&self.ctx, "checkout", result, Some(Notice::CartProblem))
        else {
            return Ok(ActionOutcome::Failed);
        };

        self.session.replace_token(new_token);
        match self.ctx.store().save(self.session.token()) {
            Ok(()) => tracing::info!("Checkout completed, session token rotated"),
            Err(e) => report_unexpected("persist token", &e),
        }

        self.ctx.dialogs().notify(Notice::CheckoutComplete);
        self.fetch_cart().await?;
        Ok(ActionOutcome::Completed)
    }
}
