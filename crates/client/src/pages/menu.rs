//! Menu page: the catalog of available cards.

use cardshop_core::{Card, NewCard};
use tracing::instrument;

use super::{ActionOutcome, CartView, CatalogView, LeaveHandle, Listing, Mount, PageScope};
use crate::api::ApiError;
use crate::dialogs::{Confirm, Notice};
use crate::error::{Result, add_breadcrumb, report_unexpected};
use crate::routes::Route;
use crate::session::Session;
use crate::state::AppContext;

/// Controller of the menu page.
///
/// Holds the catalog and the cart side by side so each catalog row can show
/// whether the card is already reserved.
pub struct MenuPage {
    ctx: AppContext,
    session: Session,
    catalog: CatalogView,
    cart: CartView,
    scope: PageScope,
}

impl MenuPage {
    /// Mount the page in a fresh scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub async fn mount(ctx: AppContext) -> Result<Mount<Self>> {
        Self::mount_in(ctx, PageScope::new()).await
    }

    /// Mount the page in `scope`, so the caller can leave it mid-load.
    ///
    /// Without a stored token, redirects to [`Route::Entry`] and makes no
    /// request. Otherwise fetches catalog and cart concurrently.
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
            catalog: CatalogView::default(),
            cart: CartView::default(),
            scope,
        };
        page.refresh().await?;
        Ok(Mount::Ready(page))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &CatalogView {
        &self.catalog
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

    /// Catalog rows with their cart membership, in catalog order.
    #[must_use]
    pub fn listing(&self) -> Vec<Listing<'_>> {
        self.catalog
            .cards()
            .iter()
            .map(|card| Listing {
                card,
                in_cart: self.is_in_cart(card),
            })
            .collect()
    }

    #[must_use]
    pub fn leave_handle(&self) -> LeaveHandle {
        self.scope.leave_handle()
    }

    // =========================================================================
    // Loaders
    // =========================================================================

    /// Refetch catalog and cart concurrently.
    ///
    /// Each collection is committed independently: a failed catalog fetch
    /// does not prevent the cart from being updated, and vice versa.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`](crate::error::PageError::Cancelled)
    /// if the page was left before both fetches settled.
    pub async fn refresh(&mut self) -> Result<()> {
        let backend = self.ctx.backend();
        let session = &self.session;
        let (catalog, cart) = self
            .scope
            .run(async { tokio::join!(backend.list_cards(session), backend.cart_cards(session)) })
            .await?;

        self.apply_catalog(catalog);
        self.apply_cart(cart);
        Ok(())
    }

    /// Refetch the catalog, dropping sold cards.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`](crate::error::PageError::Cancelled)
    /// if the page was left before the fetch settled.
    pub async fn fetch_catalog(&mut self) -> Result<()> {
        let result = self
            .scope
            .run(self.ctx.backend().list_cards(&self.session))
            .await?;
        self.apply_catalog(result);
        Ok(())
    }

    /// Refetch the cart.
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
        self.apply_cart(result);
        Ok(())
    }

    fn apply_catalog(&mut self, result: std::result::Result<Vec<Card>, ApiError>) {
        match result {
            Ok(cards) => self.catalog = CatalogView::from_fetched(cards),
            Err(e) => {
                report_unexpected("fetch catalog", &e);
                self.ctx.dialogs().notify(Notice::Unexpected);
            }
        }
    }

    fn apply_cart(&mut self, result: std::result::Result<Vec<Card>, ApiError>) {
        match result {
            Ok(cards) => self.cart = CartView::from_fetched(cards),
            Err(e) => {
                report_unexpected("fetch cart", &e);
                self.ctx.dialogs().notify(Notice::Unexpected);
            }
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Reserve `card` in the cart.
    ///
    /// The membership check only reflects the last cart fetch; the backend
    /// re-validates on its side.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`](crate::error::PageError::Cancelled)
    /// if the page was left mid-action.
    #[instrument(skip_all, fields(card_id = %card.id))]
    pub async fn add_to_cart(&mut self, card: &Card) -> Result<ActionOutcome> {
        add_breadcrumb("cart", "Add to cart", Some(&[("card_id", card.id.as_str())]));

        if self.is_in_cart(card) {
            self.ctx.dialogs().notify(Notice::AlreadyInCart);
            return Ok(ActionOutcome::Rejected);
        }

        let question = Confirm::AddToCart {
            card_name: card.name.clone(),
        };
        if !self.ctx.dialogs().confirm(&question) {
            return Ok(ActionOutcome::Declined);
        }

        let result = self
            .scope
            .run(self.ctx.backend().add_to_cart(&self.session, &card.id))
            .await?;
        if super::settle(&self.ctx, "add to cart", result, Some(Notice::CardNotFound)).is_none() {
            return Ok(ActionOutcome::Failed);
        }

        self.ctx.dialogs().notify(Notice::AddedToCart);
        self.refresh().await?;
        Ok(ActionOutcome::Completed)
    }

    /// Release `card` from the cart.
    ///
    /// No membership precondition: the request is sent even if the last
    /// cart fetch did not contain the card.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`](crate::error::PageError::Cancelled)
    /// if the page was left mid-action.
    #[instrument(skip_all, fields(card_id = %card.id))]
    pub async fn remove_from_cart(&mut self, card: &Card) -> Result<ActionOutcome> {
        add_breadcrumb(
            "cart",
            "Remove from cart",
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
        if super::settle(
            &self.ctx,
            "remove from cart",
            result,
            Some(Notice::CardOrCartNotFound),
        )
        .is_none()
        {
            return Ok(ActionOutcome::Failed);
        }

        self.ctx.dialogs().notify(Notice::RemovedFromCart);
        self.refresh().await?;
        Ok(ActionOutcome::Completed)
    }

    /// Author a new card through the card form.
    ///
    /// A non-numeric value is rejected locally; everything else (including
    /// an empty name) is left to the backend to judge.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Cancelled`](crate::error::PageError::Cancelled)
    /// if the page was left mid-action.
    #[instrument(skip_all)]
    pub async fn create_card(&mut self) -> Result<ActionOutcome> {
        add_breadcrumb("catalog", "Create card", None);

        if !self.ctx.dialogs().confirm(&Confirm::CreateCard) {
            return Ok(ActionOutcome::Declined);
        }
        let Some(input) = self.ctx.dialogs().card_form() else {
            return Ok(ActionOutcome::Declined);
        };

        let card = match NewCard::parse(&input.name, &input.value) {
            Ok(card) => card,
            Err(e) => {
                tracing::debug!(error = %e, "Card form rejected");
                self.ctx.dialogs().notify(Notice::InvalidCardValue);
                return Ok(ActionOutcome::Rejected);
            }
        };

        let result = self
            .scope
            .run(self.ctx.backend().add_card(&self.session, &card))
            .await?;
        if super::settle(&self.ctx, "create card", result, None).is_none() {
            return Ok(ActionOutcome::Failed);
        }

        self.ctx.dialogs().notify(Notice::CardCreated);
        self.fetch_catalog().await?;
        Ok(ActionOutcome::Completed)
    }
}
