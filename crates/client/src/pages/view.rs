//! Client-side snapshots of the catalog and the cart.
//!
//! Both are replaced wholesale from a fetch result; neither is ever patched
//! in place.

use cardshop_core::{Card, CardId};

/// Cards available for purchase.
///
/// Never contains a sold card: [`CatalogView::from_fetched`] drops them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    cards: Vec<Card>,
}

impl CatalogView {
    /// Build the view from a raw catalog fetch, dropping sold cards.
    #[must_use]
    pub fn from_fetched(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into_iter().filter(|card| !card.sold).collect(),
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Cards reserved in the session's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartView {
    cards: Vec<Card>,
}

impl CartView {
    #[must_use]
    pub const fn from_fetched(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Membership predicate. Evaluated against the current snapshot on
    /// every call.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.iter().any(|card| &card.id == id)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A catalog row as handed to the item renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing<'a> {
    pub card: &'a Card,
    pub in_cart: bool,
}
