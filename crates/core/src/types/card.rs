//! Card records as exchanged with the backend.

use serde::{Deserialize, Serialize};

use crate::types::{CardId, CardValue};

/// A trading card listed on the marketplace.
///
/// The same shape is used for catalog entries and cart entries. The client
/// holds read-only snapshots; any change goes through the backend followed
/// by a refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Backend-assigned identifier (`_id` on the wire).
    #[serde(rename = "_id")]
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Asking price.
    pub value: CardValue,
    /// Whether the card has already been sold through a checkout.
    #[serde(default)]
    pub sold: bool,
}

impl Card {
    /// Create an unsold card.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, value: impl Into<CardValue>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: value.into(),
            sold: false,
        }
    }

    /// Mark the card as sold.
    #[must_use]
    pub const fn sold(mut self) -> Self {
        self.sold = true;
        self
    }
}
