//! Opaque identifiers for backend entities.
//!
//! The backend assigns card identifiers; the client never interprets them,
//! it only compares them for equality and echoes them back in requests.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a card, as issued by the backend.
///
/// # Example
///
/// ```rust
/// use cardshop_core::CardId;
///
/// let id = CardId::new("64f1c0ffee");
/// assert_eq!(id.as_str(), "64f1c0ffee");
/// assert_eq!(id, CardId::from("64f1c0ffee"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.0
    }
}

impl AsRef<str> for CardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
