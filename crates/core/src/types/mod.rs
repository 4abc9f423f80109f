//! Core types for Cardshop.
//!
//! This module provides type-safe wrappers for the marketplace domain.

pub mod card;
pub mod credential;
pub mod form;
pub mod id;
pub mod value;

pub use card::Card;
pub use credential::SessionToken;
pub use form::{Credentials, FormError, NewCard, SignupForm};
pub use id::CardId;
pub use value::CardValue;
