//! Cardshop Core - Shared types library.
//!
//! This crate provides common types used across all Cardshop components:
//! - `client` - Backend client and catalog/cart view-state synchronizer
//! - `cli` - Terminal frontend for browsing the catalog and managing the bag
//!
//! # Architecture
//!
//! The core crate contains only types and their local validation - no I/O,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Card identifiers, card records, card values, session tokens and forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
