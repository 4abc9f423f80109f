//! Cardshop client library.
//!
//! Talks to the Cardshop backend and keeps each page's local view of the
//! catalog and the cart consistent with it. The frontend (terminal, GUI, ...)
//! only renders what the page controllers hold and feeds user actions back.
//!
//! # Modules
//!
//! - [`api`] - Backend trait and its HTTP implementation
//! - [`config`] - Environment-based configuration
//! - [`dialogs`] - Confirmation, notification and form prompts
//! - [`pages`] - Menu and bag page controllers, auth flows
//! - [`session`] - Session value and token persistence
//! - [`state`] - Collaborators shared by every page

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

pub use error::{PageError, Result};
pub use routes::Route;
pub use state::AppContext;
