//! Interactive pages and account commands.

pub mod auth;
mod bag;
mod menu;

use cardshop_client::pages::{LeaveHandle, PageScope};
use cardshop_client::{AppContext, PageError, Route};
use cardshop_core::Card;
use tokio::task::JoinHandle;

use crate::CliError;
use crate::terminal;

/// Follow routes until the user quits.
pub async fn navigate(ctx: AppContext, mut next: Option<Route>) -> Result<(), CliError> {
    while let Some(route) = next {
        tracing::debug!(%route, "Navigating");
        let outcome = if route.requires_session() {
            match route {
                Route::Bag => bag::run(ctx.clone()).await,
                _ => menu::run(ctx.clone()).await,
            }
        } else {
            terminal::say(hint(route))?;
            Ok(None)
        };
        next = match outcome {
            Err(CliError::Page(PageError::Cancelled)) => {
                tracing::info!(%route, "Page left before loading finished");
                None
            }
            other => other?,
        };
    }
    Ok(())
}

/// What to run next for a page the terminal cannot show.
const fn hint(route: Route) -> &'static str {
    match route {
        Route::Signup => "Run `cardshop signup -n <name> -e <email>` to continue.",
        Route::Login => "Run `cardshop login -e <email>` to continue.",
        Route::Entry | Route::Menu | Route::Bag => {
            "You are not logged in. Run `cardshop login -e <email>`."
        }
    }
}

/// Leaves the page on Ctrl-C until dropped.
struct InterruptGuard(JoinHandle<()>);

impl InterruptGuard {
    fn watch(scope: &PageScope) -> Self {
        let handle: LeaveHandle = scope.leave_handle();
        Self(tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.leave();
                tracing::info!("Interrupted, leaving page");
            }
        }))
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn print_card(index: usize, card: &Card, in_cart: bool) -> std::io::Result<()> {
    let marker = if in_cart { " [in cart]" } else { "" };
    terminal::say(format_args!(
        "{:>3}. {} - {}{marker}",
        index + 1,
        card.name,
        card.value
    ))
}

/// Parse a 1-based row number typed by the user.
fn pick<'a>(cards: &'a [Card], arg: Option<&str>) -> Option<&'a Card> {
    let row: usize = arg?.parse().ok()?;
    cards.get(row.checked_sub(1)?)
}
