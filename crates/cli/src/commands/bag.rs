//! Interactive bag page.

use cardshop_client::pages::{ActionOutcome, BagPage, Mount, PageScope};
use cardshop_client::{AppContext, Route};

use super::{InterruptGuard, pick, print_card};
use crate::CliError;
use crate::terminal;

const HELP: &str = "Commands: list, remove <n>, checkout, menu, quit";

pub async fn run(ctx: AppContext) -> Result<Option<Route>, CliError> {
    let scope = PageScope::new();
    let _interrupt = InterruptGuard::watch(&scope);

    let mut page = match BagPage::mount_in(ctx, scope).await? {
        Mount::Ready(page) => page,
        Mount::Redirect(route) => return Ok(Some(route)),
    };
    let leave = page.leave_handle();

    print_bag(&page)?;
    terminal::say(HELP)?;

    loop {
        let Some(line) = terminal::prompt("bag> ")? else {
            return Ok(None);
        };
        if leave.is_left() {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("list" | "ls") => print_bag(&page)?,
            Some("remove" | "rm") => {
                let Some(card) = pick(page.cart().cards(), words.next()).cloned() else {
                    terminal::say("No such row")?;
                    continue;
                };
                if page.remove_from_cart(&card).await? == ActionOutcome::Completed {
                    print_bag(&page)?;
                }
            }
            Some("checkout") => {
                page.checkout().await?;
            }
            Some("menu") => return Ok(Some(Route::Menu)),
            Some("quit" | "q" | "exit") => return Ok(None),
            Some(_) => terminal::say(HELP)?,
            None => {}
        }
    }
}

fn print_bag(page: &BagPage) -> std::io::Result<()> {
    if page.cart().is_empty() {
        return terminal::say("Your bag is empty");
    }
    for (index, card) in page.cart().cards().iter().enumerate() {
        print_card(index, card, page.is_in_cart(card))?;
    }
    Ok(())
}
