//! Interactive menu page.

use cardshop_client::pages::{MenuPage, Mount, PageScope};
use cardshop_client::{AppContext, Route};

use super::{InterruptGuard, pick, print_card};
use crate::CliError;
use crate::terminal;

const HELP: &str = "Commands: list, add <n>, remove <n>, new, refresh, bag, quit";

pub async fn run(ctx: AppContext) -> Result<Option<Route>, CliError> {
    let scope = PageScope::new();
    let _interrupt = InterruptGuard::watch(&scope);

    let mut page = match MenuPage::mount_in(ctx, scope).await? {
        Mount::Ready(page) => page,
        Mount::Redirect(route) => return Ok(Some(route)),
    };
    let leave = page.leave_handle();

    print_catalog(&page)?;
    terminal::say(HELP)?;

    loop {
        let Some(line) = terminal::prompt("menu> ")? else {
            return Ok(None);
        };
        if leave.is_left() {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("list" | "ls") => print_catalog(&page)?,
            Some("add") => {
                let Some(card) = pick(page.catalog().cards(), words.next()).cloned() else {
                    terminal::say("No such row")?;
                    continue;
                };
                page.add_to_cart(&card).await?;
            }
            Some("remove" | "rm") => {
                let Some(card) = pick(page.catalog().cards(), words.next()).cloned() else {
                    terminal::say("No such row")?;
                    continue;
                };
                page.remove_from_cart(&card).await?;
            }
            Some("new") => {
                page.create_card().await?;
            }
            Some("refresh") => {
                page.refresh().await?;
                print_catalog(&page)?;
            }
            Some("bag") => return Ok(Some(Route::Bag)),
            Some("quit" | "q" | "exit") => return Ok(None),
            Some(_) => terminal::say(HELP)?,
            None => {}
        }
    }
}

fn print_catalog(page: &MenuPage) -> std::io::Result<()> {
    if page.catalog().is_empty() {
        return terminal::say("No cards for sale");
    }
    for (index, row) in page.listing().iter().enumerate() {
        print_card(index, row.card, row.in_cart)?;
    }
    Ok(())
}
