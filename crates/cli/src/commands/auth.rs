//! Account commands.
//!
//! Passwords are read from stdin so they stay out of shell history.

use cardshop_client::pages::auth;
use cardshop_client::{AppContext, Route};
use cardshop_core::{Credentials, SignupForm};

use crate::CliError;
use crate::terminal;

pub async fn signup(
    ctx: &AppContext,
    name: String,
    email: String,
) -> Result<Option<Route>, CliError> {
    let Some(password) = terminal::prompt("Password: ")? else {
        return Ok(None);
    };
    let Some(confirm_password) = terminal::prompt("Confirm password: ")? else {
        return Ok(None);
    };

    let form = SignupForm::new(name, email, password, confirm_password);
    Ok(auth::signup(ctx, &form).await)
}

pub async fn login(ctx: &AppContext, email: String) -> Result<Option<Route>, CliError> {
    let Some(password) = terminal::prompt("Password: ")? else {
        return Ok(None);
    };

    let credentials = Credentials::new(email, password);
    Ok(auth::login(ctx, &credentials).await?)
}

pub fn logout(ctx: &AppContext) -> Result<Route, CliError> {
    Ok(auth::logout(ctx)?)
}
