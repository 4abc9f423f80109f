//! User-facing dialog surface.
//!
//! Page controllers never print or read input themselves. They ask a
//! [`Dialogs`] implementation to confirm an action, collect a form, or show
//! a notice. Every call blocks until the user answers.

use core::fmt;

/// A yes/no question asked before a mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    AddToCart { card_name: String },
    RemoveFromCart { card_name: String },
    Checkout,
    CreateCard,
}

impl fmt::Display for Confirm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddToCart { card_name } => {
                write!(f, "Add the card {card_name} to your cart?")
            }
            Self::RemoveFromCart { card_name } => {
                write!(f, "Remove the card {card_name} from your cart?")
            }
            Self::Checkout => write!(f, "Place the order?"),
            Self::CreateCard => write!(f, "Add a new card?"),
        }
    }
}

/// Outcome notifications shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AddedToCart,
    AlreadyInCart,
    CardNotFound,
    RemovedFromCart,
    CardOrCartNotFound,
    CartProblem,
    CheckoutComplete,
    CardCreated,
    InvalidCardValue,
    PasswordMismatch,
    AccountCreated,
    AccountExists,
    InvalidCredentials,
    LoggedIn,
    LoggedOut,
    /// Catch-all for anything not covered above. Details go to the log.
    Unexpected,
}

impl Notice {
    /// Whether this notice reports a failure.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::AlreadyInCart
                | Self::CardNotFound
                | Self::CardOrCartNotFound
                | Self::CartProblem
                | Self::InvalidCardValue
                | Self::PasswordMismatch
                | Self::AccountExists
                | Self::InvalidCredentials
                | Self::Unexpected
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::AddedToCart => "Card added to your cart",
            Self::AlreadyInCart => "Card is already in your cart",
            Self::CardNotFound => "Card not found",
            Self::RemovedFromCart => "Card removed from your cart",
            Self::CardOrCartNotFound => "Card or cart not found",
            Self::CartProblem => "There is a problem with your cart",
            Self::CheckoutComplete => "Purchase completed successfully",
            Self::CardCreated => "Card created successfully",
            Self::InvalidCardValue => "Card value must be a number",
            Self::PasswordMismatch => "Passwords do not match. Please try again.",
            Self::AccountCreated => "Account created, you can now log in",
            Self::AccountExists => "An account with this email already exists",
            Self::InvalidCredentials => "Invalid email or password",
            Self::LoggedIn => "Welcome back",
            Self::LoggedOut => "You have been logged out",
            Self::Unexpected => "Sorry, an unexpected error occurred",
        };
        f.write_str(message)
    }
}

/// Raw input of the card authoring form, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFormInput {
    pub name: String,
    pub value: String,
}

/// Blocking dialogs presented to the user.
pub trait Dialogs: Send + Sync {
    /// Ask a yes/no question. `false` means the user declined.
    fn confirm(&self, question: &Confirm) -> bool;

    /// Show a notice and wait until it is acknowledged.
    fn notify(&self, notice: Notice);

    /// Collect the name and value of a new card. `None` means cancelled.
    fn card_form(&self) -> Option<CardFormInput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_names_the_card() {
        let question = Confirm::AddToCart {
            card_name: "Pikachu".to_string(),
        };
        assert!(question.to_string().contains("Pikachu"));
    }

    #[test]
    fn test_notice_severity() {
        assert!(Notice::Unexpected.is_error());
        assert!(Notice::CardNotFound.is_error());
        assert!(!Notice::AddedToCart.is_error());
        assert!(!Notice::CheckoutComplete.is_error());
    }
}
