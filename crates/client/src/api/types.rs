//! Request and response bodies exchanged with the backend.

use cardshop_core::{Card, CardId, CardValue};
use serde::{Deserialize, Serialize};

/// `POST /user/signup` body.
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /user/login` body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /user/login` response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /card/add-card` body.
#[derive(Debug, Serialize)]
pub struct AddCardRequest<'a> {
    pub name: &'a str,
    pub value: CardValue,
}

/// Body of the add-to-cart and remove-from-cart requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIdRequest<'a> {
    pub card_id: &'a CardId,
}

/// `GET /cart/get-cards-on-cart` response.
///
/// A missing `cards` field is read as an empty cart.
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// `POST /cart/checkout` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub new_token: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_request_uses_camel_case() {
        let id = CardId::from("a1");
        let json = serde_json::to_value(CardIdRequest { card_id: &id }).unwrap();
        assert_eq!(json, serde_json::json!({ "cardId": "a1" }));
    }

    #[test]
    fn test_add_card_value_is_numeric() {
        let json = serde_json::to_value(AddCardRequest {
            name: "Eevee",
            value: CardValue::from(7),
        })
        .unwrap();
        assert_eq!(json["name"], "Eevee");
        assert_eq!(json["value"].as_f64(), Some(7.0));
    }

    #[test]
    fn test_cart_response_without_cards() {
        let cart: CartResponse = serde_json::from_str("{}").unwrap();
        assert!(cart.cards.is_empty());
    }

    #[test]
    fn test_checkout_response() {
        let body: CheckoutResponse = serde_json::from_str(r#"{"newToken":"t2"}"#).unwrap();
        assert_eq!(body.new_token, "t2");
    }
}
