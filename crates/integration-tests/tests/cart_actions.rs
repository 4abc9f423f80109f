//! Add, remove and card authoring from the menu page.

#![allow(clippy::unwrap_used)]

use cardshop_client::dialogs::{Confirm, Notice};
use cardshop_client::pages::{ActionOutcome, MenuPage};
use cardshop_core::Card;
use cardshop_integration_tests::{RecordingDialogs, TestContext};
use httpmock::Mock;
use httpmock::prelude::*;
use serde_json::json;

fn pikachu() -> Card {
    Card::new("a", "Pikachu", 10)
}

/// Serve a two-card catalog and a cart holding `in_cart`.
fn serve<'a>(t: &'a TestContext, in_cart: serde_json::Value) -> (Mock<'a>, Mock<'a>) {
    let catalog = t.server.mock(|when, then| {
        when.method(GET).path("/card/cards");
        then.status(200).json_body(json!([
            { "_id": "a", "name": "Pikachu", "value": 10, "sold": false },
            { "_id": "b", "name": "Mew", "value": 50, "sold": false }
        ]));
    });
    let cart = t.server.mock(|when, then| {
        when.method(GET).path("/cart/get-cards-on-cart");
        then.status(200).json_body(json!({ "cards": in_cart }));
    });
    (catalog, cart)
}

async fn mount(t: &TestContext) -> MenuPage {
    MenuPage::mount(t.app.clone())
        .await
        .unwrap()
        .ready()
        .unwrap()
}

#[tokio::test]
async fn test_add_to_cart_posts_card_id_and_refreshes() {
    let t = TestContext::logged_in("tok-1");
    let (catalog, cart) = serve(&t, json!([]));
    let add = t.server.mock(|when, then| {
        when.method(POST)
            .path("/cart/add-to-cart")
            .header("authorization", "Bearer tok-1")
            .json_body(json!({ "cardId": "a" }));
        then.status(200).json_body(json!({ "message": "ok" }));
    });
    let mut page = mount(&t).await;

    let outcome = page.add_to_cart(&pikachu()).await.unwrap();

    assert_eq!(outcome, ActionOutcome::Completed);
    add.assert();
    catalog.assert_calls(2);
    cart.assert_calls(2);
    assert_eq!(
        t.dialogs.questions(),
        vec![Confirm::AddToCart {
            card_name: "Pikachu".to_owned()
        }]
    );
    assert_eq!(t.dialogs.notices(), vec![Notice::AddedToCart]);
}

#[tokio::test]
async fn test_add_to_cart_twice_is_rejected_locally() {
    let t = TestContext::logged_in("tok-1");
    serve(
        &t,
        json!([{ "_id": "a", "name": "Pikachu", "value": 10, "sold": false }]),
    );
    let add = t.server.mock(|when, then| {
        when.method(POST).path("/cart/add-to-cart");
        then.status(200);
    });
    let mut page = mount(&t).await;

    let outcome = page.add_to_cart(&pikachu()).await.unwrap();

    assert_eq!(outcome, ActionOutcome::Rejected);
    add.assert_calls(0);
    assert!(t.dialogs.questions().is_empty());
    assert_eq!(t.dialogs.notices(), vec![Notice::AlreadyInCart]);
}

#[tokio::test]
async fn test_add_to_cart_not_found_skips_refresh() {
    let t = TestContext::logged_in("tok-1");
    let (catalog, cart) = serve(&t, json!([]));
    t.server.mock(|when, then| {
        when.method(POST).path("/cart/add-to-cart");
        then.status(404).json_body(json!({ "message": "Card not found" }));
    });
    let mut page = mount(&t).await;

    let outcome = page.add_to_cart(&pikachu()).await.unwrap();

    assert_eq!(outcome, ActionOutcome::Failed);
    catalog.assert_calls(1);
    cart.assert_calls(1);
    assert!(!page.is_in_cart(&pikachu()));
    assert_eq!(t.dialogs.notices(), vec![Notice::CardNotFound]);
}

#[tokio::test]
async fn test_declined_add_sends_nothing() {
    let t = TestContext::logged_in_with("tok-1", RecordingDialogs::new().answering(false));
    serve(&t, json!([]));
    let add = t.server.mock(|when, then| {
        when.method(POST).path("/cart/add-to-cart");
        then.status(200);
    });
    let mut page = mount(&t).await;

    let outcome = page.add_to_cart(&pikachu()).await.unwrap();

    assert_eq!(outcome, ActionOutcome::Declined);
    add.assert_calls(0);
    assert!(t.dialogs.notices().is_empty());
}

#[tokio::test]
async fn test_remove_sends_delete_with_body_and_refetches_each_once() {
    let t = TestContext::logged_in("tok-1");
    let (catalog, cart) = serve(
        &t,
        json!([{ "_id": "a", "name": "Pikachu", "value": 10, "sold": false }]),
    );
    let remove = t.server.mock(|when, then| {
        when.method(DELETE)
            .path("/cart/remove-from-cart")
            .header("authorization", "Bearer tok-1")
            .json_body(json!({ "cardId": "a" }));
        then.status(200).json_body(json!({ "message": "removed" }));
    });
    let mut page = mount(&t).await;

    let outcome = page.remove_from_cart(&pikachu()).await.unwrap();

    assert_eq!(outcome, ActionOutcome::Completed);
    remove.assert();
    // One fetch at mount, one after the removal
    catalog.assert_calls(2);
    cart.assert_calls(2);
    assert_eq!(t.dialogs.notices(), vec![Notice::RemovedFromCart]);
}

#[tokio::test]
async fn test_remove_not_found_reports_card_or_cart() {
    let t = TestContext::logged_in("tok-1");
    serve(&t, json!([]));
    t.server.mock(|when, then| {
        when.method(DELETE).path("/cart/remove-from-cart");
        then.status(404);
    });
    let mut page = mount(&t).await;

    let outcome = page.remove_from_cart(&pikachu()).await.unwrap();

    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(t.dialogs.notices(), vec![Notice::CardOrCartNotFound]);
}

#[tokio::test]
async fn test_create_card_posts_numeric_value_and_refetches_catalog() {
    let t = TestContext::logged_in_with(
        "tok-1",
        RecordingDialogs::new().with_card_form("Mewtwo", " 12.5 "),
    );
    let (catalog, cart) = serve(&t, json!([]));
    let create = t.server.mock(|when, then| {
        when.method(POST)
            .path("/card/add-card")
            .header("authorization", "Bearer tok-1")
            .json_body(json!({ "name": "Mewtwo", "value": 12.5 }));
        then.status(201).json_body(json!({ "message": "created" }));
    });
    let mut page = mount(&t).await;

    let outcome = page.create_card().await.unwrap();

    assert_eq!(outcome, ActionOutcome::Completed);
    create.assert();
    catalog.assert_calls(2);
    cart.assert_calls(1);
    assert_eq!(t.dialogs.notices(), vec![Notice::CardCreated]);
}

#[tokio::test]
async fn test_create_card_with_text_value_sends_nothing() {
    let t = TestContext::logged_in_with(
        "tok-1",
        RecordingDialogs::new().with_card_form("Mewtwo", "lots"),
    );
    serve(&t, json!([]));
    let create = t.server.mock(|when, then| {
        when.method(POST).path("/card/add-card");
        then.status(201);
    });
    let mut page = mount(&t).await;

    let outcome = page.create_card().await.unwrap();

    assert_eq!(outcome, ActionOutcome::Rejected);
    create.assert_calls(0);
    assert_eq!(t.dialogs.notices(), vec![Notice::InvalidCardValue]);
}

#[tokio::test]
async fn test_expired_token_is_unexpected() {
    let t = TestContext::logged_in("stale");
    serve(&t, json!([]));
    t.server.mock(|when, then| {
        when.method(POST).path("/cart/add-to-cart");
        then.status(401).json_body(json!({ "message": "Invalid token" }));
    });
    let mut page = mount(&t).await;

    let outcome = page.add_to_cart(&pikachu()).await.unwrap();

    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(t.dialogs.notices(), vec![Notice::Unexpected]);
}
