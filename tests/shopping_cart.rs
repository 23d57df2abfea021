use axum::http::{
    Method, StatusCode,
    header::{CONTENT_DISPOSITION, CONTENT_TYPE},
};
use foodgram_shopping::Branding;

mod common;

const DOWNLOAD: &str = "/api/recipes/download_shopping_cart/";

fn cart_uri(recipe_id: &str) -> String {
    format!("/api/recipes/{recipe_id}/shopping_cart/")
}

#[tokio::test]
async fn download_requires_token() {
    let app = common::setup_test_app().await;

    let response = app.request(Method::GET, DOWNLOAD, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.request(Method::GET, DOWNLOAD, Some("unknown")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn download_returns_pdf_attachment() {
    let app = common::setup_test_app().await;
    let (alice, token) = app.create_user("alice").await;
    let salt = app.create_ingredient("Salt", "g").await;
    let pepper = app.create_ingredient("Pepper", "g").await;

    let soup = app
        .create_recipe(&alice, "Soup", &[(&salt, 10), (&pepper, 2)])
        .await;
    let stew = app.create_recipe(&alice, "Stew", &[(&salt, 5)]).await;
    app.put_in_cart(&alice, &soup).await;
    app.put_in_cart(&alice, &stew).await;

    let response = app.request(Method::GET, DOWNLOAD, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"alice_shopping_cart.pdf\""
    );

    let bytes = common::body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(common::pdf_page_count(&bytes), 1);

    let text = common::pdf_text(&bytes);
    for expected in [
        "Prepared for alice",
        "Ingredient",
        "Quantity",
        "Pepper",
        "2 g",
        "Salt",
        "15 g",
        "Page 1 of 1",
    ] {
        assert!(text.contains(expected), "missing {expected:?} in {text}");
    }
    assert!(!text.contains("10 g"), "{text}");
}

#[tokio::test]
async fn download_keeps_cyrillic_names() {
    let app = common::setup_test_app().await;
    let (alice, token) = app.create_user("alice").await;
    let salt = app.create_ingredient("Соль", "г").await;

    let borscht = app.create_recipe(&alice, "Борщ", &[(&salt, 15)]).await;
    app.put_in_cart(&alice, &borscht).await;

    let response = app.request(Method::GET, DOWNLOAD, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = common::pdf_text(&common::body_bytes(response).await);
    assert!(text.contains("Соль"), "{text}");
    assert!(text.contains("15 г"), "{text}");
}

#[tokio::test]
async fn download_accepts_explicit_pdf_format() {
    let app = common::setup_test_app().await;
    let (_, token) = app.create_user("alice").await;

    let uri = format!("{DOWNLOAD}?format=pdf");
    let response = app.request(Method::GET, &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn download_rejects_unknown_format() {
    let app = common::setup_test_app().await;
    let (_, token) = app.create_user("alice").await;

    let uri = format!("{DOWNLOAD}?format=csv");
    let response = app.request(Method::GET, &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["detail"], "Unsupported file format");
}

#[tokio::test]
async fn empty_cart_downloads_single_page() {
    let app = common::setup_test_app().await;
    let (_, token) = app.create_user("alice").await;

    let response = app.request(Method::GET, DOWNLOAD, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = common::body_bytes(response).await;
    assert_eq!(common::pdf_page_count(&bytes), 1);

    let text = common::pdf_text(&bytes);
    assert!(text.contains("No items in your shopping cart"), "{text}");
    assert!(text.contains("Prepared for alice"), "{text}");
}

#[tokio::test]
async fn download_paginates_by_configured_page_size() {
    let app = common::setup_test_app_with(Branding {
        page_size: 2,
        ..Branding::default()
    })
    .await;
    let (alice, token) = app.create_user("alice").await;

    let mut ingredients = vec![];
    for name in ["Apple", "Butter", "Cream", "Dill", "Egg"] {
        ingredients.push((app.create_ingredient(name, "g").await, 10));
    }
    let lines: Vec<(&str, i64)> = ingredients
        .iter()
        .map(|(id, amount)| (id.as_str(), *amount))
        .collect();
    let pie = app.create_recipe(&alice, "Pie", &lines).await;
    app.put_in_cart(&alice, &pie).await;

    let response = app.request(Method::GET, DOWNLOAD, Some(&token)).await;
    let bytes = common::body_bytes(response).await;
    assert_eq!(common::pdf_page_count(&bytes), 3);

    let text = common::pdf_text(&bytes);
    assert!(text.contains("Page 2 of 3"), "{text}");
    assert!(text.contains("Page 3 of 3"), "{text}");
    assert!(text.contains("Egg"), "{text}");
}

#[tokio::test]
async fn download_only_covers_own_cart() {
    let app = common::setup_test_app_with(Branding {
        page_size: 1,
        ..Branding::default()
    })
    .await;
    let (alice, alice_token) = app.create_user("alice").await;
    let (bob, _) = app.create_user("bob").await;
    let salt = app.create_ingredient("Salt", "g").await;
    let flour = app.create_ingredient("Flour", "kg").await;

    let soup = app.create_recipe(&bob, "Soup", &[(&salt, 10)]).await;
    let bread = app.create_recipe(&bob, "Bread", &[(&flour, 1)]).await;
    app.put_in_cart(&alice, &soup).await;
    app.put_in_cart(&bob, &bread).await;

    let response = app
        .request(Method::GET, DOWNLOAD, Some(&alice_token))
        .await;
    let bytes = common::body_bytes(response).await;
    assert_eq!(common::pdf_page_count(&bytes), 1);

    let text = common::pdf_text(&bytes);
    assert!(text.contains("Salt"), "{text}");
    assert!(!text.contains("Flour"), "{text}");
}

#[tokio::test]
async fn invalid_stored_lines_are_skipped() {
    let app = common::setup_test_app_with(Branding {
        page_size: 1,
        ..Branding::default()
    })
    .await;
    let (alice, token) = app.create_user("alice").await;
    let salt = app.create_ingredient("Salt", "g").await;
    let sugar = app.create_ingredient("Sugar", "g").await;

    let cake = app
        .create_recipe(&alice, "Cake", &[(&salt, 0), (&sugar, 200)])
        .await;
    app.put_in_cart(&alice, &cake).await;

    let response = app.request(Method::GET, DOWNLOAD, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = common::body_bytes(response).await;
    assert_eq!(common::pdf_page_count(&bytes), 1);

    let text = common::pdf_text(&bytes);
    assert!(text.contains("200 g"), "{text}");
    assert!(!text.contains("Salt"), "{text}");
}

#[tokio::test]
async fn add_and_remove_recipe() {
    let app = common::setup_test_app().await;
    let (alice, token) = app.create_user("alice").await;
    let salt = app.create_ingredient("Salt", "g").await;
    let soup = app.create_recipe(&alice, "Soup", &[(&salt, 10)]).await;

    let response = app
        .request(Method::POST, &cart_uri(&soup), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await;
    assert_eq!(body["id"], soup.as_str());
    assert_eq!(body["name"], "Soup");
    assert_eq!(body["cooking_time"], 15);

    let response = app
        .request(Method::POST, &cart_uri(&soup), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(Method::DELETE, &cart_uri(&soup), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(Method::DELETE, &cart_uri(&soup), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_recipe_is_not_found() {
    let app = common::setup_test_app().await;
    let (_, token) = app.create_user("alice").await;
    let missing = ulid::Ulid::new().to_string();

    let response = app
        .request(Method::POST, &cart_uri(&missing), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(Method::DELETE, &cart_uri(&missing), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_ready() {
    let app = common::setup_test_app().await;

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
