mod common;

use std::sync::Arc;

use common::{MockPublisher, OfflineStore, serve, spawn_app};
use serde_json::json;
use time::OffsetDateTime;
use verification_provider::{
    models::EmailMessage,
    services::{encoder::MessageEncoder, store::VerificationStore},
};

fn generate_url(address: &str) -> String {
    format!("{address}/api/verification/generate")
}

#[tokio::test]
async fn generate_code_works() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(generate_url(&app.address))
        .json(&json!({ "email": "user@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let message: EmailMessage = response.json().await.expect("Failed to parse payload");

    assert_eq!(message.to, "user@example.com");
    let code = message
        .subject
        .strip_prefix("Verification Code: ")
        .expect("subject should carry the code");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert!(message.html_body.contains(&format!("[{code}]")));
    assert!(message.plain_text_body.contains(code));

    let record = app
        .store
        .find_by_email("user@example.com")
        .await
        .unwrap()
        .expect("record should be stored");
    assert_eq!(record.code, code);

    let remaining = record.expiry_date - OffsetDateTime::now_utc();
    assert!(remaining > time::Duration::minutes(4));
    assert!(remaining <= time::Duration::minutes(5));

    // Published payload is the one returned to the caller
    assert_eq!(app.publisher.published_count(), 1);
    let published = app.publisher.last_published().unwrap();
    assert_eq!(MessageEncoder.decode(&published).unwrap(), message);
}

#[tokio::test]
async fn second_request_replaces_code() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let mut expiries = Vec::new();
    for _ in 0..2 {
        let response = client
            .post(generate_url(&app.address))
            .json(&json!({ "email": "again@example.com" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let message: EmailMessage = response.json().await.unwrap();
        let record = app
            .store
            .find_by_email("again@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(message.subject, format!("Verification Code: {}", record.code));
        expiries.push(record.expiry_date);
    }

    assert_eq!(app.store.len(), 1);
    assert!(expiries[1] > expiries[0]);
    assert_eq!(app.publisher.published_count(), 2);
}

#[tokio::test]
async fn missing_or_empty_email_is_rejected() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let bodies = [
        json!({}),
        json!({ "email": "" }),
        json!({ "email": null }),
        json!({ "mail": "user@example.com" }),
    ];

    for body in bodies {
        let response = client
            .post(generate_url(&app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(
            response.status(),
            reqwest::StatusCode::BAD_REQUEST,
            "body {body} should be rejected"
        );
    }

    assert!(app.store.is_empty());
    assert_eq!(app.publisher.published_count(), 0);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(generate_url(&app.address))
        .body("email=user@example.com")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn storage_outage_returns_error_without_payload() {
    let publisher = Arc::new(MockPublisher::new());
    let address = serve(Arc::new(OfflineStore), publisher.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(generate_url(&address))
        .json(&json!({ "email": "user@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );
    let body = response.text().await.unwrap();
    assert!(!body.contains("Verification Code"));
    assert_eq!(publisher.published_count(), 0);
}

#[tokio::test]
async fn queue_rejection_keeps_stored_code() {
    let store = Arc::new(verification_provider::services::store::MemoryVerificationStore::new());
    let address = serve(store.clone(), Arc::new(MockPublisher::rejecting())).await;
    let client = reqwest::Client::new();

    let response = client
        .post(generate_url(&address))
        .json(&json!({ "email": "user@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    assert!(
        store
            .find_by_email("user@example.com")
            .await
            .unwrap()
            .is_some()
    );
}
