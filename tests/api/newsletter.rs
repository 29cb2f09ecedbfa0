use serde_json::json;

use crate::helpers::{ADMIN_EMAIL, spawn_app};

#[tokio::test]
async fn subscribing_with_an_email_sends_both_emails() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(2).await;

    // Act
    let response = app
        .post_form("/newsletter", &json!({ "email": "reader@example.com" }))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "emailSent": true }));

    let emails = app.sent_emails().await;
    assert_eq!(emails[0]["To"], ADMIN_EMAIL);
    assert_eq!(emails[1]["To"], "reader@example.com");
    assert_eq!(emails[1]["Subject"], "🎉 Welcome to the Newus Newsletter!");
}

#[tokio::test]
async fn subscribing_without_an_email_is_rejected() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(0).await;

    // Act
    let response = app.post_form("/newsletter", &json!({})).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "ok": false, "error": "Missing required field: email" })
    );
}

#[tokio::test]
async fn a_relay_failure_reports_a_failed_subscription() {
    // Arrange
    let app = spawn_app().await;
    wiremock::Mock::given(wiremock::matchers::any())
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    // Act
    let response = app
        .post_form("/api/newsletter", &json!({ "email": "reader@example.com" }))
        .await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "ok": false, "error": "Subscription failed" }));
}
