use serde_json::json;

use crate::helpers::{ADMIN_EMAIL, spawn_app};

#[tokio::test]
async fn international_form_sends_both_emails() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(2).await;

    // Act
    let response = app
        .post_form(
            "/send-email",
            &json!({
                "name": "Ursula Le Guin",
                "phone": "+1 503 555 0100",
                "email": "ursula@example.com"
            }),
        )
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Emails sent successfully." }));

    let emails = app.sent_emails().await;
    assert_eq!(emails[0]["To"], ADMIN_EMAIL);
    assert!(
        emails[1]["From"]
            .as_str()
            .unwrap()
            .starts_with("\"International Certification\"")
    );
}

#[tokio::test]
async fn international_form_rejects_invalid_emails() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(0).await;

    // Act
    let response = app
        .post_form(
            "/send-email",
            &json!({ "name": "Ursula", "phone": "123", "email": "ursula.example.com" }),
        )
        .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid email address." }));
}

#[tokio::test]
async fn international_form_requires_a_phone() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(0).await;

    // Act
    let response = app
        .post_form(
            "/send-email",
            &json!({ "name": "Ursula", "email": "ursula@example.com" }),
        )
        .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Missing required field: phone" }));
}

#[tokio::test]
async fn international_form_accepts_ampersands_in_addresses() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(2).await;

    // Act
    let response = app
        .post_form(
            "/send-email",
            &json!({
                "name": "Tom & Jerry",
                "phone": "+1 503 555 0100",
                "email": "tom&jerry@example.com"
            }),
        )
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let emails = app.sent_emails().await;
    assert_eq!(emails[0]["ReplyTo"], "tom&jerry@example.com");
    assert_eq!(
        emails[0]["Subject"],
        "New International Form Submission from Tom & Jerry"
    );
    assert_eq!(emails[1]["To"], "tom&jerry@example.com");
    assert!(emails[1]["TextBody"].as_str().unwrap().contains("Hello Tom & Jerry,"));
    assert!(
        emails[1]["HtmlBody"]
            .as_str()
            .unwrap()
            .contains("Hello Tom &amp; Jerry,")
    );
}
