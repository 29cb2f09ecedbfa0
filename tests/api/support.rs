use serde_json::json;

use crate::helpers::{ADMIN_EMAIL, BACKUP_EMAIL, spawn_app};

fn valid_ticket() -> serde_json::Value {
    json!({
        "fullname": "Ursula Le Guin",
        "email": "ursula@example.com",
        "phone": "9876543210",
        "subject": "Login trouble",
        "message": "I cannot sign in."
    })
}

#[tokio::test]
async fn support_form_replies_with_a_plain_message() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(2).await;

    // Act
    let response = app.post_form("/support-form", &valid_ticket()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "Form submitted and auto-reply sent successfully." })
    );
}

#[tokio::test]
async fn support_tickets_also_reach_the_backup_inbox() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(2).await;

    // Act
    app.post_form("/support-form", &valid_ticket()).await;

    // Assert
    let emails = app.sent_emails().await;
    assert_eq!(
        emails[0]["To"],
        format!("{}, {}", BACKUP_EMAIL, ADMIN_EMAIL)
    );
    assert_eq!(emails[0]["Subject"], "Login trouble from Ursula Le Guin");
    assert!(
        emails[1]["HtmlBody"]
            .as_str()
            .unwrap()
            .contains("I cannot sign in.")
    );
}

#[tokio::test]
async fn support_form_without_a_message_is_rejected() {
    // Arrange
    let app = spawn_app().await;
    app.relay_accepts(0).await;
    let mut body = valid_ticket();
    body.as_object_mut().unwrap().remove("message");

    // Act
    let response = app.post_form("/support-form", &body).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Missing required field: message" }));
}

#[tokio::test]
async fn support_form_failures_hide_the_cause() {
    // Arrange
    let app = spawn_app().await;
    wiremock::Mock::given(wiremock::matchers::any())
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_form("/support-form", &valid_ticket()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "Something went wrong. Please try again later." })
    );
}
