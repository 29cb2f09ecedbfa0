use std::sync::LazyLock;

use form_mailer::{
    configuration::{RelayBackend, get_configuration},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// Opt into logs with `TEST_LOG=true cargo test | bunyan`.
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const ADMIN_EMAIL: &str = "admin@newus.in";
pub const BACKUP_EMAIL: &str = "backup@newus.in";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_form(&self, route: &str, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", &self.address, route))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw(&self, route: &str, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", &self.address, route))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Every request the relay received, as parsed JSON, in arrival order.
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }

    pub async fn relay_accepts(&self, expected_calls: u64) {
        Mock::given(path("/email"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(expected_calls)
            .mount(&self.email_server)
            .await;
    }
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    let email_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = 0;
        c.email_client.backend = RelayBackend::Http;
        c.email_client.base_url = email_server.uri();
        c.email_client.timeout_milliseconds = 2000;
        c.notifications.admin_recipients = vec![ADMIN_EMAIL.to_string()];
        c.notifications.backup_recipient = Some(BACKUP_EMAIL.to_string());
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let port = application.port();
    tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        port,
        email_server,
        api_client: reqwest::Client::new(),
    }
}
