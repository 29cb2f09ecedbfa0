use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, header},
    response::Response,
    routing::{get, post},
    serve::Serve,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Span, info, info_span};
use uuid::Uuid;

use crate::{
    configuration::{CorsSettings, EmailClientSettings, RelayBackend, Settings},
    email_client::{EmailClient, MailRelay, SmtpClient},
    notifications::{Branding, Dispatcher},
    routes::{
        CourseInquiryForm, EnquiryForm, InternationalForm, LeadForm, NewsletterForm,
        RegistrationForm, SupportForm, health_check, submit,
    },
};

pub struct AppState {
    pub dispatcher: Dispatcher,
}

fn form_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/lead", post(submit::<LeadForm>))
        .route("/newsletter", post(submit::<NewsletterForm>))
        .route("/course-inquiry", post(submit::<CourseInquiryForm>))
        .route("/register", post(submit::<RegistrationForm>))
        .route("/support-form", post(submit::<SupportForm>))
        .route("/send-email", post(submit::<InternationalForm>))
        .route("/enquri", post(submit::<EnquiryForm>))
}

/// Browsers only get CORS headers for the listed origins. Callers without an
/// `Origin` header are served as usual.
pub fn cors_layer(settings: &CorsSettings) -> anyhow::Result<CorsLayer> {
    let origins = settings
        .allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

pub async fn run(
    listener: TcpListener,
    dispatcher: Dispatcher,
    cors: &CorsSettings,
) -> anyhow::Result<Serve<TcpListener, Router, Router>> {
    let app_state = Arc::new(AppState { dispatcher });
    let app = Router::new()
        .merge(form_routes())
        .nest("/api", form_routes())
        .with_state(app_state)
        .layer(cors_layer(cors)?)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = Uuid::new_v4();
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        request_id = ?request_id,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    let status = response.status();
                    info!(parent: span, ?status, ?latency, "Response sent");
                }),
        );

    Ok(axum::serve(listener, app))
}

/// Builds the relay selected in the configuration.
pub fn build_relay(settings: EmailClientSettings) -> anyhow::Result<Arc<dyn MailRelay>> {
    let sender = settings.sender().map_err(anyhow::Error::msg)?;
    let timeout = settings.timeout();

    let relay: Arc<dyn MailRelay> = match settings.backend {
        RelayBackend::Http => Arc::new(EmailClient::new(
            sender,
            settings.base_url,
            settings.authorization_token,
            timeout,
        )?),
        RelayBackend::Smtp => Arc::new(SmtpClient::new(&settings.smtp, sender, timeout)?),
    };
    info!(backend = ?settings.backend, "Mail relay configured");

    Ok(relay)
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let notifications = configuration.notifications;
        let dispatcher = Dispatcher::new(
            build_relay(configuration.email_client)?,
            notifications.operators().map_err(anyhow::Error::msg)?,
            notifications.backup().map_err(anyhow::Error::msg)?,
            Branding {
                organisation: notifications.organisation,
                website_url: notifications.website_url,
            },
        );

        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        ))
        .await?;
        let port = listener.local_addr()?.port();
        info!(port, "Listening for form submissions");

        let server = run(listener, dispatcher, &configuration.cors).await?;

        Ok(Self { port, server })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        Ok(self.server.await?)
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
