use std::time::Duration;

use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::ContactEmail;

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub notifications: NotificationSettings,
    pub cors: CorsSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Which mail relay the dispatcher talks to.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RelayBackend {
    /// Hosted provider behind a JSON email API.
    Http,
    Smtp,
}

#[derive(serde::Deserialize)]
pub struct EmailClientSettings {
    pub backend: RelayBackend,
    pub sender_email: String,
    pub base_url: String,
    pub authorization_token: SecretString,
    pub timeout_milliseconds: u64,
    pub smtp: SmtpSettings,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.sender_email.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connection, for local catch-all servers.
    None,
    StartTls,
    /// Implicit TLS, usually port 465.
    Tls,
}

#[derive(serde::Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub security: SmtpSecurity,
    #[serde(default)]
    pub username: String,
    pub password: SecretString,
}

#[derive(serde::Deserialize)]
pub struct NotificationSettings {
    pub organisation: String,
    pub website_url: String,
    pub admin_recipients: Vec<String>,
    #[serde(default)]
    pub backup_recipient: Option<String>,
}

impl NotificationSettings {
    pub fn operators(&self) -> Result<Vec<ContactEmail>, String> {
        if self.admin_recipients.is_empty() {
            return Err("at least one admin recipient must be configured".into());
        }
        self.admin_recipients
            .iter()
            .cloned()
            .map(ContactEmail::parse)
            .collect()
    }

    pub fn backup(&self) -> Result<Option<ContactEmail>, String> {
        self.backup_recipient
            .clone()
            .filter(|address| !address.trim().is_empty())
            .map(ContactEmail::parse)
            .transpose()
    }
}

#[derive(serde::Deserialize)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Layers `configuration/base.yaml`, the file for `APP_ENVIRONMENT`
/// (default `local`) and `APP_`-prefixed environment variables, e.g.
/// `APP_EMAIL_CLIENT__SMTP__HOST=smtp.gmail.com`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory, {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("notifications.admin_recipients")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
