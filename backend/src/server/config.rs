//! Application settings and the HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use studio_backend::inbound::http::session_config::SessionSettings;
use studio_backend::inbound::http::state::HttpState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_CURRENCY: &str = "INR";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Startup failures caused by missing or malformed settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{key} must be set")]
    Missing { key: &'static str },
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings loaded from `STUDIO_*` environment variables, CLI flags and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDIO")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Pool size override.
    pub database_max_connections: Option<u32>,
    /// Externally visible base URL, used to build the OAuth callback.
    pub public_base_url: Option<String>,
    /// Email address granted the admin role on first login.
    pub operator_email: Option<String>,
    pub identity_client_id: Option<String>,
    pub identity_client_secret: Option<String>,
    pub identity_authorize_url: Option<String>,
    pub identity_token_url: Option<String>,
    pub identity_userinfo_url: Option<String>,
    pub payment_key_id: Option<String>,
    pub payment_key_secret: Option<String>,
    pub payment_currency: Option<String>,
    pub payment_api_base: Option<String>,
    /// Reject confirmations that carry no signature.
    #[ortho_config(default = false)]
    pub require_payment_signature: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// Upper bound on a single notification send, in seconds.
    pub mail_timeout_secs: Option<u64>,
    /// Timeout for identity and payment HTTP calls, in seconds.
    pub http_timeout_secs: Option<u64>,
}

pub(crate) fn required<'a>(
    value: Option<&'a String>,
    key: &'static str,
) -> Result<&'a str, SettingsError> {
    value
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
        .ok_or(SettingsError::Missing { key })
}

impl AppSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
                key: "bind_addr",
                reason: err.to_string(),
            })
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_ref(), "database_url")
    }

    pub fn operator_email(&self) -> Result<&str, SettingsError> {
        required(self.operator_email.as_ref(), "operator_email")
    }

    /// Absolute URL of the `/authorize` callback.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when the public base URL does not
    /// parse.
    pub fn redirect_uri(&self) -> Result<url::Url, SettingsError> {
        let base = self
            .public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL);
        url::Url::parse(base)
            .and_then(|base| base.join("/authorize"))
            .map_err(|err| SettingsError::Invalid {
                key: "public_base_url",
                reason: err.to_string(),
            })
    }

    pub fn payment_currency(&self) -> &str {
        self.payment_currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn smtp_host(&self) -> &str {
        self.smtp_host.as_deref().unwrap_or(DEFAULT_SMTP_HOST)
    }

    pub fn smtp_port(&self) -> u16 {
        self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT)
    }

    /// Relay credentials, present only when both username and password are set.
    pub fn smtp_credentials(&self) -> Option<(&str, &str)> {
        let username = required(self.smtp_username.as_ref(), "smtp_username").ok()?;
        let password = required(self.smtp_password.as_ref(), "smtp_password").ok()?;
        Some((username, password))
    }

    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mail_timeout_secs.unwrap_or(DEFAULT_MAIL_TIMEOUT_SECS))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }
}

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            session,
            bind_addr,
            http_state,
        }
    }
}
