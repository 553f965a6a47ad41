//! Reqwest-backed OAuth 2.0 authorization-code client.
//!
//! The adapter owns transport details only: building the consent redirect,
//! exchanging the returned code at the token endpoint and reading the caller's
//! profile from the userinfo endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{OAuthErrorDto, TokenResponseDto, UserInfoDto};
use crate::domain::IdentityProfile;
use crate::domain::ports::{IdentityProvider, IdentityProviderError};

const SCOPE: &str = "openid email profile";
const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Provider endpoints used by the authorization-code flow.
#[derive(Debug, Clone)]
pub struct OAuthEndpoints {
    pub authorize: Url,
    pub token: Url,
    pub userinfo: Url,
}

impl OAuthEndpoints {
    /// Google's published OpenID Connect endpoints.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the constants are valid URLs.
    pub fn google() -> Result<Self, url::ParseError> {
        Ok(Self {
            authorize: Url::parse(GOOGLE_AUTHORIZE_URL)?,
            token: Url::parse(GOOGLE_TOKEN_URL)?,
            userinfo: Url::parse(GOOGLE_USERINFO_URL)?,
        })
    }
}

/// Client registration for the identity provider.
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
    /// Absolute URL of this service's `/authorize` callback.
    pub redirect_uri: Url,
    pub endpoints: OAuthEndpoints,
}

/// Identity provider adapter speaking the OAuth 2.0 authorization-code flow.
pub struct OAuthIdentityProvider {
    client: Client,
    config: OAuthClientConfig,
}

impl OAuthIdentityProvider {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: OAuthClientConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    async fn exchange_token(&self, code: &str) -> Result<String, IdentityProviderError> {
        let response = self
            .client
            .post(self.config.endpoints.token.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_token(body.as_ref())
    }

    async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> Result<IdentityProfile, IdentityProviderError> {
        let response = self
            .client
            .get(self.config.endpoints.userinfo.clone())
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_profile(body.as_ref())
    }
}

#[async_trait]
impl IdentityProvider for OAuthIdentityProvider {
    fn authorization_url(&self, state: &str) -> Result<String, IdentityProviderError> {
        build_authorization_url(&self.config, state).map(String::from)
    }

    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, IdentityProviderError> {
        let access_token = Zeroizing::new(self.exchange_token(code).await?);
        self.fetch_profile(access_token.as_str()).await
    }
}

fn build_authorization_url(
    config: &OAuthClientConfig,
    state: &str,
) -> Result<Url, IdentityProviderError> {
    if config.endpoints.authorize.cannot_be_a_base() {
        return Err(IdentityProviderError::configuration(format!(
            "authorize endpoint `{}` is not a base URL",
            config.endpoints.authorize
        )));
    }
    let mut url = config.endpoints.authorize.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", config.redirect_uri.as_str())
        .append_pair("scope", SCOPE)
        .append_pair("state", state);
    Ok(url)
}

fn parse_token(body: &[u8]) -> Result<String, IdentityProviderError> {
    let decoded: TokenResponseDto = serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::rejected(format!("invalid token response: {error}"))
    })?;
    if decoded.access_token.trim().is_empty() {
        return Err(IdentityProviderError::rejected(
            "token response carried an empty access token",
        ));
    }
    Ok(decoded.access_token)
}

fn parse_profile(body: &[u8]) -> Result<IdentityProfile, IdentityProviderError> {
    let decoded: UserInfoDto = serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::incomplete_profile(format!("invalid userinfo payload: {error}"))
    })?;
    decoded.into_profile()
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    let detail = serde_json::from_slice::<OAuthErrorDto>(body)
        .map(|dto| dto.describe())
        .unwrap_or_else(|_| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    if status.is_client_error() {
        IdentityProviderError::rejected(message)
    } else {
        IdentityProviderError::transport(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network parts of the OAuth client.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> OAuthClientConfig {
        OAuthClientConfig {
            client_id: "client-123".to_owned(),
            client_secret: Zeroizing::new("shh".to_owned()),
            redirect_uri: Url::parse("https://studio.example/authorize").expect("valid url"),
            endpoints: OAuthEndpoints::google().expect("google endpoints"),
        }
    }

    #[rstest]
    fn authorization_url_carries_the_code_flow_parameters(config: OAuthClientConfig) {
        let url = build_authorization_url(&config, "state-abc").expect("url builds");
        assert!(url.as_str().starts_with(GOOGLE_AUTHORIZE_URL));

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let value = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .expect("query parameter present")
        };
        assert_eq!(value("response_type"), "code");
        assert_eq!(value("client_id"), "client-123");
        assert_eq!(value("redirect_uri"), "https://studio.example/authorize");
        assert_eq!(value("scope"), "openid email profile");
        assert_eq!(value("state"), "state-abc");
    }

    #[rstest]
    fn authorization_url_never_leaks_the_client_secret(config: OAuthClientConfig) {
        let url = build_authorization_url(&config, "s").expect("url builds");
        assert!(!url.as_str().contains("shh"));
    }

    #[rstest]
    fn non_base_authorize_endpoint_is_a_configuration_error(mut config: OAuthClientConfig) {
        config.endpoints.authorize = Url::parse("mailto:ops@studio.example").expect("valid url");
        let err = build_authorization_url(&config, "s").expect_err("must fail");
        assert!(matches!(err, IdentityProviderError::Configuration { .. }));
    }

    #[rstest]
    fn parses_access_token() {
        let token = parse_token(br#"{"access_token":"ya29.token","token_type":"Bearer"}"#)
            .expect("token parses");
        assert_eq!(token, "ya29.token");
    }

    #[rstest]
    #[case::not_json(b"<html>".as_slice())]
    #[case::missing_token(br#"{"token_type":"Bearer"}"#.as_slice())]
    #[case::blank_token(br#"{"access_token":"  "}"#.as_slice())]
    fn rejects_unusable_token_responses(#[case] body: &[u8]) {
        let err = parse_token(body).expect_err("must fail");
        assert!(matches!(err, IdentityProviderError::Rejected { .. }));
    }

    #[rstest]
    #[case::oidc_sub(r#"{"sub":"g-1","name":"Ada","email":"ada@example.com","picture":"https://p/x.png"}"#)]
    #[case::legacy_id(r#"{"id":"g-1","name":"Ada","email":"ada@example.com","picture":"https://p/x.png"}"#)]
    fn parses_userinfo_profiles(#[case] body: &str) {
        let profile = parse_profile(body.as_bytes()).expect("profile parses");
        assert_eq!(profile.external_id, "g-1");
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.email.as_ref(), "ada@example.com");
        assert_eq!(profile.picture.as_deref(), Some("https://p/x.png"));
    }

    #[rstest]
    #[case::missing_email(r#"{"sub":"g-1","name":"Ada"}"#)]
    #[case::missing_name(r#"{"sub":"g-1","email":"ada@example.com"}"#)]
    #[case::blank_name(r#"{"sub":"g-1","name":" ","email":"ada@example.com"}"#)]
    #[case::bad_email(r#"{"sub":"g-1","name":"Ada","email":"nope"}"#)]
    fn incomplete_profiles_are_reported(#[case] body: &str) {
        let err = parse_profile(body.as_bytes()).expect_err("must fail");
        assert!(matches!(err, IdentityProviderError::IncompleteProfile { .. }));
    }

    #[rstest]
    #[case::bad_request(StatusCode::BAD_REQUEST, true)]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, true)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case::unavailable(StatusCode::SERVICE_UNAVAILABLE, false)]
    fn maps_http_statuses(#[case] status: StatusCode, #[case] rejected: bool) {
        let err = map_status_error(status, br#"{"error":"invalid_grant","error_description":"Bad code"}"#);
        if rejected {
            assert!(matches!(err, IdentityProviderError::Rejected { .. }));
        } else {
            assert!(matches!(err, IdentityProviderError::Transport { .. }));
        }
        assert!(err.to_string().contains("invalid_grant: Bad code"));
    }

    #[rstest]
    fn status_errors_fall_back_to_a_body_preview() {
        let body = "x".repeat(200);
        let err = map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes());
        assert!(err.to_string().ends_with("..."));
    }
}
