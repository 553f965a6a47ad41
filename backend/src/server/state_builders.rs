//! Builders for HTTP state ports backed by the production adapters.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use tracing::warn;
use url::Url;
use zeroize::Zeroizing;

use studio_backend::domain::ports::Mailer;
use studio_backend::domain::{
    AdminSnapshotService, EmailAddress, IdentityLoginService, InquiryService,
    NotificationDispatcher, OrderService, PaymentReconciliationService, PaymentSignaturePolicy,
};
use studio_backend::inbound::http::state::HttpState;
use studio_backend::outbound::identity::{OAuthClientConfig, OAuthEndpoints, OAuthIdentityProvider};
use studio_backend::outbound::mail::{DisabledMailer, SmtpConfig, SmtpMailer};
use studio_backend::outbound::payments::{RazorpayConfig, RazorpayGateway};
use studio_backend::outbound::persistence::{
    DbPool, DieselContactRepository, DieselMaintenanceRepository, DieselOrderRepository,
    DieselUserRepository,
};

use super::config::{AppSettings, SettingsError, required};

fn endpoint(override_url: Option<&String>, default: Url, key: &'static str) -> Result<Url> {
    match override_url {
        Some(raw) => Url::parse(raw).map_err(|err| {
            SettingsError::Invalid {
                key,
                reason: err.to_string(),
            }
            .into()
        }),
        None => Ok(default),
    }
}

fn build_identity(settings: &AppSettings) -> Result<OAuthIdentityProvider> {
    let defaults = OAuthEndpoints::google().wrap_err("default identity endpoints")?;
    let endpoints = OAuthEndpoints {
        authorize: endpoint(
            settings.identity_authorize_url.as_ref(),
            defaults.authorize,
            "identity_authorize_url",
        )?,
        token: endpoint(
            settings.identity_token_url.as_ref(),
            defaults.token,
            "identity_token_url",
        )?,
        userinfo: endpoint(
            settings.identity_userinfo_url.as_ref(),
            defaults.userinfo,
            "identity_userinfo_url",
        )?,
    };
    let config = OAuthClientConfig {
        client_id: required(settings.identity_client_id.as_ref(), "identity_client_id")?
            .to_owned(),
        client_secret: Zeroizing::new(
            required(
                settings.identity_client_secret.as_ref(),
                "identity_client_secret",
            )?
            .to_owned(),
        ),
        redirect_uri: settings.redirect_uri()?,
        endpoints,
    };
    OAuthIdentityProvider::new(config, settings.http_timeout())
        .wrap_err("failed to build identity client")
}

fn build_gateway(settings: &AppSettings) -> Result<RazorpayGateway> {
    let mut config = RazorpayConfig::new(
        required(settings.payment_key_id.as_ref(), "payment_key_id")?,
        required(settings.payment_key_secret.as_ref(), "payment_key_secret")?,
    )
    .wrap_err("default payment api base")?;
    config.currency = settings.payment_currency().to_owned();
    if let Some(base) = settings.payment_api_base.as_ref() {
        config.api_base = endpoint(Some(base), config.api_base, "payment_api_base")?;
    }
    RazorpayGateway::new(config, settings.http_timeout())
        .wrap_err("failed to build payment gateway client")
}

fn build_mailer(settings: &AppSettings) -> Result<Arc<dyn Mailer>> {
    let Some((username, password)) = settings.smtp_credentials() else {
        warn!("smtp credentials missing; notifications will be skipped");
        return Ok(Arc::new(DisabledMailer));
    };
    let mailer = SmtpMailer::new(SmtpConfig {
        host: settings.smtp_host().to_owned(),
        port: settings.smtp_port(),
        username: username.to_owned(),
        password: Zeroizing::new(password.to_owned()),
        timeout: settings.mail_timeout(),
    })
    .wrap_err("failed to build smtp mailer")?;
    Ok(Arc::new(mailer))
}

fn signature_policy(settings: &AppSettings) -> PaymentSignaturePolicy {
    match settings.payment_key_secret.as_deref() {
        Some(secret) if !secret.trim().is_empty() => {
            PaymentSignaturePolicy::new(secret.trim(), settings.require_payment_signature)
        }
        _ => PaymentSignaturePolicy::disabled(),
    }
}

/// Wire every driving port over PostgreSQL and the external collaborators.
///
/// # Errors
///
/// Fails when a required setting is missing or an adapter cannot be built.
pub fn build_http_state(settings: &AppSettings, pool: &DbPool) -> Result<HttpState> {
    let operator = EmailAddress::new(settings.operator_email()?)
        .wrap_err("operator_email is not a valid address")?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let orders = Arc::new(DieselOrderRepository::new(pool.clone()));
    let contacts = Arc::new(DieselContactRepository::new(pool.clone()));
    let maintenance = Arc::new(DieselMaintenanceRepository::new(pool.clone()));

    let dispatcher = NotificationDispatcher::new(build_mailer(settings)?, settings.mail_timeout());
    let order_service = Arc::new(OrderService::new(
        orders.clone(),
        Arc::new(build_gateway(settings)?),
        clock.clone(),
    ));

    Ok(HttpState {
        login: Arc::new(IdentityLoginService::new(
            Arc::new(build_identity(settings)?),
            users.clone(),
            operator.clone(),
            clock.clone(),
        )),
        orders: order_service.clone(),
        order_history: order_service,
        payments: Arc::new(PaymentReconciliationService::new(
            orders.clone(),
            dispatcher.clone(),
            operator.clone(),
            signature_policy(settings),
        )),
        admin: Arc::new(AdminSnapshotService::new(
            users,
            orders,
            contacts.clone(),
            maintenance.clone(),
        )),
        inquiries: Arc::new(InquiryService::new(
            contacts,
            maintenance,
            dispatcher,
            operator,
            clock,
        )),
    })
}
