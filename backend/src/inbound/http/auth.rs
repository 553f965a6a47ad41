//! Identity handshake handlers.
//!
//! ```text
//! GET /login      -> 302 to the identity provider
//! GET /authorize  -> 302 to / once the session is established
//! GET /logout     -> 302 to /, session cleared
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::IntoParams;

use crate::domain::{Error, LoginCallback};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Fixed message returned for every failed handshake.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Where the browser lands after login and logout.
const HOME: &str = "/";

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Start a login by redirecting to the identity provider.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 302, description = "Redirect to the identity provider", headers(("Location" = String))),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[get("/login")]
pub async fn login(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let login = state.login.begin_login()?;
    session.begin_handshake(&login.state)?;
    Ok(redirect(&login.authorization_url))
}

/// Query parameters delivered by the identity provider.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthorizeQuery {
    /// Authorization code.
    pub code: Option<String>,
    /// Anti-forgery state issued by `/login`.
    pub state: Option<String>,
    /// Provider-side error code, when the user declined or the request failed.
    pub error: Option<String>,
}

/// Complete a login and establish the session.
///
/// Failures never echo provider or persistence details; they are logged and
/// answered with a fixed message.
#[utoipa::path(
    get,
    path = "/authorize",
    params(AuthorizeQuery),
    responses(
        (status = 302, description = "Session established", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Login failed", body = Error)
    ),
    tags = ["auth"],
    operation_id = "authorize",
    security([])
)]
#[get("/authorize")]
pub async fn authorize(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AuthorizeQuery>,
) -> ApiResult<HttpResponse> {
    let expected_state = session.take_handshake_state();
    let AuthorizeQuery {
        code,
        state: returned_state,
        error,
    } = query.into_inner();
    if let Some(error) = error {
        warn!(%error, "identity provider reported an error");
    }

    let callback = LoginCallback::new(code, returned_state, expected_state);
    match state.login.complete_login(callback).await {
        Ok(user) => {
            session.persist_user(&user)?;
            info!(email = %user.email, role = user.role.as_str(), "login completed");
            Ok(redirect(HOME))
        }
        Err(error) => {
            warn!(%error, "login failed");
            Err(Error::unauthorized(LOGIN_FAILED_MESSAGE))
        }
    }
}

/// Clear the session. Idempotent.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 302, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    redirect(HOME)
}
