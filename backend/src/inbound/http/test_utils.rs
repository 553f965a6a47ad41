//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use crate::domain::ports::{
    MockAdminQuery, MockInquiryCommand, MockLoginService, MockOrderCommand, MockOrderQuery,
    MockPaymentConfirmation,
};
use crate::domain::{AuthenticatedUser, EmailAddress, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path of the helper route that seeds a session in handler tests.
pub const SEED_SESSION_PATH: &str = "/__test/session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Session identity for a caller with `email` and `role`.
pub fn session_user(email: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        name: "Test User".into(),
        email: EmailAddress::new(email).expect("valid email"),
        picture: None,
        role,
    }
}

/// Handler storing the posted identity in the session, so tests can act as
/// an authenticated caller without running the identity handshake.
pub async fn seed_session(
    session: SessionContext,
    user: web::Json<AuthenticatedUser>,
) -> ApiResult<HttpResponse> {
    session.persist_user(&user.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mock driving ports; set expectations on the fields a test exercises and
/// leave the rest untouched so unexpected calls fail loudly.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub orders: MockOrderCommand,
    pub order_history: MockOrderQuery,
    pub payments: MockPaymentConfirmation,
    pub admin: MockAdminQuery,
    pub inquiries: MockInquiryCommand,
}

impl MockPorts {
    /// Wrap the mocks into handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            orders: Arc::new(self.orders),
            order_history: Arc::new(self.order_history),
            payments: Arc::new(self.payments),
            admin: Arc::new(self.admin),
            inquiries: Arc::new(self.inquiries),
        })
    }
}

/// Start an authenticated session for `user` and return its cookie.
///
/// The app under test must mount [`seed_session`] at [`SEED_SESSION_PATH`].
pub async fn login_cookie<S, B>(app: &S, user: &AuthenticatedUser) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse<B>,
            Error = actix_web::Error,
        >,
{
    let response = actix_web::test::call_service(
        app,
        actix_web::test::TestRequest::post()
            .uri(SEED_SESSION_PATH)
            .set_json(user)
            .to_request(),
    )
    .await;
    session_cookie(&response)
}
