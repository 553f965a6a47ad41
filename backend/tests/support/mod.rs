//! Shared helpers for HTTP integration tests.
//!
//! Each test builds the production route table (`configure`) over in-memory
//! adapters from `studio_backend::test_support` and drives it with
//! `actix_web::test`.

#![allow(dead_code, reason = "each integration test uses a subset of helpers")]

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, Error, test, web};
use serde_json::Value;
use studio_backend::Trace;
use studio_backend::inbound::http::configure;
use studio_backend::test_support::harness::Harness;

/// Cookie-session middleware with a throwaway key and no `Secure` flag.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build the full application over `harness`.
pub async fn app(
    harness: &Harness,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(session_middleware())
            .wrap(Trace)
            .app_data(web::Data::new(harness.http_state()))
            .configure(configure),
    )
    .await
}

/// Session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

fn location<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

/// Run the `/login` → `/authorize` handshake for a registered stub profile
/// and return the authenticated session cookie.
pub async fn login<S, B>(app: &S, harness: &Harness, name: &str, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let code = format!("code-for-{email}");
    harness.identity.register(&code, name, email);

    let begin = test::call_service(app, test::TestRequest::get().uri("/login").to_request()).await;
    assert_eq!(begin.status(), StatusCode::FOUND);
    let handshake = session_cookie(&begin);
    let redirect = location(&begin);
    let (_, state) = redirect.split_once("state=").expect("state in redirect");

    let complete = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/authorize?code={code}&state={state}"))
            .cookie(handshake)
            .to_request(),
    )
    .await;
    assert_eq!(complete.status(), StatusCode::FOUND);
    assert_eq!(location(&complete), "/");
    session_cookie(&complete)
}

/// Send `request` and decode the JSON body alongside the status.
pub async fn call_json<S, B>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}
