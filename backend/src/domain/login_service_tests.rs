//! Tests for the identity login service.

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::IdentityProfile;
use crate::domain::ports::{MockIdentityProvider, MockUserRepository, UserPersistenceError};

const OPERATOR: &str = "ops@studio.test";

fn profile(email: &str) -> IdentityProfile {
    IdentityProfile::try_from_parts("g-1", "Ada", email, None).expect("valid profile")
}

fn callback(code: Option<&str>) -> LoginCallback {
    LoginCallback::new(
        code.map(str::to_owned),
        Some("s1".to_owned()),
        Some("s1".to_owned()),
    )
}

#[fixture]
fn operator() -> EmailAddress {
    EmailAddress::new(OPERATOR).expect("operator email")
}

fn service(
    identity: MockIdentityProvider,
    users: MockUserRepository,
    operator: EmailAddress,
) -> IdentityLoginService<MockUserRepository> {
    IdentityLoginService::new(
        Arc::new(identity),
        Arc::new(users),
        operator,
        Arc::new(DefaultClock),
    )
}

#[rstest]
fn begin_login_issues_state_in_url(operator: EmailAddress) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_authorization_url()
        .times(1)
        .returning(|state| Ok(format!("https://idp.test/auth?state={state}")));

    let redirect = service(identity, MockUserRepository::new(), operator)
        .begin_login()
        .expect("redirect");

    assert!(!redirect.state.is_empty());
    assert!(redirect.authorization_url.ends_with(&redirect.state));
}

#[rstest]
#[tokio::test]
async fn first_login_creates_user_with_user_role(operator: EmailAddress) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_exchange_code()
        .withf(|code| code == "c1")
        .return_once(|_| Ok(profile("a@x.com")));
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert_if_absent()
        .withf(|user| user.role() == Role::User && user.email().as_ref() == "a@x.com")
        .times(1)
        .returning(|user| Ok(user.clone()));

    let session = service(identity, users, operator)
        .complete_login(callback(Some("c1")))
        .await
        .expect("login succeeds");

    assert_eq!(session.email.as_ref(), "a@x.com");
    assert_eq!(session.role, Role::User);
}

#[rstest]
#[tokio::test]
async fn operator_is_registered_as_admin(operator: EmailAddress) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_exchange_code()
        .return_once(|_| Ok(profile(OPERATOR)));
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert_if_absent()
        .returning(|user| Ok(user.clone()));

    let session = service(identity, users, operator)
        .complete_login(callback(Some("c1")))
        .await
        .expect("login succeeds");

    assert_eq!(session.role, Role::Admin);
}

#[rstest]
#[tokio::test]
async fn returning_user_keeps_stored_role(operator: EmailAddress) {
    let stored = User::register(profile("a@x.com"), Role::Admin, Utc::now());
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_exchange_code()
        .return_once(|_| Ok(profile("a@x.com")));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(stored)));
    users.expect_insert_if_absent().times(0);

    let session = service(identity, users, operator)
        .complete_login(callback(Some("c1")))
        .await
        .expect("login succeeds");

    assert_eq!(session.role, Role::Admin);
}

#[rstest]
#[tokio::test]
async fn state_mismatch_stops_before_the_provider(operator: EmailAddress) {
    let mut identity = MockIdentityProvider::new();
    identity.expect_exchange_code().times(0);

    let err = service(identity, MockUserRepository::new(), operator)
        .complete_login(LoginCallback::new(
            Some("c1".into()),
            Some("forged".into()),
            Some("s1".into()),
        ))
        .await
        .expect_err("state mismatch");

    assert_eq!(err, LoginError::StateMismatch);
}

#[rstest]
#[tokio::test]
async fn missing_code_is_reported(operator: EmailAddress) {
    let err = service(MockIdentityProvider::new(), MockUserRepository::new(), operator)
        .complete_login(callback(None))
        .await
        .expect_err("missing code");

    assert_eq!(err, LoginError::MissingCode);
}

#[rstest]
#[case(IdentityProviderError::rejected("invalid_grant"), "rejected")]
#[case(IdentityProviderError::incomplete_profile("email"), "incomplete")]
#[tokio::test]
async fn provider_failures_are_typed(
    operator: EmailAddress,
    #[case] failure: IdentityProviderError,
    #[case] kind: &str,
) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_exchange_code()
        .return_once(move |_| Err(failure));

    let err = service(identity, MockUserRepository::new(), operator)
        .complete_login(callback(Some("c1")))
        .await
        .expect_err("provider failure");

    match kind {
        "rejected" => assert!(matches!(err, LoginError::ProviderRejected(_))),
        _ => assert!(matches!(err, LoginError::ProfileIncomplete(_))),
    }
}

#[rstest]
#[tokio::test]
async fn persistence_failures_are_typed(operator: EmailAddress) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_exchange_code()
        .return_once(|_| Ok(profile("a@x.com")));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Err(UserPersistenceError::connection("pool exhausted")));

    let err = service(identity, users, operator)
        .complete_login(callback(Some("c1")))
        .await
        .expect_err("persistence failure");

    assert!(matches!(err, LoginError::Persistence(_)));
}
