//! Session policy behaviour when a registrant changes after login.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use support::{decide, login, registry_app, send, signup};
use voter_registry::domain::SessionPolicy;

#[rstest]
#[case::snapshot_is_trusted(SessionPolicy::TrustSnapshot, StatusCode::OK)]
#[case::refusal_takes_effect(SessionPolicy::Revalidate, StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn refusal_after_login(#[case] policy: SessionPolicy, #[case] expected: StatusCode) {
    let app = registry_app(policy).await;
    let admin = signup(&app, "adminA", "admin", "C1")
        .await
        .cookie
        .expect("admin session");
    signup(&app, "bob", "user", "C1").await;
    decide(&app, &admin, "accept", "bob").await;
    let bob = login(&app, "bob").await.cookie.expect("bob session");

    let refused = decide(&app, &admin, "refuse", "bob").await;
    assert_eq!(refused.status, StatusCode::OK);

    let reply = send(&app, TestRequest::get().uri("/api/voters"), Some(&bob)).await;
    assert_eq!(reply.status, expected);
    if expected == StatusCode::FORBIDDEN {
        assert_eq!(reply.body["code"], "not_approved");
    }
}

#[rstest]
#[case(SessionPolicy::TrustSnapshot)]
#[case(SessionPolicy::Revalidate)]
#[actix_web::test]
async fn current_user_echoes_the_snapshot(#[case] policy: SessionPolicy) {
    let app = registry_app(policy).await;
    let admin = signup(&app, "adminA", "admin", "C7")
        .await
        .cookie
        .expect("admin session");

    let reply = send(&app, TestRequest::get().uri("/api/user"), Some(&admin)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["username"], "adminA");
    assert_eq!(reply.body["user"]["role"], "admin");
    assert_eq!(reply.body["user"]["constituency"], "C7");
}

#[rstest]
#[case(SessionPolicy::TrustSnapshot)]
#[case(SessionPolicy::Revalidate)]
#[actix_web::test]
async fn logout_ends_access(#[case] policy: SessionPolicy) {
    let app = registry_app(policy).await;
    let admin = signup(&app, "adminA", "admin", "C1")
        .await
        .cookie
        .expect("admin session");

    let out = send(&app, TestRequest::post().uri("/api/logout"), Some(&admin)).await;
    assert_eq!(out.status, StatusCode::OK);
    let cleared = out.cookie.expect("removal cookie");

    let reply = send(&app, TestRequest::get().uri("/api/user"), Some(&cleared)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}
