use super::*;
use crate::{
    error::TransportError,
    protocol_client::LOGIN_PATH,
    test_support::{ok_json, scripted_client, status, TEST_TOKEN},
    transport::{ApiResponse, Method},
};
use serde_json::json;

#[tokio::test]
async fn login_with_any_success_status_authenticates() {
    for code in [200u16, 201, 204, 299] {
        let (client, transport) = scripted_client(vec![Ok(ApiResponse::new(code, "not json"))]);
        let mut gate = SessionGate::new();
        gate.update_username("alice");
        gate.update_password("secret");

        assert_eq!(gate.login(&client).await, AuthState::Authenticated, "status {code}");
        assert_eq!(gate.login_error(), None);
        assert_eq!(transport.requests().len(), 1);
    }
}

#[tokio::test]
async fn login_sends_credentials_and_static_headers() {
    let (client, transport) = scripted_client(vec![ok_json(json!({"message": "ok"}))]);
    let mut gate = SessionGate::new();
    gate.update_username("alice");
    gate.update_password("secret");
    gate.login(&client).await;

    let requests = transport.requests();
    let request = &requests[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, LOGIN_PATH);
    assert_eq!(
        request.body,
        Some(json!({"username": "alice", "password": "secret"}))
    );
    assert_eq!(request.header_value("content-type"), Some("application/json"));
    assert_eq!(request.header_value("Authorization"), Some(TEST_TOKEN));
}

#[tokio::test]
async fn rejected_login_reports_fixed_message() {
    for code in [301u16, 400, 401, 403, 404, 500] {
        let (client, _) = scripted_client(vec![status(code)]);
        let mut gate = SessionGate::new();

        assert_eq!(gate.login(&client).await, AuthState::Unauthenticated);
        assert_eq!(gate.login_error(), Some("Failed to authenticate"));
    }
}

#[tokio::test]
async fn transport_failure_surfaces_transport_message() {
    let (client, _) = scripted_client(vec![Err(TransportError::Connect(
        "connection refused".into(),
    ))]);
    let mut gate = SessionGate::new();

    assert_eq!(gate.login(&client).await, AuthState::Unauthenticated);
    assert_eq!(
        gate.login_error(),
        Some("failed to connect: connection refused")
    );
}

#[tokio::test]
async fn retry_after_failure_clears_error() {
    let (client, transport) = scripted_client(vec![status(401), status(200)]);
    let mut gate = SessionGate::new();
    gate.update_username("alice");
    gate.update_password("wrong");
    gate.login(&client).await;
    assert_eq!(gate.login_error(), Some("Failed to authenticate"));

    gate.update_password("right");
    assert_eq!(gate.login(&client).await, AuthState::Authenticated);
    assert_eq!(gate.login_error(), None);
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn late_failure_does_not_lock_an_open_gate() {
    let mut gate = SessionGate::new();
    gate.apply_login(Ok(LoginGrant { token: None }));
    let state = gate.apply_login(Err(ClientError::Authentication));

    assert_eq!(state, AuthState::Authenticated);
    assert_eq!(gate.login_error(), None);
}

#[test]
fn empty_fields_are_accepted() {
    let mut gate = SessionGate::new();
    gate.update_username("");
    gate.update_password("");
    assert_eq!(gate.login_request(), Credentials::default());
}

#[test]
fn credentials_debug_redacts_password() {
    let credentials = Credentials {
        username: "alice".into(),
        password: "hunter2".into(),
    };
    let rendered = format!("{credentials:?}");
    assert!(rendered.contains("alice"));
    assert!(!rendered.contains("hunter2"));
}
