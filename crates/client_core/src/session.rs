//! Session gate: login form state and the authentication transition.

use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    error::ClientError,
    protocol_client::{LoginGrant, OrderServiceClient},
};

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// `Authenticated` is terminal: there is no logout.
#[derive(Debug, Default)]
pub struct SessionGate {
    credentials: Credentials,
    auth_state: AuthState,
    login_error: Option<String>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_username(&mut self, value: impl Into<String>) {
        self.credentials.username = value.into();
    }

    pub fn update_password(&mut self, value: impl Into<String>) {
        self.credentials.password = value.into();
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth_state
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state == AuthState::Authenticated
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Snapshot of the credentials to send, for callers that run the
    /// network call elsewhere and report back through [`Self::apply_login`].
    pub fn login_request(&self) -> Credentials {
        self.credentials.clone()
    }

    pub fn apply_login(&mut self, outcome: Result<LoginGrant, ClientError>) -> AuthState {
        match outcome {
            Ok(grant) => {
                info!(
                    username = %self.credentials.username,
                    server_token = grant.token.is_some(),
                    "login succeeded"
                );
                self.auth_state = AuthState::Authenticated;
                self.login_error = None;
            }
            Err(err) if self.is_authenticated() => {
                debug!("ignoring late login failure after authentication: {err}");
            }
            Err(err) => {
                warn!(username = %self.credentials.username, kind = ?err.kind(), "login failed: {err}");
                self.login_error = Some(err.to_string());
            }
        }
        self.auth_state
    }

    /// Sends exactly one login request and commits its outcome.
    pub async fn login(&mut self, client: &OrderServiceClient) -> AuthState {
        let credentials = self.login_request();
        let outcome = client.login(&credentials).await;
        self.apply_login(outcome)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
