//! Typed calls against the order service, on top of any [`Transport`].

use std::sync::Arc;

use shared::protocol::{
    HistoryEntry, HistoryResponse, LoginRequest, LoginResponse, OrderRequest, OrderResult,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    config::ClientConfig,
    error::{ClientError, Operation},
    session::Credentials,
    transport::{ApiRequest, ApiResponse, HttpTransport, Transport, STATUS_NO_CONTENT},
};

pub const LOGIN_PATH: &str = "/loginUser";
pub const ORDER_PATH: &str = "/order";
pub const HISTORY_PATH: &str = "/getDocument";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    /// Token handed out by the server, if it issued one.
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(OrderResult),
    NoContent,
}

#[derive(Clone)]
pub struct OrderServiceClient {
    transport: Arc<dyn Transport>,
    session_token: Arc<RwLock<String>>,
}

impl OrderServiceClient {
    pub fn new(transport: Arc<dyn Transport>, auth_token: impl Into<String>) -> Self {
        Self {
            transport,
            session_token: Arc::new(RwLock::new(auth_token.into())),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config.server_url, config.request_timeout).map_err(
            |source| ClientError::Transport {
                operation: Operation::Login,
                source,
            },
        )?;
        Ok(Self::new(Arc::new(transport), config.auth_token.clone()))
    }

    pub async fn session_token(&self) -> String {
        self.session_token.read().await.clone()
    }

    async fn send(
        &self,
        operation: Operation,
        request: ApiRequest,
    ) -> Result<ApiResponse, ClientError> {
        let token = self.session_token().await;
        let request = request
            .header("Content-Type", "application/json")
            .header("Authorization", token);
        self.transport
            .send(request)
            .await
            .map_err(|source| ClientError::Transport { operation, source })
    }

    /// Any 2xx counts as success regardless of body; a `token` field in the
    /// body replaces the session token for every later call.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ClientError> {
        let body = serde_json::to_value(LoginRequest {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        })
        .map_err(|err| ClientError::Encode {
            operation: Operation::Login,
            message: err.to_string(),
        })?;

        let response = self
            .send(Operation::Login, ApiRequest::post(LOGIN_PATH, body))
            .await?;
        if !response.is_success() {
            warn!(status = response.status, "login rejected");
            return Err(ClientError::Authentication);
        }

        let token = response
            .decode::<LoginResponse>()
            .ok()
            .and_then(|body| body.token)
            .filter(|token| !token.is_empty());
        if let Some(token) = &token {
            *self.session_token.write().await = token.clone();
            info!("session token issued by server");
        }
        Ok(LoginGrant { token })
    }

    pub async fn submit_order(&self, order: &OrderRequest) -> Result<SubmitOutcome, ClientError> {
        let operation = Operation::SubmitOrder;
        let body = serde_json::to_value(order).map_err(|err| ClientError::Encode {
            operation,
            message: err.to_string(),
        })?;

        let response = self.send(operation, ApiRequest::post(ORDER_PATH, body)).await?;
        if !response.is_success() {
            return Err(ClientError::Status {
                operation,
                status: response.status,
            });
        }
        if response.status == STATUS_NO_CONTENT {
            return Ok(SubmitOutcome::NoContent);
        }
        response
            .decode::<OrderResult>()
            .map(SubmitOutcome::Created)
            .map_err(|err| ClientError::Decode {
                operation,
                message: err.to_string(),
            })
    }

    pub async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let operation = Operation::FetchHistory;
        let response = self.send(operation, ApiRequest::get(HISTORY_PATH)).await?;
        if !response.is_success() {
            return Err(ClientError::Status {
                operation,
                status: response.status,
            });
        }
        response
            .decode::<HistoryResponse>()
            .map(|body| body.history)
            .map_err(|err| ClientError::Decode {
                operation,
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "tests/protocol_client_tests.rs"]
mod tests;
