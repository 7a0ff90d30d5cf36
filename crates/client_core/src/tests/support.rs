use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    error::TransportError,
    protocol_client::OrderServiceClient,
    transport::{ApiRequest, ApiResponse, Transport},
};

pub const TEST_TOKEN: &str = "valid-token";

/// Replays canned responses in order and records every request it was sent.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<ApiResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().expect("requests lock").push(request);
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response left".into())))
    }
}

pub fn scripted_client(
    responses: Vec<Result<ApiResponse, TransportError>>,
) -> (OrderServiceClient, Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::new(responses);
    let client = OrderServiceClient::new(transport.clone(), TEST_TOKEN);
    (client, transport)
}

pub fn ok_json(body: Value) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::json(200, &body))
}

pub fn status(code: u16) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::empty(code))
}

pub fn history_body(entries: &[(i64, &[i64])]) -> Value {
    let history: Vec<Value> = entries
        .iter()
        .map(|(amount, result)| json!({"order": {"amount": amount, "result": result}}))
        .collect();
    json!({ "history": history })
}
