//! Events flowing from the backend worker to the UI thread.

use client_core::{ClientError, LoginGrant, WorkflowEvent};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    BackendUnavailable(String),
    Login(Result<LoginGrant, ClientError>),
    Workflow(WorkflowEvent),
}

impl UiEvent {
    /// Events that settle a pending request. Losing one leaves the UI busy.
    pub fn is_terminal(&self) -> bool {
        match self {
            UiEvent::Login(_) | UiEvent::BackendUnavailable(_) => true,
            UiEvent::Workflow(event) => !matches!(event, WorkflowEvent::OrderAccepted { .. }),
            UiEvent::Info(_) => false,
        }
    }
}
