use std::fmt;

use shared::{domain::PACKAGE_SLOTS, error::InvalidInput};
use thiserror::Error;

/// The three calls the order service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    SubmitOrder,
    FetchHistory,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Login => "login",
            Operation::SubmitOrder => "order submission",
            Operation::FetchHistory => "history fetch",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    AuthenticationFailure,
    SubmissionFailure,
    HistoryFetchFailure,
    TransportFailure,
    InvalidInput,
    Usage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("failed to connect: {0}")]
    Connect(String),
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Failed to authenticate")]
    Authentication,
    #[error("{source}")]
    Transport {
        operation: Operation,
        source: TransportError,
    },
    #[error("HTTP error! status: {status}")]
    Status { operation: Operation, status: u16 },
    #[error("failed to encode {operation} request: {message}")]
    Encode { operation: Operation, message: String },
    #[error("failed to decode {operation} response: {message}")]
    Decode { operation: Operation, message: String },
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("package slot {index} is out of range (expected 0..{max})", max = PACKAGE_SLOTS)]
    PackageSlotOutOfRange { index: usize },
    #[error("order form is locked until login succeeds")]
    NotAuthenticated,
}

impl ClientError {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ClientError::Authentication => Some(Operation::Login),
            ClientError::Transport { operation, .. }
            | ClientError::Status { operation, .. }
            | ClientError::Encode { operation, .. }
            | ClientError::Decode { operation, .. } => Some(*operation),
            ClientError::InvalidInput(_)
            | ClientError::PackageSlotOutOfRange { .. }
            | ClientError::NotAuthenticated => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Transport { .. } => FailureKind::TransportFailure,
            ClientError::InvalidInput(_) => FailureKind::InvalidInput,
            ClientError::PackageSlotOutOfRange { .. } | ClientError::NotAuthenticated => {
                FailureKind::Usage
            }
            _ => match self.operation() {
                Some(Operation::Login) => FailureKind::AuthenticationFailure,
                Some(Operation::SubmitOrder) => FailureKind::SubmissionFailure,
                Some(Operation::FetchHistory) => FailureKind::HistoryFetchFailure,
                None => FailureKind::Usage,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
