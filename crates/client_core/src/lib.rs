pub mod app;
pub mod config;
pub mod error;
pub mod protocol_client;
pub mod session;
pub mod transport;
pub mod view;
pub mod workflow;

pub use app::{Action, OrderDesk};
pub use config::{load_settings, ClientConfig};
pub use error::{ClientError, FailureKind, Operation, TransportError};
pub use protocol_client::{LoginGrant, OrderServiceClient, SubmitOutcome};
pub use session::{AuthState, Credentials, SessionGate};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
pub use view::{LoginView, OrderView, PackageInput, View};
pub use workflow::{
    run_submission, OrderForm, OrderWorkflow, RequestToken, SubmissionTicket, WorkflowEvent,
    NO_CONTENT_MESSAGE,
};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
