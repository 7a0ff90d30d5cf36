use tracing::warn;

use crate::{
    config::ClientConfig,
    error::ClientError,
    protocol_client::{LoginGrant, OrderServiceClient},
    session::{AuthState, SessionGate},
    view::{LoginView, OrderView, View},
    workflow::{OrderWorkflow, SubmissionTicket, WorkflowEvent},
};

/// Field edits routed through [`OrderDesk::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    UpdateUsername(String),
    UpdatePassword(String),
    UpdateAmount(String),
    UpdatePackageSize { index: usize, value: String },
}

/// Composition root: owns the session gate and the order workflow and only
/// lets the workflow submit once the gate is open.
#[derive(Debug)]
pub struct OrderDesk {
    session: SessionGate,
    workflow: OrderWorkflow,
}

impl OrderDesk {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            session: SessionGate::new(),
            workflow: OrderWorkflow::new(config.invalid_numbers),
        }
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub fn workflow(&self) -> &OrderWorkflow {
        &self.workflow
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), ClientError> {
        match action {
            Action::UpdateUsername(value) => self.session.update_username(value),
            Action::UpdatePassword(value) => self.session.update_password(value),
            Action::UpdateAmount(value) => self.workflow.update_amount(value),
            Action::UpdatePackageSize { index, value } => {
                self.workflow.update_package_size(index, value)?
            }
        }
        Ok(())
    }

    pub async fn login(&mut self, client: &OrderServiceClient) -> AuthState {
        self.session.login(client).await
    }

    pub fn apply_login(&mut self, outcome: Result<LoginGrant, ClientError>) -> AuthState {
        self.session.apply_login(outcome)
    }

    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, ClientError> {
        self.ensure_authenticated()?;
        self.workflow.begin_submission()
    }

    pub fn apply_workflow(&mut self, event: WorkflowEvent) -> bool {
        self.workflow.apply(event)
    }

    pub async fn submit(&mut self, client: &OrderServiceClient) -> Result<(), ClientError> {
        self.ensure_authenticated()?;
        self.workflow.submit(client).await
    }

    fn ensure_authenticated(&self) -> Result<(), ClientError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            warn!("order submission attempted before login");
            Err(ClientError::NotAuthenticated)
        }
    }

    pub fn view(&self) -> View {
        if self.session.is_authenticated() {
            View::Orders(OrderView::from_workflow(&self.workflow))
        } else {
            View::Login(LoginView::from_gate(&self.session))
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
