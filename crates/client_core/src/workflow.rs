//! Order workflow: form state, the submit-then-fetch-history sequence, and the
//! reducer that folds its events into renderable state.
//!
//! Each submission is stamped with a [`RequestToken`]. Only events carrying the
//! most recently issued token are applied, so a slow earlier submission can
//! never overwrite the state produced by a later one.

use shared::{
    domain::{parse_numeric, InvalidNumberPolicy, OrderField, PACKAGE_SLOTS},
    error::InvalidInput,
    protocol::{HistoryEntry, OrderRequest},
};
use tracing::{debug, error, info};

use crate::{
    error::ClientError,
    protocol_client::{OrderServiceClient, SubmitOutcome},
    view::format_order_result,
};

pub const NO_CONTENT_MESSAGE: &str = "POST request was successful but no content returned";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    amount: String,
    package_sizes: [String; PACKAGE_SLOTS],
}

impl OrderForm {
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn package_sizes(&self) -> &[String; PACKAGE_SLOTS] {
        &self.package_sizes
    }

    pub fn set_amount(&mut self, value: impl Into<String>) {
        self.amount = value.into();
    }

    pub fn set_package_size(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), ClientError> {
        let slot = self
            .package_sizes
            .get_mut(index)
            .ok_or(ClientError::PackageSlotOutOfRange { index })?;
        *slot = value.into();
        Ok(())
    }

    /// Parses every field and builds the wire request. Under
    /// [`InvalidNumberPolicy::Reject`] the first invalid field, amount first,
    /// aborts the conversion.
    pub fn to_request(&self, policy: InvalidNumberPolicy) -> Result<OrderRequest, InvalidInput> {
        let order_amount = parse_numeric(OrderField::Amount, &self.amount).into_wire(policy)?;
        let mut package_sizes: [Option<serde_json::Number>; PACKAGE_SLOTS] = Default::default();
        for (index, raw) in self.package_sizes.iter().enumerate() {
            package_sizes[index] =
                parse_numeric(OrderField::PackageSize(index), raw).into_wire(policy)?;
        }
        Ok(OrderRequest {
            order_amount,
            package_sizes,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(pub u64);

impl RequestToken {
    fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionTicket {
    pub token: RequestToken,
    pub request: OrderRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    OrderAccepted {
        token: RequestToken,
        message: String,
    },
    HistoryLoaded {
        token: RequestToken,
        entries: Vec<HistoryEntry>,
    },
    Failed {
        token: RequestToken,
        error: ClientError,
    },
}

impl WorkflowEvent {
    pub fn token(&self) -> RequestToken {
        match self {
            WorkflowEvent::OrderAccepted { token, .. }
            | WorkflowEvent::HistoryLoaded { token, .. }
            | WorkflowEvent::Failed { token, .. } => *token,
        }
    }
}

/// Runs the network half of one submission: post the order, then fetch the
/// history. `emit` sees `OrderAccepted` before the history request is sent.
/// A failure at either step emits `Failed` and stops the sequence.
pub async fn run_submission<F>(client: &OrderServiceClient, ticket: &SubmissionTicket, mut emit: F)
where
    F: FnMut(WorkflowEvent),
{
    let token = ticket.token;

    let message = match client.submit_order(&ticket.request).await {
        Ok(SubmitOutcome::Created(result)) => format_order_result(&result),
        Ok(SubmitOutcome::NoContent) => NO_CONTENT_MESSAGE.to_string(),
        Err(error) => {
            emit(WorkflowEvent::Failed { token, error });
            return;
        }
    };
    emit(WorkflowEvent::OrderAccepted { token, message });

    match client.fetch_history().await {
        Ok(entries) => emit(WorkflowEvent::HistoryLoaded { token, entries }),
        Err(error) => emit(WorkflowEvent::Failed { token, error }),
    }
}

#[derive(Debug, Default)]
pub struct OrderWorkflow {
    form: OrderForm,
    policy: InvalidNumberPolicy,
    latest: RequestToken,
    in_flight: bool,
    result_message: String,
    error: Option<String>,
    /// Rejection from the last `begin_submission`; outlives events from a
    /// submission that was already in flight.
    input_error: Option<String>,
    history: Vec<HistoryEntry>,
}

impl OrderWorkflow {
    pub fn new(policy: InvalidNumberPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn update_amount(&mut self, value: impl Into<String>) {
        self.form.set_amount(value);
    }

    pub fn update_package_size(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.form.set_package_size(index, value)
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn policy(&self) -> InvalidNumberPolicy {
        self.policy
    }

    pub fn result_message(&self) -> &str {
        &self.result_message
    }

    pub fn error(&self) -> Option<&str> {
        self.input_error.as_deref().or(self.error.as_deref())
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn latest_token(&self) -> RequestToken {
        self.latest
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Parses the form and issues a new token. Rejected input is recorded as
    /// the workflow error and does not supersede a submission in flight.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, ClientError> {
        let request = match self.form.to_request(self.policy) {
            Ok(request) => request,
            Err(invalid) => {
                error!(field = %invalid.field, "order form rejected before submission");
                let err = ClientError::from(invalid);
                self.input_error = Some(err.to_string());
                return Err(err);
            }
        };

        self.latest = self.latest.next();
        self.in_flight = true;
        self.error = None;
        self.input_error = None;
        info!(token = self.latest.0, "submitting order");
        Ok(SubmissionTicket {
            token: self.latest,
            request,
        })
    }

    /// Commits one event. Returns `false` when the event belongs to a
    /// superseded submission and was dropped.
    pub fn apply(&mut self, event: WorkflowEvent) -> bool {
        let token = event.token();
        if token != self.latest {
            debug!(
                token = token.0,
                latest = self.latest.0,
                "dropping event from superseded submission"
            );
            return false;
        }

        match event {
            WorkflowEvent::OrderAccepted { message, .. } => {
                self.result_message = message;
            }
            WorkflowEvent::HistoryLoaded { entries, .. } => {
                info!(token = token.0, entries = entries.len(), "order history refreshed");
                self.history = entries;
                self.error = None;
                self.in_flight = false;
            }
            WorkflowEvent::Failed { error: err, .. } => {
                error!(
                    token = token.0,
                    operation = ?err.operation(),
                    status = ?err.status(),
                    kind = ?err.kind(),
                    "order workflow failed: {err}"
                );
                self.error = Some(err.to_string());
                self.in_flight = false;
            }
        }
        true
    }

    /// Full submission sequence against `client`, committing each step as it
    /// settles. The returned error has already been recorded in the workflow.
    pub async fn submit(&mut self, client: &OrderServiceClient) -> Result<(), ClientError> {
        let ticket = self.begin_submission()?;
        let mut failure = None;
        run_submission(client, &ticket, |event| {
            if let WorkflowEvent::Failed { error, .. } = &event {
                failure = Some(error.clone());
            }
            self.apply(event);
        })
        .await;
        failure.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
