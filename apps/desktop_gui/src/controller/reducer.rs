//! Applies backend events to the order desk and the shell chrome around it.

use client_core::{AuthState, OrderDesk};

use crate::controller::events::UiEvent;

/// UI-only state that is not part of the order desk itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    pub status: String,
    pub login_pending: bool,
    pub backend_available: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            status: "Starting...".to_string(),
            login_pending: false,
            backend_available: true,
        }
    }
}

pub fn reduce(desk: &mut OrderDesk, shell: &mut ShellState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => shell.status = message,
        UiEvent::BackendUnavailable(message) => {
            shell.backend_available = false;
            shell.login_pending = false;
            shell.status = message;
        }
        UiEvent::Login(outcome) => {
            shell.login_pending = false;
            shell.status = match desk.apply_login(outcome) {
                AuthState::Authenticated => "Signed in".to_string(),
                AuthState::Unauthenticated => "Sign-in failed".to_string(),
            };
        }
        UiEvent::Workflow(event) => {
            let token = event.token();
            if !desk.apply_workflow(event) {
                tracing::debug!(token = token.0, "dropped stale workflow event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{
        Action, ClientConfig, ClientError, LoginGrant, Operation, View, WorkflowEvent,
    };

    fn signed_in_desk() -> OrderDesk {
        let mut desk = OrderDesk::new(&ClientConfig::default());
        desk.apply_login(Ok(LoginGrant { token: None }));
        desk.dispatch(Action::UpdateAmount("3".into())).expect("amount");
        for index in 0..5 {
            desk.dispatch(Action::UpdatePackageSize {
                index,
                value: "1".into(),
            })
            .expect("slot");
        }
        desk
    }

    #[test]
    fn failed_login_keeps_login_screen_and_clears_pending() {
        let mut desk = OrderDesk::new(&ClientConfig::default());
        let mut shell = ShellState {
            login_pending: true,
            ..ShellState::default()
        };

        reduce(&mut desk, &mut shell, UiEvent::Login(Err(ClientError::Authentication)));

        assert!(!shell.login_pending);
        assert_eq!(shell.status, "Sign-in failed");
        let View::Login(login) = desk.view() else {
            panic!("expected login view");
        };
        assert_eq!(login.error.as_deref(), Some("Failed to authenticate"));
    }

    #[test]
    fn successful_login_switches_to_orders() {
        let mut desk = OrderDesk::new(&ClientConfig::default());
        let mut shell = ShellState::default();

        reduce(
            &mut desk,
            &mut shell,
            UiEvent::Login(Ok(LoginGrant {
                token: Some("t".into()),
            })),
        );

        assert!(matches!(desk.view(), View::Orders(_)));
        assert_eq!(shell.status, "Signed in");
    }

    #[test]
    fn workflow_events_settle_the_submission() {
        let mut desk = signed_in_desk();
        let mut shell = ShellState::default();
        let ticket = desk.begin_submission().expect("ticket");

        reduce(
            &mut desk,
            &mut shell,
            UiEvent::Workflow(WorkflowEvent::OrderAccepted {
                token: ticket.token,
                message: "Amount: 3, Result: 1, 1, 1".into(),
            }),
        );
        reduce(
            &mut desk,
            &mut shell,
            UiEvent::Workflow(WorkflowEvent::HistoryLoaded {
                token: ticket.token,
                entries: Vec::new(),
            }),
        );

        let View::Orders(orders) = desk.view() else {
            panic!("expected order view");
        };
        assert_eq!(orders.result_message, "Amount: 3, Result: 1, 1, 1");
        assert!(!orders.busy);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut desk = signed_in_desk();
        let mut shell = ShellState::default();
        let first = desk.begin_submission().expect("first");
        let _second = desk.begin_submission().expect("second");

        reduce(
            &mut desk,
            &mut shell,
            UiEvent::Workflow(WorkflowEvent::Failed {
                token: first.token,
                error: ClientError::Status {
                    operation: Operation::SubmitOrder,
                    status: 500,
                },
            }),
        );

        assert_eq!(desk.workflow().error(), None);
        assert!(desk.workflow().is_busy());
    }

    #[test]
    fn backend_startup_failure_disables_the_shell() {
        let mut desk = OrderDesk::new(&ClientConfig::default());
        let mut shell = ShellState {
            login_pending: true,
            ..ShellState::default()
        };

        reduce(
            &mut desk,
            &mut shell,
            UiEvent::BackendUnavailable("no runtime".into()),
        );

        assert!(!shell.backend_available);
        assert!(!shell.login_pending);
        assert_eq!(shell.status, "no runtime");
    }
}
