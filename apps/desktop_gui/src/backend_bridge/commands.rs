//! Backend commands queued from UI to backend worker.

use client_core::{Credentials, SubmissionTicket};

pub enum BackendCommand {
    Login { credentials: Credentials },
    SubmitOrder { ticket: SubmissionTicket },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Login { .. } => "login",
            BackendCommand::SubmitOrder { .. } => "submit_order",
        }
    }
}
