//! Renderable snapshots of the gate and the workflow. Front ends draw these
//! and never read the containers directly.

use std::fmt::Write as _;

use shared::protocol::{HistoryEntry, OrderResult};

use crate::{session::SessionGate, workflow::OrderWorkflow};

pub fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_order_result(result: &OrderResult) -> String {
    format!(
        "Amount: {}, Result: {}",
        result.amount,
        join_values(&result.result)
    )
}

pub fn render_history_item(index: usize, entry: &HistoryEntry) -> String {
    format!("Order {}: {}", index + 1, format_order_result(&entry.order))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub username: String,
    pub has_password: bool,
    pub error: Option<String>,
}

impl LoginView {
    pub fn from_gate(gate: &SessionGate) -> Self {
        Self {
            username: gate.credentials().username.clone(),
            has_password: !gate.credentials().password.is_empty(),
            error: gate.login_error().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInput {
    pub label: String,
    pub placeholder: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub packages: Vec<PackageInput>,
    pub amount: String,
    pub busy: bool,
    pub result_message: String,
    pub error: Option<String>,
    pub history: Vec<String>,
}

impl OrderView {
    pub fn from_workflow(workflow: &OrderWorkflow) -> Self {
        let packages = workflow
            .form()
            .package_sizes()
            .iter()
            .enumerate()
            .map(|(index, value)| PackageInput {
                label: format!("Package {}", index + 1),
                placeholder: format!("Size {}", index + 1),
                value: value.clone(),
            })
            .collect();
        let history = workflow
            .history()
            .iter()
            .enumerate()
            .map(|(index, entry)| render_history_item(index, entry))
            .collect();

        Self {
            packages,
            amount: workflow.form().amount().to_string(),
            busy: workflow.is_busy(),
            result_message: workflow.result_message().to_string(),
            error: workflow.error().map(str::to_string),
            history,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login(LoginView),
    Orders(OrderView),
}

impl View {
    /// Plain-text rendering for terminals and logs.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        match self {
            View::Login(login) => {
                if let Some(error) = &login.error {
                    let _ = writeln!(out, "! {error}");
                }
                let _ = writeln!(out, "Username: {}", login.username);
                let password = if login.has_password { "********" } else { "" };
                let _ = writeln!(out, "Password: {password}");
            }
            View::Orders(orders) => {
                for input in &orders.packages {
                    let _ = writeln!(out, "{}: {}", input.label, input.value);
                }
                let _ = writeln!(out, "Order Amount: {}", orders.amount);
                if !orders.result_message.is_empty() {
                    let _ = writeln!(out, "{}", orders.result_message);
                }
                if let Some(error) = &orders.error {
                    let _ = writeln!(out, "Error: {error}");
                }
                let _ = writeln!(out, "Order History");
                for line in &orders.history {
                    let _ = writeln!(out, "{line}");
                }
            }
        }
        out
    }
}
