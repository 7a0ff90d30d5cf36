use std::time::Duration;

use client_core::{
    Action, ClientConfig, ClientError, LoginView, Operation, OrderDesk, OrderView, TransportError,
    View, WorkflowEvent,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, ShellState};

const PENDING_REPAINT: Duration = Duration::from_millis(100);
const IDLE_REPAINT: Duration = Duration::from_secs(1);

pub struct OrderDeskApp {
    desk: OrderDesk,
    shell: ShellState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl OrderDeskApp {
    pub fn new(
        config: &ClientConfig,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            desk: OrderDesk::new(config),
            shell: ShellState::default(),
            cmd_tx,
            ui_rx,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reduce(&mut self.desk, &mut self.shell, event);
        }
    }

    fn apply_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            if let Err(err) = self.desk.dispatch(action) {
                tracing::warn!("ignored form edit: {err}");
                self.shell.status = err.to_string();
            }
        }
    }

    fn request_login(&mut self) {
        if self.shell.login_pending {
            return;
        }
        let credentials = self.desk.session().login_request();
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Login { credentials },
            &mut self.shell.status,
        ) {
            self.shell.login_pending = true;
            self.shell.status = "Signing in...".to_string();
        }
    }

    fn request_submission(&mut self) {
        let ticket = match self.desk.begin_submission() {
            Ok(ticket) => ticket,
            Err(err) => {
                self.shell.status = err.to_string();
                return;
            }
        };
        let token = ticket.token;
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitOrder { ticket },
            &mut self.shell.status,
        ) {
            // Settle the ticket so the form does not stay busy forever.
            self.desk.apply_workflow(WorkflowEvent::Failed {
                token,
                error: ClientError::Transport {
                    operation: Operation::SubmitOrder,
                    source: TransportError::Other(self.shell.status.clone()),
                },
            });
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        let pending = self.shell.login_pending || self.desk.workflow().is_busy();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if pending {
                    ui.spinner();
                }
                ui.weak(&self.shell.status);
            });
        });
    }

    fn show_login_screen(&mut self, ctx: &egui::Context, login: &LoginView) {
        let mut username = login.username.clone();
        let mut password = self.desk.session().credentials().password.clone();
        let can_submit = self.shell.backend_available && !self.shell.login_pending;
        let mut actions = Vec::new();
        let mut submit = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(360.0);
                ui.add_space(48.0);
                ui.heading("Order Desk");
                ui.weak("Sign in to place orders.");
                ui.add_space(12.0);

                if let Some(error) = &login.error {
                    let color = ui.visuals().error_fg_color;
                    ui.colored_label(color, error);
                }

                let user = ui.add(egui::TextEdit::singleline(&mut username).hint_text("Username"));
                if user.changed() {
                    actions.push(Action::UpdateUsername(username.clone()));
                }
                let pass = ui.add(
                    egui::TextEdit::singleline(&mut password)
                        .hint_text("Password")
                        .password(true),
                );
                if pass.changed() {
                    actions.push(Action::UpdatePassword(password.clone()));
                }
                let entered = pass.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(8.0);
                let clicked = ui
                    .add_enabled(can_submit, egui::Button::new("Login"))
                    .clicked();
                submit = can_submit && (clicked || entered);
            });
        });

        self.apply_actions(actions);
        if submit {
            self.request_login();
        }
    }

    fn show_order_screen(&mut self, ctx: &egui::Context, orders: &OrderView) {
        let backend_available = self.shell.backend_available;
        let mut actions = Vec::new();
        let mut submit = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Place an order");
            ui.add_space(8.0);

            egui::Grid::new("order_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for (index, input) in orders.packages.iter().enumerate() {
                        ui.label(&input.label);
                        let mut value = input.value.clone();
                        let edit = egui::TextEdit::singleline(&mut value).hint_text(&input.placeholder);
                        if ui.add(edit).changed() {
                            actions.push(Action::UpdatePackageSize { index, value });
                        }
                        ui.end_row();
                    }

                    ui.label("Order Amount");
                    let mut amount = orders.amount.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut amount).hint_text("Amount"))
                        .changed()
                    {
                        actions.push(Action::UpdateAmount(amount));
                    }
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                submit = ui
                    .add_enabled(backend_available, egui::Button::new("Submit Order"))
                    .clicked();
                if orders.busy {
                    ui.spinner();
                }
            });

            if !orders.result_message.is_empty() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(&orders.result_message).strong());
            }
            if let Some(error) = &orders.error {
                let color = ui.visuals().error_fg_color;
                ui.colored_label(color, format!("Error: {error}"));
            }

            ui.separator();
            ui.heading("Order History");
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if orders.history.is_empty() {
                        ui.weak("No orders yet.");
                    }
                    for line in &orders.history {
                        ui.label(line);
                    }
                });
        });

        self.apply_actions(actions);
        if submit {
            self.request_submission();
        }
    }
}

impl eframe::App for OrderDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        match self.desk.view() {
            View::Login(login) => self.show_login_screen(ctx, &login),
            View::Orders(orders) => self.show_order_screen(ctx, &orders),
        }

        if self.shell.login_pending || self.desk.workflow().is_busy() {
            ctx.request_repaint_after(PENDING_REPAINT);
        } else {
            // Picks up backend status messages that arrive without user input.
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
