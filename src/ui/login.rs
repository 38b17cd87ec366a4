use crate::account::{self, AccountError, Registration};
use crate::database::{self, models::User};
use eframe::egui;

#[derive(Default)]
enum Mode {
    #[default]
    LogIn,
    Register,
}

#[derive(Default)]
pub struct LoginWindow {
    mode: Mode,
    email: String,
    password: String,
    registration: Registration,
    error_message: Option<String>,
}

fn error_message(error: AccountError) -> String {
    match error {
        AccountError::Store(error) => {
            log::error!("account lookup failed: {error}");
            "Couldn't reach the database, please try again".into()
        }
        error => {
            let mut message = error.to_string();
            if let Some(first) = message.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            message
        }
    }
}

fn form_row(ui: &mut egui::Ui, label: &str, value: &mut String, password: bool) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).password(password));
    ui.end_row();
}

impl LoginWindow {
    fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.error_message = None;
    }

    fn update_log_in(
        &mut self,
        conn: &mut database::Connection,
        ui: &mut egui::Ui,
    ) -> Option<User> {
        egui::Grid::new("log in form")
            .num_columns(2)
            .show(ui, |ui| {
                form_row(ui, "Email:", &mut self.email, false);
                form_row(ui, "Password:", &mut self.password, true);
            });

        let mut user = None;
        ui.horizontal(|ui| {
            if ui.button("Log In").clicked() {
                if self.email.trim().is_empty() || self.password.is_empty() {
                    self.error_message = Some("Please enter your email and password".into());
                } else {
                    match account::login(conn, &self.email, &self.password) {
                        Ok(u) => user = Some(u),
                        Err(error) => self.error_message = Some(error_message(error)),
                    }
                }
            }
            if ui.button("Create an account").clicked() {
                self.switch_mode(Mode::Register);
            }
        });
        user
    }

    fn update_register(
        &mut self,
        conn: &mut database::Connection,
        ui: &mut egui::Ui,
    ) -> Option<User> {
        let r = &mut self.registration;
        egui::Grid::new("registration form")
            .num_columns(2)
            .show(ui, |ui| {
                form_row(ui, "Name:", &mut r.name, false);
                form_row(ui, "Email:", &mut r.email, false);
                form_row(ui, "Password:", &mut r.password, true);
                form_row(ui, "Confirm password:", &mut r.confirm_password, true);
                form_row(ui, "Phone (optional):", &mut r.phone, false);
                form_row(ui, "Address (optional):", &mut r.address, false);
            });

        let mut user = None;
        ui.horizontal(|ui| {
            if ui.button("Create Account").clicked() {
                match account::register(conn, &self.registration) {
                    Ok(u) => user = Some(u),
                    Err(error) => self.error_message = Some(error_message(error)),
                }
            }
            if ui.button("Back to log in").clicked() {
                self.switch_mode(Mode::LogIn);
            }
        });
        user
    }

    /// Returns the user once they've logged in or registered.
    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
    ) -> Option<User> {
        let title = match self.mode {
            Mode::LogIn => "Log In",
            Mode::Register => "Create Account",
        };
        let mut user = None;
        egui::Window::new(title)
            .id(egui::Id::new("login"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                user = match self.mode {
                    Mode::LogIn => self.update_log_in(conn, ui),
                    Mode::Register => self.update_register(conn, ui),
                };
                if let Some(message) = &self.error_message {
                    ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                }
            });

        if user.is_some() {
            *self = Self::default();
        }
        user
    }
}

#[test]
fn account_errors_read_as_sentences() {
    assert_eq!(
        error_message(AccountError::PasswordMismatch),
        "The passwords don't match"
    );
    assert_eq!(
        error_message(AccountError::MissingField("email")),
        "Email is required"
    );
    assert_eq!(
        error_message(AccountError::Store(diesel::result::Error::NotFound)),
        "Couldn't reach the database, please try again"
    );
}
