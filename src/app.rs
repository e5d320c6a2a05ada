//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform::SUBMIT_MODIFIER;
use crate::schema::PriceType;
use crate::state::{AppState, FieldId, FormController, SubmissionLog, SubmitOutcome};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Dialogs and status around the form
    pub state: AppState,
    /// The form, saving into the host's submission log
    pub form: FormController<SubmissionLog>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance seeded from the configuration
    pub fn new(config: &TuiConfig) -> Self {
        Self {
            state: AppState::default(),
            form: FormController::new(&config.seed(), SubmissionLog::default()),
            quit: false,
        }
    }

    /// Create the App from the startup config load.
    ///
    /// A failed load falls back to defaults and is shown in the error dialog.
    pub fn from_config_load(loaded: Result<TuiConfig>) -> Self {
        match loaded {
            Ok(config) => {
                tracing::info!(
                    path = ?TuiConfig::config_path(),
                    seeded = config.initial_form.is_some(),
                    "config loaded"
                );
                Self::new(&config)
            }
            Err(err) => {
                let mut app = Self::new(&TuiConfig::default());
                app.push_error(format!("Config not loaded, using defaults: {err:#}"));
                app
            }
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.has_dialog() {
            self.handle_dialog_key(key);
            return Ok(());
        }
        self.handle_form_key(key)
    }

    /// Handle keys while a dialog is open
    fn handle_dialog_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.state.dismiss_dialog();
        }
    }

    /// Handle keys in the form
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.quit = true;
            }
            // Submit (Ctrl+S, or Cmd+Enter / Ctrl+Enter)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit()?;
            }
            KeyCode::Enter if key.modifiers.contains(SUBMIT_MODIFIER) => {
                self.submit()?;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Enter => {
                if self.form.is_submit_row_active() {
                    self.submit()?;
                } else {
                    self.form.next_field();
                }
            }
            _ if self.form.active_field() == Some(FieldId::PriceType) => {
                self.handle_price_type_key(key);
            }
            KeyCode::Char(c) => {
                let ch = if key.modifiers.contains(KeyModifiers::SHIFT) {
                    c.to_ascii_uppercase()
                } else {
                    c
                };
                self.form.push_char(ch);
            }
            KeyCode::Backspace => self.form.pop_char(),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys on the price type radio group
    fn handle_price_type_key(&mut self, key: KeyEvent) {
        let selection = match key.code {
            KeyCode::Left | KeyCode::Char('f') => Some(PriceType::Fixed),
            KeyCode::Right | KeyCode::Char('r') => Some(PriceType::Range),
            KeyCode::Char(' ') => Some(
                self.form
                    .price_type()
                    .map_or(PriceType::Fixed, |current| current.toggle()),
            ),
            _ => None,
        };
        if let Some(price_type) = selection {
            self.form.select_price_type(price_type);
        }
    }

    /// Validate and save the form
    fn submit(&mut self) -> Result<()> {
        match self.form.submit() {
            SubmitOutcome::Saved(form) => {
                self.state.saved_summary = Some(serde_json::to_string_pretty(&form)?);
                self.state.status_message = Some(format!(
                    "Saved ({} submission(s))",
                    self.form.save_handler().count()
                ));
                // The host's data changed; the form follows it
                self.form.reset(&form);
            }
            SubmitOutcome::Rejected(errors) => {
                self.state.status_message = Some(format!(
                    "{} problem(s) to fix before saving",
                    errors.issues().len()
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Form, Price, RangeAmount};
    use crate::state::{Dialog, PriceState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn new_app() -> App {
        App::new(&TuiConfig::default())
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_should_quit_initially_false() {
            assert!(!new_app().should_quit());
        }

        #[test]
        fn test_esc_quits() {
            let mut app = new_app();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_tab_and_backtab_move_focus() {
            let mut app = new_app();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(app.form.active_field(), Some(FieldId::Email));
            app.handle_key(key(KeyCode::BackTab)).unwrap();
            assert_eq!(app.form.active_field(), Some(FieldId::Name));
        }

        #[test]
        fn test_enter_advances_outside_submit_row() {
            let mut app = new_app();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.form.active_field(), Some(FieldId::Email));
            assert!(app.form.errors().is_empty());
        }

        #[test]
        fn test_shift_uppercases() {
            let mut app = new_app();
            app.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::SHIFT))
                .unwrap();
            type_text(&mut app, "ob");
            assert_eq!(app.form.name.as_text(), "Bob");
        }
    }

    mod price_type {
        use super::*;
        use pretty_assertions::assert_eq;

        fn on_price_type() -> App {
            let mut app = new_app();
            app.form.set_active_field(2);
            app
        }

        #[test]
        fn test_arrow_keys_select() {
            let mut app = on_price_type();
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.form.price_state(), PriceState::Range);
            app.handle_key(key(KeyCode::Left)).unwrap();
            assert_eq!(app.form.price_state(), PriceState::Fixed);
        }

        #[test]
        fn test_space_toggles() {
            let mut app = on_price_type();
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert_eq!(app.form.price_type(), Some(PriceType::Fixed));
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert_eq!(app.form.price_type(), Some(PriceType::Range));
        }

        #[test]
        fn test_letters_do_not_edit_text() {
            let mut app = on_price_type();
            type_text(&mut app, "rx");
            assert_eq!(app.form.price_type(), Some(PriceType::Range));
            assert_eq!(app.form.name.as_text(), "");
        }
    }

    mod startup {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct LogBuffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for LogBuffer {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        #[test]
        fn test_config_load_is_logged() {
            let buffer = LogBuffer::default();
            let writer = buffer.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish();

            let config = TuiConfig {
                initial_form: Some(Form {
                    name: "Bob".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            };
            let app = tracing::subscriber::with_default(subscriber, || {
                App::from_config_load(Ok(config))
            });

            let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
            assert!(logs.contains("config loaded"));
            assert!(logs.contains("seeded=true"));
            assert_eq!(app.form.name.as_text(), "Bob");
            assert!(!app.state.has_dialog());
        }

        #[test]
        fn test_failed_config_load_shows_error_and_uses_defaults() {
            let app = App::from_config_load(Err(anyhow::anyhow!("invalid config in config.json")));

            assert_eq!(
                app.state.current_dialog(),
                Some(Dialog::Error {
                    message: "Config not loaded, using defaults: invalid config in config.json"
                        .to_string()
                })
            );
            assert_eq!(app.form.name.as_text(), "");
            assert_eq!(app.form.price_state(), PriceState::NoPrice);
        }
    }

    mod submitting {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_submit_shows_errors_without_saving() {
            let mut app = new_app();
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.form.save_handler().count(), 0);
            assert!(!app.state.has_dialog());
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("2 problem(s) to fix before saving")
            );
            assert!(app.form.error_for(FieldId::Name).is_some());
        }

        #[test]
        fn test_full_keyboard_flow_saves_range_price() {
            let mut app = new_app();
            type_text(&mut app, "Bob");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "xxx@yyy.zzz");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "1");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "10");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert!(app.form.is_submit_row_active());

            app.handle_key(key(KeyCode::Enter)).unwrap();

            let expected = Form {
                name: "Bob".to_string(),
                email: "xxx@yyy.zzz".to_string(),
                price: Some(Price::Range {
                    amount: RangeAmount {
                        min: 1.0,
                        max: 10.0,
                    },
                }),
            };
            assert_eq!(app.form.save_handler().count(), 1);
            assert_eq!(app.form.save_handler().last(), Some(&expected));
            assert!(matches!(
                app.state.current_dialog(),
                Some(Dialog::Saved { .. })
            ));
        }

        #[test]
        fn test_dialog_swallows_keys_until_dismissed() {
            let seed = Form {
                name: "Bob".to_string(),
                email: "xxx@yyy.zzz".to_string(),
                price: Some(Price::Fixed { amount: 100.0 }),
            };
            let config = TuiConfig {
                initial_form: Some(seed.clone()),
                ..Default::default()
            };
            let mut app = App::new(&config);
            app.handle_key(ctrl('s')).unwrap();
            assert!(app.state.has_dialog());

            app.handle_key(key(KeyCode::Char('x'))).unwrap();
            assert_eq!(app.form.name.as_text(), "Bob");

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(!app.state.has_dialog());
            assert_eq!(app.form.save_handler().count(), 1);
        }

        #[test]
        fn test_saved_form_reseeds_working_values() {
            let mut app = new_app();
            type_text(&mut app, "Ann");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "ann@example.com");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Char('f'))).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "2.50");

            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.form.fixed_amount.as_text(), "2.5");
            assert_eq!(app.form.active_field(), Some(FieldId::Name));
        }
    }
}
