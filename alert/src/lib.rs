//! Modal acknowledgement alerts.
//!
//! A thin notification surface: an [`Alert`] is a fixed title, message and
//! single acknowledgement button. Presenting one is fire-and-forget for the
//! caller; the user sees a modal dialog they must dismiss.

#![warn(missing_docs)]

/// Platform-specific implementations.
pub mod sys;

/// A user-facing alert with a single acknowledgement action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Title of the alert.
    pub title: String,
    /// Message content of the alert.
    pub message: String,
    /// Label of the acknowledgement button.
    pub button: String,
}

impl Alert {
    /// Create a new alert with the default "OK" acknowledgement button.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            button: "OK".to_owned(),
        }
    }

    /// Set the acknowledgement button label.
    #[must_use]
    pub fn with_button(mut self, button: impl Into<String>) -> Self {
        self.button = button.into();
        self
    }
}

/// A surface that can show alerts to the user.
///
/// Presenting is fire-and-forget: implementations must not block the caller
/// while the user reads the alert.
pub trait AlertPresenter: Send + Sync {
    /// Show the alert.
    fn present(&self, alert: Alert);
}

/// Alert presenter backed by the host platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAlerts;

impl SystemAlerts {
    /// Create a new system-backed alert presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AlertPresenter for SystemAlerts {
    fn present(&self, alert: Alert) {
        sys::present(alert);
    }
}
