//! Desktop alert implementation using native message dialogs.

use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::Alert;

/// Show the alert on a background thread.
///
/// The dialog is modal for the user but the caller returns immediately; the
/// acknowledgement result is not observable.
pub(crate) fn present(alert: Alert) {
    std::thread::spawn(move || {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(&alert.title)
            .set_description(&alert.message)
            .set_buttons(MessageButtons::OkCustom(alert.button.clone()))
            .show();

        log::debug!("alert '{}' acknowledged", alert.title);
    });
}
