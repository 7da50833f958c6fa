use crate::app::{App, Message, Model, ToastLevel};

impl App {
    pub(super) fn handle_message_side_effects(&self, model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => self.save_content(model),
            Message::Clear => self.clear_content(model),
            _ => {}
        }
    }

    /// Snapshot every page into local storage.
    pub(super) fn save_content(&self, model: &mut Model) {
        let _scope = crate::perf::scope("storage.save");
        match self.store.save(&model.document) {
            Ok(()) => {
                model.dirty = false;
                model.show_toast(ToastLevel::Info, "Content saved locally!");
                crate::perf::log_event(
                    "storage.save",
                    format!("pages={} dir={}", model.document.len(), self.store.dir().display()),
                );
            }
            Err(err) => {
                tracing::error!(error = %err, "saving pages failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }

    /// Remove the saved record. The model has already been reset by `update`.
    pub(super) fn clear_content(&self, model: &mut Model) {
        match self.store.clear() {
            Ok(()) => {
                model.show_toast(ToastLevel::Info, "Content cleared!");
                crate::perf::log_event("storage.clear", self.store.dir().display().to_string());
            }
            Err(err) => {
                tracing::error!(error = %err, "clearing saved pages failed");
                model.show_toast(ToastLevel::Error, format!("Clear failed: {err}"));
            }
        }
    }
}
