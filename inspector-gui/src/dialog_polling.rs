use crate::InspectorApp;
use inspector_core::{ControlEdit, Outcome};

impl InspectorApp {
    pub(crate) fn poll_save_dialog(&mut self) {
        let result = match &self.file_dialogs.save_dialog_rx {
            Some(rx) => rx.try_recv().ok(),
            None => None,
        };
        if let Some(selection) = result {
            self.file_dialogs.save_dialog_rx = None;
            match self.manager.save(selection.as_deref()) {
                Ok(Outcome::Done(count)) => self.status = format!("Saved {count} item(s)"),
                Ok(Outcome::Cancelled) => {}
                Err(err) => {
                    log::error!("save failed: {err}");
                    self.status = format!("Save failed: {err}");
                }
            }
        }
    }

    pub(crate) fn poll_load_dialog(&mut self) {
        let result = match &self.file_dialogs.load_dialog_rx {
            Some(rx) => rx.try_recv().ok(),
            None => None,
        };
        if let Some(selection) = result {
            self.file_dialogs.load_dialog_rx = None;
            match self.manager.load(selection.as_deref()) {
                Ok(Outcome::Done(report)) if report.skipped.is_empty() => {
                    self.status = format!("Loaded {} item(s)", report.loaded);
                }
                Ok(Outcome::Done(report)) => {
                    self.status = format!(
                        "Loaded {} item(s), skipped {}",
                        report.loaded,
                        report.skipped.len()
                    );
                }
                Ok(Outcome::Cancelled) => {}
                Err(err) => {
                    log::error!("load failed: {err}");
                    self.status = format!("Load failed: {err}");
                }
            }
        }
    }

    /// Routes a file parameter's dialog result to the control currently
    /// bound to that parameter.
    pub(crate) fn poll_parameter_dialog(&mut self) {
        let result = match &self.file_dialogs.parameter_dialog_rx {
            Some((_, rx)) => rx.try_recv().ok(),
            None => None,
        };
        let Some(selection) = result else {
            return;
        };
        let Some((parameter, _)) = self.file_dialogs.parameter_dialog_rx.take() else {
            return;
        };
        let binding = self
            .manager
            .panel()
            .and_then(|panel| panel.binding_for(&parameter));
        match binding {
            Some(binding) => {
                binding.apply(ControlEdit::FileChosen(selection));
            }
            None => log::debug!(
                "'{}' is no longer shown, dropping dialog result",
                parameter.name()
            ),
        }
    }
}
