use inspector_core::control::FileControl;
use parameter::{FileMode, ParamRef};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

/// Pending native dialogs. Each runs on its own thread and reports back
/// through a channel polled once per frame.
#[derive(Default)]
pub struct FileDialogManager {
    pub save_dialog_rx: Option<Receiver<Option<PathBuf>>>,
    pub load_dialog_rx: Option<Receiver<Option<PathBuf>>>,
    pub parameter_dialog_rx: Option<(ParamRef, Receiver<Option<PathBuf>>)>,
}

pub fn spawn_file_dialog_thread<F, T>(f: F) -> std::thread::JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    std::thread::spawn(f)
}

impl FileDialogManager {
    pub fn is_busy(&self) -> bool {
        self.save_dialog_rx.is_some()
            || self.load_dialog_rx.is_some()
            || self.parameter_dialog_rx.is_some()
    }

    pub fn open_save_dialog(&mut self) -> bool {
        if self.save_dialog_rx.is_some() {
            return false;
        }
        let (tx, rx) = mpsc::channel();
        self.save_dialog_rx = Some(rx);
        spawn_file_dialog_thread(move || {
            let file = rfd::FileDialog::new()
                .set_title("Save collection")
                .add_filter("Collection", &["json"])
                .set_file_name("items.json")
                .save_file();
            let _ = tx.send(file);
        });
        true
    }

    pub fn open_load_dialog(&mut self) -> bool {
        if self.load_dialog_rx.is_some() {
            return false;
        }
        let (tx, rx) = mpsc::channel();
        self.load_dialog_rx = Some(rx);
        spawn_file_dialog_thread(move || {
            let file = rfd::FileDialog::new()
                .set_title("Load collection")
                .add_filter("Collection", &["json"])
                .pick_file();
            let _ = tx.send(file);
        });
        true
    }

    /// Opens the dialog for a file parameter; the result is routed back to
    /// `parameter` through whatever control is bound to it then.
    pub fn open_parameter_dialog(&mut self, parameter: ParamRef, control: &FileControl) -> bool {
        if self.parameter_dialog_rx.is_some() {
            return false;
        }
        let (tx, rx) = mpsc::channel();
        self.parameter_dialog_rx = Some((parameter, rx));
        let title = control.dialog_title();
        let mode = control.mode();
        let filter_name = control.filter_name().to_string();
        let extensions = control.filter_extensions();
        let current = PathBuf::from(control.path());
        spawn_file_dialog_thread(move || {
            let mut dialog = rfd::FileDialog::new().set_title(title);
            if !extensions.is_empty() {
                dialog = dialog.add_filter(filter_name, extensions.as_slice());
            }
            if let Some(dir) = current.parent().filter(|d| d.is_dir()) {
                dialog = dialog.set_directory(dir);
            }
            let file = match mode {
                FileMode::Open => dialog.pick_file(),
                FileMode::Save => {
                    if let Some(name) = current.file_name() {
                        dialog = dialog.set_file_name(name.to_string_lossy());
                    }
                    dialog.save_file()
                }
            };
            let _ = tx.send(file);
        });
        true
    }
}
