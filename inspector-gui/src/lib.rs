use eframe::egui;
use inspector_core::{BindingHost, CollectionManager};

mod decoder;
mod dialog_polling;
mod file_dialogs;
mod ui;

pub use decoder::ImageFileDecoder;
pub use file_dialogs::{spawn_file_dialog_thread, FileDialogManager};

use ui::list::{self, ListAction};
use ui::textures::TextureCache;

#[derive(Debug, Clone)]
pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "Inspector".to_string(),
            width: 960.0,
            height: 640.0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}

/// Binding services backed by this crate: image files are decoded with the
/// `image` crate.
pub fn image_host() -> BindingHost {
    BindingHost::with_decoder(ImageFileDecoder)
}

/// Opens the inspector window for `manager` and runs until it is closed.
///
/// The list of items sits on the left, the property panel of the selected
/// item on the right. File dialogs run on helper threads; their results are
/// polled each frame and applied on the UI thread, so items and parameters
/// are only ever touched from here.
///
/// # Errors
///
/// `GuiError::Gui` when eframe cannot create the window.
pub fn run_gui(config: GuiConfig, manager: CollectionManager) -> Result<(), GuiError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_title(config.title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Box::new(InspectorApp::new(manager))),
    )
    .map_err(|err| GuiError::Gui(err.to_string()))
}

struct InspectorApp {
    manager: CollectionManager,
    file_dialogs: FileDialogManager,
    textures: TextureCache,
    search_text: String,
    status: String,
}

impl InspectorApp {
    fn new(manager: CollectionManager) -> Self {
        Self {
            manager,
            file_dialogs: FileDialogManager::default(),
            textures: TextureCache::default(),
            search_text: String::new(),
            status: String::new(),
        }
    }

    fn apply_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Select(row) => {
                self.manager.select(row);
            }
            ListAction::SelectType(index) => {
                self.manager.select_type_index(index);
            }
            ListAction::Add => {
                if let Err(err) = self.manager.add(None, None) {
                    self.status = format!("Add failed: {err}");
                }
            }
            ListAction::Remove => {
                self.manager.remove();
            }
            ListAction::Duplicate(row) => {
                if let Err(err) = self.manager.duplicate(row) {
                    log::error!("duplicate failed: {err}");
                    self.status = format!("Duplicate failed: {err}");
                }
            }
            ListAction::Delete(row) => {
                self.manager.remove_row(row);
            }
            ListAction::Move { from, to } => {
                self.manager.move_item(from, to);
            }
            ListAction::ToggleChecked(row) => {
                self.manager.model_mut().toggle_checked(row);
            }
            ListAction::Search => {
                let text = std::mem::take(&mut self.search_text);
                if let Err(err) = self.manager.search(&text) {
                    self.status = format!("Search failed: {err}");
                }
            }
            ListAction::Save => {
                self.file_dialogs.open_save_dialog();
            }
            ListAction::Load => {
                self.file_dialogs.open_load_dialog();
            }
        }
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_save_dialog();
        self.poll_load_dialog();
        self.poll_parameter_dialog();
        // Structural changes are read straight from the model each frame.
        self.manager.model_mut().take_changes();

        let mut actions = Vec::new();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });
        egui::SidePanel::left("items")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                actions.extend(list::show_toolbar(
                    ui,
                    &self.manager,
                    &mut self.search_text,
                    self.file_dialogs.is_busy(),
                ));
                ui.separator();
                actions.extend(list::show_item_list(ui, &self.manager));
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.manager.panel() {
                Some(panel) => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui::panel::show_property_panel(
                            ui,
                            panel,
                            &mut self.textures,
                            &mut self.file_dialogs,
                        );
                    });
                }
                None => {
                    ui.centered_and_justified(|ui| ui.weak("Select or add an item"));
                }
            }
        });
        if let Some(panel) = self.manager.panel() {
            ui::viewer::show_image_viewers(ctx, panel, &mut self.textures);
        }
        self.textures.end_frame();

        for action in actions {
            self.apply_list_action(action);
        }
        if self.file_dialogs.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
