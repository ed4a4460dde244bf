use eframe::egui;
use inspector_core::CollectionManager;

/// What the user asked of the collection this frame. Applied after drawing
/// so the manager is never mutated while it is being rendered.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ListAction {
    Select(usize),
    SelectType(usize),
    Add,
    Remove,
    Duplicate(usize),
    Delete(usize),
    Move { from: usize, to: usize },
    ToggleChecked(usize),
    Search,
    Save,
    Load,
}

pub(crate) fn show_toolbar(
    ui: &mut egui::Ui,
    manager: &CollectionManager,
    search_text: &mut String,
    dialogs_busy: bool,
) -> Vec<ListAction> {
    let mut actions = Vec::new();
    ui.heading(manager.title());
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(search_text)
                .hint_text("Search or create")
                .desired_width(160.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            actions.push(ListAction::Search);
        }
        if manager.has_type_selector() {
            let keys = manager.registry().keys();
            let selected = manager.type_selection();
            egui::ComboBox::from_id_source("item_type")
                .selected_text(keys.get(selected).copied().unwrap_or_default())
                .show_ui(ui, |ui| {
                    for (index, key) in keys.iter().enumerate() {
                        if ui.selectable_label(index == selected, *key).clicked() {
                            actions.push(ListAction::SelectType(index));
                        }
                    }
                });
        }
    });
    ui.horizontal(|ui| {
        if manager.settings().allow_add && ui.button("Add").clicked() {
            actions.push(ListAction::Add);
        }
        if manager.settings().allow_remove
            && ui
                .add_enabled(manager.current_index().is_some(), egui::Button::new("Remove"))
                .clicked()
        {
            actions.push(ListAction::Remove);
        }
        ui.separator();
        if ui.add_enabled(!dialogs_busy, egui::Button::new("Save…")).clicked() {
            actions.push(ListAction::Save);
        }
        if ui.add_enabled(!dialogs_busy, egui::Button::new("Load…")).clicked() {
            actions.push(ListAction::Load);
        }
    });
    actions
}

/// The item rows: check mark, drag handle and name. Rows are reordered by
/// dragging the handle onto another row; right click offers duplicate and
/// delete.
pub(crate) fn show_item_list(ui: &mut egui::Ui, manager: &CollectionManager) -> Vec<ListAction> {
    let mut actions = Vec::new();
    let model = manager.model();
    let current = manager.current_index();
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in 0..model.row_count() {
                let Some(name) = model.display_name(row) else {
                    continue;
                };
                let row_response = ui
                    .horizontal(|ui| {
                        let mut checked = model.is_checked(row);
                        if ui.checkbox(&mut checked, "").changed() {
                            actions.push(ListAction::ToggleChecked(row));
                        }
                        ui.dnd_drag_source(egui::Id::new(("item_row", row)), row, |ui| {
                            ui.label("☰");
                        });
                        let label = ui.selectable_label(current == Some(row), name);
                        if label.clicked() {
                            actions.push(ListAction::Select(row));
                        }
                        label.context_menu(|ui| {
                            if ui.button("Duplicate").clicked() {
                                actions.push(ListAction::Duplicate(row));
                                ui.close_menu();
                            }
                            if ui.button("Delete").clicked() {
                                actions.push(ListAction::Delete(row));
                                ui.close_menu();
                            }
                        });
                    })
                    .response;
                if let Some(from) = row_response.dnd_release_payload::<usize>() {
                    actions.push(ListAction::Move {
                        from: *from,
                        to: row,
                    });
                }
            }
        });
    actions
}
