use crate::file_dialogs::FileDialogManager;
use crate::ui::textures::TextureCache;
use eframe::egui;
use inspector_core::control::{Control, ControlEdit};
use inspector_core::{BoundControl, PanelNode, PropertyPanel};

const THUMBNAIL_FALLBACK: f32 = 100.0;

/// Draws every control of `panel` and applies the edits made this frame.
pub(crate) fn show_property_panel(
    ui: &mut egui::Ui,
    panel: &PropertyPanel,
    textures: &mut TextureCache,
    dialogs: &mut FileDialogManager,
) {
    if panel.is_empty() {
        ui.weak("Nothing to edit");
        return;
    }
    egui::Grid::new("property_panel")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            for node in panel.layout() {
                show_node(ui, panel, node, textures, dialogs, true);
            }
        });
}

fn show_node(
    ui: &mut egui::Ui,
    panel: &PropertyPanel,
    node: &PanelNode,
    textures: &mut TextureCache,
    dialogs: &mut FileDialogManager,
    top_level: bool,
) {
    match node {
        PanelNode::Control(index) => {
            let Some(binding) = panel.binding(*index) else {
                return;
            };
            if top_level {
                show_label(ui, binding);
                show_binding(ui, *index, binding, textures, dialogs);
                ui.end_row();
            } else {
                ui.vertical(|ui| {
                    show_label(ui, binding);
                    show_binding(ui, *index, binding, textures, dialogs);
                });
            }
        }
        PanelNode::Row(children) => {
            if top_level {
                ui.label("");
            }
            ui.horizontal(|ui| {
                for child in children {
                    show_node(ui, panel, child, textures, dialogs, false);
                }
            });
            if top_level {
                ui.end_row();
            }
        }
    }
}

fn show_label(ui: &mut egui::Ui, binding: &BoundControl) {
    if matches!(&*binding.control(), Control::Action(_)) {
        ui.label("");
    } else {
        ui.label(binding.label());
    }
}

fn show_binding(
    ui: &mut egui::Ui,
    index: usize,
    binding: &BoundControl,
    textures: &mut TextureCache,
    dialogs: &mut FileDialogManager,
) {
    let active = binding.parameter().is_active();
    let edits = ui
        .add_enabled_ui(active, |ui| {
            // The control stays borrowed while drawing; edits are applied
            // once the borrow is released.
            let control = binding.control();
            let mut edits = Vec::new();
            match &*control {
                Control::Text(text) => {
                    let mut value = text.text().to_string();
                    let response =
                        ui.add_enabled(text.is_editable(), egui::TextEdit::singleline(&mut value));
                    if response.changed() {
                        edits.push(ControlEdit::Text(value));
                    }
                    if response.lost_focus() {
                        edits.push(ControlEdit::FinishText);
                    }
                }
                Control::Number(number) => {
                    ui.horizontal(|ui| {
                        if let Some(slider) = number.slider() {
                            let mut position = slider.position;
                            let response = ui.add_enabled(
                                number.is_editable(),
                                egui::Slider::new(&mut position, slider.min..=slider.max)
                                    .show_value(false),
                            );
                            if response.changed() {
                                edits.push(ControlEdit::Slider(position));
                            }
                        }
                        let mut value = number.value();
                        let response = ui.add_enabled(
                            number.is_editable(),
                            egui::DragValue::new(&mut value)
                                .clamp_range(number.min()..=number.max())
                                .speed(number.step())
                                .fixed_decimals(number.decimals()),
                        );
                        if response.changed() {
                            edits.push(ControlEdit::Number(value));
                        }
                    });
                }
                Control::Checkbox(checkbox) => {
                    let mut checked = checkbox.checked;
                    if ui
                        .add_enabled(checkbox.editable, egui::Checkbox::without_text(&mut checked))
                        .changed()
                    {
                        edits.push(ControlEdit::Checked(checked));
                    }
                }
                Control::Choice(choice) => {
                    let entries = choice.entries();
                    let current = choice.current_index();
                    ui.add_enabled_ui(choice.is_editable(), |ui| {
                        egui::ComboBox::from_id_source(("choice", index))
                            .selected_text(choice.current_label().unwrap_or_default())
                            .show_ui(ui, |ui| {
                                for (i, entry) in entries.iter().enumerate() {
                                    if ui.selectable_label(current == Some(i), *entry).clicked() {
                                        edits.push(ControlEdit::Choice(i));
                                    }
                                }
                            });
                    });
                }
                Control::File(file) => {
                    ui.horizontal(|ui| {
                        let mut path = file.path().to_string();
                        let response =
                            ui.add_enabled(file.is_editable(), egui::TextEdit::singleline(&mut path));
                        if response.changed() {
                            edits.push(ControlEdit::Text(path));
                        }
                        let browse = ui.add_enabled(
                            file.is_editable() && dialogs.parameter_dialog_rx.is_none(),
                            egui::Button::new("…"),
                        );
                        if browse.clicked() {
                            dialogs.open_parameter_dialog(binding.parameter().clone(), file);
                        }
                    });
                }
                Control::Image(image) => match (image.image(), image.thumbnail_size()) {
                    (Some(pixels), Some((width, height))) => {
                        let texture = textures.texture_for(ui.ctx(), pixels);
                        let size = egui::vec2(width, height);
                        let response = ui.add(
                            egui::Image::new(egui::load::SizedTexture::new(texture.id(), size))
                                .sense(egui::Sense::click()),
                        );
                        if response.on_hover_text("Click to enlarge").clicked() {
                            edits.push(ControlEdit::OpenViewer);
                        }
                    }
                    _ => {
                        let height = if image.height() > 0.0 {
                            image.height()
                        } else {
                            THUMBNAIL_FALLBACK
                        };
                        ui.add_sized([height, height], egui::Label::new("No image"));
                    }
                },
                Control::Progress(progress) => {
                    ui.add(egui::ProgressBar::new(progress.fraction()).show_percentage());
                }
                Control::Action(action) => {
                    if ui.button(&action.label).clicked() {
                        edits.push(ControlEdit::Click);
                    }
                }
            }
            edits
        })
        .inner;

    for edit in edits {
        binding.apply(edit);
    }
}
