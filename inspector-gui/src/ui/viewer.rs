use crate::ui::textures::TextureCache;
use eframe::egui;
use inspector_core::control::{Control, ControlEdit};
use inspector_core::PropertyPanel;

/// Draws one window per open image viewer. The wheel zooms around the
/// pointer, dragging pans.
pub(crate) fn show_image_viewers(
    ctx: &egui::Context,
    panel: &PropertyPanel,
    textures: &mut TextureCache,
) {
    for (index, binding) in panel.bindings().iter().enumerate() {
        let mut edits = Vec::new();
        {
            let mut control = binding.control_mut();
            let Control::Image(image) = &mut *control else {
                continue;
            };
            let Some(viewer) = image.viewer_mut() else {
                continue;
            };
            let mut open = true;
            egui::Window::new(viewer.title.clone())
                .id(egui::Id::new(("image_viewer", index)))
                .open(&mut open)
                .default_size([640.0, 480.0])
                .show(ctx, |ui| {
                    let texture = textures.texture_for(ctx, &viewer.image);
                    let size = ui.available_size().max(egui::vec2(200.0, 150.0));
                    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());

                    if response.dragged() {
                        let delta = response.drag_delta();
                        viewer.offset[0] += delta.x;
                        viewer.offset[1] += delta.y;
                    }
                    if response.hovered() {
                        let wheel = ui.input(|i| i.raw_scroll_delta.y);
                        if let (true, Some(pointer)) = (wheel != 0.0, response.hover_pos()) {
                            let local = pointer - rect.min;
                            edits.push(ControlEdit::Zoom {
                                delta: wheel,
                                pointer: [local.x, local.y],
                            });
                        }
                    }

                    let [width, height] = viewer.scaled_size();
                    let min = rect.min + egui::vec2(viewer.offset[0], viewer.offset[1]);
                    let target = egui::Rect::from_min_size(min, egui::vec2(width, height));
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter_at(rect)
                        .image(texture.id(), target, uv, egui::Color32::WHITE);
                });
            if !open {
                edits.push(ControlEdit::CloseViewer);
            }
        }
        for edit in edits {
            binding.apply(edit);
        }
    }
}
