use eframe::egui;
use parameter::PixelBuffer;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

struct CachedTexture {
    // Held so the address used as key cannot be reused while cached.
    pixels: Rc<[u8]>,
    handle: egui::TextureHandle,
}

/// GPU textures for decoded images, keyed by pixel storage. Textures not
/// used during a frame are released at its end.
#[derive(Default)]
pub(crate) struct TextureCache {
    textures: HashMap<usize, CachedTexture>,
    used: HashSet<usize>,
}

impl TextureCache {
    pub(crate) fn texture_for(
        &mut self,
        ctx: &egui::Context,
        pixels: &PixelBuffer,
    ) -> egui::TextureHandle {
        let key = Rc::as_ptr(&pixels.data) as *const u8 as usize;
        self.used.insert(key);
        let cached = self
            .textures
            .get(&key)
            .filter(|cached| Rc::ptr_eq(&cached.pixels, &pixels.data));
        if let Some(cached) = cached {
            return cached.handle.clone();
        }
        let size = [pixels.width as usize, pixels.height as usize];
        let image = if pixels.channels == 4 {
            egui::ColorImage::from_rgba_unmultiplied(size, &pixels.data)
        } else {
            egui::ColorImage::from_rgb(size, &pixels.data)
        };
        let handle = ctx.load_texture(format!("image_{key}"), image, egui::TextureOptions::LINEAR);
        self.textures.insert(
            key,
            CachedTexture {
                pixels: pixels.data.clone(),
                handle: handle.clone(),
            },
        );
        handle
    }

    pub(crate) fn end_frame(&mut self) {
        let used = std::mem::take(&mut self.used);
        self.textures.retain(|key, _| used.contains(key));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.textures.len()
    }
}
