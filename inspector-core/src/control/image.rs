use crate::decode::ImageDecoder;
use parameter::{ImageSource, PixelBuffer, Value};
use std::rc::Rc;

pub const ZOOM_IN: f32 = 1.25;
pub const ZOOM_OUT: f32 = 0.8;

pub struct ImageControl {
    label: String,
    height: f32,
    image: Option<PixelBuffer>,
    viewer: Option<ImageViewer>,
    decoder: Rc<dyn ImageDecoder>,
}

impl ImageControl {
    pub fn new(label: impl Into<String>, height: f32, decoder: Rc<dyn ImageDecoder>) -> Self {
        Self {
            label: label.into(),
            height,
            image: None,
            viewer: None,
            decoder,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Thumbnail size at the configured height, aspect ratio preserved.
    pub fn thumbnail_size(&self) -> Option<(f32, f32)> {
        self.image
            .as_ref()
            .map(|image| (image.scaled_width(self.height), self.height))
    }

    /// Decodes the value into pixels. Anything that cannot be shown becomes
    /// "no image".
    pub fn load(&mut self, value: &Value) {
        self.image = match value {
            Value::Image(ImageSource::Pixels(pixels)) => Some(pixels.clone()),
            Value::Image(ImageSource::Path(path)) => self.decode_path(path),
            Value::Text(path) if !path.is_empty() => self.decode_path(std::path::Path::new(path)),
            _ => None,
        };
        match &self.image {
            Some(image) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.image = image.clone();
                }
            }
            None => self.viewer = None,
        }
    }

    fn decode_path(&self, path: &std::path::Path) -> Option<PixelBuffer> {
        match self.decoder.decode(path) {
            Ok(pixels) => Some(pixels),
            Err(err) => {
                log::warn!("image '{}': {err}", self.label);
                None
            }
        }
    }

    pub fn viewer(&self) -> Option<&ImageViewer> {
        self.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut ImageViewer> {
        self.viewer.as_mut()
    }

    /// Opens the full-size viewer; nothing happens without an image.
    pub fn open_viewer(&mut self) -> bool {
        match &self.image {
            Some(image) => {
                self.viewer = Some(ImageViewer::new(self.label.clone(), image.clone()));
                true
            }
            None => false,
        }
    }

    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }
}

impl std::fmt::Debug for ImageControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageControl")
            .field("label", &self.label)
            .field("height", &self.height)
            .field("image", &self.image)
            .field("viewer", &self.viewer.is_some())
            .finish()
    }
}

/// Zoomable view of one image. `offset` is where the image origin sits in
/// view coordinates.
#[derive(Debug, Clone)]
pub struct ImageViewer {
    pub title: String,
    pub image: PixelBuffer,
    pub zoom: f32,
    pub offset: [f32; 2],
}

impl ImageViewer {
    pub fn new(title: String, image: PixelBuffer) -> Self {
        Self {
            title,
            image,
            zoom: 1.0,
            offset: [0.0, 0.0],
        }
    }

    /// One wheel notch: zooms in for positive `delta`, out for negative,
    /// keeping the image point under `pointer` in place.
    pub fn wheel(&mut self, delta: f32, pointer: [f32; 2]) {
        let factor = if delta > 0.0 {
            ZOOM_IN
        } else if delta < 0.0 {
            ZOOM_OUT
        } else {
            return;
        };
        let anchor = self.view_to_image(pointer);
        self.zoom *= factor;
        self.offset = [
            pointer[0] - anchor[0] * self.zoom,
            pointer[1] - anchor[1] * self.zoom,
        ];
    }

    pub fn view_to_image(&self, point: [f32; 2]) -> [f32; 2] {
        [
            (point[0] - self.offset[0]) / self.zoom,
            (point[1] - self.offset[1]) / self.zoom,
        ]
    }

    pub fn image_to_view(&self, point: [f32; 2]) -> [f32; 2] {
        [
            point[0] * self.zoom + self.offset[0],
            point[1] * self.zoom + self.offset[1],
        ]
    }

    pub fn scaled_size(&self) -> [f32; 2] {
        [
            self.image.width as f32 * self.zoom,
            self.image.height as f32 * self.zoom,
        ]
    }
}
