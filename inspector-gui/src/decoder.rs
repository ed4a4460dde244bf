use inspector_core::{DecodeError, ImageDecoder};
use parameter::PixelBuffer;
use std::path::Path;

/// Decodes PNG and JPEG files with the `image` crate into RGBA pixels.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileDecoder;

impl ImageDecoder for ImageFileDecoder {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, DecodeError> {
        let unreadable = |message: String| DecodeError::Unreadable {
            path: path.to_path_buf(),
            message,
        };
        let image = image::open(path).map_err(|err| unreadable(err.to_string()))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::new(width, height, 4, rgba.into_raw())
            .ok_or_else(|| unreadable("unexpected pixel layout".to_string()))
    }
}
