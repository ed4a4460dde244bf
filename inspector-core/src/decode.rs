use parameter::PixelBuffer;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("failed to read image {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
    #[error("no image decoder available for {0}")]
    Unsupported(PathBuf),
}

/// Turns an image file into pixels for display.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, DecodeError>;
}

/// Decoder for hosts that cannot display image files.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImageDecoder;

impl ImageDecoder for NoImageDecoder {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, DecodeError> {
        Err(DecodeError::Unsupported(path.to_path_buf()))
    }
}
