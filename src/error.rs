use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("pixel buffer {width}x{height} needs {expected} RGBA bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("no face detected")]
    NoFaceDetected,

    #[cfg(feature = "cli")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "cli")]
    #[error("landmark file error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
