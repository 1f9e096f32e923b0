// Crate error type. Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    #[error("Invalid label {0}: must be a digit 0-9")]
    InvalidLabel(u8),

    /// A capture did not produce a full 28×28 vector
    #[error("Pixel vector has {actual} values, expected {expected}")]
    PixelCount { expected: usize, actual: usize },

    /// Serialize/export was asked for with zero samples
    #[error("No data to download!")]
    EmptyDataset,

    /// A replay script line could not be used
    #[error("Replay line {line}: {reason}")]
    Replay { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
