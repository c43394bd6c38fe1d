pub mod batch;
pub mod tone;
pub mod utils;

pub use batch::generate_batch;
pub use tone::{generate_tone, SampleBuffer, ToneGenerator, ToneRequest};

/// Error types for the tone cue library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Audio processing error: {0}")]
    AudioProcessing(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => Error::Io(e),
            other => Error::AudioProcessing(other.to_string()),
        }
    }
}

/// Result type for the tone cue library
pub type Result<T> = std::result::Result<T, Error>;
