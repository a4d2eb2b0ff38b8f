use thiserror::Error;

use crate::Float;

pub type Result<T> = std::result::Result<T, EpipolarError>;

#[derive(Error, Debug)]
pub enum EpipolarError {
    /// Matrix or point does not have the expected shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Both a and b of the line are ~0, so there is nothing to draw.
    #[error("degenerate line (a: {a}, b: {b}, c: {c})")]
    DegenerateLine { a: Float, b: Float, c: Float },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("render error: {0}")]
    Render(String),
}

impl EpipolarError {
    /// Errors a frame can recover from by dropping the offending correspondence.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EpipolarError::DegenerateLine { .. })
    }
}
