use crate::{Direction, Service};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while encoding or decoding fabric messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not the expected JSON shape.
    #[error("malformed message: {0}")]
    Format(#[from] serde_json::Error),
    /// A stored value is not a byte or text blob.
    #[error("unsupported storage representation: expected blob or text, got {found}")]
    UnsupportedStorage { found: &'static str },
    /// No payload shape exists for this service in this direction.
    #[error("{service:?} has no {direction} payload")]
    UndefinedPayload {
        service: Service,
        direction: Direction,
    },
}

impl Error {
    /// True for errors caused by the stored container type rather than its content.
    pub fn is_storage_type(&self) -> bool {
        matches!(self, Error::UnsupportedStorage { .. })
    }
}
