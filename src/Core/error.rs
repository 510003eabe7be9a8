use thiserror::Error;

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("invalid transfer queue configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("no writable buffer available in the shared buffer")]
    BufferExhausted,

    #[error("frame size mismatch: expected {expected} bytes, got {actual}")]
    GeometryMismatch { expected: usize, actual: usize },

    #[error("partial tile upload ({width}x{height}) into a {tile_width}x{tile_height} tile is not supported")]
    PartialTile {
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    },

    #[error("copy into destination failed: {0}")]
    CopyFailed(String),
}

impl TransferError {
    pub fn copy_failed(msg: impl Into<String>) -> Self {
        TransferError::CopyFailed(msg.into())
    }
}
