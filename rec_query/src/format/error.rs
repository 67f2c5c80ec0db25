use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of stream while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("packet id {id} consumed {consumed} bytes, header declared {declared}")]
    SizeMismatch { id: u8, consumed: u64, declared: u32 },
}

pub type Result<T> = std::result::Result<T, ReadError>;

impl ReadError {
    /// True when the stream ended mid-value. The queries tolerate this as
    /// end-of-stream and return the report built so far.
    pub fn is_eof(&self) -> bool {
        match self {
            ReadError::UnexpectedEof(_) => true,
            ReadError::Io(err) => err.kind() == std::io::ErrorKind::UnexpectedEof,
            ReadError::SizeMismatch { .. } => false,
        }
    }
}
