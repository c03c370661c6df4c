use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacsimileError {
    #[error("properties are unset, a deep copy has nothing to copy")]
    NullReference,
    #[error("compared value is not a `{expected}`")]
    TypeMismatch { expected: &'static str },
    #[error("archive could not be decoded")]
    Decode(#[from] DecodeError),
    #[error("serializer error")]
    Encode(#[source] bincode::Error),
    #[error("archive io error")]
    Io(#[from] std::io::Error),
}

/// Reasons a stored blob is rejected.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unknown format tag {0:?}")]
    BadMagic([u8; 4]),
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u16),
    #[error("{0} unexpected bytes after the record")]
    TrailingBytes(usize),
    #[error("blob is truncated, corrupt or of a different shape")]
    Malformed(#[source] bincode::Error),
}

pub type FacsimileResult<T> = Result<T, FacsimileError>;
