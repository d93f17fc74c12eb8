/// Errors from BMP decoding, editing and persistence.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// The byte source or sink could not satisfy a read, seek or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes were read but violate the BMP format contract.
    #[error("invalid BMP: {0}")]
    InvalidDocument(String),

    /// Encoder input whose file size cannot be represented.
    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("point ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl BmpError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDocument(reason.into())
    }

    /// Whether the failure came from the underlying byte source or sink.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Whether the failure is a format violation in bytes that were read fine.
    pub fn is_invalid_document(&self) -> bool {
        matches!(self, Self::InvalidDocument(_))
    }
}
