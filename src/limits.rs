use crate::BmpError;

/// Caps applied to a BMP document before its bytes are read into memory.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes held by an open document: one byte per bitmap pixel
    /// plus the full file copy kept for editing.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BmpError> {
        if let Some(max_w) = self.max_width
            && u64::from(width) > max_w
        {
            return Err(BmpError::LimitExceeded(format!(
                "width {width} exceeds limit {max_w}"
            )));
        }
        if let Some(max_h) = self.max_height
            && u64::from(height) > max_h
        {
            return Err(BmpError::LimitExceeded(format!(
                "height {height} exceeds limit {max_h}"
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels
            && pixels > max_px
        {
            return Err(BmpError::LimitExceeded(format!(
                "pixel count {pixels} exceeds limit {max_px}"
            )));
        }
        Ok(())
    }

    /// Check the bytes an open document would hold.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), BmpError> {
        match self.max_memory_bytes {
            Some(max_mem) if bytes > max_mem => Err(BmpError::LimitExceeded(format!(
                "document needs {bytes} bytes, memory limit is {max_mem}"
            ))),
            _ => Ok(()),
        }
    }
}
