use std::io::{Cursor, Read, Seek, SeekFrom};

use log::debug;

use crate::bmp::{RuntimeParameters, decode_header, decode_pixels};
use crate::document::BmpDocument;
use crate::error::BmpError;
use crate::limits::Limits;

/// Decode options. Build with [`DecodeRequest::new`] and finish with
/// [`open`](Self::open) or [`read_header`](Self::read_header).
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest<'a> {
    expected_len: Option<u32>,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the header's declared file size to equal `len`, and the pixel
    /// data to fit inside it.
    pub fn with_expected_len(mut self, len: u32) -> Self {
        self.expected_len = Some(len);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode headers only.
    pub fn read_header<R: Read + Seek>(&self, source: &mut R) -> Result<RuntimeParameters, BmpError> {
        let params = decode_header(source, self.expected_len)?;
        if let Some(limits) = self.limits {
            limits.check(params.width, params.height)?;
        }
        Ok(params)
    }

    /// Decode the headers, apply limits, then read the whole source and
    /// keep the bytes for editing.
    pub fn open<R: Read + Seek>(&self, mut source: R) -> Result<BmpDocument, BmpError> {
        let params = self.read_header(&mut source)?;
        let len = source.seek(SeekFrom::End(0))?;
        if let Some(limits) = self.limits {
            let bitmap_bytes = u64::from(params.width) * u64::from(params.height);
            limits.check_memory(bitmap_bytes + len)?;
        }

        source.seek(SeekFrom::Start(0))?;
        let mut raw = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
        source.take(len).read_to_end(&mut raw)?;

        let bitmap = decode_pixels(&mut Cursor::new(raw.as_slice()), &params)?;

        debug!(
            "decoded {}x{} {}-bit BMP ({} bytes)",
            params.width,
            params.height,
            params.bits_per_pixel(),
            raw.len()
        );
        Ok(BmpDocument::new(params, bitmap, raw))
    }
}
