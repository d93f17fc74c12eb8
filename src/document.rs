use std::io::{Read, Seek, Write};

use log::debug;

use crate::bitmap::Bitmap;
use crate::bmp::RuntimeParameters;
use crate::decode::DecodeRequest;
use crate::error::BmpError;
use crate::raster::{Point, cross_lines, line_points};

/// A decoded BMP file that can be drawn on and written back.
///
/// Holds the header parameters, the monochrome [`Bitmap`] and a copy of
/// every byte of the original file. Drawing updates the bitmap and the
/// matching pixel bytes together; everything else in the file is preserved.
#[derive(Debug, Clone)]
pub struct BmpDocument {
    params: RuntimeParameters,
    bitmap: Bitmap,
    raw: Vec<u8>,
}

impl BmpDocument {
    pub(crate) fn new(params: RuntimeParameters, bitmap: Bitmap, raw: Vec<u8>) -> Self {
        Self { params, bitmap, raw }
    }

    /// Decode with default options.
    pub fn open<R: Read + Seek>(source: R) -> Result<Self, BmpError> {
        DecodeRequest::new().open(source)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, BmpError> {
        Self::open(std::io::Cursor::new(bytes.into()))
    }

    pub fn params(&self) -> &RuntimeParameters {
        &self.params
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Current file contents, including every edit made so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.raw
    }

    /// Write the file contents to `sink` verbatim.
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<(), BmpError> {
        sink.write_all(&self.raw)?;
        sink.flush()?;
        Ok(())
    }

    // ── Drawing ─────────────────────────────────────────────────────

    /// Draw a black line between two points in bottom-up coordinates.
    ///
    /// Both endpoints must lie inside the image; otherwise nothing is drawn
    /// and [`BmpError::OutOfBounds`] is returned.
    pub fn draw_line(&mut self, from: Point, to: Point) -> Result<(), BmpError> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        self.stroke(from, to);
        Ok(())
    }

    /// Draw both diagonals of the box with corners `a` and `b`.
    pub fn draw_cross(&mut self, a: Point, b: Point) -> Result<(), BmpError> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        debug!("drawing cross {a:?} -> {b:?}");
        for (from, to) in cross_lines(a, b) {
            self.stroke(from, to);
        }
        Ok(())
    }

    fn check_bounds(&self, (x, y): Point) -> Result<(), BmpError> {
        let (width, height) = (self.params.width, self.params.height);
        if x >= width || y >= height {
            return Err(BmpError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        Ok(())
    }

    fn stroke(&mut self, from: Point, to: Point) {
        for point in line_points(from, to) {
            self.set_dark(point);
        }
    }

    /// Caller guarantees `(x, y)` is in bounds.
    fn set_dark(&mut self, (x, y): Point) {
        let p = &self.params;
        self.bitmap.set(x, p.height - y - 1, true);

        let bpp = p.bytes_per_pixel();
        // The pixel walk already proved the whole array lies inside `raw`.
        let pos = u64::from(p.offset)
            + u64::from(p.rows_before(y)) * p.row_stride()
            + u64::from(x) * bpp as u64;
        let pos = pos as usize;
        debug_assert!(pos + bpp <= self.raw.len(), "pixel ({x}, {y}) maps past the file");
        if let Some(px) = self.raw.get_mut(pos..pos + bpp) {
            px.fill(0);
        }
    }
}
