//! # zenbmp-cross
//!
//! Monochrome BMP decoder with in-place line and cross drawing.
//!
//! A [`BmpDocument`] keeps every byte of the file it was opened from. Pixels
//! are binarized into a [`Bitmap`] (dark when the channel sum is at most
//! 366), and drawing writes black pixels into both the bitmap and the file
//! bytes, so [`BmpDocument::write_to`] produces the original file with only
//! the touched pixels changed.
//!
//! ## Supported Files
//!
//! - 12-byte core and 40/54/56/108/124-byte info headers
//! - 24-bit BGR and 32-bit BGRX pixels, bottom-up or top-down
//! - `BI_BITFIELDS` / `BI_ALPHABITFIELDS` only with the standard RGB masks
//!
//! ## Non-Goals
//!
//! - RLE, JPEG and PNG compression
//! - Palette (1/4/8-bit) images
//! - Non-standard channel masks
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp_cross::{BmpDocument, DecodeRequest};
//!
//! let file = std::fs::File::open("input.bmp")?;
//! let len = file.metadata()?.len() as u32;
//! let mut doc = DecodeRequest::new().with_expected_len(len).open(file)?;
//! print!("{}", doc.bitmap());
//!
//! doc.draw_cross((2, 2), (8, 8))?;
//! doc.write_to(std::fs::File::create("output.bmp")?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod decode;
mod document;
mod error;
mod limits;
mod pixel;

pub mod bmp;
pub mod raster;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::{Compression, RuntimeParameters};
pub use decode::DecodeRequest;
pub use document::BmpDocument;
pub use error::BmpError;
pub use limits::Limits;
pub use pixel::{BitDepth, RowOrder, is_dark};
pub use rgb::RGB8;
