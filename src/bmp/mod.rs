//! BMP container decoding and encoding.
//!
//! [`decode_header`] and [`decode_pixels`] work on any `Read + Seek`
//! source; [`crate::BmpDocument`] wraps both and keeps the file bytes for
//! editing.

mod encode;
pub mod fields;
mod header;
mod pixels;
mod reader;

pub use encode::{encode_bitmap, encode_bmp};
pub use fields::Compression;
pub use header::{RuntimeParameters, decode_header, row_padding};
pub use pixels::{decode_colors, decode_pixels};
