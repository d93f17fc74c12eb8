//! Pixel array walk and binarization.

use std::io::{self, Read, Seek};

use rgb::RGB8;

use super::header::RuntimeParameters;
use super::reader::ByteReader;
use crate::bitmap::Bitmap;
use crate::error::BmpError;
use crate::pixel::{BitDepth, color_from_bgr, color_from_word, is_dark};

/// Read every pixel as a color, top row first.
pub fn decode_colors<R: Read + Seek>(
    source: &mut R,
    params: &RuntimeParameters,
) -> Result<Vec<Vec<RGB8>>, BmpError> {
    let mut bytes = ByteReader::new(source);

    // Refuse truncated pixel arrays before allocating rows for them.
    let needed = params
        .row_stride()
        .checked_mul(u64::from(params.height))
        .and_then(|n| n.checked_add(u64::from(params.offset)))
        .ok_or_else(|| {
            BmpError::invalid(format!(
                "{}x{} pixel array extent overflows",
                params.width, params.height
            ))
        })?;
    let available = bytes.stream_len()?;
    if needed > available {
        return Err(BmpError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("pixel data needs {needed} bytes, source has {available}"),
        )));
    }

    bytes.set_position(u64::from(params.offset))?;

    let bpp = params.bytes_per_pixel();
    let width = params.width as usize;
    let padding = usize::from(params.row_padding_bytes);
    let mut raw_row = vec![0u8; width * bpp];
    let mut scans = Vec::with_capacity(params.height as usize);

    for _ in 0..params.height {
        bytes.read_exact_bytes(&mut raw_row)?;
        bytes.skip(padding)?;
        let scan: Vec<RGB8> = match params.bit_depth {
            BitDepth::Bgr24 => raw_row
                .chunks_exact(3)
                .map(|px| color_from_bgr([px[0], px[1], px[2]]))
                .collect(),
            BitDepth::Bgrx32 => raw_row
                .chunks_exact(4)
                .map(|px| color_from_word(u32::from_le_bytes([px[0], px[1], px[2], px[3]])))
                .collect(),
        };
        scans.push(scan);
    }

    if params.bottom_up {
        scans.reverse();
    }
    Ok(scans)
}

/// Decode the pixel array into a dark/light bitmap, top row first.
pub fn decode_pixels<R: Read + Seek>(
    source: &mut R,
    params: &RuntimeParameters,
) -> Result<Bitmap, BmpError> {
    let rows = decode_colors(source, params)?
        .into_iter()
        .map(|scan| scan.into_iter().map(is_dark).collect())
        .collect();
    Ok(Bitmap::from_rows(params.width, rows))
}
