//! BMP encoder: uncompressed 24-bit and 32-bit BMP.

use rgb::RGB8;

use super::fields::{FILE_HEADER_SIZE, INFO_HEADER_SIZE};
use super::header::row_padding;
use crate::bitmap::Bitmap;
use crate::error::BmpError;
use crate::pixel::{BitDepth, RowOrder};

const DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Encode colors (top row first) as an uncompressed BMP with a 40-byte info
/// header.
pub fn encode_bmp(
    pixels: &[RGB8],
    width: u32,
    height: u32,
    depth: BitDepth,
    order: RowOrder,
) -> Result<Vec<u8>, BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::invalid("width and height must be positive"));
    }
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(BmpError::DimensionsTooLarge { width, height });
    }
    let w = width as usize;
    let h = height as usize;
    let expected = w
        .checked_mul(h)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if pixels.len() != expected {
        return Err(BmpError::invalid(format!(
            "need {expected} pixels for {width}x{height}, got {}",
            pixels.len()
        )));
    }

    let bpp = depth.bytes_per_pixel();
    let pad_bytes = usize::from(row_padding(width, bpp));
    let row_stride = w
        .checked_mul(bpp)
        .and_then(|r| r.checked_add(pad_bytes))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let pixel_data_size = row_stride
        .checked_mul(h)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let file_size = pixel_data_size
        .checked_add(DATA_OFFSET)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    let mut out = Vec::with_capacity(file_size as usize);
    write_bmp_header(&mut out, file_size, pixel_data_size, width, height, depth, order);

    let mut rows: Vec<&[RGB8]> = pixels.chunks_exact(w).collect();
    if order == RowOrder::BottomUp {
        rows.reverse();
    }
    for row in rows {
        for px in row {
            out.push(px.b);
            out.push(px.g);
            out.push(px.r);
            if depth == BitDepth::Bgrx32 {
                out.push(255);
            }
        }
        out.extend(std::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

/// Encode a monochrome bitmap: dark pixels black, light pixels white.
pub fn encode_bitmap(bitmap: &Bitmap, depth: BitDepth, order: RowOrder) -> Result<Vec<u8>, BmpError> {
    let black = RGB8::new(0, 0, 0);
    let white = RGB8::new(255, 255, 255);
    let pixels: Vec<RGB8> = bitmap
        .rows()
        .iter()
        .flatten()
        .map(|&dark| if dark { black } else { white })
        .collect();
    encode_bmp(&pixels, bitmap.width(), bitmap.height(), depth, order)
}

fn write_bmp_header(
    out: &mut Vec<u8>,
    file_size: u32,
    pixel_data_size: u32,
    width: u32,
    height: u32,
    depth: BitDepth,
    order: RowOrder,
) {
    let signed_height = match order {
        RowOrder::BottomUp => height as i32,
        RowOrder::TopDown => -(height as i32),
    };

    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&DATA_OFFSET.to_le_bytes());

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&signed_height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&depth.bits().to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}
