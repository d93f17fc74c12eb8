//! File header and info header decoding.
//!
//! Two info header dialects are accepted, selected by the header's own size
//! field: the 12-byte OS/2 "core" header and the 40-byte Win32 header with its
//! 54/56/108/124-byte extensions (of which only the first 40 bytes are read).

use std::io::{Read, Seek};

use log::{debug, trace, warn};

use super::fields::{
    CORE_HEADER_SIZE, Compression, DWord, FILE_HEADER_SIZE, INFO_HEADER_SIZE, Long,
    NEW_HEADER_SIZES, SIGNATURE, STANDARD_B_MASK, STANDARD_G_MASK, STANDARD_R_MASK, Word,
};
use super::reader::{ByteReader, i32_le, u16_le, u32_le};
use crate::error::BmpError;
use crate::pixel::BitDepth;

// ── Runtime parameters ──────────────────────────────────────────────

/// Header fields the pixel decoder and raster editor work from.
///
/// Derived once per document. `size_image` and `row_padding_bytes` are
/// computed rather than copied when the file leaves them implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RuntimeParameters {
    /// Byte offset of the pixel array from the start of the file.
    pub offset: u32,
    pub width: u32,
    /// Row count. Always positive; scan order lives in `bottom_up`.
    pub height: u32,
    /// Rows are stored bottom row first.
    pub bottom_up: bool,
    pub bit_depth: BitDepth,
    pub compression: Compression,
    /// Declared pixel data size, or `width * height * bytes_per_pixel` when
    /// the file stores zero.
    pub size_image: u32,
    pub palette_used: bool,
    pub palette_important_count: u32,
    /// Filler bytes after each row so rows start on 4-byte boundaries.
    pub row_padding_bytes: u16,
}

impl RuntimeParameters {
    pub fn bits_per_pixel(&self) -> u16 {
        self.bit_depth.bits()
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bit_depth.bytes_per_pixel()
    }

    /// On-disk length of one row including padding.
    pub fn row_stride(&self) -> u64 {
        u64::from(self.width) * self.bytes_per_pixel() as u64 + u64::from(self.row_padding_bytes)
    }

    /// Number of rows stored in the file before the row at bottom-up
    /// coordinate `y`.
    pub(crate) fn rows_before(&self, y: u32) -> u32 {
        if self.bottom_up {
            y
        } else {
            self.height - 1 - y
        }
    }
}

/// Row padding for a row of `width` pixels at `bytes_per_pixel`.
pub fn row_padding(width: u32, bytes_per_pixel: usize) -> u16 {
    if bytes_per_pixel == 4 {
        return 0;
    }
    let row_bytes = u64::from(width) * bytes_per_pixel as u64;
    ((4 - row_bytes % 4) % 4) as u16
}

// ── File header ─────────────────────────────────────────────────────

struct FileHeader {
    signature: Word,
    file_size: DWord,
    reserved1: Word,
    reserved2: Word,
    offset: DWord,
}

impl FileHeader {
    fn parse(raw: &[u8; FILE_HEADER_SIZE as usize]) -> Self {
        Self {
            signature: u16_le(raw, 0),
            file_size: u32_le(raw, 2),
            reserved1: u16_le(raw, 6),
            reserved2: u16_le(raw, 8),
            offset: u32_le(raw, 10),
        }
    }

    fn validate(&self, expected_len: Option<u32>) -> Result<(), BmpError> {
        if self.signature != SIGNATURE {
            return Err(BmpError::invalid(format!(
                "invalid magic: must be {SIGNATURE:04X}, got {:04X}",
                self.signature
            )));
        }
        if self.file_size == 0 {
            return Err(BmpError::invalid("file size cannot be 0"));
        }
        if self.reserved1 != 0 || self.reserved2 != 0 {
            return Err(BmpError::invalid("one of reserved fields is not zero"));
        }
        if let Some(len) = expected_len {
            if self.file_size != len {
                return Err(BmpError::invalid(format!(
                    "invalid file size: requested {len}, header says {}",
                    self.file_size
                )));
            }
        }
        Ok(())
    }
}

// ── Info header dialects ────────────────────────────────────────────

/// BITMAPCOREHEADER without its size field.
struct CoreHeader {
    width: Word,
    height: Word,
    planes: Word,
    bit_count: Word,
}

/// First 40 bytes of BITMAPINFOHEADER and its successors, without the size
/// field.
struct NewHeader {
    width: Long,
    height: Long,
    planes: Word,
    bit_count: Word,
    compression: DWord,
    size_image: DWord,
    clr_used: DWord,
    clr_important: DWord,
}

enum InfoHeader {
    Core(CoreHeader),
    New(NewHeader),
}

impl CoreHeader {
    fn parse(raw: &[u8; 8]) -> Self {
        Self {
            width: u16_le(raw, 0),
            height: u16_le(raw, 2),
            planes: u16_le(raw, 4),
            bit_count: u16_le(raw, 6),
        }
    }

    fn validate(&self) -> Result<BitDepth, BmpError> {
        if self.width == 0 || self.height == 0 {
            return Err(BmpError::invalid("width and height must be positive"));
        }
        check_planes(self.planes)?;
        // 32-bit core headers are undocumented but harmless
        check_bit_count(self.bit_count)
    }
}

impl NewHeader {
    fn parse(raw: &[u8; 36]) -> Self {
        // Resolution fields at 20..28 are ignored.
        Self {
            width: i32_le(raw, 0),
            height: i32_le(raw, 4),
            planes: u16_le(raw, 8),
            bit_count: u16_le(raw, 10),
            compression: u32_le(raw, 12),
            size_image: u32_le(raw, 16),
            clr_used: u32_le(raw, 28),
            clr_important: u32_le(raw, 32),
        }
    }

    fn validate(&self) -> Result<(BitDepth, Compression), BmpError> {
        if self.width <= 0 {
            return Err(BmpError::invalid("width must be positive"));
        }
        if self.height == 0 {
            return Err(BmpError::invalid("height cannot be zero"));
        }
        check_planes(self.planes)?;
        let depth = check_bit_count(self.bit_count)?;
        let compression = Compression::from_u32(self.compression)
            .filter(|c| c.is_uncompressed())
            .ok_or_else(|| {
                BmpError::invalid(format!(
                    "invalid compression for 24 or 32-bit BMPs: {}",
                    self.compression
                ))
            })?;
        if compression != Compression::Rgb && self.size_image == 0 {
            return Err(BmpError::invalid(
                "size image cannot be 0 when compression is not RGB",
            ));
        }
        if self.clr_important > self.clr_used {
            return Err(BmpError::invalid(
                "number of important palette entries exceeds number of used entries",
            ));
        }
        Ok((depth, compression))
    }
}

fn check_planes(planes: Word) -> Result<(), BmpError> {
    if planes != 1 {
        return Err(BmpError::invalid(format!(
            "planes must be 1, got {planes}"
        )));
    }
    Ok(())
}

fn check_bit_count(bit_count: Word) -> Result<BitDepth, BmpError> {
    BitDepth::from_bit_count(bit_count).ok_or_else(|| {
        BmpError::invalid(format!("{bit_count}-bit BMPs are not supported"))
    })
}

impl InfoHeader {
    fn read<R: Read + Seek>(bytes: &mut ByteReader<'_, R>, size: DWord) -> Result<Self, BmpError> {
        match size {
            CORE_HEADER_SIZE => {
                debug!("BMP core info header");
                Ok(Self::Core(CoreHeader::parse(&bytes.read_fixed_bytes()?)))
            }
            s if NEW_HEADER_SIZES.contains(&s) => {
                debug!("BMP info header, {s} bytes");
                Ok(Self::New(NewHeader::parse(&bytes.read_fixed_bytes()?)))
            }
            other => Err(BmpError::invalid(format!(
                "unsupported info header size: {other}"
            ))),
        }
    }
}

// ── Decode entry point ──────────────────────────────────────────────

/// Decode and validate the file header and info header.
///
/// The source is rewound to its start first. When `expected_len` is given the
/// declared file size, pixel offset and image size are checked against it.
pub fn decode_header<R: Read + Seek>(
    source: &mut R,
    expected_len: Option<u32>,
) -> Result<RuntimeParameters, BmpError> {
    let mut bytes = ByteReader::new(source);
    bytes.set_position(0)?;

    let file_header = FileHeader::parse(&bytes.read_fixed_bytes()?);
    file_header.validate(expected_len)?;

    let header_size = bytes.get_u32_le()?;
    let info = InfoHeader::read(&mut bytes, header_size)?;

    let (width, height, bottom_up, bit_depth, compression, declared_size, palette) = match info {
        InfoHeader::Core(core) => {
            let depth = core.validate()?;
            (
                u32::from(core.width),
                u32::from(core.height),
                true,
                depth,
                Compression::Rgb,
                0,
                (false, 0),
            )
        }
        InfoHeader::New(new) => {
            let (depth, compression) = new.validate()?;
            let palette = if new.clr_used > 0 {
                (true, new.clr_important)
            } else {
                (false, 0)
            };
            (
                new.width.unsigned_abs(),
                new.height.unsigned_abs(),
                new.height > 0,
                depth,
                compression,
                new.size_image,
                palette,
            )
        }
    };

    let offset = file_header.offset;
    if let Some(len) = expected_len {
        if offset >= len {
            return Err(BmpError::invalid(format!(
                "pixel data offset {offset} is beyond file size {len}"
            )));
        }
    }

    let bpp = bit_depth.bytes_per_pixel();
    let row_padding_bytes = row_padding(width, bpp);
    let too_large = || {
        BmpError::invalid(format!(
            "{width}x{height} pixel data does not fit a 32-bit image size"
        ))
    };
    let packed_size = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_mul(bpp as u64))
        .ok_or_else(too_large)?;
    let size_image = if declared_size == 0 {
        u32::try_from(packed_size).map_err(|_| too_large())?
    } else {
        declared_size
    };
    if u64::from(size_image) < packed_size {
        warn!("BMP declares {size_image} bytes of pixel data, {packed_size} needed");
    }
    if let Some(len) = expected_len {
        if u64::from(offset) + u64::from(size_image) > u64::from(len) {
            return Err(BmpError::invalid(format!(
                "pixel data ({size_image} bytes at offset {offset}) exceeds file size {len}"
            )));
        }
    }

    let mut headers_end = u64::from(FILE_HEADER_SIZE) + u64::from(header_size);
    if bit_depth == BitDepth::Bgrx32 && compression.has_masks() {
        // Masks follow a 40-byte header and sit inside the longer ones.
        if header_size == INFO_HEADER_SIZE {
            headers_end += 12;
        }
        let masks = [bytes.get_u32_le()?, bytes.get_u32_le()?, bytes.get_u32_le()?];
        if masks != [STANDARD_R_MASK, STANDARD_G_MASK, STANDARD_B_MASK] {
            return Err(BmpError::invalid(format!(
                "non-standard bit masks are not supported: {:08X} {:08X} {:08X}",
                masks[0],
                masks[1],
                masks[2]
            )));
        }
    }

    if u64::from(offset) < headers_end {
        return Err(BmpError::invalid(format!(
            "pixel data offset {offset} overlaps the headers"
        )));
    }

    let params = RuntimeParameters {
        offset,
        width,
        height,
        bottom_up,
        bit_depth,
        compression,
        size_image,
        palette_used: palette.0,
        palette_important_count: palette.1,
        row_padding_bytes,
    };
    trace!("Width: {}", params.width);
    trace!("Height: {}", params.height);
    trace!("Bottom-up: {}", params.bottom_up);
    trace!("Bit depth: {:?}", params.bit_depth);
    trace!("Compression: {:?}", params.compression);
    trace!("Row padding: {}", params.row_padding_bytes);
    Ok(params)
}
