//! On-disk field widths and named constants from the BMP documentation.

/// Unsigned 8-bit field.
pub type Byte = u8;
/// Unsigned 16-bit field.
pub type Word = u16;
/// Unsigned 32-bit field.
pub type DWord = u32;
/// Signed 32-bit field.
pub type Long = i32;

/// `"BM"` read as a little-endian word.
pub const SIGNATURE: Word = 0x4D42;

pub const FILE_HEADER_SIZE: DWord = 14;
pub const CORE_HEADER_SIZE: DWord = 12;
pub const INFO_HEADER_SIZE: DWord = 40;

/// Info header sizes decoded with the new (Win32) layout. 54 and 56 are not
/// documented by Microsoft but appear in the wild.
pub const NEW_HEADER_SIZES: [DWord; 5] = [40, 54, 56, 108, 124];

pub const STANDARD_R_MASK: DWord = 0x00FF_0000;
pub const STANDARD_G_MASK: DWord = 0x0000_FF00;
pub const STANDARD_B_MASK: DWord = 0x0000_00FF;

/// Highest channel sum that still counts as dark (122 * 3).
pub const DARK_CHANNEL_SUM_MAX: u16 = 366;

/// BMP compression method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Compression {
    Rgb = 0,
    Rle8 = 1,
    Rle4 = 2,
    Bitfields = 3,
    Jpeg = 4,
    Png = 5,
    AlphaBitfields = 6,
}

impl Compression {
    pub fn from_u32(code: DWord) -> Option<Self> {
        match code {
            0 => Some(Self::Rgb),
            1 => Some(Self::Rle8),
            2 => Some(Self::Rle4),
            3 => Some(Self::Bitfields),
            4 => Some(Self::Jpeg),
            5 => Some(Self::Png),
            6 => Some(Self::AlphaBitfields),
            _ => None,
        }
    }

    /// Whether pixels carry explicit channel masks.
    pub fn has_masks(self) -> bool {
        matches!(self, Self::Bitfields | Self::AlphaBitfields)
    }

    /// Whether this method can describe uncompressed 24/32-bit pixels.
    pub(crate) fn is_uncompressed(self) -> bool {
        matches!(self, Self::Rgb | Self::Bitfields | Self::AlphaBitfields)
    }
}
