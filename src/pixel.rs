use rgb::RGB8;

use crate::bmp::fields::{DARK_CHANNEL_SUM_MAX, STANDARD_B_MASK, STANDARD_G_MASK, STANDARD_R_MASK};

/// On-disk pixel encoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 3 bytes per pixel, B,G,R.
    Bgr24,
    /// 4 bytes per pixel, little-endian word with red/green/blue in the low
    /// three bytes; the top byte is ignored.
    Bgrx32,
}

impl BitDepth {
    pub(crate) fn from_bit_count(bits: u16) -> Option<Self> {
        match bits {
            24 => Some(Self::Bgr24),
            32 => Some(Self::Bgrx32),
            _ => None,
        }
    }

    /// Bits per pixel as stored in the info header.
    pub fn bits(self) -> u16 {
        match self {
            Self::Bgr24 => 24,
            Self::Bgrx32 => 32,
        }
    }

    /// Bytes per pixel on disk.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bgr24 => 3,
            Self::Bgrx32 => 4,
        }
    }
}

/// Scan order of pixel rows in the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Bottom row stored first (positive height).
    #[default]
    BottomUp,
    /// Top row stored first (negative height, new dialect only).
    TopDown,
}

/// Whether a color binarizes to "dark".
///
/// The channel sum is compared against 366, i.e. an average of at most 122.
#[inline]
pub fn is_dark(color: RGB8) -> bool {
    u16::from(color.r) + u16::from(color.g) + u16::from(color.b) <= DARK_CHANNEL_SUM_MAX
}

#[inline]
pub(crate) fn color_from_bgr([b, g, r]: [u8; 3]) -> RGB8 {
    RGB8::new(r, g, b)
}

#[inline]
pub(crate) fn color_from_word(word: u32) -> RGB8 {
    RGB8::new(
        ((word & STANDARD_R_MASK) >> 16) as u8,
        ((word & STANDARD_G_MASK) >> 8) as u8,
        (word & STANDARD_B_MASK) as u8,
    )
}
