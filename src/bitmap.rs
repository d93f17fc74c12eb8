use std::fmt;

/// Monochrome image, top row first. `true` means dark.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bitmap {
    width: u32,
    rows: Vec<Vec<bool>>,
}

impl Bitmap {
    /// All-light bitmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            rows: vec![vec![false; width as usize]; height as usize],
        }
    }

    pub(crate) fn from_rows(width: u32, rows: Vec<Vec<bool>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == width as usize));
        Self { width, rows }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn row(&self, index: u32) -> Option<&[bool]> {
        self.rows.get(index as usize).map(Vec::as_slice)
    }

    /// Pixel at column `x` of row `row` (counted from the top).
    pub fn get(&self, x: u32, row: u32) -> Option<bool> {
        self.row(row)?.get(x as usize).copied()
    }

    /// Set a pixel. Coordinates outside the bitmap are ignored.
    pub fn set(&mut self, x: u32, row: u32, dark: bool) {
        if let Some(px) = self
            .rows
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(x as usize))
        {
            *px = dark;
        }
    }

    /// Number of dark pixels.
    pub fn dark_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&px| px).count()
    }

    /// Copy into an [`imgref::ImgVec`], row-major, top row first.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<bool> {
        imgref::ImgVec::new(
            self.rows.concat(),
            self.width as usize,
            self.rows.len(),
        )
    }
}

/// One line per row, `#` for dark and `.` for light, each ending in `\n`.
impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for &px in row {
                f.write_str(if px { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
