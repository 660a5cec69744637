//! Matrix geometry of the supported keyboard

/// Number of rows in the key matrix
pub const MATRIX_ROWS: u8 = 6;

/// Number of columns in the key matrix
pub const MATRIX_COLS: u8 = 15;

/// Bytes per matrix row in a scan bitmap
pub const BITMAP_STRIDE: u8 = MATRIX_COLS.div_ceil(8);

/// Number of addressable keys
///
/// Smaller than `MATRIX_ROWS * MATRIX_COLS`: not every matrix position is
/// populated on the supported board.
pub const KEY_COUNT: usize = 85;

/// Dimensions of a row-major scan bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixGeometry {
    pub rows: u8,
    pub cols: u8,
}

impl MatrixGeometry {
    /// Geometry of the supported matrix (6 × 15)
    pub const DEFAULT: Self = Self::new(MATRIX_ROWS, MATRIX_COLS);

    pub const fn new(rows: u8, cols: u8) -> Self {
        Self { rows, cols }
    }

    /// Bytes per row, one bit per column
    pub const fn stride(&self) -> u8 {
        self.cols.div_ceil(8)
    }

    /// Total bitmap size in bytes
    pub const fn bitmap_len(&self) -> usize {
        self.rows as usize * self.stride() as usize
    }

    /// Check whether the key at `row`/`col` is set in `bitmap`
    ///
    /// Column `c` lives in bit `c % 8` of byte `row * stride + c / 8`.
    /// Positions outside the geometry or beyond the end of `bitmap` read as
    /// released.
    pub fn is_key_down(&self, bitmap: &[u8], row: u8, col: u8) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        let index = row as usize * self.stride() as usize + (col / 8) as usize;
        bitmap
            .get(index)
            .is_some_and(|byte| byte & (1 << (col % 8)) != 0)
    }
}

impl Default for MatrixGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}
