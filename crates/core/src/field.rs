//! Field module - manages the playing grid
//!
//! The field is a 10x18 grid where each cell is empty or holds the glyph of
//! the piece that locked there. Uses a flat array, no allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..17 (top to bottom)

use crate::catalog::{cells, PieceKind};
use crate::types::{Cell, FIELD_HEIGHT, FIELD_WIDTH};

/// Total number of cells on the field
const FIELD_SIZE: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// The playing field - 10 columns x 18 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i32 || y < 0 || y >= FIELD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * FIELD_WIDTH + (x as usize))
    }

    pub fn width(&self) -> usize {
        FIELD_WIDTH
    }

    pub fn height(&self) -> usize {
        FIELD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True if any occupied cell of the piece lies outside the field or on a
    /// filled cell.
    pub fn intersects(&self, kind: PieceKind, rotation: usize, x: i32, y: i32) -> bool {
        cells(kind, rotation).any(|(dx, dy)| !matches!(self.get(x + dx, y + dy), Some(None)))
    }

    /// Write the piece's glyph into every cell it occupies.
    ///
    /// The placement must already have been validated with [`Field::intersects`].
    pub fn lock(&mut self, kind: PieceKind, rotation: usize, x: i32, y: i32) {
        debug_assert!(!self.intersects(kind, rotation, x, y));
        let glyph = kind.glyph();
        for (dx, dy) in cells(kind, rotation) {
            self.set(x + dx, y + dy, Some(glyph));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_complete(&self, y: usize) -> bool {
        if y >= FIELD_HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn count_complete_rows(&self) -> usize {
        (0..FIELD_HEIGHT).filter(|&y| self.is_row_complete(y)).count()
    }

    pub fn has_complete_rows(&self) -> bool {
        (0..FIELD_HEIGHT).any(|y| self.is_row_complete(y))
    }

    /// Delete a row, shift all rows above it down by one and clear the top row.
    pub fn delete_row(&mut self, y: usize) {
        if y >= FIELD_HEIGHT {
            return;
        }

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src = (row - 1) * FIELD_WIDTH;
            self.cells.copy_within(src..src + FIELD_WIDTH, row * FIELD_WIDTH);
        }

        self.cells[..FIELD_WIDTH].fill(None);
    }

    /// Delete every complete row and return how many were removed.
    ///
    /// Scans top to bottom: deleting a row only moves rows above it, so rows
    /// still to be scanned keep their index.
    pub fn clear_complete_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..FIELD_HEIGHT {
            if self.is_row_complete(y) {
                self.delete_row(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Cells of one row, left to right.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * FIELD_WIDTH;
        &self.cells[start..start + FIELD_WIDTH]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(FIELD_WIDTH)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a field from text rows for testing; `.` is empty, anything else a glyph.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        assert_eq!(rows.len(), FIELD_HEIGHT);
        let mut field = Self::new();
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), FIELD_WIDTH);
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    field.set(x as i32, y as i32, Some(ch));
                }
            }
        }
        field
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
