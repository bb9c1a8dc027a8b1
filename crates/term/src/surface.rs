//! Fixed-size character surface the game view draws into.
//!
//! The surface mirrors a firmware text console: 80 columns by 24 rows of
//! ASCII. The last column of every row holds a NUL terminator and is never
//! written, so each row is handed to the console as 79 visible columns.

use crate::types::{SURFACE_HEIGHT, SURFACE_WIDTH};

/// Number of writable columns per row.
pub const VISIBLE_WIDTH: usize = SURFACE_WIDTH - 1;

/// 80x24 grid of ASCII bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    rows: [[u8; SURFACE_WIDTH]; SURFACE_HEIGHT],
}

impl Surface {
    /// A blank surface.
    pub fn new() -> Self {
        let mut s = Self {
            rows: [[b' '; SURFACE_WIDTH]; SURFACE_HEIGHT],
        };
        s.clear();
        s
    }

    pub fn width(&self) -> usize {
        SURFACE_WIDTH
    }

    pub fn height(&self) -> usize {
        SURFACE_HEIGHT
    }

    /// Blank every visible cell and restore the terminators.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(b' ');
            row[VISIBLE_WIDTH] = 0;
        }
    }

    /// Character at `(x, y)`; `None` outside the surface.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y)?.get(x).map(|&b| b as char)
    }

    /// Put a character at `(x, y)`. Writes outside the visible area are dropped;
    /// non-ASCII characters are drawn as `?`.
    pub fn put_char(&mut self, x: usize, y: usize, ch: char) {
        if x >= VISIBLE_WIDTH || y >= SURFACE_HEIGHT {
            return;
        }
        self.rows[y][x] = if ch.is_ascii() && ch != '\0' {
            ch as u8
        } else {
            b'?'
        };
    }

    /// Copy a string starting at `(x, y)`, clipped at the visible width.
    pub fn put_str(&mut self, x: usize, y: usize, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= VISIBLE_WIDTH {
                break;
            }
            self.put_char(x + i, y, ch);
        }
    }

    /// The visible text of row `y` (without the terminator).
    pub fn row_text(&self, y: usize) -> &str {
        match self.rows.get(y) {
            // Only ASCII is ever stored.
            Some(row) => core::str::from_utf8(&row[..VISIBLE_WIDTH]).unwrap_or_default(),
            None => "",
        }
    }

    /// Iterate the visible text of every row, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        (0..SURFACE_HEIGHT).map(move |y| self.row_text(y))
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}
