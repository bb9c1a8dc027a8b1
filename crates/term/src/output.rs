//! Text console seam.

use crate::surface::Surface;
use crate::types::DeviceError;

/// A text console that can be cleared and written one row at a time.
pub trait TextOutput {
    fn clear_screen(&mut self) -> Result<(), DeviceError>;

    /// Write `text` starting at column 0 of `row`.
    fn write_line_at(&mut self, row: usize, text: &str) -> Result<(), DeviceError>;

    /// Called once all rows of a frame have been written.
    fn present(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }
}

impl<O: TextOutput + ?Sized> TextOutput for &mut O {
    fn clear_screen(&mut self) -> Result<(), DeviceError> {
        (**self).clear_screen()
    }

    fn write_line_at(&mut self, row: usize, text: &str) -> Result<(), DeviceError> {
        (**self).write_line_at(row, text)
    }

    fn present(&mut self) -> Result<(), DeviceError> {
        (**self).present()
    }
}

/// Write every row of the surface, top to bottom, then present the frame.
pub fn blit<O: TextOutput + ?Sized>(surface: &Surface, out: &mut O) -> Result<(), DeviceError> {
    for (row, text) in surface.lines().enumerate() {
        out.write_line_at(row, text)?;
    }
    out.present()
}
