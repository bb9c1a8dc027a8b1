//! TerminalOutput: a [`TextOutput`] backed by a real terminal.
//!
//! Rows are queued into one buffer and flushed on `present`, so a frame
//! reaches the terminal in a single write. Rows identical to the previous
//! frame are skipped.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{cursor, style::Print, terminal, QueueableCommand};

use crate::output::TextOutput;
use crate::types::{DeviceError, SURFACE_HEIGHT};

pub struct TerminalOutput {
    stdout: io::Stdout,
    last: Vec<Option<String>>,
    buf: Vec<u8>,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: vec![None; SURFACE_HEIGHT],
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force every row to be rewritten on the next frame.
    pub fn invalidate(&mut self) {
        self.last.iter_mut().for_each(|row| *row = None);
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextOutput for TerminalOutput {
    fn clear_screen(&mut self) -> Result<(), DeviceError> {
        self.invalidate();
        self.buf.clear();
        self.buf
            .queue(terminal::Clear(terminal::ClearType::All))
            .map_err(|e| io_error("ClearScreen", &e))?;
        self.flush_buf().map_err(|e| io_error("ClearScreen", &e))
    }

    fn write_line_at(&mut self, row: usize, text: &str) -> Result<(), DeviceError> {
        if self.last.get(row).and_then(|r| r.as_deref()) == Some(text) {
            return Ok(());
        }
        encode_line_into(row, text, &mut self.buf)
            .map_err(|e| io_error("SetCursorPosition", &e))?;
        if let Some(slot) = self.last.get_mut(row) {
            *slot = Some(text.to_owned());
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DeviceError> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.flush_buf().map_err(|e| io_error("OutputString", &e))
    }
}

/// Encode "move to column 0 of `row`, print `text`" into `out`.
pub fn encode_line_into(row: usize, text: &str, out: &mut Vec<u8>) -> io::Result<()> {
    let row = u16::try_from(row).unwrap_or(u16::MAX);
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(Print(text))?;
    Ok(())
}

fn io_error(domain: &'static str, e: &io::Error) -> DeviceError {
    log::error!("{}: {}", domain, e);
    DeviceError::new(domain, e.raw_os_error().unwrap_or(-1) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line_positions_then_prints() {
        let mut out = Vec::new();
        encode_line_into(3, "abc", &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        // CSI row;col H is 1-based.
        assert!(s.starts_with("\x1b[4;1H"), "{s:?}");
        assert!(s.ends_with("abc"));
    }

    #[test]
    fn test_unchanged_rows_are_skipped() {
        let mut out = TerminalOutput::new();
        out.write_line_at(0, "hello").unwrap();
        let first = out.buf.len();
        assert!(first > 0);

        out.write_line_at(0, "hello").unwrap();
        assert_eq!(out.buf.len(), first);

        out.write_line_at(0, "world").unwrap();
        assert!(out.buf.len() > first);
    }

    #[test]
    fn test_invalidate_forces_rewrite() {
        let mut out = TerminalOutput::new();
        out.write_line_at(1, "x").unwrap();
        let first = out.buf.len();
        out.invalidate();
        out.write_line_at(1, "x").unwrap();
        assert_eq!(out.buf.len(), first * 2);
    }
}
