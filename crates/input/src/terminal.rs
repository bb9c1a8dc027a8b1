//! Terminal key source backed by crossterm.
//!
//! Translates crossterm key presses into firmware-style [`KeyEvent`]s so the
//! rest of the game sees the same keys it would see on a firmware console.
//! `q` and Ctrl-C are reported as Escape.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers,
};

use crate::handler::KeySource;
use crate::types::{DeviceError, KeyEvent, ScanCode};

/// Translate a crossterm key event. Releases and unmapped keys yield `None`.
pub fn from_crossterm(key: TermKeyEvent) -> Option<KeyEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyEvent::special(ScanCode::ESCAPE));
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(KeyEvent::special(ScanCode::ESCAPE))
        }
        KeyCode::Left => Some(KeyEvent::special(ScanCode::LEFT)),
        KeyCode::Right => Some(KeyEvent::special(ScanCode::RIGHT)),
        KeyCode::Down => Some(KeyEvent::special(ScanCode::DOWN)),
        KeyCode::Up => Some(KeyEvent::special(ScanCode::UP)),
        KeyCode::Char(ch) => Some(KeyEvent::printable(ch)),
        _ => None,
    }
}

/// Polls the terminal without blocking.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, DeviceError> {
        loop {
            let ready = event::poll(Duration::ZERO).map_err(|e| io_error("event::poll", &e))?;
            if !ready {
                return Ok(None);
            }
            match event::read().map_err(|e| io_error("event::read", &e))? {
                Event::Key(key) => {
                    if let Some(k) = from_crossterm(key) {
                        return Ok(Some(k));
                    }
                }
                // Resize, focus and mouse events carry no game input.
                _ => continue,
            }
        }
    }
}

fn io_error(domain: &'static str, e: &std::io::Error) -> DeviceError {
    log::error!("{}: {}", domain, e);
    DeviceError::new(domain, e.raw_os_error().unwrap_or(-1) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            from_crossterm(TermKeyEvent::from(KeyCode::Left)),
            Some(KeyEvent::special(ScanCode::LEFT))
        );
        assert_eq!(
            from_crossterm(TermKeyEvent::from(KeyCode::Right)),
            Some(KeyEvent::special(ScanCode::RIGHT))
        );
        assert_eq!(
            from_crossterm(TermKeyEvent::from(KeyCode::Down)),
            Some(KeyEvent::special(ScanCode::DOWN))
        );
    }

    #[test]
    fn test_quit_keys_become_escape() {
        for key in [
            TermKeyEvent::from(KeyCode::Esc),
            TermKeyEvent::from(KeyCode::Char('q')),
            TermKeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(from_crossterm(key), Some(KeyEvent::special(ScanCode::ESCAPE)));
        }
    }

    #[test]
    fn test_printable_passthrough() {
        assert_eq!(
            from_crossterm(TermKeyEvent::from(KeyCode::Char('z'))),
            Some(KeyEvent::printable('z'))
        );
        assert_eq!(from_crossterm(TermKeyEvent::from(KeyCode::F(1))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = TermKeyEvent::from(KeyCode::Left);
        key.kind = KeyEventKind::Release;
        assert_eq!(from_crossterm(key), None);
    }
}
