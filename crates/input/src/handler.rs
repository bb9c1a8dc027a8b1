//! Per-frame input drain.
//!
//! The game applies at most one net move per tick, so every key buffered
//! since the previous frame is folded into a single [`FrameInput`]: deltas
//! are summed per axis and then clamped to one step.

use log::trace;

use crate::map::{map_key, KeyCommand};
use crate::types::{DeviceError, KeyEvent, TickInput};

/// Non-blocking source of key events.
pub trait KeySource {
    /// Next buffered key, or `Ok(None)` when nothing is pending.
    ///
    /// Errors are reserved for device failures.
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, DeviceError>;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, DeviceError> {
        (**self).poll_key()
    }
}

/// Input gathered for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Net move for this tick, one step per axis at most.
    pub input: TickInput,
    /// An exit key was seen.
    pub exit: bool,
    /// Number of raw key events drained.
    pub key_count: usize,
}

/// Accumulates key events into a [`FrameInput`].
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    dx: i32,
    dy: i32,
    rotation: i32,
    exit: bool,
    key_count: usize,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        self.key_count += 1;
        match map_key(key) {
            Some(KeyCommand::Exit) => self.exit = true,
            Some(cmd) => {
                let d = cmd.delta();
                self.dx += d.dx;
                self.dy += d.dy;
                self.rotation += d.rotation;
            }
            None => trace!("ignored key {:?}", key),
        }
    }

    /// Produce the frame's input and start over.
    pub fn finish(&mut self) -> FrameInput {
        let out = FrameInput {
            input: TickInput::new(
                self.dx.signum(),
                self.dy.clamp(0, 1),
                self.rotation.signum(),
            ),
            exit: self.exit,
            key_count: self.key_count,
        };
        *self = Self::default();
        out
    }

    /// Drain every pending key from `source` into one frame's input.
    pub fn drain<K: KeySource>(&mut self, source: &mut K) -> Result<FrameInput, DeviceError> {
        while let Some(key) = source.poll_key()? {
            self.handle_key(&key);
        }
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::types::ScanCode;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<KeyEvent>);

    impl KeySource for Scripted {
        fn poll_key(&mut self) -> Result<Option<KeyEvent>, DeviceError> {
            Ok(self.0.pop_front())
        }
    }

    struct Broken;

    impl KeySource for Broken {
        fn poll_key(&mut self) -> Result<Option<KeyEvent>, DeviceError> {
            Err(DeviceError::new("ReadKeyStroke", 7))
        }
    }

    fn scripted(keys: &[KeyEvent]) -> Scripted {
        Scripted(keys.iter().copied().collect())
    }

    #[test]
    fn test_empty_drain() {
        let mut h = InputHandler::new();
        let out = h.drain(&mut scripted(&[])).unwrap();
        assert_eq!(out, FrameInput::default());
    }

    #[test]
    fn test_drain_sums_and_clamps() {
        let mut h = InputHandler::new();
        let mut keys = scripted(&[
            KeyEvent::special(ScanCode::LEFT),
            KeyEvent::special(ScanCode::LEFT),
            KeyEvent::special(ScanCode::DOWN),
            KeyEvent::special(ScanCode::DOWN),
            KeyEvent::printable('x'),
        ]);
        let out = h.drain(&mut keys).unwrap();
        assert_eq!(out.input, TickInput::new(-1, 1, 1));
        assert_eq!(out.key_count, 5);
        assert!(!out.exit);
        assert!(keys.0.is_empty());
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut h = InputHandler::new();
        let out = h
            .drain(&mut scripted(&[
                KeyEvent::special(ScanCode::LEFT),
                KeyEvent::special(ScanCode::RIGHT),
                KeyEvent::printable('z'),
                KeyEvent::printable('X'),
            ]))
            .unwrap();
        assert!(out.input.is_none());
        assert_eq!(out.key_count, 4);
    }

    #[test]
    fn test_escape_sets_exit() {
        let mut h = InputHandler::new();
        let out = h
            .drain(&mut scripted(&[
                KeyEvent::special(ScanCode::ESCAPE),
                KeyEvent::special(ScanCode::RIGHT),
            ]))
            .unwrap();
        assert!(out.exit);
        assert_eq!(out.input, TickInput::new(1, 0, 0));
    }

    #[test]
    fn test_finish_resets_state() {
        let mut h = InputHandler::new();
        h.handle_key(&KeyEvent::special(ScanCode::ESCAPE));
        assert!(h.finish().exit);
        assert_eq!(h.finish(), FrameInput::default());
    }

    #[test]
    fn test_device_error_propagates() {
        let mut h = InputHandler::new();
        let err = h.drain(&mut Broken).unwrap_err();
        assert_eq!(err, DeviceError::new("ReadKeyStroke", 7));
    }
}
