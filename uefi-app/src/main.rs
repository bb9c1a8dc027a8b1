//! Firmware host: runs the frame driver on the UEFI text console.
//!
//! Keys come from the simple text input protocol, rows go to the simple text
//! output protocol, and the timestamp counter drives pacing after being
//! calibrated against boot services `Stall`.

#![no_std]
#![no_main]

use log::LevelFilter;
use uefi::prelude::*;
use uefi::proto::console::text::Key;
use uefi::CStr16;

use efi_tetris_core::{CounterRng, CycleCounter, GameSession};
use efi_tetris_engine::{Clock, FrameDriver};
use efi_tetris_input::KeySource;
use efi_tetris_term::{TextOutput, VISIBLE_WIDTH};
use efi_tetris_types::{DeviceError, KeyEvent, ScanCode};

/// Time stamp counter.
#[derive(Debug, Clone, Copy)]
struct Tsc;

impl CycleCounter for Tsc {
    fn cycles(&self) -> u64 {
        // SAFETY: RDTSC has no preconditions on x86_64.
        unsafe { core::arch::x86_64::_rdtsc() }
    }
}

fn device_error(domain: &'static str, err: uefi::Error) -> DeviceError {
    DeviceError::new(domain, err.status().0 as u64)
}

struct FirmwareKeys(SystemTable<Boot>);

impl KeySource for FirmwareKeys {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, DeviceError> {
        let key = self
            .0
            .stdin()
            .read_key()
            .map_err(|e| device_error("ReadKeyStroke", e))?;
        Ok(key.map(|key| match key {
            Key::Printable(ch) => KeyEvent::printable(char::from(ch)),
            Key::Special(code) => KeyEvent::special(ScanCode(code.0)),
        }))
    }
}

struct FirmwareConsole(SystemTable<Boot>);

impl TextOutput for FirmwareConsole {
    fn clear_screen(&mut self) -> Result<(), DeviceError> {
        self.0
            .stdout()
            .clear()
            .map_err(|e| device_error("ClearScreen", e))
    }

    fn write_line_at(&mut self, row: usize, text: &str) -> Result<(), DeviceError> {
        let mut buf = [0u16; VISIBLE_WIDTH + 1];
        let line = CStr16::from_str_with_buf(text, &mut buf)
            .map_err(|_| DeviceError::new("OutputString", Status::INVALID_PARAMETER.0 as u64))?;

        let out = self.0.stdout();
        out.set_cursor_position(0, row)
            .map_err(|e| device_error("SetCursorPosition", e))?;
        out.output_string(line)
            .map_err(|e| device_error("OutputString", e))
    }
}

struct FirmwareClock(SystemTable<Boot>);

impl CycleCounter for FirmwareClock {
    fn cycles(&self) -> u64 {
        Tsc.cycles()
    }
}

impl Clock for FirmwareClock {
    fn stall(&mut self, micros: u64) -> Result<(), DeviceError> {
        self.0.boot_services().stall(micros as usize);
        Ok(())
    }
}

#[entry]
fn main(_image: Handle, mut system_table: SystemTable<Boot>) -> Status {
    if uefi::helpers::init(&mut system_table).is_err() {
        return Status::ABORTED;
    }
    log::set_max_level(LevelFilter::Warn);

    // SAFETY: the image is single-threaded and each clone only touches its
    // own protocol (input, output, boot services) for the duration of a call.
    let (keys, console, clock) = unsafe {
        (
            FirmwareKeys(system_table.unsafe_clone()),
            FirmwareConsole(system_table.unsafe_clone()),
            FirmwareClock(system_table.unsafe_clone()),
        )
    };

    let session = GameSession::new(CounterRng::new(Tsc));
    let mut driver = FrameDriver::new(keys, console, clock, session);

    match driver.run() {
        Ok(score) => {
            uefi::println!("Final score: {:08}", score);
            Status::SUCCESS
        }
        Err(err) => {
            uefi::println!("{}", err);
            loop {
                core::hint::spin_loop();
            }
        }
    }
}
