//! Counter-based timekeeping.
//!
//! Frame times are measured in raw counter ticks and converted to
//! microseconds with a ticks-per-second figure calibrated at startup
//! against the firmware's `stall` service.

use crate::core::CycleCounter;
use crate::types::DeviceError;

/// Microseconds per second.
pub const MICROS_PER_SECOND: u64 = 1_000_000;

/// Default calibration window: one second.
pub const DEFAULT_CALIBRATION_MICROS: u64 = MICROS_PER_SECOND;

/// A cycle counter that can also block for a duration.
pub trait Clock: CycleCounter {
    /// Block for `micros` microseconds.
    fn stall(&mut self, micros: u64) -> Result<(), DeviceError>;

    /// Block until the counter reaches `deadline`.
    ///
    /// The default spins on the counter.
    fn wait_until(&mut self, deadline: u64) -> Result<(), DeviceError> {
        while self.cycles() < deadline {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn stall(&mut self, micros: u64) -> Result<(), DeviceError> {
        (**self).stall(micros)
    }

    fn wait_until(&mut self, deadline: u64) -> Result<(), DeviceError> {
        (**self).wait_until(deadline)
    }
}

/// Count counter ticks across a `window_micros` stall and scale to one second.
///
/// Never returns zero, so callers can always divide by the result.
pub fn calibrate_ticks_per_second<C: Clock + ?Sized>(
    clock: &mut C,
    window_micros: u64,
) -> Result<u64, DeviceError> {
    let window = window_micros.max(1);
    let start = clock.cycles();
    clock.stall(window)?;
    let end = clock.cycles();

    let delta = u128::from(end.saturating_sub(start));
    let tps = delta * u128::from(MICROS_PER_SECOND) / u128::from(window);
    Ok(u64::try_from(tps).unwrap_or(u64::MAX).max(1))
}

/// Convert a tick count to microseconds.
pub fn ticks_to_micros(ticks: u64, ticks_per_second: u64) -> u64 {
    let per_second = u128::from(ticks_per_second.max(1));
    let us = u128::from(ticks) * u128::from(MICROS_PER_SECOND) / per_second;
    u64::try_from(us).unwrap_or(u64::MAX)
}

/// Convert microseconds to counter ticks.
pub fn micros_to_ticks(micros: u64, ticks_per_second: u64) -> u64 {
    let ticks = u128::from(micros) * u128::from(ticks_per_second) / u128::from(MICROS_PER_SECOND);
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

#[cfg(feature = "std")]
pub use self::std_clock::StdClock;

#[cfg(feature = "std")]
mod std_clock {
    extern crate std;

    use std::time::{Duration, Instant};

    use super::Clock;
    use crate::core::CycleCounter;
    use crate::types::DeviceError;

    /// Monotonic nanosecond counter for hosted builds.
    #[derive(Debug, Clone, Copy)]
    pub struct StdClock {
        epoch: Instant,
    }

    impl StdClock {
        pub fn new() -> Self {
            Self {
                epoch: Instant::now(),
            }
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CycleCounter for StdClock {
        fn cycles(&self) -> u64 {
            u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
        }
    }

    impl Clock for StdClock {
        fn stall(&mut self, micros: u64) -> Result<(), DeviceError> {
            std::thread::sleep(Duration::from_micros(micros));
            Ok(())
        }

        fn wait_until(&mut self, deadline: u64) -> Result<(), DeviceError> {
            let now = self.cycles();
            if deadline > now {
                std::thread::sleep(Duration::from_nanos(deadline - now));
            }
            Ok(())
        }
    }
}
