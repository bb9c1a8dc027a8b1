//! Rolling frame-cost average and the sleep budget derived from it.

use crate::types::{FRAME_AVERAGE_WINDOW, TARGET_FRAME_MICROS};

/// Accumulates per-frame costs and publishes their average in blocks.
///
/// Samples are summed until more than `window` have been collected; the
/// average is then published and the accumulator restarts. Until the first
/// block completes the published average is zero.
#[derive(Debug, Clone)]
pub struct FramePacer {
    target_us: u64,
    window: u32,
    acc: u64,
    count: u32,
    average: u64,
}

impl FramePacer {
    pub fn new(target_us: u64, window: u32) -> Self {
        Self {
            target_us,
            window,
            acc: 0,
            count: 0,
            average: 0,
        }
    }

    /// Record one frame's cost. Returns `true` when a new average was published.
    pub fn record(&mut self, frame_us: u64) -> bool {
        self.acc = self.acc.saturating_add(frame_us);
        self.count += 1;
        if self.count > self.window {
            self.average = self.acc / u64::from(self.count);
            self.acc = 0;
            self.count = 0;
            return true;
        }
        false
    }

    /// Last published average frame cost.
    pub fn average_us(&self) -> u64 {
        self.average
    }

    pub fn target_us(&self) -> u64 {
        self.target_us
    }

    /// Microseconds left in the frame budget after the average cost.
    pub fn sleep_budget_us(&self) -> u64 {
        self.target_us.saturating_sub(self.average)
    }

    /// The average cost exceeds the frame budget.
    pub fn overloaded(&self) -> bool {
        self.average > self.target_us
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(TARGET_FRAME_MICROS, FRAME_AVERAGE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_published_after_window_exceeded() {
        let mut p = FramePacer::default();
        for _ in 0..FRAME_AVERAGE_WINDOW {
            assert!(!p.record(1_000));
        }
        assert_eq!(p.average_us(), 0);
        assert_eq!(p.sleep_budget_us(), TARGET_FRAME_MICROS);

        assert!(p.record(1_000));
        assert_eq!(p.average_us(), 1_000);
        assert_eq!(p.sleep_budget_us(), TARGET_FRAME_MICROS - 1_000);
    }

    #[test]
    fn test_blocks_restart_after_publish() {
        let mut p = FramePacer::new(100, 1);
        p.record(10);
        assert!(p.record(30));
        assert_eq!(p.average_us(), 20);

        assert!(!p.record(50));
        assert_eq!(p.average_us(), 20);
        assert!(p.record(70));
        assert_eq!(p.average_us(), 60);
    }

    #[test]
    fn test_sleep_budget_saturates_at_zero() {
        let mut p = FramePacer::new(100, 0);
        p.record(250);
        assert_eq!(p.average_us(), 250);
        assert_eq!(p.sleep_budget_us(), 0);
        assert!(p.overloaded());
    }
}
