//! Fixed-timestep frame driver.
//!
//! One frame: drain keys, tick the session once, render, write every row,
//! then sleep away whatever is left of the frame budget. The driver owns
//! every collaborator, so no state outlives it.

use log::{debug, info, warn};

use crate::clock::{
    calibrate_ticks_per_second, micros_to_ticks, ticks_to_micros, Clock,
    DEFAULT_CALIBRATION_MICROS,
};
use crate::core::{GameSession, RandomSource};
use crate::input::{InputHandler, KeySource};
use crate::pacing::FramePacer;
use crate::term::{blit, GameView, Surface, TextOutput};
use crate::types::DeviceError;

/// Result of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// An exit key was pressed; the session was not ticked.
    Exit,
}

pub struct FrameDriver<K, O, C, R> {
    keys: K,
    output: O,
    clock: C,
    session: GameSession<R>,
    view: GameView,
    surface: Surface,
    pacer: FramePacer,
    input: InputHandler,
    calibration_micros: u64,
    /// Zero until calibrated.
    ticks_per_second: u64,
    frames: u64,
    overloaded: bool,
}

impl<K, O, C, R> FrameDriver<K, O, C, R>
where
    K: KeySource,
    O: TextOutput,
    C: Clock,
    R: RandomSource,
{
    pub fn new(keys: K, output: O, clock: C, session: GameSession<R>) -> Self {
        Self {
            keys,
            output,
            clock,
            session,
            view: GameView::default(),
            surface: Surface::new(),
            pacer: FramePacer::default(),
            input: InputHandler::new(),
            calibration_micros: DEFAULT_CALIBRATION_MICROS,
            ticks_per_second: 0,
            frames: 0,
            overloaded: false,
        }
    }

    /// Length of the `stall` used to calibrate the counter.
    pub fn with_calibration_micros(mut self, micros: u64) -> Self {
        self.calibration_micros = micros;
        self
    }

    pub fn with_view(mut self, view: GameView) -> Self {
        self.view = view;
        self
    }

    pub fn with_pacer(mut self, pacer: FramePacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Measure counter ticks per second against the clock's `stall`.
    pub fn calibrate(&mut self) -> Result<u64, DeviceError> {
        let tps = calibrate_ticks_per_second(&mut self.clock, self.calibration_micros)?;
        info!(
            "calibrated counter: {} ticks/s over {} us",
            tps, self.calibration_micros
        );
        self.ticks_per_second = tps;
        Ok(tps)
    }

    /// Clear the screen, calibrate, and run frames until an exit key.
    ///
    /// Returns the final score.
    pub fn run(&mut self) -> Result<u64, DeviceError> {
        self.output.clear_screen()?;
        self.calibrate()?;

        while self.step()? == FrameOutcome::Continue {}

        info!(
            "exit after {} frames, score {}",
            self.frames,
            self.session.score()
        );
        Ok(self.session.score())
    }

    /// Run one frame.
    pub fn step(&mut self) -> Result<FrameOutcome, DeviceError> {
        if self.ticks_per_second == 0 {
            self.calibrate()?;
        }
        let start = self.clock.cycles();

        let frame = self.input.drain(&mut self.keys)?;
        if frame.exit {
            debug!("exit key after {} frames", self.frames);
            return Ok(FrameOutcome::Exit);
        }

        let was_over = self.session.game_over();
        self.session.tick(frame.input);
        if self.session.game_over() && !was_over {
            info!("game over at frame {}", self.frames);
        }

        self.view
            .render_into(&self.session, self.pacer.average_us(), &mut self.surface);
        blit(&self.surface, &mut self.output)?;

        let spent = self.clock.cycles().saturating_sub(start);
        if self.pacer.record(ticks_to_micros(spent, self.ticks_per_second)) {
            self.note_load();
        }

        let budget = self.pacer.sleep_budget_us();
        if budget > 0 {
            let deadline = self
                .clock
                .cycles()
                .saturating_add(micros_to_ticks(budget, self.ticks_per_second));
            self.clock.wait_until(deadline)?;
        }

        self.frames += 1;
        Ok(FrameOutcome::Continue)
    }

    fn note_load(&mut self) {
        let overloaded = self.pacer.overloaded();
        if overloaded && !self.overloaded {
            warn!(
                "frame cost {} us exceeds budget {} us",
                self.pacer.average_us(),
                self.pacer.target_us()
            );
        } else if !overloaded && self.overloaded {
            info!("frame cost back within budget ({} us)", self.pacer.average_us());
        }
        self.overloaded = overloaded;
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
