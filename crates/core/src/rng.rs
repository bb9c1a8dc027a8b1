//! RNG module - piece selection
//!
//! [`CounterRng`] mixes the current cycle counter into a retained word: the
//! low bits of a free-running counter sampled at human-paced moments are
//! unpredictable enough that successive pieces do not look repetitive.
//! Values are never shown to the player directly; callers reduce them.
//!
//! Also provides a simple LCG for deterministic testing.

/// A monotonic hardware counter (timestamp counter, nanosecond clock, ...).
pub trait CycleCounter {
    fn cycles(&self) -> u64;
}

impl<C: CycleCounter + ?Sized> CycleCounter for &C {
    fn cycles(&self) -> u64 {
        (**self).cycles()
    }
}

impl<C: CycleCounter + ?Sized> CycleCounter for &mut C {
    fn cycles(&self) -> u64 {
        (**self).cycles()
    }
}

/// Anything that can produce a stream of words for piece selection.
pub trait RandomSource {
    fn next_word(&mut self) -> u64;
}

/// Initial retained state of [`CounterRng`].
pub const COUNTER_RNG_SEED: u64 = 0xBAAD_BEEF;

/// Counter-mixing generator: `(counter >> 7) ^ state`, reseeded with every result.
#[derive(Debug, Clone)]
pub struct CounterRng<C> {
    counter: C,
    state: u64,
}

impl<C: CycleCounter> CounterRng<C> {
    pub fn new(counter: C) -> Self {
        Self {
            counter,
            state: COUNTER_RNG_SEED,
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }
}

impl<C: CycleCounter> RandomSource for CounterRng<C> {
    fn next_word(&mut self) -> u64 {
        // The lowest bits of a cycle counter move in lockstep with the loop.
        let sample = self.counter.cycles() >> 7;
        self.state ^= sample;
        self.state
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_word(&mut self) -> u64 {
        // High bits of an LCG are the well-mixed ones.
        u64::from(self.next_u32() >> 8)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_word(&mut self) -> u64 {
        (**self).next_word()
    }
}
