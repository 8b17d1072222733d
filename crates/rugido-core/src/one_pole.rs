//! One-pole low-pass and high-pass filters.
//!
//! The gentlest possible recurrence filter (6 dB/oct), with the coefficient
//! linear in cutoff:
//!
//! ```text
//! coef = clamp(cutoff · w, 0, 1)      where w = 2π / sample_rate
//! y[n] = coef · x[n] + (1 − coef) · y[n−1]
//! ```
//!
//! The high-pass is the complement: input minus the low-pass output. The
//! coefficient is recomputed only in `set`, never per sample, and the
//! retained state is denormal-flushed on every tick.
//!
//! This is the coefficient convention of Pure Data's `lop~`/`hip~`,
//! which the patch tunings here assume: throttle response shaping, valve
//! smoothing, rumble removal.

use crate::SampleClock;
use crate::math::flush_denormal;
use crate::unit::Modifier;

/// One-pole low-pass filter.
///
/// # Example
/// ```rust
/// use rugido_core::{Modifier, OnePoleLp, SampleClock};
///
/// let mut lop = OnePoleLp::new(SampleClock::new(48000.0));
/// lop.set(30.0); // very gentle, engine-throttle territory
/// let out = lop.process(1.0);
/// assert!(out > 0.0 && out < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct OnePoleLp {
    coef: f32,
    y1: f32,
    clock: SampleClock,
}

impl OnePoleLp {
    /// Create a low-pass with the coefficient at zero (full smoothing).
    pub fn new(clock: SampleClock) -> Self {
        Self {
            coef: 0.0,
            y1: 0.0,
            clock,
        }
    }

    /// Set the cutoff frequency in Hz.
    ///
    /// `coef = cutoff · w` clamped to [0, 1]: negative cutoffs behave as
    /// 0 Hz (output frozen toward DC), cutoffs above `sample_rate / 2π`
    /// pass the input through unchanged.
    #[inline]
    pub fn set(&mut self, cutoff_hz: f32) {
        self.coef = (cutoff_hz * self.clock.w()).clamp(0.0, 1.0);
    }

    /// Current smoothing coefficient.
    #[inline]
    pub fn coef(&self) -> f32 {
        self.coef
    }
}

impl Modifier for OnePoleLp {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.y1 = flush_denormal(self.coef * input + (1.0 - self.coef) * self.y1);
        self.y1
    }

    fn reset(&mut self) {
        self.y1 = 0.0;
    }
}

/// One-pole high-pass filter: input minus the one-pole low-pass.
#[derive(Debug, Clone)]
pub struct OnePoleHp {
    lp: OnePoleLp,
}

impl OnePoleHp {
    /// Create a high-pass with the underlying low-pass coefficient at zero.
    pub fn new(clock: SampleClock) -> Self {
        Self {
            lp: OnePoleLp::new(clock),
        }
    }

    /// Set the cutoff frequency in Hz (same clamping as [`OnePoleLp::set`]).
    #[inline]
    pub fn set(&mut self, cutoff_hz: f32) {
        self.lp.set(cutoff_hz);
    }
}

impl Modifier for OnePoleHp {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        input - self.lp.process(input)
    }

    fn reset(&mut self) {
        self.lp.reset();
    }
}
