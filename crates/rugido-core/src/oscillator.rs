//! Phase-accumulator oscillators: phasor, sine, saw, pulse.
//!
//! All four share the same core: a phase in [0, 1) advanced by
//! `frequency / sample_rate` each sample, wrapping by subtraction. They
//! differ only in the output function applied to the phase. Waveforms are
//! naive (not band-limited) by design — the vehicle patches either run
//! them at sub-audio rates (pedal thumps, engine pulses) or bury them
//! under noise where aliasing is inaudible; anti-aliasing is out of scope.
//!
//! Frequencies at or below zero clamp to a small positive epsilon so a
//! careless control mapping can never produce NaN phase increments.

use libm::sinf;

use crate::SampleClock;
use crate::unit::Generator;

/// Smallest admissible frequency in Hz; `set` clamps below this.
const MIN_FREQ_HZ: f32 = 1e-4;

/// Ramp oscillator: outputs its own phase, a 0→1 sawtooth.
///
/// The building block the other oscillators wrap, and useful directly as a
/// cycle position (e.g. the four-stroke cylinder timing).
///
/// # Example
/// ```rust
/// use rugido_core::{Generator, Phasor, SampleClock};
///
/// let mut ph = Phasor::new(SampleClock::new(48000.0));
/// ph.set(480.0); // one cycle per 100 samples
/// let first = ph.process();
/// assert!(first < 0.011);
/// ```
#[derive(Debug, Clone)]
pub struct Phasor {
    phase: f32,
    increment: f32,
    clock: SampleClock,
}

impl Phasor {
    /// Create a phasor at 0 Hz (clamped to epsilon) with phase 0.
    pub fn new(clock: SampleClock) -> Self {
        Self {
            phase: 0.0,
            increment: MIN_FREQ_HZ / clock.sample_rate(),
            clock,
        }
    }

    /// Set the frequency in Hz.
    ///
    /// Values ≤ 0 clamp to a small epsilon; values above the sample rate
    /// clamp to one cycle per sample, keeping the phase wrap an invariant
    /// rather than a hope.
    #[inline]
    pub fn set(&mut self, freq_hz: f32) {
        self.increment = (freq_hz.max(MIN_FREQ_HZ) / self.clock.sample_rate()).min(1.0);
    }

    /// Current phase in [0, 1).
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance one sample and return the phase *before* the advance.
    ///
    /// Returning the pre-advance phase makes the first sample after a
    /// reset start exactly at phase 0.
    #[inline]
    fn tick(&mut self) -> f32 {
        let out = self.phase;
        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }
}

impl Generator for Phasor {
    #[inline]
    fn process(&mut self) -> f32 {
        self.tick()
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Sine oscillator: `sin(2π · phase)`.
#[derive(Debug, Clone)]
pub struct Sine {
    phasor: Phasor,
}

impl Sine {
    /// Create a sine oscillator at 0 Hz (clamped to epsilon).
    pub fn new(clock: SampleClock) -> Self {
        Self {
            phasor: Phasor::new(clock),
        }
    }

    /// Set the frequency in Hz. Values ≤ 0 clamp to a small epsilon.
    #[inline]
    pub fn set(&mut self, freq_hz: f32) {
        self.phasor.set(freq_hz);
    }
}

impl Generator for Sine {
    #[inline]
    fn process(&mut self) -> f32 {
        sinf(core::f32::consts::TAU * self.phasor.tick())
    }

    fn reset(&mut self) {
        self.phasor.reset();
    }
}

/// Bipolar sawtooth: `2 · phase − 1`.
#[derive(Debug, Clone)]
pub struct Saw {
    phasor: Phasor,
}

impl Saw {
    /// Create a saw oscillator at 0 Hz (clamped to epsilon).
    pub fn new(clock: SampleClock) -> Self {
        Self {
            phasor: Phasor::new(clock),
        }
    }

    /// Set the frequency in Hz. Values ≤ 0 clamp to a small epsilon.
    #[inline]
    pub fn set(&mut self, freq_hz: f32) {
        self.phasor.set(freq_hz);
    }
}

impl Generator for Saw {
    #[inline]
    fn process(&mut self) -> f32 {
        2.0 * self.phasor.tick() - 1.0
    }

    fn reset(&mut self) {
        self.phasor.reset();
    }
}

/// Pulse oscillator: +1 while `phase < duty`, −1 otherwise.
///
/// The duty cycle is clamped to [0.01, 0.99] so the waveform always has
/// both states.
#[derive(Debug, Clone)]
pub struct Pulse {
    phasor: Phasor,
    duty: f32,
}

impl Pulse {
    /// Create a pulse oscillator with a 50% duty cycle.
    pub fn new(clock: SampleClock) -> Self {
        Self {
            phasor: Phasor::new(clock),
            duty: 0.5,
        }
    }

    /// Set the frequency in Hz. Values ≤ 0 clamp to a small epsilon.
    #[inline]
    pub fn set(&mut self, freq_hz: f32) {
        self.phasor.set(freq_hz);
    }

    /// Set the duty cycle, clamped to [0.01, 0.99].
    #[inline]
    pub fn set_duty(&mut self, duty: f32) {
        self.duty = duty.clamp(0.01, 0.99);
    }

    /// Current duty cycle.
    #[inline]
    pub fn duty(&self) -> f32 {
        self.duty
    }
}

impl Generator for Pulse {
    #[inline]
    fn process(&mut self) -> f32 {
        if self.phasor.tick() < self.duty {
            1.0
        } else {
            -1.0
        }
    }

    fn reset(&mut self) {
        self.phasor.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOCK: f32 = 48000.0;

    fn clock() -> SampleClock {
        SampleClock::new(CLOCK)
    }

    #[test]
    fn phasor_stays_in_unit_interval() {
        let mut ph = Phasor::new(clock());
        ph.set(12345.6);
        for _ in 0..100_000 {
            let p = ph.process();
            assert!((0.0..1.0).contains(&p), "phase out of range: {p}");
        }
    }

    #[test]
    fn phasor_cycle_length_matches_frequency() {
        let mut ph = Phasor::new(clock());
        ph.set(480.0); // period = 100 samples
        let mut wraps = 0;
        let mut prev = ph.process();
        for _ in 0..48_000 {
            let p = ph.process();
            if p < prev {
                wraps += 1;
            }
            prev = p;
        }
        assert!((479..=481).contains(&wraps), "expected ~480 wraps, got {wraps}");
    }

    #[test]
    fn sine_matches_reference() {
        let mut osc = Sine::new(clock());
        osc.set(440.0);
        for n in 0..256 {
            let expected = sinf(core::f32::consts::TAU * 440.0 * n as f32 / CLOCK);
            let got = osc.process();
            assert!(
                (got - expected).abs() < 1e-4,
                "sample {n}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn negative_frequency_produces_finite_output() {
        let mut osc = Sine::new(clock());
        osc.set(-500.0);
        for _ in 0..1000 {
            assert!(osc.process().is_finite());
        }
    }

    #[test]
    fn pulse_duty_cycle_ratio() {
        let mut osc = Pulse::new(clock());
        osc.set(100.0);
        osc.set_duty(0.25);
        let mut high = 0usize;
        let n = 48_000;
        for _ in 0..n {
            if osc.process() > 0.0 {
                high += 1;
            }
        }
        let ratio = high as f32 / n as f32;
        assert!((ratio - 0.25).abs() < 0.02, "duty ratio was {ratio}");
    }

    #[test]
    fn pulse_duty_clamps() {
        let mut osc = Pulse::new(clock());
        osc.set_duty(0.0);
        assert_eq!(osc.duty(), 0.01);
        osc.set_duty(2.0);
        assert_eq!(osc.duty(), 0.99);
    }

    #[test]
    fn saw_output_range() {
        let mut osc = Saw::new(clock());
        osc.set(1000.0);
        for _ in 0..10_000 {
            let s = osc.process();
            assert!((-1.0..=1.0).contains(&s), "saw out of range: {s}");
        }
    }
}
