//! Additive oscillator: a fixed bank of sine partials.
//!
//! Resynthesis workhorse for tonal machinery — an engine note or turbine
//! whine is a handful of measured partials, each a frequency ratio and a
//! gain. The partial count is a const-generic parameter, so a table/bank
//! size mismatch is a compile error and the whole bank lives inline with
//! no heap indirection.

use crate::SampleClock;
use crate::oscillator::Sine;
use crate::unit::Generator;

/// One partial of an additive voice: frequency ratio and linear gain.
///
/// `ratio` multiplies the fundamental set on the bank; `gain` scales the
/// partial's contribution to the sum. Tables are usually written in dB and
/// converted with [`db_to_linear`](crate::db_to_linear) once at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partial {
    /// Frequency as a multiple of the bank fundamental.
    pub ratio: f32,
    /// Linear amplitude of this partial.
    pub gain: f32,
}

/// Bank of `K` sine partials summed into one output.
///
/// `set(f)` retunes every partial to `f · ratio_k`; `process()` returns
/// `Σ sine_k · gain_k`. The partial table is immutable configuration
/// passed at construction.
///
/// # Example
/// ```rust
/// use rugido_core::{Additive, Generator, Partial, SampleClock};
///
/// let mut turbine: Additive<2> = Additive::new(
///     SampleClock::new(48000.0),
///     [
///         Partial { ratio: 3097.0, gain: 0.25 },
///         Partial { ratio: 5588.0, gain: 1.0 },
///     ],
/// );
/// turbine.set(0.5); // partials at 1548.5 Hz and 2794 Hz
/// let sample = turbine.process();
/// ```
#[derive(Debug, Clone)]
pub struct Additive<const K: usize> {
    oscillators: [Sine; K],
    partials: [Partial; K],
}

impl<const K: usize> Additive<K> {
    /// Create an additive bank from a partial table.
    pub fn new(clock: SampleClock, partials: [Partial; K]) -> Self {
        Self {
            oscillators: core::array::from_fn(|_| Sine::new(clock)),
            partials,
        }
    }

    /// Retune the bank: partial k moves to `fundamental · ratio_k`.
    ///
    /// Non-positive products clamp inside [`Sine::set`].
    #[inline]
    pub fn set(&mut self, fundamental: f32) {
        for (osc, partial) in self.oscillators.iter_mut().zip(&self.partials) {
            osc.set(fundamental * partial.ratio);
        }
    }

    /// The partial table this bank was built from.
    pub fn partials(&self) -> &[Partial; K] {
        &self.partials
    }
}

impl<const K: usize> Generator for Additive<K> {
    #[inline]
    fn process(&mut self) -> f32 {
        let mut sum = 0.0;
        for (osc, partial) in self.oscillators.iter_mut().zip(&self.partials) {
            sum += osc.process() * partial.gain;
        }
        sum
    }

    fn reset(&mut self) {
        for osc in &mut self.oscillators {
            osc.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::sinf;

    #[test]
    fn single_partial_is_plain_sine() {
        let clock = SampleClock::new(48000.0);
        let mut bank: Additive<1> =
            Additive::new(clock, [Partial { ratio: 1.0, gain: 1.0 }]);
        bank.set(440.0);
        let mut reference = Sine::new(clock);
        reference.set(440.0);
        for _ in 0..512 {
            assert_eq!(bank.process().to_bits(), reference.process().to_bits());
        }
    }

    #[test]
    fn gains_scale_contributions() {
        let clock = SampleClock::new(48000.0);
        let mut bank: Additive<2> = Additive::new(
            clock,
            [
                Partial { ratio: 1.0, gain: 0.5 },
                Partial { ratio: 2.0, gain: 0.25 },
            ],
        );
        bank.set(100.0);
        for n in 0..512 {
            let t = n as f32 / 48000.0;
            let expected = 0.5 * sinf(core::f32::consts::TAU * 100.0 * t)
                + 0.25 * sinf(core::f32::consts::TAU * 200.0 * t);
            let got = bank.process();
            assert!(
                (got - expected).abs() < 1e-3,
                "sample {n}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn output_bounded_by_gain_sum() {
        let clock = SampleClock::new(48000.0);
        let mut bank: Additive<3> = Additive::new(
            clock,
            [
                Partial { ratio: 1.0, gain: 0.4 },
                Partial { ratio: 3.3, gain: 0.4 },
                Partial { ratio: 7.1, gain: 0.2 },
            ],
        );
        bank.set(220.0);
        for _ in 0..10_000 {
            assert!(bank.process().abs() <= 1.0 + 1e-5);
        }
    }
}
