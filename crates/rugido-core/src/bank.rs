//! Fixed bank of parallel band-pass filters.
//!
//! Multi-resonance timbral shaping: the same input runs through N
//! independently tuned [`Bandpass`] filters whose outputs are gain-summed.
//! Engine-noise EQ and body resonances are banks of 3–4 bands.

use crate::SampleClock;
use crate::bandpass::Bandpass;
use crate::unit::Modifier;

/// `N` parallel band-pass filters over one input.
///
/// # Example
/// ```rust
/// use rugido_core::{Bank, SampleClock};
///
/// let mut body: Bank<3> = Bank::new(SampleClock::new(48000.0));
/// body.set(0, 470.0, 8.0);
/// body.set(1, 780.0, 9.0);
/// body.set(2, 1024.0, 10.0);
/// let out = body.process_sum(0.3, &[1.0, 1.0, 1.0]);
/// assert!(out.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Bank<const N: usize> {
    bands: [Bandpass; N],
}

impl<const N: usize> Bank<N> {
    /// Create a bank of `N` unconfigured band-pass filters.
    pub fn new(clock: SampleClock) -> Self {
        Self {
            bands: core::array::from_fn(|_| Bandpass::new(clock)),
        }
    }

    /// Set center frequency and resonance of band `index`.
    #[inline]
    pub fn set(&mut self, index: usize, freq_hz: f32, q: f32) {
        self.bands[index].set(freq_hz, q);
    }

    /// Mutable access to one band, for callers that tap bands separately.
    pub fn band_mut(&mut self, index: usize) -> &mut Bandpass {
        &mut self.bands[index]
    }

    /// Run all bands on `input` and return the gain-weighted sum.
    #[inline]
    pub fn process_sum(&mut self, input: f32, gains: &[f32; N]) -> f32 {
        let mut sum = 0.0;
        for (band, gain) in self.bands.iter_mut().zip(gains) {
            sum += band.process(input) * gain;
        }
        sum
    }

    /// Clear every band's filter state.
    pub fn reset(&mut self) {
        for band in &mut self.bands {
            band.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::sinf;

    #[test]
    fn bank_sums_band_responses() {
        let clock = SampleClock::new(48000.0);
        let mut bank: Bank<2> = Bank::new(clock);
        bank.set(0, 500.0, 3.0);
        bank.set(1, 2000.0, 3.0);

        let mut a = Bandpass::new(clock);
        a.set(500.0, 3.0);
        let mut b = Bandpass::new(clock);
        b.set(2000.0, 3.0);

        for n in 0..2048 {
            let x = sinf(n as f32 * 0.21);
            let expected = a.process(x) * 0.5 + b.process(x) * 2.0;
            let got = bank.process_sum(x, &[0.5, 2.0]);
            assert!((got - expected).abs() < 1e-5, "diverged at {n}");
        }
    }

    #[test]
    fn zero_gains_silence_output() {
        let mut bank: Bank<4> = Bank::new(SampleClock::new(48000.0));
        for i in 0..4 {
            bank.set(i, 100.0 * (i + 1) as f32, 5.0);
        }
        for n in 0..1024 {
            let out = bank.process_sum(sinf(n as f32 * 0.3), &[0.0; 4]);
            assert_eq!(out, 0.0);
        }
    }
}
