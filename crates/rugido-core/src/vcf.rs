//! State-variable resonant filter with simultaneous low-pass and
//! band-pass taps.
//!
//! A complex one-pole resonator (Pure Data's `vcf~` formulation): the state
//! is a complex number `(re, im)` rotated each sample by the pole
//! `r · e^{iω}`, with the input injected on the real axis. The real part
//! is the low-pass tap, the imaginary part the band-pass tap — both fall
//! out of one coefficient set, unlike the real-valued
//! [`Bandpass`](crate::Bandpass) recurrence.
//!
//! ```text
//! ω    = f · w                  (clamped ≥ 0)
//! r    = max(0, 1 − ω / q)
//! gain = 2 − 2 / (q + 2)
//!
//! re[n] = gain · (1 − r) · x[n] + r·cos(ω) · re[n−1] − r·sin(ω) · im[n−1]
//! im[n] =                         r·sin(ω) · re[n−1] + r·cos(ω) · im[n−1]
//! ```
//!
//! `cos`/`sin` come from the polynomial approximations in
//! [`fast_math`](crate::fast_math) and share their domain contract:
//! cutoffs above sample_rate/4 leave the filter stable but detuned.

use crate::SampleClock;
use crate::fast_math::{fast_cos, fast_sin};
use crate::math::flush_denormal;
use crate::unit::Modifier;

/// Resonant state-variable filter with low-pass and band-pass taps.
///
/// # Example
/// ```rust
/// use rugido_core::{SampleClock, Vcf};
///
/// let mut vcf = Vcf::new(SampleClock::new(48000.0));
/// vcf.set(1200.0, 0.6);
/// let (lp, bp) = vcf.process_taps(0.5);
/// assert!(lp.is_finite() && bp.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Vcf {
    freq: f32,
    q: f32,
    re: f32,
    im: f32,
    coef_re: f32,
    coef_im: f32,
    input_gain: f32,
    clock: SampleClock,
}

impl Vcf {
    /// Create a filter with zeroed coefficients (silent until `set`).
    pub fn new(clock: SampleClock) -> Self {
        Self {
            freq: 0.0,
            q: 0.0,
            re: 0.0,
            im: 0.0,
            coef_re: 0.0,
            coef_im: 0.0,
            input_gain: 0.0,
            clock,
        }
    }

    /// Set center frequency (Hz) and resonance.
    ///
    /// Both clamp to a 1e-3 floor. Coefficients recompute only on change.
    #[inline]
    pub fn set(&mut self, freq_hz: f32, q: f32) {
        let freq_hz = freq_hz.max(0.001);
        let q = q.max(0.001);
        if self.freq != freq_hz || self.q != q {
            self.freq = freq_hz;
            self.q = q;
            self.update();
        }
    }

    /// Current center frequency in Hz.
    pub fn freq(&self) -> f32 {
        self.freq
    }

    /// Current resonance.
    pub fn q(&self) -> f32 {
        self.q
    }

    fn update(&mut self) {
        let omega = (self.freq * self.clock.w()).max(0.0);
        let r = (1.0 - omega / self.q).max(0.0);
        let gain = 2.0 - 2.0 / (self.q + 2.0);
        self.coef_re = r * fast_cos(omega);
        self.coef_im = r * fast_sin(omega);
        self.input_gain = gain * (1.0 - r);
    }

    /// Advance one sample and return both taps: `(lowpass, bandpass)`.
    #[inline]
    pub fn process_taps(&mut self, input: f32) -> (f32, f32) {
        let re = self.input_gain * input + self.coef_re * self.re - self.coef_im * self.im;
        let im = self.coef_im * self.re + self.coef_re * self.im;
        self.re = flush_denormal(re);
        self.im = flush_denormal(im);
        (self.re, self.im)
    }
}

impl Modifier for Vcf {
    /// Low-pass tap; use [`Vcf::process_taps`] when both are needed.
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.process_taps(input).0
    }

    fn reset(&mut self) {
        self.re = 0.0;
        self.im = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::sinf;

    fn clock() -> SampleClock {
        SampleClock::new(48000.0)
    }

    fn tap_rms(vcf: &mut Vcf, freq: f32, bandpass: bool) -> f32 {
        vcf.reset();
        let mut sum_sq = 0.0f32;
        let settle = 4800;
        let measure = 4800;
        for n in 0..(settle + measure) {
            let x = sinf(core::f32::consts::TAU * freq * n as f32 / 48000.0);
            let (lp, bp) = vcf.process_taps(x);
            let y = if bandpass { bp } else { lp };
            if n >= settle {
                sum_sq += y * y;
            }
        }
        libm::sqrtf(sum_sq / measure as f32)
    }

    #[test]
    fn lowpass_tap_attenuates_high_frequencies() {
        let mut vcf = Vcf::new(clock());
        vcf.set(500.0, 1.0);
        let low = tap_rms(&mut vcf, 100.0, false);
        let high = tap_rms(&mut vcf, 8000.0, false);
        assert!(low > high * 4.0, "low {low}, high {high}");
    }

    #[test]
    fn bandpass_tap_peaks_near_center() {
        let mut vcf = Vcf::new(clock());
        vcf.set(1000.0, 5.0);
        let at_center = tap_rms(&mut vcf, 1000.0, true);
        let far_below = tap_rms(&mut vcf, 100.0, true);
        let far_above = tap_rms(&mut vcf, 10_000.0, true);
        assert!(
            at_center > far_below && at_center > far_above,
            "center {at_center}, below {far_below}, above {far_above}"
        );
    }

    #[test]
    fn stable_under_sustained_input() {
        let mut vcf = Vcf::new(clock());
        vcf.set(2000.0, 10.0);
        for n in 0..50_000 {
            let (lp, bp) = vcf.process_taps(sinf(n as f32 * 0.26));
            assert!(lp.is_finite() && bp.is_finite());
            assert!(lp.abs() < 50.0 && bp.abs() < 50.0, "blow-up at {n}");
        }
    }

    #[test]
    fn tiny_q_collapses_resonance() {
        // q at the floor forces r to 0: no feedback, output tracks input
        // scaled by the input gain, bounded everywhere.
        let mut vcf = Vcf::new(clock());
        vcf.set(1000.0, 0.0); // clamps to 1e-3
        for n in 0..10_000 {
            let (lp, _) = vcf.process_taps(sinf(n as f32 * 0.4));
            assert!(lp.abs() <= 1.01, "bounded pass expected, got {lp}");
        }
    }
}
