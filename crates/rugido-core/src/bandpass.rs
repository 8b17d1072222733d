//! Two-pole resonant band-pass filter.
//!
//! The real-valued resonator the vehicle patches lean on hardest: engine
//! formants, chain rattle coloration, body resonances. Difference
//! equation:
//!
//! ```text
//! y[n] = x[n] + coef1 · y[n−1] + coef2 · y[n−2]
//! out  = y[n] · gain
//! ```
//!
//! with coefficients derived from cutoff `f` and resonance `q` only when
//! either changes:
//!
//! ```text
//! ω           = f · w
//! one_minus_r = clamp(ω / q, 0, 1)        (q below 1e-3 ⇒ 1)
//! r           = 1 − one_minus_r
//! coef1       = 2 · fast_cos(ω) · r
//! coef2       = −r²
//! gain        = 2 · one_minus_r · (one_minus_r + r · ω)
//! ```
//!
//! As `q → 0` the pole radius collapses (`r → 0`) and the filter degrades
//! gracefully to a bounded pass-through-like response rather than blowing
//! up.
//!
//! # Cutoff domain
//!
//! `fast_cos` is valid for ω ≤ π/2, i.e. cutoff ≤ sample_rate/4, and
//! returns 0 beyond it. Above that limit the filter stays stable
//! (`coef1 = 0` leaves a two-pole with real radius r) but no longer sits
//! at the requested frequency. Callers are expected to keep cutoffs below
//! sample_rate/4; the vehicle patches all do.

use crate::SampleClock;
use crate::fast_math::fast_cos;
use crate::math::flush_denormal;
use crate::unit::Modifier;

/// Two-pole resonant band-pass (Pure Data's `bpf~` formulation).
///
/// # Example
/// ```rust
/// use rugido_core::{Bandpass, Modifier, SampleClock};
///
/// let mut formant = Bandpass::new(SampleClock::new(48000.0));
/// formant.set(590.0, 4.0);
/// let out = formant.process(0.25);
/// assert!(out.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Bandpass {
    freq: f32,
    q: f32,
    y1: f32,
    y2: f32,
    coef1: f32,
    coef2: f32,
    gain: f32,
    clock: SampleClock,
}

impl Bandpass {
    /// Create a band-pass with zeroed coefficients (passes nothing until
    /// `set` is called).
    pub fn new(clock: SampleClock) -> Self {
        Self {
            freq: 0.0,
            q: 0.0,
            y1: 0.0,
            y2: 0.0,
            coef1: 0.0,
            coef2: 0.0,
            gain: 0.0,
            clock,
        }
    }

    /// Set center frequency (Hz) and resonance.
    ///
    /// Frequency clamps to a 1 mHz floor, q to zero. Coefficients are
    /// recomputed only if either value actually changed, so calling this
    /// every control block with an unchanged dial costs two compares.
    #[inline]
    pub fn set(&mut self, freq_hz: f32, q: f32) {
        let freq_hz = freq_hz.max(0.001);
        let q = q.max(0.0);
        if self.freq != freq_hz || self.q != q {
            self.freq = freq_hz;
            self.q = q;
            self.update();
        }
    }

    /// Retune the center frequency, keeping the current resonance.
    #[inline]
    pub fn set_cutoff(&mut self, freq_hz: f32) {
        let q = self.q;
        self.set(freq_hz, q);
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
        let omega = self.freq * self.clock.w();
        let one_minus_r = if self.q < 0.001 {
            1.0
        } else {
            (omega / self.q).min(1.0)
        };
        let r = 1.0 - one_minus_r;
        self.coef1 = 2.0 * fast_cos(omega) * r;
        self.coef2 = -r * r;
        self.gain = 2.0 * one_minus_r * (one_minus_r + r * omega);
    }
}

impl Modifier for Bandpass {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let y = input + self.coef1 * self.y1 + self.coef2 * self.y2;
        self.y2 = self.y1;
        self.y1 = flush_denormal(y);
        self.y1 * self.gain
    }

    fn reset(&mut self) {
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::sinf;

    fn clock() -> SampleClock {
        SampleClock::new(48000.0)
    }

    /// RMS of a settled sine response at `freq` through the filter.
    fn response_rms(filter: &mut Bandpass, freq: f32) -> f32 {
        filter.reset();
        let mut sum_sq = 0.0f32;
        let settle = 4800;
        let measure = 4800;
        for n in 0..(settle + measure) {
            let x = sinf(core::f32::consts::TAU * freq * n as f32 / 48000.0);
            let y = filter.process(x);
            if n >= settle {
                sum_sq += y * y;
            }
        }
        libm::sqrtf(sum_sq / measure as f32)
    }

    #[test]
    fn peaks_at_center_frequency() {
        let mut bpf = Bandpass::new(clock());
        bpf.set(1000.0, 5.0);
        let at_center = response_rms(&mut bpf, 1000.0);
        let below = response_rms(&mut bpf, 250.0);
        let above = response_rms(&mut bpf, 4000.0);
        assert!(
            at_center > below * 2.0 && at_center > above * 2.0,
            "center {at_center}, below {below}, above {above}"
        );
    }

    #[test]
    fn zero_q_stays_bounded() {
        // q → 0 collapses the pole radius; output must stay bounded over a
        // long run of bounded input.
        let mut bpf = Bandpass::new(clock());
        bpf.set(1000.0, 0.0);
        let mut noiselike = 0.7f32;
        for n in 0..10_000 {
            noiselike = -noiselike * 0.99;
            let y = bpf.process(noiselike + 0.1 * sinf(n as f32 * 0.37));
            assert!(y.is_finite() && y.abs() < 10.0, "unbounded at {n}: {y}");
        }
    }

    #[test]
    fn high_q_rings_longer() {
        let mut lazy = Bandpass::new(clock());
        lazy.set(500.0, 0.5);
        let mut ringy = Bandpass::new(clock());
        ringy.set(500.0, 20.0);

        // Impulse, then measure energy in the tail
        let mut tail_lazy = 0.0f32;
        let mut tail_ringy = 0.0f32;
        lazy.process(1.0);
        ringy.process(1.0);
        for _ in 0..2000 {
            tail_lazy += lazy.process(0.0).abs();
            tail_ringy += ringy.process(0.0).abs();
        }
        assert!(
            tail_ringy > tail_lazy,
            "high q should ring longer: {tail_ringy} vs {tail_lazy}"
        );
    }

    #[test]
    fn set_skips_recompute_when_unchanged() {
        let mut bpf = Bandpass::new(clock());
        bpf.set(880.0, 3.0);
        let c1 = bpf.coef1;
        bpf.set(880.0, 3.0);
        assert_eq!(bpf.coef1.to_bits(), c1.to_bits());
    }

    #[test]
    fn cutoff_above_quarter_rate_is_stable() {
        // Past sr/4 fast_cos returns 0; the filter detunes but must not
        // blow up.
        let mut bpf = Bandpass::new(clock());
        bpf.set(20_000.0, 8.0);
        for n in 0..10_000 {
            let y = bpf.process(sinf(n as f32 * 0.5));
            assert!(y.is_finite() && y.abs() < 100.0, "unstable at {n}: {y}");
        }
    }

    #[test]
    fn negative_parameters_clamp() {
        let mut bpf = Bandpass::new(clock());
        bpf.set(-100.0, -5.0);
        assert_eq!(bpf.freq(), 0.001);
        assert_eq!(bpf.q(), 0.0);
    }
}
