//! Control-rate to sample-rate parameter smoothing.
//!
//! Controls change once per processing block; filters and oscillators read
//! values every sample. Feeding a stepped control straight into a cutoff
//! or pitch produces audible zipper artifacts, so every such path goes
//! through a smoother:
//!
//! - [`SmoothedParam`] — exponential slew `current += (target − current) · k`,
//!   the RC-like response used for most dials;
//! - [`LinearSmoothedParam`] — constant-rate ramp that lands exactly on the
//!   target, for crossfade-style transitions;
//! - [`AsymmetricSmoother`] — exponential slew with separate rise and fall
//!   coefficients (an engine revs up slower than it revs down).

use libm::expf;

/// Exponentially smoothed parameter.
///
/// For `0 < k < 1` the value approaches the target monotonically and never
/// overshoots. The smoothing time is given in milliseconds as the
/// one-pole time constant: `k = 1 − exp(−1 / (τ · sample_rate))`.
///
/// # Example
/// ```rust
/// use rugido_core::SmoothedParam;
///
/// let mut cutoff = SmoothedParam::new(1000.0, 48000.0, 20.0);
/// cutoff.set_target(4000.0);
/// let v = cutoff.advance(); // one sample closer to 4 kHz
/// assert!(v > 1000.0 && v < 4000.0);
/// ```
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    coeff: f32,
}

impl SmoothedParam {
    /// Create a smoothed parameter.
    ///
    /// `smoothing_ms` of zero (or a non-positive sample rate) disables
    /// smoothing: the value snaps on the next `advance`.
    pub fn new(initial: f32, sample_rate: f32, smoothing_ms: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: Self::coeff_for(sample_rate, smoothing_ms),
        }
    }

    /// Create with an explicit per-sample slew coefficient in (0, 1].
    pub fn with_coeff(initial: f32, coeff: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: coeff.clamp(0.0, 1.0),
        }
    }

    fn coeff_for(sample_rate: f32, smoothing_ms: f32) -> f32 {
        if smoothing_ms <= 0.0 || sample_rate <= 0.0 {
            1.0
        } else {
            let samples = smoothing_ms * 0.001 * sample_rate;
            1.0 - expf(-1.0 / samples)
        }
    }

    /// Set a new target; the value slews toward it on later `advance`s.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Snap to a value immediately, bypassing the slew.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.coeff;
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// The target being slewed toward.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True when the value is within 1e-6 of the target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }
}

/// Linearly smoothed parameter: constant rate, exact arrival.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    current: f32,
    target: f32,
    increment: f32,
    samples_remaining: u32,
    sample_rate: f32,
    transition_ms: f32,
}

impl LinearSmoothedParam {
    /// Create a linear smoother with the given transition time.
    pub fn new(initial: f32, sample_rate: f32, transition_ms: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate,
            transition_ms,
        }
    }

    /// Start a ramp from the current value to `target`.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < 1e-9 {
            return;
        }
        self.target = target;
        let samples = (self.transition_ms * 0.001 * self.sample_rate) as u32;
        if samples == 0 {
            self.current = target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (target - self.current) / samples as f32;
            self.samples_remaining = samples;
        }
    }

    /// Snap to a value immediately.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    /// Advance one sample; lands exactly on the target at the ramp end.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target;
            }
        }
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// True when the ramp has completed.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }
}

/// Exponential slew with separate rise and fall coefficients.
///
/// `advance` nudges toward the target with the rise coefficient when the
/// target is above the current value and the fall coefficient when below.
#[derive(Debug, Clone)]
pub struct AsymmetricSmoother {
    current: f32,
    target: f32,
    rise: f32,
    fall: f32,
}

impl AsymmetricSmoother {
    /// Create with per-sample rise and fall coefficients in (0, 1].
    pub fn new(initial: f32, rise: f32, fall: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            rise: rise.clamp(0.0, 1.0),
            fall: fall.clamp(0.0, 1.0),
        }
    }

    /// Set a new target.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Snap to a value immediately.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let k = if self.target > self.current {
            self.rise
        } else {
            self.fall
        };
        self.current += (self.target - self.current) * k;
        self.current
    }

    /// Advance using the rise coefficient regardless of direction.
    ///
    /// For callers whose "rising" condition is more than a value compare —
    /// an engine holds the slow coefficient through its whole rev flare,
    /// downward moves included.
    #[inline]
    pub fn advance_rising(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.rise;
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_converges_monotonically_without_overshoot() {
        let mut param = SmoothedParam::with_coeff(0.0, 0.01);
        param.set_target(1.0);
        let mut prev = 0.0;
        for _ in 0..5000 {
            let v = param.advance();
            assert!(v >= prev, "must be monotone: {v} < {prev}");
            assert!(v <= 1.0, "must not overshoot: {v}");
            prev = v;
        }
        assert!((param.get() - 1.0).abs() < 1e-3, "should converge, got {}", param.get());
    }

    #[test]
    fn exponential_time_constant() {
        // After one time constant the value reaches ~63.2% of the step
        let mut param = SmoothedParam::new(0.0, 48000.0, 10.0);
        param.set_target(1.0);
        for _ in 0..480 {
            param.advance();
        }
        let expected = 1.0 - expf(-1.0);
        assert!(
            (param.get() - expected).abs() < 0.05,
            "expected ~{expected}, got {}",
            param.get()
        );
    }

    #[test]
    fn zero_smoothing_snaps() {
        let mut param = SmoothedParam::new(1.0, 48000.0, 0.0);
        param.set_target(0.25);
        assert_eq!(param.advance(), 0.25);
    }

    #[test]
    fn linear_lands_exactly() {
        let mut param = LinearSmoothedParam::new(0.0, 48000.0, 10.0);
        param.set_target(1.0);
        for _ in 0..480 {
            param.advance();
        }
        assert_eq!(param.get(), 1.0);
        assert!(param.is_settled());
    }

    #[test]
    fn linear_constant_rate() {
        let mut param = LinearSmoothedParam::new(0.0, 48000.0, 10.0);
        param.set_target(1.0);
        for _ in 0..240 {
            param.advance();
        }
        assert!((param.get() - 0.5).abs() < 0.01, "halfway, got {}", param.get());
    }

    #[test]
    fn asymmetric_rises_slower_than_it_falls() {
        let mut slew = AsymmetricSmoother::new(0.0, 0.0001, 0.001);
        slew.set_target(1.0);
        for _ in 0..1000 {
            slew.advance();
        }
        let risen = slew.get();

        let mut down = AsymmetricSmoother::new(1.0, 0.0001, 0.001);
        down.set_target(0.0);
        for _ in 0..1000 {
            down.advance();
        }
        let fallen = 1.0 - down.get();

        assert!(
            fallen > risen * 2.0,
            "fall should outpace rise: fell {fallen}, rose {risen}"
        );
    }
}
