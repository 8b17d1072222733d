//! Mathematical utilities for the per-sample path.
//!
//! Level conversion, saturation and denormal handling shared by every
//! primitive and patch. All functions are allocation-free and `no_std`
//! compatible (`libm` for transcendentals).
//!
//! # Saturation
//!
//! | Function | Character | Used for |
//! |----------|-----------|----------|
//! | [`hard_clip`] | Abrupt limiting | Turbine output cap |
//! | [`soft_clip`] | Smooth tanh curve | General limiting |
//! | [`softclip_drive`] | Scaled tanh with threshold/slope | Exhaust rasp |
//! | [`clip01`] | One-sided [0, 1] clamp | Valve signals |

use libm::{expf, logf, tanhf};

/// Convert decibels to linear gain.
///
/// 0 dB → 1.0, −6 dB → ~0.5, +6 dB → ~2.0. Partial and EQ gain tables are
/// stored in dB and converted once at construction.
///
/// # Example
/// ```rust
/// use rugido_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below zero are floored to −200 dB rather than returning
/// −inf/NaN.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Flush a near-zero value to exactly zero.
///
/// Recurrence filters decay exponentially toward zero and eventually enter
/// the subnormal float range, where many CPUs fall off a performance cliff.
/// Every filter stage passes its retained state through this function.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Hard clip to the ±threshold range.
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// Soft clip using hyperbolic tangent.
///
/// Approaches ±1 asymptotically; produces primarily odd harmonics.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Soft clip with configurable threshold and slope.
///
/// Computes `threshold · tanh(x · slope / threshold)`. At `slope = 1` the
/// curve is tangent to the identity at the origin; raising `slope` drives
/// the signal harder into the tanh knee. Used for exhaust-rasp distortion
/// where the drive amount follows the overrev signal.
#[inline]
pub fn softclip_drive(x: f32, threshold: f32, slope: f32) -> f32 {
    threshold * tanhf(x * slope / threshold)
}

/// Clamp a signal to the [0, 1] range.
///
/// One-sided clipper for valve/pressure signals that are meaningless
/// below zero.
#[inline]
pub fn clip01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_to_linear_known_values() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-3);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_db_linear_roundtrip() {
        for &db in &[-60.0, -12.0, -3.0, 0.0, 6.0, 24.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 1e-3, "roundtrip failed for {db} dB");
        }
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);
        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
        assert_eq!(flush_denormal(0.0), 0.0);
    }

    #[test]
    fn test_hard_clip() {
        assert_eq!(hard_clip(2.0, 0.9), 0.9);
        assert_eq!(hard_clip(-2.0, 0.9), -0.9);
        assert_eq!(hard_clip(0.5, 0.9), 0.5);
    }

    #[test]
    fn test_softclip_drive_small_signal_identity() {
        // Near the origin the curve should track the input scaled by slope
        let y = softclip_drive(0.01, 1.5, 1.0);
        assert!((y - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_softclip_drive_bounded() {
        for i in -100..100 {
            let x = i as f32 * 0.5;
            let y = softclip_drive(x, 1.5, 2.0);
            assert!(y.abs() <= 1.5 + 1e-6, "exceeded threshold at {x}: {y}");
        }
    }

    #[test]
    fn test_clip01() {
        assert_eq!(clip01(-0.5), 0.0);
        assert_eq!(clip01(0.5), 0.5);
        assert_eq!(clip01(1.5), 1.0);
    }
}
