//! Fast trigonometric approximations for filter coefficients.
//!
//! Two-pole coefficient updates need `cos(ω)`/`sin(ω)` where
//! `ω = cutoff · w` is small for every audible cutoff (ω = π/2 corresponds
//! to a cutoff of sample_rate/4). Within that range a short polynomial is
//! accurate to audio tolerances and an order of magnitude cheaper than a
//! `libm` call, which matters when a patch retunes a dozen band-pass
//! filters per control block.
//!
//! # Domain contract
//!
//! Both functions are valid **only on [−π/2, π/2] and return 0 outside**
//! that interval. The hard zero is part of the contract, not an accident:
//! coefficient code guarantees the argument is in range by construction
//! (the resonance clamp forces the pole radius to zero before ω can leave
//! the domain, see [`Bandpass`](crate::Bandpass)), and a zeroed cosine
//! leaves an out-of-range pole harmless rather than explosive.
//!
//! Audio-rate waveshaping (e.g. the four-stroke cylinder model) needs the
//! full period and must use `libm::cosf` instead.
//!
//! # Accuracy
//!
//! | Function | Max error on [−π/2, π/2] |
//! |----------|--------------------------|
//! | [`fast_cos`] | < 9e-4 |
//! | [`fast_sin`] | < 2e-4 |

use core::f32::consts::FRAC_PI_2;

/// Polynomial cosine, valid on [−π/2, π/2], zero outside.
///
/// Even Taylor polynomial through the g³ term
/// (`1 − g/2 + g²/24 − g³/720`, `g = f²`), the same polynomial Pure Data
/// uses for its filter coefficients. Maximum error ~9e-4 at the domain
/// edges.
///
/// # Example
/// ```rust
/// use rugido_core::fast_math::fast_cos;
///
/// assert!((fast_cos(0.0) - 1.0).abs() < 1e-3);
/// assert!(fast_cos(core::f32::consts::FRAC_PI_2).abs() < 1e-3);
/// assert_eq!(fast_cos(2.0), 0.0); // outside the domain
/// ```
#[inline]
pub fn fast_cos(f: f32) -> f32 {
    if (-FRAC_PI_2..=FRAC_PI_2).contains(&f) {
        let g = f * f;
        ((g * g * g * (-1.0 / 720.0) + g * g * (1.0 / 24.0)) - g * 0.5) + 1.0
    } else {
        0.0
    }
}

/// Polynomial sine, valid on [−π/2, π/2], zero outside.
///
/// Odd Taylor polynomial through the f⁷ term. Same domain contract as
/// [`fast_cos`].
#[inline]
pub fn fast_sin(f: f32) -> f32 {
    if (-FRAC_PI_2..=FRAC_PI_2).contains(&f) {
        let g = f * f;
        f * (1.0 + g * (-1.0 / 6.0 + g * (1.0 / 120.0 - g * (1.0 / 5040.0))))
    } else {
        0.0
    }
}
