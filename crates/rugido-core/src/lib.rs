//! Rugido Core - per-sample DSP primitives for vehicle sound synthesis
//!
//! This crate provides the unit generators a procedural vehicle patch is
//! built from, designed for real-time processing with zero allocation in
//! the audio path: every primitive is advanced exactly once per sample by
//! an external callback and must complete in deterministic time.
//!
//! # Core Abstractions
//!
//! ## Unit Generators
//!
//! - [`Generator`] - produces a sample with no signal input
//! - [`Modifier`] - consumes one input sample, produces one output
//! - [`ModifierExt`] / [`Chain`] - zero-cost modifier chaining
//!
//! ## Sources
//!
//! - [`Noise`] - deterministic LCG white noise in [−1, 1]
//! - [`Phasor`] / [`Sine`] / [`Saw`] / [`Pulse`] - phase-accumulator oscillators
//! - [`Additive`] - fixed bank of sine partials from a [`Partial`] table
//! - [`Envelope`] - breakpoint-interpolated control curve with retrigger
//!   and release
//!
//! ## Filters
//!
//! - [`OnePoleLp`] / [`OnePoleHp`] - one-pole recurrences, coefficient
//!   linear in cutoff
//! - [`Bandpass`] - two-pole resonant band-pass
//! - [`Vcf`] - state-variable resonator with simultaneous low-pass and
//!   band-pass taps
//! - [`DcBlocker`] - fixed sub-audio high-pass
//! - [`Bank`] - N parallel band-pass filters, gain-summed
//!
//! ## Time
//!
//! - [`SampleClock`] - engine-wide sample rate and derived constants
//! - [`DelayLine`] - fixed-capacity ring buffer with fractional reads
//!
//! ## Control
//!
//! - [`SmoothedParam`] / [`LinearSmoothedParam`] / [`AsymmetricSmoother`] -
//!   control-rate to sample-rate bridges
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocation, locking or I/O in `process` paths
//! - **Coefficients recompute on `set`, never per sample**
//! - **Denormals flushed after every filter stage**
//! - **Invalid parameters clamp at `set` time** - the per-sample path
//!   never fails
//! - **Feedback only through delay memory** - read-before-write, at least
//!   one sample of loop latency
//!
//! # no_std Support
//!
//! `no_std` compatible (with `alloc` for delay buffers). Disable the
//! default `std` feature:
//!
//! ```toml
//! [dependencies]
//! rugido-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod additive;
pub mod bandpass;
pub mod bank;
pub mod clock;
pub mod dc_blocker;
pub mod delay;
pub mod envelope;
pub mod fast_math;
pub mod math;
pub mod noise;
pub mod one_pole;
pub mod oscillator;
pub mod param;
pub mod unit;
pub mod vcf;

// Re-export main types at crate root
pub use additive::{Additive, Partial};
pub use bandpass::Bandpass;
pub use bank::Bank;
pub use clock::SampleClock;
pub use dc_blocker::DcBlocker;
pub use delay::DelayLine;
pub use envelope::{Breakpoint, Envelope, EnvelopeState, MAX_BREAKPOINTS, bp};
pub use fast_math::{fast_cos, fast_sin};
pub use math::{
    clip01, db_to_linear, flush_denormal, hard_clip, linear_to_db, soft_clip, softclip_drive,
};
pub use noise::Noise;
pub use one_pole::{OnePoleHp, OnePoleLp};
pub use oscillator::{Phasor, Pulse, Saw, Sine};
pub use param::{AsymmetricSmoother, LinearSmoothedParam, SmoothedParam};
pub use unit::{Chain, Generator, Modifier, ModifierExt};
pub use vcf::Vcf;
