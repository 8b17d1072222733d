//! Rugido Vehicles - procedural vehicle sound patches
//!
//! Complete vehicle voices composed from [`rugido_core`] primitives. Each
//! patch is a [`Generator`](rugido_core::Generator): it takes zero audio
//! inputs, exposes a control-rate `set(...)` for the vehicle state, and
//! emits exactly one output sample per `process()` call.
//!
//! # Patches
//!
//! - [`CarEngine`] - additive resynthesis of a small petrol engine with a
//!   multi-phase ignition start-up
//! - [`FourStrokeEngine`] - cylinder-firing model driven by delay-line
//!   noise and cosine waveshaping
//! - [`ToyBoatEngine`] - 9 Hz putter through a clipped exhaust valve and
//!   body resonances
//! - [`HarrierJet`] - turbine whine ([`Turbine`]) + afterburner roar
//!   ([`Burn`]) + wind and ground echo
//! - [`Bicycle`] - pedal thumps ([`Pedal`]), chain rattle ([`ChainDrive`])
//!   and wheel hum ([`Wheel`])
//!
//! # Conventions
//!
//! - Partial/EQ tables are immutable `const` data, with dB gains converted
//!   once at construction.
//! - All patch randomness (start-up timing, tap detuning, jitter) comes
//!   from seeded LCG streams: the same seed renders the same audio,
//!   bit for bit.
//! - `set` never runs concurrently with `process`; the host calls both
//!   from its audio thread, `set` between blocks.
//!
//! # Example
//!
//! ```rust
//! use rugido_core::{Generator, SampleClock};
//! use rugido_vehicles::CarEngine;
//!
//! let clock = SampleClock::new(48000.0);
//! let mut engine = CarEngine::new(clock);
//!
//! // Key on, idle
//! engine.set(true, 900.0, 0.0, 0.0);
//! let mut block = [0.0f32; 256];
//! for sample in block.iter_mut() {
//!     *sample = engine.process();
//! }
//! ```
//!
//! With the `tracing` feature enabled, engine lifecycle transitions emit
//! `debug!` events from the control path (never from `process`).

pub mod bicycle;
pub mod boat;
pub mod engine;
pub mod four_stroke;
pub mod jet;

pub use bicycle::{Bicycle, ChainDrive, Pedal, Wheel};
pub use boat::ToyBoatEngine;
pub use engine::{CarEngine, EngineState};
pub use four_stroke::FourStrokeEngine;
pub use jet::{Burn, HarrierJet, Turbine};
