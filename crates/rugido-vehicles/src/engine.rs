//! Car engine model: additive resynthesis of a small petrol engine.
//!
//! The engine note is fifteen measured partials driven by a shared `rate`
//! signal, layered over band-pass-colored noise, with a comb resonance and
//! a rev-keyed resonant low-pass shaping the blend. A starter envelope and
//! a rev-flare envelope sequence the multi-phase start-up: delayed
//! ignition spike, rev flare, settle to idle.
//!
//! Control flow is an explicit state machine clocked by ignition edges:
//!
//! ```text
//! Off ──ignition on──▶ Starting ──rev flare done──▶ Running
//!  ▲                      │                            │
//!  └──starter released────┴───────ignition off─────────┘
//!              (Stopping)
//! ```
//!
//! The rpm→rate mapping normalises 900 rpm to 1.0 and loses a little
//! energy at high revs (`rate −= 0.05·rate²`). Rate rises an order of
//! magnitude slower than it falls, which is what makes pulling away sound
//! like load rather than a pitch bend.

use rugido_core::{
    AsymmetricSmoother, Bank, DelayLine, Envelope, Generator, Modifier, Noise, OnePoleLp,
    SampleClock, Sine, Vcf, bp, db_to_linear, softclip_drive,
};

/// One measured engine partial: absolute frequency at idle, gain in dB.
struct EnginePartial {
    freq: f32,
    gain_db: f32,
}

/// Partial table resynthesised from a recording of the idling engine.
/// Frequencies are at `rate = 1.0` (900 rpm); gains are relative dB,
/// shifted −48 dB at load time.
const ENGINE_PARTIALS: [EnginePartial; 15] = [
    EnginePartial { freq: 86.1, gain_db: 44.5 },
    EnginePartial { freq: 64.6, gain_db: 43.8 },
    EnginePartial { freq: 43.1, gain_db: 40.3 },
    EnginePartial { freq: 53.8, gain_db: 37.0 },
    EnginePartial { freq: 99.6, gain_db: 35.9 },
    EnginePartial { freq: 21.5, gain_db: 35.4 },
    EnginePartial { freq: 110.4, gain_db: 33.8 },
    EnginePartial { freq: 75.4, gain_db: 31.5 },
    EnginePartial { freq: 175.0, gain_db: 29.0 },
    EnginePartial { freq: 118.4, gain_db: 28.5 },
    EnginePartial { freq: 131.9, gain_db: 26.1 },
    EnginePartial { freq: 142.7, gain_db: 24.8 },
    EnginePartial { freq: 166.9, gain_db: 18.7 },
    EnginePartial { freq: 8.1, gain_db: 18.4 },
    EnginePartial { freq: 185.7, gain_db: 17.7 },
];

/// Noise-coloration EQ: center frequency, resonance, gain in dB.
const EQ_BANDS: [(f32, f32, f32); 4] = [
    (65.0, 3.0, 14.2),
    (1672.0, 3.0, 10.3),
    (3316.0, 6.0, 6.9),
    (9717.0, 6.0, 1.1),
];

/// Broadband noise shelf under the EQ bands.
const NOISE_SHELF_DB: f32 = -25.0;

/// Engine lifecycle, driven by ignition edges and envelope completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Silent; ignition off and starter fully released.
    Off,
    /// Ignition on, start-up sequence (spike and rev flare) in progress.
    Starting,
    /// Start-up complete; throttle response at normal speed.
    Running,
    /// Ignition off, starter envelope ramping the engine down.
    Stopping,
}

/// Small petrol engine voice.
///
/// `set` is called at control rate with the vehicle state; `process`
/// renders one sample. Randomized timing (starter delay, partial jitter,
/// comb detune) comes from an internal seeded LCG, so a given seed
/// reproduces the exact same start-up.
///
/// # Example
/// ```rust
/// use rugido_core::{Generator, SampleClock};
/// use rugido_vehicles::CarEngine;
///
/// let mut engine = CarEngine::new(SampleClock::new(48000.0));
/// engine.set(true, 900.0, 0.0, 0.0); // key on, idle rpm
/// let sample = engine.process();
/// ```
pub struct CarEngine {
    clock: SampleClock,
    state: EngineState,
    ignition: bool,

    // Engine tone
    osc: [Sine; 15],
    osc_gain: [f32; 15],

    // Engine noise
    noise: Noise,
    eq: Bank<4>,
    eq_gain: [f32; 4],
    shelf: f32,

    // Resonance and tone shaping
    comb: DelayLine,
    lpf: Vcf,
    throttle_lpf: OnePoleLp,

    // Start-up sequencing
    starter: Envelope,
    rev: Envelope,

    // Control-rate parameters
    rpm: f32,
    throttle: f32,
    gear: f32, // reserved for transmission whine, not yet audible

    // Per-sample signals
    rate: AsymmetricSmoother,
    gas: f32,
    power: f32,

    /// Control-randomness stream, separate from the audio noise.
    rng: Noise,
}

impl CarEngine {
    /// Create an engine with the default randomness seed.
    pub fn new(clock: SampleClock) -> Self {
        Self::with_seed(clock, 0x656e67) // "eng"
    }

    /// Create an engine with an explicit randomness seed (reproducible
    /// start-up timing and jitter).
    pub fn with_seed(clock: SampleClock, seed: i32) -> Self {
        let mut eq = Bank::new(clock);
        let mut eq_gain = [0.0; 4];
        for (i, &(freq, q, gain_db)) in EQ_BANDS.iter().enumerate() {
            eq.set(i, freq, q);
            eq_gain[i] = db_to_linear(gain_db);
        }

        let osc_gain = core::array::from_fn(|p| db_to_linear(ENGINE_PARTIALS[p].gain_db - 48.0));

        let mut starter = Envelope::new(clock);
        starter.initialise(&[bp(0.0, 0.0)]);

        let mut throttle_lpf = OnePoleLp::new(clock);
        throttle_lpf.set(0.05);

        Self {
            clock,
            state: EngineState::Off,
            ignition: false,
            osc: core::array::from_fn(|_| Sine::new(clock)),
            osc_gain,
            noise: Noise::with_seed(seed ^ 0x5f5f),
            eq,
            eq_gain,
            shelf: db_to_linear(NOISE_SHELF_DB),
            comb: DelayLine::new(512),
            lpf: Vcf::new(clock),
            throttle_lpf,
            starter,
            rev: Envelope::new(clock),
            rpm: 0.0,
            throttle: 0.0,
            gear: 0.0,
            rate: AsymmetricSmoother::new(0.0, 0.0001, 0.001),
            gas: 0.0,
            power: 0.0,
            rng: Noise::with_seed(seed),
        }
    }

    /// Update the vehicle state (control rate).
    ///
    /// `rpm` is the crankshaft speed in revolutions per minute (900 = idle),
    /// `throttle` is 0–1, `gear` is stored for future use. Ignition edges
    /// trigger the start-up/shut-down sequences.
    pub fn set(&mut self, ignition: bool, rpm: f32, throttle: f32, gear: f32) {
        if ignition && !self.ignition {
            self.start();
        } else if !ignition && self.ignition {
            self.stop();
        }
        self.ignition = ignition;

        // 900 rpm = 1.0, with slight energy loss at high revs
        let mut r = (rpm / 900.0).max(0.0);
        r -= 0.05 * (r * r);
        self.rpm = r;
        self.throttle = throttle;
        self.gear = gear;
    }

    /// Key-on: randomized delayed spike on the starter, rev flare at the
    /// catch point, slow throttle response until the flare settles.
    fn start(&mut self) {
        let delay = self.rng.range(0.25, 0.75);
        let flare = self.rng.range(2.0, 5.0);

        self.starter.initialise(&[
            bp(0.0, 0.5),
            bp(delay, 1.0),
            bp(delay + 0.25, 2.0),
            bp(delay + 0.5, 1.0),
        ]);
        self.rev.initialise(&[
            bp(0.0, 0.0),
            bp(delay - 0.1, 0.0),
            bp(delay, 1.0),
            bp(delay + 0.125, flare),
            bp(delay + 0.25, 0.0),
            bp(delay + 5.0, 0.0),
        ]);
        self.throttle_lpf.set(0.05);
        self.state = EngineState::Starting;

        #[cfg(feature = "tracing")]
        tracing::debug!("engine start: spike at {delay:.2}s, flare x{flare:.1}");
    }

    /// Key-off: ramp the starter envelope down over two seconds.
    fn stop(&mut self) {
        self.starter.release(2.0);
        self.state = EngineState::Stopping;

        #[cfg(feature = "tracing")]
        tracing::debug!("engine stop");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The smoothed audible rate signal (1.0 ≈ idle at 900 rpm).
    pub fn rate(&self) -> f32 {
        self.rate.get()
    }

    /// The gear selected at the last `set` call.
    pub fn gear(&self) -> f32 {
        self.gear
    }
}

#[inline]
fn sqr(x: f32) -> f32 {
    x * x
}

impl Generator for CarEngine {
    fn process(&mut self) -> f32 {
        // Starter envelope doubles as the master power signal; it settles
        // on 1.0 while running.
        self.power = self.starter.process();

        if self.state == EngineState::Stopping && self.starter.finished() {
            self.state = EngineState::Off;
        }
        if self.power == 0.0 {
            return 0.0;
        }

        // Boost audible rpm while pulling away and through the rev flare
        let rev = self.rev.process();
        let new_rate = (self.rpm + rev + self.throttle.min(0.707)) * self.power;

        if self.state == EngineState::Starting && self.rev.finished() {
            self.throttle_lpf.set(0.5);
            self.state = EngineState::Running;
        }

        // Rev up slower than rev down; during the flare always use the
        // slow coefficient so the flare decays on the envelope's clock,
        // not the smoother's.
        self.rate.set_target(new_rate);
        let rate = if !self.rev.finished() || new_rate > self.rate.get() {
            self.rate.advance_rising()
        } else {
            self.rate.advance()
        };

        // Overrev ("flooring it") through the slow throttle filter
        let mut gas = self
            .throttle_lpf
            .process(((self.throttle - 0.5) * 2.0).max(0.0));
        gas *= 1.0 - sqr(rate * 0.125).abs().min(0.75);
        self.gas = gas;
        let gas_2 = gas * gas;

        // Engine noise: broadband shelf plus four resonant bands
        let n = self.noise.process();
        let engine_noise = n * self.shelf + self.eq.process_sum(n, &self.eq_gain);

        // Engine tone: jittered partials tracking the rate
        let mut engine_tone = 0.0;
        for (p, osc) in self.osc.iter_mut().enumerate() {
            osc.set(ENGINE_PARTIALS[p].freq * rate * self.rng.range(0.8, 1.2));
            engine_tone += osc.process() * self.osc_gain[p];
        }

        // Exhaust rasp: harder drive under overrev
        engine_tone = softclip_drive(engine_tone, 1.5, 1.0 + gas * gas * 0.25);

        // Amplify exhaust for overrevs
        let mut engine_throttle = (1.0 - gas) + gas * engine_tone;
        engine_throttle *= 0.5
            + self.throttle * 0.5
            + gas_2 * 0.1 * (sqr(7.5 - rate) / 50.0 + 0.125).min(1.0);

        // Modulate the noise bed with the engine tone
        let mut am = engine_tone * engine_tone * engine_tone * engine_throttle * engine_noise;

        // Slight comb resonance, detuned per sample; read before write
        let fb = self
            .comb
            .read(self.rng.range(0.001, 0.002) * self.clock.sample_rate());
        am += self.gas * fb * 0.99 * (2.0 - rate).max(0.0);
        self.comb.write(am);

        // Rev-keyed resonant low-pass over the modulated bed
        self.lpf.set(
            5000.0 * (1.0 + sqr(rate / 14.0)),
            (5.0 + gas_2 * 5.0).max(1.0),
        );

        // Attenuate the tone for higher revs
        let tone = (1.0 - sqr(rate * 0.25 - 0.75).abs()).max(0.5) * (1.0 - (rate - 1.0) * 0.01);

        let out = engine_tone * tone
            + engine_noise * (rate * 0.02)
            + self.lpf.process(am) * 0.075 * (1.0 + gas * gas);
        out * self.power
    }

    fn reset(&mut self) {
        self.starter.initialise(&[bp(0.0, 0.0)]);
        self.rev.initialise(&[]);
        self.state = EngineState::Off;
        self.ignition = false;
        for osc in &mut self.osc {
            osc.reset();
        }
        self.noise.reset();
        self.rng.reset();
        self.eq.reset();
        self.comb.clear();
        self.lpf.reset();
        self.throttle_lpf.reset();
        self.rate.set_immediate(0.0);
        self.gas = 0.0;
        self.power = 0.0;
    }
}
