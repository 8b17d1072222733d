//! Toy boat engine: a 9 Hz putter through a clipped exhaust valve.
//!
//! After the model in Farnell, "Designing Sound" (2010): a slow sine (or
//! sputtering band-passed noise when the engine is "broken") is clipped
//! hard into a one-sided valve, shaped by a noise formant, and rung
//! through three fixed body resonances.

use rugido_core::{
    Bandpass, Bank, Generator, Modifier, Noise, OnePoleHp, OnePoleLp, SampleClock, Sine, clip01,
};

/// Putter rate of the healthy engine, in Hz.
const PUTTER_HZ: f32 = 9.0;

/// Toy boat engine voice.
///
/// `set_broken(true)` switches the excitation from the regular pulse to
/// sputtering noise.
pub struct ToyBoatEngine {
    osc: Sine,
    noise: Noise,

    // Sputter shaping
    sputter_bpf: Bandpass,

    // Exhaust outlet valve
    hip_valve: OnePoleHp,
    lop_valve: OnePoleLp,

    // Formant (enveloped high-passed noise)
    hip_formant: OnePoleHp,
    formant_bpf: Bandpass,

    // Body resonances
    body: Bank<3>,
    hip_out: OnePoleHp,

    broken: bool,
}

impl ToyBoatEngine {
    /// Create a boat engine with all resonances at their fixed tunings.
    pub fn new(clock: SampleClock) -> Self {
        let mut osc = Sine::new(clock);
        osc.set(PUTTER_HZ);

        let mut sputter_bpf = Bandpass::new(clock);
        sputter_bpf.set(PUTTER_HZ, 15.0);

        let mut hip_valve = OnePoleHp::new(clock);
        hip_valve.set(10.0);
        let mut lop_valve = OnePoleLp::new(clock);
        lop_valve.set(30.0);

        let mut hip_formant = OnePoleHp::new(clock);
        hip_formant.set(1000.0);
        let mut formant_bpf = Bandpass::new(clock);
        formant_bpf.set(590.0, 4.0);

        let mut body = Bank::new(clock);
        body.set(0, 470.0, 8.0);
        body.set(1, 780.0, 9.0);
        body.set(2, 1024.0, 10.0);

        let mut hip_out = OnePoleHp::new(clock);
        hip_out.set(100.0);

        Self {
            osc,
            noise: Noise::new(),
            sputter_bpf,
            hip_valve,
            lop_valve,
            hip_formant,
            formant_bpf,
            body,
            hip_out,
            broken: false,
        }
    }

    /// Toggle the "broken engine" sputter.
    pub fn set_broken(&mut self, broken: bool) {
        self.broken = broken;
    }
}

impl Generator for ToyBoatEngine {
    fn process(&mut self) -> f32 {
        let mut mix = if self.broken {
            // sputtering noise
            self.sputter_bpf.process(self.noise.process())
        } else {
            // regular pulse
            self.osc.process()
        };

        // Exhaust outlet valve: one-sided clip into a narrow band
        mix = self
            .lop_valve
            .process(self.hip_valve.process(clip01(mix * 600.0)));

        // Formant: high-passed noise through a vocal-ish band
        let formant = self
            .formant_bpf
            .process(self.hip_formant.process(self.noise.process()));
        mix *= formant;

        // Body resonances, then clear the rumble
        let body = self.body.process_sum(mix, &[1.0, 1.0, 1.0]);
        self.hip_out.process(body) * 10.0
    }

    fn reset(&mut self) {
        self.osc.reset();
        self.noise.reset();
        self.sputter_bpf.reset();
        self.hip_valve.reset();
        self.lop_valve.reset();
        self.hip_formant.reset();
        self.formant_bpf.reset();
        self.body.reset();
        self.hip_out.reset();
    }
}
