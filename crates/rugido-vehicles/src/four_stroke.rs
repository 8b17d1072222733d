//! Four-stroke car engine: cylinder firing model.
//!
//! Four staggered taps off a pair of noise-fed delay lines, each
//! waveshaped through a full-period cosine and a `1/(x²+1)` pulse former,
//! make the combustion pulses; a phasor supplies the firing order and
//! band-passed noise jitters the per-cylinder phase. The cosine here
//! needs the full period and deliberately uses `libm::cosf`, not the
//! bounded-domain [`fast_cos`](rugido_core::fast_cos).

use libm::cosf;
use rugido_core::{
    Bandpass, DcBlocker, DelayLine, Generator, Modifier, Noise, OnePoleHp, Phasor, SampleClock,
    Vcf,
};

const CYLINDERS: usize = 4;

/// Four-stroke engine voice driven by a normalised speed control.
pub struct FourStrokeEngine {
    clock: SampleClock,
    speed: f32,

    phasor: Phasor,
    delay_a: DelayLine,
    delay_b: DelayLine,

    noise: Noise,
    rng: Noise,
    noise_lpf: Vcf,
    noise_bpf: Bandpass,
    hpf: OnePoleHp,
    dc: DcBlocker,
}

impl FourStrokeEngine {
    /// Create an engine at speed zero.
    pub fn new(clock: SampleClock) -> Self {
        let mut noise_lpf = Vcf::new(clock);
        noise_lpf.set(15.0, 0.707);
        let mut noise_bpf = Bandpass::new(clock);
        noise_bpf.set(400.0, 0.5);
        let mut hpf = OnePoleHp::new(clock);
        hpf.set(100.0);

        Self {
            clock,
            speed: 0.0,
            phasor: Phasor::new(clock),
            delay_a: DelayLine::new(3840),
            delay_b: DelayLine::new(3840),
            noise: Noise::new(),
            rng: Noise::with_seed(0x34_73_74), // "4st"
            noise_lpf,
            noise_bpf,
            hpf,
            dc: DcBlocker::new(clock),
        }
    }

    /// Set the normalised engine speed (0–1; 1 ≈ 7000 rpm).
    pub fn set(&mut self, speed: f32) {
        self.speed = speed.clamp(0.0, 1.0);
        self.phasor.set(self.speed * 10.0);
        self.noise_bpf.set_cutoff(200.0 + self.speed * 400.0);
    }
}

impl Generator for FourStrokeEngine {
    fn process(&mut self) -> f32 {
        // Slow noise feeds both delay lines at different levels
        let n = self.noise_lpf.process(self.noise.process());
        self.delay_b.write(n * 30.0);
        self.delay_a.write(n * 0.5);

        // Band-passed noise detunes the per-cylinder phase
        let n2 = self.noise_bpf.process(self.noise.process());
        let n2 = 1.0 - (self.speed + 0.1) * n2 * 0.01;

        let firing = self.phasor.process() * 4.0;
        let sharpness = 22.0 - self.speed * 15.0;
        let ms = self.clock.sample_rate() / 250.0 * self.rng.range(0.99, 1.0);

        let mut out = 0.0;
        for d in 0..CYLINDERS {
            let tap = (d + 1) as f32 * 5.0 * ms;
            let phase = -(0.75 - d as f32 * 0.25) * n2;

            // Combustion pulse: cosine waveshaper into 1/(x²+1)
            let mut mix = cosf((self.delay_a.read(tap) + firing + phase) * core::f32::consts::TAU);
            mix *= self.delay_b.read(tap) + sharpness;

            out += 1.0 / (mix * mix + 1.0);
        }

        let out = out * self.speed * self.speed.min(0.25);
        self.dc.process(self.hpf.process(out))
    }

    fn reset(&mut self) {
        self.phasor.reset();
        self.delay_a.clear();
        self.delay_b.clear();
        self.noise.reset();
        self.rng.reset();
        self.noise_lpf.reset();
        self.noise_bpf.reset();
        self.hpf.reset();
        self.dc.reset();
    }
}
