//! Bicycle: pedal thumps, chain rattle and wheel hum.
//!
//! Three mechanical layers: a squared-sine pedal thump that supplies the
//! energy signal, a chain drive whose band-passed noise layers are
//! amplitude-modulated by that energy and a pressure sine, and a wheel
//! voice mixing a harmonic hum stack with a ticking pulse. The top-level
//! patch crossfades chain against wheel under a slewed "pedalling"
//! control.

use rugido_core::{
    Additive, Bandpass, Generator, Modifier, Noise, Partial, Pulse, SampleClock, Sine,
    SmoothedParam, db_to_linear, hard_clip,
};

/// Wheel hum fundamental in Hz (the first measured partial).
const WHEEL_FUNDAMENTAL: f32 = 8.8;

/// Wheel partial gains in dB, measured per harmonic of the fundamental;
/// shifted −38 dB at load time.
const WHEEL_GAINS_DB: [f32; 8] = [27.8, 33.7, 30.3, 28.8, 26.1, 22.0, 32.1, 24.6];

/// Pedal thump generator: two soft pulses per crank cycle.
pub struct Pedal {
    osc: Sine,
}

impl Pedal {
    /// Create a pedal at rest.
    pub fn new(clock: SampleClock) -> Self {
        Self {
            osc: Sine::new(clock),
        }
    }

    /// Set the crank speed in Hz.
    pub fn set(&mut self, speed: f32) {
        self.osc.set(speed);
    }
}

impl Generator for Pedal {
    fn process(&mut self) -> f32 {
        // Squaring doubles the rate and keeps the thump one-sided
        let s = self.osc.process();
        s * s
    }

    fn reset(&mut self) {
        self.osc.reset();
    }
}

/// Chain drive: pedal energy modulating three fixed noise resonances.
///
/// A [`Modifier`] — it consumes the pedal energy signal.
pub struct ChainDrive {
    pressure: Sine,
    noise: Noise,
    rattle_low: Bandpass,
    rattle_mid: Bandpass,
    rattle_high: Bandpass,
    rate: f32,
}

impl ChainDrive {
    /// Create a chain with its rattle bands at fixed tunings.
    pub fn new(clock: SampleClock) -> Self {
        let mut rattle_low = Bandpass::new(clock);
        rattle_low.set(2550.0, 5.0);
        let mut rattle_mid = Bandpass::new(clock);
        rattle_mid.set(4250.0, 15.0);
        let mut rattle_high = Bandpass::new(clock);
        rattle_high.set(6500.0, 25.0);
        Self {
            pressure: Sine::new(clock),
            noise: Noise::new(),
            rattle_low,
            rattle_mid,
            rattle_high,
            rate: 0.0,
        }
    }

    /// Set the crank speed in Hz; link rate is 22 links per crank turn.
    pub fn set(&mut self, speed: f32) {
        self.rate = speed * 22.0;
        self.pressure.set(self.rate);
    }
}

impl Modifier for ChainDrive {
    fn process(&mut self, energy: f32) -> f32 {
        // Three independent noise draws, one per rattle band; the low band
        // opens with pedal energy
        let n = self.rattle_low.process(self.noise.process()) * (0.1 + energy * energy * 0.05)
            + self.rattle_mid.process(self.noise.process()) * 0.5
            + self.rattle_high.process(self.noise.process());

        // Pressure wobbles with the pedal position
        self.pressure.set(self.rate * (0.9 + energy * 0.2));
        let pressure = self.pressure.process();

        let mut out = (0.5 + energy * 0.25) * (n * n) * pressure;
        out = hard_clip(out, 1.0) * 5.0;

        // Fade the rattle out as the chain slows
        if self.rate < 10.0 {
            out *= self.rate * 0.1;
        }
        out
    }

    fn reset(&mut self) {
        self.pressure.reset();
        self.noise.reset();
        self.rattle_low.reset();
        self.rattle_mid.reset();
        self.rattle_high.reset();
    }
}

/// Wheel voice: harmonic hum stack plus a ticking pulse.
pub struct Wheel {
    hum: Additive<8>,
    noise: Noise,
    noise_bpf: Bandpass,
    tick: Pulse,
    tick_bpf: Bandpass,
    rate: f32,
    tick_gain: f32,
}

impl Wheel {
    /// Create a wheel at rest.
    pub fn new(clock: SampleClock) -> Self {
        // Harmonic stack on the measured fundamental with per-harmonic
        // measured gains
        let partials: [Partial; 8] = core::array::from_fn(|p| Partial {
            ratio: WHEEL_FUNDAMENTAL * (p + 1) as f32,
            gain: db_to_linear(WHEEL_GAINS_DB[p] - 38.0),
        });

        let mut noise_bpf = Bandpass::new(clock);
        noise_bpf.set(5887.0, 1.2);
        let mut tick_bpf = Bandpass::new(clock);
        tick_bpf.set(12.0, 1.0);
        let mut tick = Pulse::new(clock);
        tick.set_duty(0.1);

        Self {
            hum: Additive::new(clock, partials),
            noise: Noise::new(),
            noise_bpf,
            tick,
            tick_bpf,
            rate: 0.0,
            tick_gain: 0.0,
        }
    }

    /// Set the wheel surface speed; rate 1.0 is one hum fundamental.
    pub fn set(&mut self, speed: f32) {
        self.rate = speed / WHEEL_FUNDAMENTAL;
        self.tick_gain = self.rate * self.rate * self.rate;
        self.hum.set(self.rate);
        self.tick.set(WHEEL_FUNDAMENTAL * self.rate);
    }
}

impl Generator for Wheel {
    fn process(&mut self) -> f32 {
        // Half flat noise, half tire hiss
        let n = self.noise.process();
        let n = n * 0.5 + self.noise_bpf.process(n) * 0.5;

        let tone = self.hum.process();
        let ticking = self.tick_bpf.process(self.tick.process());

        let tone4 = (tone * tone) * (tone * tone);
        let tick3 = ticking * ticking * ticking;
        tone4 * (self.rate * 0.005).min(0.01) * n + tick3 * n * self.tick_gain
    }

    fn reset(&mut self) {
        self.hum.reset();
        self.noise.reset();
        self.noise_bpf.reset();
        self.tick.reset();
        self.tick_bpf.reset();
    }
}

/// Complete bicycle patch.
pub struct Bicycle {
    pedal: Pedal,
    chain: ChainDrive,
    wheel: Wheel,
    out_bpf: Bandpass,
    pedalling: SmoothedParam,
}

impl Bicycle {
    /// Create a stationary bicycle.
    pub fn new(clock: SampleClock) -> Self {
        let mut out_bpf = Bandpass::new(clock);
        out_bpf.set(11_000.0, 1.0);
        Self {
            pedal: Pedal::new(clock),
            chain: ChainDrive::new(clock),
            wheel: Wheel::new(clock),
            out_bpf,
            pedalling: SmoothedParam::with_coeff(0.0, 0.001),
        }
    }

    /// Update the ride at control rate.
    ///
    /// `pedalling` crossfades chain (1.0) against coasting wheel (0.0);
    /// `wheel_speed` is the surface speed, `pedal_speed` the crank rate
    /// in Hz (halved internally, two thumps per revolution).
    pub fn set(&mut self, pedalling: f32, wheel_speed: f32, pedal_speed: f32) {
        self.pedalling.set_target(pedalling.clamp(0.0, 1.0));
        let crank = pedal_speed / 2.0;
        self.pedal.set(crank);
        self.chain.set(crank);
        self.wheel.set(wheel_speed);
    }
}

impl Generator for Bicycle {
    fn process(&mut self) -> f32 {
        let pedalling = self.pedalling.advance();
        let energy = self.pedal.process();
        let wheel_noise = self.wheel.process();
        let chain_noise = 0.7 * self.chain.process(energy) + 0.25 * wheel_noise;

        let mix = pedalling * chain_noise + 0.25 * (1.0 - 0.75 * pedalling) * wheel_noise;
        self.out_bpf.process(mix) * 0.6
    }

    fn reset(&mut self) {
        self.pedal.reset();
        self.chain.reset();
        self.wheel.reset();
        self.out_bpf.reset();
        self.pedalling.set_immediate(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> SampleClock {
        SampleClock::new(48000.0)
    }

    #[test]
    fn pedal_thump_is_one_sided() {
        let mut pedal = Pedal::new(clock());
        pedal.set(1.0);
        for _ in 0..96_000 {
            let s = pedal.process();
            assert!((0.0..=1.0).contains(&s), "thump out of range: {s}");
        }
    }

    #[test]
    fn chain_fades_out_at_low_rate() {
        let mut chain = ChainDrive::new(clock());
        chain.set(0.1); // rate 2.2, well under the 10-link fade threshold
        let mut quiet = 0.0f32;
        for _ in 0..48_000 {
            quiet += chain.process(0.5).abs();
        }
        let mut fast = ChainDrive::new(clock());
        fast.set(2.0); // rate 44
        let mut loud = 0.0f32;
        for _ in 0..48_000 {
            loud += fast.process(0.5).abs();
        }
        assert!(loud > quiet, "chain should fade at low rate: {loud} vs {quiet}");
    }

    #[test]
    fn riding_makes_sound_and_stays_bounded() {
        let mut bike = Bicycle::new(clock());
        bike.set(0.8, 20.0, 2.0);
        let mut energy = 0.0f32;
        for n in 0..96_000 {
            let s = bike.process();
            assert!(s.is_finite() && s.abs() < 100.0, "unbounded at {n}: {s}");
            energy += s * s;
        }
        assert!(energy > 0.0, "riding bicycle is silent");
    }

    #[test]
    fn coasting_versus_pedalling_changes_the_mix() {
        // With the same wheel speed, pedalling engages the chain layer;
        // the two modes must not render identical audio.
        let mut coasting = Bicycle::new(clock());
        coasting.set(0.0, 20.0, 1.0);
        let mut pedalling = Bicycle::new(clock());
        pedalling.set(1.0, 20.0, 1.0);
        let mut diff = 0.0f32;
        for _ in 0..48_000 {
            diff += (coasting.process() - pedalling.process()).abs();
        }
        assert!(diff > 0.01, "mix ignored the pedalling control: {diff}");
    }
}
