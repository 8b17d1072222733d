//! Harrier jet: turbine whine, afterburner roar, wind and ground echo.
//!
//! Three layers keyed to a normalised speed control and an altitude in
//! feet: an additive turbine whine with a piecewise speed→gain envelope,
//! an overdriven noise "burn" through cascaded resonant filters, and
//! band-passed wind that only appears at speed. A long feedback echo
//! stands in for ground reflection, closing down as speed rises.

use rugido_core::{
    Additive, Bandpass, DelayLine, Generator, Modifier, Noise, OnePoleHp, OnePoleLp, Partial,
    SampleClock, Vcf, hard_clip,
};

/// √2, the Butterworth resonance used by the wide filters here.
const ROOT2: f32 = core::f32::consts::SQRT_2;

/// Turbine whine partials: absolute frequency in Hz at full speed, linear
/// gain.
const TURBINE_PARTIALS: [Partial; 5] = [
    Partial { ratio: 3097.0, gain: 0.25 },
    Partial { ratio: 4495.0, gain: 0.25 },
    Partial { ratio: 5588.0, gain: 1.0 },
    Partial { ratio: 7471.0, gain: 0.4 },
    Partial { ratio: 11000.0, gain: 0.4 },
];

/// Additive turbine whine with a piecewise gain curve over speed.
pub struct Turbine {
    additive: Additive<5>,
    gain: f32,
}

impl Turbine {
    /// Create a turbine at speed zero.
    pub fn new(clock: SampleClock) -> Self {
        Self {
            additive: Additive::new(clock, TURBINE_PARTIALS),
            gain: 0.0,
        }
    }

    /// Set the normalised speed (0–1), retuning every partial.
    pub fn set(&mut self, speed: f32) {
        self.additive.set(speed);
        // Spool-up, plateau, mid dip, high-end rolloff
        self.gain = if speed < 0.125 {
            speed * 8.0
        } else if speed < 0.25 {
            1.0
        } else if speed < 0.75 {
            (0.5 - speed).abs() * 2.0 + 0.5
        } else {
            1.0 - (speed - 0.5)
        };
    }
}

impl Generator for Turbine {
    fn process(&mut self) -> f32 {
        hard_clip(self.additive.process(), 0.9) * self.gain
    }

    fn reset(&mut self) {
        self.additive.reset();
    }
}

/// Afterburner: overdriven noise through cascaded resonant filters.
pub struct Burn {
    noise: Noise,
    overdrive: f32,
    vcf_low: Vcf,
    vcf_bright: Vcf,
    bpf: Bandpass,
    hpf: OnePoleHp,
}

impl Burn {
    /// Create a burn layer at speed zero.
    pub fn new(clock: SampleClock) -> Self {
        let mut bpf = Bandpass::new(clock);
        bpf.set(8000.0, 0.5);
        let mut hpf = OnePoleHp::new(clock);
        hpf.set(120.0);
        Self {
            noise: Noise::new(),
            overdrive: 30.0,
            vcf_low: Vcf::new(clock),
            vcf_bright: Vcf::new(clock),
            bpf,
            hpf,
        }
    }

    /// Key the burn to speed (0–1) and altitude (feet).
    pub fn set(&mut self, speed: f32, altitude: f32) {
        self.vcf_low.set(speed * speed * 150.0, 1.0);
        self.vcf_bright.set(speed * 12000.0, 0.6);

        let mut overdrive = if speed < 0.5 {
            30.0
        } else {
            30.0 + (speed - 0.5) * 30.0
        };
        // ground resistance
        overdrive *= 1.0 + (speed * (5.0 - altitude) * 0.2).clamp(-0.5, 0.25);
        overdrive *= altitude.min(2.0) * 0.5;
        self.overdrive = overdrive;
    }
}

impl Generator for Burn {
    fn process(&mut self) -> f32 {
        let rumble = self
            .hpf
            .process(self.vcf_low.process(self.bpf.process(self.noise.process())));
        self.vcf_bright.process(hard_clip(rumble * self.overdrive, 1.0) * 0.1)
    }

    fn reset(&mut self) {
        self.noise.reset();
        self.vcf_low.reset();
        self.vcf_bright.reset();
        self.bpf.reset();
        self.hpf.reset();
    }
}

/// Complete Harrier patch: turbine + burn + wind + ground echo.
pub struct HarrierJet {
    clock: SampleClock,
    speed: f32,
    altitude: f32,

    turbine: Turbine,
    burn: Burn,
    lop: OnePoleLp,

    wind: Noise,
    wind_bpf: Bandpass,
    wind_lpf: Vcf,

    echo: DelayLine,
    echo_delay: f32,
    echo_lpf: Vcf,
}

impl HarrierJet {
    /// Create a grounded, stationary jet.
    pub fn new(clock: SampleClock) -> Self {
        let mut lop = OnePoleLp::new(clock);
        lop.set(11_000.0);
        let mut wind_bpf = Bandpass::new(clock);
        wind_bpf.set(220.0, 3.0);
        let mut wind_lpf = Vcf::new(clock);
        wind_lpf.set(1000.0, ROOT2);
        let mut echo_lpf = Vcf::new(clock);
        echo_lpf.set(11_000.0, 0.707);

        Self {
            clock,
            speed: 0.0,
            altitude: 0.0,
            turbine: Turbine::new(clock),
            burn: Burn::new(clock),
            lop,
            wind: Noise::with_seed(0x77696e64), // "wind"
            wind_bpf,
            wind_lpf,
            echo: DelayLine::from_time(clock.sample_rate(), 4.0),
            echo_delay: 10.0,
            echo_lpf,
        }
    }

    /// Update speed (0–1) and altitude (feet) at control rate.
    pub fn set(&mut self, speed: f32, altitude: f32) {
        let speed = speed.clamp(0.0, 1.0);
        self.speed = speed;
        self.altitude = altitude.max(0.0);

        self.turbine.set(speed);
        self.burn.set(speed, self.altitude);
        self.lop.set(11_000.0 * (1.0 - speed * 0.5));

        self.wind_bpf.set(
            (500.0 - (self.altitude / 10.0).max(500.0) + speed * 200.0).min(10_000.0),
            ROOT2,
        );
        self.wind_lpf.set(1000.0 - speed * 500.0, ROOT2);

        self.echo_delay = (speed * self.clock.sample_rate()).max(10.0);
        self.echo_lpf.set(11_000.0 - speed * 4000.0, 0.707);
    }
}

impl Generator for HarrierJet {
    fn process(&mut self) -> f32 {
        // Engine core, darkening as speed rises
        let core_mix =
            self.turbine.process() * (0.03 * (1.0 - self.speed * 0.5)) + self.burn.process();
        let mut out = self.lop.process(core_mix);

        // Wind only above 0.6 speed, scaled by altitude
        let windspeed = (self.speed - 0.6).max(0.0);
        let air = windspeed * windspeed
            * self.wind_bpf.process(self.wind.process())
            * ((0.5 * self.altitude).min(200.0) * (0.5 + self.speed * 3.0)).max(0.0);
        out += self.wind_lpf.process(air);

        // Ground echo: read before write, gain keyed to speed
        let echo = self.echo.read(self.echo_delay);
        out = self.echo_lpf.process(out + echo);
        self.echo.write(out * (self.speed * 0.75).max(0.0));

        out
    }

    fn reset(&mut self) {
        self.turbine.reset();
        self.burn.reset();
        self.lop.reset();
        self.wind.reset();
        self.wind_bpf.reset();
        self.wind_lpf.reset();
        self.echo.clear();
        self.echo_lpf.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> SampleClock {
        SampleClock::new(48000.0)
    }

    #[test]
    fn turbine_gain_curve_shape() {
        let mut t = Turbine::new(clock());
        t.set(0.0625);
        let spool = t.gain;
        t.set(0.2);
        let plateau = t.gain;
        t.set(0.5);
        let dip = t.gain;
        t.set(1.0);
        let high = t.gain;
        assert!((spool - 0.5).abs() < 1e-6);
        assert!((plateau - 1.0).abs() < 1e-6);
        assert!((dip - 0.5).abs() < 1e-6);
        assert!((high - 0.5).abs() < 1e-6);
    }

    #[test]
    fn grounded_idle_is_quiet_airborne_burn_is_not() {
        // At altitude 0 the burn overdrive multiplies to zero
        let mut grounded = Burn::new(clock());
        grounded.set(0.5, 0.0);
        let mut energy = 0.0f32;
        for _ in 0..24_000 {
            energy += grounded.process().abs();
        }
        assert!(energy < 1e-3, "grounded burn should be silent, got {energy}");

        let mut airborne = Burn::new(clock());
        airborne.set(0.5, 100.0);
        let mut air_energy = 0.0f32;
        for _ in 0..24_000 {
            air_energy += airborne.process().abs();
        }
        assert!(air_energy > energy, "airborne burn should roar");
    }

    #[test]
    fn full_patch_bounded_across_flight_envelope() {
        let mut jet = HarrierJet::new(clock());
        let profile = [
            (0.0, 0.0),
            (0.1, 0.0),
            (0.3, 50.0),
            (0.7, 500.0),
            (1.0, 10_000.0),
            (0.5, 200.0),
        ];
        for &(speed, altitude) in &profile {
            jet.set(speed, altitude);
            for n in 0..24_000 {
                let s = jet.process();
                assert!(
                    s.is_finite() && s.abs() < 100.0,
                    "unbounded at ({speed}, {altitude}) sample {n}: {s}"
                );
            }
        }
    }

    #[test]
    fn deterministic_given_same_controls() {
        let mut a = HarrierJet::new(clock());
        let mut b = HarrierJet::new(clock());
        a.set(0.6, 120.0);
        b.set(0.6, 120.0);
        for n in 0..48_000 {
            assert_eq!(a.process().to_bits(), b.process().to_bits(), "diverged at {n}");
        }
    }
}
