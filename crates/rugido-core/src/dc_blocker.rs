//! DC blocker: a one-pole high-pass at a fixed sub-audio cutoff.
//!
//! Nonlinear stages (waveshapers, amplitude modulation) leave DC bias on
//! the signal; this removes it while leaving everything audible alone.

use crate::SampleClock;
use crate::one_pole::OnePoleHp;
use crate::unit::Modifier;

/// Fixed high-pass at 8 Hz for removing sub-audio bias.
#[derive(Debug, Clone)]
pub struct DcBlocker {
    hp: OnePoleHp,
}

impl DcBlocker {
    /// Cutoff of the underlying one-pole high-pass, in Hz.
    const CUTOFF_HZ: f32 = 8.0;

    /// Create a DC blocker for the given clock.
    pub fn new(clock: SampleClock) -> Self {
        let mut hp = OnePoleHp::new(clock);
        hp.set(Self::CUTOFF_HZ);
        Self { hp }
    }
}

impl Modifier for DcBlocker {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.hp.process(input)
    }

    fn reset(&mut self) {
        self.hp.reset();
    }
}
