//! Walk cycle timing for footstep sounds.
//!
//! The walk cycle is a looping phase in `[0, 1)`. Each key time it passes is one
//! footstep. The phase restarts whenever the character stops walking.

/// Position inside the looping walk cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WalkCycle {
    phase: f32,
}

impl WalkCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance by `cycles` (fraction of a full loop) and return how many key times
    /// were crossed. A key is crossed when the phase moves from before it to on or after it.
    pub fn advance(&mut self, cycles: f32, key_times: &[f32]) -> u32 {
        if cycles.is_nan() || cycles <= 0.0 {
            return 0;
        }
        let from = self.phase;
        let to = from + cycles;

        let steps = key_times
            .iter()
            .map(|key| ((to - key).floor() - (from - key).floor()) as u32)
            .sum();

        self.phase = to.fract();
        steps
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
