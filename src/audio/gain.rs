//! Master gain ramp — the aggregate volume envelope for the music bus.
//!
//! One linear ramp at a time: a new target cancels whatever ramp was in
//! flight, starting from the current value. This is what lets stop() fade the
//! whole bed out without touching individual voices.

/// Linearly ramped gain value, advanced once per frame on the audio thread.
#[derive(Debug, Clone)]
pub struct GainRamp {
    current: f32,
    target: f32,
    step_per_frame: f32,
}

impl GainRamp {
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step_per_frame: 0.0,
        }
    }

    /// Begin ramping from the current value toward `target` over `seconds`.
    pub fn ramp_to(&mut self, target: f32, seconds: f64, sample_rate: u32) {
        let target = target.clamp(0.0, 1.0);
        let frames = (seconds * sample_rate as f64).max(1.0);
        self.step_per_frame = ((target - self.current) as f64 / frames) as f32;
        self.target = target;
    }

    /// Gain for the current frame; advances one frame toward the target.
    pub fn next(&mut self) -> f32 {
        let out = self.current;
        if self.current != self.target {
            let stepped = self.current + self.step_per_frame;
            let overshot = (self.step_per_frame >= 0.0 && stepped >= self.target)
                || (self.step_per_frame < 0.0 && stepped <= self.target);
            self.current = if overshot { self.target } else { stepped };
        }
        out
    }

    /// Current gain without advancing.
    pub fn value(&self) -> f32 {
        self.current
    }
}
