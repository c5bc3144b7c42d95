//! Commands sent from scheduling threads to the audio thread via ring buffer.

use crate::synth::ScheduledEvent;

/// Commands drained by the audio callback at the start of each block.
#[derive(Debug, Clone, Copy)]
pub enum AudioCommand {
    /// Start a voice for one synthesis event.
    Schedule(ScheduledEvent),

    /// Ramp the music-bus master gain to `target` over `seconds`.
    RampMaster { target: f32, seconds: f64 },
}
