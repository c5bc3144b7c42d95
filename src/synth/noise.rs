//! Percussion synthesizer — short filtered noise bursts.

use super::envelope::Envelope;
use super::event::{Bus, FilterKind, ScheduledEvent, Sweep};
use super::sink::AudioSink;

/// Schedule a white-noise burst starting at `now + delay`: noise through a
/// one-pole filter at `cutoff` Hz, fast attack, fast exponential decay.
///
/// Same silent-failure policy as [`play_tone`](super::tone::play_tone).
pub fn play_noise_burst(
    sink: &dyn AudioSink,
    filter: FilterKind,
    cutoff: f64,
    duration: f64,
    volume: f32,
    delay: f64,
) {
    let start = sink.now() + delay;
    let _ = sink.schedule(ScheduledEvent::noise(
        start,
        start + duration,
        filter,
        Sweep::flat(cutoff),
        Envelope::Pluck { level: volume },
        Bus::Fx,
    ));
}
