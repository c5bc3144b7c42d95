//! Tone synthesizer — one enveloped pitched event, fire-and-forget.

use super::envelope::Envelope;
use super::event::{Bus, ScheduledEvent, Sweep};
use super::oscillator::Waveform;
use super::sink::AudioSink;

/// Schedule one tone starting at `now + delay`, lasting `duration` seconds:
/// immediate rise to `volume`, exponential decay to the ramp floor.
///
/// Sound is a non-critical enhancement — scheduling failures are discarded
/// here so no caller ever has to handle them.
pub fn play_tone(
    sink: &dyn AudioSink,
    frequency: f64,
    waveform: Waveform,
    duration: f64,
    volume: f32,
    delay: f64,
) {
    let start = sink.now() + delay;
    let _ = sink.schedule(ScheduledEvent::tone(
        start,
        start + duration,
        waveform,
        Sweep::flat(frequency),
        Envelope::Pluck { level: volume },
        Bus::Fx,
    ));
}
