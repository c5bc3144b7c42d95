//! Offline renderer — mixes scheduled events into sample buffers without an
//! audio device. Backs WAV export and the hardware-free integration tests.

use crate::synth::{Bus, ScheduledEvent, Voice};

/// Render `events` into `seconds` of interleaved samples.
///
/// Mixing matches the live callback: music-bus voices are scaled by
/// `music_gain` (held constant — no transport ramps offline), effects pass
/// through, and the result is clamped to the output ceiling.
pub fn render_offline(
    events: &[ScheduledEvent],
    sample_rate: u32,
    channels: u16,
    music_gain: f32,
    seconds: f64,
) -> Vec<f32> {
    let channels = channels.max(1) as usize;
    let frames = (seconds * sample_rate as f64).ceil() as u64;
    let mut voices: Vec<Voice> = events
        .iter()
        .map(|&e| Voice::new(e, sample_rate))
        .collect();

    let mut output = Vec::with_capacity(frames as usize * channels);
    for frame in 0..frames {
        let mut music = 0.0f32;
        let mut fx = 0.0f32;
        for voice in &mut voices {
            let s = voice.sample(frame, sample_rate);
            match voice.bus() {
                Bus::Music => music += s,
                Bus::Fx => fx += s,
            }
        }
        let mixed = (music * music_gain + fx).clamp(-0.95, 0.95);
        for _ in 0..channels {
            output.push(mixed);
        }
    }
    output
}
