//! Voice — renders one [`ScheduledEvent`] sample by sample.
//!
//! Voices are created when the engine accepts an event and dropped once the
//! clock passes their stop frame. Noise voices seed their RNG from the event
//! start time, so composing the same instant twice sounds identical.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::event::{Bus, FilterKind, ScheduledEvent, Source};
use super::oscillator::oscillator;

/// A live synthesis voice positioned on the engine's frame timeline.
pub struct Voice {
    event: ScheduledEvent,
    start_frame: u64,
    stop_frame: u64,
    duration_secs: f64,
    phase: f64,
    rng: ChaCha8Rng,
    lowpass: f64,
    bandpass: f64,
}

impl Voice {
    pub fn new(event: ScheduledEvent, sample_rate: u32) -> Self {
        let sr = sample_rate as f64;
        let start_frame = (event.start.max(0.0) * sr).round() as u64;
        let stop_frame = (event.stop.max(0.0) * sr).round() as u64;
        let stop_frame = stop_frame.max(start_frame);
        Self {
            rng: ChaCha8Rng::seed_from_u64(event.start.to_bits()),
            duration_secs: (stop_frame - start_frame) as f64 / sr,
            event,
            start_frame,
            stop_frame,
            phase: 0.0,
            lowpass: 0.0,
            bandpass: 0.0,
        }
    }

    /// The bus this voice is mixed onto.
    pub fn bus(&self) -> Bus {
        self.event.bus
    }

    /// True once the clock has passed this voice's stop frame.
    pub fn is_finished(&self, frame: u64) -> bool {
        frame >= self.stop_frame
    }

    /// Render the sample for the given absolute frame.
    ///
    /// Returns 0.0 outside the voice's `[start, stop)` frame window. Must be
    /// called with consecutive frames while inside the window — phase and
    /// filter state advance on each call.
    pub fn sample(&mut self, frame: u64, sample_rate: u32) -> f32 {
        if frame < self.start_frame || frame >= self.stop_frame {
            return 0.0;
        }

        let sr = sample_rate as f64;
        let t = (frame - self.start_frame) as f64 / sr;
        let env = self.event.envelope.amplitude(t, self.duration_secs);

        match self.event.source {
            Source::Tone { waveform, freq } => {
                let out = oscillator(waveform, self.phase);
                self.phase = (self.phase + freq.value_at(t) / sr).fract();
                (out as f32) * env
            }
            Source::Noise { filter, cutoff } => {
                let white: f64 = self.rng.gen_range(-1.0..1.0);

                // One-pole filter; alpha recomputed per sample so cutoff
                // sweeps track smoothly.
                let fc = cutoff.value_at(t).max(1.0);
                let rc = 1.0 / (2.0 * std::f64::consts::PI * fc);
                let dt = 1.0 / sr;
                let alpha = dt / (rc + dt);

                self.lowpass += alpha * (white - self.lowpass);
                let out = match filter {
                    FilterKind::Lowpass => self.lowpass,
                    FilterKind::Highpass => white - self.lowpass,
                    FilterKind::Bandpass => {
                        let highpassed = white - self.lowpass;
                        self.bandpass += alpha * (highpassed - self.bandpass);
                        self.bandpass
                    }
                };
                (out as f32) * env
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::envelope::Envelope;
    use crate::synth::event::Sweep;
    use crate::synth::oscillator::Waveform;

    const SR: u32 = 44100;

    fn tone_voice(start: f64, stop: f64) -> Voice {
        Voice::new(
            ScheduledEvent::tone(
                start,
                stop,
                Waveform::Sine,
                Sweep::flat(440.0),
                Envelope::Pluck { level: 0.5 },
                Bus::Music,
            ),
            SR,
        )
    }

    fn render(voice: &mut Voice, from: u64, frames: u64) -> Vec<f32> {
        (from..from + frames).map(|f| voice.sample(f, SR)).collect()
    }

    #[test]
    fn silent_before_start() {
        let mut v = tone_voice(1.0, 2.0);
        assert_eq!(v.sample(0, SR), 0.0);
        assert_eq!(v.sample(44099, SR), 0.0);
    }

    #[test]
    fn silent_after_stop() {
        let mut v = tone_voice(0.0, 1.0);
        assert_eq!(v.sample(44100, SR), 0.0);
        assert!(v.is_finished(44100));
        assert!(!v.is_finished(44099));
    }

    #[test]
    fn tone_produces_signal() {
        let mut v = tone_voice(0.0, 1.0);
        let out = render(&mut v, 0, 4410);
        assert!(out.iter().any(|&s| s.abs() > 0.01));
    }

    #[test]
    fn tone_bounded_by_envelope_level() {
        let mut v = tone_voice(0.0, 1.0);
        let out = render(&mut v, 0, 44100);
        for &s in &out {
            assert!(s.abs() <= 0.5 + 1e-6, "sample out of bounds: {s}");
        }
    }

    #[test]
    fn noise_is_deterministic_per_start_time() {
        let event = ScheduledEvent::noise(
            0.25,
            0.30,
            FilterKind::Highpass,
            Sweep::flat(4000.0),
            Envelope::Pluck { level: 0.003 },
            Bus::Music,
        );
        let mut a = Voice::new(event, SR);
        let mut b = Voice::new(event, SR);
        let start = (0.25 * SR as f64) as u64;
        assert_eq!(render(&mut a, start, 2000), render(&mut b, start, 2000));
    }

    #[test]
    fn highpass_removes_dc() {
        let event = ScheduledEvent::noise(
            0.0,
            0.5,
            FilterKind::Highpass,
            Sweep::flat(4000.0),
            Envelope::Sustain {
                level: 1.0,
                attack: 0.0,
                release: 0.0,
            },
            Bus::Fx,
        );
        let mut v = Voice::new(event, SR);
        let out = render(&mut v, 0, 22050);
        let mean: f32 = out.iter().sum::<f32>() / out.len() as f32;
        assert!(mean.abs() < 0.05, "highpassed noise should center near zero");
    }

    #[test]
    fn kick_sweep_descends_in_pitch() {
        // Count zero crossings in the first and second halves of a swept
        // sine — the swept half should oscillate faster at the start.
        let event = ScheduledEvent::tone(
            0.0,
            0.2,
            Waveform::Sine,
            Sweep::exponential(80.0, 28.0, 0.16),
            Envelope::Sustain {
                level: 1.0,
                attack: 0.0,
                release: 0.0,
            },
            Bus::Music,
        );
        let mut v = Voice::new(event, SR);
        let out = render(&mut v, 0, (0.2 * SR as f64) as u64);
        let crossings = |s: &[f32]| {
            s.windows(2)
                .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
                .count()
        };
        let half = out.len() / 2;
        assert!(crossings(&out[..half]) > crossings(&out[half..]));
    }

    #[test]
    fn zero_length_event_is_silent() {
        let mut v = tone_voice(1.0, 1.0);
        assert!(v.is_finished((SR as u64) * 2));
        assert_eq!(v.sample(44100, SR), 0.0);
    }

    #[test]
    fn bus_accessor() {
        let v = tone_voice(0.0, 1.0);
        assert_eq!(v.bus(), Bus::Music);
    }
}
