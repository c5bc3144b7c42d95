//! Phrase composer — one 4-bar block of dark ambient material.
//!
//! A phrase is purely a function of its start time and the constants below:
//! composing the same instant twice schedules an identical batch of events.
//! Nothing here reads scheduler state.
//!
//! Every track sits on the music bus, and every level stays well under the
//! music master ceiling so foreground cues always win.

use crate::synth::{
    AudioSink, Bus, Envelope, FilterKind, ScheduledEvent, Sweep, Waveform,
};

/// Tempo of the ambient bed.
pub const BPM: f64 = 72.0;
/// One beat in seconds.
pub const BEAT_SECS: f64 = 60.0 / BPM;
/// One 4/4 bar in seconds.
pub const BAR_SECS: f64 = BEAT_SECS * 4.0;
/// Bars per phrase.
pub const PHRASE_BARS: usize = 4;
/// One phrase in seconds (~13.33 s at 72 BPM).
pub const PHRASE_SECS: f64 = BAR_SECS * PHRASE_BARS as f64;

/// Target level of the music-bus master gain. Cues peak around 0.10, so the
/// whole bed stays underneath them.
pub const MUSIC_MASTER_LEVEL: f32 = 0.055;

/// D2 — the root of the D-minor pentatonic anchor.
const ROOT_HZ: f64 = 73.42;
/// Pentatonic degree ratios above the root: D F G A C.
const SCALE: [f64; 5] = [1.0, 1.335, 1.498, 1.682, 2.0];

/// Bass groove — one scale degree per beat across the phrase.
const BASS_STEPS: [usize; 16] = [0, 0, 2, 0, 1, 0, 3, 2, 0, 0, 2, 1, 0, 2, 0, 3];

/// Pad progression — one chord per bar (Dm, C, Em, Bb) as ratios above the
/// root, an octave up.
const PAD_CHORDS: [[f64; 3]; 4] = [
    [2.0, 2.0 * 1.189, 2.0 * 1.498],
    [2.0 * 0.891, 2.0, 2.0 * 1.335],
    [2.0 * 1.122, 2.0 * 1.335, 2.0 * 1.682],
    [2.0 * 0.749, 2.0, 2.0 * 1.189],
];
/// Second pad layer is detuned slightly sharp for width.
const PAD_DETUNE: f64 = 1.002;

/// Arpeggio scale degrees, two octaves up; every third slot stays empty.
const ARP_STEPS: [usize; 8] = [2, 4, 3, 0, 4, 1, 3, 2];

/// Compose one phrase starting at `start` seconds on the sink's clock.
///
/// Emits bass, pad, arpeggio, hi-hat, and kick as a single batch of
/// fire-and-forget events. Scheduling failures are dropped — a thinner
/// phrase, never an error.
pub fn compose_phrase(sink: &dyn AudioSink, start: f64) {
    bass(sink, start);
    pads(sink, start);
    arpeggio(sink, start);
    hihats(sink, start);
    kicks(sink, start);
}

/// Number of events one phrase schedules. Fixed by the constants above.
pub fn events_per_phrase() -> usize {
    let arp_notes = ARP_STEPS.len() - ARP_STEPS.len().div_ceil(3);
    BASS_STEPS.len() * 2 + PHRASE_BARS * 3 * 2 + arp_notes + 8 + PHRASE_BARS
}

/// A held tone with the phrase's standard soft attack and release.
fn held(sink: &dyn AudioSink, start: f64, stop: f64, waveform: Waveform, freq: f64, level: f32) {
    let _ = sink.schedule(ScheduledEvent::tone(
        start,
        stop,
        waveform,
        Sweep::flat(freq),
        Envelope::Sustain {
            level,
            attack: 0.06,
            release: 0.10,
        },
        Bus::Music,
    ));
}

/// Bass — 16 steps, one octave below the root, with a quiet sine an octave
/// above for definition.
fn bass(sink: &dyn AudioSink, start: f64) {
    for (i, &degree) in BASS_STEPS.iter().enumerate() {
        let f = ROOT_HZ * SCALE[degree] * 0.5;
        let t = start + i as f64 * BEAT_SECS;
        held(sink, t, t + BEAT_SECS * 0.65, Waveform::Triangle, f, 0.018);
        held(sink, t, t + BEAT_SECS * 0.40, Waveform::Sine, f * 2.0, 0.006);
    }
}

/// Pad — one sustained chord per bar, each note doubled by a detuned
/// triangle.
fn pads(sink: &dyn AudioSink, start: f64) {
    for (bar, chord) in PAD_CHORDS.iter().enumerate() {
        let t = start + bar as f64 * BAR_SECS;
        for &ratio in chord {
            let f = ROOT_HZ * ratio;
            held(sink, t, t + BAR_SECS, Waveform::Sine, f, 0.008);
            held(sink, t, t + BAR_SECS, Waveform::Triangle, f * PAD_DETUNE, 0.004);
        }
    }
}

/// Arpeggio — sparse notes every three quarters of a beat, skipping every
/// third slot for space.
fn arpeggio(sink: &dyn AudioSink, start: f64) {
    for (i, &degree) in ARP_STEPS.iter().enumerate() {
        if i % 3 == 1 {
            continue;
        }
        let f = ROOT_HZ * SCALE[degree] * 4.0;
        let t = start + i as f64 * BEAT_SECS * 0.75;
        held(sink, t, t + BEAT_SECS * 0.3, Waveform::Sine, f, 0.008);
    }
}

/// Hi-hat — bright noise ticks on off-beat eighths only.
fn hihats(sink: &dyn AudioSink, start: f64) {
    for i in (1..16).step_by(2) {
        let t = start + i as f64 * BEAT_SECS / 2.0;
        let _ = sink.schedule(ScheduledEvent::noise(
            t,
            t + 0.05,
            FilterKind::Highpass,
            Sweep::flat(4000.0),
            Envelope::Pluck { level: 0.003 },
            Bus::Music,
        ));
    }
}

/// Kick — one gentle sub sweep per bar, 80 Hz falling exponentially to 28 Hz.
fn kicks(sink: &dyn AudioSink, start: f64) {
    for bar in 0..PHRASE_BARS {
        let t = start + bar as f64 * BAR_SECS;
        let _ = sink.schedule(ScheduledEvent::tone(
            t,
            t + 0.20,
            Waveform::Sine,
            Sweep::exponential(80.0, 28.0, 0.16),
            Envelope::Pluck { level: 0.011 },
            Bus::Music,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::MemorySink;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn phrase_length_at_72_bpm() {
        assert_approx_eq!(PHRASE_SECS, 16.0 * 60.0 / 72.0, 1e-9);
        assert!((PHRASE_SECS - 13.333).abs() < 0.001);
    }

    #[test]
    fn event_count_matches_constant() {
        let sink = MemorySink::new();
        compose_phrase(&sink, 0.0);
        assert_eq!(sink.events().len(), events_per_phrase());
    }

    #[test]
    fn composition_is_deterministic() {
        let a = MemorySink::new();
        let b = MemorySink::new();
        compose_phrase(&a, 26.666);
        compose_phrase(&b, 26.666);
        assert_eq!(a.events(), b.events());
    }

    #[test]
    fn relative_timing_is_start_invariant() {
        let a = MemorySink::new();
        let b = MemorySink::new();
        compose_phrase(&a, 0.0);
        compose_phrase(&b, 100.0);

        let ea = a.events();
        let eb = b.events();
        assert_eq!(ea.len(), eb.len());
        for (x, y) in ea.iter().zip(eb.iter()) {
            assert_approx_eq!(y.start - x.start, 100.0, 1e-9);
            assert_approx_eq!(y.duration(), x.duration(), 1e-9);
        }
    }

    #[test]
    fn all_events_on_music_bus() {
        let sink = MemorySink::new();
        compose_phrase(&sink, 0.0);
        assert!(sink
            .events()
            .iter()
            .all(|e| e.bus == crate::synth::Bus::Music));
    }

    #[test]
    fn levels_stay_under_master_ceiling() {
        let sink = MemorySink::new();
        compose_phrase(&sink, 0.0);
        for e in sink.events() {
            assert!(e.envelope.level() <= MUSIC_MASTER_LEVEL);
        }
    }

    #[test]
    fn events_fit_inside_phrase_window() {
        let sink = MemorySink::new();
        let start = 13.333;
        compose_phrase(&sink, start);
        for e in sink.events() {
            assert!(e.start >= start - 1e-9);
            // Pads end exactly at the phrase boundary; nothing spills past it.
            assert!(e.stop <= start + PHRASE_SECS + 1e-9);
        }
    }

    #[test]
    fn hihats_only_on_off_beats() {
        let sink = MemorySink::new();
        compose_phrase(&sink, 0.0);
        for e in sink.events() {
            if matches!(e.source, crate::synth::Source::Noise { .. }) {
                let eighths = e.start / (BEAT_SECS / 2.0);
                let idx = eighths.round() as i64;
                assert_approx_eq!(eighths, idx as f64, 1e-6);
                assert_eq!(idx % 2, 1, "hi-hat on a downbeat at {}", e.start);
            }
        }
    }

    #[test]
    fn one_kick_per_bar() {
        let sink = MemorySink::new();
        compose_phrase(&sink, 0.0);
        let kicks: Vec<_> = sink
            .events()
            .into_iter()
            .filter(|e| match e.source {
                crate::synth::Source::Tone { freq, .. } => freq.from == 80.0,
                _ => false,
            })
            .collect();
        assert_eq!(kicks.len(), PHRASE_BARS);
        for (bar, k) in kicks.iter().enumerate() {
            assert_approx_eq!(k.start, bar as f64 * BAR_SECS, 1e-9);
        }
    }
}
