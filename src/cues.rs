//! UI sound cues — short foreground effects on the fx bus.
//!
//! Every cue is fire-and-forget and bypasses the music master gain, so cues
//! keep their level while the music fades or is muted. Levels sit around
//! 0.03–0.10, well above the ambient bed.

use crate::synth::{
    play_tone, AudioSink, Bus, Envelope, FilterKind, ScheduledEvent, Sweep, Waveform,
};

/// Button press — a short square tick.
pub fn click(sink: &dyn AudioSink) {
    play_tone(sink, 880.0, Waveform::Square, 0.06, 0.05, 0.0);
}

/// Pointer-over — barely-there high sine.
pub fn hover(sink: &dyn AudioSink) {
    play_tone(sink, 1200.0, Waveform::Sine, 0.03, 0.025, 0.0);
}

/// Panel navigation — a lower click.
pub fn nav(sink: &dyn AudioSink) {
    play_tone(sink, 660.0, Waveform::Square, 0.05, 0.04, 0.0);
}

/// Notification blip — two quick high ticks.
pub fn blip(sink: &dyn AudioSink) {
    play_tone(sink, 1800.0, Waveform::Square, 0.03, 0.03, 0.0);
    play_tone(sink, 2200.0, Waveform::Sine, 0.02, 0.02, 0.03);
}

/// Success — rising C-E-G arpeggio.
pub fn success(sink: &dyn AudioSink) {
    play_tone(sink, 523.25, Waveform::Sine, 0.10, 0.09, 0.0);
    play_tone(sink, 659.25, Waveform::Sine, 0.10, 0.09, 0.11);
    play_tone(sink, 783.99, Waveform::Sine, 0.15, 0.10, 0.22);
}

/// Failure — two falling saw buzzes.
pub fn fail(sink: &dyn AudioSink) {
    play_tone(sink, 300.0, Waveform::Saw, 0.12, 0.08, 0.0);
    play_tone(sink, 200.0, Waveform::Saw, 0.15, 0.07, 0.14);
}

/// Streak milestone — a six-note major run.
pub fn streak(sink: &dyn AudioSink) {
    const NOTES: [f64; 6] = [523.25, 587.33, 659.25, 698.46, 783.99, 880.0];
    for (i, &f) in NOTES.iter().enumerate() {
        play_tone(sink, f, Waveform::Sine, 0.12, 0.10, i as f64 * 0.07);
    }
}

/// Score ticker — an ascending scale with a sparkle on every other note.
pub fn ticker(sink: &dyn AudioSink) {
    const NOTES: [f64; 7] = [440.0, 493.88, 523.25, 587.33, 659.25, 698.46, 783.99];
    for (i, &f) in NOTES.iter().enumerate() {
        let at = i as f64 * 0.06;
        play_tone(sink, f, Waveform::Sine, 0.08, 0.07, at);
        if i % 2 == 0 {
            play_tone(sink, f * 1.5, Waveform::Triangle, 0.05, 0.03, at + 0.03);
        }
    }
}

/// Big-win fanfare — melody doubled an octave down, closing on a C chord.
pub fn fanfare(sink: &dyn AudioSink) {
    const MELODY: [f64; 7] = [523.25, 659.25, 783.99, 1046.5, 783.99, 880.0, 1046.5];
    for (i, &f) in MELODY.iter().enumerate() {
        let at = i as f64 * 0.09;
        play_tone(sink, f, Waveform::Sine, 0.18, 0.10, at);
        play_tone(sink, f * 0.5, Waveform::Triangle, 0.18, 0.05, at);
    }
    const CHORD: [f64; 4] = [261.63, 329.63, 392.0, 523.25];
    for &f in &CHORD {
        play_tone(sink, f, Waveform::Saw, 0.30, 0.06, 0.70);
    }
}

/// Transition whoosh — band-passed noise sweeping downward.
pub fn whoosh(sink: &dyn AudioSink, delay: f64) {
    let start = sink.now() + delay;
    let _ = sink.schedule(ScheduledEvent::noise(
        start,
        start + 0.4,
        FilterKind::Bandpass,
        Sweep::linear(3000.0, 600.0, 0.4),
        Envelope::Swell {
            level: 0.28,
            attack: 0.04,
        },
        Bus::Fx,
    ));
}

/// Idle drone — three staggered low saws, swelling in and ringing out.
pub fn drone(sink: &dyn AudioSink) {
    const FREQS: [f64; 3] = [55.0, 110.0, 82.4];
    let now = sink.now();
    for (i, &f) in FREQS.iter().enumerate() {
        let _ = sink.schedule(ScheduledEvent::tone(
            now,
            now + 2.2,
            Waveform::Saw,
            Sweep::flat(f),
            Envelope::Sustain {
                level: 0.04,
                attack: 0.3 + i as f64 * 0.1,
                release: 0.7,
            },
            Bus::Fx,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{MemorySink, Source};
    use assert_approx_eq::assert_approx_eq;

    fn all_fx(sink: &MemorySink) -> bool {
        sink.events().iter().all(|e| e.bus == Bus::Fx)
    }

    #[test]
    fn every_cue_stays_on_the_fx_bus() {
        let sink = MemorySink::new();
        click(&sink);
        hover(&sink);
        nav(&sink);
        blip(&sink);
        success(&sink);
        fail(&sink);
        streak(&sink);
        ticker(&sink);
        fanfare(&sink);
        whoosh(&sink, 0.0);
        drone(&sink);
        assert!(all_fx(&sink));
        assert!(!sink.events().is_empty());
    }

    #[test]
    fn success_notes_ascend() {
        let sink = MemorySink::new();
        success(&sink);
        let events = sink.events();
        assert_eq!(events.len(), 3);
        let freqs: Vec<f64> = events
            .iter()
            .map(|e| match e.source {
                Source::Tone { freq, .. } => freq.from,
                _ => panic!("tone expected"),
            })
            .collect();
        assert!(freqs.windows(2).all(|w| w[0] < w[1]));
        assert!(events.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn fail_notes_descend() {
        let sink = MemorySink::new();
        fail(&sink);
        let events = sink.events();
        assert_eq!(events.len(), 2);
        match (events[0].source, events[1].source) {
            (Source::Tone { freq: a, .. }, Source::Tone { freq: b, .. }) => {
                assert!(a.from > b.from);
            }
            _ => panic!("tones expected"),
        }
    }

    #[test]
    fn ticker_sparkles_on_even_steps() {
        let sink = MemorySink::new();
        ticker(&sink);
        // 7 scale notes plus a fifth-above sparkle on indices 0, 2, 4, 6.
        assert_eq!(sink.events().len(), 11);
    }

    #[test]
    fn fanfare_ends_on_a_chord() {
        let sink = MemorySink::new();
        fanfare(&sink);
        let events = sink.events();
        assert_eq!(events.len(), 7 * 2 + 4);
        let chord: Vec<_> = events
            .iter()
            .filter(|e| (e.start - 0.70).abs() < 1e-9)
            .collect();
        assert_eq!(chord.len(), 4);
    }

    #[test]
    fn whoosh_sweeps_downward() {
        let sink = MemorySink::new();
        sink.set_now(3.0);
        whoosh(&sink, 0.25);
        let e = sink.events()[0];
        assert_approx_eq!(e.start, 3.25, 1e-9);
        match e.source {
            Source::Noise { filter, cutoff } => {
                assert_eq!(filter, FilterKind::Bandpass);
                assert!(cutoff.value_at(0.0) > cutoff.value_at(0.4));
            }
            _ => panic!("noise expected"),
        }
    }

    #[test]
    fn drone_layers_are_staggered_swells() {
        let sink = MemorySink::new();
        drone(&sink);
        let events = sink.events();
        assert_eq!(events.len(), 3);
        for (i, e) in events.iter().enumerate() {
            assert_approx_eq!(e.duration(), 2.2, 1e-9);
            match e.envelope {
                Envelope::Sustain { attack, .. } => {
                    assert_approx_eq!(attack, 0.3 + i as f64 * 0.1, 1e-9);
                }
                _ => panic!("sustained envelope expected"),
            }
        }
    }
}
