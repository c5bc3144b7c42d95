//! Event data model — the fundamental unit of scheduled sound.
//!
//! A [`ScheduledEvent`] is one synthesis request pinned to the engine clock:
//! a tone or a filtered noise burst with an envelope and an output bus.
//! Events are fire-and-forget — callers submit them and never see them again.

use super::envelope::Envelope;
use super::oscillator::Waveform;

/// Which mix bus an event plays on.
///
/// The music bus passes through the master volume envelope that the transport
/// ramps in and out; foreground effects bypass it so muting the music never
/// silences them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bus {
    Music,
    Fx,
}

/// One-pole filter variants for noise sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

/// Interpolation curve for a [`Sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    Exponential,
}

/// A parameter ramp from `from` to `to` over `seconds`, holding `to` after.
///
/// Used for kick pitch drops and filter cutoff sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub from: f64,
    pub to: f64,
    pub seconds: f64,
    pub curve: Curve,
}

impl Sweep {
    /// A constant value with no sweep.
    pub fn flat(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            seconds: 0.0,
            curve: Curve::Linear,
        }
    }

    pub fn linear(from: f64, to: f64, seconds: f64) -> Self {
        Self {
            from,
            to,
            seconds,
            curve: Curve::Linear,
        }
    }

    /// Exponential sweep. Both endpoints must be positive.
    pub fn exponential(from: f64, to: f64, seconds: f64) -> Self {
        Self {
            from,
            to,
            seconds,
            curve: Curve::Exponential,
        }
    }

    /// Value at `t` seconds after the sweep starts.
    pub fn value_at(&self, t: f64) -> f64 {
        if self.seconds <= 0.0 || self.from == self.to {
            return self.to;
        }
        let x = (t / self.seconds).clamp(0.0, 1.0);
        match self.curve {
            Curve::Linear => self.from + (self.to - self.from) * x,
            Curve::Exponential => self.from * (self.to / self.from).powf(x),
        }
    }
}

/// What produces the event's signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    /// A pitched oscillator, optionally pitch-swept.
    Tone { waveform: Waveform, freq: Sweep },
    /// White noise through a one-pole filter, optionally cutoff-swept.
    Noise { filter: FilterKind, cutoff: Sweep },
}

/// A single synthesis request on the engine timeline.
///
/// `start` and `stop` are absolute seconds on the engine clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    pub start: f64,
    pub stop: f64,
    pub source: Source,
    pub envelope: Envelope,
    pub bus: Bus,
}

impl ScheduledEvent {
    /// Create a tone event.
    pub fn tone(
        start: f64,
        stop: f64,
        waveform: Waveform,
        freq: Sweep,
        envelope: Envelope,
        bus: Bus,
    ) -> Self {
        Self {
            start,
            stop,
            source: Source::Tone { waveform, freq },
            envelope,
            bus,
        }
    }

    /// Create a filtered-noise event.
    pub fn noise(
        start: f64,
        stop: f64,
        filter: FilterKind,
        cutoff: Sweep,
        envelope: Envelope,
        bus: Bus,
    ) -> Self {
        Self {
            start,
            stop,
            source: Source::Noise { filter, cutoff },
            envelope,
            bus,
        }
    }

    /// Event length in seconds.
    pub fn duration(&self) -> f64 {
        (self.stop - self.start).max(0.0)
    }
}
