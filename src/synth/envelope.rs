//! Volume envelopes for scheduled events.
//!
//! Exponential segments decay toward [`RAMP_FLOOR`] rather than literal zero —
//! an exponential ramp from a positive level can never reach zero, so the
//! floor doubles as the silence threshold.

/// Smallest amplitude an exponential segment ramps toward.
pub const RAMP_FLOOR: f32 = 0.001;

/// Envelope shape applied over an event's `[start, stop)` interval.
///
/// All times are in seconds relative to the event start. `level` is the peak
/// amplitude in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// Immediate rise to `level`, exponential decay to the floor by the stop
    /// time. Plucked tones and short percussion.
    Pluck { level: f32 },
    /// Linear attack, hold at `level`, linear release over the final
    /// `release` seconds. Pads and bass tones.
    Sustain { level: f32, attack: f64, release: f64 },
    /// Linear attack over `attack`, then exponential decay to the floor.
    /// Swept noise effects.
    Swell { level: f32, attack: f64 },
}

impl Envelope {
    /// Peak amplitude of this envelope.
    pub fn level(&self) -> f32 {
        match *self {
            Envelope::Pluck { level } => level,
            Envelope::Sustain { level, .. } => level,
            Envelope::Swell { level, .. } => level,
        }
    }

    /// Amplitude at time `t` for an event lasting `duration` seconds.
    ///
    /// Returns 0.0 outside `[0, duration)`.
    pub fn amplitude(&self, t: f64, duration: f64) -> f32 {
        if t < 0.0 || t >= duration || duration <= 0.0 {
            return 0.0;
        }

        match *self {
            Envelope::Pluck { level } => exp_decay(level, t / duration),
            Envelope::Sustain {
                level,
                attack,
                release,
            } => {
                if t < attack {
                    if attack <= 0.0 {
                        level
                    } else {
                        level * (t / attack) as f32
                    }
                } else if t > duration - release && release > 0.0 {
                    level * ((duration - t) / release) as f32
                } else {
                    level
                }
            }
            Envelope::Swell { level, attack } => {
                if t < attack {
                    if attack <= 0.0 {
                        level
                    } else {
                        level * (t / attack) as f32
                    }
                } else {
                    let tail = duration - attack;
                    if tail <= 0.0 {
                        level
                    } else {
                        exp_decay(level, (t - attack) / tail)
                    }
                }
            }
        }
    }
}

/// Exponential ramp from `level` down to [`RAMP_FLOOR`] as `x` goes 0 → 1.
fn exp_decay(level: f32, x: f64) -> f32 {
    if level <= RAMP_FLOOR {
        return level;
    }
    level * (RAMP_FLOOR / level).powf(x as f32)
}
