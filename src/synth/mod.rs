//! Synthesis primitives — events, envelopes, oscillators, voices, and the
//! sink boundary everything schedules against.

pub mod envelope;
pub mod event;
pub mod noise;
pub mod oscillator;
pub mod sink;
pub mod tone;
pub mod voice;

pub use envelope::{Envelope, RAMP_FLOOR};
pub use event::{Bus, Curve, FilterKind, ScheduledEvent, Source, Sweep};
pub use noise::play_noise_burst;
pub use oscillator::{oscillator, Waveform};
pub use sink::{AudioSink, MemorySink, ScheduleError};
pub use tone::play_tone;
pub use voice::Voice;
