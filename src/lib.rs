//! Nocturne — a generative ambient soundtrack with lookahead scheduling.
//!
//! A cpal output stream mixes sample-accurate scheduled events; a timer
//! thread composes the music one 4-bar phrase at a time, always one phrase
//! ahead of playback. Short UI cues ride a separate bus that bypasses the
//! music master gain.

pub mod audio;
pub mod cues;
pub mod music;
pub mod settings;
pub mod synth;
