//! Audio clock — monotonic engine time derived from rendered frames.
//!
//! Zero is the moment the engine was created. Only the audio callback
//! advances the counter; everyone else just reads it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free frame counter shared between the audio thread and readers.
#[derive(Debug)]
pub struct AudioClock {
    frames: AtomicU64,
    sample_rate: u32,
}

impl AudioClock {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            frames: AtomicU64::new(0),
            sample_rate,
        }
    }

    /// Seconds since engine creation.
    pub fn now(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    /// Total frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Advance by `frames` rendered frames. Called only from the callback.
    pub(crate) fn advance(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::AcqRel);
    }
}
