//! Sink boundary — write-only scheduling against an audio timeline.
//!
//! Everything above the engine talks to an [`AudioSink`]: read the clock,
//! submit events, ramp the music master. The real implementation forwards to
//! the cpal engine; [`MemorySink`] records submissions for tests and offline
//! rendering. Keeping the boundary a trait means all scheduling logic runs
//! without audio hardware.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::event::ScheduledEvent;

/// Why a scheduling call failed. Callers treat sound as best-effort and
/// usually discard these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// The engine's command queue is full; the event was dropped.
    QueueFull,
    /// The engine is gone.
    Closed,
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::QueueFull => write!(f, "audio command queue is full"),
            ScheduleError::Closed => write!(f, "audio engine is closed"),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Write-only scheduling surface over an audio timeline.
pub trait AudioSink: Send + Sync {
    /// Monotonic seconds since the sink's clock origin.
    fn now(&self) -> f64;

    /// Queue one synthesis event. A failed push means the event is silently
    /// lost — never audible breakage, never a panic.
    fn schedule(&self, event: ScheduledEvent) -> Result<(), ScheduleError>;

    /// Ramp the music-bus master gain toward `target` over `seconds`.
    fn ramp_master(&self, target: f32, seconds: f64) -> Result<(), ScheduleError>;
}

/// An in-memory sink that records everything submitted to it.
///
/// The clock is driven manually via [`MemorySink::set_now`]. Used by the
/// offline renderer and throughout the test suite.
#[derive(Default)]
pub struct MemorySink {
    now_bits: AtomicU64,
    events: Mutex<Vec<ScheduledEvent>>,
    ramps: Mutex<Vec<(f32, f64)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the mock clock to `now` seconds.
    pub fn set_now(&self, now: f64) {
        self.now_bits.store(now.to_bits(), Ordering::SeqCst);
    }

    /// All events scheduled so far, in submission order.
    pub fn events(&self) -> Vec<ScheduledEvent> {
        self.events.lock().expect("sink poisoned").clone()
    }

    /// All `(target, seconds)` master ramps requested so far.
    pub fn ramps(&self) -> Vec<(f32, f64)> {
        self.ramps.lock().expect("sink poisoned").clone()
    }

    /// Drop all recorded events and ramps.
    pub fn clear(&self) {
        self.events.lock().expect("sink poisoned").clear();
        self.ramps.lock().expect("sink poisoned").clear();
    }
}

impl AudioSink for MemorySink {
    fn now(&self) -> f64 {
        f64::from_bits(self.now_bits.load(Ordering::SeqCst))
    }

    fn schedule(&self, event: ScheduledEvent) -> Result<(), ScheduleError> {
        self.events
            .lock()
            .map_err(|_| ScheduleError::Closed)?
            .push(event);
        Ok(())
    }

    fn ramp_master(&self, target: f32, seconds: f64) -> Result<(), ScheduleError> {
        self.ramps
            .lock()
            .map_err(|_| ScheduleError::Closed)?
            .push((target, seconds));
        Ok(())
    }
}
