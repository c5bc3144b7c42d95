//! Lookahead scheduler — a timer thread that keeps phrases composed ahead of
//! playback.
//!
//! One pending wake-up exists at any time: the thread blocks in
//! `recv_timeout`, which doubles as the cancellable timer. Stopping sends on
//! the channel and joins, so handles are cancelled and replaced, never
//! stacked.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::synth::AudioSink;

use super::planner::PhrasePlanner;

/// The first phrase starts this far ahead of the clock, giving the engine a
/// moment to pick the events up before they are due.
pub const START_OFFSET_SECS: f64 = 0.1;

/// A running scheduler thread. Dropping without [`stop`](Self::stop) also
/// shuts the thread down (the channel disconnects), but stop joins it.
pub struct SchedulerHandle {
    cancel: mpsc::Sender<()>,
    thread: thread::JoinHandle<()>,
}

impl SchedulerHandle {
    /// Cancel the pending wake-up and wait for the thread to exit.
    pub fn stop(self) {
        let _ = self.cancel.send(());
        let _ = self.thread.join();
    }
}

/// Start the scheduling loop.
///
/// Composes one phrase immediately at `now + START_OFFSET_SECS`, then wakes
/// every `poll` to ask the planner for the next due slot. `poll` must be
/// shorter than the phrase length so no slot is skipped under timer drift.
pub fn spawn<F>(
    sink: Arc<dyn AudioSink>,
    mut planner: PhrasePlanner,
    poll: Duration,
    compose: F,
) -> SchedulerHandle
where
    F: Fn(&dyn AudioSink, f64) + Send + 'static,
{
    let first = sink.now() + START_OFFSET_SECS;
    compose(&*sink, first);
    planner.mark_started(first);

    let (cancel, wakeup) = mpsc::channel::<()>();
    let thread = thread::spawn(move || loop {
        match wakeup.recv_timeout(poll) {
            Err(RecvTimeoutError::Timeout) => {
                if let Some(start) = planner.next_due(sink.now()) {
                    compose(&*sink, start);
                }
            }
            // Cancelled, or the transport dropped the handle.
            _ => break,
        }
    });

    SchedulerHandle { cancel, thread }
}
