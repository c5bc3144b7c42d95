//! Transport — start/stop control, master fades, and the persisted
//! enable preference.
//!
//! One `Transport` value owns the whole lifecycle: the lazily created sink,
//! the scheduler handle, and the enabled flag. Browser-style audio engines
//! refuse to sound before a user gesture, so the sink is not created until
//! the first `start()`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::audio::AudioError;
use crate::settings::{self, Settings};
use crate::synth::AudioSink;

use super::phrase::{self, MUSIC_MASTER_LEVEL};
use super::planner::{PhrasePlanner, GUARD_SECS};
use super::scheduler::{self, SchedulerHandle};

/// Master fade-in when the music starts.
pub const FADE_IN_SECS: f64 = 3.5;
/// Master fade-out when the music stops. In-flight notes keep sounding under
/// the fade; only the aggregate gain falls.
pub const FADE_OUT_SECS: f64 = 1.8;

/// Creates the sink on first start. Failure means no music this session —
/// the transport stays stopped and nothing propagates.
pub type SinkFactory = Box<dyn Fn() -> Result<Arc<dyn AudioSink>, AudioError> + Send>;

/// Transport state machine: Stopped ⇄ Running, plus the persisted preference.
pub struct Transport {
    factory: SinkFactory,
    sink: Option<Arc<dyn AudioSink>>,
    scheduler: Option<SchedulerHandle>,
    enabled: bool,
    interacted: bool,
    settings_path: PathBuf,
}

impl Transport {
    /// Restore the persisted preference and build a stopped transport.
    pub fn new(factory: SinkFactory, settings_path: PathBuf) -> Self {
        let enabled = settings::load(&settings_path)
            .map(|s| s.music)
            .unwrap_or(true);
        Self {
            factory,
            sink: None,
            scheduler: None,
            enabled,
            interacted: false,
            settings_path,
        }
    }

    /// Whether the user wants music (persisted).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the scheduling loop is running.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    /// First-user-gesture hook. The first call starts the music if enabled;
    /// later calls do nothing.
    pub fn on_first_interaction(&mut self) {
        if self.interacted {
            return;
        }
        self.interacted = true;
        if self.enabled {
            self.start();
        }
    }

    /// Start the music: create the sink if needed, fade the master in,
    /// compose the first phrase, arm the scheduler. No-op while running.
    pub fn start(&mut self) {
        if self.scheduler.is_some() {
            return;
        }
        if self.sink.is_none() {
            match (self.factory)() {
                Ok(sink) => self.sink = Some(sink),
                // Sound is best-effort; a missing device just means silence.
                Err(_) => return,
            }
        }
        let Some(sink) = self.sink.clone() else {
            return;
        };

        let _ = sink.ramp_master(MUSIC_MASTER_LEVEL, FADE_IN_SECS);

        let planner = PhrasePlanner::new(phrase::PHRASE_SECS, GUARD_SECS);
        self.scheduler = Some(scheduler::spawn(
            sink,
            planner,
            poll_interval(),
            phrase::compose_phrase,
        ));
    }

    /// Stop the music: cancel the pending wake-up and fade the master out.
    /// Already-scheduled events finish naturally. No-op while stopped.
    pub fn stop(&mut self) {
        let Some(handle) = self.scheduler.take() else {
            return;
        };
        handle.stop();
        if let Some(sink) = &self.sink {
            let _ = sink.ramp_master(0.0, FADE_OUT_SECS);
        }
    }

    /// Flip the preference, persist it, and start or stop accordingly.
    /// Returns the new enabled state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if let Err(e) = settings::save(
            &self.settings_path,
            &Settings {
                music: self.enabled,
            },
        ) {
            eprintln!("failed to save settings: {e}");
        }
        if self.enabled {
            self.start();
        } else {
            self.stop();
        }
        self.enabled
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Wake up twice per phrase — well inside the lookahead window, so timer
/// drift never skips a slot.
fn poll_interval() -> Duration {
    Duration::from_secs_f64(phrase::BAR_SECS * 2.0)
}
