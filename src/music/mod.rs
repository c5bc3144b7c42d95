//! Background music — composition, lookahead scheduling, and transport.
//!
//! A dark ambient bed at 72 BPM, generated one 4-bar phrase at a time. The
//! [`Transport`] is the public surface: it restores the persisted preference,
//! fades the master gain, and runs the scheduler thread that keeps the next
//! phrase composed before the current one ends.

pub mod phrase;
pub mod planner;
pub mod scheduler;
pub mod transport;

pub use phrase::{compose_phrase, BAR_SECS, BEAT_SECS, BPM, MUSIC_MASTER_LEVEL, PHRASE_SECS};
pub use planner::{PhrasePlanner, GUARD_SECS};
pub use scheduler::{SchedulerHandle, START_OFFSET_SECS};
pub use transport::{SinkFactory, Transport, FADE_IN_SECS, FADE_OUT_SECS};
