//! Audio engine — cpal output stream fed through a lock-free command queue.
//!
//! The engine owns the stream; scheduling threads hold an [`EngineHandle`]
//! and push [`AudioCommand`]s through the ring buffer. The audio callback
//! drains them, mixes voices, and advances the shared [`AudioClock`]. All
//! interaction is write-only scheduling against the engine's timeline — no
//! command produces a reply.

pub mod callback;
pub mod clock;
pub mod command;
pub mod gain;
pub mod render;

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Producer, Split},
    HeapRb,
};

pub use clock::AudioClock;
pub use command::AudioCommand;
pub use render::render_offline;

use crate::synth::{AudioSink, ScheduleError, ScheduledEvent};
use callback::AudioCallback;

/// Ring buffer capacity (number of commands). A phrase is under a hundred
/// events, so two phrases plus cues fit with room to spare.
const COMMAND_QUEUE_CAPACITY: usize = 512;

/// Audio engine errors.
#[derive(Debug)]
pub enum AudioError {
    /// No audio output device found.
    NoOutputDevice,
    /// Failed to query device configuration.
    DeviceConfig(String),
    /// Failed to build the audio stream.
    StreamBuild(String),
    /// Failed to start the audio stream.
    StreamPlay(String),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device found"),
            AudioError::DeviceConfig(e) => write!(f, "device config error: {e}"),
            AudioError::StreamBuild(e) => write!(f, "stream build error: {e}"),
            AudioError::StreamPlay(e) => write!(f, "stream play error: {e}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Cloneable scheduling handle onto a running [`AudioEngine`].
///
/// The producer sits behind a mutex because phrase composition happens on the
/// scheduler thread while cues fire from the input thread; pushes are rare
/// (dozens per phrase) so contention is negligible.
#[derive(Clone)]
pub struct EngineHandle {
    producer: Arc<Mutex<ringbuf::HeapProd<AudioCommand>>>,
    clock: Arc<AudioClock>,
}

impl EngineHandle {
    fn push(&self, cmd: AudioCommand) -> Result<(), ScheduleError> {
        self.producer
            .lock()
            .map_err(|_| ScheduleError::Closed)?
            .try_push(cmd)
            .map_err(|_| ScheduleError::QueueFull)
    }
}

impl AudioSink for EngineHandle {
    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn schedule(&self, event: ScheduledEvent) -> Result<(), ScheduleError> {
        self.push(AudioCommand::Schedule(event))
    }

    fn ramp_master(&self, target: f32, seconds: f64) -> Result<(), ScheduleError> {
        self.push(AudioCommand::RampMaster { target, seconds })
    }
}

/// The audio engine. Owns the cpal stream; keep it alive for as long as sound
/// should play.
pub struct AudioEngine {
    _stream: cpal::Stream,
    handle: EngineHandle,
    sample_rate: u32,
    channels: u16,
}

impl AudioEngine {
    /// Create and start the engine on the default output device.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let rb = HeapRb::<AudioCommand>::new(COMMAND_QUEUE_CAPACITY);
        let (producer, consumer) = rb.split();

        let clock = Arc::new(AudioClock::new(sample_rate));
        let mut audio_callback =
            AudioCallback::new(consumer, Arc::clone(&clock), channels, sample_rate);

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = |err: cpal::StreamError| {
            eprintln!("audio stream error: {err}");
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    audio_callback.process(data);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            handle: EngineHandle {
                producer: Arc::new(Mutex::new(producer)),
                clock,
            },
            sample_rate,
            channels,
        })
    }

    /// A cloneable scheduling handle for this engine.
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Sample rate of the output stream.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Output channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}
