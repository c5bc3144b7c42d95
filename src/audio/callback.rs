//! Audio callback — runs on the cpal audio thread.
//!
//! Drains commands from the ring buffer, mixes live voices, applies the
//! music-bus master gain and the output ceiling, and advances the clock.

use std::sync::Arc;

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use crate::synth::{Bus, Voice};

use super::clock::AudioClock;
use super::command::AudioCommand;
use super::gain::GainRamp;

/// Hard output ceiling applied after mixing.
const OUTPUT_CEILING: f32 = 0.95;

/// Maximum simultaneous voices. Events arriving past the cap are dropped —
/// synthesis is best-effort all the way down.
const MAX_VOICES: usize = 256;

/// State that lives on the audio thread. Accessed only from the cpal callback.
pub struct AudioCallback {
    consumer: HeapCons<AudioCommand>,
    clock: Arc<AudioClock>,
    voices: Vec<Voice>,
    master: GainRamp,
    channels: u16,
    sample_rate: u32,
}

impl AudioCallback {
    pub fn new(
        consumer: HeapCons<AudioCommand>,
        clock: Arc<AudioClock>,
        channels: u16,
        sample_rate: u32,
    ) -> Self {
        Self {
            consumer,
            clock,
            voices: Vec::with_capacity(MAX_VOICES),
            master: GainRamp::new(0.0),
            channels,
            sample_rate,
        }
    }

    /// Called by cpal for each output block. Fills `output` with interleaved
    /// samples.
    pub fn process(&mut self, output: &mut [f32]) {
        while let Some(cmd) = self.consumer.try_pop() {
            match cmd {
                AudioCommand::Schedule(event) => {
                    if self.voices.len() < MAX_VOICES {
                        self.voices.push(Voice::new(event, self.sample_rate));
                    }
                }
                AudioCommand::RampMaster { target, seconds } => {
                    self.master.ramp_to(target, seconds, self.sample_rate);
                }
            }
        }

        let channels = self.channels.max(1) as usize;
        let frames = output.len() / channels;
        let base = self.clock.frames();

        for i in 0..frames {
            let frame = base + i as u64;
            let gain = self.master.next();

            let mut music = 0.0f32;
            let mut fx = 0.0f32;
            for voice in &mut self.voices {
                let s = voice.sample(frame, self.sample_rate);
                match voice.bus() {
                    Bus::Music => music += s,
                    Bus::Fx => fx += s,
                }
            }

            let mixed = (music * gain + fx).clamp(-OUTPUT_CEILING, OUTPUT_CEILING);
            for c in 0..channels {
                output[i * channels + c] = mixed;
            }
        }

        self.clock.advance(frames as u64);
        let end = base + frames as u64;
        self.voices.retain(|v| !v.is_finished(end));
    }
}
