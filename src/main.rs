//! Nocturne — ambient soundtrack player.
//!
//! Interactive mode starts the audio engine and drives the music transport
//! from the keyboard; `--render` instead writes one phrase to a WAV file and
//! exits, for listening without a device.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use nocturne::audio::{render_offline, AudioEngine};
use nocturne::cues;
use nocturne::music::{self, Transport};
use nocturne::settings;
use nocturne::synth::{AudioSink, MemorySink};

#[derive(Parser)]
#[command(name = "nocturne", version, about = "Generative ambient soundtrack")]
struct Args {
    /// Render one phrase to a WAV file instead of playing live.
    #[arg(long, value_name = "FILE")]
    render: Option<PathBuf>,

    /// Settings file path (default: ~/.nocturne/settings.yaml).
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = args.render {
        if let Err(e) = render_phrase(&path) {
            eprintln!("render failed: {e}");
            std::process::exit(1);
        }
        println!("wrote {}", path.display());
        return;
    }

    let engine = match AudioEngine::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("failed to start audio engine: {e}");
            std::process::exit(1);
        }
    };

    let handle = engine.handle();
    let sink: Arc<dyn AudioSink> = Arc::new(engine.handle());
    let settings_path = args.settings.unwrap_or_else(settings::default_settings_path);
    let mut transport = Transport::new(
        Box::new(move || Ok(Arc::new(handle.clone()) as Arc<dyn AudioSink>)),
        settings_path,
    );

    println!("nocturne v{}", env!("CARGO_PKG_VERSION"));
    println!("press any key to begin; [m] music on/off, [q] quit");
    println!("cues: [c]lick [h]over [n]av [b]lip [s]uccess [f]ail [k] streak [t]icker [w]hoosh [a] fanfare [d]rone");

    if let Err(e) = run_key_loop(&mut transport, &*sink) {
        eprintln!("input error: {e}");
    }

    transport.stop();
}

/// Block on keyboard input until quit. The first keypress counts as the user
/// gesture that may auto-start the music.
fn run_key_loop(transport: &mut Transport, sink: &dyn AudioSink) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    let result = key_loop(transport, sink);
    terminal::disable_raw_mode()?;
    result
}

fn key_loop(transport: &mut Transport, sink: &dyn AudioSink) -> std::io::Result<()> {
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        transport.on_first_interaction();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Char('m') => {
                let on = transport.toggle();
                print!("music {}\r\n", if on { "on" } else { "off" });
            }
            KeyCode::Char('c') => cues::click(sink),
            KeyCode::Char('h') => cues::hover(sink),
            KeyCode::Char('n') => cues::nav(sink),
            KeyCode::Char('b') => cues::blip(sink),
            KeyCode::Char('s') => cues::success(sink),
            KeyCode::Char('f') => cues::fail(sink),
            KeyCode::Char('k') => cues::streak(sink),
            KeyCode::Char('t') => cues::ticker(sink),
            KeyCode::Char('w') => cues::whoosh(sink, 0.0),
            KeyCode::Char('a') => cues::fanfare(sink),
            KeyCode::Char('d') => cues::drone(sink),
            _ => {}
        }
    }
    Ok(())
}

/// Compose one phrase at t=0 and mix it offline into a stereo WAV.
fn render_phrase(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    const SAMPLE_RATE: u32 = 44_100;
    const CHANNELS: u16 = 2;

    let sink = MemorySink::new();
    music::compose_phrase(&sink, 0.0);

    let samples = render_offline(
        &sink.events(),
        SAMPLE_RATE,
        CHANNELS,
        music::MUSIC_MASTER_LEVEL,
        music::PHRASE_SECS + 1.0,
    );

    let spec = hound::WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}
