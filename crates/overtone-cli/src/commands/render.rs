//! Offline note rendering command.
//!
//! Drives the full engine path — control-plane handle, audio renderer,
//! block loop — exactly the way a plugin host would, then writes the
//! result to a WAV file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use indicatif::ProgressBar;

use overtone_core::{HarmonicSpectrum, MorphingEngine};
use overtone_engine::{AudioRenderer, SynthShared};
use overtone_synth::MAX_VOICES;

use crate::wav::{self, WavSpec};

/// Render block size in samples.
const BLOCK_SIZE: usize = 512;

/// Longest release tail rendered after note-off, in seconds.
const MAX_TAIL_SECS: f32 = 10.0;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// MIDI notes to play together (comma-separated)
    #[arg(long, default_value = "60,64,67", value_delimiter = ',')]
    notes: Vec<u8>,

    /// Spectrum preset (Saw, Square, Triangle, Sine, Organ)
    #[arg(long, default_value = "Saw")]
    preset: String,

    /// Morph target preset; enables spectrum morphing when set
    #[arg(long)]
    morph_target: Option<String>,

    /// Morph blend amount, 0 = preset, 1 = morph target
    #[arg(long, default_value = "0.0")]
    morph_amount: f32,

    /// Note hold time in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Envelope attack time in seconds
    #[arg(long, default_value = "0.01")]
    attack: f32,

    /// Envelope decay time in seconds
    #[arg(long, default_value = "0.1")]
    decay: f32,

    /// Envelope sustain level (0-1)
    #[arg(long, default_value = "0.7")]
    sustain: f32,

    /// Envelope release time in seconds
    #[arg(long, default_value = "0.5")]
    release: f32,

    /// Note velocity (0-127)
    #[arg(long, default_value = "100")]
    velocity: u8,

    /// Master gain
    #[arg(long, default_value = "0.5")]
    gain: f32,

    /// Sample rate in Hz
    #[arg(long, default_value = "44100")]
    sample_rate: u32,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let sample_rate = args.sample_rate as f32;

    // Control plane: build the timbre and queue the notes through the
    // shared handle, just like a host would from its UI/MIDI threads.
    let shared = SynthShared::new();

    let mut spectrum = HarmonicSpectrum::new();
    spectrum.load_preset(&args.preset);

    let spectrum = match &args.morph_target {
        Some(target_name) => {
            let mut target = HarmonicSpectrum::new();
            target.load_preset(target_name);

            let mut morph = MorphingEngine::new();
            morph.set_source(&spectrum);
            morph.set_target(&target);
            morph.set_morph_amount(args.morph_amount);
            morph.current_state()
        }
        None => spectrum,
    };

    shared.set_spectrum(spectrum);
    shared.set_envelope_parameters(args.attack, args.decay, args.sustain, args.release);
    shared.set_master_gain(args.gain);

    let velocity = args.velocity.min(127);
    for &note in &args.notes {
        shared.note_on(note, velocity);
    }

    tracing::info!(
        preset = %args.preset,
        notes = ?args.notes,
        duration = args.duration,
        "rendering"
    );

    // Audio side: block loop
    let mut renderer: AudioRenderer<MAX_VOICES> = AudioRenderer::new(shared.clone(), sample_rate);

    let hold_blocks = ((args.duration * sample_rate) as usize).div_ceil(BLOCK_SIZE);
    let max_tail_blocks = ((MAX_TAIL_SECS * sample_rate) as usize).div_ceil(BLOCK_SIZE);

    let mut left = vec![0.0f32; BLOCK_SIZE];
    let mut right = vec![0.0f32; BLOCK_SIZE];
    let mut interleaved: Vec<f32> = Vec::with_capacity(hold_blocks * BLOCK_SIZE * 2);

    let progress = ProgressBar::new(hold_blocks as u64);
    for _ in 0..hold_blocks {
        {
            let mut channels = [&mut left[..], &mut right[..]];
            renderer.process_block(&mut channels, 0, BLOCK_SIZE);
        }
        for i in 0..BLOCK_SIZE {
            interleaved.push(left[i]);
            interleaved.push(right[i]);
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    // Release and render the tail until every voice has gone quiet
    for &note in &args.notes {
        shared.note_off(note, true);
    }
    for _ in 0..max_tail_blocks {
        {
            let mut channels = [&mut left[..], &mut right[..]];
            renderer.process_block(&mut channels, 0, BLOCK_SIZE);
        }
        for i in 0..BLOCK_SIZE {
            interleaved.push(left[i]);
            interleaved.push(right[i]);
        }
        if renderer.active_voice_count() == 0 {
            break;
        }
    }

    let spec = WavSpec {
        channels: 2,
        sample_rate: args.sample_rate,
    };
    wav::write_wav(&args.output, &interleaved, spec)
        .with_context(|| format!("writing {}", args.output.display()))?;

    let frames = interleaved.len() / 2;
    println!(
        "Wrote {} ({} frames, {:.2}s at {} Hz)",
        args.output.display(),
        frames,
        frames as f32 / sample_rate,
        args.sample_rate
    );

    Ok(())
}
