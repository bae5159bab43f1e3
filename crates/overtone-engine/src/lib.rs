//! Overtone Engine - control-plane bridge for real-time rendering
//!
//! The synthesizer core in `overtone-synth` is single-threaded by design:
//! one audio thread renders blocks sequentially. Control input — spectrum
//! edits, envelope knobs, note events — originates on other threads (UI,
//! MIDI host). This crate is the boundary between the two worlds.
//!
//! # Architecture
//!
//! - [`SynthShared`] - the cheaply clonable handle both sides hold.
//!   Spectrum snapshots travel through `ArcSwap` (wait-free reads),
//!   scalar parameters through bit-cast `AtomicU32`s, and note events
//!   through a mutex-guarded queue the audio thread only ever `try_lock`s.
//! - [`AudioRenderer`] - owns the [`AdditiveSynth`](overtone_synth::AdditiveSynth)
//!   on the audio side. At every block boundary it ingests whatever control
//!   state has changed, then renders. Nothing blocks, allocates, or does
//!   I/O on the audio path.
//!
//! A spectrum update is always observed as a complete snapshot: the control
//! plane publishes a whole immutable [`HarmonicSpectrum`](overtone_core::HarmonicSpectrum)
//! and the audio thread swaps its working copy between blocks, never
//! mid-block.
//!
//! # Example
//!
//! ```rust
//! use overtone_engine::{AudioRenderer, SynthShared};
//! use overtone_core::HarmonicSpectrum;
//!
//! let shared = SynthShared::new();
//! let mut renderer: AudioRenderer<16> = AudioRenderer::new(shared.clone(), 44100.0);
//!
//! // Control plane (any thread):
//! let mut spectrum = HarmonicSpectrum::new();
//! spectrum.load_preset("Organ");
//! shared.set_spectrum(spectrum);
//! shared.note_on(60, 100);
//!
//! // Audio thread:
//! let mut left = vec![0.0f32; 256];
//! let mut channels = [&mut left[..]];
//! renderer.process_block(&mut channels, 0, 256);
//! ```

pub mod audio;
pub mod shared;

pub use audio::AudioRenderer;
pub use shared::{NoteCommand, SynthShared};
