//! Overtone Synth - Voice management for the overtone additive engine
//!
//! This crate turns the DSP primitives from `overtone-core` into a playable
//! polyphonic instrument: voices, a fixed voice pool with stealing, and the
//! [`AdditiveSynth`] facade that hosts talk to.
//!
//! # Core Components
//!
//! ## Voices
//!
//! - [`Voice`] - One note-rendering unit: an oscillator bank paired with an
//!   ADSR envelope and a captured velocity
//! - [`VoicePool`] - Fixed-size pool with free-voice allocation and stealing
//! - [`VoiceStealMode`] - Steal policies when the pool is exhausted
//!
//! ```rust
//! use overtone_synth::Voice;
//!
//! let mut voice = Voice::new(44100.0);
//! voice.note_on(69, 100); // A4
//!
//! for _ in 0..1000 {
//!     let _sample = voice.process();
//! }
//!
//! voice.note_off(true); // graceful release
//! ```
//!
//! ## Complete Synthesizer
//!
//! - [`AdditiveSynth`] - Pool + global spectrum + morphing engine behind the
//!   full host-facing surface
//!
//! ```rust
//! use overtone_synth::AdditiveSynth;
//!
//! let mut synth: AdditiveSynth<16> = AdditiveSynth::new(44100.0);
//! synth.load_preset("Organ");
//! synth.set_envelope_parameters(0.01, 0.1, 0.7, 0.5);
//!
//! // Play a chord
//! synth.note_on(60, 100); // C4
//! synth.note_on(64, 100); // E4
//! synth.note_on(67, 100); // G4
//!
//! // Render a stereo block
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! let mut channels = [&mut left[..], &mut right[..]];
//! synth.render_block(&mut channels, 0, 512);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! overtone-synth = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod synth;
pub mod voice;

// Re-export main types at crate root
pub use synth::AdditiveSynth;
pub use voice::{MAX_VOICES, Voice, VoicePool, VoiceStealMode, freq_to_midi, midi_to_freq};

// Re-export commonly used types from overtone-core
pub use overtone_core::{
    AdsrEnvelope, EnvelopeState, HarmonicOscillatorBank, HarmonicSpectrum, MAX_HARMONICS,
    MorphingEngine, SpectrumPreset,
};
