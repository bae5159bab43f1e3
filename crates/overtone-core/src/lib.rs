//! Overtone Core - DSP primitives for additive synthesis
//!
//! This crate provides the foundational building blocks for an additive
//! synthesizer, designed for real-time audio processing with zero allocation
//! in the audio path.
//!
//! # Core Components
//!
//! ## Harmonic Spectrum
//!
//! The timbre data model — per-partial amplitude and phase:
//!
//! - [`HarmonicSpectrum`] - Fixed-capacity array of [`MAX_HARMONICS`] partials
//! - [`HarmonicData`] - One partial's amplitude/phase/enabled triple
//! - [`SpectrumPreset`] - The named factory spectra (Saw, Square, Triangle, Sine, Organ)
//!
//! ```rust
//! use overtone_core::HarmonicSpectrum;
//!
//! let mut spectrum = HarmonicSpectrum::new();
//! spectrum.load_preset("Saw");
//! assert!((spectrum.amplitude(0) - 1.0).abs() < 1e-6);
//! ```
//!
//! ## Oscillators
//!
//! - [`SineOscillator`] - Single sine partial with phase accumulation
//! - [`HarmonicOscillatorBank`] - One oscillator per harmonic slot, driven
//!   from a spectrum and a fundamental frequency
//!
//! ```rust
//! use overtone_core::{HarmonicOscillatorBank, HarmonicSpectrum};
//!
//! let mut bank = HarmonicOscillatorBank::new(48000.0);
//! let mut spectrum = HarmonicSpectrum::new();
//! spectrum.set_amplitude(0, 1.0);
//!
//! bank.set_fundamental(440.0);
//! bank.apply_spectrum(&spectrum);
//! let sample = bank.advance();
//! ```
//!
//! ## Envelope
//!
//! - [`AdsrEnvelope`] - Linear-segment attack-decay-sustain-release envelope
//! - [`EnvelopeState`] - Envelope stage tracking
//!
//! ## Morphing
//!
//! - [`MorphingEngine`] - Blends between a source and a target spectrum
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! overtone-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Defensive inputs**: Out-of-range values are clamped or ignored,
//!   never rejected — the audio path has no recoverable-error channel

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bank;
pub mod envelope;
pub mod morph;
pub mod sine;
pub mod spectrum;

// Re-export main types at crate root
pub use bank::{DEFAULT_MASTER_GAIN, HarmonicOscillatorBank};
pub use envelope::{AdsrEnvelope, EnvelopeState};
pub use morph::MorphingEngine;
pub use sine::SineOscillator;
pub use spectrum::{HarmonicData, HarmonicSpectrum, SpectrumPreset};

/// Number of harmonic partials per spectrum and oscillator bank.
///
/// Slot `k` (0-indexed) corresponds to harmonic number `k + 1`; slot 0 is
/// the fundamental.
pub const MAX_HARMONICS: usize = 128;

/// Amplitude threshold below which a partial is treated as silent.
///
/// Drives both the derived `enabled` flag on [`HarmonicData`] and the
/// skip-inaudible fast path in [`SineOscillator::advance`].
pub const MIN_AUDIBLE_AMPLITUDE: f32 = 0.001;
