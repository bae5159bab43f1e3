//! Bank of harmonically tuned sine oscillators.
//!
//! The bank owns one [`SineOscillator`] per harmonic slot and drives their
//! frequencies from a single fundamental: slot `k` runs at `f * (k + 1)`.
//! Amplitudes come from a [`HarmonicSpectrum`] via
//! [`apply_spectrum`](HarmonicOscillatorBank::apply_spectrum).

use crate::sine::SineOscillator;
use crate::spectrum::HarmonicSpectrum;
use crate::MAX_HARMONICS;

/// Default output gain applied to the summed partials.
pub const DEFAULT_MASTER_GAIN: f32 = 0.5;

/// A fixed bank of [`MAX_HARMONICS`] sine oscillators.
///
/// # Example
///
/// ```rust
/// use overtone_core::{HarmonicOscillatorBank, HarmonicSpectrum};
///
/// let mut bank = HarmonicOscillatorBank::new(48000.0);
/// let mut spectrum = HarmonicSpectrum::new();
/// spectrum.load_preset("Organ");
///
/// bank.set_fundamental(220.0);
/// bank.apply_spectrum(&spectrum);
///
/// for _ in 0..256 {
///     let _sample = bank.advance();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HarmonicOscillatorBank {
    oscillators: [SineOscillator; MAX_HARMONICS],
    /// Fundamental frequency in Hz
    fundamental: f32,
    /// Output gain applied after summation
    master_gain: f32,
}

impl Default for HarmonicOscillatorBank {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl HarmonicOscillatorBank {
    /// Create a bank at the given sample rate. All partials start silent.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            oscillators: core::array::from_fn(|_| SineOscillator::new(sample_rate)),
            fundamental: 440.0,
            master_gain: DEFAULT_MASTER_GAIN,
        }
    }

    /// Set sample rate on every oscillator.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        for osc in &mut self.oscillators {
            osc.set_sample_rate(sample_rate);
        }
    }

    /// Reset every oscillator's phase to 0.
    pub fn reset(&mut self) {
        for osc in &mut self.oscillators {
            osc.reset();
        }
    }

    /// Set the fundamental frequency.
    ///
    /// Retunes every oscillator to the harmonic series: slot `k` runs at
    /// `freq * (k + 1)`.
    pub fn set_fundamental(&mut self, freq_hz: f32) {
        self.fundamental = freq_hz;
        for (k, osc) in self.oscillators.iter_mut().enumerate() {
            osc.set_frequency(freq_hz * (k + 1) as f32);
        }
    }

    /// Get the fundamental frequency in Hz.
    pub fn fundamental(&self) -> f32 {
        self.fundamental
    }

    /// Copy per-slot amplitudes out of a spectrum.
    ///
    /// Harmonic phase data is not consumed here — oscillators keep their
    /// own accumulated phase.
    pub fn apply_spectrum(&mut self, spectrum: &HarmonicSpectrum) {
        for (k, osc) in self.oscillators.iter_mut().enumerate() {
            osc.set_amplitude(spectrum.amplitude(k));
        }
    }

    /// Set the output gain.
    pub fn set_gain(&mut self, gain: f32) {
        self.master_gain = gain;
    }

    /// Get the output gain.
    pub fn gain(&self) -> f32 {
        self.master_gain
    }

    /// Sum the next sample from every partial, scaled by the master gain.
    ///
    /// Each oscillator's `advance` is invoked exactly once per output
    /// sample — silent partials short-circuit inside the oscillator, so no
    /// pre-check (and no second call) is needed here.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let mut sum = 0.0;
        for osc in &mut self.oscillators {
            sum += osc.advance();
        }
        sum * self.master_gain
    }
}
