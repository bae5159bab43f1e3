//! Harmonic spectrum data model.
//!
//! A [`HarmonicSpectrum`] is the timbre definition of the synthesizer: an
//! ordered, fixed-capacity array of per-partial amplitude/phase pairs.
//! Spectra are plain values — every voice and the morphing engine hold
//! independent copies, so there is no shared ownership to coordinate.

use crate::{MAX_HARMONICS, MIN_AUDIBLE_AMPLITUDE};

/// Number of harmonic slots filled in by the named presets.
const PRESET_HARMONICS: usize = 32;

/// One partial of a harmonic spectrum.
///
/// `enabled` is a derived cache, true iff `amplitude > 0.001`. It is
/// recomputed on every amplitude write and must never be set independently.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HarmonicData {
    /// Partial amplitude, clamped to [0, 1] by the spectrum setters.
    pub amplitude: f32,
    /// Partial phase offset in radians. Stored and morphed, but currently
    /// not consumed by sample generation (oscillators start from phase 0).
    pub phase: f32,
    /// Whether this partial is audible (`amplitude > 0.001`).
    pub enabled: bool,
}

impl HarmonicData {
    /// Create a partial with a derived `enabled` flag.
    pub fn new(amplitude: f32, phase: f32) -> Self {
        Self {
            amplitude,
            phase,
            enabled: amplitude > MIN_AUDIBLE_AMPLITUDE,
        }
    }
}

/// The named factory spectra.
///
/// Preset names form a closed, case-sensitive set — the only string-keyed
/// surface the core exposes. Unknown names yield a cleared (silent)
/// spectrum via [`HarmonicSpectrum::load_preset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpectrumPreset {
    /// All 32 visible harmonics at 1/n amplitude.
    Saw,
    /// Odd harmonics at 1/n amplitude.
    Square,
    /// Odd harmonics at 1/n² with alternating sign.
    Triangle,
    /// Fundamental only.
    Sine,
    /// Drawbar-style mix of fundamental, 3rd, and 5th harmonics.
    Organ,
}

impl SpectrumPreset {
    /// All presets, in menu order.
    pub const ALL: [SpectrumPreset; 5] = [
        SpectrumPreset::Saw,
        SpectrumPreset::Square,
        SpectrumPreset::Triangle,
        SpectrumPreset::Sine,
        SpectrumPreset::Organ,
    ];

    /// Look up a preset by its external name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Saw" => Some(SpectrumPreset::Saw),
            "Square" => Some(SpectrumPreset::Square),
            "Triangle" => Some(SpectrumPreset::Triangle),
            "Sine" => Some(SpectrumPreset::Sine),
            "Organ" => Some(SpectrumPreset::Organ),
            _ => None,
        }
    }

    /// The preset's external name.
    pub fn name(self) -> &'static str {
        match self {
            SpectrumPreset::Saw => "Saw",
            SpectrumPreset::Square => "Square",
            SpectrumPreset::Triangle => "Triangle",
            SpectrumPreset::Sine => "Sine",
            SpectrumPreset::Organ => "Organ",
        }
    }
}

/// A full harmonic spectrum: [`MAX_HARMONICS`] partials in harmonic order.
///
/// All setters bounds-check the harmonic index: writes with an out-of-range
/// index are silent no-ops, reads return a zero/disabled sentinel. Amplitude
/// writes through [`set_harmonic`](Self::set_harmonic) and
/// [`set_amplitude`](Self::set_amplitude) are clamped to [0, 1] and keep the
/// derived `enabled` flag consistent.
///
/// # Example
///
/// ```rust
/// use overtone_core::HarmonicSpectrum;
///
/// let mut spectrum = HarmonicSpectrum::new();
/// spectrum.set_amplitude(0, 1.0);
/// spectrum.set_amplitude(2, 0.5);
///
/// assert!(spectrum.harmonic(0).enabled);
/// assert!(!spectrum.harmonic(1).enabled);
/// assert_eq!(spectrum.amplitude(999), 0.0); // out of range -> sentinel
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicSpectrum {
    harmonics: [HarmonicData; MAX_HARMONICS],
}

impl Default for HarmonicSpectrum {
    fn default() -> Self {
        Self::new()
    }
}

impl HarmonicSpectrum {
    /// Create a cleared (silent) spectrum.
    pub fn new() -> Self {
        Self {
            harmonics: [HarmonicData::default(); MAX_HARMONICS],
        }
    }

    /// Set one partial's amplitude (clamped to [0, 1]) and phase.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_harmonic(&mut self, index: usize, amplitude: f32, phase: f32) {
        if let Some(h) = self.harmonics.get_mut(index) {
            h.amplitude = amplitude.clamp(0.0, 1.0);
            h.phase = phase;
            h.enabled = h.amplitude > MIN_AUDIBLE_AMPLITUDE;
        }
    }

    /// Set one partial's amplitude (clamped to [0, 1]), leaving phase alone.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_amplitude(&mut self, index: usize, amplitude: f32) {
        if let Some(h) = self.harmonics.get_mut(index) {
            h.amplitude = amplitude.clamp(0.0, 1.0);
            h.enabled = h.amplitude > MIN_AUDIBLE_AMPLITUDE;
        }
    }

    /// Get one partial, or a zero/disabled sentinel when out of range.
    pub fn harmonic(&self, index: usize) -> HarmonicData {
        self.harmonics.get(index).copied().unwrap_or_default()
    }

    /// Get one partial's amplitude, or 0.0 when out of range.
    pub fn amplitude(&self, index: usize) -> f32 {
        self.harmonics.get(index).map_or(0.0, |h| h.amplitude)
    }

    /// Whether one partial is audible; false when out of range.
    pub fn is_enabled(&self, index: usize) -> bool {
        self.harmonics.get(index).is_some_and(|h| h.enabled)
    }

    /// Read access to all partials in harmonic order.
    pub fn harmonics(&self) -> &[HarmonicData] {
        &self.harmonics
    }

    /// Blend this spectrum toward `target` in place.
    ///
    /// Every slot's amplitude and phase become
    /// `self * (1 - amount) + target * amount`, with `amount` clamped to
    /// [0, 1] first. This is a blend-toward operation, not a pure function —
    /// use [`MorphingEngine`](crate::MorphingEngine) for a non-destructive
    /// query.
    pub fn morph_to(&mut self, target: &HarmonicSpectrum, amount: f32) {
        let amount = amount.clamp(0.0, 1.0);
        for (h, t) in self.harmonics.iter_mut().zip(target.harmonics.iter()) {
            h.amplitude = h.amplitude * (1.0 - amount) + t.amplitude * amount;
            h.phase = h.phase * (1.0 - amount) + t.phase * amount;
            h.enabled = h.amplitude > MIN_AUDIBLE_AMPLITUDE;
        }
    }

    /// Replace this spectrum's contents with a copy of `other`.
    pub fn copy_from(&mut self, other: &HarmonicSpectrum) {
        self.harmonics = other.harmonics;
    }

    /// Silence every partial.
    pub fn clear(&mut self) {
        self.harmonics = [HarmonicData::default(); MAX_HARMONICS];
    }

    /// Load a preset by its external name.
    ///
    /// Unknown names clear the spectrum to silence — the lookup never fails.
    pub fn load_preset(&mut self, name: &str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(preset = name, "load_preset");

        match SpectrumPreset::from_name(name) {
            Some(preset) => self.apply_preset(preset),
            None => self.clear(),
        }
    }

    /// Fill the spectrum from a preset.
    ///
    /// Preset generation writes raw amplitudes (the Triangle series keeps
    /// its alternating signs, which the oscillator amplitude clamp silences
    /// downstream), then recomputes `enabled` for every slot.
    pub fn apply_preset(&mut self, preset: SpectrumPreset) {
        self.clear();

        match preset {
            SpectrumPreset::Saw => {
                for i in 0..PRESET_HARMONICS {
                    self.harmonics[i].amplitude = 1.0 / (i + 1) as f32;
                }
            }
            SpectrumPreset::Square => {
                for i in (0..PRESET_HARMONICS).step_by(2) {
                    self.harmonics[i].amplitude = 1.0 / (i + 1) as f32;
                }
            }
            SpectrumPreset::Triangle => {
                for i in (0..PRESET_HARMONICS).step_by(2) {
                    let n = (i + 1) as f32;
                    let amp = 1.0 / (n * n);
                    self.harmonics[i].amplitude = if i % 4 == 0 { amp } else { -amp };
                }
            }
            SpectrumPreset::Sine => {
                self.harmonics[0].amplitude = 1.0;
            }
            SpectrumPreset::Organ => {
                self.harmonics[0].amplitude = 1.0;
                self.harmonics[2].amplitude = 0.5;
                self.harmonics[4].amplitude = 0.3;
            }
        }

        for h in &mut self.harmonics {
            h.enabled = h.amplitude > MIN_AUDIBLE_AMPLITUDE;
        }
    }
}
