//! Complete additive synthesizer.
//!
//! [`AdditiveSynth`] is the host-facing facade: a voice pool, the global
//! editable spectrum, and a morphing engine, wired so that spectrum edits
//! and morph changes reach sounding voices immediately.

use crate::voice::{Voice, VoicePool, VoiceStealMode};
use overtone_core::{HarmonicSpectrum, MorphingEngine};

/// A polyphonic additive synthesizer with a configurable voice count.
///
/// The synth owns one [`HarmonicSpectrum`] as the live timbre. Every
/// spectrum change — an edit, a preset load, or a morph update — is pushed
/// into all voices, so sounding notes track the new timbre without
/// retriggering.
///
/// # Example
///
/// ```rust
/// use overtone_synth::AdditiveSynth;
///
/// let mut synth: AdditiveSynth<8> = AdditiveSynth::new(44100.0);
///
/// synth.load_preset("Saw");
/// synth.set_envelope_parameters(0.01, 0.1, 0.7, 0.5);
///
/// synth.note_on(60, 100);
/// synth.note_on(64, 100);
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// let mut channels = [&mut left[..], &mut right[..]];
/// synth.render_block(&mut channels, 0, 256);
///
/// synth.note_off(60, true);
/// ```
#[derive(Debug)]
pub struct AdditiveSynth<const VOICES: usize> {
    /// Voice pool
    voices: VoicePool<VOICES>,
    /// The live, editable spectrum
    spectrum: HarmonicSpectrum,
    /// Morphing engine (blends on the control path, never per sample)
    morph: MorphingEngine,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl<const VOICES: usize> AdditiveSynth<VOICES> {
    /// Create a new synthesizer.
    ///
    /// Starts with the "Saw" preset loaded into the live spectrum.
    pub fn new(sample_rate: f32) -> Self {
        let mut spectrum = HarmonicSpectrum::new();
        spectrum.load_preset("Saw");

        let mut synth = Self {
            voices: VoicePool::new(sample_rate),
            spectrum,
            morph: MorphingEngine::new(),
            sample_rate,
        };
        synth.push_spectrum_to_voices();
        synth
    }

    /// Set sample rate for every voice.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.voices.set_sample_rate(sample_rate);
    }

    /// Get the sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Set the voice steal policy.
    pub fn set_steal_mode(&mut self, mode: VoiceStealMode) {
        self.voices.set_steal_mode(mode);
    }

    /// Start a note.
    pub fn note_on(&mut self, note: u8, velocity: u8) {
        self.voices.note_on(note, velocity);
    }

    /// Stop a note, gracefully (release tail) or immediately.
    pub fn note_off(&mut self, note: u8, allow_tail_off: bool) {
        self.voices.note_off(note, allow_tail_off);
    }

    /// Silence every voice immediately.
    pub fn all_notes_off(&mut self) {
        self.voices.all_notes_off();
    }

    /// Count voices currently rendering.
    pub fn active_voice_count(&self) -> usize {
        self.voices.active_voice_count()
    }

    /// Read access to the live spectrum.
    pub fn spectrum(&self) -> &HarmonicSpectrum {
        &self.spectrum
    }

    /// Replace the live spectrum and push it to all voices.
    pub fn set_spectrum(&mut self, spectrum: &HarmonicSpectrum) {
        self.spectrum.copy_from(spectrum);
        self.push_spectrum_to_voices();
    }

    /// Load a named preset into the live spectrum.
    ///
    /// Unknown names silence the spectrum — the call never fails.
    pub fn load_preset(&mut self, name: &str) {
        self.spectrum.load_preset(name);
        self.push_spectrum_to_voices();
    }

    /// Set attack/decay/release times (seconds) and sustain level on every voice.
    pub fn set_envelope_parameters(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        for voice in self.voices.voices_mut() {
            voice.set_envelope(attack, decay, sustain, release);
        }
    }

    /// Set the output gain on every voice's bank.
    pub fn set_master_gain(&mut self, gain: f32) {
        for voice in self.voices.voices_mut() {
            voice.set_gain(gain);
        }
    }

    /// Set the morph source spectrum.
    pub fn set_morph_source(&mut self, spectrum: &HarmonicSpectrum) {
        self.morph.set_source(spectrum);
    }

    /// Set the morph target spectrum.
    pub fn set_morph_target(&mut self, spectrum: &HarmonicSpectrum) {
        self.morph.set_target(spectrum);
    }

    /// Capture the live spectrum as the morph source.
    pub fn capture_morph_source(&mut self) {
        let current = self.spectrum.clone();
        self.morph.set_source(&current);
    }

    /// Capture the live spectrum as the morph target.
    pub fn capture_morph_target(&mut self) {
        let current = self.spectrum.clone();
        self.morph.set_target(&current);
    }

    /// Set the morph amount and apply the blended spectrum as the live one.
    pub fn set_morph_amount(&mut self, amount: f32) {
        self.morph.set_morph_amount(amount);
        let blended = self.morph.current_state();
        self.set_spectrum(&blended);
    }

    /// Read access to the morphing engine.
    pub fn morphing_engine(&self) -> &MorphingEngine {
        &self.morph
    }

    /// Read access to all voices.
    pub fn voices(&self) -> &[Voice; VOICES] {
        self.voices.voices()
    }

    /// Mutable access to all voices.
    pub fn voices_mut(&mut self) -> &mut [Voice; VOICES] {
        self.voices.voices_mut()
    }

    /// Sum one sample from every active voice.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.voices.process()
    }

    /// Render a block into a caller-owned multi-channel buffer.
    ///
    /// The target region (`start_sample .. start_sample + num_samples` in
    /// every channel) is cleared first, then every active voice accumulates
    /// into it. Infallible: the render path has no error channel.
    pub fn render_block(
        &mut self,
        channels: &mut [&mut [f32]],
        start_sample: usize,
        num_samples: usize,
    ) {
        for channel in channels.iter_mut() {
            for sample in &mut channel[start_sample..start_sample + num_samples] {
                *sample = 0.0;
            }
        }
        self.voices.render_block(channels, start_sample, num_samples);
    }

    fn push_spectrum_to_voices(&mut self) {
        for voice in self.voices.voices_mut() {
            voice.apply_spectrum(&self.spectrum);
        }
    }
}
