//! Voice management for polyphonic additive synthesis.
//!
//! Provides the single-note [`Voice`] (oscillator bank + envelope), the
//! fixed-size [`VoicePool`] with allocation and stealing, and MIDI note
//! conversion helpers.

use overtone_core::{AdsrEnvelope, HarmonicOscillatorBank, HarmonicSpectrum};

/// Default voice pool size.
pub const MAX_VOICES: usize = 16;

/// Steal policies used when every voice in the pool is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoiceStealMode {
    /// Steal the voice that has been sounding the longest (default)
    #[default]
    OldestNote,
    /// Cycle through voices in order
    RoundRobin,
    /// Steal the lowest pitch voice
    LowestNote,
    /// Steal the highest pitch voice
    HighestNote,
}

/// A single synthesizer voice.
///
/// Pairs one [`HarmonicOscillatorBank`] with one [`AdsrEnvelope`] and the
/// velocity captured at note-on. Voices are created once, owned by the
/// pool for their entire lifetime, and reset between notes — never
/// allocated per note.
///
/// # Example
///
/// ```rust
/// use overtone_synth::Voice;
///
/// let mut voice = Voice::new(44100.0);
/// voice.note_on(60, 100); // Middle C
/// assert!(voice.is_active());
///
/// let mut left = vec![0.0f32; 256];
/// let mut channels = [&mut left[..]];
/// voice.render_block(&mut channels, 0, 256);
///
/// voice.note_off(true);
/// ```
#[derive(Debug, Clone)]
pub struct Voice {
    /// Oscillator bank for this voice's partials
    bank: HarmonicOscillatorBank,
    /// Amplitude envelope
    envelope: AdsrEnvelope,
    /// Current MIDI note number
    note: u8,
    /// Velocity captured at note-on (0-127)
    velocity: u8,
    /// Voice age (for steal ordering)
    age: u64,
}

impl Default for Voice {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl Voice {
    /// Create a new idle voice at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            bank: HarmonicOscillatorBank::new(sample_rate),
            envelope: AdsrEnvelope::new(sample_rate),
            note: 0,
            velocity: 0,
            age: 0,
        }
    }

    /// Set sample rate on the bank and the envelope.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.bank.set_sample_rate(sample_rate);
        self.envelope.set_sample_rate(sample_rate);
    }

    /// Start a note.
    ///
    /// Converts the MIDI note to a fundamental frequency, retunes the bank,
    /// and gates the envelope. The envelope always restarts its attack from
    /// level 0 — retriggering a releasing voice does not resume mid-level.
    /// Oscillator phases are left running; call [`reset`](Self::reset) for
    /// a clean phase start.
    pub fn note_on(&mut self, note: u8, velocity: u8) {
        self.note = note;
        self.velocity = velocity;
        self.bank.set_fundamental(midi_to_freq(note));
        self.envelope.note_on();
    }

    /// Stop the note.
    ///
    /// With `allow_tail_off` the envelope enters its release stage and the
    /// voice stays active until the tail reaches zero. Without it the voice
    /// is silenced and freed immediately.
    pub fn note_off(&mut self, allow_tail_off: bool) {
        if allow_tail_off {
            self.envelope.note_off();
        } else {
            self.kill();
        }
    }

    /// Silence the voice immediately, making it reclaimable.
    pub fn kill(&mut self) {
        self.envelope.reset();
    }

    /// Reset the voice to its initial state, including oscillator phases.
    pub fn reset(&mut self) {
        self.kill();
        self.bank.reset();
        self.note = 0;
        self.velocity = 0;
        self.age = 0;
    }

    /// Check if the voice is rendering a note.
    ///
    /// Liveness is the envelope's: a voice is free exactly when its
    /// envelope has gone idle.
    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    /// Get the current note number.
    pub fn note(&self) -> u8 {
        self.note
    }

    /// Get the captured velocity.
    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    /// Get voice age.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Set voice age.
    pub fn set_age(&mut self, age: u64) {
        self.age = age;
    }

    /// Push a new harmonic spectrum into the bank.
    ///
    /// Called whenever the global spectrum changes, independent of note
    /// timing — sounding notes pick up the new timbre immediately.
    pub fn apply_spectrum(&mut self, spectrum: &HarmonicSpectrum) {
        self.bank.apply_spectrum(spectrum);
    }

    /// Set all four envelope parameters, in seconds (sustain is a level).
    pub fn set_envelope(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.envelope.set_attack(attack);
        self.envelope.set_decay(decay);
        self.envelope.set_sustain(sustain);
        self.envelope.set_release(release);
    }

    /// Set the bank's output gain.
    pub fn set_gain(&mut self, gain: f32) {
        self.bank.set_gain(gain);
    }

    /// Read access to the envelope.
    pub fn envelope(&self) -> &AdsrEnvelope {
        &self.envelope
    }

    /// Read access to the oscillator bank.
    pub fn bank(&self) -> &HarmonicOscillatorBank {
        &self.bank
    }

    /// Produce one sample: `bank * envelope * velocity`.
    ///
    /// Returns 0.0 without advancing any state when the voice is idle.
    #[inline]
    pub fn process(&mut self) -> f32 {
        if !self.envelope.is_active() {
            return 0.0;
        }
        let env_level = self.envelope.advance();
        self.bank.advance() * env_level * (f32::from(self.velocity) / 127.0)
    }

    /// Render `num_samples` samples, adding into every output channel.
    ///
    /// `channels` is a caller-owned multi-channel buffer; samples are
    /// accumulated starting at `start_sample`. Rendering stops early when
    /// the envelope goes idle mid-block (the voice has finished its tail).
    pub fn render_block(
        &mut self,
        channels: &mut [&mut [f32]],
        start_sample: usize,
        num_samples: usize,
    ) {
        for i in 0..num_samples {
            if !self.envelope.is_active() {
                break;
            }
            let sample = self.process();
            for channel in channels.iter_mut() {
                channel[start_sample + i] += sample;
            }
        }
    }
}

/// Fixed pool of voices with allocation and stealing.
///
/// All voices are concrete [`Voice`]s that can play any note — there is no
/// per-sound filtering and no polymorphic voice lookup. The pool owns its
/// voices for their entire lifetime.
///
/// # Example
///
/// ```rust
/// use overtone_synth::{VoicePool, VoiceStealMode};
///
/// let mut pool: VoicePool<8> = VoicePool::new(44100.0);
/// pool.set_steal_mode(VoiceStealMode::OldestNote);
///
/// pool.note_on(60, 100);
/// pool.note_on(64, 100);
/// assert_eq!(pool.active_voice_count(), 2);
///
/// pool.note_off(60, true);
/// ```
#[derive(Debug)]
pub struct VoicePool<const N: usize> {
    voices: [Voice; N],
    steal_mode: VoiceStealMode,
    /// Global voice age counter
    age_counter: u64,
    /// Round-robin steal index
    round_robin_idx: usize,
}

impl<const N: usize> VoicePool<N> {
    /// Create a pool of `N` idle voices.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: core::array::from_fn(|_| Voice::new(sample_rate)),
            steal_mode: VoiceStealMode::default(),
            age_counter: 0,
            round_robin_idx: 0,
        }
    }

    /// Set sample rate for all voices.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        for voice in &mut self.voices {
            voice.set_sample_rate(sample_rate);
        }
    }

    /// Set the voice steal policy.
    pub fn set_steal_mode(&mut self, mode: VoiceStealMode) {
        self.steal_mode = mode;
    }

    /// Get the current steal policy.
    pub fn steal_mode(&self) -> VoiceStealMode {
        self.steal_mode
    }

    /// Get the pool size.
    pub fn voice_count(&self) -> usize {
        N
    }

    /// Count voices currently rendering.
    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Read access to all voices.
    pub fn voices(&self) -> &[Voice; N] {
        &self.voices
    }

    /// Mutable access to all voices (for pushing shared parameters).
    pub fn voices_mut(&mut self) -> &mut [Voice; N] {
        &mut self.voices
    }

    /// Start a note on a free voice, stealing one if the pool is full.
    pub fn note_on(&mut self, note: u8, velocity: u8) {
        let idx = self.allocate_voice();
        self.age_counter += 1;
        self.voices[idx].set_age(self.age_counter);
        self.voices[idx].note_on(note, velocity);
    }

    /// Stop the active voice playing `note`, if any.
    pub fn note_off(&mut self, note: u8, allow_tail_off: bool) {
        for voice in &mut self.voices {
            if voice.is_active() && voice.note() == note {
                voice.note_off(allow_tail_off);
                return;
            }
        }
    }

    /// Silence every voice immediately.
    pub fn all_notes_off(&mut self) {
        for voice in &mut self.voices {
            voice.kill();
        }
    }

    /// Reset every voice and the allocation state.
    pub fn reset(&mut self) {
        for voice in &mut self.voices {
            voice.reset();
        }
        self.age_counter = 0;
        self.round_robin_idx = 0;
    }

    /// Accumulate every active voice into the output buffer.
    pub fn render_block(
        &mut self,
        channels: &mut [&mut [f32]],
        start_sample: usize,
        num_samples: usize,
    ) {
        for voice in &mut self.voices {
            if voice.is_active() {
                voice.render_block(channels, start_sample, num_samples);
            }
        }
    }

    /// Sum one sample from every active voice.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let mut output = 0.0;
        for voice in &mut self.voices {
            output += voice.process();
        }
        output
    }

    fn allocate_voice(&mut self) -> usize {
        // First, try to find a free voice
        for (i, voice) in self.voices.iter().enumerate() {
            if !voice.is_active() {
                return i;
            }
        }

        // All voices are active: steal one per policy
        match self.steal_mode {
            VoiceStealMode::RoundRobin => {
                let idx = self.round_robin_idx;
                self.round_robin_idx = (self.round_robin_idx + 1) % N;
                idx
            }
            VoiceStealMode::OldestNote => self
                .voices
                .iter()
                .enumerate()
                .min_by_key(|(_, v)| v.age())
                .map(|(i, _)| i)
                .unwrap_or(0),
            VoiceStealMode::LowestNote => self
                .voices
                .iter()
                .enumerate()
                .min_by_key(|(_, v)| v.note())
                .map(|(i, _)| i)
                .unwrap_or(0),
            VoiceStealMode::HighestNote => self
                .voices
                .iter()
                .enumerate()
                .max_by_key(|(_, v)| v.note())
                .map(|(i, _)| i)
                .unwrap_or(0),
        }
    }
}

/// Convert MIDI note number to frequency in Hz.
///
/// Uses standard tuning: A4 (note 69) = 440 Hz.
#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * libm::powf(2.0, (f32::from(note) - 69.0) / 12.0)
}

/// Convert frequency in Hz to MIDI note number.
#[inline]
pub fn freq_to_midi(freq: f32) -> f32 {
    69.0 + 12.0 * libm::log2f(freq / 440.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overtone_core::EnvelopeState;

    fn saw_spectrum() -> HarmonicSpectrum {
        let mut s = HarmonicSpectrum::new();
        s.load_preset("Saw");
        s
    }

    #[test]
    fn test_midi_to_freq_a4() {
        let freq = midi_to_freq(69);
        assert!((freq - 440.0).abs() < 0.01, "A4 should be 440 Hz, got {}", freq);
    }

    #[test]
    fn test_midi_to_freq_middle_c() {
        let freq = midi_to_freq(60);
        assert!(
            (freq - 261.63).abs() < 0.1,
            "C4 should be ~261.63 Hz, got {}",
            freq
        );
    }

    #[test]
    fn test_freq_to_midi_round_trip() {
        for note in [21u8, 60, 69, 108] {
            let back = freq_to_midi(midi_to_freq(note));
            assert!(
                (back - f32::from(note)).abs() < 0.01,
                "note {} round-tripped to {}",
                note,
                back
            );
        }
    }

    #[test]
    fn voice_note_on_off_lifecycle() {
        let mut voice = Voice::new(44100.0);
        assert!(!voice.is_active());

        voice.note_on(60, 100);
        assert!(voice.is_active());
        assert_eq!(voice.note(), 60);
        assert_eq!(voice.velocity(), 100);
        assert!((voice.bank().fundamental() - 261.63).abs() < 0.1);

        // Hard stop frees the voice immediately
        voice.note_off(false);
        assert!(!voice.is_active());
    }

    #[test]
    fn voice_tail_off_keeps_voice_active_until_release_ends() {
        let mut voice = Voice::new(44100.0);
        voice.set_envelope(0.001, 0.001, 0.7, 0.01);
        voice.apply_spectrum(&saw_spectrum());
        voice.note_on(69, 100);
        for _ in 0..500 {
            voice.process();
        }

        voice.note_off(true);
        assert!(voice.is_active(), "voice must stay active during release");

        for _ in 0..44100 {
            voice.process();
            if !voice.is_active() {
                break;
            }
        }
        assert!(!voice.is_active(), "release tail must end");
    }

    #[test]
    fn voice_produces_output() {
        let mut voice = Voice::new(44100.0);
        voice.apply_spectrum(&saw_spectrum());
        voice.note_on(69, 100);

        let mut sum = 0.0;
        for _ in 0..1000 {
            sum += voice.process().abs();
        }
        assert!(sum > 0.0, "voice should produce output");
    }

    #[test]
    fn voice_velocity_scales_output() {
        let mut loud = Voice::new(44100.0);
        loud.apply_spectrum(&saw_spectrum());
        loud.note_on(69, 127);

        let mut quiet = Voice::new(44100.0);
        quiet.apply_spectrum(&saw_spectrum());
        quiet.note_on(69, 32);

        let mut loud_sum = 0.0;
        let mut quiet_sum = 0.0;
        for _ in 0..2000 {
            loud_sum += loud.process().abs();
            quiet_sum += quiet.process().abs();
        }
        assert!(loud_sum > quiet_sum * 2.0, "velocity must scale output");
    }

    #[test]
    fn voice_sustain_zero_frees_itself() {
        let mut voice = Voice::new(44100.0);
        voice.set_envelope(0.001, 0.001, 0.0, 0.01);
        voice.apply_spectrum(&saw_spectrum());
        voice.note_on(60, 100);

        // No note-off: decay-to-sustain-zero must reclaim the voice
        for _ in 0..1000 {
            voice.process();
            if !voice.is_active() {
                break;
            }
        }
        assert!(!voice.is_active(), "sustain-zero voice must free itself");
    }

    #[test]
    fn voice_render_block_accumulates_all_channels() {
        let mut voice = Voice::new(44100.0);
        voice.apply_spectrum(&saw_spectrum());
        voice.note_on(69, 127);

        let mut left = vec![1.0f32; 64];
        let mut right = vec![1.0f32; 64];
        {
            let mut channels = [&mut left[..], &mut right[..]];
            voice.render_block(&mut channels, 0, 64);
        }

        // Both channels got the same contribution, added to existing content
        for i in 0..64 {
            assert_eq!(left[i], right[i]);
        }
        assert!(left.iter().any(|&s| (s - 1.0).abs() > 1e-6));
    }

    #[test]
    fn voice_render_block_honors_start_offset() {
        let mut voice = Voice::new(44100.0);
        voice.apply_spectrum(&saw_spectrum());
        voice.note_on(69, 127);

        let mut buffer = vec![0.0f32; 128];
        {
            let mut channels = [&mut buffer[..]];
            voice.render_block(&mut channels, 64, 64);
        }

        assert!(buffer[..64].iter().all(|&s| s == 0.0));
        assert!(buffer[64..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn voice_retrigger_restarts_attack() {
        let mut voice = Voice::new(44100.0);
        voice.set_envelope(0.1, 0.1, 0.7, 0.5);
        voice.note_on(60, 100);
        for _ in 0..2000 {
            voice.process();
        }
        assert!(voice.envelope().level() > 0.0);

        voice.note_on(72, 100);
        assert_eq!(voice.envelope().level(), 0.0);
        assert_eq!(voice.envelope().state(), EnvelopeState::Attack);
        assert_eq!(voice.note(), 72);
    }

    #[test]
    fn pool_allocates_free_voices() {
        let mut pool: VoicePool<4> = VoicePool::new(44100.0);

        pool.note_on(60, 100);
        pool.note_on(64, 100);
        pool.note_on(67, 100);
        pool.note_on(72, 100);
        assert_eq!(pool.active_voice_count(), 4);

        // A fifth note steals instead of growing
        pool.note_on(76, 100);
        assert_eq!(pool.active_voice_count(), 4);
    }

    #[test]
    fn pool_steals_oldest_note_by_default() {
        let mut pool: VoicePool<2> = VoicePool::new(44100.0);
        assert_eq!(pool.steal_mode(), VoiceStealMode::OldestNote);

        pool.note_on(60, 100);
        pool.note_on(64, 100);
        pool.note_on(67, 100); // steals the voice playing 60

        let has_64 = pool.voices().iter().any(|v| v.is_active() && v.note() == 64);
        let has_60 = pool.voices().iter().any(|v| v.is_active() && v.note() == 60);
        assert!(has_64, "note 64 should still be playing");
        assert!(!has_60, "note 60 should have been stolen");
    }

    #[test]
    fn pool_steals_lowest_note() {
        let mut pool: VoicePool<2> = VoicePool::new(44100.0);
        pool.set_steal_mode(VoiceStealMode::LowestNote);

        pool.note_on(72, 100);
        pool.note_on(48, 100);
        pool.note_on(60, 100); // steals the voice playing 48

        let has_48 = pool.voices().iter().any(|v| v.is_active() && v.note() == 48);
        assert!(!has_48, "lowest note should have been stolen");
    }

    #[test]
    fn pool_routes_note_off_to_matching_voice() {
        let mut pool: VoicePool<4> = VoicePool::new(44100.0);

        pool.note_on(60, 100);
        pool.note_on(64, 100);
        pool.note_off(60, false); // hard stop

        assert_eq!(pool.active_voice_count(), 1);
        let playing = pool
            .voices()
            .iter()
            .find(|v| v.is_active())
            .map(|v| v.note());
        assert_eq!(playing, Some(64));
    }

    #[test]
    fn pool_note_off_for_silent_note_is_noop() {
        let mut pool: VoicePool<4> = VoicePool::new(44100.0);
        pool.note_on(60, 100);
        pool.note_off(99, true);
        assert_eq!(pool.active_voice_count(), 1);
    }

    #[test]
    fn pool_all_notes_off_silences_everything() {
        let mut pool: VoicePool<4> = VoicePool::new(44100.0);
        pool.note_on(60, 100);
        pool.note_on(64, 100);
        pool.note_on(67, 100);

        pool.all_notes_off();
        assert_eq!(pool.active_voice_count(), 0);
    }

    #[test]
    fn pool_render_block_mixes_voices() {
        let mut pool: VoicePool<4> = VoicePool::new(44100.0);
        let spectrum = saw_spectrum();
        for voice in pool.voices_mut() {
            voice.apply_spectrum(&spectrum);
        }

        pool.note_on(60, 100);
        pool.note_on(67, 100);

        let mut buffer = vec![0.0f32; 256];
        {
            let mut channels = [&mut buffer[..]];
            pool.render_block(&mut channels, 0, 256);
        }
        assert!(buffer.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn pool_reclaims_released_voices() {
        let mut pool: VoicePool<2> = VoicePool::new(44100.0);
        let spectrum = saw_spectrum();
        for voice in pool.voices_mut() {
            voice.apply_spectrum(&spectrum);
            voice.set_envelope(0.001, 0.001, 0.5, 0.001);
        }

        pool.note_on(60, 100);
        pool.note_on(64, 100);
        pool.note_off(60, true);

        // Run out the release tail
        let mut buffer = vec![0.0f32; 4410];
        {
            let mut channels = [&mut buffer[..]];
            pool.render_block(&mut channels, 0, 4410);
        }
        assert_eq!(pool.active_voice_count(), 1);

        // The freed voice is reused without stealing the sounding one
        pool.note_on(72, 100);
        let has_64 = pool.voices().iter().any(|v| v.is_active() && v.note() == 64);
        assert!(has_64);
        assert_eq!(pool.active_voice_count(), 2);
    }
}
