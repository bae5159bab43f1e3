//! ADSR envelope generator.
//!
//! A four-stage amplitude envelope with linear segments. Stage times are
//! given in seconds and converted to precomputed per-sample rates, which
//! are rebuilt whenever any time/level parameter or the sample rate
//! changes.

/// Envelope stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Envelope is inactive — output is forced to zero.
    #[default]
    Idle,
    /// Attack phase — output ramps up toward 1.0.
    Attack,
    /// Decay phase — output falls from 1.0 toward the sustain level.
    Decay,
    /// Sustain phase — output holds at the sustain level while the note is held.
    Sustain,
    /// Release phase — output ramps down to zero after note release.
    Release,
}

/// Shortest representable stage time in seconds.
///
/// Keeps the derived rates finite when a stage time of zero is requested.
const MIN_STAGE_SECS: f32 = 1e-4;

/// Linear ADSR envelope generator.
///
/// [`note_on`](Self::note_on) always restarts the attack from level 0 —
/// retriggering a releasing voice does not resume from the current level.
/// This is a deliberate policy, not an accident of implementation.
///
/// # Example
///
/// ```rust
/// use overtone_core::{AdsrEnvelope, EnvelopeState};
///
/// let mut env = AdsrEnvelope::new(44100.0);
/// env.set_attack(0.01);
/// env.set_decay(0.1);
/// env.set_sustain(0.7);
/// env.set_release(0.5);
///
/// env.note_on();
/// let level = env.advance();
/// assert!(level > 0.0);
///
/// env.note_off();
/// assert_eq!(env.state(), EnvelopeState::Release);
/// ```
#[derive(Debug, Clone)]
pub struct AdsrEnvelope {
    /// Current stage
    state: EnvelopeState,
    /// Current output level in [0, 1]
    level: f32,
    /// Sample rate in Hz
    sample_rate: f32,

    // Stage parameters
    attack_secs: f32,
    decay_secs: f32,
    sustain: f32,
    release_secs: f32,

    // Precomputed per-sample increments
    attack_rate: f32,
    decay_rate: f32,
    release_rate: f32,
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl AdsrEnvelope {
    /// Create a new envelope with default settings.
    ///
    /// Default values:
    /// - Attack: 10 ms
    /// - Decay: 100 ms
    /// - Sustain: 0.7
    /// - Release: 500 ms
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            state: EnvelopeState::Idle,
            level: 0.0,
            sample_rate,
            attack_secs: 0.01,
            decay_secs: 0.1,
            sustain: 0.7,
            release_secs: 0.5,
            attack_rate: 0.0,
            decay_rate: 0.0,
            release_rate: 0.0,
        };
        env.recalculate_rates();
        env
    }

    /// Set attack time in seconds.
    pub fn set_attack(&mut self, secs: f32) {
        self.attack_secs = secs.max(MIN_STAGE_SECS);
        self.recalculate_rates();
    }

    /// Get attack time in seconds.
    pub fn attack_secs(&self) -> f32 {
        self.attack_secs
    }

    /// Set decay time in seconds.
    pub fn set_decay(&mut self, secs: f32) {
        self.decay_secs = secs.max(MIN_STAGE_SECS);
        self.recalculate_rates();
    }

    /// Get decay time in seconds.
    pub fn decay_secs(&self) -> f32 {
        self.decay_secs
    }

    /// Set sustain level, clamped to [0, 1].
    ///
    /// The decay and release rates both depend on the sustain level, so
    /// they are rebuilt here as well.
    pub fn set_sustain(&mut self, level: f32) {
        self.sustain = level.clamp(0.0, 1.0);
        self.recalculate_rates();
    }

    /// Get sustain level.
    pub fn sustain(&self) -> f32 {
        self.sustain
    }

    /// Set release time in seconds.
    pub fn set_release(&mut self, secs: f32) {
        self.release_secs = secs.max(MIN_STAGE_SECS);
        self.recalculate_rates();
    }

    /// Get release time in seconds.
    pub fn release_secs(&self) -> f32 {
        self.release_secs
    }

    /// Set sample rate and rebuild the per-sample rates.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_rates();
    }

    /// Trigger the envelope (note on).
    ///
    /// Always restarts the attack from level 0, even when the envelope is
    /// mid-release.
    pub fn note_on(&mut self) {
        self.state = EnvelopeState::Attack;
        self.level = 0.0;
    }

    /// Release the envelope (note off).
    ///
    /// Forces the release stage from whatever stage is currently active.
    pub fn note_off(&mut self) {
        self.state = EnvelopeState::Release;
    }

    /// Force the envelope to idle, silencing it immediately.
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.level = 0.0;
    }

    /// Get the current stage.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Get the current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Check if the envelope is active (any stage except Idle).
    ///
    /// This is the liveness signal the voice pool uses to reclaim voices.
    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }

    /// Advance the envelope by one sample and return the current level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.state {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += self.attack_rate;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.state = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                self.level -= self.decay_rate;
                if self.level <= self.sustain {
                    self.level = self.sustain;
                    // A zero sustain level has nothing to hold: go idle so
                    // the voice pool can reclaim the voice without a
                    // note-off.
                    if self.sustain <= 0.0 {
                        self.state = EnvelopeState::Idle;
                    } else {
                        self.state = EnvelopeState::Sustain;
                    }
                }
            }

            EnvelopeState::Sustain => {
                // Re-forced every call so live sustain-level changes are
                // tracked immediately.
                self.level = self.sustain;
            }

            EnvelopeState::Release => {
                // The release rate scales with the sustain level; at
                // sustain 0 it degenerates to zero, which would hang the
                // stage forever — snap to idle instead.
                if self.release_rate <= 0.0 {
                    self.level = 0.0;
                    self.state = EnvelopeState::Idle;
                } else {
                    self.level -= self.release_rate;
                    if self.level <= 0.0 {
                        self.level = 0.0;
                        self.state = EnvelopeState::Idle;
                    }
                }
            }
        }

        self.level
    }

    fn recalculate_rates(&mut self) {
        let sr = self.sample_rate;
        self.attack_rate = 1.0 / (self.attack_secs * sr);
        self.decay_rate = (1.0 - self.sustain) / (self.decay_secs * sr);
        self.release_rate = self.sustain / (self.release_secs * sr);
    }
}
