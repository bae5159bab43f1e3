//! Audio-thread side of the engine bridge.
//!
//! [`AudioRenderer`] owns the synthesizer and is the only thing that
//! touches it once rendering starts. All control input arrives through
//! [`SynthShared`] and is folded in at block boundaries.

use std::sync::Arc;

use overtone_core::HarmonicSpectrum;
use overtone_synth::AdditiveSynth;

use crate::shared::{NoteCommand, SynthShared};

/// Owns an [`AdditiveSynth`] on the audio thread and feeds it from shared
/// control state.
///
/// Every [`process_block`](Self::process_block) call first ingests pending
/// control changes — a new spectrum snapshot (adopted whole, by `Arc`
/// pointer comparison), dirty scalar parameters, queued note events — and
/// then renders. The ingest step never blocks: a contended command queue
/// is simply retried at the next block.
pub struct AudioRenderer<const VOICES: usize> {
    shared: SynthShared,
    synth: AdditiveSynth<VOICES>,
    /// The snapshot currently applied to the synth. Compared by pointer
    /// against the published snapshot to detect changes cheaply.
    current_spectrum: Arc<HarmonicSpectrum>,
}

impl<const VOICES: usize> AudioRenderer<VOICES> {
    /// Create a renderer bound to the given shared state.
    ///
    /// The published spectrum snapshot and parameters are applied
    /// immediately so the first block renders the control plane's state.
    pub fn new(shared: SynthShared, sample_rate: f32) -> Self {
        let mut synth = AdditiveSynth::new(sample_rate);

        let current_spectrum = shared.load_spectrum();
        synth.set_spectrum(&current_spectrum);

        let [attack, decay, sustain, release] = shared.envelope_parameters();
        synth.set_envelope_parameters(attack, decay, sustain, release);
        synth.set_master_gain(shared.master_gain());

        Self {
            shared,
            synth,
            current_spectrum,
        }
    }

    /// Set the sample rate on the owned synth.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.synth.set_sample_rate(sample_rate);
    }

    /// Render one block into a caller-owned multi-channel buffer.
    ///
    /// Ingests control-plane changes first, then overwrites the target
    /// region with the mixed voices. Real-time safe: no locks are held
    /// across rendering, no allocation, no I/O.
    pub fn process_block(
        &mut self,
        channels: &mut [&mut [f32]],
        start_sample: usize,
        num_samples: usize,
    ) {
        self.ingest_control_state();
        self.synth.render_block(channels, start_sample, num_samples);
    }

    /// Read access to the owned synth.
    pub fn synth(&self) -> &AdditiveSynth<VOICES> {
        &self.synth
    }

    /// Count voices currently rendering.
    pub fn active_voice_count(&self) -> usize {
        self.synth.active_voice_count()
    }

    /// Fold pending control changes into the synth. Block-boundary only.
    fn ingest_control_state(&mut self) {
        // Spectrum snapshot: adopt when the published pointer moved
        let snapshot = self.shared.load_spectrum();
        if !Arc::ptr_eq(&snapshot, &self.current_spectrum) {
            tracing::trace!("adopting new spectrum snapshot");
            self.synth.set_spectrum(&snapshot);
            self.current_spectrum = snapshot;
        }

        if let Some([attack, decay, sustain, release]) = self.shared.take_envelope_if_dirty() {
            tracing::trace!(attack, decay, sustain, release, "envelope update");
            self.synth
                .set_envelope_parameters(attack, decay, sustain, release);
        }

        if let Some(gain) = self.shared.take_gain_if_dirty() {
            self.synth.set_master_gain(gain);
        }

        let synth = &mut self.synth;
        self.shared.drain_commands(|command| match command {
            NoteCommand::NoteOn { note, velocity } => synth.note_on(note, velocity),
            NoteCommand::NoteOff { note, tail_off } => synth.note_off(note, tail_off),
            NoteCommand::AllNotesOff => synth.all_notes_off(),
        });
    }
}
