//! Thread-safe shared state between the control plane and the audio thread.
//!
//! [`SynthShared`] is the atomic bridge. Spectrum snapshots are published
//! via `ArcSwap` for wait-free reads; scalar parameters live in `AtomicU32`
//! cells holding f32 bit patterns; note events flow through a
//! `Mutex<VecDeque>` drained by the audio thread with `try_lock` at the
//! start of each block.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use overtone_core::HarmonicSpectrum;

/// A note event queued from the control plane to the audio thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteCommand {
    /// Start a note.
    NoteOn {
        /// MIDI note number.
        note: u8,
        /// Velocity (0-127).
        velocity: u8,
    },
    /// Stop a note.
    NoteOff {
        /// MIDI note number.
        note: u8,
        /// Whether the release tail may play out.
        tail_off: bool,
    },
    /// Silence every voice immediately.
    AllNotesOff,
}

/// Inner storage behind `Arc` so `SynthShared` can be cheaply cloned.
struct SharedData {
    /// Latest published spectrum snapshot. The audio thread compares the
    /// `Arc` pointer against its last applied snapshot, so every store is
    /// observed at most once and always whole.
    spectrum: ArcSwap<HarmonicSpectrum>,

    /// Envelope parameters as f32 bit-cast to u32: attack, decay, sustain,
    /// release (times in seconds, sustain a level).
    envelope: [AtomicU32; 4],
    /// Set by the control plane after an envelope write; cleared by the
    /// audio thread when it folds the values in.
    envelope_dirty: AtomicBool,

    /// Master output gain as f32 bits.
    master_gain: AtomicU32,
    gain_dirty: AtomicBool,

    /// Pending note events from the control plane.
    commands: Mutex<VecDeque<NoteCommand>>,
}

/// Shared state handle, clonable into any thread.
///
/// # Thread Safety
///
/// - **Spectrum**: `ArcSwap::load()` — wait-free reads, whole-snapshot writes.
/// - **Scalar parameters**: `AtomicU32` — lock-free.
/// - **Note commands**: `Mutex` — control plane locks to push, audio thread
///   `try_lock`s to drain and skips (to the next block) when contended.
#[derive(Clone)]
pub struct SynthShared {
    inner: Arc<SharedData>,
}

impl Default for SynthShared {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthShared {
    /// Create shared state with the engine's defaults.
    ///
    /// The initial spectrum snapshot is the "Saw" preset, matching a
    /// freshly constructed [`AdditiveSynth`](overtone_synth::AdditiveSynth).
    pub fn new() -> Self {
        let mut spectrum = HarmonicSpectrum::new();
        spectrum.load_preset("Saw");

        Self {
            inner: Arc::new(SharedData {
                spectrum: ArcSwap::from_pointee(spectrum),
                envelope: [
                    AtomicU32::new(0.01f32.to_bits()),
                    AtomicU32::new(0.1f32.to_bits()),
                    AtomicU32::new(0.7f32.to_bits()),
                    AtomicU32::new(0.5f32.to_bits()),
                ],
                envelope_dirty: AtomicBool::new(false),
                master_gain: AtomicU32::new(0.5f32.to_bits()),
                gain_dirty: AtomicBool::new(false),
                commands: Mutex::new(VecDeque::new()),
            }),
        }
    }

    // ── Spectrum snapshots ───────────────────────────────────────────────

    /// Publish a new spectrum snapshot.
    ///
    /// Takes the spectrum by value: the published snapshot is immutable
    /// from this point on, and the audio thread adopts it at its next
    /// block boundary.
    pub fn set_spectrum(&self, spectrum: HarmonicSpectrum) {
        self.inner.spectrum.store(Arc::new(spectrum));
    }

    /// Load the latest published snapshot (wait-free).
    pub fn load_spectrum(&self) -> Arc<HarmonicSpectrum> {
        self.inner.spectrum.load_full()
    }

    // ── Scalar parameters (lock-free) ────────────────────────────────────

    /// Set the envelope parameters: times in seconds, sustain as a level.
    pub fn set_envelope_parameters(&self, attack: f32, decay: f32, sustain: f32, release: f32) {
        let values = [attack, decay, sustain, release];
        for (cell, value) in self.inner.envelope.iter().zip(values) {
            cell.store(value.to_bits(), Ordering::Release);
        }
        self.inner.envelope_dirty.store(true, Ordering::Release);
    }

    /// Read the envelope parameters as `[attack, decay, sustain, release]`.
    pub fn envelope_parameters(&self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (value, cell) in out.iter_mut().zip(self.inner.envelope.iter()) {
            *value = f32::from_bits(cell.load(Ordering::Acquire));
        }
        out
    }

    /// Take the envelope parameters if they changed since the last take.
    pub fn take_envelope_if_dirty(&self) -> Option<[f32; 4]> {
        if self.inner.envelope_dirty.swap(false, Ordering::AcqRel) {
            Some(self.envelope_parameters())
        } else {
            None
        }
    }

    /// Set the master output gain.
    pub fn set_master_gain(&self, gain: f32) {
        self.inner.master_gain.store(gain.to_bits(), Ordering::Release);
        self.inner.gain_dirty.store(true, Ordering::Release);
    }

    /// Read the master output gain.
    pub fn master_gain(&self) -> f32 {
        f32::from_bits(self.inner.master_gain.load(Ordering::Acquire))
    }

    /// Take the master gain if it changed since the last take.
    pub fn take_gain_if_dirty(&self) -> Option<f32> {
        if self.inner.gain_dirty.swap(false, Ordering::AcqRel) {
            Some(self.master_gain())
        } else {
            None
        }
    }

    // ── Note commands ────────────────────────────────────────────────────

    /// Queue a note-on.
    pub fn note_on(&self, note: u8, velocity: u8) {
        self.push_command(NoteCommand::NoteOn { note, velocity });
    }

    /// Queue a note-off.
    pub fn note_off(&self, note: u8, tail_off: bool) {
        self.push_command(NoteCommand::NoteOff { note, tail_off });
    }

    /// Queue an all-notes-off.
    pub fn all_notes_off(&self) {
        self.push_command(NoteCommand::AllNotesOff);
    }

    fn push_command(&self, command: NoteCommand) {
        self.inner.commands.lock().push_back(command);
    }

    /// Drain pending commands in order, applying each through `apply`.
    ///
    /// Non-blocking: returns `false` without draining when the queue lock
    /// is contended (the control plane is mid-push) — the commands stay
    /// queued for the next block. No allocation happens on this path.
    pub fn drain_commands<F: FnMut(NoteCommand)>(&self, mut apply: F) -> bool {
        match self.inner.commands.try_lock() {
            Some(mut queue) => {
                while let Some(command) = queue.pop_front() {
                    apply(command);
                }
                true
            }
            None => false,
        }
    }

    /// Number of commands waiting to be drained.
    ///
    /// Control-plane diagnostic; blocks on the queue lock.
    pub fn pending_commands(&self) -> usize {
        self.inner.commands.lock().len()
    }
}
