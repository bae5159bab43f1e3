//! Single-partial sine oscillator.
//!
//! The smallest generation unit: one sine wave with a cached phase
//! increment. [`HarmonicOscillatorBank`](crate::HarmonicOscillatorBank)
//! owns one of these per harmonic slot.

use core::f32::consts::TAU;

use libm::sinf;

use crate::MIN_AUDIBLE_AMPLITUDE;

/// A sine oscillator with phase accumulation.
///
/// The phase increment is a derived value, recomputed whenever the
/// frequency or sample rate changes — never per sample.
///
/// # Example
///
/// ```rust
/// use overtone_core::SineOscillator;
///
/// let mut osc = SineOscillator::new(48000.0);
/// osc.set_frequency(440.0);
/// osc.set_amplitude(1.0);
///
/// let sample = osc.advance();
/// ```
#[derive(Debug, Clone)]
pub struct SineOscillator {
    /// Sample rate in Hz
    sample_rate: f32,
    /// Frequency in Hz
    frequency: f32,
    /// Amplitude in [0, 1]
    amplitude: f32,
    /// Current phase in radians, kept in [0, 2π)
    phase: f32,
    /// Phase increment per sample (cached)
    phase_inc: f32,
}

impl Default for SineOscillator {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl SineOscillator {
    /// Create a new oscillator at the given sample rate.
    ///
    /// Starts at 440 Hz with zero amplitude.
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            sample_rate,
            frequency: 440.0,
            amplitude: 0.0,
            phase: 0.0,
            phase_inc: 0.0,
        };
        osc.recalculate_phase_inc();
        osc
    }

    /// Set sample rate and recalculate the phase increment.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_phase_inc();
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Set frequency in Hz and recalculate the phase increment.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz;
        self.recalculate_phase_inc();
    }

    /// Get current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set amplitude, clamped to [0, 1].
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude.clamp(0.0, 1.0);
    }

    /// Get current amplitude.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Get current phase in radians.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Generate the next sample and advance the phase.
    ///
    /// Inaudible partials (`amplitude < 0.001`) short-circuit to 0.0
    /// without advancing the phase. This is a best-effort efficiency path:
    /// a bank of 128 partials usually has most slots silent, and skipping
    /// the `sin` call there dominates the per-sample cost. Phase continuity
    /// across a silent-to-audible transition is not guaranteed.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.amplitude < MIN_AUDIBLE_AMPLITUDE {
            return 0.0;
        }

        let sample = self.amplitude * sinf(self.phase);
        self.phase += self.phase_inc;

        // Single subtraction instead of a full modulo: the increment is
        // small relative to 2π for audible frequencies.
        if self.phase >= TAU {
            self.phase -= TAU;
        }

        sample
    }

    fn recalculate_phase_inc(&mut self) {
        self.phase_inc = TAU * self.frequency / self.sample_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_oscillator_outputs_zero_and_holds_phase() {
        let mut osc = SineOscillator::new(48000.0);
        osc.set_frequency(440.0);
        // Default amplitude is 0 — below the audibility threshold
        for _ in 0..100 {
            assert_eq!(osc.advance(), 0.0);
        }
        assert_eq!(osc.phase(), 0.0);
    }

    #[test]
    fn amplitude_is_clamped() {
        let mut osc = SineOscillator::new(48000.0);
        osc.set_amplitude(2.0);
        assert_eq!(osc.amplitude(), 1.0);
        osc.set_amplitude(-1.0);
        assert_eq!(osc.amplitude(), 0.0);
    }

    #[test]
    fn output_stays_in_amplitude_range() {
        let mut osc = SineOscillator::new(48000.0);
        osc.set_frequency(440.0);
        osc.set_amplitude(0.5);

        for _ in 0..10000 {
            let sample = osc.advance();
            assert!(
                (-0.5..=0.5).contains(&sample),
                "sample out of range: {}",
                sample
            );
        }
    }

    #[test]
    fn phase_wraps_below_two_pi() {
        let mut osc = SineOscillator::new(48000.0);
        osc.set_frequency(1000.0);
        osc.set_amplitude(1.0);

        for _ in 0..48000 {
            osc.advance();
            assert!(osc.phase() < TAU, "phase not wrapped: {}", osc.phase());
            assert!(osc.phase() >= 0.0);
        }
    }

    #[test]
    fn frequency_440hz_zero_crossings() {
        let mut osc = SineOscillator::new(48000.0);
        osc.set_frequency(440.0);
        osc.set_amplitude(1.0);

        let mut zero_crossings: i32 = 0;
        let mut prev = 0.0;
        for _ in 0..48000 {
            let sample = osc.advance();
            if prev <= 0.0 && sample > 0.0 {
                zero_crossings += 1;
            }
            prev = sample;
        }

        assert!(
            (zero_crossings - 440).abs() <= 2,
            "expected ~440 zero crossings, got {}",
            zero_crossings
        );
    }

    #[test]
    fn reset_zeroes_phase() {
        let mut osc = SineOscillator::new(48000.0);
        osc.set_frequency(440.0);
        osc.set_amplitude(1.0);

        for _ in 0..100 {
            osc.advance();
        }
        assert!(osc.phase() > 0.0);

        osc.reset();
        assert_eq!(osc.phase(), 0.0);
    }

    #[test]
    fn sample_rate_change_rescales_increment() {
        let mut osc = SineOscillator::new(44100.0);
        osc.set_frequency(441.0);
        osc.set_amplitude(1.0);

        // One cycle at 44.1kHz is exactly 100 samples for 441 Hz
        for _ in 0..100 {
            osc.advance();
        }
        assert!(osc.phase().abs() < 1e-3 || (osc.phase() - TAU).abs() < 1e-3);

        osc.reset();
        osc.set_sample_rate(88200.0);
        for _ in 0..200 {
            osc.advance();
        }
        assert!(osc.phase().abs() < 1e-3 || (osc.phase() - TAU).abs() < 1e-3);
    }
}
