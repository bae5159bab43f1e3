//! Property-based tests for overtone-core.
//!
//! Uses proptest to exercise the defensive-input invariants: clamping,
//! derived-flag consistency, index bounds, morph endpoint identities, and
//! envelope output ranges under randomized parameters.

use overtone_core::{
    AdsrEnvelope, HarmonicOscillatorBank, HarmonicSpectrum, MAX_HARMONICS, MIN_AUDIBLE_AMPLITUDE,
    SineOscillator,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any amplitude input, `set_amplitude` stores `clamp(a, 0, 1)` and
    /// `enabled == (clamp(a, 0, 1) > 0.001)`.
    #[test]
    fn amplitude_write_clamps_and_derives_enabled(
        index in 0usize..MAX_HARMONICS,
        amplitude in -10.0f32..10.0f32,
    ) {
        let mut spectrum = HarmonicSpectrum::new();
        spectrum.set_amplitude(index, amplitude);

        let clamped = amplitude.clamp(0.0, 1.0);
        prop_assert_eq!(spectrum.amplitude(index), clamped);
        prop_assert_eq!(spectrum.is_enabled(index), clamped > MIN_AUDIBLE_AMPLITUDE);
    }

    /// Writes through any out-of-range index leave the spectrum untouched,
    /// and reads return the zero/disabled sentinel.
    #[test]
    fn out_of_range_indices_are_inert(
        index in MAX_HARMONICS..usize::MAX,
        amplitude in -10.0f32..10.0f32,
        phase in -10.0f32..10.0f32,
    ) {
        let mut spectrum = HarmonicSpectrum::new();
        spectrum.load_preset("Saw");
        let before = spectrum.clone();

        spectrum.set_amplitude(index, amplitude);
        spectrum.set_harmonic(index, amplitude, phase);
        prop_assert_eq!(&spectrum, &before);

        let sentinel = spectrum.harmonic(index);
        prop_assert_eq!(sentinel.amplitude, 0.0);
        prop_assert_eq!(sentinel.phase, 0.0);
        prop_assert!(!sentinel.enabled);
    }

    /// `copy_from` reproduces every slot exactly.
    #[test]
    fn copy_from_round_trips(
        amps in prop::collection::vec(0.0f32..1.0, 8),
        phases in prop::collection::vec(0.0f32..6.28, 8),
    ) {
        let mut src = HarmonicSpectrum::new();
        for (i, (&a, &p)) in amps.iter().zip(phases.iter()).enumerate() {
            src.set_harmonic(i * 16, a, p);
        }

        let mut dst = HarmonicSpectrum::new();
        dst.copy_from(&src);

        for k in 0..MAX_HARMONICS {
            prop_assert_eq!(dst.harmonic(k), src.harmonic(k));
        }
    }

    /// Morphing with amount 0 is the identity; amount 1 reproduces the
    /// target; 0.5 is the arithmetic mean of each field.
    #[test]
    fn morph_endpoint_identities(
        src_amps in prop::collection::vec(0.0f32..1.0, 4),
        dst_amps in prop::collection::vec(0.0f32..1.0, 4),
    ) {
        let mut source = HarmonicSpectrum::new();
        let mut target = HarmonicSpectrum::new();
        for (i, (&a, &b)) in src_amps.iter().zip(dst_amps.iter()).enumerate() {
            source.set_amplitude(i, a);
            target.set_amplitude(i, b);
        }

        let mut zero = source.clone();
        zero.morph_to(&target, 0.0);
        prop_assert_eq!(&zero, &source);

        let mut one = source.clone();
        one.morph_to(&target, 1.0);
        for k in 0..MAX_HARMONICS {
            prop_assert!((one.amplitude(k) - target.amplitude(k)).abs() < 1e-6);
        }

        let mut half = source.clone();
        half.morph_to(&target, 0.5);
        for k in 0..MAX_HARMONICS {
            let mean = (source.amplitude(k) + target.amplitude(k)) * 0.5;
            prop_assert!((half.amplitude(k) - mean).abs() < 1e-6);
        }
    }

    /// The sine oscillator never exceeds its amplitude bound and never
    /// produces non-finite samples, for any audible configuration.
    #[test]
    fn oscillator_output_bounded(
        freq in 20.0f32..20000.0f32,
        amplitude in 0.0f32..1.0,
        sample_rate in 22050.0f32..96000.0f32,
    ) {
        let mut osc = SineOscillator::new(sample_rate);
        osc.set_frequency(freq);
        osc.set_amplitude(amplitude);

        for _ in 0..512 {
            let sample = osc.advance();
            prop_assert!(sample.is_finite());
            prop_assert!(sample.abs() <= amplitude + 1e-6);
        }
    }

    /// Envelope output stays in [0, 1] for any parameter combination, and
    /// a full note cycle always terminates in Idle.
    #[test]
    fn envelope_bounded_and_terminates(
        attack in 0.0f32..0.05,
        decay in 0.0f32..0.05,
        sustain in 0.0f32..1.0,
        release in 0.0f32..0.05,
    ) {
        let mut env = AdsrEnvelope::new(44100.0);
        env.set_attack(attack);
        env.set_decay(decay);
        env.set_sustain(sustain);
        env.set_release(release);

        env.note_on();
        for _ in 0..10000 {
            let level = env.advance();
            prop_assert!((0.0..=1.0).contains(&level), "level {}", level);
        }

        env.note_off();
        let mut remaining = 44100 * 10;
        while env.is_active() && remaining > 0 {
            let level = env.advance();
            prop_assert!((0.0..=1.0).contains(&level), "level {}", level);
            remaining -= 1;
        }
        prop_assert!(!env.is_active(), "envelope failed to terminate");
    }

    /// The bank output is finite and bounded by gain times the amplitude
    /// sum for any preset and fundamental.
    #[test]
    fn bank_output_bounded(
        preset_idx in 0usize..5,
        fundamental in 20.0f32..2000.0f32,
    ) {
        let names = ["Saw", "Square", "Triangle", "Sine", "Organ"];
        let mut spectrum = HarmonicSpectrum::new();
        spectrum.load_preset(names[preset_idx]);

        let mut bank = HarmonicOscillatorBank::new(44100.0);
        bank.set_fundamental(fundamental);
        bank.apply_spectrum(&spectrum);

        let bound: f32 = (0..MAX_HARMONICS)
            .map(|k| spectrum.amplitude(k).clamp(0.0, 1.0))
            .sum::<f32>()
            * bank.gain()
            + 1e-4;

        for _ in 0..1024 {
            let sample = bank.advance();
            prop_assert!(sample.is_finite());
            prop_assert!(sample.abs() <= bound, "sample {} exceeds {}", sample, bound);
        }
    }
}
