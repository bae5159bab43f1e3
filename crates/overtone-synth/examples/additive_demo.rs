//! Additive synthesis demo: spectra, morphing, and a polyphonic chord.
//!
//! Run with: cargo run -p overtone-synth --example additive_demo

use overtone_synth::{AdditiveSynth, HarmonicSpectrum, MorphingEngine, SpectrumPreset};

fn main() {
    let sample_rate = 44100.0;

    // --- Preset spectra ---
    println!("=== Preset Spectra (first 8 harmonics) ===\n");

    for preset in SpectrumPreset::ALL {
        let mut spectrum = HarmonicSpectrum::new();
        spectrum.apply_preset(preset);

        let amps: Vec<f32> = (0..8).map(|k| spectrum.amplitude(k)).collect();
        println!(
            "{:<10} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3}",
            preset.name(),
            amps[0],
            amps[1],
            amps[2],
            amps[3],
            amps[4],
            amps[5],
            amps[6],
            amps[7]
        );
    }

    // --- Morphing between spectra ---
    println!("\n=== Morphing Saw -> Sine (harmonic 2 amplitude) ===\n");

    let mut saw = HarmonicSpectrum::new();
    saw.load_preset("Saw");
    let mut sine = HarmonicSpectrum::new();
    sine.load_preset("Sine");

    let mut morph = MorphingEngine::new();
    morph.set_source(&saw);
    morph.set_target(&sine);

    for step in 0..=4 {
        let amount = step as f32 / 4.0;
        morph.set_morph_amount(amount);
        let blended = morph.current_state();
        println!("amount {:.2} -> amplitude {:.4}", amount, blended.amplitude(1));
    }

    // --- Polyphonic chord through the full synth ---
    println!("\n=== C Major Chord, 100 ms render ===\n");

    let mut synth: AdditiveSynth<8> = AdditiveSynth::new(sample_rate);
    synth.load_preset("Organ");
    synth.set_envelope_parameters(0.005, 0.05, 0.7, 0.2);

    synth.note_on(60, 100); // C4
    synth.note_on(64, 100); // E4
    synth.note_on(67, 100); // G4

    let block = 512;
    let num_blocks = (sample_rate * 0.1) as usize / block;
    let mut left = vec![0.0f32; block];
    let mut right = vec![0.0f32; block];

    let mut peak = 0.0f32;
    for _ in 0..num_blocks {
        {
            let mut channels = [&mut left[..], &mut right[..]];
            synth.render_block(&mut channels, 0, block);
        }
        for &s in left.iter() {
            peak = peak.max(s.abs());
        }
    }

    println!("active voices: {}", synth.active_voice_count());
    println!("peak level over 100 ms: {:.4}", peak);

    synth.note_off(60, true);
    synth.note_off(64, true);
    synth.note_off(67, true);
    println!("released; voices still tailing: {}", synth.active_voice_count());
}
