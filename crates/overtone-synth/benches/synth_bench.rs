//! Criterion benchmarks for overtone-synth components
//!
//! Run with: cargo bench -p overtone-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use overtone_synth::{AdditiveSynth, Voice};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

fn bench_voice_by_preset(c: &mut Criterion) {
    let mut group = c.benchmark_group("Voice");

    // Active-partial count dominates voice cost: Sine has 1, Saw has 32
    for preset in ["Sine", "Saw"] {
        let mut synth: AdditiveSynth<1> = AdditiveSynth::new(SAMPLE_RATE);
        synth.load_preset(preset);
        synth.note_on(69, 127);

        group.bench_with_input(BenchmarkId::new(preset, 512), &512usize, |b, &size| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..size {
                    sum += synth.process();
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

fn bench_voice_render_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("Voice_render_block");

    for &block_size in BLOCK_SIZES {
        let mut voice = Voice::new(SAMPLE_RATE);
        let mut spectrum = overtone_synth::HarmonicSpectrum::new();
        spectrum.load_preset("Saw");
        voice.apply_spectrum(&spectrum);
        voice.set_envelope(0.001, 0.01, 1.0, 0.1);
        voice.note_on(60, 100);

        let mut left = vec![0.0f32; block_size];
        let mut right = vec![0.0f32; block_size];

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    let mut channels = [&mut left[..], &mut right[..]];
                    voice.render_block(&mut channels, 0, size);
                    black_box(channels[0][0])
                })
            },
        );
    }

    group.finish();
}

fn bench_synth_polyphony(c: &mut Criterion) {
    let mut group = c.benchmark_group("AdditiveSynth_render_block");

    for &active_notes in &[1usize, 4, 8, 16] {
        let mut synth: AdditiveSynth<16> = AdditiveSynth::new(SAMPLE_RATE);
        synth.load_preset("Saw");
        synth.set_envelope_parameters(0.001, 0.01, 1.0, 0.1);
        for n in 0..active_notes {
            synth.note_on(48 + (n as u8) * 3, 100);
        }

        let mut left = vec![0.0f32; 512];
        let mut right = vec![0.0f32; 512];

        group.bench_with_input(
            BenchmarkId::from_parameter(active_notes),
            &active_notes,
            |b, _| {
                b.iter(|| {
                    let mut channels = [&mut left[..], &mut right[..]];
                    synth.render_block(&mut channels, 0, 512);
                    black_box(channels[0][0])
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_voice_by_preset,
    bench_voice_render_block,
    bench_synth_polyphony
);
criterion_main!(benches);
