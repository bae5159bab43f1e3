//! Preset listing command.

use clap::Args;
use overtone_core::{HarmonicSpectrum, SpectrumPreset};

/// How many harmonics to show per preset.
const SHOWN_HARMONICS: usize = 16;

#[derive(Args)]
pub struct PresetsArgs {
    /// Show amplitudes as numbers instead of bars
    #[arg(long)]
    numeric: bool,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    println!("Available spectrum presets:\n");

    for preset in SpectrumPreset::ALL {
        let mut spectrum = HarmonicSpectrum::new();
        spectrum.apply_preset(preset);

        println!("{}", preset.name());
        if args.numeric {
            let amps: Vec<String> = (0..SHOWN_HARMONICS)
                .map(|k| format!("{:.3}", spectrum.amplitude(k)))
                .collect();
            println!("  [{}]", amps.join(", "));
        } else {
            for k in 0..SHOWN_HARMONICS {
                let amp = spectrum.amplitude(k);
                if !spectrum.is_enabled(k) {
                    continue;
                }
                let bar_len = (amp.abs() * 40.0).round() as usize;
                println!("  h{:<3} {:>6.3} {}", k + 1, amp, "#".repeat(bar_len));
            }
        }
        println!();
    }

    println!("Unknown preset names yield a silent spectrum.");
    Ok(())
}
