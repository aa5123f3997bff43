// Spawnish Music Generator — CLI entry point.
//
// Generates a two-track (lead + bass) Rule 30 piece and writes it to MIDI.
// The pipeline: seed derivation → ring evolution → column taps → swing
// scheduling → note mapping → MIDI output.
//
// Usage:
//   cargo run -p spawnish_music -- [output.mid] [--prompt TEXT] [--seed-int N]
//     [--steps N] [--width N] [--bpm BPM] [--steps-per-beat N] [--swing R]
//     [--root N] [--burn-in N] [--config FILE]
//
// A text or integer prompt makes the piece fully reproducible; without one
// the seed comes from OS entropy. --config loads a JSON GenerationConfig;
// later flags override its fields.

use rand::SeedableRng;
use rand::rngs::StdRng;
use spawnish_music::arrange::{GenerationConfig, generate};
use spawnish_music::midi::write_midi;
use spawnish_music::seed::SeedSpec;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("rule30.mid");

    let mut config = match parse_flag::<String>(&args, "--config") {
        Some(path) => match load_config(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GenerationConfig::default(),
    };

    if let Some(text) = parse_flag::<String>(&args, "--prompt") {
        config.prompt = SeedSpec::Text(text);
    }
    if let Some(v) = parse_flag::<u128>(&args, "--seed-int") {
        config.prompt = SeedSpec::Value(v);
    }
    if let Some(v) = parse_flag(&args, "--steps") {
        config.length_steps = v;
    }
    if let Some(v) = parse_flag(&args, "--width") {
        config.ring_width = v;
    }
    if let Some(v) = parse_flag(&args, "--bpm") {
        config.bpm = v;
    }
    if let Some(v) = parse_flag(&args, "--steps-per-beat") {
        config.steps_per_beat = v;
    }
    if let Some(v) = parse_flag(&args, "--swing") {
        config.swing = v;
    }
    if let Some(v) = parse_flag(&args, "--root") {
        config.root = v;
    }
    if let Some(v) = parse_flag(&args, "--burn-in") {
        config.burn_in = v;
    }

    println!("=== Spawnish Music Generator ===");
    println!("Output: {}", output_path);
    match &config.prompt {
        SeedSpec::Random => println!("Seed: random (OS entropy)"),
        SeedSpec::Text(t) => println!("Seed: prompt {:?}", t),
        SeedSpec::Value(v) => println!("Seed: integer {}", v),
    }
    println!(
        "Ring: {} bits, {} steps (+{} burn-in)",
        config.ring_width, config.length_steps, config.burn_in
    );
    println!(
        "Feel: {} BPM, {} steps/beat, swing {:.2}, root {}",
        config.bpm, config.steps_per_beat, config.swing, config.root
    );
    println!();

    let mut rng = StdRng::from_entropy();

    println!("[1/2] Generating arrangement...");
    let arrangement = match generate(&config, &mut rng) {
        Ok(arr) => arr,
        Err(e) => {
            eprintln!("  Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "  {} lead notes, {} bass notes, {:.1}s total",
        arrangement.lead.notes.len(),
        arrangement.bass.notes.len(),
        arrangement.duration
    );

    println!("[2/2] Writing MIDI to {}...", output_path);
    match write_midi(&arrangement, Path::new(output_path)) {
        Ok(()) => println!("  Done!"),
        Err(e) => {
            eprintln!("  Error writing MIDI: {}", e);
            std::process::exit(1);
        }
    }

    println!();
    println!("Play with: timidity {} (or any MIDI player)", output_path);
}

fn load_config(path: &str) -> Result<GenerationConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
