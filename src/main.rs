use anyhow::Context;
use log::info;
use tone_cues::{ToneGenerator, ToneRequest};

/// Start cue: A4 ping, one second
const START_CUE: (&str, f64, u64) = ("assets/audio/start.wav", 440.0, 1000);
/// Tick cue: A5 ping, 100ms
const TICK_CUE: (&str, f64, u64) = ("assets/audio/tick.wav", 880.0, 100);

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let generator = ToneGenerator::default();
    info!("Sample rate: {} Hz", generator.sample_rate());

    // assets/audio/ is expected to exist already
    for (path, frequency, duration_ms) in [START_CUE, TICK_CUE] {
        println!("Generating {}...", path);
        let request = ToneRequest::new(path, frequency, duration_ms);
        generator
            .generate(&request)
            .with_context(|| format!("failed to generate {}", path))?;
    }

    println!("Audio generation complete.");

    Ok(())
}
