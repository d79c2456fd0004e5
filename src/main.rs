//! Terminal demo: run the engine headless for a few seconds, inject a
//! synthetic shake burst halfway through, and print what a host HUD
//! would show.
//!
//! Run with: `RUST_LOG=debug cargo run --release`

use snowfall::prelude::*;
use std::thread;
use std::time::Duration;

fn main() {
    env_logger::init();

    let mut engine = Snowfall::new();
    engine
        .start(480.0, 800.0)
        .expect("default config is valid");
    let mut projector = Projector::new(engine.config());

    println!("=== Snowfall demo (480x800, 6 s) ===");

    for frame in 0..360u32 {
        // Shake burst between seconds 2 and 3, sampled at the
        // reference 50 ms sensor cadence.
        if (120..180).contains(&frame) && frame % 3 == 0 {
            engine.shake(Vec3::new(9.0, 7.0, 5.0));
        }

        let commands = projector.project(&engine.snapshot());

        if frame % 30 == 0 {
            let modifiers = engine.modifiers();
            println!(
                "t={:>4} ms  flakes={:>3}  intensity={:.2}  velocity={:.2}  fps={:>5.1}",
                frame * 16,
                commands.len(),
                modifiers.intensity(),
                modifiers.velocity(),
                projector.fps(),
            );
        }

        thread::sleep(Duration::from_millis(16));
    }

    engine.stop();
    println!("done after {} frames", projector.frame());
}
