//! # Detector Pulse
//!
//! A rising stream that only animates while the cursor is over the
//! window. Leave the window and the frame freezes in place; come back
//! and it picks up where it stopped.
//!
//! Run with: `cargo run --example detector_pulse`

use backdrop::prelude::*;

fn main() {
    env_logger::init();

    Animator::new()
        .with_title("Detector Pulse")
        .with_count(120)
        .with_background(Vec3::new(0.02, 0.03, 0.06))
        .with_spawner(|ctx| Particle {
            position: ctx.random_in_surface(),
            // Upward drift with a little sideways jitter (y grows downward)
            velocity: Vec2::new(ctx.random_range(-0.2, 0.2), -ctx.random_range(0.5, 1.5)),
            radius: ctx.random_range(1.0, 2.0),
            color: Vec3::new(0.545, 0.718, 0.941),
            alpha: ctx.random_range(0.3, 0.9),
            ..Particle::default()
        })
        .with_boundary(Boundary::Wrap)
        .with_damping(1.0)
        .with_hover_gate()
        .run()
        .expect("Animation failed");
}
