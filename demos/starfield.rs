//! # Starfield
//!
//! No forces at all. Stars drift slowly, wrap at the edges, and twinkle
//! by oscillating their opacity.
//!
//! Run with: `cargo run --example starfield`

use std::f32::consts::TAU;

use backdrop::prelude::*;

fn main() {
    env_logger::init();

    Animator::new()
        .with_title("Starfield")
        .with_count(200)
        .with_palette(Palette::Moonlight)
        .with_background(Vec3::new(0.01, 0.01, 0.03))
        .with_spawner(|ctx| Particle {
            position: ctx.random_in_surface(),
            velocity: ctx.random_velocity(0.3),
            radius: ctx.random_range(0.8, 2.2),
            color: ctx.palette_color(),
            phase: ctx.random_range(0.0, TAU),
            ..Particle::default()
        })
        .with_rule(Rule::Twinkle {
            speed: 0.02,
            min: 0.0,
            max: 0.6,
        })
        .with_boundary(Boundary::Wrap)
        .with_damping(1.0) // constant drift, no decay
        .run()
        .expect("Animation failed");
}
