//! # Nebula
//!
//! Background ambiance with no forces: a handful of huge, faint blobs
//! drifting across the surface. A few brighter ones gather near the
//! upper center; the rest scatter dimly behind them.
//!
//! Run with: `cargo run --example nebula`

use backdrop::prelude::*;

fn main() {
    env_logger::init();

    Animator::new()
        .with_title("Nebula")
        .with_count(13)
        .with_palette(Palette::Accretion)
        .with_background(Vec3::new(0.01, 0.02, 0.05))
        .with_spawner(|ctx| {
            if ctx.index < 5 {
                // Hero blobs: near the upper center, a touch brighter
                Particle {
                    position: Vec2::new(
                        ctx.width * 0.5 + ctx.random_range(-100.0, 100.0),
                        ctx.height / 3.0 + ctx.random_range(-50.0, 50.0),
                    ),
                    velocity: ctx.random_velocity(0.05),
                    radius: ctx.random_range(300.0, 600.0),
                    color: ctx.palette_color(),
                    alpha: ctx.random_range(0.05, 0.08),
                    ..Particle::default()
                }
            } else {
                Particle {
                    position: ctx.random_in_surface(),
                    velocity: ctx.random_velocity(0.1),
                    radius: ctx.random_range(200.0, 600.0),
                    color: ctx.palette_color(),
                    alpha: ctx.random_range(0.02, 0.03),
                    ..Particle::default()
                }
            }
        })
        .with_boundary(Boundary::Wrap)
        .with_damping(1.0) // constant drift, no decay
        .run()
        .expect("Animation failed");
}
