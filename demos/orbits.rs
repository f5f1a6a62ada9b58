//! # Orbits
//!
//! Particles settling into circular orbits around the surface center.
//! The orbit rule nudges tangential speed toward the circular value for
//! the current distance, so rings form on their own and trails leave
//! thin arcs on a paper background.
//!
//! Run with: `cargo run --example orbits`

use backdrop::prelude::*;

fn main() {
    env_logger::init();

    Animator::new()
        .with_title("Orbits")
        .with_count(250)
        .with_palette(Palette::Ink)
        .with_background(Vec3::new(0.96, 0.95, 0.91))
        .with_attractor(Attractor::Center)
        .with_spawner(|ctx| {
            let offset = ctx.random_in_annulus(80.0, 320.0);
            Particle {
                position: ctx.center() + offset,
                velocity: ctx.tangent_velocity(offset, 2.0),
                radius: ctx.random_range(0.8, 1.8),
                color: ctx.palette_color(),
                alpha: ctx.random_range(0.5, 1.0),
                ..Particle::default()
            }
        })
        .with_rule(Rule::Orbit { strength: 0.05 })
        .with_respawn(20.0, 700.0)
        .with_trails(0.05)
        .run()
        .expect("Animation failed");
}
