//! # Ink Swirl
//!
//! Drifting ink motes that gather and swirl around the cursor: constant
//! pull inside 200 px, a slight tangential push, wrapping edges.
//!
//! Run with: `cargo run --example ink_swirl`

use backdrop::prelude::*;

fn main() {
    env_logger::init();

    Animator::new()
        .with_title("Ink Swirl")
        .with_count(80)
        .with_palette(Palette::Moonlight)
        .with_background(Vec3::new(0.04, 0.05, 0.08))
        .with_attractor(Attractor::Pointer)
        .with_spawner(|ctx| Particle {
            position: ctx.random_in_surface(),
            velocity: ctx.random_velocity(1.0),
            radius: ctx.random_range(1.0, 2.0),
            color: ctx.palette_color(),
            alpha: ctx.random_range(0.4, 0.9),
            ..Particle::default()
        })
        .with_rule(Rule::Attract {
            strength: 0.08,
            radius: 200.0,
            falloff: Falloff::Constant,
        })
        .with_rule(Rule::Swirl { strength: 0.05 })
        .with_boundary(Boundary::Wrap)
        .run()
        .expect("Animation failed");
}
