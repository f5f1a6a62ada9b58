//! # Black Hole
//!
//! The accretion-field animation: particles spawn in an annulus around
//! the surface center, fall inward under an inverse-square pull, and get
//! swirled sideways into orbits. Whatever crosses the inner radius (or
//! escapes past 600 px) is recycled back into the annulus.
//!
//! ## What This Demonstrates
//!
//! - `Attractor::Center` - forces act around the surface center
//! - `Falloff::InverseSquare` - gravity-like pull
//! - `Rule::Swirl` - tangential push that turns infall into orbits
//! - `with_respawn` - the recycle band that keeps the population constant
//! - `with_trails` - translucent fade instead of a hard clear
//!
//! ## Try This
//!
//! - Lower the swirl strength for straighter plunges
//! - Widen the respawn band to let escapees drift farther
//! - Swap the palette for `Palette::Ember`
//!
//! Run with: `cargo run --example black_hole`

use backdrop::prelude::*;

fn main() {
    env_logger::init();

    Animator::new()
        .with_title("Black Hole")
        .with_count(400)
        .with_palette(Palette::Accretion)
        .with_attractor(Attractor::Center)
        .with_spawner(|ctx| {
            let offset = ctx.random_in_annulus(100.0, 400.0);
            Particle {
                position: ctx.center() + offset,
                velocity: ctx.tangent_velocity(offset, 1.5),
                radius: ctx.random_range(1.0, 2.5),
                color: ctx.palette_color(),
                ..Particle::default()
            }
        })
        // No range cap on the pull; the respawn band bounds the field
        .with_rule(Rule::Attract {
            strength: 10.0,
            radius: f32::INFINITY,
            falloff: Falloff::InverseSquare,
        })
        .with_rule(Rule::Swirl { strength: 0.5 })
        .with_rule(Rule::SpeedLimit { min: 0.0, max: 5.0 })
        .with_rule(Rule::ColorBySpeed {
            slow_color: Vec3::new(0.05, 0.65, 0.60),
            fast_color: Vec3::new(0.78, 0.95, 0.40),
            max_speed: 5.0,
        })
        .with_damping(0.99)
        .with_respawn(5.0, 600.0)
        .with_trails(0.08)
        .run()
        .expect("Animation failed");
}
