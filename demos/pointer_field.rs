//! # Pointer Field
//!
//! A light constellation that leans toward the cursor. Particles bounce
//! off the window edges and nearby pairs are joined by lines that fade
//! with distance.
//!
//! Features:
//! - `Attractor::Pointer` - inert until the cursor enters the window
//! - `Falloff::Linear` - pull fades to zero at 300 px
//! - `Boundary::Bounce` - edges reflect
//! - `with_links` - connecting lines under 100 px
//!
//! Run with: `cargo run --example pointer_field`

use backdrop::prelude::*;

fn main() {
    env_logger::init();

    Animator::new()
        .with_title("Pointer Field")
        .with_count(100)
        .with_palette(Palette::Daybreak)
        .with_background(Vec3::new(0.973, 0.961, 0.937))
        .with_attractor(Attractor::Pointer)
        .with_spawner(|ctx| Particle {
            position: ctx.random_in_surface(),
            velocity: ctx.random_velocity(2.0),
            radius: ctx.random_range(1.5, 3.0),
            color: ctx.palette_color(),
            ..Particle::default()
        })
        .with_rule(Rule::Attract {
            strength: 0.5,
            radius: 300.0,
            falloff: Falloff::Linear,
        })
        .with_rule(Rule::SpeedLimit { min: 0.3, max: 4.0 })
        .with_boundary(Boundary::Bounce)
        .with_links(LinkStyle {
            radius: 100.0,
            color: Vec3::splat(0.11),
            width: 0.5,
            opacity: 0.2,
        })
        .run()
        .expect("Animation failed");
}
