//! # Backdrop
//!
//! Decorative 2D particle animations made easy.
//!
//! Backdrop animates a fixed set of particles over a window surface with
//! small per-frame rules such as pull toward the cursor, swirl, orbit,
//! and twinkle. It handles the window, the GPU surface, and the render
//! loop, so a finished animation is a handful of builder calls.
//!
//! ## Quick Start
//!
//! ```ignore
//! use backdrop::prelude::*;
//!
//! fn main() {
//!     Animator::new()
//!         .with_count(100)
//!         .with_attractor(Attractor::Pointer)
//!         .with_rule(Rule::Attract {
//!             strength: 0.5,
//!             radius: 300.0,
//!             falloff: Falloff::Linear,
//!         })
//!         .with_boundary(Boundary::Bounce)
//!         .with_links(LinkStyle::default())
//!         .run()
//!         .expect("Animation failed");
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] is a plain struct: position, velocity, radius, color,
//! opacity, and a free-running phase. The collection is allocated once at
//! startup and mutated in place; its size never changes while the
//! animation runs.
//!
//! ### Spawners
//!
//! The spawner closure produces each particle, at startup and again when
//! a particle is recycled. The [`SpawnContext`] argument carries the
//! particle index, the surface size, the attractor position, and a
//! seeded RNG with helpers for common placements:
//!
//! ```ignore
//! .with_spawner(|ctx| Particle {
//!     position: ctx.center() + ctx.random_in_annulus(100.0, 400.0),
//!     velocity: ctx.random_velocity(2.0),
//!     color: ctx.palette_color(),
//!     ..Particle::default()
//! })
//! ```
//!
//! ### Rules
//!
//! Rules define per-frame behavior. They execute every frame in order,
//! before integration and damping:
//!
//! ```ignore
//! .with_rule(Rule::Attract { .. })   // pull toward the attractor
//! .with_rule(Rule::Swirl { .. })     // tangential push around it
//! .with_rule(Rule::SpeedLimit { .. })
//! .with_rule(Rule::Twinkle { .. })   // opacity oscillation
//! ```
//!
//! ### Attractors and recycling
//!
//! Force rules act around the animator's [`Attractor`]: the live cursor,
//! the surface center, or a fixed point. With
//! [`with_respawn`](Animator::with_respawn), particles that fall inside
//! the inner radius or drift past the outer one are fed back through the
//! spawner, which keeps the population constant.
//!
//! ### Headless use
//!
//! [`Animator::build`] returns the [`Animation`] without opening a
//! window. Call [`step`](Animation::step) once per frame and read
//! [`particles`](Animation::particles) to draw with anything you like;
//! dropping the value stops everything.
//!
//! ## Feature Overview
//!
//! | Category   | Items |
//! |------------|-------|
//! | Forces     | [`Rule::Attract`], [`Rule::Swirl`], [`Rule::Orbit`] |
//! | Velocity   | [`Rule::SpeedLimit`], per-frame damping |
//! | Visuals    | [`Rule::Twinkle`], [`Rule::ColorBySpeed`], palettes, links, trails |
//! | Boundaries | [`Boundary::Wrap`], [`Boundary::Bounce`], [`Boundary::Open`] |
//! | Overlay    | egui panels behind the `egui` feature |

mod animation;
mod animator;
mod error;
mod gpu;
mod input;
mod particle;
pub mod rules;
mod spawn;
pub mod time;
pub mod visuals;

pub use animation::{Animation, Link};
pub use animator::Animator;
pub use error::{AnimatorError, GpuError};
pub use glam::{Vec2, Vec3};
pub use particle::Particle;
pub use rules::{Attractor, Boundary, Falloff, Rule};
pub use spawn::SpawnContext;
pub use visuals::{LinkStyle, Palette};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use backdrop::prelude::*;
/// ```
///
/// This imports:
/// - [`Animator`] - the animation builder
/// - [`Animation`] - the running, caller-owned animation
/// - [`Rule`], [`Attractor`], [`Boundary`], [`Falloff`] - behavior configuration
/// - [`Particle`] and [`SpawnContext`] - spawner building blocks
/// - [`Palette`] and [`LinkStyle`] - visual configuration
/// - [`Vec2`], [`Vec3`] - glam vector types
pub mod prelude {
    pub use crate::animation::{Animation, Link};
    pub use crate::animator::Animator;
    pub use crate::error::{AnimatorError, GpuError};
    pub use crate::particle::Particle;
    pub use crate::rules::{Attractor, Boundary, Falloff, Rule};
    pub use crate::spawn::SpawnContext;
    pub use crate::time::Time;
    pub use crate::visuals::{LinkStyle, Palette};
    pub use crate::{Vec2, Vec3};
    #[cfg(feature = "egui")]
    pub use egui;
}
