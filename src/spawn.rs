//! Spawn context for particle initialization.
//!
//! Provides helper methods to reduce boilerplate when spawning particles.

use crate::visuals::Palette;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Context provided to spawner functions with helpers for common spawn patterns.
///
/// Instead of manually setting up RNG and computing random positions, use the
/// helper methods on `SpawnContext`:
///
/// ```ignore
/// // Before: verbose manual setup
/// let mut rng = rand::thread_rng();
/// let particles: Vec<Particle> = (0..count)
///     .map(|_| {
///         let angle = rng.gen_range(0.0..TAU);
///         let r = 100.0 + rng.gen::<f32>() * 300.0;
///         Particle {
///             position: center + Vec2::new(r * angle.cos(), r * angle.sin()),
///             ..Particle::default()
///         }
///     })
///     .collect();
/// animator.with_spawner(move |ctx| particles[ctx.index as usize])
///
/// // After: clean and simple
/// animator.with_spawner(|ctx| Particle {
///     position: ctx.center() + ctx.random_in_annulus(100.0, 400.0),
///     color: ctx.palette_color(),
///     ..Particle::default()
/// })
/// ```
///
/// The spawner is the single source of initial particle state: the animator
/// calls it at construction and again whenever a particle is recycled.
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: u32,
    /// Total number of particles being spawned.
    pub count: u32,
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Resolved attractor position, if the animator has one this frame.
    pub attractor: Option<Vec2>,
    /// The animator's palette.
    pub palette: Palette,
    /// Internal RNG - use helper methods instead of accessing directly.
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a new spawn context for a particle.
    pub(crate) fn new(
        index: u32,
        count: u32,
        width: f32,
        height: f32,
        attractor: Option<Vec2>,
        palette: Palette,
    ) -> Self {
        // Seed RNG based on index for reproducibility within a run,
        // but different each program execution
        let seed = index as u64
            ^ (std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42));

        Self {
            index,
            count,
            width,
            height,
            attractor,
            palette,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    ///
    /// Useful for distributing particles evenly:
    /// ```ignore
    /// let angle = ctx.progress() * TAU;  // Particles around a circle
    /// ```
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count as f32
    }

    /// The point spawn regions should focus on: the attractor when the
    /// animator has one resolved, otherwise the surface center.
    pub fn center(&self) -> Vec2 {
        self.attractor
            .unwrap_or(Vec2::new(self.width * 0.5, self.height * 0.5))
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    // ========== Position helpers ==========

    /// Random point anywhere on the surface.
    pub fn random_in_surface(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen::<f32>() * self.width,
            self.rng.gen::<f32>() * self.height,
        )
    }

    /// Random offset inside a disk of given radius, centered at origin.
    ///
    /// Distribution is uniform over the area.
    pub fn random_in_disk(&mut self, radius: f32) -> Vec2 {
        let theta = self.rng.gen_range(0.0..TAU);
        // Square root for uniform area distribution
        let r = radius * self.rng.gen::<f32>().sqrt();
        Vec2::new(r * theta.cos(), r * theta.sin())
    }

    /// Random offset inside an annulus (ring band), centered at origin.
    ///
    /// The radius is drawn linearly between `inner` and `outer`, so samples
    /// lean toward the inner edge relative to an area-uniform draw. That
    /// bias reads well for accretion-style spawns.
    pub fn random_in_annulus(&mut self, inner: f32, outer: f32) -> Vec2 {
        let theta = self.rng.gen_range(0.0..TAU);
        let r = inner + self.rng.gen::<f32>() * (outer - inner);
        Vec2::new(r * theta.cos(), r * theta.sin())
    }

    /// Random offset on a circle of given radius, centered at origin.
    pub fn random_on_ring(&mut self, radius: f32) -> Vec2 {
        let theta = self.rng.gen_range(0.0..TAU);
        Vec2::new(radius * theta.cos(), radius * theta.sin())
    }

    // ========== Velocity helpers ==========

    /// Random velocity with each axis drawn from `-scale/2` to `scale/2`.
    ///
    /// `random_velocity(2.0)` gives the drifting-dust look: each component
    /// between -1 and 1 pixels per frame.
    pub fn random_velocity(&mut self, scale: f32) -> Vec2 {
        Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * scale,
            (self.rng.gen::<f32>() - 0.5) * scale,
        )
    }

    /// Velocity tangent to an offset from the spawn center (for orbital motion).
    ///
    /// Returns a velocity perpendicular to `offset`. Useful for setting up
    /// swirling/orbiting particles:
    /// ```ignore
    /// let offset = ctx.random_in_annulus(10.0, 70.0);
    /// Particle {
    ///     position: ctx.center() + offset,
    ///     velocity: ctx.tangent_velocity(offset, 1.5),
    ///     ..Particle::default()
    /// }
    /// ```
    pub fn tangent_velocity(&self, offset: Vec2, speed: f32) -> Vec2 {
        let tangent = Vec2::new(-offset.y, offset.x);
        if tangent.length_squared() > 0.0001 {
            tangent.normalize() * speed
        } else {
            Vec2::new(speed, 0.0)
        }
    }

    /// Velocity pointing outward from the spawn center.
    pub fn outward_velocity(&mut self, offset: Vec2, speed: f32) -> Vec2 {
        if offset.length_squared() > 0.0001 {
            offset.normalize() * speed
        } else {
            let theta = self.rng.gen_range(0.0..TAU);
            Vec2::new(theta.cos(), theta.sin()) * speed
        }
    }

    // ========== Color helpers ==========

    /// Random color from the animator's palette.
    pub fn palette_color(&mut self) -> Vec3 {
        let colors = self.palette.colors();
        colors[self.rng.gen_range(0..colors.len())]
    }

    /// Random color with given saturation and value (HSV model).
    ///
    /// Hue is randomized, giving vibrant varied colors.
    pub fn random_hue(&mut self, saturation: f32, value: f32) -> Vec3 {
        let hue = self.rng.gen::<f32>();
        hsv_to_rgb(hue, saturation, value)
    }

    /// Color from HSV values.
    ///
    /// * `hue` - 0.0 to 1.0 (wraps: red → yellow → green → cyan → blue → magenta → red)
    /// * `saturation` - 0.0 (gray) to 1.0 (vivid)
    /// * `value` - 0.0 (black) to 1.0 (bright)
    pub fn hsv(&self, hue: f32, saturation: f32, value: f32) -> Vec3 {
        hsv_to_rgb(hue, saturation, value)
    }
}

/// Convert HSV to RGB.
pub(crate) fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}
