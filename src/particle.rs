//! The particle data model.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// A single animated particle.
///
/// Particles are created once at animator construction and mutated in place
/// every frame; the collection never grows or shrinks while the animation
/// runs. Positions are in surface pixels with the origin at the top-left
/// corner and y pointing down. Velocities are in pixels per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Velocity in pixels per frame.
    pub velocity: Vec2,
    /// Visual radius in pixels.
    pub radius: f32,
    /// Linear RGB color.
    pub color: Vec3,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Free-running phase, advanced and read by the twinkle rule.
    pub phase: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: 1.5,
            color: Vec3::ONE,
            alpha: 1.0,
            phase: 0.0,
        }
    }
}

impl Particle {
    /// Speed in pixels per frame.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Per-instance data uploaded to the GPU, one entry per particle.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct GpuParticle {
    pub position: [f32; 2],
    pub radius: f32,
    pub alpha: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl From<&Particle> for GpuParticle {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            radius: p.radius,
            alpha: p.alpha,
            color: p.color.to_array(),
            _pad: 0.0,
        }
    }
}
