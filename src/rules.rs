//! Particle behavior rules.
//!
//! Rules define how particles behave each frame. They are applied in order,
//! per particle, before velocity is integrated into position.
//!
//! # Rule Categories
//!
//! - **Point Forces**: Attract, Swirl, Orbit
//! - **Physics**: SpeedLimit
//! - **Visual**: Twinkle, ColorBySpeed
//!
//! Force rules act relative to the animator's [`Attractor`]; an animator
//! without one leaves them inert. Damping, the boundary policy and particle
//! recycling are animator configuration rather than rules, so the per-frame
//! order (rules, integrate, damp, boundary, recycle) is fixed by the engine
//! and cannot be mis-assembled per instance.

use glam::{Vec2, Vec3};

use crate::particle::Particle;

/// Where an animator's force rules pull toward.
///
/// Fixed at construction. An animator has at most one attractor; force rules
/// all act relative to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attractor {
    /// Follow the cursor. Inert until the cursor has been seen at least once.
    Pointer,

    /// The surface center. Tracks resizes.
    Center,

    /// A constant point in surface pixels.
    Fixed(Vec2),
}

impl Attractor {
    /// Resolve to a concrete point for the current frame, if one exists.
    pub(crate) fn resolve(&self, width: f32, height: f32, pointer: Option<Vec2>) -> Option<Vec2> {
        match self {
            Attractor::Pointer => pointer,
            Attractor::Center => Some(Vec2::new(width * 0.5, height * 0.5)),
            Attractor::Fixed(point) => Some(*point),
        }
    }
}

/// Distance falloff functions for force-based rules.
///
/// Controls how a force's strength changes with distance from the attractor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Falloff {
    /// Constant force regardless of distance.
    #[default]
    Constant,

    /// Linear falloff: force decreases linearly to zero at max range.
    Linear,

    /// Inverse falloff: force = 1/distance (with softening).
    Inverse,

    /// Inverse-square falloff: force = 1/distance² (realistic gravity/EM).
    InverseSquare,

    /// Smooth falloff using smoothstep for gradual transitions.
    Smooth,
}

impl Falloff {
    /// Falloff factor for a particle `dist` pixels from the force source.
    /// `radius` is the force's effect radius.
    pub fn factor(&self, dist: f32, radius: f32) -> f32 {
        match self {
            Falloff::Constant => 1.0,
            Falloff::Linear => 1.0 - dist / radius,
            Falloff::Inverse => 1.0 / (dist + 0.01),
            Falloff::InverseSquare => 1.0 / (dist * dist + 0.0001),
            Falloff::Smooth => 1.0 - smoothstep(0.0, radius, dist),
        }
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Per-frame inputs shared by every rule application.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StepContext {
    /// The attractor's resolved position this frame, if any.
    pub attractor: Option<Vec2>,
}

/// Rules that define particle behavior.
///
/// Rules are applied every frame in the order they are added. Each rule
/// modifies particle velocity (or a visual attribute). After all rules
/// execute, velocity is integrated: `position += velocity`.
///
/// # Example
///
/// ```ignore
/// Animator::new()
///     .with_attractor(Attractor::Pointer)
///     .with_rule(Rule::Attract { strength: 0.5, radius: 300.0, falloff: Falloff::Linear })
///     .with_rule(Rule::SpeedLimit { min: 0.0, max: 5.0 })
///     .run()?;
/// ```
#[derive(Clone, Debug)]
pub enum Rule {
    /// Pull particles toward the attractor.
    ///
    /// Particles within `radius` of the attractor receive a velocity
    /// increment along the attractor direction, scaled by the falloff.
    ///
    /// # Fields
    ///
    /// - `strength` - Velocity gain per frame at falloff factor 1
    /// - `radius` - Effect radius in pixels (`f32::INFINITY` for unlimited)
    /// - `falloff` - How force decreases with distance
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Gentle field around the cursor
    /// Rule::Attract {
    ///     strength: 0.5,
    ///     radius: 300.0,
    ///     falloff: Falloff::Linear,
    /// }
    ///
    /// // Black-hole pull, strongest up close
    /// Rule::Attract {
    ///     strength: 10.0,
    ///     radius: f32::INFINITY,
    ///     falloff: Falloff::InverseSquare,
    /// }
    /// ```
    Attract {
        /// Attraction strength.
        strength: f32,
        /// Effect radius in pixels.
        radius: f32,
        /// Distance falloff function.
        falloff: Falloff,
    },

    /// Push particles sideways around the attractor.
    ///
    /// Adds a constant tangential velocity increment, perpendicular to the
    /// attractor direction. Combine with [`Rule::Attract`] for spiraling
    /// accretion-style motion.
    ///
    /// # Parameters
    ///
    /// - `strength` - Tangential velocity gain per frame
    ///
    /// # Example
    ///
    /// ```ignore
    /// Rule::Attract { strength: 10.0, radius: f32::INFINITY, falloff: Falloff::InverseSquare }
    /// Rule::Swirl { strength: 0.5 }
    /// ```
    Swirl {
        /// Tangential strength.
        strength: f32,
    },

    /// Orbit particles around the attractor.
    ///
    /// Applies centripetal force plus tangential correction toward the
    /// circular orbital speed `sqrt(strength * dist)`, so particles settle
    /// into near-circular paths instead of spiraling in.
    ///
    /// # Parameters
    ///
    /// - `strength` - Centripetal strength (small values, 0.01 to 0.1,
    ///   suit pixel scales)
    ///
    /// # Example
    ///
    /// ```ignore
    /// .with_attractor(Attractor::Center)
    /// .with_rule(Rule::Orbit { strength: 0.05 })
    /// ```
    Orbit {
        /// Orbital strength.
        strength: f32,
    },

    /// Clamp particle speed to a range.
    ///
    /// # Fields
    ///
    /// - `min` - Minimum speed (0.0 for no minimum)
    /// - `max` - Maximum speed
    ///
    /// # Example
    ///
    /// ```ignore
    /// Rule::SpeedLimit {
    ///     min: 0.5,              // Always moving
    ///     max: 3.0,              // But not too fast
    /// }
    /// ```
    SpeedLimit {
        /// Minimum speed (0.0 for no minimum).
        min: f32,
        /// Maximum speed.
        max: f32,
    },

    /// Pulse particle opacity on a sinusoid.
    ///
    /// Advances the particle's phase by `speed` each frame and maps the
    /// sine of the phase onto `[min, max]`. Randomize spawn phases to keep
    /// particles from pulsing in lockstep.
    ///
    /// # Fields
    ///
    /// - `speed` - Phase advance per frame (typical: 0.01 to 0.03)
    /// - `min` - Opacity at the bottom of the pulse
    /// - `max` - Opacity at the top of the pulse
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Twinkling starfield
    /// Rule::Twinkle { speed: 0.02, min: 0.0, max: 0.6 }
    /// ```
    Twinkle {
        /// Phase advance per frame.
        speed: f32,
        /// Minimum opacity.
        min: f32,
        /// Maximum opacity.
        max: f32,
    },

    /// Color particles based on their speed.
    ///
    /// Blends between two colors using speed / max_speed.
    /// Useful for visualizing motion: fast particles glow differently.
    ///
    /// # Fields
    ///
    /// - `slow_color` - Color at zero speed
    /// - `fast_color` - Color at max speed
    /// - `max_speed` - Speed for full fast_color
    ///
    /// # Example
    ///
    /// ```ignore
    /// Rule::ColorBySpeed {
    ///     slow_color: Vec3::new(0.2, 0.3, 0.8),  // Blue when slow
    ///     fast_color: Vec3::new(1.0, 0.9, 0.5),  // Yellow when fast
    ///     max_speed: 2.0,
    /// }
    /// ```
    ColorBySpeed {
        /// Color at zero speed.
        slow_color: Vec3,
        /// Color at max speed.
        fast_color: Vec3,
        /// Speed for full fast_color.
        max_speed: f32,
    },
}

impl Rule {
    /// Apply this rule to one particle.
    pub(crate) fn apply(&self, p: &mut Particle, ctx: &StepContext) {
        match self {
            Rule::Attract {
                strength,
                radius,
                falloff,
            } => {
                let Some(target) = ctx.attractor else { return };
                let to_target = target - p.position;
                let dist = to_target.length();
                if dist > 0.001 && dist < *radius {
                    let dir = to_target / dist;
                    p.velocity += dir * *strength * falloff.factor(dist, *radius);
                }
            }

            Rule::Swirl { strength } => {
                let Some(target) = ctx.attractor else { return };
                let to_target = target - p.position;
                let dist = to_target.length();
                if dist > 0.001 {
                    let tangent = Vec2::new(-to_target.y, to_target.x) / dist;
                    p.velocity += tangent * *strength;
                }
            }

            Rule::Orbit { strength } => {
                let Some(center) = ctx.attractor else { return };
                let to_center = center - p.position;
                let dist = to_center.length();
                if dist > 0.001 {
                    let centripetal = to_center / dist * *strength;
                    let tangent = Vec2::new(-to_center.y, to_center.x) / dist;
                    let orbital_speed = (*strength * dist).sqrt();
                    let current_tangent_speed = p.velocity.dot(tangent);
                    p.velocity += centripetal;
                    p.velocity += tangent * (orbital_speed - current_tangent_speed) * 0.1;
                }
            }

            Rule::SpeedLimit { min, max } => {
                let speed = p.velocity.length();
                if speed > 0.0001 {
                    let clamped = speed.clamp(*min, *max);
                    p.velocity = p.velocity / speed * clamped;
                }
            }

            Rule::Twinkle { speed, min, max } => {
                p.phase += *speed;
                p.alpha = min + (max - min) * (0.5 + 0.5 * p.phase.sin());
            }

            Rule::ColorBySpeed {
                slow_color,
                fast_color,
                max_speed,
            } => {
                let t = (p.velocity.length() / *max_speed).clamp(0.0, 1.0);
                p.color = slow_color.lerp(*fast_color, t);
            }
        }
    }
}

/// What happens when a particle crosses a surface edge.
///
/// Applied after integration and damping, once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Boundary {
    /// Particles exiting one side reappear on the opposite side with
    /// velocity preserved. Creates an endless-feeling space with no edges.
    Wrap,

    /// Particles reflect off the edges: the crossed axis's velocity is
    /// turned back toward the interior. Position is left untouched.
    Bounce,

    /// No edge handling. Pair with a recycle band so escaping particles
    /// come back.
    #[default]
    Open,
}

impl Boundary {
    /// Apply this policy to one particle against a `width` x `height` surface.
    pub(crate) fn apply(&self, p: &mut Particle, width: f32, height: f32) {
        match self {
            Boundary::Wrap => {
                if p.position.x < 0.0 {
                    p.position.x = width;
                } else if p.position.x > width {
                    p.position.x = 0.0;
                }
                if p.position.y < 0.0 {
                    p.position.y = height;
                } else if p.position.y > height {
                    p.position.y = 0.0;
                }
            }

            // Magnitude-based flips stay correct even if a slow particle
            // sits outside the bound for consecutive frames.
            Boundary::Bounce => {
                if p.position.x < 0.0 {
                    p.velocity.x = p.velocity.x.abs();
                } else if p.position.x > width {
                    p.velocity.x = -p.velocity.x.abs();
                }
                if p.position.y < 0.0 {
                    p.velocity.y = p.velocity.y.abs();
                } else if p.position.y > height {
                    p.velocity.y = -p.velocity.y.abs();
                }
            }

            Boundary::Open => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            ..Particle::default()
        }
    }

    #[test]
    fn test_falloff_constant_ignores_distance() {
        assert_eq!(Falloff::Constant.factor(0.0, 100.0), 1.0);
        assert_eq!(Falloff::Constant.factor(99.0, 100.0), 1.0);
    }

    #[test]
    fn test_falloff_linear_hits_zero_at_radius() {
        assert!((Falloff::Linear.factor(0.0, 100.0) - 1.0).abs() < 1e-6);
        assert!((Falloff::Linear.factor(50.0, 100.0) - 0.5).abs() < 1e-6);
        assert!(Falloff::Linear.factor(100.0, 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_falloff_inverse_is_softened_at_zero() {
        let at_zero = Falloff::Inverse.factor(0.0, 100.0);
        assert!(at_zero.is_finite());
        let sq_at_zero = Falloff::InverseSquare.factor(0.0, 100.0);
        assert!(sq_at_zero.is_finite());
    }

    #[test]
    fn test_falloff_smooth_spans_zero_to_one() {
        assert!((Falloff::Smooth.factor(0.0, 100.0) - 1.0).abs() < 1e-6);
        assert!(Falloff::Smooth.factor(100.0, 100.0).abs() < 1e-6);
        let mid = Falloff::Smooth.factor(50.0, 100.0);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_attract_pulls_toward_target() {
        let mut p = particle_at(0.0, 0.0);
        let ctx = StepContext {
            attractor: Some(Vec2::new(100.0, 100.0)),
        };
        Rule::Attract {
            strength: 1.0,
            radius: f32::INFINITY,
            falloff: Falloff::Constant,
        }
        .apply(&mut p, &ctx);
        assert!(p.velocity.x > 0.0);
        assert!(p.velocity.y > 0.0);
    }

    #[test]
    fn test_attract_is_inert_outside_radius() {
        let mut p = particle_at(0.0, 0.0);
        let ctx = StepContext {
            attractor: Some(Vec2::new(500.0, 0.0)),
        };
        Rule::Attract {
            strength: 1.0,
            radius: 300.0,
            falloff: Falloff::Linear,
        }
        .apply(&mut p, &ctx);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_attract_is_inert_without_attractor() {
        let mut p = particle_at(10.0, 10.0);
        let ctx = StepContext { attractor: None };
        Rule::Attract {
            strength: 1.0,
            radius: f32::INFINITY,
            falloff: Falloff::Constant,
        }
        .apply(&mut p, &ctx);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_swirl_is_perpendicular_to_attractor_direction() {
        let mut p = particle_at(0.0, 0.0);
        let target = Vec2::new(100.0, 0.0);
        let ctx = StepContext {
            attractor: Some(target),
        };
        Rule::Swirl { strength: 0.5 }.apply(&mut p, &ctx);
        let radial = (target - p.position).normalize();
        assert!(p.velocity.dot(radial).abs() < 1e-6);
        assert!((p.velocity.length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_steers_toward_orbital_speed() {
        let mut p = particle_at(160.0, 100.0);
        let center = Vec2::new(100.0, 100.0);
        let ctx = StepContext {
            attractor: Some(center),
        };
        let before = (center - p.position).length();
        for _ in 0..200 {
            Rule::Orbit { strength: 0.05 }.apply(&mut p, &ctx);
            p.position += p.velocity;
        }
        let after = (center - p.position).length();
        // Still circling in the same general band, not flung away or sunk.
        assert!(after > before * 0.3 && after < before * 3.0);
    }

    #[test]
    fn test_speed_limit_clamps_both_ends() {
        let mut fast = particle_at(0.0, 0.0);
        fast.velocity = Vec2::new(30.0, 40.0);
        Rule::SpeedLimit { min: 0.0, max: 5.0 }.apply(&mut fast, &StepContext { attractor: None });
        assert!((fast.speed() - 5.0).abs() < 1e-4);

        let mut slow = particle_at(0.0, 0.0);
        slow.velocity = Vec2::new(0.1, 0.0);
        Rule::SpeedLimit { min: 1.0, max: 5.0 }.apply(&mut slow, &StepContext { attractor: None });
        assert!((slow.speed() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_limit_leaves_stationary_particles_alone() {
        let mut p = particle_at(0.0, 0.0);
        Rule::SpeedLimit { min: 1.0, max: 5.0 }.apply(&mut p, &StepContext { attractor: None });
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_twinkle_stays_within_bounds() {
        let mut p = particle_at(0.0, 0.0);
        let rule = Rule::Twinkle {
            speed: 0.37,
            min: 0.0,
            max: 0.6,
        };
        let ctx = StepContext { attractor: None };
        for _ in 0..500 {
            rule.apply(&mut p, &ctx);
            assert!(p.alpha >= 0.0 && p.alpha <= 0.6, "alpha {} out of range", p.alpha);
        }
    }

    #[test]
    fn test_color_by_speed_blends_endpoints() {
        let slow_color = Vec3::new(0.0, 0.0, 1.0);
        let fast_color = Vec3::new(1.0, 0.0, 0.0);
        let rule = Rule::ColorBySpeed {
            slow_color,
            fast_color,
            max_speed: 2.0,
        };
        let ctx = StepContext { attractor: None };

        let mut still = particle_at(0.0, 0.0);
        rule.apply(&mut still, &ctx);
        assert_eq!(still.color, slow_color);

        let mut fast = particle_at(0.0, 0.0);
        fast.velocity = Vec2::new(10.0, 0.0);
        rule.apply(&mut fast, &ctx);
        assert_eq!(fast.color, fast_color);
    }

    #[test]
    fn test_wrap_snaps_to_opposite_edge() {
        let mut p = particle_at(-3.0, 50.0);
        p.velocity = Vec2::new(-1.0, 0.0);
        Boundary::Wrap.apply(&mut p, 200.0, 100.0);
        assert_eq!(p.position.x, 200.0);
        assert_eq!(p.velocity, Vec2::new(-1.0, 0.0));

        let mut q = particle_at(50.0, 103.0);
        Boundary::Wrap.apply(&mut q, 200.0, 100.0);
        assert_eq!(q.position.y, 0.0);
    }

    #[test]
    fn test_bounce_turns_velocity_inward_without_moving() {
        let mut p = particle_at(-2.0, 110.0);
        p.velocity = Vec2::new(-3.0, 4.0);
        Boundary::Bounce.apply(&mut p, 200.0, 100.0);
        assert_eq!(p.position, Vec2::new(-2.0, 110.0));
        assert_eq!(p.velocity, Vec2::new(3.0, -4.0));

        // Applying again must not flip back.
        Boundary::Bounce.apply(&mut p, 200.0, 100.0);
        assert_eq!(p.velocity, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_open_boundary_does_nothing() {
        let mut p = particle_at(-50.0, 500.0);
        p.velocity = Vec2::new(1.0, 1.0);
        Boundary::Open.apply(&mut p, 200.0, 100.0);
        assert_eq!(p.position, Vec2::new(-50.0, 500.0));
        assert_eq!(p.velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_attractor_resolution() {
        let pointer = Some(Vec2::new(12.0, 34.0));
        assert_eq!(Attractor::Pointer.resolve(800.0, 600.0, pointer), pointer);
        assert_eq!(Attractor::Pointer.resolve(800.0, 600.0, None), None);
        assert_eq!(
            Attractor::Center.resolve(800.0, 600.0, None),
            Some(Vec2::new(400.0, 300.0))
        );
        assert_eq!(
            Attractor::Fixed(Vec2::new(5.0, 6.0)).resolve(800.0, 600.0, pointer),
            Some(Vec2::new(5.0, 6.0))
        );
    }
}
