//! The animation core: a fixed set of particles advanced one step per frame.

use glam::Vec2;

use crate::particle::Particle;
use crate::rules::{Attractor, Boundary, Rule, StepContext};
use crate::spawn::SpawnContext;
use crate::visuals::{LinkStyle, Palette};

/// Everything an [`Animation`] is built from. Assembled by the builder.
pub(crate) struct AnimationConfig {
    pub count: u32,
    pub width: f32,
    pub height: f32,
    pub palette: Palette,
    pub attractor: Option<Attractor>,
    pub rules: Vec<Rule>,
    pub boundary: Boundary,
    pub damping: f32,
    pub respawn: Option<(f32, f32)>,
    pub hover_gated: bool,
    pub spawner: Box<dyn Fn(&mut SpawnContext) -> Particle + Send + Sync>,
}

/// A running animation, stepped by its owner.
///
/// `Animation` holds the particles and configuration but no window or GPU
/// resources, so it can be driven headless: call [`step`](Animation::step)
/// once per frame and read [`particles`](Animation::particles) to draw.
/// The windowed runner does exactly that. Dropping the animation releases
/// everything; there is no detached loop to cancel.
///
/// Each step runs the fixed pipeline:
///
/// 1. rules, in the order they were added
/// 2. `position += velocity`
/// 3. `velocity *= damping`
/// 4. boundary policy
/// 5. recycle particles that left the respawn band
pub struct Animation {
    particles: Vec<Particle>,
    spawner: Box<dyn Fn(&mut SpawnContext) -> Particle + Send + Sync>,
    rules: Vec<Rule>,
    attractor: Option<Attractor>,
    boundary: Boundary,
    damping: f32,
    respawn: Option<(f32, f32)>,
    palette: Palette,
    width: f32,
    height: f32,
    pointer: Option<Vec2>,
    hover_gated: bool,
    active: bool,
    frame: u64,
}

impl Animation {
    pub(crate) fn from_config(config: AnimationConfig) -> Self {
        // The pointer has not been seen yet, so a pointer attractor spawns
        // relative to the surface center via SpawnContext::center.
        let attractor = config
            .attractor
            .and_then(|a| a.resolve(config.width, config.height, None));

        let particles = (0..config.count)
            .map(|i| {
                let mut ctx = SpawnContext::new(
                    i,
                    config.count,
                    config.width,
                    config.height,
                    attractor,
                    config.palette,
                );
                (config.spawner)(&mut ctx)
            })
            .collect();

        Self {
            particles,
            spawner: config.spawner,
            rules: config.rules,
            attractor: config.attractor,
            boundary: config.boundary,
            damping: config.damping,
            respawn: config.respawn,
            palette: config.palette,
            width: config.width,
            height: config.height,
            pointer: None,
            hover_gated: config.hover_gated,
            active: !config.hover_gated,
            frame: 0,
        }
    }

    /// Advance the animation by one frame.
    ///
    /// A no-op while the animation is inactive (see
    /// [`set_active`](Animation::set_active)); the frozen frame stays
    /// drawable.
    pub fn step(&mut self) {
        if !self.active {
            return;
        }

        let ctx = StepContext {
            attractor: self.attractor_position(),
        };
        let count = self.particles.len() as u32;

        for (index, p) in self.particles.iter_mut().enumerate() {
            for rule in &self.rules {
                rule.apply(p, &ctx);
            }

            // Unit-less per-frame step; vsync paces the windowed loop.
            p.position += p.velocity;
            p.velocity *= self.damping;

            self.boundary.apply(p, self.width, self.height);

            if let (Some((min_dist, max_dist)), Some(center)) = (self.respawn, ctx.attractor) {
                let dist = (p.position - center).length();
                if dist < min_dist || dist > max_dist {
                    let mut spawn_ctx = SpawnContext::new(
                        index as u32,
                        count,
                        self.width,
                        self.height,
                        Some(center),
                        self.palette,
                    );
                    *p = (self.spawner)(&mut spawn_ctx);
                }
            }
        }

        self.frame += 1;
    }

    /// The particles, in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles. Fixed for the animation's lifetime.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when the animation has no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Surface width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Update the surface size. A center attractor follows the new center.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Feed the current cursor position (surface pixels), or `None` if the
    /// cursor has not been seen. Drives a [`Attractor::Pointer`].
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Freeze or resume the animation. The windowed runner drives this from
    /// cursor presence when the animator is hover gated.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether stepping currently advances the animation.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn is_hover_gated(&self) -> bool {
        self.hover_gated
    }

    /// The attractor's position this frame, if the animator has one and it
    /// resolves (a pointer attractor resolves once the cursor has been seen).
    pub fn attractor_position(&self) -> Option<Vec2> {
        self.attractor
            .and_then(|a| a.resolve(self.width, self.height, self.pointer))
    }

    /// Collect the proximity links to draw this frame.
    ///
    /// Every pair closer than `style.radius` yields a link whose opacity
    /// fades linearly with distance. The pair scan is O(n²), which is fine
    /// at decorative particle counts; output is capped at eight times the
    /// particle count to bound the draw.
    pub fn links(&self, style: &LinkStyle) -> Vec<Link> {
        let max_links = self.particles.len() * 8;
        let mut links = Vec::new();

        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = self.particles[i].position;
                let b = self.particles[j].position;
                let dist = a.distance(b);
                if dist < style.radius {
                    links.push(Link {
                        a,
                        b,
                        alpha: style.opacity * (1.0 - dist / style.radius),
                    });
                    if links.len() >= max_links {
                        return links;
                    }
                }
            }
        }

        links
    }
}

/// One proximity link between two particles, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// First endpoint in surface pixels.
    pub a: Vec2,
    /// Second endpoint in surface pixels.
    pub b: Vec2,
    /// Resolved opacity after distance falloff.
    pub alpha: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: u32) -> AnimationConfig {
        AnimationConfig {
            count,
            width: 800.0,
            height: 600.0,
            palette: Palette::default(),
            attractor: None,
            rules: Vec::new(),
            boundary: Boundary::Open,
            damping: 1.0,
            respawn: None,
            hover_gated: false,
            spawner: Box::new(|ctx| Particle {
                position: Vec2::new(ctx.index as f32 * 10.0, 50.0),
                ..Particle::default()
            }),
        }
    }

    #[test]
    fn test_spawner_sees_every_index() {
        let anim = Animation::from_config(config(5));
        assert_eq!(anim.len(), 5);
        for (i, p) in anim.particles().iter().enumerate() {
            assert_eq!(p.position.x, i as f32 * 10.0);
        }
    }

    #[test]
    fn test_hover_gate_starts_inactive() {
        let mut cfg = config(1);
        cfg.hover_gated = true;
        let anim = Animation::from_config(cfg);
        assert!(!anim.is_active());
        assert!(anim.is_hover_gated());

        let ungated = Animation::from_config(config(1));
        assert!(ungated.is_active());
    }

    #[test]
    fn test_pointer_attractor_waits_for_cursor() {
        let mut cfg = config(1);
        cfg.attractor = Some(Attractor::Pointer);
        let mut anim = Animation::from_config(cfg);
        assert_eq!(anim.attractor_position(), None);

        anim.set_pointer(Some(Vec2::new(40.0, 30.0)));
        assert_eq!(anim.attractor_position(), Some(Vec2::new(40.0, 30.0)));
    }

    #[test]
    fn test_center_attractor_follows_resize() {
        let mut cfg = config(1);
        cfg.attractor = Some(Attractor::Center);
        let mut anim = Animation::from_config(cfg);
        assert_eq!(anim.attractor_position(), Some(Vec2::new(400.0, 300.0)));

        anim.resize(1000.0, 500.0);
        assert_eq!(anim.attractor_position(), Some(Vec2::new(500.0, 250.0)));
    }

    #[test]
    fn test_links_fade_with_distance() {
        let mut cfg = config(3);
        cfg.spawner = Box::new(|ctx| Particle {
            // 0 and 1 sit 50 apart; 2 is far away from both.
            position: match ctx.index {
                0 => Vec2::new(0.0, 0.0),
                1 => Vec2::new(50.0, 0.0),
                _ => Vec2::new(500.0, 500.0),
            },
            ..Particle::default()
        });
        let anim = Animation::from_config(cfg);

        let style = LinkStyle {
            radius: 100.0,
            opacity: 0.2,
            ..LinkStyle::default()
        };
        let links = anim.links(&style);
        assert_eq!(links.len(), 1);
        assert!((links[0].alpha - 0.1).abs() < 1e-6);
    }
}
