//! Integration tests for the animation core.
//!
//! These tests drive `Animation` through the public builder: configure,
//! `build()`, step, and inspect particle state. No window or GPU is
//! involved.

use backdrop::{Animator, Attractor, Boundary, Falloff, LinkStyle, Palette, Particle, Rule, Vec2};

// ============================================================================
// Per-step pipeline
// ============================================================================

#[test]
fn test_stationary_particle_stays_put() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_spawner(|_| Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            ..Particle::default()
        })
        .build();

    for _ in 0..10 {
        animation.step();
    }

    assert_eq!(animation.particles()[0].position, Vec2::ZERO);
}

#[test]
fn test_attraction_pulls_toward_attractor() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_attractor(Attractor::Fixed(Vec2::new(100.0, 100.0)))
        .with_spawner(|_| Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            ..Particle::default()
        })
        .with_rule(Rule::Attract {
            strength: 0.5,
            radius: f32::INFINITY,
            falloff: Falloff::Constant,
        })
        .build();

    animation.step();

    let p = &animation.particles()[0];
    assert!(p.velocity.x > 0.0);
    assert!(p.velocity.y > 0.0);
}

#[test]
fn test_damping_decays_velocity() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_damping(0.9)
        .with_spawner(|_| Particle {
            position: Vec2::new(500.0, 500.0),
            velocity: Vec2::new(10.0, 0.0),
            ..Particle::default()
        })
        .build();

    let mut last = animation.particles()[0].speed();
    for _ in 0..20 {
        animation.step();
        let speed = animation.particles()[0].speed();
        assert!(speed < last);
        last = speed;
    }

    let expected = 10.0 * 0.9f32.powi(20);
    assert!((last - expected).abs() < 1e-3);
}

#[test]
fn test_damping_bounds_speed_under_constant_force() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_size(800.0, 600.0)
        .with_attractor(Attractor::Fixed(Vec2::new(400.0, 300.0)))
        .with_damping(0.9)
        .with_spawner(|_| Particle {
            position: Vec2::new(100.0, 300.0),
            velocity: Vec2::ZERO,
            ..Particle::default()
        })
        .with_rule(Rule::Attract {
            strength: 2.0,
            radius: f32::INFINITY,
            falloff: Falloff::Constant,
        })
        .build();

    // Each step adds at most `strength` to the velocity before damping,
    // so speed stays under the fixed point 2.0 * 0.9 / (1 - 0.9) = 18
    // no matter how long the pull keeps driving.
    for _ in 0..2000 {
        animation.step();
        assert!(animation.particles()[0].speed() < 25.0);
    }
}

#[test]
fn test_speed_limit_clamps_both_ways() {
    let mut animation = Animator::new()
        .with_count(2)
        .with_damping(1.0)
        .with_spawner(|ctx| Particle {
            position: Vec2::new(400.0, 300.0),
            velocity: if ctx.index == 0 {
                Vec2::new(0.05, 0.0)
            } else {
                Vec2::new(9.0, 0.0)
            },
            ..Particle::default()
        })
        .with_rule(Rule::SpeedLimit { min: 0.5, max: 3.0 })
        .build();

    animation.step();

    let speeds: Vec<f32> = animation.particles().iter().map(|p| p.speed()).collect();
    assert!((speeds[0] - 0.5).abs() < 1e-4);
    assert!((speeds[1] - 3.0).abs() < 1e-4);
}

// ============================================================================
// Boundary policies
// ============================================================================

#[test]
fn test_wrap_snaps_to_opposite_edge_with_velocity_preserved() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_size(800.0, 600.0)
        .with_damping(1.0)
        .with_spawner(|_| Particle {
            position: Vec2::new(799.5, 300.0),
            velocity: Vec2::new(3.0, 0.0),
            ..Particle::default()
        })
        .with_boundary(Boundary::Wrap)
        .build();

    animation.step();

    let p = &animation.particles()[0];
    assert_eq!(p.position.x, 0.0);
    assert_eq!(p.velocity, Vec2::new(3.0, 0.0));
    assert!(p.position.x >= 0.0 && p.position.x <= 800.0);
}

#[test]
fn test_bounce_inverts_velocity_without_teleporting() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_size(800.0, 600.0)
        .with_damping(1.0)
        .with_spawner(|_| Particle {
            position: Vec2::new(798.0, 300.0),
            velocity: Vec2::new(5.0, 0.0),
            ..Particle::default()
        })
        .with_boundary(Boundary::Bounce)
        .build();

    animation.step();

    let p = &animation.particles()[0];
    assert_eq!(p.position.x, 803.0); // still past the edge this frame
    assert_eq!(p.velocity.x, -5.0); // heading back in

    animation.step();
    assert_eq!(animation.particles()[0].position.x, 798.0);
}

// ============================================================================
// Recycling
// ============================================================================

#[test]
fn test_population_constant_through_recycling() {
    let mut animation = Animator::new()
        .with_count(50)
        .with_attractor(Attractor::Fixed(Vec2::new(640.0, 360.0)))
        .with_spawner(|ctx| Particle {
            position: ctx.center() + ctx.random_in_annulus(100.0, 300.0),
            velocity: ctx.random_velocity(5.0),
            ..Particle::default()
        })
        .with_rule(Rule::Attract {
            strength: 5.0,
            radius: f32::INFINITY,
            falloff: Falloff::InverseSquare,
        })
        .with_respawn(50.0, 400.0)
        .build();

    for _ in 0..200 {
        animation.step();
        assert_eq!(animation.len(), 50);
    }
}

#[test]
fn test_recycled_particles_return_to_spawn_band() {
    let center = Vec2::new(640.0, 360.0);
    let mut animation = Animator::new()
        .with_count(20)
        .with_attractor(Attractor::Fixed(center))
        .with_spawner(|ctx| {
            let offset = ctx.random_in_annulus(100.0, 300.0);
            Particle {
                position: ctx.center() + offset,
                velocity: ctx.outward_velocity(offset, 30.0),
                ..Particle::default()
            }
        })
        .with_respawn(50.0, 400.0)
        .build();

    // Everything flies outward, crosses the outer radius, and is reseeded
    // into the annulus. After any step no particle sits outside the band.
    for _ in 0..200 {
        animation.step();
        for p in animation.particles() {
            let dist = p.position.distance(center);
            assert!((50.0..=400.0).contains(&dist), "particle at distance {dist}");
        }
    }
}

#[test]
fn test_inward_particles_recycle_at_the_inner_threshold() {
    let center = Vec2::new(640.0, 360.0);
    let mut animation = Animator::new()
        .with_count(20)
        .with_attractor(Attractor::Fixed(center))
        .with_spawner(|ctx| {
            let offset = ctx.random_in_annulus(100.0, 300.0);
            Particle {
                position: ctx.center() + offset,
                velocity: -offset.normalize() * 20.0,
                ..Particle::default()
            }
        })
        .with_respawn(50.0, 400.0)
        .build();

    // Everything dives straight at the attractor. Crossing the inner
    // radius must reseed the particle into the annulus, not let it
    // slingshot through the center.
    for _ in 0..100 {
        animation.step();
        for p in animation.particles() {
            let dist = p.position.distance(center);
            assert!((50.0..=400.0).contains(&dist), "particle at distance {dist}");
        }
    }
}

// ============================================================================
// Gating and pointer state
// ============================================================================

#[test]
fn test_hover_gate_freezes_until_activated() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_hover_gate()
        .with_spawner(|_| Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(2.0, 0.0),
            ..Particle::default()
        })
        .build();

    animation.step();
    assert_eq!(animation.particles()[0].position, Vec2::new(100.0, 100.0));
    assert_eq!(animation.frame(), 0);

    animation.set_active(true);
    animation.step();
    assert_eq!(animation.particles()[0].position, Vec2::new(102.0, 100.0));
    assert_eq!(animation.frame(), 1);
}

#[test]
fn test_pointer_attractor_inert_until_seen() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_attractor(Attractor::Pointer)
        .with_spawner(|_| Particle {
            position: Vec2::new(100.0, 100.0),
            ..Particle::default()
        })
        .with_rule(Rule::Attract {
            strength: 1.0,
            radius: f32::INFINITY,
            falloff: Falloff::Constant,
        })
        .build();

    animation.step();
    assert_eq!(animation.particles()[0].velocity, Vec2::ZERO);

    animation.set_pointer(Some(Vec2::new(400.0, 400.0)));
    animation.step();
    assert!(animation.particles()[0].velocity.length() > 0.0);
}

#[test]
fn test_resize_recenters_center_attractor() {
    let mut animation = Animator::new()
        .with_count(1)
        .with_size(800.0, 600.0)
        .with_attractor(Attractor::Center)
        .with_spawner(|_| Particle::default())
        .build();

    assert_eq!(
        animation.attractor_position(),
        Some(Vec2::new(400.0, 300.0))
    );

    animation.resize(1000.0, 500.0);
    assert_eq!(
        animation.attractor_position(),
        Some(Vec2::new(500.0, 250.0))
    );
}

// ============================================================================
// Visual rules, links, palettes
// ============================================================================

#[test]
fn test_twinkle_keeps_opacity_in_range() {
    let mut animation = Animator::new()
        .with_count(5)
        .with_spawner(|ctx| Particle {
            position: ctx.random_in_surface(),
            velocity: Vec2::ZERO,
            phase: ctx.random_range(0.0, std::f32::consts::TAU),
            ..Particle::default()
        })
        .with_rule(Rule::Twinkle {
            speed: 0.3,
            min: 0.1,
            max: 0.7,
        })
        .build();

    for _ in 0..100 {
        animation.step();
        for p in animation.particles() {
            assert!(p.alpha >= 0.1 - 1e-6 && p.alpha <= 0.7 + 1e-6);
        }
    }
}

#[test]
fn test_links_fade_linearly_and_cut_off() {
    let positions = [
        Vec2::new(100.0, 100.0),
        Vec2::new(150.0, 100.0),
        Vec2::new(500.0, 500.0),
    ];
    let animation = Animator::new()
        .with_count(3)
        .with_spawner(move |ctx| Particle {
            position: positions[ctx.index as usize],
            velocity: Vec2::ZERO,
            ..Particle::default()
        })
        .build();

    let style = LinkStyle {
        radius: 100.0,
        opacity: 0.2,
        ..LinkStyle::default()
    };
    let links = animation.links(&style);

    assert_eq!(links.len(), 1); // only the 50 px pair connects
    assert!((links[0].alpha - 0.1).abs() < 1e-6); // 0.2 * (1 - 50/100)
}

#[test]
fn test_default_spawner_draws_palette_colors() {
    let animation = Animator::new()
        .with_count(40)
        .with_palette(Palette::Ember)
        .build();

    let stops = Palette::Ember.colors();
    for p in animation.particles() {
        assert!(stops.contains(&p.color));
    }
}

#[test]
fn test_build_reports_configured_dimensions() {
    let animation = Animator::new()
        .with_count(7)
        .with_size(320.0, 240.0)
        .build();

    assert_eq!(animation.len(), 7);
    assert_eq!(animation.width(), 320.0);
    assert_eq!(animation.height(), 240.0);
    assert!(animation.is_active());
}
