//! # Bicone
//!
//! A central outflow ejecting particles along two opposed cones, like
//! jets leaving a detector vertex. An egui slider adjusts the cone
//! half-angle while the animation runs; the spawner reads it on every
//! recycle, so the jets reshape within a second or two.
//!
//! Uses `Arc<Mutex<T>>` to share the angle between the UI callback and
//! the spawner.
//!
//! Run with: `cargo run --example bicone --features egui`

use std::sync::{Arc, Mutex};

use backdrop::prelude::*;

fn main() {
    env_logger::init();

    let half_angle = Arc::new(Mutex::new(30.0f32));
    let spawn_angle = half_angle.clone();
    let ui_angle = half_angle.clone();

    Animator::new()
        .with_title("Bicone")
        .with_count(300)
        .with_palette(Palette::Ember)
        .with_attractor(Attractor::Center)
        .with_spawner(move |ctx| {
            let half = spawn_angle.lock().unwrap().to_radians();
            let theta = ctx.random_range(-half, half);
            let up = if ctx.random() < 0.5 { -1.0 } else { 1.0 };
            let speed = ctx.random_range(2.0, 4.0);
            Particle {
                position: ctx.center() + ctx.random_in_disk(6.0),
                velocity: Vec2::new(theta.sin() * speed, up * theta.cos() * speed),
                radius: ctx.random_range(1.0, 2.2),
                color: ctx.palette_color(),
                alpha: ctx.random_range(0.5, 1.0),
                ..Particle::default()
            }
        })
        .with_respawn(0.0, 420.0)
        .with_damping(1.0) // ballistic flight out to the recycle radius
        .with_trails(0.06)
        .with_ui(move |ctx| {
            egui::Window::new("Bicone")
                .resizable(false)
                .show(ctx, |ui| {
                    let mut half = ui_angle.lock().unwrap();
                    ui.add(
                        egui::Slider::new(&mut *half, 5.0..=85.0)
                            .text("half-angle (deg)"),
                    );
                });
        })
        .run()
        .expect("Animation failed");
}
