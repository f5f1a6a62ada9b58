//! Animator builder and windowed runner.

use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::animation::{Animation, AnimationConfig};
use crate::error::AnimatorError;
use crate::gpu::{GpuOptions, GpuState};
use crate::input::Input;
use crate::particle::Particle;
use crate::rules::{Attractor, Boundary, Rule};
use crate::spawn::SpawnContext;
use crate::time::Time;
use crate::visuals::{LinkStyle, Palette};

/// A particle animation builder.
///
/// Use method chaining to configure, then call [`run`](Animator::run) to
/// open a window, or [`build`](Animator::build) for a headless animation
/// you step yourself.
///
/// # Example
///
/// ```ignore
/// use backdrop::{Animator, Attractor, Falloff, Rule};
///
/// Animator::new()
///     .with_count(150)
///     .with_attractor(Attractor::Pointer)
///     .with_rule(Rule::Attract {
///         strength: 0.5,
///         radius: 300.0,
///         falloff: Falloff::Linear,
///     })
///     .run()
///     .expect("Animation failed");
/// ```
pub struct Animator {
    title: String,
    count: u32,
    width: f32,
    height: f32,
    palette: Palette,
    background: Vec3,
    attractor: Option<Attractor>,
    rules: Vec<Rule>,
    boundary: Boundary,
    damping: f32,
    respawn: Option<(f32, f32)>,
    hover_gated: bool,
    trail_fade: Option<f32>,
    links: Option<LinkStyle>,
    spawner: Option<Box<dyn Fn(&mut SpawnContext) -> Particle + Send + Sync>>,
    #[cfg(feature = "egui")]
    ui: Option<Box<dyn Fn(&egui::Context)>>,
}

impl Animator {
    /// Create a new animator with default settings.
    pub fn new() -> Self {
        Self {
            title: "backdrop".to_string(),
            count: 100,
            width: 1280.0,
            height: 720.0,
            palette: Palette::default(),
            background: Vec3::new(0.02, 0.02, 0.05),
            attractor: None,
            rules: Vec::new(),
            boundary: Boundary::default(),
            damping: 0.99,
            respawn: None,
            hover_gated: false,
            trail_fade: None,
            links: None,
            spawner: None,
            #[cfg(feature = "egui")]
            ui: None,
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the number of particles.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set the surface size in logical pixels.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the color palette sampled by spawners.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the background clear color.
    pub fn with_background(mut self, background: Vec3) -> Self {
        self.background = background;
        self
    }

    /// Set the attractor the force rules act around.
    pub fn with_attractor(mut self, attractor: Attractor) -> Self {
        self.attractor = Some(attractor);
        self
    }

    /// Add a rule to the animation.
    ///
    /// Rules are applied to every particle each frame, in the order they
    /// were added.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the boundary policy for particles leaving the surface.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the multiplicative per-frame velocity damping.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Recycle particles closer to the attractor than `min` or farther
    /// than `max`, respawning them through the spawner.
    pub fn with_respawn(mut self, min: f32, max: f32) -> Self {
        self.respawn = Some((min, max));
        self
    }

    /// Only animate while the cursor is over the window.
    pub fn with_hover_gate(mut self) -> Self {
        self.hover_gated = true;
        self
    }

    /// Fade the previous frame toward the background by `fade` each frame
    /// instead of clearing, leaving motion trails.
    pub fn with_trails(mut self, fade: f32) -> Self {
        self.trail_fade = Some(fade);
        self
    }

    /// Draw connecting lines between particles closer than the style's
    /// link radius.
    pub fn with_links(mut self, style: LinkStyle) -> Self {
        self.links = Some(style);
        self
    }

    /// Set the particle spawner function.
    ///
    /// Called once per particle at startup and again whenever a particle
    /// is recycled.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use backdrop::{Animator, Particle};
    ///
    /// Animator::new().with_spawner(|ctx| Particle {
    ///     position: ctx.center() + ctx.random_in_annulus(100.0, 400.0),
    ///     velocity: ctx.random_velocity(2.0),
    ///     color: ctx.palette_color(),
    ///     ..Particle::default()
    /// });
    /// ```
    pub fn with_spawner<F>(mut self, spawner: F) -> Self
    where
        F: Fn(&mut SpawnContext) -> Particle + Send + Sync + 'static,
    {
        self.spawner = Some(Box::new(spawner));
        self
    }

    /// Draw an egui panel over the animation.
    ///
    /// The callback runs once per frame with the overlay context. The
    /// panel chrome is themed from the animator's palette.
    #[cfg(feature = "egui")]
    pub fn with_ui<F>(mut self, ui: F) -> Self
    where
        F: Fn(&egui::Context) + 'static,
    {
        self.ui = Some(Box::new(ui));
        self
    }

    /// Build the animation without a window.
    ///
    /// The returned [`Animation`] is stepped by the caller and dropped to
    /// stop it. The windowed runner is a thin loop over the same handle.
    pub fn build(self) -> Animation {
        let spawner = self
            .spawner
            .unwrap_or_else(|| Box::new(default_spawner));

        Animation::from_config(AnimationConfig {
            count: self.count,
            width: self.width,
            height: self.height,
            palette: self.palette,
            attractor: self.attractor,
            rules: self.rules,
            boundary: self.boundary,
            damping: self.damping,
            respawn: self.respawn,
            hover_gated: self.hover_gated,
            spawner,
        })
    }

    /// Open a window and run the animation. Blocks until the window is
    /// closed or Escape is pressed.
    pub fn run(self) -> Result<(), AnimatorError> {
        let spawner = self
            .spawner
            .unwrap_or_else(|| Box::new(default_spawner));

        let config = AnimationConfig {
            count: self.count,
            width: self.width,
            height: self.height,
            palette: self.palette,
            attractor: self.attractor,
            rules: self.rules,
            boundary: self.boundary,
            damping: self.damping,
            respawn: self.respawn,
            hover_gated: self.hover_gated,
            spawner,
        };

        let options = GpuOptions {
            background: self.background,
            trail_fade: self.trail_fade,
            links: self.links,
            #[cfg(feature = "egui")]
            palette: self.palette,
            #[cfg(feature = "egui")]
            ui: self.ui,
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            title: self.title,
            config: Some(config),
            options: Some(options),
            window: None,
            gpu: None,
            animation: None,
            input: Input::new(),
            time: Time::new(),
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawner used when the builder is given none: particles scattered over
/// the surface with a slow drift and palette colors.
fn default_spawner(ctx: &mut SpawnContext) -> Particle {
    Particle {
        position: ctx.random_in_surface(),
        velocity: ctx.random_velocity(1.0),
        radius: ctx.random_range(1.0, 2.5),
        color: ctx.palette_color(),
        alpha: 1.0,
        phase: ctx.random_range(0.0, std::f32::consts::TAU),
    }
}

struct App {
    title: String,
    config: Option<AnimationConfig>,
    options: Option<GpuOptions>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    animation: Option<Animation>,
    input: Input,
    time: Time,
    error: Option<AnimatorError>,
}

impl App {
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(animation), Some(gpu)) = (self.animation.as_mut(), self.gpu.as_mut()) else {
            return;
        };

        animation.set_pointer(self.input.cursor());
        if animation.is_hover_gated() {
            animation.set_active(self.input.is_inside());
        }
        animation.step();

        match gpu.render(animation) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    gpu.resize(size.width, size.height);
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory, closing");
                event_loop.exit();
            }
            Err(err) => log::warn!("Render error: {:?}", err),
        }

        if self.time.update() {
            log::debug!(
                "{:.1} fps, {} particles, frame {}",
                self.time.fps(),
                animation.len(),
                animation.frame()
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let (Some(config), Some(options)) = (self.config.take(), self.options.take()) else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width as f64,
                config.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.error = Some(AnimatorError::Window(err));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        // The surface tracks physical pixels; spawn against the real size
        // so initial positions cover the whole window on hidpi displays.
        let mut config = config;
        let size = window.inner_size();
        if size.width > 0 && size.height > 0 {
            config.width = size.width as f32;
            config.height = size.height as f32;
        }
        let animation = Animation::from_config(config);

        let count = animation.len() as u32;
        let gpu = match pollster::block_on(GpuState::new(window.clone(), count, options)) {
            Ok(gpu) => gpu,
            Err(err) => {
                self.error = Some(err.into());
                event_loop.exit();
                return;
            }
        };

        log::info!(
            "{}: {} particles on a {:.0}x{:.0} surface",
            self.title,
            animation.len(),
            animation.width(),
            animation.height()
        );

        self.animation = Some(animation);
        self.gpu = Some(gpu);
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(gpu) = &mut self.gpu {
            if gpu.ui_event(&event) {
                return;
            }
        }

        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                if let Some(animation) = &mut self.animation {
                    animation.resize(size.width as f32, size.height as f32);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
