//! Visual configuration for particle rendering.
//!
//! This module provides the options that control how particles appear,
//! separate from the rules that control how they move.
//!
//! # Usage
//!
//! ```ignore
//! Animator::new()
//!     .with_palette(Palette::Daybreak)
//!     .with_links(LinkStyle { radius: 100.0, ..LinkStyle::default() })
//!     .with_background(Vec3::new(0.973, 0.961, 0.937))
//!     .run()?;
//! ```

use glam::Vec3;

/// Pre-defined color palettes for particle spawning.
///
/// The default spawner draws each particle's color from the animator's
/// palette, as does [`SpawnContext::palette_color`](crate::SpawnContext::palette_color)
/// in custom spawners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Teal and lime glow on darkness (default).
    #[default]
    Accretion,

    /// Soft sky blues and warm coral.
    Daybreak,

    /// Pale mint whites and silvered blues.
    Moonlight,

    /// Near-black marks on paper.
    Ink,

    /// Warm corals, ambers and peach.
    Ember,
}

impl Palette {
    /// Get the color stops for this palette (5 colors).
    pub fn colors(&self) -> [Vec3; 5] {
        match self {
            Palette::Accretion => [
                Vec3::new(0.176, 0.831, 0.749), // Teal (#2dd4bf)
                Vec3::new(0.639, 0.902, 0.208), // Lime (#a3e635)
                Vec3::new(0.369, 0.918, 0.831), // Light teal (#5eead4)
                Vec3::new(0.851, 0.976, 0.616), // Pale lime (#d9f99d)
                Vec3::new(0.941, 0.992, 0.980), // Mint white (#f0fdfa)
            ],
            Palette::Daybreak => [
                Vec3::new(0.608, 0.741, 0.976), // Sky blue (#9bbdf9)
                Vec3::new(1.0, 0.498, 0.416),   // Coral (#ff7f6a)
                Vec3::new(0.545, 0.718, 0.941), // Muted blue (#8bb7f0)
                Vec3::new(1.0, 0.522, 0.486),   // Soft red (#ff857c)
                Vec3::new(0.780, 0.859, 0.988), // Pale blue (#c7dbfc)
            ],
            Palette::Moonlight => [
                Vec3::new(1.0, 1.0, 1.0),       // White
                Vec3::new(0.941, 0.992, 0.980), // Mint white (#f0fdfa)
                Vec3::new(0.8, 0.984, 0.945),   // Pale teal (#ccfbf1)
                Vec3::new(0.878, 0.906, 0.937), // Silver blue (#e0e7ef)
                Vec3::new(0.753, 0.831, 0.878), // Pale slate (#c0d4e0)
            ],
            Palette::Ink => [
                Vec3::new(0.106, 0.106, 0.106), // Ink (#1b1b1b)
                Vec3::new(0.180, 0.180, 0.180), // Soft ink (#2e2e2e)
                Vec3::new(0.267, 0.267, 0.267), // Charcoal (#444444)
                Vec3::new(0.361, 0.361, 0.361), // Graphite (#5c5c5c)
                Vec3::new(0.451, 0.451, 0.451), // Faded ink (#737373)
            ],
            Palette::Ember => [
                Vec3::new(1.0, 0.498, 0.416),   // Coral (#ff7f6a)
                Vec3::new(1.0, 0.627, 0.478),   // Salmon (#ffa07a)
                Vec3::new(1.0, 0.702, 0.278),   // Amber (#ffb347)
                Vec3::new(0.886, 0.447, 0.357), // Terracotta (#e2725b)
                Vec3::new(1.0, 0.855, 0.725),   // Peach (#ffdab9)
            ],
        }
    }
}

/// Styling for proximity links drawn between nearby particles.
///
/// A pair of particles closer than `radius` is joined by a line whose
/// opacity fades linearly from `opacity` at zero distance to nothing at
/// `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkStyle {
    /// Pair distance below which a link is drawn, in pixels.
    pub radius: f32,
    /// Link color.
    pub color: Vec3,
    /// Line width in pixels.
    pub width: f32,
    /// Opacity of a zero-length link.
    pub opacity: f32,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            radius: 100.0,
            color: Vec3::splat(0.85),
            width: 1.0,
            opacity: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_stops_are_valid_colors() {
        let palettes = [
            Palette::Accretion,
            Palette::Daybreak,
            Palette::Moonlight,
            Palette::Ink,
            Palette::Ember,
        ];
        for palette in palettes {
            for color in palette.colors() {
                assert!(color.min_element() >= 0.0);
                assert!(color.max_element() <= 1.0);
            }
        }
    }

    #[test]
    fn test_default_link_style_matches_drawing_defaults() {
        let style = LinkStyle::default();
        assert_eq!(style.radius, 100.0);
        assert_eq!(style.opacity, 0.2);
    }
}
