//! Dobble - find the one icon two cards have in common
//!
//! Core modules:
//! - `deck`: Card file loading and the shared-icon design check
//! - `sim`: Game core (icon layout, pair selection, hit-testing, round state machine)
//! - `renderer`: Drawing collaborator trait and a text frame renderer
//! - `platform`: Terminal input commands and the wall-clock tick source
//! - `settings`: Player-facing configuration (JSON)

pub mod deck;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use deck::{Card, Deck, DeckError, IconId, load_deck};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (pixels)
    pub const WIN_WIDTH: f32 = 500.0;
    pub const WIN_HEIGHT: f32 = 900.0;

    /// HUD font size; the two HUD lines take 1.2 * FONT_SIZE each
    pub const FONT_SIZE: f32 = 24.0;

    /// Card disc radius (pixels)
    pub const CARD_RADIUS: f32 = 190.0;
    /// Gap between the HUD, the upper card and the lower card
    pub const CARD_MARGIN: f32 = 20.0;
    /// Card outline width
    pub const CARD_BORDER_WIDTH: f32 = 5.0;

    /// Icon sprite edge length at scale 1.0 (atlas cells are 90x90)
    pub const ICON_SIZE: f32 = 90.0;

    /// Ring radius factors (times CARD_RADIUS) an off-centre icon may draw
    pub const RING_RADIUS_FACTORS: [f32; 3] = [0.5, 0.6, 0.7];
    /// Icon scale is drawn from MIN_SCALE + k * SCALE_STEP, k in 0..SCALE_STEPS
    pub const MIN_SCALE: f32 = 0.6;
    pub const SCALE_STEP: f32 = 0.1;
    pub const SCALE_STEPS: u32 = 7;

    /// Countdown at the start of a game (seconds)
    pub const START_TIME: i32 = 100;
    /// Seconds won by clicking the shared icon
    pub const CORRECT_TIME_BONUS: i32 = 3;
    /// Seconds lost on a wrong click
    pub const INCORRECT_TIME_PENALTY: i32 = 3;
    /// Timer cadence
    pub const TICK_INTERVAL_MS: u64 = 1000;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(405.0), 45.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, PI / 2.0);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 10.0).abs() < 1e-4);
        assert!((polar_to_cartesian(10.0, PI / 3.0).length() - 10.0).abs() < 1e-4);
    }
}
