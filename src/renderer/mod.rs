//! Rendering
//!
//! The drawing backend is a collaborator behind the [`Renderer`] trait. The
//! scene itself (HUD text, card discs, icons) is composed here from the game
//! state, so every backend draws the same frame.

pub mod text;

pub use text::TextRenderer;

use glam::Vec2;

use crate::consts::*;
use crate::deck::IconId;
use crate::sim::{ClickOutcome, DisplayedCard, GamePhase, GameState};

/// RGB colour
pub type Rgb = [u8; 3];

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// How a card disc is filled and outlined
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub fill: Rgb,
    pub border: Rgb,
    pub border_width: f32,
}

impl CardStyle {
    const FILL: Rgb = [252, 252, 252];

    /// Outline reflects the last click: neutral, green after a hit, red after a miss
    pub fn for_outcome(outcome: ClickOutcome) -> Self {
        let border = match outcome {
            ClickOutcome::Undefined => [155, 119, 170],
            ClickOutcome::Correct => [64, 170, 92],
            ClickOutcome::Incorrect => [214, 48, 49],
        };
        Self {
            fill: Self::FILL,
            border,
            border_width: CARD_BORDER_WIDTH,
        }
    }
}

/// Drawing primitives a backend must provide
pub trait Renderer {
    /// Start a new frame
    fn clear(&mut self);
    /// Draw a card disc centred at `center`
    fn draw_card(&mut self, center: Vec2, radius: f32, style: CardStyle);
    /// Draw an icon sprite centred at `center`, rotated by `rotation` degrees
    fn draw_icon(&mut self, icon_id: IconId, center: Vec2, rotation: f32, scale: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2, h_align: HAlign, v_align: VAlign);
    /// Show everything drawn since `clear`
    fn present(&mut self);
}

fn draw_displayed_card<R: Renderer + ?Sized>(renderer: &mut R, card: &DisplayedCard, style: CardStyle) {
    renderer.draw_card(card.anchor, CARD_RADIUS, style);
    for icon in &card.icons {
        renderer.draw_icon(icon.icon_id, icon.center, icon.rotation, icon.scale);
    }
}

/// Compose and present one frame for `state`
pub fn render_scene<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) {
    renderer.clear();

    let center_x = WIN_WIDTH / 2.0;

    if state.phase == GamePhase::GameOver {
        renderer.draw_text(
            &format!("Final score {}", state.score),
            Vec2::new(center_x, WIN_HEIGHT / 2.0 - 1.2 * FONT_SIZE),
            HAlign::Center,
            VAlign::Middle,
        );
        renderer.draw_text(
            &format!("Mistakes {}   Rounds {}", state.mistakes, state.round),
            Vec2::new(center_x, WIN_HEIGHT / 2.0),
            HAlign::Center,
            VAlign::Middle,
        );
        renderer.draw_text(
            "Thanks for playing!",
            Vec2::new(center_x, WIN_HEIGHT / 2.0 + 1.2 * FONT_SIZE),
            HAlign::Center,
            VAlign::Middle,
        );
        renderer.present();
        return;
    }

    renderer.draw_text(
        &format!("Dobble    Score {}", state.score),
        Vec2::new(center_x, 0.0),
        HAlign::Center,
        VAlign::Top,
    );
    let clock = if state.phase == GamePhase::Idle {
        format!("Time left {}  (click to start)", state.time)
    } else {
        format!("Time left {}", state.time)
    };
    renderer.draw_text(
        &clock,
        Vec2::new(center_x, 1.2 * FONT_SIZE),
        HAlign::Center,
        VAlign::Top,
    );

    let style = CardStyle::for_outcome(state.last_outcome);
    draw_displayed_card(renderer, state.upper(), style);
    draw_displayed_card(renderer, state.lower(), style);

    renderer.present();
}
