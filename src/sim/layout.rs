//! Icon layout for a displayed card
//!
//! Every time a card is shown its icons are shuffled and re-placed:
//! - the last icon (after shuffling) sits at the card centre
//! - the others sit on a ring, evenly spaced from one random offset,
//!   each with its own random radius, rotation and scale
//!
//! Angles are degrees, counter-clockwise from the +x axis. Screen y grows
//! downward, so projection flips the y component.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shuffle::shuffle;
use crate::consts::*;
use crate::deck::{Card, IconId};
use crate::{normalize_degrees, polar_to_cartesian};

/// Which of the two on-screen card positions a card occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSlot {
    Upper,
    Lower,
}

impl CardSlot {
    /// Screen-space centre of the card disc
    pub fn anchor(self) -> Vec2 {
        let hud_height = 2.2 * FONT_SIZE;
        let upper_y = hud_height + CARD_MARGIN + CARD_RADIUS;
        let y = match self {
            CardSlot::Upper => upper_y,
            CardSlot::Lower => upper_y + 2.0 * CARD_RADIUS + CARD_MARGIN,
        };
        Vec2::new(WIN_WIDTH / 2.0, y)
    }
}

/// An icon placed on a displayed card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedIcon {
    pub icon_id: IconId,
    /// Distance from the card centre (pixels)
    pub radius: f32,
    /// Placement angle around the card centre (degrees, [0, 360))
    pub angle: f32,
    /// Self-rotation when drawn (degrees)
    pub rotation: f32,
    /// Size multiplier applied to ICON_SIZE
    pub scale: f32,
    /// Screen-space centre, written by [`DisplayedCard::project`]
    pub center: Vec2,
}

impl PlacedIcon {
    /// Click tolerance around the icon centre
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        ICON_SIZE / 2.0 * self.scale
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.hit_radius()
    }

    /// Centre icons are the ones with radius 0
    pub fn is_centered(&self) -> bool {
        self.radius == 0.0
    }
}

/// A deck card as shown for one round. Built fresh every round; the deck
/// itself never carries geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayedCard {
    /// Index of the source card in the deck
    pub card_index: usize,
    /// Screen-space centre of the card disc
    pub anchor: Vec2,
    /// Icons in draw order
    pub icons: Vec<PlacedIcon>,
}

impl DisplayedCard {
    /// Recompute every icon's screen centre around `anchor`
    pub fn project(&mut self, anchor: Vec2) {
        self.anchor = anchor;
        for icon in &mut self.icons {
            let offset = polar_to_cartesian(icon.radius, icon.angle.to_radians());
            icon.center = anchor + Vec2::new(offset.x, -offset.y);
        }
    }

    /// Builder form of [`DisplayedCard::project`]
    pub fn projected(mut self, anchor: Vec2) -> Self {
        self.project(anchor);
        self
    }

    pub fn icon(&self, icon_id: IconId) -> Option<&PlacedIcon> {
        self.icons.iter().find(|i| i.icon_id == icon_id)
    }

    /// Icons whose hit circle contains `point`, in draw order
    pub fn icons_at(&self, point: Vec2) -> impl Iterator<Item = &PlacedIcon> {
        self.icons.iter().filter(move |i| i.contains(point))
    }
}

/// Random self-rotation: whole degrees in [0, 360)
fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(0..360) as f32
}

/// Random scale: MIN_SCALE + k * SCALE_STEP
fn random_scale<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    MIN_SCALE + rng.random_range(0..SCALE_STEPS) as f32 * SCALE_STEP
}

/// Random ring radius: one of RING_RADIUS_FACTORS times CARD_RADIUS
fn random_ring_radius<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let k = rng.random_range(0..RING_RADIUS_FACTORS.len());
    CARD_RADIUS * RING_RADIUS_FACTORS[k]
}

/// Lay out `card` for display. Centres are left at the origin until the
/// result is projected onto a [`CardSlot`] anchor.
pub fn layout_card<R: Rng + ?Sized>(card_index: usize, card: &Card, rng: &mut R) -> DisplayedCard {
    let mut ids = card.icons().to_vec();
    shuffle(&mut ids, rng);

    let Some((&center_id, ring_ids)) = ids.split_last() else {
        return DisplayedCard {
            card_index,
            anchor: Vec2::ZERO,
            icons: Vec::new(),
        };
    };

    let mut icons = Vec::with_capacity(ids.len());

    if !ring_ids.is_empty() {
        let step = 360.0 / ring_ids.len() as f32;
        let offset = rng.random_range(0..360) as f32;
        for (k, &icon_id) in ring_ids.iter().enumerate() {
            icons.push(PlacedIcon {
                icon_id,
                radius: random_ring_radius(rng),
                angle: normalize_degrees(offset + k as f32 * step),
                rotation: random_rotation(rng),
                scale: random_scale(rng),
                center: Vec2::ZERO,
            });
        }
    }

    icons.push(PlacedIcon {
        icon_id: center_id,
        radius: 0.0,
        angle: 0.0,
        rotation: random_rotation(rng),
        scale: random_scale(rng),
        center: Vec2::ZERO,
    });

    DisplayedCard {
        card_index,
        anchor: Vec2::ZERO,
        icons,
    }
}
