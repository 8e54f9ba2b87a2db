//! Click hit-testing against the displayed cards

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::DisplayedCard;
use crate::deck::IconId;

/// Result of the last click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClickOutcome {
    Correct,
    Incorrect,
    /// No click resolved yet
    #[default]
    Undefined,
}

/// The icon id present on both cards.
///
/// A validated deck has exactly one. If the cards share more, the last match
/// of the scan wins.
pub fn shared_icon(upper: &DisplayedCard, lower: &DisplayedCard) -> Option<IconId> {
    let mut shared = None;
    for a in &upper.icons {
        for b in &lower.icons {
            if a.icon_id == b.icon_id {
                shared = Some(a.icon_id);
            }
        }
    }
    shared
}

/// Decide whether `click` landed on the shared icon of the upper card
pub fn resolve_click(upper: &DisplayedCard, lower: &DisplayedCard, click: Vec2) -> ClickOutcome {
    let Some(target) = shared_icon(upper, lower) else {
        return ClickOutcome::Incorrect;
    };
    if upper.icons_at(click).any(|icon| icon.icon_id == target) {
        ClickOutcome::Correct
    } else {
        ClickOutcome::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::PlacedIcon;

    fn icon(icon_id: IconId, center: Vec2, scale: f32) -> PlacedIcon {
        PlacedIcon {
            icon_id,
            radius: 0.0,
            angle: 0.0,
            rotation: 0.0,
            scale,
            center,
        }
    }

    fn shown(icons: Vec<PlacedIcon>) -> DisplayedCard {
        DisplayedCard {
            card_index: 0,
            anchor: Vec2::ZERO,
            icons,
        }
    }

    #[test]
    fn test_shared_icon() {
        let upper = shown(vec![icon(1, Vec2::ZERO, 1.0), icon(2, Vec2::ZERO, 1.0)]);
        let lower = shown(vec![icon(3, Vec2::ZERO, 1.0), icon(2, Vec2::ZERO, 1.0)]);
        assert_eq!(shared_icon(&upper, &lower), Some(2));

        let disjoint = shown(vec![icon(9, Vec2::ZERO, 1.0)]);
        assert_eq!(shared_icon(&upper, &disjoint), None);
    }

    #[test]
    fn test_click_on_shared_icon() {
        let upper = shown(vec![
            icon(1, Vec2::new(100.0, 100.0), 1.0),
            icon(2, Vec2::new(300.0, 100.0), 0.6),
        ]);
        let lower = shown(vec![icon(2, Vec2::new(0.0, 500.0), 1.0)]);

        assert_eq!(resolve_click(&upper, &lower, Vec2::new(300.0, 100.0)), ClickOutcome::Correct);
        // 0.6 * 45 = 27 pixel tolerance
        assert_eq!(resolve_click(&upper, &lower, Vec2::new(326.0, 100.0)), ClickOutcome::Correct);
        assert_eq!(resolve_click(&upper, &lower, Vec2::new(328.0, 100.0)), ClickOutcome::Incorrect);
    }

    #[test]
    fn test_click_on_wrong_icon_or_empty_space() {
        let upper = shown(vec![
            icon(1, Vec2::new(100.0, 100.0), 1.0),
            icon(2, Vec2::new(300.0, 100.0), 1.0),
        ]);
        let lower = shown(vec![icon(2, Vec2::new(0.0, 500.0), 1.0)]);

        assert_eq!(resolve_click(&upper, &lower, Vec2::new(100.0, 100.0)), ClickOutcome::Incorrect);
        assert_eq!(resolve_click(&upper, &lower, Vec2::new(-1e4, -1e4)), ClickOutcome::Incorrect);
        // The lower card's copy does not count
        assert_eq!(resolve_click(&upper, &lower, Vec2::new(0.0, 500.0)), ClickOutcome::Incorrect);
    }

    #[test]
    fn test_overlapping_hit_circles() {
        let upper = shown(vec![
            icon(1, Vec2::new(100.0, 100.0), 1.2),
            icon(2, Vec2::new(130.0, 100.0), 1.2),
        ]);
        let lower = shown(vec![icon(2, Vec2::ZERO, 1.0)]);
        // Inside both circles: any hit on the shared icon counts
        assert_eq!(resolve_click(&upper, &lower, Vec2::new(110.0, 100.0)), ClickOutcome::Correct);
    }
}
