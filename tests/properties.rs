//! Property tests for the game core.
//!
//! Invariants covered:
//! - shuffle permutes without adding or losing elements
//! - layout yields one centre icon and an evenly spaced ring
//! - pair selection never repeats a card from the previous round
//! - the shared icon's own centre is always a correct click

use std::path::PathBuf;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use dobble::sim::{
    CardSlot, ClickOutcome, GameState, layout_card, resolve_click, select_pair, shuffle,
};
use dobble::{Card, Deck, load_deck, normalize_degrees};

fn shipped_deck() -> Deck {
    load_deck(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/pg27.txt")).unwrap()
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>(), items in prop::collection::vec(any::<i32>(), 0..40)) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut shuffled = items.clone();
        shuffle(&mut shuffled, &mut rng);

        let mut a = items.clone();
        let mut b = shuffled.clone();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
        if items.len() <= 1 {
            prop_assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn layout_has_center_and_even_ring(seed in any::<u64>(), n in 2i32..12) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let card = Card::new((0..n).collect());
        let shown = layout_card(0, &card, &mut rng).projected(CardSlot::Lower.anchor());

        prop_assert_eq!(shown.icons.len(), n as usize);
        let centered: Vec<_> = shown.icons.iter().filter(|i| i.radius == 0.0).collect();
        prop_assert_eq!(centered.len(), 1);
        prop_assert_eq!(centered[0].center, CardSlot::Lower.anchor());

        let ring: Vec<_> = shown.icons.iter().filter(|i| i.radius != 0.0).collect();
        prop_assert_eq!(ring.len(), n as usize - 1);
        let step = 360.0 / (n - 1) as f32;
        let offset = ring[0].angle;
        for (k, icon) in ring.iter().enumerate() {
            let expected = normalize_degrees(offset + k as f32 * step);
            let diff = (icon.angle - expected).abs();
            prop_assert!(diff < 1e-2 || (360.0 - diff) < 1e-2);
        }
    }

    #[test]
    fn selection_never_repeats_previous_cards(seed in any::<u64>(), rounds in 1usize..60) {
        let deck = shipped_deck();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut previous = select_pair(&deck, None, &mut rng).unwrap();
        prop_assert_ne!(previous.0, previous.1);
        for _ in 0..rounds {
            let next = select_pair(&deck, Some(previous), &mut rng).unwrap();
            prop_assert_ne!(next.0, next.1);
            prop_assert!(next.0 != previous.0 && next.0 != previous.1);
            prop_assert!(next.1 != previous.0 && next.1 != previous.1);
            previous = next;
        }
    }

    #[test]
    fn shared_icon_center_is_always_correct(seed in any::<u64>()) {
        let state = GameState::new(shipped_deck(), seed).unwrap();
        let target = state.target_icon().unwrap();
        let pos = state.upper().icon(target).unwrap().center;
        prop_assert_eq!(resolve_click(state.upper(), state.lower(), pos), ClickOutcome::Correct);
        prop_assert_eq!(
            resolve_click(state.upper(), state.lower(), glam::Vec2::new(-1e5, 1e5)),
            ClickOutcome::Incorrect
        );
    }
}
