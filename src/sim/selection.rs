//! Card pair selection
//!
//! Rejection sampling: draw a random index until it satisfies the round's
//! constraints. The draw count is bounded; after MAX_DRAW_ATTEMPTS misses
//! the first valid index of a linear scan is taken instead.

use std::fmt;

use rand::Rng;

use crate::deck::Deck;

/// Random draws tried before falling back to a scan
pub const MAX_DRAW_ATTEMPTS: usize = 64;

/// Decks too small to ever produce a fresh pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    DeckTooSmall { cards: usize, required: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::DeckTooSmall { cards, required } => write!(
                f,
                "deck has {} cards, at least {} are needed to deal a new pair",
                cards, required
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Smallest deck that can deal a pair, given whether a pair is already shown
pub fn min_cards(has_previous: bool) -> usize {
    if has_previous { 3 } else { 2 }
}

fn draw_index<R, F>(count: usize, rng: &mut R, accept: F) -> Option<usize>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> bool,
{
    for _ in 0..MAX_DRAW_ATTEMPTS {
        let i = rng.random_range(0..count);
        if accept(i) {
            return Some(i);
        }
    }
    log::warn!(
        "No valid card after {} draws, scanning {} cards",
        MAX_DRAW_ATTEMPTS,
        count
    );
    (0..count).find(|&i| accept(i))
}

/// Pick the (upper, lower) card indices for the next round.
///
/// - upper differs from both previous cards
/// - lower differs from upper and from both previous cards; on a three-card
///   deck it only has to differ from upper and the previous upper card, which
///   still makes the new pair differ from the previous one
pub fn select_pair<R: Rng + ?Sized>(
    deck: &Deck,
    previous: Option<(usize, usize)>,
    rng: &mut R,
) -> Result<(usize, usize), SelectionError> {
    let count = deck.len();
    let required = min_cards(previous.is_some());
    let too_small = SelectionError::DeckTooSmall {
        cards: count,
        required,
    };
    if count < required {
        return Err(too_small);
    }

    let (prev_upper, prev_lower) = match previous {
        Some((upper, lower)) => (Some(upper), Some(lower)),
        None => (None, None),
    };
    let avoid_prev_lower = count >= 4;

    let upper = draw_index(count, rng, |i| {
        Some(i) != prev_upper && Some(i) != prev_lower
    })
    .ok_or(too_small)?;

    let lower = draw_index(count, rng, |j| {
        j != upper && Some(j) != prev_upper && (!avoid_prev_lower || Some(j) != prev_lower)
    })
    .ok_or(too_small)?;

    Ok((upper, lower))
}
