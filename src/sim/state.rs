//! Game state and round types
//!
//! One `GameState` owns everything a game mutates: the two displayed cards,
//! score, remaining time, phase and the seeded RNG. The deck is owned too but
//! never mutated; displayed cards are rebuilt from it each round.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::hit::{ClickOutcome, shared_icon};
use super::layout::{CardSlot, DisplayedCard, layout_card};
use super::selection::{SelectionError, min_cards, select_pair};
use crate::consts::*;
use crate::deck::{Deck, IconId};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Cards are dealt, countdown not started (waiting for the first click)
    Idle,
    /// Countdown running, clicks and ticks accepted
    Running,
    /// Time ran out; no more input is processed
    GameOver,
}

/// Something that happened while handling an input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// First click started the countdown
    TimerStarted,
    /// A click was resolved and scored
    ClickResolved {
        outcome: ClickOutcome,
        score: u32,
        time: i32,
    },
    /// A new pair is on screen
    RoundStarted {
        round: u32,
        upper: usize,
        lower: usize,
    },
    /// Time ran out
    GameOver { score: u32, mistakes: u32 },
}

/// What an input handler asks of the driving loop
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    /// The scene changed and should be drawn again
    pub redraw: bool,
    pub events: Vec<GameEvent>,
}

impl Response {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}

/// End-of-game statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub score: u32,
    pub mistakes: u32,
    pub rounds: u32,
    pub seed: u64,
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Shared icons found
    pub score: u32,
    /// Seconds left on the countdown
    pub time: i32,
    /// Wrong clicks so far
    pub mistakes: u32,
    /// Rounds dealt so far (1 once the first pair is shown)
    pub round: u32,
    /// Outcome of the most recent click
    pub last_outcome: ClickOutcome,
    /// Last pointer position reported by the input layer
    pub pointer: Vec2,
    #[serde(skip)]
    deck: Deck,
    upper: DisplayedCard,
    lower: DisplayedCard,
    #[serde(skip)]
    rng: Pcg32,
}

impl GameState {
    /// Start a game on `deck`: deal the first pair, countdown idle
    pub fn new(deck: Deck, seed: u64) -> Result<Self, SelectionError> {
        // Every click deals a new pair, so the first deal is not enough
        let required = min_cards(true);
        if deck.len() < required {
            return Err(SelectionError::DeckTooSmall {
                cards: deck.len(),
                required,
            });
        }
        let mut rng = Pcg32::seed_from_u64(seed);
        let (upper, lower) = select_pair(&deck, None, &mut rng)?;

        let empty = DisplayedCard {
            card_index: 0,
            anchor: Vec2::ZERO,
            icons: Vec::new(),
        };
        let mut state = Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            time: START_TIME,
            mistakes: 0,
            round: 0,
            last_outcome: ClickOutcome::Undefined,
            pointer: Vec2::ZERO,
            deck,
            upper: empty.clone(),
            lower: empty,
            rng,
        };
        state.lay_out(upper, lower);

        log::info!(
            "New game: {} cards, seed {}, {}s on the clock",
            state.deck.len(),
            seed,
            state.time
        );
        Ok(state)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn upper(&self) -> &DisplayedCard {
        &self.upper
    }

    pub fn lower(&self) -> &DisplayedCard {
        &self.lower
    }

    /// Icon id the player is looking for this round
    pub fn target_icon(&self) -> Option<IconId> {
        shared_icon(&self.upper, &self.lower)
    }

    /// Show deck cards `upper` and `lower` with a fresh layout.
    ///
    /// Normally driven by [`GameState::next_round`]; exposed for replays and
    /// tests that need a known pair. Returns `None` and leaves the state
    /// untouched unless both are distinct indices into the deck.
    pub fn deal(&mut self, upper: usize, lower: usize) -> Option<GameEvent> {
        if upper == lower || upper >= self.deck.len() || lower >= self.deck.len() {
            log::warn!(
                "Cannot deal cards {} / {} from a deck of {}",
                upper,
                lower,
                self.deck.len()
            );
            return None;
        }
        Some(self.lay_out(upper, lower))
    }

    /// Indices come from `select_pair`, which only yields valid pairs
    fn lay_out(&mut self, upper: usize, lower: usize) -> GameEvent {
        let cards = self.deck.cards();
        self.upper = layout_card(upper, &cards[upper], &mut self.rng)
            .projected(CardSlot::Upper.anchor());
        self.lower = layout_card(lower, &cards[lower], &mut self.rng)
            .projected(CardSlot::Lower.anchor());
        self.round += 1;

        log::debug!(
            "Round {}: cards {} / {} (target icon {:?})",
            self.round,
            upper,
            lower,
            self.target_icon()
        );
        GameEvent::RoundStarted {
            round: self.round,
            upper,
            lower,
        }
    }

    /// Select and lay out the next pair
    pub fn next_round(&mut self) -> Result<GameEvent, SelectionError> {
        let previous = (self.upper.card_index, self.lower.card_index);
        let (upper, lower) = select_pair(&self.deck, Some(previous), &mut self.rng)?;
        Ok(self.lay_out(upper, lower))
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            mistakes: self.mistakes,
            rounds: self.round,
            seed: self.seed,
        }
    }
}
