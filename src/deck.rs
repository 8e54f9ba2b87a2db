//! Deck model and card file loading
//!
//! A card file is a whitespace-separated stream of integers:
//! - header: `card_count icons_per_card` (both positive)
//! - then `icons_per_card` icon ids for each of the `card_count` cards
//!
//! Line breaks carry no meaning; a short card is one whose ids run out
//! before `icons_per_card` tokens were read.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Upper bound on capacity reserved from header counts
const MAX_PREALLOC: usize = 1024;

/// Identifies an icon sprite; shared across every card that shows it
pub type IconId = i32;

/// One card: the ordered icon ids that make up its identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    icons: Vec<IconId>,
}

impl Card {
    pub fn new(icons: Vec<IconId>) -> Self {
        Self { icons }
    }

    pub fn icons(&self) -> &[IconId] {
        &self.icons
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn contains(&self, icon: IconId) -> bool {
        self.icons.contains(&icon)
    }

    /// Number of icon ids this card has in common with `other`
    pub fn shared_count(&self, other: &Card) -> usize {
        self.icons.iter().filter(|id| other.contains(**id)).count()
    }
}

/// All cards of the game, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    icons_per_card: usize,
    cards: Vec<Card>,
}

/// What was wrong with a card file's contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer than two header tokens, or a header token that is not a count
    MissingHeader,
    /// A header count of zero
    EmptyHeader { cards: usize, icons_per_card: usize },
    /// A card token that is not an integer
    InvalidToken { card: usize, token: String },
    /// Card `card` ran out of tokens after `found` of `expected` ids
    MissingIcons { card: usize, expected: usize, found: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MissingHeader => {
                write!(f, "missing or malformed `card_count icons_per_card` header")
            }
            FormatError::EmptyHeader {
                cards,
                icons_per_card,
            } => write!(
                f,
                "header declares {} cards of {} icons; both must be positive",
                cards, icons_per_card
            ),
            FormatError::InvalidToken { card, token } => {
                write!(f, "card {}: `{}` is not an icon id", card, token)
            }
            FormatError::MissingIcons {
                card,
                expected,
                found,
            } => write!(
                f,
                "card {}: expected {} icon ids, found {}",
                card, expected, found
            ),
        }
    }
}

/// Deck loading failures. All of them are fatal at start-up.
#[derive(Debug)]
pub enum DeckError {
    /// The card file could not be opened or read
    SourceUnavailable { path: PathBuf, source: io::Error },
    /// Header or card rows are malformed
    Format(FormatError),
    /// Two cards do not share exactly one icon
    InvalidDesign {
        first: usize,
        second: usize,
        shared: usize,
    },
}

impl DeckError {
    /// Process exit status for this failure (distinct per kind)
    pub fn exit_code(&self) -> i32 {
        match self {
            DeckError::SourceUnavailable { .. } => 2,
            DeckError::Format(_) => 3,
            DeckError::InvalidDesign { .. } => 4,
        }
    }
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::SourceUnavailable { path, .. } => {
                write!(f, "failed to open card file {}", path.display())
            }
            DeckError::Format(err) => write!(f, "incorrect card file format: {}", err),
            DeckError::InvalidDesign {
                first,
                second,
                shared,
            } => write!(
                f,
                "cards {} and {} share {} icons, every pair must share exactly one",
                first, second, shared
            ),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::SourceUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FormatError> for DeckError {
    fn from(err: FormatError) -> Self {
        DeckError::Format(err)
    }
}

impl Deck {
    /// Build a deck from already-parsed cards
    ///
    /// Every card must hold exactly `icons_per_card` ids.
    pub fn new(icons_per_card: usize, cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.is_empty() || icons_per_card == 0 {
            return Err(FormatError::EmptyHeader {
                cards: cards.len(),
                icons_per_card,
            }
            .into());
        }
        if let Some((card, short)) = cards
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != icons_per_card)
        {
            return Err(FormatError::MissingIcons {
                card,
                expected: icons_per_card,
                found: short.len(),
            }
            .into());
        }
        Ok(Self {
            icons_per_card,
            cards,
        })
    }

    /// Parse card file contents (structure only, see [`Deck::validate_design`])
    pub fn parse(text: &str) -> Result<Self, DeckError> {
        let mut tokens = text.split_whitespace();

        let mut header = || tokens.next().and_then(|t| t.parse::<usize>().ok());
        let (Some(card_count), Some(icons_per_card)) = (header(), header()) else {
            return Err(FormatError::MissingHeader.into());
        };
        if card_count == 0 || icons_per_card == 0 {
            return Err(FormatError::EmptyHeader {
                cards: card_count,
                icons_per_card,
            }
            .into());
        }

        // Header counts are untrusted; the token stream bounds the real sizes
        let mut cards = Vec::with_capacity(card_count.min(MAX_PREALLOC));
        for card in 0..card_count {
            let mut icons = Vec::with_capacity(icons_per_card.min(MAX_PREALLOC));
            for found in 0..icons_per_card {
                let Some(token) = tokens.next() else {
                    return Err(FormatError::MissingIcons {
                        card,
                        expected: icons_per_card,
                        found,
                    }
                    .into());
                };
                let id = token.parse::<IconId>().map_err(|_| FormatError::InvalidToken {
                    card,
                    token: token.to_string(),
                })?;
                icons.push(id);
            }
            cards.push(Card::new(icons));
        }

        Ok(Self {
            icons_per_card,
            cards,
        })
    }

    /// Check that every pair of cards shares exactly one icon
    pub fn validate_design(&self) -> Result<(), DeckError> {
        for (first, a) in self.cards.iter().enumerate() {
            for (offset, b) in self.cards[first + 1..].iter().enumerate() {
                let shared = a.shared_count(b);
                if shared != 1 {
                    return Err(DeckError::InvalidDesign {
                        first,
                        second: first + 1 + offset,
                        shared,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn icons_per_card(&self) -> usize {
        self.icons_per_card
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }
}

/// Read, parse and validate a card file
pub fn load_deck(path: impl AsRef<Path>) -> Result<Deck, DeckError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DeckError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let deck = Deck::parse(&text)?;
    deck.validate_design()?;

    log::info!(
        "Loaded deck {}: {} cards, {} icons per card",
        path.display(),
        deck.len(),
        deck.icons_per_card()
    );
    Ok(deck)
}
