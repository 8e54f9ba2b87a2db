//! Game core
//!
//! Everything that decides what is on screen and how a click is scored lives
//! here. Pure and deterministic for a given seed:
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod hit;
pub mod layout;
pub mod selection;
pub mod shuffle;
pub mod state;
pub mod tick;

pub use hit::{ClickOutcome, resolve_click, shared_icon};
pub use layout::{CardSlot, DisplayedCard, PlacedIcon, layout_card};
pub use selection::{MAX_DRAW_ATTEMPTS, SelectionError, select_pair};
pub use shuffle::shuffle;
pub use state::{GameEvent, GamePhase, GameState, GameSummary, Response};
pub use tick::{InputEvent, handle_input, on_click, on_mouse_move, on_timer_tick};
