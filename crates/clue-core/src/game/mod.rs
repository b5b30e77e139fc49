pub mod accusation;
pub mod decision;
pub mod game_state;
pub mod suggestion;
pub mod table;
pub mod turn;

pub use accusation::AccusationOutcome;
pub use decision::{Controller, TurnChoice};
pub use game_state::{GameError, GameState, MAX_PLAYERS, MIN_PLAYERS};
pub use suggestion::{Refutation, SuggestionOutcome};
pub use table::{GameEvent, SilentTable, TableIo};
pub use turn::{GameEnd, GameSummary, TurnOutcome};
