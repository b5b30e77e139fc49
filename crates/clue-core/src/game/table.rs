//! Seam between the engine and whatever hosts it: human choices come in,
//! narration goes out.

use crate::model::board::Position;
use crate::model::card::Card;
use crate::model::player::{Player, PlayerId};
use crate::model::room::Room;
use crate::model::scenario::Scenario;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;
use core::fmt;
use serde::Serialize;
use tracing::{Level, event};

/// Host-side input and output.
pub trait TableIo {
    /// Asks a human to pick one of `options` and returns its index. Invalid
    /// answers are re-asked by the implementation; `None` means the input is
    /// gone and the game should stop.
    fn choose(&mut self, prompt: &str, options: &[String]) -> Option<usize>;

    /// Narration hook. Events addressed to one player (see
    /// [`GameEvent::audience`]) must only be shown to that player.
    fn announce(&mut self, _event: &GameEvent) {}

    /// Called at the start of each human turn so the player can review
    /// their own cards. Agents never trigger it.
    fn show_hand(&mut self, _player: &Player) {}
}

/// Host with no human at the table: every prompt reports closed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTable;

impl TableIo for SilentTable {
    fn choose(&mut self, _prompt: &str, _options: &[String]) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    TurnStarted {
        player: PlayerId,
        position: Position,
        round: u32,
    },
    TurnSkipped {
        player: PlayerId,
    },
    SecretPassageUsed {
        player: PlayerId,
        from: Room,
        to: Room,
    },
    DiceRolled {
        player: PlayerId,
        roll: u32,
    },
    NoMoves {
        player: PlayerId,
        roll: u32,
    },
    Moved {
        player: PlayerId,
        to: Position,
    },
    SuggestionMade {
        player: PlayerId,
        suggestion: Scenario,
    },
    CharacterSummoned {
        suspect: Suspect,
        from: Position,
        to: Room,
    },
    WeaponSummoned {
        weapon: Weapon,
        from: Room,
        to: Room,
    },
    CannotRefute {
        player: PlayerId,
    },
    CardShown {
        refuter: PlayerId,
        to: PlayerId,
    },
    CardRevealed {
        to: PlayerId,
        card: Card,
    },
    NoRefutation {
        suggestion: Scenario,
    },
    AccusationMade {
        player: PlayerId,
        accusation: Scenario,
    },
    AccusationCorrect {
        player: PlayerId,
    },
    AccusationWrong {
        player: PlayerId,
    },
    AllEliminated,
}

impl GameEvent {
    /// The only player allowed to see this event, if it is private.
    pub fn audience(&self) -> Option<PlayerId> {
        match self {
            GameEvent::CardRevealed { to, .. } => Some(*to),
            _ => None,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::TurnStarted {
                player,
                position,
                round,
            } => write!(f, "Round {round}: {player}'s turn, standing at {position}."),
            GameEvent::TurnSkipped { player } => {
                write!(f, "{player} has been eliminated and skips the turn.")
            }
            GameEvent::SecretPassageUsed { player, from, to } => {
                write!(f, "{player} takes the secret passage from {from} to {to}.")
            }
            GameEvent::DiceRolled { player, roll } => write!(f, "{player} rolls a {roll}."),
            GameEvent::NoMoves { player, roll } => {
                write!(f, "{player} has nowhere to go with a {roll}. Turn ends.")
            }
            GameEvent::Moved { player, to } => write!(f, "{player} moves to {to}."),
            GameEvent::SuggestionMade { player, suggestion } => {
                write!(f, "{player} suggests: {suggestion}.")
            }
            GameEvent::CharacterSummoned { suspect, from, to } => {
                write!(f, "{suspect} is moved from {from} to {to}.")
            }
            GameEvent::WeaponSummoned { weapon, from, to } => {
                write!(f, "The {weapon} is moved from {from} to {to}.")
            }
            GameEvent::CannotRefute { player } => write!(f, "{player} cannot refute."),
            GameEvent::CardShown { refuter, to } => {
                write!(f, "{refuter} shows a card to {to}.")
            }
            GameEvent::CardRevealed { to, card } => {
                write!(f, "({to} only) The card shown is {card}.")
            }
            GameEvent::NoRefutation { suggestion } => {
                write!(f, "No one can refute {suggestion}.")
            }
            GameEvent::AccusationMade { player, accusation } => {
                write!(f, "{player} accuses: {accusation}!")
            }
            GameEvent::AccusationCorrect { player } => {
                write!(f, "The accusation is correct. {player} wins the game!")
            }
            GameEvent::AccusationWrong { player } => write!(
                f,
                "The accusation is wrong. {player} may no longer move or accuse, but still refutes."
            ),
            GameEvent::AllEliminated => {
                f.write_str("Every player has been eliminated. No one can win.")
            }
        }
    }
}

/// Logs `event` and forwards it to the host.
pub(crate) fn announce(io: &mut dyn TableIo, game_event: &GameEvent) {
    if tracing::enabled!(target: "clue::event", Level::INFO) {
        let payload = serde_json::to_string(game_event).unwrap_or_default();
        event!(target: "clue::event", Level::INFO, event = %payload);
    }
    io.announce(game_event);
}

#[cfg(test)]
mod tests {
    use super::GameEvent;
    use crate::model::card::Card;
    use crate::model::player::PlayerId;
    use crate::model::weapon::Weapon;

    #[test]
    fn only_reveals_are_private() {
        let reveal = GameEvent::CardRevealed {
            to: PlayerId::new(2),
            card: Card::Weapon(Weapon::Rope),
        };
        assert_eq!(reveal.audience(), Some(PlayerId::new(2)));
        let shown = GameEvent::CardShown {
            refuter: PlayerId::new(1),
            to: PlayerId::new(2),
        };
        assert_eq!(shown.audience(), None);
        assert_eq!(shown.to_string(), "Player 1 shows a card to Player 2.");
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let event = GameEvent::DiceRolled {
            player: PlayerId::new(4),
            roll: 5,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"dice_rolled","player":4,"roll":5}"#);
    }
}
