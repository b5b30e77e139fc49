use crate::belief::AgentKnowledge;
use crate::model::board::{Board, Position};
use crate::model::hand::Hand;
use crate::model::suspect::Suspect;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable player identifier. Ids are 1-based and match seat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Id for the player sitting at 0-based `seat`.
    pub const fn from_seat(seat: usize) -> Self {
        Self(seat as u8 + 1)
    }

    pub const fn seat(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Who makes the decisions for a seat, as requested at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Human,
    Agent,
}

/// Who makes the decisions for a seat once the game is running. Agents carry
/// their private knowledge base.
#[derive(Debug, Clone)]
pub enum PlayerKind {
    Human,
    Agent(Box<AgentKnowledge>),
}

impl PlayerKind {
    pub const fn role(&self) -> PlayerRole {
        match self {
            PlayerKind::Human => PlayerRole::Human,
            PlayerKind::Agent(_) => PlayerRole::Agent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    character: Suspect,
    position: Position,
    hand: Hand,
    eliminated: bool,
    kind: PlayerKind,
}

impl Player {
    pub fn new(id: PlayerId, character: Suspect, hand: Hand, kind: PlayerKind) -> Self {
        Self {
            id,
            character,
            position: Board::start_position(character),
            hand,
            eliminated: false,
            kind,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn character(&self) -> Suspect {
        self.character
    }

    pub fn name(&self) -> &'static str {
        self.character.name()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub(crate) fn eliminate(&mut self) {
        self.eliminated = true;
    }

    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    pub fn is_agent(&self) -> bool {
        matches!(self.kind, PlayerKind::Agent(_))
    }

    pub fn knowledge(&self) -> Option<&AgentKnowledge> {
        match &self.kind {
            PlayerKind::Agent(knowledge) => Some(&**knowledge),
            PlayerKind::Human => None,
        }
    }

    pub fn knowledge_mut(&mut self) -> Option<&mut AgentKnowledge> {
        match &mut self.kind {
            PlayerKind::Agent(knowledge) => Some(&mut **knowledge),
            PlayerKind::Human => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) at {}", self.id, self.character, self.position)?;
        if self.eliminated {
            f.write_str(" (ELIMINATED)")?;
        }
        Ok(())
    }
}
