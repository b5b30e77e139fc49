use crate::model::card::Card;
use crate::model::room::Room;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A who/what/where triple. The hidden solution, every suggestion, and every
/// accusation share this shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scenario {
    pub suspect: Suspect,
    pub weapon: Weapon,
    pub room: Room,
}

impl Scenario {
    pub const fn new(suspect: Suspect, weapon: Weapon, room: Room) -> Self {
        Self {
            suspect,
            weapon,
            room,
        }
    }

    pub fn cards(&self) -> [Card; 3] {
        [
            Card::Suspect(self.suspect),
            Card::Weapon(self.weapon),
            Card::Room(self.room),
        ]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards().contains(&card)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with the {} in the {}", self.suspect, self.weapon, self.room)
    }
}
