use crate::model::room::Room;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Suspect,
    Weapon,
    Room,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Suspect, Category::Weapon, Category::Room];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Suspect => "SUSPECT",
            Category::Weapon => "WEAPON",
            Category::Room => "ROOM",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single clue card. Names are unique across all three categories, so the
/// card's identity is its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Suspect(Suspect),
    Weapon(Weapon),
    Room(Room),
}

impl Card {
    pub const COUNT: usize = Suspect::ALL.len() + Weapon::ALL.len() + Room::ALL.len();

    pub const fn category(self) -> Category {
        match self {
            Card::Suspect(_) => Category::Suspect,
            Card::Weapon(_) => Category::Weapon,
            Card::Room(_) => Category::Room,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Card::Suspect(suspect) => suspect.name(),
            Card::Weapon(weapon) => weapon.name(),
            Card::Room(room) => room.name(),
        }
    }
}

impl From<Suspect> for Card {
    fn from(value: Suspect) -> Self {
        Card::Suspect(value)
    }
}

impl From<Weapon> for Card {
    fn from(value: Weapon) -> Self {
        Card::Weapon(value)
    }
}

impl From<Room> for Card {
    fn from(value: Room) -> Self {
        Card::Room(value)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every card in the game: suspects, then weapons, then rooms.
pub fn all_cards() -> Vec<Card> {
    let mut cards = Vec::with_capacity(Card::COUNT);
    cards.extend(Suspect::ALL.iter().copied().map(Card::Suspect));
    cards.extend(Weapon::ALL.iter().copied().map(Card::Weapon));
    cards.extend(Room::ALL.iter().copied().map(Card::Room));
    cards
}

#[cfg(test)]
mod tests {
    use super::{Card, Category, all_cards};
    use crate::model::room::Room;
    use crate::model::suspect::Suspect;
    use crate::model::weapon::Weapon;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_twenty_one_cards() {
        let cards = all_cards();
        assert_eq!(cards.len(), 21);
        assert_eq!(Card::COUNT, 21);
    }

    #[test]
    fn names_are_globally_unique() {
        let names: HashSet<_> = all_cards().iter().map(|card| card.name()).collect();
        assert_eq!(names.len(), Card::COUNT);
    }

    #[test]
    fn category_follows_variant() {
        assert_eq!(Card::from(Suspect::MrsPeacock).category(), Category::Suspect);
        assert_eq!(Card::from(Weapon::Rope).category(), Category::Weapon);
        assert_eq!(Card::from(Room::Study).category(), Category::Room);
    }

    #[test]
    fn catalog_order_is_suspects_weapons_rooms() {
        let cards = all_cards();
        assert_eq!(cards[0], Card::Suspect(Suspect::MissScarlett));
        assert_eq!(cards[6], Card::Weapon(Weapon::Candlestick));
        assert_eq!(cards[20], Card::Room(Room::Study));
    }
}
