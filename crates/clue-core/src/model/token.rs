use crate::model::room::Room;
use crate::model::weapon::Weapon;
use core::fmt;

/// A weapon piece on the board. It only ever moves when a suggestion names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponToken {
    pub weapon: Weapon,
    pub location: Room,
}

impl WeaponToken {
    pub const fn new(weapon: Weapon, location: Room) -> Self {
        Self { weapon, location }
    }

    /// One token per weapon, paired with the rooms in catalog order.
    pub fn initial_layout() -> Vec<WeaponToken> {
        Weapon::ALL
            .iter()
            .zip(Room::ALL.iter())
            .map(|(weapon, room)| WeaponToken::new(*weapon, *room))
            .collect()
    }
}

impl fmt::Display for WeaponToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.weapon, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::WeaponToken;
    use crate::model::room::Room;
    use crate::model::weapon::Weapon;

    #[test]
    fn initial_layout_places_each_weapon_once() {
        let layout = WeaponToken::initial_layout();
        assert_eq!(layout.len(), Weapon::ALL.len());
        assert_eq!(layout[0], WeaponToken::new(Weapon::Candlestick, Room::Kitchen));
        assert_eq!(layout[5], WeaponToken::new(Weapon::Wrench, Room::Library));
        assert_eq!(layout[4].to_string(), "Rope in Billiard Room");
    }
}
