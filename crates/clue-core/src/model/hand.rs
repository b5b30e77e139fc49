use crate::model::card::Card;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Cards in this hand that appear in `wanted`, in hand order.
    pub fn matching(&self, wanted: &[Card]) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|card| wanted.contains(card))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::room::Room;
    use crate::model::suspect::Suspect;
    use crate::model::weapon::Weapon;

    #[test]
    fn cards_are_sorted_by_category_then_catalog_order() {
        let mut hand = Hand::new();
        hand.add(Card::Room(Room::Hall));
        hand.add(Card::Weapon(Weapon::Rope));
        hand.add(Card::Suspect(Suspect::MrsPeacock));
        let ordered: Vec<_> = hand.iter().copied().collect();
        assert_eq!(
            ordered,
            vec![
                Card::Suspect(Suspect::MrsPeacock),
                Card::Weapon(Weapon::Rope),
                Card::Room(Room::Hall),
            ]
        );
    }

    #[test]
    fn matching_keeps_only_wanted_cards() {
        let hand = Hand::with_cards(vec![
            Card::Room(Room::Lounge),
            Card::Weapon(Weapon::Dagger),
            Card::Suspect(Suspect::MrsWhite),
        ]);
        let wanted = [
            Card::Suspect(Suspect::MrsWhite),
            Card::Weapon(Weapon::Rope),
            Card::Room(Room::Lounge),
        ];
        assert_eq!(
            hand.matching(&wanted),
            vec![Card::Suspect(Suspect::MrsWhite), Card::Room(Room::Lounge)]
        );
        assert!(Hand::new().matching(&wanted).is_empty());
    }
}
