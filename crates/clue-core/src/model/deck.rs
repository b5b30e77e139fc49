use crate::model::card::{Card, Category, all_cards};
use crate::model::hand::Hand;
use crate::model::room::Room;
use crate::model::scenario::Scenario;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn full() -> Self {
        Self { cards: all_cards() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle_in_place<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("the deck has no {0} card to put in the envelope")]
    MissingCategory(Category),
}

/// Picks one card per category uniformly at random from `cards` and returns
/// the rest of `cards`, shuffled, as the deck to deal.
pub fn select_solution<R: Rng + ?Sized>(
    cards: &[Card],
    rng: &mut R,
) -> Result<(Scenario, Deck), DeckError> {
    let suspects: Vec<Suspect> = cards
        .iter()
        .filter_map(|card| match card {
            Card::Suspect(suspect) => Some(*suspect),
            _ => None,
        })
        .collect();
    let weapons: Vec<Weapon> = cards
        .iter()
        .filter_map(|card| match card {
            Card::Weapon(weapon) => Some(*weapon),
            _ => None,
        })
        .collect();
    let rooms: Vec<Room> = cards
        .iter()
        .filter_map(|card| match card {
            Card::Room(room) => Some(*room),
            _ => None,
        })
        .collect();

    let solution = Scenario::new(
        pick_one(&suspects, Category::Suspect, rng)?,
        pick_one(&weapons, Category::Weapon, rng)?,
        pick_one(&rooms, Category::Room, rng)?,
    );

    let remaining = cards
        .iter()
        .copied()
        .filter(|card| !solution.contains(*card))
        .collect();
    let mut deck = Deck::from_cards(remaining);
    deck.shuffle_in_place(rng);
    Ok((solution, deck))
}

fn pick_one<T: Copy, R: Rng + ?Sized>(
    items: &[T],
    category: Category,
    rng: &mut R,
) -> Result<T, DeckError> {
    if items.is_empty() {
        return Err(DeckError::MissingCategory(category));
    }
    Ok(items[rng.gen_range(0..items.len())])
}

pub fn select_solution_with_seed(seed: u64) -> Result<(Scenario, Deck), DeckError> {
    let mut rng = StdRng::seed_from_u64(seed);
    select_solution(&all_cards(), &mut rng)
}

/// Deals round-robin in deck order until the deck is exhausted.
pub fn deal_cards(deck: &Deck, num_players: usize) -> Vec<Hand> {
    let mut hands = vec![Hand::new(); num_players];
    if num_players == 0 {
        return hands;
    }
    for (index, card) in deck.cards().iter().enumerate() {
        hands[index % num_players].add(*card);
    }
    hands
}
