//! Deterministic knowledge base kept by an automated player.
//!
//! The agent tracks which cards could still be in the envelope and, for every
//! other seat, what it has learned about that seat's hand. The envelope itself
//! is tracked as the [`BeliefSubject::NoOne`] bucket: a card no subject can
//! hold must be part of the solution.

use crate::model::card::{Card, Category};
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::room::Room;
use crate::model::scenario::Scenario;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;
use core::fmt;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::debug;

/// Key for per-hand beliefs: a specific seat, or the sentinel bucket meaning
/// "no living player holds this card".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BeliefSubject {
    Player(PlayerId),
    NoOne,
}

impl From<PlayerId> for BeliefSubject {
    fn from(value: PlayerId) -> Self {
        BeliefSubject::Player(value)
    }
}

impl fmt::Display for BeliefSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeliefSubject::Player(id) => write!(f, "{id}"),
            BeliefSubject::NoOne => f.write_str("no one"),
        }
    }
}

/// What the agent knows about one subject's hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandBeliefs {
    cannot_have: BTreeSet<Card>,
    may_have: BTreeSet<Card>,
    has: BTreeSet<Card>,
}

impl HandBeliefs {
    pub fn cannot_have(&self) -> &BTreeSet<Card> {
        &self.cannot_have
    }

    pub fn may_have(&self) -> &BTreeSet<Card> {
        &self.may_have
    }

    pub fn has(&self) -> &BTreeSet<Card> {
        &self.has
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BeliefError {
    #[error("{category} is not resolved yet ({remaining} candidates remain)")]
    Unresolved { category: Category, remaining: usize },
    #[error("no {category} candidates remain")]
    Exhausted { category: Category },
}

#[derive(Debug, Clone)]
pub struct AgentKnowledge {
    owner: PlayerId,
    suspects: BTreeSet<Suspect>,
    weapons: BTreeSet<Weapon>,
    rooms: BTreeSet<Room>,
    seen: BTreeSet<Card>,
    subjects: BTreeMap<BeliefSubject, HandBeliefs>,
}

impl AgentKnowledge {
    /// Starts from the full catalog, removes the agent's own cards, and begins
    /// tracking every other seat plus the [`BeliefSubject::NoOne`] bucket.
    pub fn new<I>(owner: PlayerId, hand: &Hand, others: I) -> Self
    where
        I: IntoIterator<Item = PlayerId>,
    {
        let mut subjects: BTreeMap<BeliefSubject, HandBeliefs> = others
            .into_iter()
            .filter(|id| *id != owner)
            .map(|id| (BeliefSubject::Player(id), HandBeliefs::default()))
            .collect();
        subjects.insert(BeliefSubject::NoOne, HandBeliefs::default());

        let mut knowledge = Self {
            owner,
            suspects: Suspect::ALL.into_iter().collect(),
            weapons: Weapon::ALL.into_iter().collect(),
            rooms: Room::ALL.into_iter().collect(),
            seen: BTreeSet::new(),
            subjects,
        };
        for card in hand.iter() {
            knowledge.seen.insert(*card);
            knowledge.remove_candidate(*card);
        }
        knowledge
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn candidate_suspects(&self) -> &BTreeSet<Suspect> {
        &self.suspects
    }

    pub fn candidate_weapons(&self) -> &BTreeSet<Weapon> {
        &self.weapons
    }

    pub fn candidate_rooms(&self) -> &BTreeSet<Room> {
        &self.rooms
    }

    pub fn candidate_count(&self, category: Category) -> usize {
        match category {
            Category::Suspect => self.suspects.len(),
            Category::Weapon => self.weapons.len(),
            Category::Room => self.rooms.len(),
        }
    }

    pub fn is_candidate(&self, card: Card) -> bool {
        match card {
            Card::Suspect(suspect) => self.suspects.contains(&suspect),
            Card::Weapon(weapon) => self.weapons.contains(&weapon),
            Card::Room(room) => self.rooms.contains(&room),
        }
    }

    /// Every card still possibly in the envelope, in catalog order.
    pub fn candidate_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.suspects
            .iter()
            .copied()
            .map(Card::Suspect)
            .chain(self.weapons.iter().copied().map(Card::Weapon))
            .chain(self.rooms.iter().copied().map(Card::Room))
    }

    pub fn seen_cards(&self) -> &BTreeSet<Card> {
        &self.seen
    }

    pub fn beliefs(&self, subject: BeliefSubject) -> Option<&HandBeliefs> {
        self.subjects.get(&subject)
    }

    pub fn tracked_subjects(&self) -> impl Iterator<Item = BeliefSubject> + '_ {
        self.subjects.keys().copied()
    }

    pub fn cannot_have(&self, subject: BeliefSubject, card: Card) -> bool {
        self.subjects
            .get(&subject)
            .is_some_and(|beliefs| beliefs.cannot_have.contains(&card))
    }

    pub fn may_have(&self, subject: BeliefSubject, card: Card) -> bool {
        self.subjects
            .get(&subject)
            .is_some_and(|beliefs| beliefs.may_have.contains(&card))
    }

    pub fn has(&self, subject: BeliefSubject, card: Card) -> bool {
        self.subjects
            .get(&subject)
            .is_some_and(|beliefs| beliefs.has.contains(&card))
    }

    /// The agent looked at `card` directly, so it cannot be in the envelope.
    pub fn record_seen_card(&mut self, card: Card) {
        debug!(owner = %self.owner, %card, "agent saw card");
        self.seen.insert(card);
        self.remove_candidate(card);
        self.deduce_from_all();
    }

    pub fn record_player_cannot_have(&mut self, subject: BeliefSubject, card: Card) {
        let beliefs = self.subjects.entry(subject).or_default();
        if beliefs.has.contains(&card) {
            debug!(owner = %self.owner, %subject, %card, "ignoring cannot-have for a confirmed card");
            return;
        }
        beliefs.cannot_have.insert(card);
        beliefs.may_have.remove(&card);
        self.deduce_from_all();
    }

    /// `subject` showed one of `cards` without revealing which.
    pub fn record_player_may_have(&mut self, subject: BeliefSubject, cards: &[Card]) {
        let beliefs = self.subjects.entry(subject).or_default();
        for card in cards {
            if !beliefs.cannot_have.contains(card) {
                beliefs.may_have.insert(*card);
            }
        }
        self.deduce_from_all();
    }

    /// `subject` is known to hold `card`.
    ///
    /// Every other remaining candidate is also marked as impossible for that
    /// subject, even though a later refutation can show the same subject
    /// holding a second card.
    // TODO: only mark the cards a refutation actually rules out, matching
    // `record_player_may_have`.
    pub fn record_player_has(&mut self, subject: BeliefSubject, card: Card) {
        self.remove_candidate(card);
        let others: Vec<Card> = self
            .candidate_cards()
            .filter(|other| *other != card)
            .collect();

        let beliefs = self.subjects.entry(subject).or_default();
        beliefs.has.insert(card);
        beliefs.cannot_have.remove(&card);
        for other in others {
            if !beliefs.has.contains(&other) {
                beliefs.cannot_have.insert(other);
            }
        }
        debug!(owner = %self.owner, %subject, %card, "agent confirmed holder");
        self.deduce_from_all();
    }

    pub fn should_accuse(&self) -> bool {
        self.suspects.len() == 1 && self.weapons.len() == 1 && self.rooms.len() == 1
    }

    /// First remaining suspect and weapon, in the room the agent stands in.
    pub fn choose_suggestion(&self, room: Room) -> Result<Scenario, BeliefError> {
        let suspect = self
            .suspects
            .first()
            .copied()
            .ok_or(BeliefError::Exhausted {
                category: Category::Suspect,
            })?;
        let weapon = self
            .weapons
            .first()
            .copied()
            .ok_or(BeliefError::Exhausted {
                category: Category::Weapon,
            })?;
        Ok(Scenario::new(suspect, weapon, room))
    }

    /// The resolved envelope. Only valid once [`Self::should_accuse`] holds.
    pub fn accusation(&self) -> Result<Scenario, BeliefError> {
        Ok(Scenario::new(
            resolved(&self.suspects, Category::Suspect)?,
            resolved(&self.weapons, Category::Weapon)?,
            resolved(&self.rooms, Category::Room)?,
        ))
    }

    /// Drops `card` from its candidate set unless that set is already down to
    /// its last card.
    fn remove_candidate(&mut self, card: Card) {
        match card {
            Card::Suspect(suspect) => shrink(&mut self.suspects, &suspect),
            Card::Weapon(weapon) => shrink(&mut self.weapons, &weapon),
            Card::Room(room) => shrink(&mut self.rooms, &room),
        }
    }

    fn deduce_from_all(&mut self) {
        let unseen: Vec<Card> = self
            .candidate_cards()
            .filter(|card| !self.seen.contains(card))
            .collect();

        for card in unseen {
            if !self.is_candidate(card) {
                continue;
            }
            let nobody_can_have = self
                .subjects
                .values()
                .all(|beliefs| beliefs.cannot_have.contains(&card));
            if nobody_can_have {
                self.mark_as_solution(card);
            }
        }
    }

    fn mark_as_solution(&mut self, card: Card) {
        if self.candidate_count(card.category()) == 1 {
            return;
        }
        debug!(owner = %self.owner, %card, "agent infers card is in the envelope");
        match card {
            Card::Suspect(suspect) => self.suspects = BTreeSet::from([suspect]),
            Card::Weapon(weapon) => self.weapons = BTreeSet::from([weapon]),
            Card::Room(room) => self.rooms = BTreeSet::from([room]),
        }
    }
}

fn shrink<T: Ord>(set: &mut BTreeSet<T>, item: &T) {
    if set.len() > 1 {
        set.remove(item);
    }
}

fn resolved<T: Copy + Ord>(set: &BTreeSet<T>, category: Category) -> Result<T, BeliefError> {
    match (set.len(), set.first()) {
        (1, Some(item)) => Ok(*item),
        (remaining, _) => Err(BeliefError::Unresolved {
            category,
            remaining,
        }),
    }
}
