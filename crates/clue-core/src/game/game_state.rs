use crate::belief::{AgentKnowledge, BeliefError};
use crate::game::table::{GameEvent, TableIo, announce};
use crate::model::board::{Board, Position};
use crate::model::card::Card;
use crate::model::deck::{Deck, DeckError, deal_cards, select_solution};
use crate::model::hand::Hand;
use crate::model::player::{Player, PlayerId, PlayerKind, PlayerRole};
use crate::model::room::Room;
use crate::model::scenario::Scenario;
use crate::model::suspect::Suspect;
use crate::model::token::WeaponToken;
use crate::model::weapon::Weapon;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = Suspect::ALL.len();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("a game needs 2-6 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("{hands} hands dealt for {players} players")]
    HandCountMismatch { hands: usize, players: usize },
    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),
    #[error("{0} has been eliminated")]
    PlayerEliminated(PlayerId),
    #[error("choice {index} is out of range for {options} options")]
    InvalidChoice { index: usize, options: usize },
    #[error("{player} cannot show {card}: it does not disprove the suggestion")]
    CardNotShowable { player: PlayerId, card: Card },
    #[error("the game is already over")]
    GameOver,
    #[error("input closed before the game finished")]
    Interrupted,
    #[error(transparent)]
    Belief(#[from] BeliefError),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Whole-table state for one game: board, seats, weapon tokens, and the
/// hidden envelope.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    players: Vec<Player>,
    weapons: Vec<WeaponToken>,
    solution: Scenario,
    current: usize,
    round: u32,
    game_over: bool,
    winner: Option<PlayerId>,
    rng: StdRng,
    seed: u64,
}

impl GameState {
    pub fn new(roles: &[PlayerRole]) -> Result<Self, GameError> {
        let seed: u64 = rand::random();
        Self::with_seed(roles, seed)
    }

    /// Picks the envelope and deals the rest of the cards from `seed`.
    pub fn with_seed(roles: &[PlayerRole], seed: u64) -> Result<Self, GameError> {
        validate_player_count(roles.len())?;
        let mut rng = StdRng::seed_from_u64(seed);
        let (solution, deck) = select_solution(Deck::full().cards(), &mut rng)?;
        let hands = deal_cards(&deck, roles.len());
        Self::assemble(roles, solution, hands, rng, seed)
    }

    /// Builds a game from an explicit envelope and deal. `seed` still drives
    /// the dice.
    pub fn from_deal(
        roles: &[PlayerRole],
        solution: Scenario,
        hands: Vec<Hand>,
        seed: u64,
    ) -> Result<Self, GameError> {
        validate_player_count(roles.len())?;
        Self::assemble(roles, solution, hands, StdRng::seed_from_u64(seed), seed)
    }

    fn assemble(
        roles: &[PlayerRole],
        solution: Scenario,
        hands: Vec<Hand>,
        rng: StdRng,
        seed: u64,
    ) -> Result<Self, GameError> {
        if hands.len() != roles.len() {
            return Err(GameError::HandCountMismatch {
                hands: hands.len(),
                players: roles.len(),
            });
        }

        let ids: Vec<PlayerId> = (0..roles.len()).map(PlayerId::from_seat).collect();
        let players = roles
            .iter()
            .zip(hands)
            .enumerate()
            .map(|(seat, (role, hand))| {
                let id = ids[seat];
                let kind = match role {
                    PlayerRole::Human => PlayerKind::Human,
                    PlayerRole::Agent => PlayerKind::Agent(Box::new(AgentKnowledge::new(
                        id,
                        &hand,
                        ids.iter().copied(),
                    ))),
                };
                Player::new(id, Suspect::ALL[seat], hand, kind)
            })
            .collect();

        Ok(Self {
            board: Board::classic(),
            players,
            weapons: WeaponToken::initial_layout(),
            solution,
            current: 0,
            round: 1,
            game_over: false,
            winner: None,
            rng,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id() == id)
    }

    pub(crate) fn seat_of(&self, id: PlayerId) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|player| player.id() == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn weapons(&self) -> &[WeaponToken] {
        &self.weapons
    }

    pub fn weapon_location(&self, weapon: Weapon) -> Option<Room> {
        self.weapons
            .iter()
            .find(|token| token.weapon == weapon)
            .map(|token| token.location)
    }

    /// The hidden envelope. Only the engine and its host should look at it.
    pub fn solution(&self) -> Scenario {
        self.solution
    }

    pub fn current_player(&self) -> PlayerId {
        self.players[self.current].id()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn all_eliminated(&self) -> bool {
        self.players.iter().all(Player::is_eliminated)
    }

    pub(crate) fn finish(&mut self, winner: Option<PlayerId>) {
        self.game_over = true;
        self.winner = winner;
    }

    /// Passes the turn clockwise; a new round starts when the first seat is
    /// reached again.
    pub fn advance_turn(&mut self) {
        self.current = (self.current + 1) % self.players.len();
        if self.current == 0 {
            self.round += 1;
        }
    }

    pub fn roll_dice(&mut self) -> u32 {
        self.rng.gen_range(1..=6)
    }

    /// Destinations within `roll` steps of the player, sorted by name.
    pub fn available_moves(&self, id: PlayerId, roll: u32) -> Vec<Position> {
        let Some(player) = self.player(id) else {
            return Vec::new();
        };
        let mut moves: Vec<Position> = self
            .board
            .reachable_with_steps(player.position(), roll)
            .into_iter()
            .collect();
        moves.sort_by_cached_key(|position| position.to_string());
        moves
    }

    /// Pulls the token of whoever plays `suspect` into `room`. Characters
    /// nobody is playing have no token, so this is then a no-op.
    pub fn move_character_token_to_room(
        &mut self,
        suspect: Suspect,
        room: Room,
        io: &mut dyn TableIo,
    ) {
        let Some(player) = self
            .players
            .iter_mut()
            .find(|player| player.character() == suspect)
        else {
            return;
        };
        let from = player.position();
        player.move_to(Position::Room(room));
        announce(
            io,
            &GameEvent::CharacterSummoned {
                suspect,
                from,
                to: room,
            },
        );
    }

    pub fn move_weapon_token_to_room(&mut self, weapon: Weapon, room: Room, io: &mut dyn TableIo) {
        let Some(token) = self.weapons.iter_mut().find(|token| token.weapon == weapon) else {
            return;
        };
        let from = token.location;
        token.location = room;
        announce(
            io,
            &GameEvent::WeaponSummoned {
                weapon,
                from,
                to: room,
            },
        );
    }

    /// Applies `update` to the knowledge base of `id` if that seat is an
    /// agent.
    pub(crate) fn update_knowledge<F>(&mut self, id: PlayerId, update: F)
    where
        F: FnOnce(&mut AgentKnowledge),
    {
        if let Some(knowledge) = self.player_mut(id).and_then(Player::knowledge_mut) {
            update(knowledge);
        }
    }
}

fn validate_player_count(count: usize) -> Result<(), GameError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        Ok(())
    } else {
        Err(GameError::InvalidPlayerCount(count))
    }
}

#[cfg(test)]
mod tests {
    use super::{GameError, GameState};
    use crate::game::table::SilentTable;
    use crate::model::board::Position;
    use crate::model::card::Card;
    use crate::model::player::{PlayerId, PlayerRole};
    use crate::model::room::Room;
    use crate::model::suspect::Suspect;
    use crate::model::weapon::Weapon;
    use std::collections::HashSet;

    const FOUR_HUMANS: [PlayerRole; 4] = [PlayerRole::Human; 4];

    #[test]
    fn seeded_setup_deals_every_non_solution_card() {
        let game = GameState::with_seed(&FOUR_HUMANS, 11).unwrap();
        let solution = game.solution();
        let mut dealt = HashSet::new();
        for player in game.players() {
            for card in player.hand().iter() {
                assert!(!solution.contains(*card));
                assert!(dealt.insert(*card), "{card} dealt twice");
            }
        }
        assert_eq!(dealt.len(), Card::COUNT - 3);
    }

    #[test]
    fn same_seed_same_envelope() {
        let a = GameState::with_seed(&FOUR_HUMANS, 5).unwrap();
        let b = GameState::with_seed(&FOUR_HUMANS, 5).unwrap();
        assert_eq!(a.solution(), b.solution());
        assert_eq!(a.seed(), 5);
    }

    #[test]
    fn player_count_is_validated() {
        assert_eq!(
            GameState::with_seed(&[PlayerRole::Human], 0).unwrap_err(),
            GameError::InvalidPlayerCount(1)
        );
        assert_eq!(
            GameState::with_seed(&[PlayerRole::Agent; 7], 0).unwrap_err(),
            GameError::InvalidPlayerCount(7)
        );
    }

    #[test]
    fn seats_get_characters_in_order() {
        let game = GameState::with_seed(&FOUR_HUMANS, 0).unwrap();
        let characters: Vec<_> = game.players().iter().map(|p| p.character()).collect();
        assert_eq!(characters, Suspect::ALL[..4].to_vec());
        assert_eq!(game.players()[2].id(), PlayerId::new(3));
        assert_eq!(
            game.players()[0].position(),
            Position::Start(Suspect::MissScarlett)
        );
    }

    #[test]
    fn agents_start_without_their_own_cards() {
        let roles = [PlayerRole::Human, PlayerRole::Agent, PlayerRole::Human];
        let game = GameState::with_seed(&roles, 21).unwrap();
        let agent = &game.players()[1];
        let knowledge = agent.knowledge().unwrap();
        for card in agent.hand().iter() {
            assert!(!knowledge.is_candidate(*card));
        }
        assert!(game.players()[0].knowledge().is_none());
    }

    #[test]
    fn turns_rotate_and_count_rounds() {
        let mut game = GameState::with_seed(&[PlayerRole::Human; 3], 0).unwrap();
        assert_eq!(game.current_player(), PlayerId::new(1));
        game.advance_turn();
        game.advance_turn();
        assert_eq!(game.current_player(), PlayerId::new(3));
        assert_eq!(game.round(), 1);
        game.advance_turn();
        assert_eq!(game.current_player(), PlayerId::new(1));
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn dice_stay_in_range() {
        let mut game = GameState::with_seed(&FOUR_HUMANS, 8).unwrap();
        for _ in 0..200 {
            let roll = game.roll_dice();
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn available_moves_are_sorted_by_name() {
        let game = GameState::with_seed(&FOUR_HUMANS, 0).unwrap();
        let moves = game.available_moves(PlayerId::new(1), 2);
        let names: Vec<String> = moves.iter().map(|p| p.to_string()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(moves.contains(&Position::Room(Room::Hall)));
        assert!(game.available_moves(PlayerId::new(9), 2).is_empty());
    }

    #[test]
    fn summoning_moves_tokens_and_ignores_unseated_characters() {
        let mut game = GameState::with_seed(&[PlayerRole::Human; 2], 0).unwrap();
        let mut table = SilentTable;

        game.move_character_token_to_room(Suspect::ColonelMustard, Room::Study, &mut table);
        assert_eq!(game.players()[1].position(), Position::Room(Room::Study));

        game.move_character_token_to_room(Suspect::ProfessorPlum, Room::Study, &mut table);
        assert_eq!(game.players()[0].position(), Position::Start(Suspect::MissScarlett));

        game.move_weapon_token_to_room(Weapon::Wrench, Room::Study, &mut table);
        assert_eq!(game.weapon_location(Weapon::Wrench), Some(Room::Study));
    }
}
