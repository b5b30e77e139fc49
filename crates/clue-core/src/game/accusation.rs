use crate::game::game_state::{GameError, GameState};
use crate::game::table::{GameEvent, TableIo, announce};
use crate::model::player::PlayerId;
use crate::model::scenario::Scenario;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccusationOutcome {
    Correct,
    Wrong,
}

impl GameState {
    /// Asks `accuser` for an accusation and resolves it.
    pub fn handle_accusation(
        &mut self,
        accuser: PlayerId,
        io: &mut dyn TableIo,
    ) -> Result<AccusationOutcome, GameError> {
        self.ensure_active(accuser)?;
        let accusation =
            self.decide(accuser, io, |controller, player| controller.choose_accusation(player))?;
        self.resolve_accusation(accuser, accusation, io)
    }

    /// Checks `accusation` against the envelope. A correct accusation ends
    /// the game; a wrong one eliminates the accuser, and the game ends
    /// without a winner once nobody is left.
    pub fn resolve_accusation(
        &mut self,
        accuser: PlayerId,
        accusation: Scenario,
        io: &mut dyn TableIo,
    ) -> Result<AccusationOutcome, GameError> {
        self.ensure_active(accuser)?;
        announce(
            io,
            &GameEvent::AccusationMade {
                player: accuser,
                accusation,
            },
        );

        if accusation == self.solution() {
            info!(player = %accuser, %accusation, "accusation correct");
            announce(io, &GameEvent::AccusationCorrect { player: accuser });
            self.finish(Some(accuser));
            return Ok(AccusationOutcome::Correct);
        }

        info!(player = %accuser, %accusation, "accusation wrong");
        if let Some(player) = self.player_mut(accuser) {
            player.eliminate();
        }
        announce(io, &GameEvent::AccusationWrong { player: accuser });
        if self.all_eliminated() {
            announce(io, &GameEvent::AllEliminated);
            self.finish(None);
        }
        Ok(AccusationOutcome::Wrong)
    }

    fn ensure_active(&self, id: PlayerId) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        let player = self.player(id).ok_or(GameError::UnknownPlayer(id))?;
        if player.is_eliminated() {
            return Err(GameError::PlayerEliminated(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AccusationOutcome;
    use crate::game::game_state::{GameError, GameState};
    use crate::game::table::SilentTable;
    use crate::model::hand::Hand;
    use crate::model::player::{PlayerId, PlayerRole};
    use crate::model::room::Room;
    use crate::model::scenario::Scenario;
    use crate::model::suspect::Suspect;
    use crate::model::weapon::Weapon;

    fn envelope() -> Scenario {
        Scenario::new(Suspect::ColonelMustard, Weapon::Revolver, Room::Library)
    }

    fn game() -> GameState {
        GameState::from_deal(
            &[PlayerRole::Human; 2],
            envelope(),
            vec![Hand::new(), Hand::new()],
            0,
        )
        .unwrap()
    }

    #[test]
    fn correct_accusation_wins() {
        let mut game = game();
        let outcome = game
            .resolve_accusation(PlayerId::new(2), envelope(), &mut SilentTable)
            .unwrap();
        assert_eq!(outcome, AccusationOutcome::Correct);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(PlayerId::new(2)));
    }

    #[test]
    fn wrong_accusation_eliminates_but_game_goes_on() {
        let mut game = game();
        let wrong = Scenario::new(Suspect::ColonelMustard, Weapon::Revolver, Room::Hall);
        let outcome = game
            .resolve_accusation(PlayerId::new(1), wrong, &mut SilentTable)
            .unwrap();
        assert_eq!(outcome, AccusationOutcome::Wrong);
        assert!(game.player(PlayerId::new(1)).unwrap().is_eliminated());
        assert!(!game.is_game_over());
        assert_eq!(
            game.resolve_accusation(PlayerId::new(1), envelope(), &mut SilentTable),
            Err(GameError::PlayerEliminated(PlayerId::new(1)))
        );
    }

    #[test]
    fn last_wrong_accusation_ends_without_winner() {
        let mut game = game();
        let wrong = Scenario::new(Suspect::MrsWhite, Weapon::Rope, Room::Study);
        for id in [PlayerId::new(1), PlayerId::new(2)] {
            game.resolve_accusation(id, wrong, &mut SilentTable).unwrap();
        }
        assert!(game.all_eliminated());
        assert!(game.is_game_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn human_accusation_needs_input() {
        let mut game = game();
        assert_eq!(
            game.handle_accusation(PlayerId::new(1), &mut SilentTable),
            Err(GameError::Interrupted)
        );
        assert!(!game.player(PlayerId::new(1)).unwrap().is_eliminated());
    }
}
