//! One player's turn as an explicit state machine, and the loop that plays
//! turns until the game ends.

use crate::game::accusation::AccusationOutcome;
use crate::game::decision::TurnChoice;
use crate::game::game_state::{GameError, GameState};
use crate::game::suggestion::SuggestionOutcome;
use crate::game::table::{GameEvent, TableIo, announce};
use crate::model::board::Position;
use crate::model::player::PlayerId;
use crate::model::room::Room;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnStep {
    Start,
    Accuse,
    Move,
    SecretPassage(Room),
    DiceRoll,
    Destination(Position),
    Suggestion(Room),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The player was eliminated earlier and sat the turn out.
    Skipped,
    Accused { result: AccusationOutcome },
    NoMoves { roll: u32 },
    Moved {
        to: Position,
        suggestion: Option<SuggestionOutcome>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    Solved,
    AllEliminated,
    RoundLimit,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub winner: Option<PlayerId>,
    /// Round in which play stopped, or the limit itself when it was reached.
    pub rounds: u32,
    pub ended_by: GameEnd,
}

impl GameState {
    /// Plays the current player's turn and passes the turn on unless the
    /// game ended during it.
    pub fn take_turn(&mut self, io: &mut dyn TableIo) -> Result<TurnOutcome, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        let id = self.current_player();
        let outcome = self.play_turn(id, io)?;
        debug!(player = %id, ?outcome, "turn finished");
        if !self.is_game_over() {
            self.advance_turn();
        }
        Ok(outcome)
    }

    fn play_turn(&mut self, id: PlayerId, io: &mut dyn TableIo) -> Result<TurnOutcome, GameError> {
        let mut step = TurnStep::Start;
        loop {
            step = match step {
                TurnStep::Start => {
                    let player = self.player(id).ok_or(GameError::UnknownPlayer(id))?;
                    if player.is_eliminated() {
                        announce(io, &GameEvent::TurnSkipped { player: id });
                        return Ok(TurnOutcome::Skipped);
                    }
                    let position = player.position();
                    info!(player = %id, %position, round = self.round(), "turn started");
                    announce(
                        io,
                        &GameEvent::TurnStarted {
                            player: id,
                            position,
                            round: self.round(),
                        },
                    );
                    if !player.is_agent() {
                        io.show_hand(player);
                    }
                    match self.decide(id, io, |controller, player| {
                        controller.choose_action(player)
                    })? {
                        TurnChoice::Accuse => TurnStep::Accuse,
                        TurnChoice::Move => TurnStep::Move,
                    }
                }
                TurnStep::Accuse => {
                    let result = self.handle_accusation(id, io)?;
                    return Ok(TurnOutcome::Accused { result });
                }
                TurnStep::Move => {
                    let passage = self
                        .player(id)
                        .and_then(|player| player.position().room())
                        .and_then(|room| self.board().secret_passage_destination(room));
                    let taken = match passage {
                        Some(to) => self
                            .decide(id, io, |controller, player| {
                                controller.use_secret_passage(player, to)
                            })?
                            .then_some(to),
                        None => None,
                    };
                    match taken {
                        Some(to) => TurnStep::SecretPassage(to),
                        None => TurnStep::DiceRoll,
                    }
                }
                TurnStep::SecretPassage(to) => {
                    let from = self.relocate(id, Position::Room(to))?;
                    if let Position::Room(from) = from {
                        announce(
                            io,
                            &GameEvent::SecretPassageUsed {
                                player: id,
                                from,
                                to,
                            },
                        );
                    }
                    TurnStep::Suggestion(to)
                }
                TurnStep::DiceRoll => {
                    let roll = self.roll_dice();
                    info!(player = %id, roll, "dice rolled");
                    announce(io, &GameEvent::DiceRolled { player: id, roll });
                    let moves = self.available_moves(id, roll);
                    if moves.is_empty() {
                        announce(io, &GameEvent::NoMoves { player: id, roll });
                        return Ok(TurnOutcome::NoMoves { roll });
                    }
                    let to = self.decide(id, io, |controller, player| {
                        controller.choose_destination(player, &moves)
                    })?;
                    TurnStep::Destination(to)
                }
                TurnStep::Destination(to) => {
                    self.relocate(id, to)?;
                    announce(io, &GameEvent::Moved { player: id, to });
                    match to {
                        Position::Room(room) => TurnStep::Suggestion(room),
                        Position::Start(_) => {
                            return Ok(TurnOutcome::Moved {
                                to,
                                suggestion: None,
                            });
                        }
                    }
                }
                TurnStep::Suggestion(room) => {
                    let suggestion = self.handle_suggestion_if_in_room(id, io)?;
                    return Ok(TurnOutcome::Moved {
                        to: Position::Room(room),
                        suggestion,
                    });
                }
            };
        }
    }

    /// Moves `id` and returns where it stood before.
    fn relocate(&mut self, id: PlayerId, to: Position) -> Result<Position, GameError> {
        let player = self.player_mut(id).ok_or(GameError::UnknownPlayer(id))?;
        let from = player.position();
        player.move_to(to);
        Ok(from)
    }

    /// Plays turns until someone solves the case, everyone is eliminated,
    /// `max_rounds` full rounds have been played, or play is cancelled by
    /// `cancel` or by the table running out of input.
    pub fn run(
        &mut self,
        io: &mut dyn TableIo,
        max_rounds: Option<u32>,
        cancel: &AtomicBool,
    ) -> Result<GameSummary, GameError> {
        info!(players = self.players().len(), seed = self.seed(), "game started");
        let ended_by = loop {
            if self.is_game_over() {
                break if self.winner().is_some() {
                    GameEnd::Solved
                } else {
                    GameEnd::AllEliminated
                };
            }
            if cancel.load(Ordering::Relaxed) {
                break GameEnd::Interrupted;
            }
            if max_rounds.is_some_and(|limit| self.round() > limit) {
                break GameEnd::RoundLimit;
            }
            match self.take_turn(io) {
                Ok(_) => {}
                Err(GameError::Interrupted) => break GameEnd::Interrupted,
                Err(err) => return Err(err),
            }
        };

        if matches!(ended_by, GameEnd::Interrupted | GameEnd::RoundLimit) {
            warn!(?ended_by, round = self.round(), "game stopped without a winner");
            self.finish(None);
        }
        let rounds = match ended_by {
            GameEnd::RoundLimit => self.round() - 1,
            _ => self.round(),
        };
        let summary = GameSummary {
            winner: self.winner(),
            rounds,
            ended_by,
        };
        info!(winner = ?summary.winner, rounds, ?ended_by, "game over");
        Ok(summary)
    }
}
