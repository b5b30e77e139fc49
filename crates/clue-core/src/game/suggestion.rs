use crate::belief::BeliefSubject;
use crate::game::decision::controller_for;
use crate::game::game_state::{GameError, GameState};
use crate::game::table::{GameEvent, TableIo, announce};
use crate::model::card::Card;
use crate::model::player::PlayerId;
use crate::model::scenario::Scenario;
use serde::Serialize;
use tracing::debug;

/// Who disproved a suggestion and with which card. Only the suggester gets
/// to see `card`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Refutation {
    pub refuter: PlayerId,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuggestionOutcome {
    pub suggestion: Scenario,
    pub refutation: Option<Refutation>,
}

impl GameState {
    /// Announces `suggestion`, pulls the named character and weapon into the
    /// room, then runs the refutation search.
    pub fn make_suggestion(
        &mut self,
        suggester: PlayerId,
        suggestion: Scenario,
        io: &mut dyn TableIo,
    ) -> Result<SuggestionOutcome, GameError> {
        self.seat_of(suggester)?;
        announce(
            io,
            &GameEvent::SuggestionMade {
                player: suggester,
                suggestion,
            },
        );
        self.move_character_token_to_room(suggestion.suspect, suggestion.room, io);
        self.move_weapon_token_to_room(suggestion.weapon, suggestion.room, io);

        let refutation = self.process_refutations(suggester, suggestion, io)?;
        Ok(SuggestionOutcome {
            suggestion,
            refutation,
        })
    }

    /// Asks each seat clockwise from the suggester whether it can disprove
    /// `suggestion`. Eliminated players are still asked. Stops at the first
    /// seat holding a matching card.
    pub fn process_refutations(
        &mut self,
        suggester: PlayerId,
        suggestion: Scenario,
        io: &mut dyn TableIo,
    ) -> Result<Option<Refutation>, GameError> {
        let seat = self.seat_of(suggester)?;
        let cards = suggestion.cards();
        let count = self.players().len();

        for offset in 1..count {
            let refuter = &self.players()[(seat + offset) % count];
            let refuter_id = refuter.id();
            let matching = refuter.hand().matching(&cards);

            if matching.is_empty() {
                announce(io, &GameEvent::CannotRefute { player: refuter_id });
                self.update_knowledge(suggester, |knowledge| {
                    for card in cards {
                        knowledge.record_player_cannot_have(refuter_id.into(), card);
                    }
                });
                continue;
            }

            let card = controller_for(refuter.kind(), io).choose_card_to_show(
                refuter,
                suggester,
                &matching,
            )?;
            ensure_showable(refuter_id, card, &matching)?;
            debug!(suggester = %suggester, refuter = %refuter_id, %card, "suggestion refuted");

            announce(
                io,
                &GameEvent::CardShown {
                    refuter: refuter_id,
                    to: suggester,
                },
            );
            announce(
                io,
                &GameEvent::CardRevealed {
                    to: suggester,
                    card,
                },
            );

            self.update_knowledge(suggester, |knowledge| {
                knowledge.record_seen_card(card);
                knowledge.record_player_may_have(refuter_id.into(), &cards);
            });
            self.update_knowledge(refuter_id, |knowledge| {
                knowledge.record_player_has(refuter_id.into(), card);
            });

            return Ok(Some(Refutation {
                refuter: refuter_id,
                card,
            }));
        }

        announce(io, &GameEvent::NoRefutation { suggestion });
        self.update_knowledge(suggester, |knowledge| {
            for card in cards {
                knowledge.record_player_cannot_have(BeliefSubject::NoOne, card);
            }
        });
        Ok(None)
    }

    /// Forced suggestion for a player standing in a room. Players anywhere
    /// else have nothing to suggest.
    pub fn handle_suggestion_if_in_room(
        &mut self,
        id: PlayerId,
        io: &mut dyn TableIo,
    ) -> Result<Option<SuggestionOutcome>, GameError> {
        let player = self.player(id).ok_or(GameError::UnknownPlayer(id))?;
        let Some(room) = player.position().room() else {
            return Ok(None);
        };
        let suggestion = self.decide(id, io, |controller, player| {
            controller.choose_suggestion(player, room)
        })?;
        self.make_suggestion(id, suggestion, io).map(Some)
    }
}

fn ensure_showable(refuter: PlayerId, card: Card, matching: &[Card]) -> Result<(), GameError> {
    if matching.contains(&card) {
        Ok(())
    } else {
        Err(GameError::CardNotShowable {
            player: refuter,
            card,
        })
    }
}
