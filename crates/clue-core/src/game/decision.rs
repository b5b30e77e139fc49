use crate::belief::AgentKnowledge;
use crate::game::game_state::{GameError, GameState};
use crate::game::table::TableIo;
use crate::model::board::Position;
use crate::model::card::Card;
use crate::model::player::{Player, PlayerId, PlayerKind};
use crate::model::room::Room;
use crate::model::scenario::Scenario;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnChoice {
    Move,
    Accuse,
}

/// Every decision the turn protocol asks of a seat. Humans answer through
/// the table, agents from their knowledge base.
pub trait Controller {
    fn choose_action(&mut self, player: &Player) -> Result<TurnChoice, GameError>;

    fn use_secret_passage(&mut self, player: &Player, destination: Room)
    -> Result<bool, GameError>;

    /// `options` is never empty and is already in presentation order.
    fn choose_destination(
        &mut self,
        player: &Player,
        options: &[Position],
    ) -> Result<Position, GameError>;

    fn choose_suggestion(&mut self, player: &Player, room: Room) -> Result<Scenario, GameError>;

    fn choose_accusation(&mut self, player: &Player) -> Result<Scenario, GameError>;

    /// `matching` holds at least one card from the refuter's hand.
    fn choose_card_to_show(
        &mut self,
        player: &Player,
        suggester: PlayerId,
        matching: &[Card],
    ) -> Result<Card, GameError>;
}

pub fn controller_for<'a>(kind: &'a PlayerKind, io: &'a mut dyn TableIo) -> Box<dyn Controller + 'a> {
    match kind {
        PlayerKind::Human => Box::new(HumanController { io }),
        PlayerKind::Agent(knowledge) => Box::new(AgentController { knowledge }),
    }
}

impl GameState {
    /// Runs one decision for `id` through the controller matching its kind.
    pub(crate) fn decide<T, F>(
        &self,
        id: PlayerId,
        io: &mut dyn TableIo,
        decision: F,
    ) -> Result<T, GameError>
    where
        F: FnOnce(&mut dyn Controller, &Player) -> Result<T, GameError>,
    {
        let player = self.player(id).ok_or(GameError::UnknownPlayer(id))?;
        let mut controller = controller_for(player.kind(), io);
        decision(controller.as_mut(), player)
    }
}

pub struct HumanController<'a> {
    io: &'a mut dyn TableIo,
}

impl HumanController<'_> {
    fn pick<T: Copy>(
        &mut self,
        prompt: &str,
        items: &[T],
        label: impl Fn(&T) -> String,
    ) -> Result<T, GameError> {
        let options: Vec<String> = items.iter().map(label).collect();
        let index = self
            .io
            .choose(prompt, &options)
            .ok_or(GameError::Interrupted)?;
        items.get(index).copied().ok_or(GameError::InvalidChoice {
            index,
            options: items.len(),
        })
    }
}

impl Controller for HumanController<'_> {
    fn choose_action(&mut self, player: &Player) -> Result<TurnChoice, GameError> {
        self.pick(
            &format!("{}, do you want to move or make an accusation?", player.name()),
            &[TurnChoice::Move, TurnChoice::Accuse],
            |choice| match choice {
                TurnChoice::Move => "Move".to_string(),
                TurnChoice::Accuse => "Accuse".to_string(),
            },
        )
    }

    fn use_secret_passage(
        &mut self,
        player: &Player,
        destination: Room,
    ) -> Result<bool, GameError> {
        self.pick(
            &format!("{}, this room has a secret passage.", player.name()),
            &[false, true],
            |take| {
                if *take {
                    format!("Use the secret passage to {destination}")
                } else {
                    "Roll the dice".to_string()
                }
            },
        )
    }

    fn choose_destination(
        &mut self,
        player: &Player,
        options: &[Position],
    ) -> Result<Position, GameError> {
        self.pick(
            &format!("{}, choose a destination.", player.name()),
            options,
            Position::to_string,
        )
    }

    fn choose_suggestion(&mut self, player: &Player, room: Room) -> Result<Scenario, GameError> {
        let suspect = self.pick(
            &format!("{}, you are in the {room}. Choose a suspect.", player.name()),
            &Suspect::ALL,
            Suspect::to_string,
        )?;
        let weapon = self.pick("Choose a weapon.", &Weapon::ALL, Weapon::to_string)?;
        Ok(Scenario::new(suspect, weapon, room))
    }

    fn choose_accusation(&mut self, player: &Player) -> Result<Scenario, GameError> {
        let suspect = self.pick(
            &format!("{}, choose the suspect you accuse.", player.name()),
            &Suspect::ALL,
            Suspect::to_string,
        )?;
        let weapon = self.pick("Choose the weapon.", &Weapon::ALL, Weapon::to_string)?;
        let room = self.pick("Choose the room.", &Room::ALL, Room::to_string)?;
        Ok(Scenario::new(suspect, weapon, room))
    }

    fn choose_card_to_show(
        &mut self,
        player: &Player,
        suggester: PlayerId,
        matching: &[Card],
    ) -> Result<Card, GameError> {
        if let [only] = matching {
            return Ok(*only);
        }
        self.pick(
            &format!("{}, choose a card to show to {suggester}.", player.name()),
            matching,
            Card::to_string,
        )
    }
}

/// Fixed, non-strategic policy: accuse once certain, otherwise roll, take
/// the first destination, and suggest the first remaining candidates.
pub struct AgentController<'a> {
    knowledge: &'a AgentKnowledge,
}

impl Controller for AgentController<'_> {
    fn choose_action(&mut self, _player: &Player) -> Result<TurnChoice, GameError> {
        if self.knowledge.should_accuse() {
            Ok(TurnChoice::Accuse)
        } else {
            Ok(TurnChoice::Move)
        }
    }

    fn use_secret_passage(
        &mut self,
        _player: &Player,
        _destination: Room,
    ) -> Result<bool, GameError> {
        Ok(false)
    }

    fn choose_destination(
        &mut self,
        _player: &Player,
        options: &[Position],
    ) -> Result<Position, GameError> {
        options
            .first()
            .copied()
            .ok_or(GameError::InvalidChoice { index: 0, options: 0 })
    }

    fn choose_suggestion(&mut self, _player: &Player, room: Room) -> Result<Scenario, GameError> {
        Ok(self.knowledge.choose_suggestion(room)?)
    }

    fn choose_accusation(&mut self, _player: &Player) -> Result<Scenario, GameError> {
        Ok(self.knowledge.accusation()?)
    }

    fn choose_card_to_show(
        &mut self,
        _player: &Player,
        _suggester: PlayerId,
        matching: &[Card],
    ) -> Result<Card, GameError> {
        matching
            .first()
            .copied()
            .ok_or(GameError::InvalidChoice { index: 0, options: 0 })
    }
}
