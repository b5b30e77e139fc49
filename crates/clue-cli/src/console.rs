//! Line-oriented table for a shared terminal.

use std::io::{self, BufRead, Write};

use clue_core::game::{GameEvent, GameState, TableIo};
use clue_core::model::player::Player;
use tracing::warn;

/// Reads numbered answers from `input` and narrates to `output`.
pub struct ConsoleTable<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleTable<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Seats and characters. Hands are shown one at a time, on each
    /// human's own turn.
    pub fn print_setup(&mut self, game: &GameState) -> io::Result<()> {
        writeln!(self.output, "Players in this game:")?;
        for player in game.players() {
            let role = if player.is_agent() { " [agent]" } else { "" };
            writeln!(self.output, "  {player}{role}")?;
        }
        writeln!(self.output)
    }

    fn print_hand(&mut self, player: &Player) -> io::Result<()> {
        writeln!(self.output, "Cards held by {} ({}):", player.name(), player.id())?;
        for card in player.hand().iter() {
            writeln!(self.output, "  - {card} ({})", card.category())?;
        }
        Ok(())
    }

    fn ask(&mut self, prompt: &str, options: &[String]) -> io::Result<Option<usize>> {
        writeln!(self.output, "\n{prompt}")?;
        for (number, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {option}", number + 1)?;
        }
        let mut line = String::new();
        loop {
            write!(self.output, "Choose 1-{}: ", options.len())?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim().parse::<usize>() {
                Ok(number) if (1..=options.len()).contains(&number) => {
                    return Ok(Some(number - 1));
                }
                _ => writeln!(self.output, "Invalid choice. Try again.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> TableIo for ConsoleTable<R, W> {
    fn choose(&mut self, prompt: &str, options: &[String]) -> Option<usize> {
        match self.ask(prompt, options) {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "console input failed");
                None
            }
        }
    }

    fn announce(&mut self, event: &GameEvent) {
        if let Err(err) = writeln!(self.output, "{event}") {
            warn!(error = %err, "console output failed");
        }
    }

    fn show_hand(&mut self, player: &Player) {
        if let Err(err) = self.print_hand(player) {
            warn!(error = %err, "console output failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleTable;
    use clue_core::game::{GameEvent, GameState, TableIo};
    use clue_core::model::card::Card;
    use clue_core::model::player::{PlayerId, PlayerRole};
    use clue_core::model::weapon::Weapon;
    use std::io::Cursor;

    fn options() -> Vec<String> {
        vec!["Move".to_string(), "Accuse".to_string()]
    }

    fn output(table: ConsoleTable<Cursor<&[u8]>, Vec<u8>>) -> String {
        String::from_utf8(table.into_output()).expect("utf8 output")
    }

    #[test]
    fn reprompts_until_a_valid_number() {
        let mut table = ConsoleTable::new(Cursor::new(&b"x\n0\n3\n2\n"[..]), Vec::new());
        assert_eq!(table.choose("Move or accuse?", &options()), Some(1));

        let text = output(table);
        assert!(text.contains("  1. Move"));
        assert!(text.contains("  2. Accuse"));
        assert_eq!(text.matches("Invalid choice").count(), 3);
    }

    #[test]
    fn end_of_input_is_none() {
        let mut table = ConsoleTable::new(Cursor::new(&b"9\n"[..]), Vec::new());
        assert_eq!(table.choose("Move or accuse?", &options()), None);
    }

    #[test]
    fn events_are_narrated() {
        let mut table = ConsoleTable::new(Cursor::new(&b""[..]), Vec::new());
        table.announce(&GameEvent::CardRevealed {
            to: PlayerId::new(2),
            card: Card::Weapon(Weapon::Rope),
        });
        assert_eq!(output(table), "(Player 2 only) The card shown is Rope.\n");
    }

    #[test]
    fn setup_lists_seats_without_hands() {
        let game = GameState::with_seed(&[PlayerRole::Human, PlayerRole::Agent], 3)
            .expect("setup");
        let mut table = ConsoleTable::new(Cursor::new(&b""[..]), Vec::new());
        table.print_setup(&game).expect("print setup");

        let text = output(table);
        assert!(text.contains("Players in this game:"));
        assert!(text.contains("[agent]"));
        assert!(!text.contains("Cards held by"));
    }

    #[test]
    fn human_hand_is_printed_on_their_turn() {
        let mut game = GameState::with_seed(&[PlayerRole::Human, PlayerRole::Agent], 3)
            .expect("setup");
        let hand: Vec<String> = game
            .player(PlayerId::new(1))
            .expect("seat 1")
            .hand()
            .iter()
            .map(|card| card.to_string())
            .collect();
        assert!(!hand.is_empty());

        // Move, then stop at the destination prompt.
        let mut table = ConsoleTable::new(Cursor::new(&b"1\n"[..]), Vec::new());
        let _ = game.take_turn(&mut table);

        let text = output(table);
        let turn = text.find("Player 1's turn").expect("turn narrated");
        let cards = text.find("Cards held by Miss Scarlett (Player 1):").expect("hand shown");
        assert!(turn < cards);
        for card in &hand {
            assert!(text.contains(&format!("  - {card} (")), "{card} missing");
        }
    }
}
