//! Mansion layout: an undirected room graph, the character start nodes that
//! hang off it, and the secret passages between corner rooms.

use crate::model::room::Room;
use crate::model::suspect::Suspect;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// A place a character token can stand on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Room(Room),
    Start(Suspect),
}

impl Position {
    pub const fn room(self) -> Option<Room> {
        match self {
            Position::Room(room) => Some(room),
            Position::Start(_) => None,
        }
    }

    pub const fn is_room(self) -> bool {
        matches!(self, Position::Room(_))
    }
}

impl From<Room> for Position {
    fn from(value: Room) -> Self {
        Position::Room(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Room(room) => f.write_str(room.name()),
            Position::Start(suspect) => write!(f, "{} Start", suspect.name()),
        }
    }
}

const ROOM_EDGES: [(Room, Room); 14] = [
    (Room::Kitchen, Room::Ballroom),
    (Room::Kitchen, Room::DiningRoom),
    (Room::Ballroom, Room::Conservatory),
    (Room::Ballroom, Room::Hall),
    (Room::Ballroom, Room::DiningRoom),
    (Room::Conservatory, Room::BilliardRoom),
    (Room::DiningRoom, Room::Hall),
    (Room::DiningRoom, Room::Lounge),
    (Room::BilliardRoom, Room::Library),
    (Room::BilliardRoom, Room::Hall),
    (Room::Library, Room::Hall),
    (Room::Library, Room::Study),
    (Room::Lounge, Room::Hall),
    (Room::Hall, Room::Study),
];

const SECRET_PASSAGES: [(Room, Room); 4] = [
    (Room::Kitchen, Room::Study),
    (Room::Study, Room::Kitchen),
    (Room::Conservatory, Room::Lounge),
    (Room::Lounge, Room::Conservatory),
];

#[derive(Debug, Clone)]
pub struct Board {
    adjacency: HashMap<Position, BTreeSet<Position>>,
    secret_passages: HashMap<Room, Room>,
}

impl Board {
    pub fn classic() -> Self {
        let mut board = Self {
            adjacency: HashMap::new(),
            secret_passages: SECRET_PASSAGES.iter().copied().collect(),
        };

        for room in Room::ALL {
            board.adjacency.entry(Position::Room(room)).or_default();
        }
        for (a, b) in ROOM_EDGES {
            board.add_edge(Position::Room(a), Position::Room(b));
        }
        for suspect in Suspect::ALL {
            board.add_edge(
                Position::Start(suspect),
                Position::Room(Self::start_room(suspect)),
            );
        }
        board
    }

    /// Starting node for a character.
    pub const fn start_position(suspect: Suspect) -> Position {
        Position::Start(suspect)
    }

    /// The single room each start node opens onto.
    pub const fn start_room(suspect: Suspect) -> Room {
        match suspect {
            Suspect::MissScarlett => Room::Lounge,
            Suspect::ColonelMustard => Room::DiningRoom,
            Suspect::MrsWhite => Room::Kitchen,
            Suspect::ReverendGreen => Room::Ballroom,
            Suspect::MrsPeacock => Room::Conservatory,
            Suspect::ProfessorPlum => Room::Study,
        }
    }

    fn add_edge(&mut self, a: Position, b: Position) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    pub fn neighbors(&self, position: Position) -> BTreeSet<Position> {
        self.adjacency.get(&position).cloned().unwrap_or_default()
    }

    /// Every position whose shortest distance from `start` is at most
    /// `steps`, excluding `start` itself.
    pub fn reachable_with_steps(&self, start: Position, steps: u32) -> BTreeSet<Position> {
        let mut distance: HashMap<Position, u32> = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            let current_distance = distance[&current];
            if current_distance >= steps {
                continue;
            }
            let Some(neighbors) = self.adjacency.get(&current) else {
                continue;
            };
            for next in neighbors {
                let candidate = current_distance + 1;
                let shorter = distance.get(next).is_none_or(|known| *known > candidate);
                if shorter {
                    distance.insert(*next, candidate);
                    queue.push_back(*next);
                }
            }
        }

        distance
            .into_iter()
            .filter(|(position, dist)| *position != start && *dist <= steps)
            .map(|(position, _)| position)
            .collect()
    }

    pub fn has_secret_passage(&self, room: Room) -> bool {
        self.secret_passages.contains_key(&room)
    }

    pub fn secret_passage_destination(&self, room: Room) -> Option<Room> {
        self.secret_passages.get(&room).copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.adjacency.keys()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, Position};
    use crate::model::room::Room;
    use crate::model::suspect::Suspect;
    use std::collections::BTreeSet;

    fn room(room: Room) -> Position {
        Position::Room(room)
    }

    #[test]
    fn adjacency_is_symmetric() {
        let board = Board::classic();
        for position in board.positions() {
            for neighbor in board.neighbors(*position) {
                assert!(
                    board.neighbors(neighbor).contains(position),
                    "{neighbor} does not link back to {position}"
                );
            }
        }
    }

    #[test]
    fn every_room_is_a_key() {
        let board = Board::classic();
        for r in Room::ALL {
            assert!(!board.neighbors(room(r)).is_empty());
        }
    }

    #[test]
    fn start_nodes_touch_exactly_one_room() {
        let board = Board::classic();
        for suspect in Suspect::ALL {
            let neighbors = board.neighbors(Position::Start(suspect));
            assert_eq!(
                neighbors,
                BTreeSet::from([room(Board::start_room(suspect))])
            );
        }
    }

    #[test]
    fn zero_steps_reaches_nothing() {
        let board = Board::classic();
        assert!(board.reachable_with_steps(room(Room::Hall), 0).is_empty());
    }

    #[test]
    fn kitchen_two_steps_uses_shortest_paths() {
        let board = Board::classic();
        let reachable = board.reachable_with_steps(room(Room::Kitchen), 2);

        assert!(reachable.contains(&room(Room::Ballroom)));
        assert!(reachable.contains(&room(Room::DiningRoom)));
        assert!(reachable.contains(&room(Room::Conservatory)));
        assert!(reachable.contains(&room(Room::Hall)));
        assert!(reachable.contains(&room(Room::Lounge)));
        assert!(reachable.contains(&Position::Start(Suspect::MrsWhite)));
        assert!(reachable.contains(&Position::Start(Suspect::ReverendGreen)));
        assert!(!reachable.contains(&room(Room::Kitchen)));

        // Distance three and beyond.
        assert!(!reachable.contains(&room(Room::BilliardRoom)));
        assert!(!reachable.contains(&room(Room::Library)));
        assert!(!reachable.contains(&room(Room::Study)));
        assert!(!reachable.contains(&Position::Start(Suspect::MrsPeacock)));
    }

    #[test]
    fn reachability_grows_monotonically_and_excludes_start() {
        let board = Board::classic();
        let starts: Vec<Position> = board.positions().copied().collect();
        for start in starts {
            for steps in 0..8 {
                let smaller = board.reachable_with_steps(start, steps);
                let larger = board.reachable_with_steps(start, steps + 1);
                assert!(!smaller.contains(&start));
                assert!(smaller.is_subset(&larger), "{start} at {steps}");
            }
        }
    }

    #[test]
    fn unknown_position_has_no_neighbors() {
        let mut board = Board::classic();
        let lonely = Position::Start(Suspect::MissScarlett);
        board.adjacency.remove(&lonely);
        assert!(board.reachable_with_steps(lonely, 6).is_empty());
    }

    #[test]
    fn secret_passages_link_corner_rooms() {
        let board = Board::classic();
        assert!(board.has_secret_passage(Room::Kitchen));
        assert_eq!(board.secret_passage_destination(Room::Kitchen), Some(Room::Study));
        assert_eq!(
            board.secret_passage_destination(Room::Lounge),
            Some(Room::Conservatory)
        );
        assert!(!board.has_secret_passage(Room::Hall));
        assert_eq!(board.secret_passage_destination(Room::Hall), None);
    }

    #[test]
    fn start_position_display_names() {
        assert_eq!(
            Position::Start(Suspect::MrsPeacock).to_string(),
            "Mrs. Peacock Start"
        );
        assert_eq!(room(Room::DiningRoom).to_string(), "Dining Room");
    }
}
