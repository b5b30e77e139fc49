use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Room {
    Kitchen = 0,
    Ballroom = 1,
    Conservatory = 2,
    DiningRoom = 3,
    BilliardRoom = 4,
    Library = 5,
    Lounge = 6,
    Hall = 7,
    Study = 8,
}

impl Room {
    pub const ALL: [Room; 9] = [
        Room::Kitchen,
        Room::Ballroom,
        Room::Conservatory,
        Room::DiningRoom,
        Room::BilliardRoom,
        Room::Library,
        Room::Lounge,
        Room::Hall,
        Room::Study,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Room::Kitchen => "Kitchen",
            Room::Ballroom => "Ballroom",
            Room::Conservatory => "Conservatory",
            Room::DiningRoom => "Dining Room",
            Room::BilliardRoom => "Billiard Room",
            Room::Library => "Library",
            Room::Lounge => "Lounge",
            Room::Hall => "Hall",
            Room::Study => "Study",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
