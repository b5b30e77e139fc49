use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suspect {
    MissScarlett = 0,
    ColonelMustard = 1,
    MrsWhite = 2,
    ReverendGreen = 3,
    MrsPeacock = 4,
    ProfessorPlum = 5,
}

impl Suspect {
    pub const ALL: [Suspect; 6] = [
        Suspect::MissScarlett,
        Suspect::ColonelMustard,
        Suspect::MrsWhite,
        Suspect::ReverendGreen,
        Suspect::MrsPeacock,
        Suspect::ProfessorPlum,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suspect::MissScarlett),
            1 => Some(Suspect::ColonelMustard),
            2 => Some(Suspect::MrsWhite),
            3 => Some(Suspect::ReverendGreen),
            4 => Some(Suspect::MrsPeacock),
            5 => Some(Suspect::ProfessorPlum),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suspect::MissScarlett => "Miss Scarlett",
            Suspect::ColonelMustard => "Colonel Mustard",
            Suspect::MrsWhite => "Mrs. White",
            Suspect::ReverendGreen => "Reverend Green",
            Suspect::MrsPeacock => "Mrs. Peacock",
            Suspect::ProfessorPlum => "Professor Plum",
        }
    }
}

impl fmt::Display for Suspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
