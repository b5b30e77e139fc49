use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Weapon {
    Candlestick = 0,
    Dagger = 1,
    LeadPipe = 2,
    Revolver = 3,
    Rope = 4,
    Wrench = 5,
}

impl Weapon {
    pub const ALL: [Weapon; 6] = [
        Weapon::Candlestick,
        Weapon::Dagger,
        Weapon::LeadPipe,
        Weapon::Revolver,
        Weapon::Rope,
        Weapon::Wrench,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Weapon::Candlestick => "Candlestick",
            Weapon::Dagger => "Dagger",
            Weapon::LeadPipe => "Lead Pipe",
            Weapon::Revolver => "Revolver",
            Weapon::Rope => "Rope",
            Weapon::Wrench => "Wrench",
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
