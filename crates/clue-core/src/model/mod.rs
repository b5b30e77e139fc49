pub mod board;
pub mod card;
pub mod deck;
pub mod hand;
pub mod player;
pub mod room;
pub mod scenario;
pub mod suspect;
pub mod token;
pub mod weapon;
