mod explore;
mod mana;
mod movement;
mod play;

pub use explore::Explore;
pub use mana::TakeMana;
pub use movement::MoveHero;
pub use play::PlayCard;
