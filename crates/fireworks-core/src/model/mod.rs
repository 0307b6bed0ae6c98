pub mod card;
pub mod clue;
pub mod deck;
pub mod rank;
pub mod suit;
