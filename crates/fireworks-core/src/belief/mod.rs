pub mod hand;
pub mod possibility;

pub use hand::{BeliefHand, CardId, SlotBelief};
pub use possibility::PossibilitySet;
