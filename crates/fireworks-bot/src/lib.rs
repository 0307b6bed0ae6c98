pub mod bot;
pub mod engine;

pub use bot::{EngineFeatures, expected_move, find_best_move};
pub use engine::{Engine, TurnView};
