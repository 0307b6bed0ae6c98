mod event;

pub use event::{Decision, ObservedAction};
