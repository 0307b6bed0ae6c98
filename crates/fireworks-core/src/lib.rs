#![deny(warnings)]
pub mod belief;
pub mod game;
pub mod model;
pub mod understanding;

pub struct EngineInfo;

impl EngineInfo {
    pub const fn name() -> &'static str {
        "fireworks"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
