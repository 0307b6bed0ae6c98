mod expected;
mod search;

pub use expected::expected_move;
pub use search::find_best_move;

/// Runtime switches for the search, read once from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineFeatures {
    parallel_search: bool,
    log_candidates: bool,
}

impl EngineFeatures {
    pub const fn new(parallel_search: bool, log_candidates: bool) -> Self {
        Self {
            parallel_search,
            log_candidates,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn parallel_search(self) -> bool {
        self.parallel_search
    }

    pub const fn log_candidates(self) -> bool {
        self.log_candidates
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let parallel_search = read("FIREWORKS_PARALLEL_SEARCH")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);

        let log_candidates = read("FIREWORKS_SEARCH_DETAILS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);

        Self {
            parallel_search,
            log_candidates,
        }
    }
}

impl Default for EngineFeatures {
    fn default() -> Self {
        Self {
            parallel_search: false,
            log_candidates: false,
        }
    }
}
