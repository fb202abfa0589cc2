use chrono::{Local, NaiveDate};
use sofr_curve_data::RateStore;
use std::sync::Arc;

/// Source of "today" for projections and health checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Local calendar date of the server
    System,
    /// A pinned date, for tests and replays
    Fixed(NaiveDate),
}

impl Clock {
    #[must_use]
    pub fn today(self) -> NaiveDate {
        match self {
            Self::System => Local::now().date_naive(),
            Self::Fixed(date) => date,
        }
    }
}

/// Shared request context.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RateStore>,
    pub clock: Clock,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self {
            store,
            clock: Clock::System,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}
