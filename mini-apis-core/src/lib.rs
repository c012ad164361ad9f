//! mini-apis Core Library
//!
//! JSON document storage and the repositories behind the quotemaster and
//! myPlanner services.

pub mod error;
pub mod models;
pub mod planner;
pub mod quotes;
pub mod store;

pub use error::{PlannerError, QuoteError, StoreError};
pub use models::{
    Event, EventData, EventSummary, NewUser, PlannerDocument, Quote, QuoteDocument, Task,
    TaskData, TaskFilter, TaskSummary, User, UserProfile, UserSummary,
};
pub use planner::PlannerRepository;
pub use quotes::{hash_password, QuoteRepository, DEFAULT_RESET_HASH};
pub use store::JsonStore;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
