//! Planner repository for the myPlanner service.
//!
//! Holds users, events and tasks in one document. Relationships (event and
//! task owners, event shared-user lists) are plain user ids, kept consistent
//! by linear scans:
//!
//! - creating an event or task requires its owner to exist
//! - deleting a user removes their events and tasks, and removes them from
//!   every event's shared-user list
//!
//! Events and tasks are kept sorted by time, newest first.

mod events;
mod tasks;
mod users;

use rand::Rng;
use std::path::PathBuf;

use crate::error::PlannerError;
use crate::models::PlannerDocument;
use crate::store::{JsonStore, PLANNER_DEFAULT_JSON};

/// Upper bound (exclusive) for generated ids: 2^53, the largest range that
/// survives a round trip through a JSON number in every client.
pub const ID_LIMIT: u64 = 1 << 53;

pub struct PlannerRepository {
    store: JsonStore<PlannerDocument>,
    doc: PlannerDocument,
}

impl PlannerRepository {
    /// Opens the planner document at `path`, creating it from the bundled
    /// default if it doesn't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PlannerError> {
        let (store, doc) = JsonStore::<PlannerDocument>::open(path, PLANNER_DEFAULT_JSON)?;
        tracing::info!(
            "Loaded planner with {} user(s), {} event(s), {} task(s)",
            doc.users.len(),
            doc.events.len(),
            doc.tasks.len()
        );
        Ok(Self { store, doc })
    }

    /// Returns the whole document. Intended for debugging output.
    pub fn document(&self) -> &PlannerDocument {
        &self.doc
    }

    /// Applies `change` and saves the result. If `change` or the save fails,
    /// the document is restored to its previous state.
    fn transaction<R>(
        &mut self,
        change: impl FnOnce(&mut Self) -> Result<R, PlannerError>,
    ) -> Result<R, PlannerError> {
        let snapshot = self.doc.clone();
        let result = change(self).and_then(|value| {
            self.store.save(&self.doc)?;
            Ok(value)
        });
        if result.is_err() {
            self.doc = snapshot;
        }
        result
    }
}

/// Draws random ids until one is not `taken`.
fn new_id(taken: impl Fn(u64) -> bool) -> u64 {
    let mut rng = rand::rng();
    loop {
        let id = rng.random_range(0..ID_LIMIT);
        if !taken(id) {
            return id;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_new_id_in_range() {
        for _ in 0..100 {
            assert!(new_id(|_| false) < ID_LIMIT);
        }
    }

    #[test]
    fn test_new_id_retries_on_collision() {
        let attempts = Cell::new(0);
        let id = new_id(|_| {
            attempts.set(attempts.get() + 1);
            attempts.get() < 4
        });
        assert_eq!(attempts.get(), 4);
        assert!(id < ID_LIMIT);
    }

    #[test]
    fn test_open_bootstraps_empty_document() {
        let (repo, temp) = setup();
        assert_eq!(repo.document(), &PlannerDocument::default());
        assert!(temp.path().join("data.json").exists());
    }
}
