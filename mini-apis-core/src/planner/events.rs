use super::{new_id, PlannerRepository};
use crate::error::PlannerError;
use crate::models::{Event, EventData, EventSummary};

impl PlannerRepository {
    pub fn event(&self, eid: u64) -> Result<&Event, PlannerError> {
        self.doc
            .events
            .iter()
            .find(|e| e.eid == eid)
            .ok_or(PlannerError::NotFound)
    }

    fn event_mut(&mut self, eid: u64) -> Result<&mut Event, PlannerError> {
        self.doc
            .events
            .iter_mut()
            .find(|e| e.eid == eid)
            .ok_or(PlannerError::NotFound)
    }

    /// Summaries of the events `uid` owns.
    pub fn owned_events(&self, uid: u64) -> Result<Vec<EventSummary>, PlannerError> {
        self.ensure_user(uid)?;
        Ok(self
            .doc
            .events
            .iter()
            .filter(|e| e.owner == uid)
            .map(EventSummary::from)
            .collect())
    }

    /// Summaries of the events `uid` has been shared into.
    pub fn shared_events(&self, uid: u64) -> Result<Vec<EventSummary>, PlannerError> {
        self.ensure_user(uid)?;
        Ok(self
            .doc
            .events
            .iter()
            .filter(|e| e.shared_users.contains(&uid))
            .map(EventSummary::from)
            .collect())
    }

    /// Creates an event owned by `uid` and returns its id.
    pub fn add_event(&mut self, uid: u64, data: EventData) -> Result<u64, PlannerError> {
        self.ensure_user(uid)?;

        let events = &self.doc.events;
        let eid = new_id(|id| events.iter().any(|e| e.eid == id));

        self.transaction(|repo| {
            repo.doc.events.push(Event {
                eid,
                title: data.title,
                time: data.time,
                description: data.description,
                owner: uid,
                public: data.public,
                shared_users: Vec::new(),
            });
            repo.sort_events();
            Ok(())
        })?;

        tracing::debug!("Added event {} for user {}", eid, uid);
        Ok(eid)
    }

    pub fn edit_event(&mut self, eid: u64, data: EventData) -> Result<(), PlannerError> {
        self.transaction(|repo| {
            repo.event_mut(eid)?.apply(data);
            repo.sort_events();
            Ok(())
        })
    }

    /// Adds `uid` to an event's shared users. Sharing twice is a no-op.
    pub fn share_event(&mut self, eid: u64, uid: u64) -> Result<(), PlannerError> {
        self.ensure_user(uid)?;
        self.transaction(|repo| {
            let event = repo.event_mut(eid)?;
            if !event.shared_users.contains(&uid) {
                event.shared_users.push(uid);
            }
            Ok(())
        })
    }

    pub fn delete_event(&mut self, eid: u64) -> Result<(), PlannerError> {
        self.event(eid)?;
        self.transaction(|repo| {
            repo.doc.events.retain(|e| e.eid != eid);
            Ok(())
        })?;

        tracing::debug!("Deleted event {}", eid);
        Ok(())
    }

    fn sort_events(&mut self) {
        self.doc.events.sort_by(|a, b| b.time.cmp(&a.time));
    }
}
