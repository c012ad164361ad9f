use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub eid: u64,
    pub title: String,
    pub time: DateTime<Utc>,
    pub description: String,
    pub owner: u64,
    pub public: bool,
    #[serde(default)]
    pub shared_users: Vec<u64>,
}

impl Event {
    pub(crate) fn apply(&mut self, data: EventData) {
        self.title = data.title;
        self.time = data.time;
        self.description = data.description;
        self.public = data.public;
    }
}

/// Editable event fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub title: String,
    pub time: DateTime<Utc>,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub eid: u64,
    pub title: String,
    pub time: DateTime<Utc>,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            eid: event.eid,
            title: event.title.clone(),
            time: event.time,
        }
    }
}
