mod event;
mod quote;
mod task;
mod user;

use serde::{Deserialize, Serialize};

pub use event::{Event, EventData, EventSummary};
pub use quote::{Quote, QuoteDocument};
pub use task::{Task, TaskData, TaskFilter, TaskSummary};
pub use user::{NewUser, User, UserProfile, UserSummary};

/// Root document persisted by the planner repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}
