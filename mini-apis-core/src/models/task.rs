use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub tid: u64,
    pub title: String,
    pub time: DateTime<Utc>,
    pub description: String,
    pub owner: u64,
    pub done: bool,
}

impl Task {
    pub(crate) fn apply(&mut self, data: TaskData) {
        self.title = data.title;
        self.time = data.time;
        self.description = data.description;
    }
}

/// Editable task fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskData {
    pub title: String,
    pub time: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub tid: u64,
    pub title: String,
    pub time: DateTime<Utc>,
    pub done: bool,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            tid: task.tid,
            title: task.title.clone(),
            time: task.time,
            done: task.done,
        }
    }
}

/// Which of a user's tasks to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Unfinished,
    Finished,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Unfinished => !task.done,
            TaskFilter::Finished => task.done,
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFilter::All => write!(f, "all"),
            TaskFilter::Unfinished => write!(f, "open"),
            TaskFilter::Finished => write!(f, "done"),
        }
    }
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "open" | "unfinished" => Ok(TaskFilter::Unfinished),
            "done" | "finished" => Ok(TaskFilter::Finished),
            _ => Err(format!(
                "Invalid task status '{}'. Valid options: all, open, done",
                s
            )),
        }
    }
}
