use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use mini_apis_core::{
    hash_password, EventData, EventSummary, NewUser, PlannerRepository, TaskData, TaskFilter,
    TaskSummary, UserProfile,
};
use std::io::{self, Write};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct PlannerCommand {
    #[command(subcommand)]
    pub command: PlannerSubcommand,
}

#[derive(Subcommand)]
pub enum PlannerSubcommand {
    /// Manage users
    User(UserCommand),

    /// Manage events
    Event(EventCommand),

    /// Manage tasks
    Task(TaskCommand),

    /// Dump the whole planner document as JSON
    Dump,
}

#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand)]
pub enum UserSubcommand {
    /// Register a new user
    Add {
        /// Unique username
        uname: String,

        /// Display name
        #[arg(long, short)]
        name: String,

        /// Password (stored hashed)
        #[arg(long, short)]
        password: String,
    },

    /// List all users
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a user's details
    Show {
        /// User ID
        uid: u64,
    },

    /// Change a user's username
    Rename {
        /// User ID
        uid: u64,

        /// New username
        uname: String,
    },

    /// Update a user's display name and password
    Update {
        /// User ID
        uid: u64,

        /// New display name
        #[arg(long, short)]
        name: String,

        /// New password (stored hashed)
        #[arg(long, short)]
        password: String,
    },

    /// Remove a user with all their events and tasks
    Remove {
        /// User ID
        uid: u64,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Args)]
pub struct EventCommand {
    #[command(subcommand)]
    pub command: EventSubcommand,
}

#[derive(Subcommand)]
pub enum EventSubcommand {
    /// Create an event
    Add {
        /// Owner's user ID
        owner: u64,

        /// Event title
        #[arg(long)]
        title: String,

        /// Event time (RFC 3339, e.g. 2025-06-01T18:00:00Z)
        #[arg(long)]
        time: DateTime<Utc>,

        /// Event description
        #[arg(long, default_value = "")]
        description: String,

        /// Make the event public
        #[arg(long)]
        public: bool,
    },

    /// List a user's events
    List {
        /// User ID
        uid: u64,

        /// List events shared with the user instead of owned ones
        #[arg(long)]
        shared: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show an event's details
    Show {
        /// Event ID
        eid: u64,
    },

    /// Replace an event's details
    Edit {
        /// Event ID
        eid: u64,

        /// Event title
        #[arg(long)]
        title: String,

        /// Event time (RFC 3339)
        #[arg(long)]
        time: DateTime<Utc>,

        /// Event description
        #[arg(long, default_value = "")]
        description: String,

        /// Make the event public
        #[arg(long)]
        public: bool,
    },

    /// Share an event with another user
    Share {
        /// Event ID
        eid: u64,

        /// User ID to share with
        uid: u64,
    },

    /// Remove an event
    Remove {
        /// Event ID
        eid: u64,
    },
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Create a task
    Add {
        /// Owner's user ID
        owner: u64,

        /// Task title
        #[arg(long)]
        title: String,

        /// Due time (RFC 3339)
        #[arg(long)]
        time: DateTime<Utc>,

        /// Task description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List a user's tasks
    List {
        /// User ID
        uid: u64,

        /// Which tasks to list: all, open, done
        #[arg(long, short, default_value = "all")]
        status: TaskFilter,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a task's details
    Show {
        /// Task ID
        tid: u64,
    },

    /// Replace a task's details
    Edit {
        /// Task ID
        tid: u64,

        /// Task title
        #[arg(long)]
        title: String,

        /// Due time (RFC 3339)
        #[arg(long)]
        time: DateTime<Utc>,

        /// Task description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Mark a task as done
    Done {
        /// Task ID
        tid: u64,

        /// Mark the task as not done instead
        #[arg(long)]
        undo: bool,
    },

    /// Remove a task
    Remove {
        /// Task ID
        tid: u64,
    },
}

fn print_events(events: &[EventSummary], format: &OutputFormat) -> serde_json::Result<()> {
    if events.is_empty() {
        println!("No events found");
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(events)?),
        OutputFormat::Text => {
            println!("{:<16}  {:<25}  TITLE", "ID", "TIME");
            println!("{}", "-".repeat(80));
            for event in events {
                println!(
                    "{:<16}  {:<25}  {}",
                    event.eid,
                    event.time.to_rfc3339(),
                    truncate(&event.title, 35)
                );
            }
            println!("\nTotal: {} event(s)", events.len());
        }
    }
    Ok(())
}

fn print_tasks(tasks: &[TaskSummary], format: &OutputFormat) -> serde_json::Result<()> {
    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tasks)?),
        OutputFormat::Text => {
            println!("{:<16}  {:<4}  {:<25}  TITLE", "ID", "DONE", "TIME");
            println!("{}", "-".repeat(80));
            for task in tasks {
                println!(
                    "{:<16}  {:<4}  {:<25}  {}",
                    task.tid,
                    if task.done { "x" } else { "" },
                    task.time.to_rfc3339(),
                    truncate(&task.title, 29)
                );
            }
            println!("\nTotal: {} task(s)", tasks.len());
        }
    }
    Ok(())
}

impl PlannerCommand {
    pub fn run(&self, repo: &mut PlannerRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PlannerSubcommand::User(cmd) => cmd.run(repo),
            PlannerSubcommand::Event(cmd) => cmd.run(repo),
            PlannerSubcommand::Task(cmd) => cmd.run(repo),
            PlannerSubcommand::Dump => {
                println!("{}", serde_json::to_string_pretty(repo.document())?);
                Ok(())
            }
        }
    }
}

impl UserCommand {
    fn run(&self, repo: &mut PlannerRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UserSubcommand::Add {
                uname,
                name,
                password,
            } => {
                if uname.trim().is_empty() {
                    return Err("Username cannot be empty".into());
                }

                let uid = repo.add_user(NewUser {
                    name: name.clone(),
                    uname: uname.trim().to_string(),
                    hashed_pass: hash_password(password),
                })?;
                println!("Registered user {} with ID {}", uname.trim(), uid);
                Ok(())
            }

            UserSubcommand::List { format } => {
                let users = repo.user_summaries();

                if users.is_empty() {
                    println!("No users found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&users)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<16}  USERNAME", "ID");
                        println!("{}", "-".repeat(40));
                        for user in &users {
                            println!("{:<16}  {}", user.uid, user.uname);
                        }
                        println!("\nTotal: {} user(s)", users.len());
                    }
                }
                Ok(())
            }

            UserSubcommand::Show { uid } => {
                let user = repo.user(*uid)?;
                let events = repo.owned_events(*uid)?.len();
                let shared = repo.shared_events(*uid)?.len();
                let tasks = repo.tasks(*uid, TaskFilter::All)?.len();
                let open = repo.tasks(*uid, TaskFilter::Unfinished)?.len();

                println!("{} ({})", user.name, user.uname);
                println!("ID: {}", user.uid);
                println!("Events: {} owned, {} shared", events, shared);
                println!("Tasks: {} ({} open)", tasks, open);
                Ok(())
            }

            UserSubcommand::Rename { uid, uname } => {
                repo.rename_user(*uid, uname)?;
                println!("Renamed user {} to {}", uid, uname);
                Ok(())
            }

            UserSubcommand::Update {
                uid,
                name,
                password,
            } => {
                repo.update_user(
                    *uid,
                    UserProfile {
                        name: name.clone(),
                        hashed_pass: hash_password(password),
                    },
                )?;
                println!("Updated user {}", uid);
                Ok(())
            }

            UserSubcommand::Remove { uid, force } => {
                let uname = repo.user(*uid)?.uname.clone();

                if !force {
                    print!(
                        "Remove user '{}' and all their events and tasks? [y/N] ",
                        uname
                    );
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Removal cancelled.");
                        return Ok(());
                    }
                }

                repo.delete_user(*uid)?;
                println!("Removed user: {}", uname);
                Ok(())
            }
        }
    }
}

impl EventCommand {
    fn run(&self, repo: &mut PlannerRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            EventSubcommand::Add {
                owner,
                title,
                time,
                description,
                public,
            } => {
                let eid = repo.add_event(
                    *owner,
                    EventData {
                        title: title.clone(),
                        time: *time,
                        description: description.clone(),
                        public: *public,
                    },
                )?;
                println!("Created event {}", eid);
                Ok(())
            }

            EventSubcommand::List {
                uid,
                shared,
                format,
            } => {
                let events = if *shared {
                    repo.shared_events(*uid)?
                } else {
                    repo.owned_events(*uid)?
                };
                print_events(&events, format)?;
                Ok(())
            }

            EventSubcommand::Show { eid } => {
                let event = repo.event(*eid)?;
                println!("{}", serde_json::to_string_pretty(event)?);
                Ok(())
            }

            EventSubcommand::Edit {
                eid,
                title,
                time,
                description,
                public,
            } => {
                repo.edit_event(
                    *eid,
                    EventData {
                        title: title.clone(),
                        time: *time,
                        description: description.clone(),
                        public: *public,
                    },
                )?;
                println!("Updated event {}", eid);
                Ok(())
            }

            EventSubcommand::Share { eid, uid } => {
                repo.share_event(*eid, *uid)?;
                println!("Shared event {} with user {}", eid, uid);
                Ok(())
            }

            EventSubcommand::Remove { eid } => {
                repo.delete_event(*eid)?;
                println!("Removed event {}", eid);
                Ok(())
            }
        }
    }
}

impl TaskCommand {
    fn run(&self, repo: &mut PlannerRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            TaskSubcommand::Add {
                owner,
                title,
                time,
                description,
            } => {
                let tid = repo.add_task(
                    *owner,
                    TaskData {
                        title: title.clone(),
                        time: *time,
                        description: description.clone(),
                    },
                )?;
                println!("Created task {}", tid);
                Ok(())
            }

            TaskSubcommand::List {
                uid,
                status,
                format,
            } => {
                let tasks = repo.tasks(*uid, *status)?;
                print_tasks(&tasks, format)?;
                Ok(())
            }

            TaskSubcommand::Show { tid } => {
                let task = repo.task(*tid)?;
                println!("{}", serde_json::to_string_pretty(task)?);
                Ok(())
            }

            TaskSubcommand::Edit {
                tid,
                title,
                time,
                description,
            } => {
                repo.edit_task(
                    *tid,
                    TaskData {
                        title: title.clone(),
                        time: *time,
                        description: description.clone(),
                    },
                )?;
                println!("Updated task {}", tid);
                Ok(())
            }

            TaskSubcommand::Done { tid, undo } => {
                repo.set_task_done(*tid, !undo)?;
                if *undo {
                    println!("Marked task {} as not done", tid);
                } else {
                    println!("Marked task {} as done", tid);
                }
                Ok(())
            }

            TaskSubcommand::Remove { tid } => {
                repo.delete_task(*tid)?;
                println!("Removed task {}", tid);
                Ok(())
            }
        }
    }
}
