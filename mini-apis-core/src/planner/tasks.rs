use super::{new_id, PlannerRepository};
use crate::error::PlannerError;
use crate::models::{Task, TaskData, TaskFilter, TaskSummary};

impl PlannerRepository {
    pub fn task(&self, tid: u64) -> Result<&Task, PlannerError> {
        self.doc
            .tasks
            .iter()
            .find(|t| t.tid == tid)
            .ok_or(PlannerError::NotFound)
    }

    fn task_mut(&mut self, tid: u64) -> Result<&mut Task, PlannerError> {
        self.doc
            .tasks
            .iter_mut()
            .find(|t| t.tid == tid)
            .ok_or(PlannerError::NotFound)
    }

    /// Summaries of the tasks `uid` owns, narrowed by `filter`.
    pub fn tasks(&self, uid: u64, filter: TaskFilter) -> Result<Vec<TaskSummary>, PlannerError> {
        self.ensure_user(uid)?;
        Ok(self
            .doc
            .tasks
            .iter()
            .filter(|t| t.owner == uid && filter.matches(t))
            .map(TaskSummary::from)
            .collect())
    }

    /// Creates an unfinished task owned by `uid` and returns its id.
    pub fn add_task(&mut self, uid: u64, data: TaskData) -> Result<u64, PlannerError> {
        self.ensure_user(uid)?;

        let tasks = &self.doc.tasks;
        let tid = new_id(|id| tasks.iter().any(|t| t.tid == id));

        self.transaction(|repo| {
            repo.doc.tasks.push(Task {
                tid,
                title: data.title,
                time: data.time,
                description: data.description,
                owner: uid,
                done: false,
            });
            repo.sort_tasks();
            Ok(())
        })?;

        tracing::debug!("Added task {} for user {}", tid, uid);
        Ok(tid)
    }

    pub fn edit_task(&mut self, tid: u64, data: TaskData) -> Result<(), PlannerError> {
        self.transaction(|repo| {
            repo.task_mut(tid)?.apply(data);
            repo.sort_tasks();
            Ok(())
        })
    }

    pub fn set_task_done(&mut self, tid: u64, done: bool) -> Result<(), PlannerError> {
        self.transaction(|repo| {
            repo.task_mut(tid)?.done = done;
            Ok(())
        })
    }

    pub fn delete_task(&mut self, tid: u64) -> Result<(), PlannerError> {
        self.task(tid)?;
        self.transaction(|repo| {
            repo.doc.tasks.retain(|t| t.tid != tid);
            Ok(())
        })?;

        tracing::debug!("Deleted task {}", tid);
        Ok(())
    }

    fn sort_tasks(&mut self) {
        self.doc.tasks.sort_by(|a, b| b.time.cmp(&a.time));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, hour, 0, 0).unwrap()
    }

    fn task_data(title: &str, hour: u32) -> TaskData {
        TaskData {
            title: title.to_string(),
            time: at(hour),
            description: String::new(),
        }
    }

    fn titles(summaries: Vec<TaskSummary>) -> Vec<String> {
        summaries.into_iter().map(|t| t.title).collect()
    }

    #[test]
    fn test_add_task_and_get() {
        let (mut repo, _temp) = setup();
        let uid = add_user(&mut repo, "ada");

        let tid = repo.add_task(uid, task_data("Groceries", 9)).unwrap();

        let task = repo.task(tid).unwrap();
        assert_eq!(task.title, "Groceries");
        assert_eq!(task.owner, uid);
        assert!(!task.done);

        let all = repo.tasks(uid, TaskFilter::All).unwrap();
        assert_eq!(
            all,
            vec![TaskSummary {
                tid,
                title: "Groceries".to_string(),
                time: at(9),
                done: false,
            }]
        );
    }

    #[test]
    fn test_add_task_missing_owner() {
        let (mut repo, _temp) = setup();
        assert!(matches!(
            repo.add_task(3, task_data("Orphan", 1)),
            Err(PlannerError::NotFound)
        ));
        assert!(repo.document().tasks.is_empty());
    }

    #[test]
    fn test_task_not_found() {
        let (mut repo, _temp) = setup();
        assert!(matches!(repo.task(8), Err(PlannerError::NotFound)));
        assert!(matches!(
            repo.set_task_done(8, true),
            Err(PlannerError::NotFound)
        ));
        assert!(matches!(
            repo.edit_task(8, task_data("x", 1)),
            Err(PlannerError::NotFound)
        ));
        assert!(matches!(repo.delete_task(8), Err(PlannerError::NotFound)));
    }

    #[test]
    fn test_task_filters() {
        let (mut repo, _temp) = setup();
        let ada = add_user(&mut repo, "ada");
        let bob = add_user(&mut repo, "bob");

        let wash = repo.add_task(ada, task_data("wash", 8)).unwrap();
        repo.add_task(ada, task_data("cook", 18)).unwrap();
        repo.add_task(bob, task_data("read", 12)).unwrap();

        repo.set_task_done(wash, true).unwrap();

        assert_eq!(
            titles(repo.tasks(ada, TaskFilter::All).unwrap()),
            vec!["cook", "wash"]
        );
        assert_eq!(
            titles(repo.tasks(ada, TaskFilter::Unfinished).unwrap()),
            vec!["cook"]
        );
        assert_eq!(
            titles(repo.tasks(ada, TaskFilter::Finished).unwrap()),
            vec!["wash"]
        );
        assert_eq!(
            titles(repo.tasks(bob, TaskFilter::All).unwrap()),
            vec!["read"]
        );
        assert!(matches!(
            repo.tasks(77, TaskFilter::All),
            Err(PlannerError::NotFound)
        ));
    }

    #[test]
    fn test_set_task_done_both_ways() {
        let (mut repo, temp) = setup();
        let uid = add_user(&mut repo, "ada");
        let tid = repo.add_task(uid, task_data("Toggle", 10)).unwrap();

        repo.set_task_done(tid, true).unwrap();
        assert!(reopen(&temp).task(tid).unwrap().done);

        repo.set_task_done(tid, false).unwrap();
        assert!(!reopen(&temp).task(tid).unwrap().done);
    }

    #[test]
    fn test_edit_task_resorts_and_keeps_done() {
        let (mut repo, _temp) = setup();
        let uid = add_user(&mut repo, "ada");
        let early = repo.add_task(uid, task_data("early", 6)).unwrap();
        repo.add_task(uid, task_data("late", 20)).unwrap();
        repo.set_task_done(early, true).unwrap();

        repo.edit_task(
            early,
            TaskData {
                title: "latest".to_string(),
                time: at(23),
                description: "moved".to_string(),
            },
        )
        .unwrap();

        let task = repo.task(early).unwrap();
        assert_eq!(task.description, "moved");
        assert!(task.done);
        assert_eq!(
            titles(repo.tasks(uid, TaskFilter::All).unwrap()),
            vec!["latest", "late"]
        );
    }

    #[test]
    fn test_delete_task() {
        let (mut repo, temp) = setup();
        let uid = add_user(&mut repo, "ada");
        let tid = repo.add_task(uid, task_data("Temporary", 7)).unwrap();

        repo.delete_task(tid).unwrap();

        assert!(matches!(repo.task(tid), Err(PlannerError::NotFound)));
        assert!(repo.tasks(uid, TaskFilter::All).unwrap().is_empty());
        assert!(reopen(&temp).document().tasks.is_empty());
    }

    #[test]
    fn test_equal_times_keep_insertion_order() {
        let (mut repo, _temp) = setup();
        let uid = add_user(&mut repo, "ada");

        repo.add_task(uid, task_data("first", 8)).unwrap();
        repo.add_task(uid, task_data("second", 8)).unwrap();
        repo.add_task(uid, task_data("earlier", 6)).unwrap();
        repo.add_task(uid, task_data("third", 8)).unwrap();

        assert_eq!(
            titles(repo.tasks(uid, TaskFilter::All).unwrap()),
            vec!["first", "second", "third", "earlier"]
        );
    }

    #[test]
    fn test_failed_save_keeps_task_state() {
        let (mut repo, temp) = setup();
        let uid = add_user(&mut repo, "ada");
        let tid = repo.add_task(uid, task_data("Laundry", 10)).unwrap();
        std::fs::create_dir(temp.path().join("data.json.tmp")).unwrap();

        assert!(matches!(
            repo.set_task_done(tid, true),
            Err(PlannerError::Store(_))
        ));
        assert!(!repo.task(tid).unwrap().done);

        assert!(matches!(repo.delete_task(tid), Err(PlannerError::Store(_))));
        assert!(repo.task(tid).is_ok());
    }
}
