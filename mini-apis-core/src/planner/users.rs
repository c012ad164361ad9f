use super::{new_id, PlannerRepository};
use crate::error::PlannerError;
use crate::models::{NewUser, User, UserProfile, UserSummary};

impl PlannerRepository {
    pub fn user(&self, uid: u64) -> Result<&User, PlannerError> {
        self.doc
            .users
            .iter()
            .find(|u| u.uid == uid)
            .ok_or(PlannerError::NotFound)
    }

    fn user_mut(&mut self, uid: u64) -> Result<&mut User, PlannerError> {
        self.doc
            .users
            .iter_mut()
            .find(|u| u.uid == uid)
            .ok_or(PlannerError::NotFound)
    }

    pub(super) fn ensure_user(&self, uid: u64) -> Result<(), PlannerError> {
        self.user(uid).map(|_| ())
    }

    pub fn username_exists(&self, uname: &str) -> bool {
        self.doc.users.iter().any(|u| u.uname == uname)
    }

    pub fn user_summaries(&self) -> Vec<UserSummary> {
        self.doc.users.iter().map(UserSummary::from).collect()
    }

    /// Registers a user and returns the new uid.
    pub fn add_user(&mut self, new_user: NewUser) -> Result<u64, PlannerError> {
        if self.username_exists(&new_user.uname) {
            return Err(PlannerError::UsernameTaken);
        }

        let users = &self.doc.users;
        let uid = new_id(|id| users.iter().any(|u| u.uid == id));

        self.transaction(|repo| {
            repo.doc.users.push(User {
                uid,
                name: new_user.name,
                uname: new_user.uname,
                hashed_pass: new_user.hashed_pass,
            });
            Ok(())
        })?;

        tracing::info!("Registered user {}", uid);
        Ok(uid)
    }

    /// Changes a user's username.
    ///
    /// Fails with `UsernameTaken` if any user holds `uname`, including the
    /// user being renamed.
    pub fn rename_user(&mut self, uid: u64, uname: &str) -> Result<(), PlannerError> {
        self.ensure_user(uid)?;
        if self.username_exists(uname) {
            return Err(PlannerError::UsernameTaken);
        }

        self.transaction(|repo| {
            repo.user_mut(uid)?.uname = uname.to_string();
            Ok(())
        })
    }

    pub fn update_user(&mut self, uid: u64, profile: UserProfile) -> Result<(), PlannerError> {
        self.transaction(|repo| {
            let user = repo.user_mut(uid)?;
            user.name = profile.name;
            user.hashed_pass = profile.hashed_pass;
            Ok(())
        })
    }

    /// Deletes a user together with everything they own, and removes them
    /// from every event they were shared into.
    pub fn delete_user(&mut self, uid: u64) -> Result<(), PlannerError> {
        self.ensure_user(uid)?;

        self.transaction(|repo| {
            let doc = &mut repo.doc;
            for event in &mut doc.events {
                event.shared_users.retain(|&shared| shared != uid);
            }
            doc.events.retain(|e| e.owner != uid);
            doc.tasks.retain(|t| t.owner != uid);
            doc.users.retain(|u| u.uid != uid);
            Ok(())
        })?;

        tracing::info!("Deleted user {}", uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::{EventData, TaskData};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_add_and_get_user() {
        let (mut repo, _temp) = setup();
        let uid = add_user(&mut repo, "ada");

        let user = repo.user(uid).unwrap();
        assert_eq!(user.uname, "ada");
        assert_eq!(user.name, "ada name");
        assert_eq!(user.hashed_pass, "hash");
        assert!(repo.username_exists("ada"));
        assert!(!repo.username_exists("bob"));
    }

    #[test]
    fn test_add_user_duplicate_username() {
        let (mut repo, _temp) = setup();
        add_user(&mut repo, "ada");

        let result = repo.add_user(NewUser {
            name: "Other Ada".to_string(),
            uname: "ada".to_string(),
            hashed_pass: "x".to_string(),
        });
        assert!(matches!(result, Err(PlannerError::UsernameTaken)));
        assert_eq!(repo.user_summaries().len(), 1);
    }

    #[test]
    fn test_add_user_persists() {
        let (mut repo, temp) = setup();
        let uid = add_user(&mut repo, "ada");

        let reopened = reopen(&temp);
        assert_eq!(reopened.user(uid).unwrap().uname, "ada");
    }

    #[test]
    fn test_user_not_found() {
        let (repo, _temp) = setup();
        assert!(matches!(repo.user(1), Err(PlannerError::NotFound)));
    }

    #[test]
    fn test_user_summaries() {
        let (mut repo, _temp) = setup();
        let ada = add_user(&mut repo, "ada");
        let bob = add_user(&mut repo, "bob");

        let summaries = repo.user_summaries();
        assert_eq!(
            summaries,
            vec![
                UserSummary {
                    uid: ada,
                    uname: "ada".to_string()
                },
                UserSummary {
                    uid: bob,
                    uname: "bob".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_rename_user() {
        let (mut repo, temp) = setup();
        let uid = add_user(&mut repo, "ada");
        add_user(&mut repo, "bob");

        assert!(matches!(
            repo.rename_user(uid, "bob"),
            Err(PlannerError::UsernameTaken)
        ));
        assert!(matches!(
            repo.rename_user(uid, "ada"),
            Err(PlannerError::UsernameTaken)
        ));
        assert!(matches!(
            repo.rename_user(12345, "carol"),
            Err(PlannerError::NotFound)
        ));

        repo.rename_user(uid, "lovelace").unwrap();
        assert_eq!(repo.user(uid).unwrap().uname, "lovelace");
        assert!(!repo.username_exists("ada"));
        assert_eq!(reopen(&temp).user(uid).unwrap().uname, "lovelace");
    }

    #[test]
    fn test_update_user() {
        let (mut repo, _temp) = setup();
        let uid = add_user(&mut repo, "ada");

        repo.update_user(
            uid,
            UserProfile {
                name: "Ada Lovelace".to_string(),
                hashed_pass: "new-hash".to_string(),
            },
        )
        .unwrap();

        let user = repo.user(uid).unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.hashed_pass, "new-hash");
        assert_eq!(user.uname, "ada");
    }

    #[test]
    fn test_delete_user_cascades() {
        let (mut repo, temp) = setup();
        let ada = add_user(&mut repo, "ada");
        let bob = add_user(&mut repo, "bob");
        let time = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        let ada_event = repo
            .add_event(
                ada,
                EventData {
                    title: "Ada's party".to_string(),
                    time,
                    description: String::new(),
                    public: true,
                },
            )
            .unwrap();
        let bob_event = repo
            .add_event(
                bob,
                EventData {
                    title: "Bob's meeting".to_string(),
                    time,
                    description: String::new(),
                    public: false,
                },
            )
            .unwrap();
        repo.share_event(bob_event, ada).unwrap();
        let ada_task = repo
            .add_task(
                ada,
                TaskData {
                    title: "Ada's chore".to_string(),
                    time,
                    description: String::new(),
                },
            )
            .unwrap();
        let bob_task = repo
            .add_task(
                bob,
                TaskData {
                    title: "Bob's chore".to_string(),
                    time,
                    description: String::new(),
                },
            )
            .unwrap();

        repo.delete_user(ada).unwrap();

        assert!(matches!(repo.user(ada), Err(PlannerError::NotFound)));
        assert!(matches!(repo.event(ada_event), Err(PlannerError::NotFound)));
        assert!(matches!(repo.task(ada_task), Err(PlannerError::NotFound)));
        assert!(repo.event(bob_event).unwrap().shared_users.is_empty());
        assert!(repo.task(bob_task).is_ok());
        assert!(repo.user(bob).is_ok());

        let reopened = reopen(&temp);
        assert_eq!(reopened.document(), repo.document());
    }

    #[test]
    fn test_delete_missing_user() {
        let (mut repo, _temp) = setup();
        add_user(&mut repo, "ada");
        assert!(matches!(repo.delete_user(7), Err(PlannerError::NotFound)));
        assert_eq!(repo.user_summaries().len(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let (mut repo, temp) = setup();
        let uid = add_user(&mut repo, "ada");
        let blocker = temp.path().join("data.json.tmp");
        std::fs::create_dir(&blocker).unwrap();

        let result = repo.add_user(NewUser {
            name: "Ghost".to_string(),
            uname: "ghost".to_string(),
            hashed_pass: "hash".to_string(),
        });
        assert!(matches!(result, Err(PlannerError::Store(_))));
        assert!(!repo.username_exists("ghost"));

        assert!(matches!(repo.delete_user(uid), Err(PlannerError::Store(_))));
        assert!(repo.user(uid).is_ok());

        std::fs::remove_dir(&blocker).unwrap();
        add_user(&mut repo, "grace");
        let reopened = reopen(&temp);
        assert!(!reopened.username_exists("ghost"));
        assert!(reopened.username_exists("ada"));
        assert!(reopened.username_exists("grace"));
    }
}
