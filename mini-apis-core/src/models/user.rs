use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: u64,
    pub name: String,
    pub uname: String,
    pub hashed_pass: String,
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub uname: String,
    pub hashed_pass: String,
}

/// Editable profile fields (everything except the username).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub hashed_pass: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub uid: u64,
    pub uname: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            uid: user.uid,
            uname: user.uname.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_uses_hashed_pass_key() {
        let user = User {
            uid: 42,
            name: "Ada".to_string(),
            uname: "ada".to_string(),
            hashed_pass: "abc".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["hashedPass"], "abc");
        assert!(json.get("hashed_pass").is_none());
    }
}
