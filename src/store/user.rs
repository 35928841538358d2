//! # User Records
//!
//! The record type held by the store, plus the validated inputs the store
//! accepts for creation and partial updates.

use serde::{Deserialize, Serialize};

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, never reused
    pub id: u64,

    /// Display name
    pub name: String,

    /// Email address (unique across stored records)
    pub email: String,

    /// Optional age; serialized as `null` when absent
    pub age: Option<u32>,
}

impl User {
    /// Whether the name or email contains `needle`
    pub fn matches(&self, needle: &str) -> bool {
        self.name.contains(needle) || self.email.contains(needle)
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
    }
}

/// A validated creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
}

/// A validated partial update
///
/// `age` is doubly optional: the outer `None` leaves the age untouched,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<Option<u32>>,
}

/// The records every fresh store starts with
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "张三".to_string(),
            email: "zhangsan@example.com".to_string(),
            age: Some(25),
        },
        User {
            id: 2,
            name: "李四".to_string(),
            email: "lisi@example.com".to_string(),
            age: Some(30),
        },
        User {
            id: 3,
            name: "王五".to_string(),
            email: "wangwu@example.com".to_string(),
            age: Some(28),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            age: Some(36),
        }
    }

    #[test]
    fn test_matches_name_or_email() {
        let user = sample();
        assert!(user.matches("Ad"));
        assert!(user.matches("example.com"));
        assert!(!user.matches("Grace"));
    }

    #[test]
    fn test_apply_only_touches_provided_fields() {
        let mut user = sample();
        user.apply(UserPatch {
            age: Some(Some(37)),
            ..Default::default()
        });

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.age, Some(37));
    }

    #[test]
    fn test_apply_can_clear_age() {
        let mut user = sample();
        user.apply(UserPatch {
            age: Some(None),
            ..Default::default()
        });
        assert_eq!(user.age, None);
    }

    #[test]
    fn test_absent_age_serializes_as_null() {
        let mut user = sample();
        user.age = None;

        let json = serde_json::to_value(&user).unwrap();
        assert!(json["age"].is_null());
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_seed_ids_are_sequential() {
        let ids: Vec<u64> = seed_users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
