//! # Request Validation
//!
//! Request bodies as clients send them, and the checks that turn them into
//! store inputs. Nothing here touches the store.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::store::{NewUser, UserPatch};

use super::errors::{ApiError, ApiResult};

/// Loose `local@domain.tld` shape
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Whether `email` has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Leading integer of `raw`, reading digits up to the first non-digit.
///
/// Leading whitespace and a `+` sign are skipped, so `" 12"`, `"+12"`,
/// `"12abc"` and `"12.5"` all read as 12. Returns `None` when no digit
/// follows, for a negative number, or when the digits overflow `u64`.
pub fn parse_leading_int(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// Parse a user id path segment; its leading integer must be positive
pub fn parse_user_id(raw: &str) -> ApiResult<u64> {
    match parse_leading_int(raw) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidUserId),
    }
}

/// `POST /users` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

/// `PUT /users/:id` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,

    /// `None` when the key is absent, `Some(None)` for an explicit `null`
    #[serde(default, deserialize_with = "deserialize_present")]
    pub age: Option<Option<u32>>,
}

/// Marks a field as present even when its value is `null`
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validate a creation request
///
/// Name and email are required and must be non-empty. An age of `0` is
/// stored as no age.
pub fn validate_create(req: CreateUserRequest) -> ApiResult<NewUser> {
    let (name, email) = match (non_empty(req.name), non_empty(req.email)) {
        (Some(name), Some(email)) => (name, email),
        _ => {
            return Err(ApiError::Validation(
                "Name and email are required".to_string(),
            ))
        }
    };

    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    Ok(NewUser {
        name,
        email,
        age: req.age.filter(|age| *age != 0),
    })
}

/// Validate an update request
///
/// Empty strings count as not provided. A provided email must still have
/// the email shape.
pub fn validate_update(req: UpdateUserRequest) -> ApiResult<UserPatch> {
    let email = non_empty(req.email);
    if let Some(email) = &email {
        if !is_valid_email(email) {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
    }

    Ok(UserPatch {
        name: non_empty(req.name),
        email,
        age: req.age,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("x@y.com"));
        assert!(is_valid_email("zhangsan@example.com"));
        assert!(!is_valid_email("x@y"));
        assert!(!is_valid_email("no-at.com"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@c.d"));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("+8"), Some(8));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-5"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), None);
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("1").unwrap(), 1);
        assert_eq!(parse_user_id("999999").unwrap(), 999999);
        assert!(matches!(parse_user_id("abc"), Err(ApiError::InvalidUserId)));
        assert!(matches!(parse_user_id("0"), Err(ApiError::InvalidUserId)));
        assert!(matches!(parse_user_id("-3"), Err(ApiError::InvalidUserId)));
    }

    #[test]
    fn test_parse_user_id_reads_leading_digits() {
        assert_eq!(parse_user_id("1abc").unwrap(), 1);
        assert_eq!(parse_user_id("1.5").unwrap(), 1);
        assert!(matches!(parse_user_id("0x1"), Err(ApiError::InvalidUserId)));
    }

    #[test]
    fn test_create_requires_name_and_email() {
        let req = CreateUserRequest {
            name: Some("测试".to_string()),
            ..Default::default()
        };
        let err = validate_create(req).unwrap_err();
        assert_eq!(err.to_string(), "Name and email are required");

        let req = CreateUserRequest {
            name: Some(String::new()),
            email: Some("x@y.com".to_string()),
            age: None,
        };
        assert!(validate_create(req).is_err());
    }

    #[test]
    fn test_create_rejects_bad_email() {
        let req = CreateUserRequest {
            name: Some("X".to_string()),
            email: Some("not-an-email".to_string()),
            age: None,
        };
        assert_eq!(validate_create(req).unwrap_err().to_string(), "Invalid email format");
    }

    #[test]
    fn test_create_zero_age_becomes_none() {
        let req = CreateUserRequest {
            name: Some("X".to_string()),
            email: Some("x@y.com".to_string()),
            age: Some(0),
        };
        assert_eq!(validate_create(req).unwrap().age, None);
    }

    #[test]
    fn test_update_age_presence() {
        let absent: UpdateUserRequest = serde_json::from_str(r#"{"name": "N"}"#).unwrap();
        assert_eq!(absent.age, None);

        let null: UpdateUserRequest = serde_json::from_str(r#"{"age": null}"#).unwrap();
        assert_eq!(null.age, Some(None));

        let zero: UpdateUserRequest = serde_json::from_str(r#"{"age": 0}"#).unwrap();
        assert_eq!(validate_update(zero).unwrap().age, Some(Some(0)));
    }

    #[test]
    fn test_update_ignores_empty_strings() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"name": "", "email": ""}"#).unwrap();
        let patch = validate_update(req).unwrap();
        assert_eq!(patch, UserPatch::default());
    }

    #[test]
    fn test_update_rejects_bad_email() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"email": "nope"}"#).unwrap();
        assert!(matches!(validate_update(req), Err(ApiError::Validation(_))));
    }
}
