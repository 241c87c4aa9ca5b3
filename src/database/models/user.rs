use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Public view of a `users` row; the password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Full `users` row, including the bcrypt hash. Only used for login.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            is_admin: record.is_admin,
        }
    }
}

/// Body of `POST /auth/token`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    #[validate(length(min = 1, max = 25))]
    pub username: String,
    #[validate(length(min = 1, max = 20))]
    pub password: String,
}

/// Body of `POST /auth/register` and `POST /users`.
///
/// Self-registration never grants admin; the handler forces `is_admin` off.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    #[validate(length(min = 1, max = 25))]
    pub username: String,
    #[validate(length(min = 5, max = 20))]
    pub password: String,
    #[validate(length(min = 1, max = 30))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30))]
    pub last_name: String,
    #[validate(email, length(min = 6, max = 60))]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Body of `PATCH /users/:username`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 30))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub last_name: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub password: Option<String>,
    #[validate(email, length(min = 6, max = 60))]
    pub email: Option<String>,
}

impl super::PatchFields for UserUpdate {
    const NULLABLE: &'static [&'static str] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn public_view_drops_password() {
        let record = UserRecord {
            username: "u1".into(),
            password: "$2b$04$hash".into(),
            first_name: "U1F".into(),
            last_name: "U1L".into(),
            email: "u1@email.com".into(),
            is_admin: false,
        };
        let v = serde_json::to_value(User::from(record)).unwrap();
        assert!(v.get("password").is_none());
        assert_eq!(v["firstName"], "U1F");
        assert_eq!(v["isAdmin"], false);
    }

    #[test]
    fn new_user_checks_email() {
        let user: NewUser = serde_json::from_value(json!({
            "username": "new",
            "password": "password",
            "firstName": "first",
            "lastName": "last",
            "email": "not-an-email"
        }))
        .unwrap();
        assert!(!user.is_admin);
        assert!(user.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn update_refuses_username_and_admin_flag() {
        assert!(serde_json::from_value::<UserUpdate>(json!({"username": "x"})).is_err());
        assert!(serde_json::from_value::<UserUpdate>(json!({"isAdmin": true})).is_err());
    }
}
