//! User entity.

use super::ids::UserId;
use serde::{Deserialize, Serialize};

/// Team member that tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Never empty once stored; the store fills in a generated avatar.
    pub avatar_url: String,
}

/// Creation payload for [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// `None` or blank asks the store to assign a default avatar.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Display name, or `Unassigned` for a missing assignee.
    pub fn display_name(user: Option<&User>) -> &str {
        user.map(|user| user.name.as_str()).unwrap_or("Unassigned")
    }
}
