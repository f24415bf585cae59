//! Contact entity.

use super::ids::ContactId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// External person/company tracked by the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub last_contacted: DateTime<Utc>,
}

/// Creation payload for [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub last_contacted: DateTime<Utc>,
}

impl Contact {
    pub(crate) fn from_new(id: ContactId, new: NewContact) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            last_contacted: new.last_contacted,
        }
    }
}
