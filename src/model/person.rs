use serde::{Deserialize, Serialize};

use crate::consts::consts::PersonId;

/// Person as returned by the query and command APIs. `id`, `created_at` and `updated_at`
/// are assigned by the server, the client only ever receives a `Person`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreatePerson {
    pub name: String,
    pub email: String,
}

impl CreatePerson {
    pub fn new(name: String, email: String) -> Self {
        CreatePerson { name, email }
    }
}

/// Partial update, fields left as `None` are omitted from the request body
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UpdatePerson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl UpdatePerson {
    pub fn set_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn set_email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
impl Person {
    pub fn new_test() -> Self {
        Person {
            id: PersonId(uuid::Uuid::new_v4().to_string()),
            name: "Full Name".to_string(),
            email: "email@example.com".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }
}
