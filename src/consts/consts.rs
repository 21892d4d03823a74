use std::fmt;

use serde::{Deserialize, Serialize};

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
//
// Ids are always assigned by the backend, there is intentionally no `PersonId::new()`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PersonId {
    fn from(value: String) -> Self {
        PersonId(value)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        PersonId(value.to_string())
    }
}

// Values
pub const DEFAULT_API_COMMAND_URL: &str = "http://localhost:3001";
pub const DEFAULT_API_QUERY_URL: &str = "http://localhost:3002";

/// Collection segment shared by the command and the query API
pub const PERSONS_RESOURCE: &str = "persons";

/// Message used when the API answers with a failure status and an empty body
pub const API_FALLBACK_ERROR_MESSAGE: &str = "Erro ao comunicar com a API";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Upper bound on chained route redirects before resolution gives up
pub const MAX_ROUTE_REDIRECTS: usize = 10;
