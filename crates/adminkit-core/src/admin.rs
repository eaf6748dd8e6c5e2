//! Identity of the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The admin user on whose behalf a request runs.
///
/// The dispatcher never looks inside this value: it is handed unchanged to
/// every accessibility predicate and every handler. Requests without an
/// identity carry `None` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Arbitrary attributes for policy predicates.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
}

impl CurrentAdmin {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            role: None,
            attrs: Map::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// Check whether the admin carries the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }
}
