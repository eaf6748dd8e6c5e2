//! Query model passed from the dispatcher to resources.
//!
//! The dispatcher only builds these values; how a filter is matched against
//! stored records is up to each resource implementation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Maximum number of records a single search call returns.
pub const SEARCH_LIMIT: usize = 50;

/// Field-to-value constraints for a query. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    filters: BTreeMap<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint, consuming the filter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.filters.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.filters.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.filters.iter()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a request parameter. Anything other than `desc` sorts ascending.
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub sort_by: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(sort_by: impl Into<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(sort_by: impl Into<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Paging and ordering for `Resource::find`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_builder() {
        let filter = Filter::new().with("name", "ann").with("status", json!("active"));

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.get("name"), Some(&json!("ann")));
        assert!(Filter::new().is_empty());
    }

    #[test]
    fn test_direction_from_param() {
        assert_eq!(SortDirection::from_param("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::from_param("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("sideways"), SortDirection::Asc);
    }

    #[test]
    fn test_find_options_serialization() {
        let options = FindOptions::new().limit(50).sort(Sort::asc("name"));
        let value = serde_json::to_value(&options).unwrap();

        assert_eq!(
            value,
            json!({ "limit": 50, "offset": 0, "sort": { "sortBy": "name", "direction": "asc" } })
        );
    }
}
