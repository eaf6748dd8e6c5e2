//! Storage boundary.
//!
//! A [`Resource`] is a named collection of records backed by any store. The
//! dispatcher only reads through this trait; query execution, sorting and
//! paging belong to the implementation.

use crate::record::BaseRecord;
use adminkit_core::{Filter, FindOptions};
use async_trait::async_trait;

/// Property names treated as title candidates, compared case-insensitively.
const TITLE_PROPERTY_NAMES: [&str; 4] = ["title", "name", "subject", "email"];

/// Description of one field of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseProperty {
    path: String,
    is_id: bool,
    reference: Option<String>,
}

impl BaseProperty {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_id: false,
            reference: None,
        }
    }

    /// A property holding the record identity.
    pub fn id(path: impl Into<String>) -> Self {
        Self {
            is_id: true,
            ..Self::new(path)
        }
    }

    /// Mark the property as a reference to records of another resource.
    pub fn referencing(mut self, resource_id: impl Into<String>) -> Self {
        self.reference = Some(resource_id.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_id(&self) -> bool {
        self.is_id
    }

    /// Whether the property name marks it as a display title.
    pub fn is_title(&self) -> bool {
        TITLE_PROPERTY_NAMES
            .iter()
            .any(|name| self.path.eq_ignore_ascii_case(name))
    }

    /// Id of the referenced resource, if this is a reference property.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// A collection of records the admin can act on.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Unique id the resource is addressed by in routes.
    fn id(&self) -> &str;

    /// Fields of the resource's records.
    fn properties(&self) -> Vec<BaseProperty>;

    /// Count the records matching a filter.
    async fn count(&self, filter: &Filter) -> anyhow::Result<usize>;

    /// Query records matching a filter, honouring sort, offset and limit.
    async fn find(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> anyhow::Result<Vec<BaseRecord>>;

    /// Load one record by id. A missing record is `Ok(None)`, not an error.
    async fn find_one(&self, id: &str) -> anyhow::Result<Option<BaseRecord>>;

    /// Load several records by id. Missing ids are skipped.
    async fn find_many(&self, ids: &[String]) -> anyhow::Result<Vec<BaseRecord>> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.find_one(id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Remove a record.
    async fn delete(&self, id: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_detection() {
        assert!(BaseProperty::new("name").is_title());
        assert!(BaseProperty::new("Email").is_title());
        assert!(!BaseProperty::new("username").is_title());
        assert!(!BaseProperty::id("id").is_title());
    }

    #[test]
    fn test_reference_property() {
        let property = BaseProperty::new("user_id").referencing("users");
        assert_eq!(property.reference(), Some("users"));
        assert!(!property.is_id());
    }
}
