//! Relation population.
//!
//! Population runs on loaded records before they reach accessibility
//! predicates and handlers, so predicates may inspect related records.

use crate::context::ActionContext;
use crate::record::BaseRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Resolves relations of loaded records.
///
/// Implementations must return a list of the same length and order as the
/// input; `None` entries stay `None`.
#[async_trait]
pub trait Populator: Send + Sync {
    async fn populate(
        &self,
        records: Vec<Option<BaseRecord>>,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Vec<Option<BaseRecord>>>;
}

/// Leaves records untouched.
pub struct NoopPopulator;

#[async_trait]
impl Populator for NoopPopulator {
    async fn populate(
        &self,
        records: Vec<Option<BaseRecord>>,
        _context: &ActionContext<'_>,
    ) -> anyhow::Result<Vec<Option<BaseRecord>>> {
        Ok(records)
    }
}

/// Loads the targets of reference properties from their resources and
/// attaches them under the property path.
///
/// One `find_many` call is made per reference property. References to
/// unregistered resources are skipped with a warning.
pub struct ReferencePopulator;

#[async_trait]
impl Populator for ReferencePopulator {
    async fn populate(
        &self,
        mut records: Vec<Option<BaseRecord>>,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Vec<Option<BaseRecord>>> {
        for property in context.resource.properties() {
            let Some(target_id) = property.reference() else {
                continue;
            };
            let Ok(target) = context.admin.find_resource(target_id) else {
                tracing::warn!(
                    resource_id = %context.resource_id(),
                    property = %property.path(),
                    reference = %target_id,
                    "Reference to unregistered resource, skipping population"
                );
                continue;
            };

            let path = property.path();
            let ids: BTreeSet<String> = records
                .iter()
                .flatten()
                .filter_map(|r| r.param(path).and_then(reference_id))
                .collect();
            if ids.is_empty() {
                continue;
            }

            let ids: Vec<String> = ids.into_iter().collect();
            let related: HashMap<String, BaseRecord> = target
                .resource()
                .find_many(&ids)
                .await?
                .into_iter()
                .map(|r| (r.id().to_string(), r))
                .collect();

            for record in records.iter_mut().flatten() {
                if let Some(id) = record.param(path).and_then(reference_id)
                    && let Some(found) = related.get(&id)
                {
                    record.set_populated(path, found.clone());
                }
            }
        }

        Ok(records)
    }
}

fn reference_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
