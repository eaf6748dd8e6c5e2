//! Built-in actions registered by `ResourceDecorator::with_default_actions`.

use crate::action::{Action, ActionRequest, ActionResponse, RecordActionHandler, ResourceActionHandler};
use crate::context::ActionContext;
use crate::error::DispatchError;
use adminkit_core::{Filter, FindOptions, Sort, SortDirection};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Query key prefix for list filters, e.g. `filters.name=ann`.
const FILTER_PREFIX: &str = "filters.";

/// All built-in actions, accessible to everyone.
pub fn all() -> Vec<Action> {
    vec![
        Action::resource("list", ListAction),
        Action::record("show", ShowAction),
        Action::record("delete", DeleteAction),
    ]
}

/// Paginated listing of a resource.
///
/// Query parameters: `page` (1-based), `perPage`, `sortBy`, `direction` and
/// any number of `filters.<field>` entries.
pub struct ListAction;

#[async_trait]
impl ResourceActionHandler for ListAction {
    async fn handle(
        &self,
        request: &ActionRequest,
        _response: &mut ActionResponse,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Value> {
        let resource = context.resource;
        let per_page = context
            .admin
            .pagination()
            .resolve_per_page(request.query_param("perPage").and_then(|v| v.parse().ok()));
        let page = request
            .query_param("page")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        let sort_by = request
            .query_param("sortBy")
            .unwrap_or(resource.title_property().path())
            .to_string();
        let direction = request
            .query_param("direction")
            .map(SortDirection::from_param)
            .unwrap_or_default();

        let mut filter = Filter::new();
        for (key, value) in &request.query {
            if let Some(field) = key.strip_prefix(FILTER_PREFIX)
                && !field.is_empty()
                && !value.is_empty()
            {
                filter.insert(field, value.as_str());
            }
        }

        let options = FindOptions::new()
            .limit(per_page)
            .offset((page - 1).saturating_mul(per_page))
            .sort(Sort {
                sort_by: sort_by.clone(),
                direction,
            });

        let total = resource.resource().count(&filter).await?;
        let records = resource.resource().find(&filter, &options).await?;
        let populated = context
            .admin
            .populator()
            .populate(records.into_iter().map(Some).collect(), context)
            .await?;

        let records: Vec<_> = populated
            .iter()
            .flatten()
            .map(|record| context.record_json(record))
            .collect();

        tracing::debug!(
            resource_id = %resource.id(),
            page,
            per_page,
            total,
            "Listed records"
        );

        Ok(json!({
            "records": records,
            "meta": {
                "total": total,
                "perPage": per_page,
                "page": page,
                "direction": direction,
                "sortBy": sort_by,
            }
        }))
    }
}

/// Returns the target record.
pub struct ShowAction;

#[async_trait]
impl RecordActionHandler for ShowAction {
    async fn handle(
        &self,
        _request: &ActionRequest,
        _response: &mut ActionResponse,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Value> {
        let record = context
            .record()
            .ok_or_else(|| DispatchError::record_not_found(context.resource_id()))?;

        Ok(json!({ "record": context.record_json(record) }))
    }
}

/// Deletes the target record and returns its last state.
pub struct DeleteAction;

#[async_trait]
impl RecordActionHandler for DeleteAction {
    async fn handle(
        &self,
        _request: &ActionRequest,
        _response: &mut ActionResponse,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Value> {
        let record = context
            .record()
            .ok_or_else(|| DispatchError::record_not_found(context.resource_id()))?;

        context.resource.resource().delete(record.id()).await?;
        tracing::info!(
            resource_id = %context.resource_id(),
            record_id = %record.id(),
            "Record deleted"
        );

        Ok(json!({
            "record": context.record_json(record),
            "notice": {
                "message": "Successfully deleted given record",
                "type": "success",
            }
        }))
    }
}
