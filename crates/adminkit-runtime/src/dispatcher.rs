//! The dispatcher: resolves, authorizes and runs actions.
//!
//! Every entry point follows the same sequence:
//!
//! 1. Build the [`ActionContext`] (resource + action lookup)
//! 2. Load and populate the target record (record actions only)
//! 3. Evaluate the action's accessibility predicate exactly once, with the
//!    record the handler will receive
//! 4. Run the handler
//! 5. Validate the result (record actions only)
//!
//! Handler and storage failures are returned as-is; nothing is retried.

use crate::action::{Action, ActionHandler, ActionRequest, ActionResponse, ActionScope};
use crate::audit::AccessEvent;
use crate::context::{ActionContext, ContextBuilder, DashboardContext};
use crate::error::DispatchError;
use crate::record::BaseRecord;
use crate::registry::AdminRegistry;
use crate::response::{RecordActionResponse, SearchRecord, SearchResponse, dashboard_fallback};
use adminkit_core::{CurrentAdmin, Filter, FindOptions, SEARCH_LIMIT, Sort};
use serde_json::Value;
use std::sync::Arc;

/// Name of the action whose accessibility gates search.
const LIST_ACTION: &str = "list";

/// Entry point of the four routed operations.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    admin: Arc<AdminRegistry>,
}

impl Dispatcher {
    pub fn new(admin: Arc<AdminRegistry>) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &AdminRegistry {
        &self.admin
    }

    /// Search a resource by its title property.
    ///
    /// Requires the resource's `list` action to be accessible. At most
    /// [`SEARCH_LIMIT`] records are returned, sorted ascending by title.
    pub async fn search(
        &self,
        resource_id: &str,
        query: &str,
        current_admin: Option<&CurrentAdmin>,
    ) -> Result<SearchResponse, DispatchError> {
        let context = ContextBuilder::new(&self.admin).build(resource_id, LIST_ACTION, current_admin)?;
        self.authorize(&context, None)?;

        let title_path = context.resource.title_property().path();
        let filter = if query.is_empty() {
            Filter::new()
        } else {
            Filter::new().with(title_path, query)
        };
        let options = FindOptions::new()
            .limit(SEARCH_LIMIT)
            .sort(Sort::asc(title_path));

        let records = context
            .resource
            .resource()
            .find(&filter, &options)
            .await
            .map_err(DispatchError::Storage)?;

        let records: Vec<SearchRecord> = records
            .iter()
            .take(SEARCH_LIMIT)
            .map(|record| SearchRecord {
                id: record.id().to_string(),
                title: context.resource.title_of(record),
            })
            .collect();

        tracing::debug!(
            resource_id = %resource_id,
            query = %query,
            hits = records.len(),
            "Search completed"
        );

        Ok(SearchResponse { records })
    }

    /// Run a collection-level action. The handler's result is returned
    /// unchanged.
    pub async fn resource_action(
        &self,
        resource_id: &str,
        action_name: &str,
        current_admin: Option<&CurrentAdmin>,
        request: &ActionRequest,
        response: &mut ActionResponse,
    ) -> Result<Value, DispatchError> {
        let context = ContextBuilder::new(&self.admin).build(resource_id, action_name, current_admin)?;
        let action = context.action;
        let ActionHandler::Resource(handler) = action.handler() else {
            return Err(scope_mismatch(action, ActionScope::Resource, resource_id));
        };

        self.authorize(&context, None)?;

        tracing::debug!(resource_id = %resource_id, action = %action_name, "Running resource action");
        handler
            .handle(request, response, &context)
            .await
            .map_err(DispatchError::from_handler)
    }

    /// Run a record-level action.
    ///
    /// A missing record is not rejected here: it is populated, checked and
    /// handed to the handler as `None`. The handler's result must carry
    /// `record.recordActions`.
    pub async fn record_action(
        &self,
        resource_id: &str,
        action_name: &str,
        record_id: &str,
        current_admin: Option<&CurrentAdmin>,
        request: &ActionRequest,
        response: &mut ActionResponse,
    ) -> Result<RecordActionResponse, DispatchError> {
        let context = ContextBuilder::new(&self.admin).build(resource_id, action_name, current_admin)?;
        let action = context.action;
        let ActionHandler::Record(handler) = action.handler() else {
            return Err(scope_mismatch(action, ActionScope::Record, resource_id));
        };

        let record = context
            .resource
            .resource()
            .find_one(record_id)
            .await
            .map_err(DispatchError::Storage)?;
        let record = self.populate_one(record, &context).await?;
        let context = context.with_record(record);

        self.authorize(&context, Some(record_id))?;

        tracing::debug!(
            resource_id = %resource_id,
            action = %action_name,
            record_id = %record_id,
            found = context.record().is_some(),
            "Running record action"
        );
        let output = handler
            .handle(request, response, &context)
            .await
            .map_err(DispatchError::from_handler)?;

        RecordActionResponse::from_handler_output(output).inspect_err(|err| {
            tracing::error!(
                resource_id = %resource_id,
                action = %action_name,
                error = %err,
                "Record action returned a malformed result"
            );
        })
    }

    /// Run the registered dashboard handler, or return the fallback message.
    ///
    /// No accessibility check is made here; dashboard visibility is decided
    /// where the route is exposed.
    pub async fn dashboard(
        &self,
        current_admin: Option<&CurrentAdmin>,
        request: &ActionRequest,
        response: &mut ActionResponse,
    ) -> Result<Value, DispatchError> {
        let Some(handler) = self.admin.dashboard_handler() else {
            return Ok(dashboard_fallback());
        };

        let context = DashboardContext {
            admin: &self.admin,
            view_helpers: self.admin.view_helpers(),
            current_admin,
        };
        handler
            .handle(request, response, &context)
            .await
            .map_err(DispatchError::from_handler)
    }

    /// Evaluate the context's action against its record and admin, recording
    /// the decision.
    fn authorize(
        &self,
        context: &ActionContext<'_>,
        record_id: Option<&str>,
    ) -> Result<(), DispatchError> {
        let allowed = context
            .action
            .is_accessible(context.current_admin, context.record());

        self.admin.audit().record(AccessEvent::new(
            context.resource_id(),
            context.action_name(),
            record_id,
            context.current_admin.map(|a| a.id.as_str()),
            allowed,
        ));

        if allowed {
            Ok(())
        } else {
            Err(DispatchError::forbidden(
                context.action_name(),
                context.resource_id(),
            ))
        }
    }

    async fn populate_one(
        &self,
        record: Option<BaseRecord>,
        context: &ActionContext<'_>,
    ) -> Result<Option<BaseRecord>, DispatchError> {
        let populated = self
            .admin
            .populator()
            .populate(vec![record], context)
            .await
            .map_err(DispatchError::Storage)?;

        match <[Option<BaseRecord>; 1]>::try_from(populated) {
            Ok([record]) => Ok(record),
            Err(returned) => Err(DispatchError::Storage(anyhow::anyhow!(
                "populator returned {} records for 1 input",
                returned.len()
            ))),
        }
    }
}

fn scope_mismatch(action: &Action, expected: ActionScope, resource_id: &str) -> DispatchError {
    DispatchError::NotFound(format!(
        "action '{}' on resource '{}' is a {} action, not a {} action",
        action.name(),
        resource_id,
        action.scope(),
        expected
    ))
}
