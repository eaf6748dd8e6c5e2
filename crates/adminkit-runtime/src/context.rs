//! Per-request contexts.

use crate::action::{Action, ActionRequest, ActionResponse};
use crate::decorator::ResourceDecorator;
use crate::error::DispatchError;
use crate::record::{BaseRecord, RecordJson};
use crate::registry::AdminRegistry;
use crate::view_helpers::ViewHelpers;
use adminkit_core::CurrentAdmin;
use async_trait::async_trait;
use serde_json::Value;

/// Everything an action handler can see about the request it serves.
///
/// Built once per request by [`ContextBuilder`] and dropped with the
/// response. The record, if any, is the one the accessibility check ran
/// against.
#[derive(Debug)]
pub struct ActionContext<'a> {
    pub admin: &'a AdminRegistry,
    pub resource: &'a ResourceDecorator,
    pub action: &'a Action,
    pub view_helpers: ViewHelpers,
    pub current_admin: Option<&'a CurrentAdmin>,
    record: Option<BaseRecord>,
}

impl<'a> ActionContext<'a> {
    /// Attach the target record of a record action.
    pub fn with_record(mut self, record: Option<BaseRecord>) -> Self {
        self.record = record;
        self
    }

    pub fn record(&self) -> Option<&BaseRecord> {
        self.record.as_ref()
    }

    pub fn resource_id(&self) -> &str {
        self.resource.id()
    }

    pub fn action_name(&self) -> &str {
        self.action.name()
    }

    /// Serialize a record of this context's resource for the current admin.
    pub fn record_json(&self, record: &BaseRecord) -> RecordJson {
        self.resource
            .record_json(record, self.current_admin, self.admin)
    }
}

/// Resolves resource and action names into an [`ActionContext`].
///
/// Performs no authorization.
pub struct ContextBuilder<'a> {
    admin: &'a AdminRegistry,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(admin: &'a AdminRegistry) -> Self {
        Self { admin }
    }

    pub fn build(
        &self,
        resource_id: &str,
        action_name: &str,
        current_admin: Option<&'a CurrentAdmin>,
    ) -> Result<ActionContext<'a>, DispatchError> {
        let resource = self.admin.find_resource(resource_id)?;
        let action = resource
            .action(action_name)
            .ok_or_else(|| DispatchError::action_not_found(resource_id, action_name))?;

        Ok(ActionContext {
            admin: self.admin,
            resource,
            action,
            view_helpers: self.admin.view_helpers(),
            current_admin,
            record: None,
        })
    }
}

/// Context handed to the dashboard handler.
#[derive(Debug)]
pub struct DashboardContext<'a> {
    pub admin: &'a AdminRegistry,
    pub view_helpers: ViewHelpers,
    pub current_admin: Option<&'a CurrentAdmin>,
}

/// Custom dashboard data provider.
#[async_trait]
pub trait DashboardHandler: Send + Sync {
    async fn handle(
        &self,
        request: &ActionRequest,
        response: &mut ActionResponse,
        context: &DashboardContext<'_>,
    ) -> anyhow::Result<Value>;
}
