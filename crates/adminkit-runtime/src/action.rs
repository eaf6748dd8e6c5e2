//! Action descriptors.
//!
//! An [`Action`] couples a name, an accessibility predicate and a handler.
//! The handler is tagged by scope: resource actions run against the whole
//! collection, record actions against one (possibly absent) record and must
//! return a serialized record.

use crate::context::ActionContext;
use crate::record::BaseRecord;
use adminkit_core::CurrentAdmin;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Whether an action targets a collection or a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionScope {
    Resource,
    Record,
}

impl fmt::Display for ActionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionScope::Resource => write!(f, "resource"),
            ActionScope::Record => write!(f, "record"),
        }
    }
}

type AccessPredicate = dyn Fn(Option<&CurrentAdmin>, Option<&BaseRecord>) -> bool + Send + Sync;

/// Authorization predicate of an action.
#[derive(Clone)]
pub enum Accessibility {
    Always,
    Never,
    Predicate(Arc<AccessPredicate>),
}

impl Accessibility {
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&CurrentAdmin>, Option<&BaseRecord>) -> bool + Send + Sync + 'static,
    {
        Accessibility::Predicate(Arc::new(predicate))
    }

    pub fn check(&self, current_admin: Option<&CurrentAdmin>, record: Option<&BaseRecord>) -> bool {
        match self {
            Accessibility::Always => true,
            Accessibility::Never => false,
            Accessibility::Predicate(predicate) => predicate(current_admin, record),
        }
    }
}

impl fmt::Debug for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessibility::Always => write!(f, "Always"),
            Accessibility::Never => write!(f, "Never"),
            Accessibility::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// HTTP method the action was invoked with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMethod {
    #[default]
    Get,
    Post,
}

/// Inbound request data handed to handlers.
#[derive(Debug, Clone, Default)]
pub struct ActionRequest {
    pub method: RequestMethod,
    /// Query string parameters.
    pub query: BTreeMap<String, String>,
    /// Parsed JSON body of POST requests.
    pub payload: Option<Value>,
}

impl ActionRequest {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(payload: Value) -> Self {
        Self {
            method: RequestMethod::Post,
            query: BTreeMap::new(),
            payload: Some(payload),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Outbound response metadata a handler may set. The HTTP boundary applies
/// it to the serialized result.
#[derive(Debug, Clone, Default)]
pub struct ActionResponse {
    status: Option<u16>,
    headers: BTreeMap<String, String>,
}

impl ActionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }
}

/// Handler of a collection-level action. Its result is passed through as-is.
#[async_trait]
pub trait ResourceActionHandler: Send + Sync {
    async fn handle(
        &self,
        request: &ActionRequest,
        response: &mut ActionResponse,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Value>;
}

/// Handler of a record-level action.
///
/// The target record is `context.record()`. The result must carry
/// `record.recordActions`, i.e. embed a [`RecordJson`](crate::RecordJson).
#[async_trait]
pub trait RecordActionHandler: Send + Sync {
    async fn handle(
        &self,
        request: &ActionRequest,
        response: &mut ActionResponse,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Value>;
}

/// Handler tagged by the scope it runs in.
#[derive(Clone)]
pub enum ActionHandler {
    Resource(Arc<dyn ResourceActionHandler>),
    Record(Arc<dyn RecordActionHandler>),
}

impl ActionHandler {
    pub fn scope(&self) -> ActionScope {
        match self {
            ActionHandler::Resource(_) => ActionScope::Resource,
            ActionHandler::Record(_) => ActionScope::Record,
        }
    }
}

/// A named operation registered on a resource.
#[derive(Clone)]
pub struct Action {
    name: String,
    accessibility: Accessibility,
    handler: ActionHandler,
}

impl Action {
    /// A collection-level action, accessible to everyone until restricted.
    pub fn resource(name: impl Into<String>, handler: impl ResourceActionHandler + 'static) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Always,
            handler: ActionHandler::Resource(Arc::new(handler)),
        }
    }

    /// A record-level action, accessible to everyone until restricted.
    pub fn record(name: impl Into<String>, handler: impl RecordActionHandler + 'static) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Always,
            handler: ActionHandler::Record(Arc::new(handler)),
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Restrict the action with a predicate over the admin and target record.
    pub fn accessible_when<F>(self, predicate: F) -> Self
    where
        F: Fn(Option<&CurrentAdmin>, Option<&BaseRecord>) -> bool + Send + Sync + 'static,
    {
        self.with_accessibility(Accessibility::predicate(predicate))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> ActionScope {
        self.handler.scope()
    }

    pub fn handler(&self) -> &ActionHandler {
        &self.handler
    }

    pub fn accessibility(&self) -> &Accessibility {
        &self.accessibility
    }

    pub fn is_accessible(
        &self,
        current_admin: Option<&CurrentAdmin>,
        record: Option<&BaseRecord>,
    ) -> bool {
        self.accessibility.check(current_admin, record)
    }

    pub fn to_json(&self) -> ActionJson {
        ActionJson {
            name: self.name.clone(),
            action_type: self.scope(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("scope", &self.scope())
            .field("accessibility", &self.accessibility)
            .finish()
    }
}

/// Serialized action descriptor embedded in record JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionJson {
    pub name: String,
    pub action_type: ActionScope,
}
