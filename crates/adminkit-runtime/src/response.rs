//! Result shapes returned by the dispatcher.

use crate::error::{DispatchError, RECORD_ACTION_CONTRACT_MESSAGE};
use serde::Serialize;
use serde_json::{Value, json};

/// Returned by `dashboard` when no dashboard handler is registered.
pub const DASHBOARD_FALLBACK_MESSAGE: &str =
    "You can override this method by setting up dashboard.handler function in options";

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    pub id: String,
    pub title: String,
}

/// Result of a search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResponse {
    pub records: Vec<SearchRecord>,
}

/// Validated result of a record action handler.
///
/// Holds the handler's value untouched; construction only succeeds when the
/// value carries `record.recordActions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordActionResponse(Value);

impl RecordActionResponse {
    /// Check a handler result against the record action contract.
    ///
    /// `record.recordActions` must be present and truthy: `null`, `false`,
    /// `0` and `""` are rejected. The rest of the value is not inspected.
    pub fn from_handler_output(value: Value) -> Result<Self, DispatchError> {
        let has_record_actions = value
            .get("record")
            .and_then(|record| record.get("recordActions"))
            .is_some_and(is_truthy);

        if has_record_actions {
            Ok(Self(value))
        } else {
            Err(DispatchError::configuration(
                RECORD_ACTION_CONTRACT_MESSAGE,
                "Action.handler",
            ))
        }
    }

    pub fn record(&self) -> &Value {
        &self.0["record"]
    }

    pub fn record_actions(&self) -> &Value {
        &self.0["record"]["recordActions"]
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn dashboard_fallback() -> Value {
    json!({ "message": DASHBOARD_FALLBACK_MESSAGE })
}
