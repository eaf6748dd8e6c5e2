//! Records and their serialized form.

use crate::action::ActionJson;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One record loaded from a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRecord {
    id: String,
    params: Map<String, Value>,
    populated: BTreeMap<String, BaseRecord>,
}

impl BaseRecord {
    pub fn new(id: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            params,
            populated: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn param(&self, path: &str) -> Option<&Value> {
        self.params.get(path)
    }

    /// Field value rendered as display text. Missing and null fields are empty.
    pub fn param_text(&self, path: &str) -> String {
        match self.params.get(path) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Related record attached by the populator under a reference path.
    pub fn populated(&self, path: &str) -> Option<&BaseRecord> {
        self.populated.get(path)
    }

    pub fn populated_all(&self) -> &BTreeMap<String, BaseRecord> {
        &self.populated
    }

    pub fn set_populated(&mut self, path: impl Into<String>, record: BaseRecord) {
        self.populated.insert(path.into(), record);
    }
}

/// Serialized record as seen by a given admin.
///
/// `record_actions` only lists the record actions that admin may run on this
/// record, so two admins can receive different JSON for the same record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordJson {
    pub id: String,
    pub title: String,
    pub params: Map<String, Value>,
    pub populated: BTreeMap<String, RecordJson>,
    pub record_actions: Vec<ActionJson>,
    pub errors: Map<String, Value>,
}
