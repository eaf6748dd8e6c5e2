//! Shared fixtures for dispatcher integration tests.

#![allow(dead_code)]

use adminkit_runtime::{
    ActionContext, ActionRequest, ActionResponse, BaseRecord, Populator, RecordActionHandler,
    ReferencePopulator, ResourceActionHandler,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Ordered log of the steps a dispatch went through.
#[derive(Clone, Default)]
pub struct StepLog(Arc<Mutex<Vec<String>>>);

impl StepLog {
    pub fn push(&self, step: impl Into<String>) {
        self.0.lock().unwrap().push(step.into());
    }

    pub fn steps(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Counts handler invocations.
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Reference populator that logs each call.
pub struct LoggingPopulator {
    pub log: StepLog,
}

#[async_trait]
impl Populator for LoggingPopulator {
    async fn populate(
        &self,
        records: Vec<Option<BaseRecord>>,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Vec<Option<BaseRecord>>> {
        self.log.push("populate");
        ReferencePopulator.populate(records, context).await
    }
}

/// Resource action returning a fixed value.
pub struct FixedResourceAction {
    pub calls: CallCounter,
    pub output: Value,
}

#[async_trait]
impl ResourceActionHandler for FixedResourceAction {
    async fn handle(
        &self,
        _request: &ActionRequest,
        response: &mut ActionResponse,
        _context: &ActionContext<'_>,
    ) -> anyhow::Result<Value> {
        self.calls.hit();
        response.set_status(202);
        Ok(self.output.clone())
    }
}

/// Record action returning a fixed value.
pub struct FixedRecordAction {
    pub calls: CallCounter,
    pub output: Value,
}

#[async_trait]
impl RecordActionHandler for FixedRecordAction {
    async fn handle(
        &self,
        _request: &ActionRequest,
        _response: &mut ActionResponse,
        _context: &ActionContext<'_>,
    ) -> anyhow::Result<Value> {
        self.calls.hit();
        Ok(self.output.clone())
    }
}

/// Record action that serializes its target record and logs what it saw.
pub struct EchoRecordAction {
    pub log: StepLog,
}

#[async_trait]
impl RecordActionHandler for EchoRecordAction {
    async fn handle(
        &self,
        _request: &ActionRequest,
        _response: &mut ActionResponse,
        context: &ActionContext<'_>,
    ) -> anyhow::Result<Value> {
        match context.record() {
            Some(record) => {
                self.log.push(format!("handle:{}", describe(record)));
                Ok(json!({ "record": context.record_json(record) }))
            }
            None => {
                self.log.push("handle:none");
                Ok(json!({ "record": { "recordActions": [] }, "missing": true }))
            }
        }
    }
}

/// Record action that always fails.
pub struct FailingRecordAction;

#[async_trait]
impl RecordActionHandler for FailingRecordAction {
    async fn handle(
        &self,
        _request: &ActionRequest,
        _response: &mut ActionResponse,
        _context: &ActionContext<'_>,
    ) -> anyhow::Result<Value> {
        anyhow::bail!("payment gateway unavailable")
    }
}

/// Short description of a record and its populated user, for step logs.
pub fn describe(record: &BaseRecord) -> String {
    match record.populated("user_id") {
        Some(user) => format!("{}+{}", record.id(), user.param_text("name")),
        None => record.id().to_string(),
    }
}

pub fn users_records() -> Vec<Value> {
    vec![
        json!({ "id": "3", "name": "Bob", "role": "viewer" }),
        json!({ "id": "1", "name": "Ann A", "role": "admin" }),
        json!({ "id": "2", "name": "Anna B", "role": "editor" }),
    ]
}

pub fn orders_records() -> Vec<Value> {
    vec![
        json!({ "id": "42", "user_id": "1", "status": "pending", "total": 120 }),
        json!({ "id": "43", "user_id": "2", "status": "shipped", "total": 80 }),
    ]
}
