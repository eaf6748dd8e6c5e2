//! Audit trail of authorization decisions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use uuid::Uuid;

/// One accessibility check made by the dispatcher.
///
/// Identifies the admin by id only; no credentials or attributes are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessEvent {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub resource_id: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
    pub allowed: bool,
}

impl AccessEvent {
    pub fn new(
        resource_id: &str,
        action: &str,
        record_id: Option<&str>,
        admin_id: Option<&str>,
        allowed: bool,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            resource_id: resource_id.to_string(),
            action: action.to_string(),
            record_id: record_id.map(str::to_string),
            admin_id: admin_id.map(str::to_string),
            allowed,
        }
    }
}

/// Destination for access events.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AccessEvent);
}

/// Emits events as structured `tracing` records.
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AccessEvent) {
        if event.allowed {
            tracing::info!(
                event_id = %event.event_id,
                resource_id = %event.resource_id,
                action = %event.action,
                record_id = event.record_id.as_deref().unwrap_or("-"),
                admin_id = event.admin_id.as_deref().unwrap_or("-"),
                "access granted"
            );
        } else {
            tracing::warn!(
                event_id = %event.event_id,
                resource_id = %event.resource_id,
                action = %event.action,
                record_id = event.record_id.as_deref().unwrap_or("-"),
                admin_id = event.admin_id.as_deref().unwrap_or("-"),
                "access denied"
            );
        }
    }
}

/// Drops every event.
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _event: AccessEvent) {}
}

/// Keeps events in memory, mostly for tests and diagnostics.
#[derive(Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AccessEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<AccessEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: AccessEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
