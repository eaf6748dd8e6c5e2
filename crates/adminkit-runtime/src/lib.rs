//! # adminkit-runtime
//!
//! Action dispatch and authorization for admin resources.
//!
//! ## Architecture
//!
//! ```text
//! route params (resource id, action, record id, query)
//!       │
//!       ▼
//! ┌──────────────────────┐
//! │ ContextBuilder       │  ← AdminRegistry (resources, actions)
//! ├──────────────────────┤
//! │ Dispatcher           │
//! │  1. load record      │  ← Resource::find_one
//! │  2. populate         │  ← Populator
//! │  3. is_accessible    │  ← Action accessibility + AuditSink
//! │  4. run handler      │  ← Resource/RecordActionHandler
//! │  5. check result     │  ← RecordActionResponse
//! └──────────┬───────────┘
//!            ▼
//!   result value or DispatchError
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use adminkit_core::AdminConfig;
//! use adminkit_runtime::{AdminRegistry, Dispatcher, MemoryResource, ResourceDecorator};
//! use std::sync::Arc;
//!
//! let users = MemoryResource::new("users").with_records(records);
//! let registry = AdminRegistry::builder(AdminConfig::default())
//!     .resource(ResourceDecorator::new(Arc::new(users)).with_default_actions())
//!     .build();
//!
//! let dispatcher = Dispatcher::new(Arc::new(registry));
//! let hits = dispatcher.search("users", "ann", Some(&admin)).await?;
//! ```

pub mod action;
pub mod audit;
pub mod context;
pub mod decorator;
pub mod default_actions;
pub mod dispatcher;
pub mod error;
pub mod memory;
pub mod populator;
pub mod record;
pub mod registry;
pub mod resource;
pub mod response;
pub mod view_helpers;

pub use action::{
    Accessibility, Action, ActionHandler, ActionJson, ActionRequest, ActionResponse, ActionScope,
    RecordActionHandler, RequestMethod, ResourceActionHandler,
};
pub use audit::{AccessEvent, AuditSink, MemoryAuditSink, NullAuditSink, TracingAuditSink};
pub use context::{ActionContext, ContextBuilder, DashboardContext, DashboardHandler};
pub use decorator::ResourceDecorator;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, RECORD_ACTION_CONTRACT_MESSAGE};
pub use memory::MemoryResource;
pub use populator::{NoopPopulator, Populator, ReferencePopulator};
pub use record::{BaseRecord, RecordJson};
pub use registry::{AdminRegistry, AdminRegistryBuilder};
pub use resource::{BaseProperty, Resource};
pub use response::{
    DASHBOARD_FALLBACK_MESSAGE, RecordActionResponse, SearchRecord, SearchResponse,
};
pub use view_helpers::ViewHelpers;
