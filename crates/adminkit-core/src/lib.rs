//! # adminkit-core
//!
//! Types shared by every adminkit crate:
//!
//! - [`CurrentAdmin`]: the opaque identity of the caller
//! - [`Filter`], [`FindOptions`], [`Sort`]: the query model handed to resources
//! - [`config`]: YAML configuration loaded at startup

pub mod admin;
pub mod config;
pub mod query;

pub use admin::CurrentAdmin;
pub use config::{
    AdminConfig, AuditConfig, ConfigError, LoggingConfig, PaginationConfig, ResourceOptions,
    ServerConfig,
};
pub use query::{Filter, FindOptions, SEARCH_LIMIT, Sort, SortDirection};
