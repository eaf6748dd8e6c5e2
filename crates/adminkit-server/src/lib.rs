//! # adminkit-server
//!
//! HTTP boundary for the adminkit dispatcher.
//!
//! | Route | Method | Operation |
//! |---|---|---|
//! | `/api/resources/{resourceId}/search[/{query}]` | GET | search |
//! | `/api/resources/{resourceId}/actions/{action}` | GET, POST | resource action |
//! | `/api/resources/{resourceId}/records/{recordId}/{action}` | GET, POST | record action |
//! | `/api/dashboard` | GET | dashboard |
//! | `/health` | GET | liveness |
//!
//! The acting admin is read from the `x-admin-id`, `x-admin-email` and
//! `x-admin-role` headers.

pub mod actor;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use actor::MaybeAdmin;
pub use error::ServerError;
pub use routes::create_router;
pub use server::AdminServer;
pub use state::AppState;
