//! Admin API server.

use crate::error::ServerError;
use crate::routes;
use crate::state::AppState;
use adminkit_core::ServerConfig;
use tokio::net::TcpListener;

/// The admin API server.
pub struct AdminServer {
    config: ServerConfig,
    state: AppState,
}

impl AdminServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until ctrl-c.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.address();
        let app = routes::create_router(self.state);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::StartupFailed(format!("{addr}: {e}")))?;
        tracing::info!(address = %addr, "Admin API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::StartupFailed(e.to_string()))?;

        tracing::info!("Admin API stopped");
        Ok(())
    }

    pub fn address(&self) -> String {
        self.config.address()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
