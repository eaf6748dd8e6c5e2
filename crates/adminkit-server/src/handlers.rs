//! Request handlers for the admin API.
//!
//! Handlers translate HTTP into dispatcher calls and back; all decisions are
//! made by the dispatcher.

use crate::actor::MaybeAdmin;
use crate::error::ServerError;
use crate::state::AppState;
use adminkit_runtime::{ActionRequest, ActionResponse, RequestMethod, SearchResponse};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::collections::BTreeMap;

// =============================================================================
// Search
// =============================================================================

/// `GET /api/resources/{resourceId}/search/{query}`
pub async fn search(
    State(state): State<AppState>,
    Path((resource_id, query)): Path<(String, String)>,
    admin: MaybeAdmin,
) -> Result<Json<SearchResponse>, ServerError> {
    let result = state
        .dispatcher()
        .search(&resource_id, &query, admin.as_ref())
        .await?;
    Ok(Json(result))
}

/// `GET /api/resources/{resourceId}/search`
pub async fn search_all(
    State(state): State<AppState>,
    Path(resource_id): Path<String>,
    admin: MaybeAdmin,
) -> Result<Json<SearchResponse>, ServerError> {
    let result = state
        .dispatcher()
        .search(&resource_id, "", admin.as_ref())
        .await?;
    Ok(Json(result))
}

// =============================================================================
// Actions
// =============================================================================

/// `GET|POST /api/resources/{resourceId}/actions/{action}`
pub async fn resource_action(
    State(state): State<AppState>,
    Path((resource_id, action_name)): Path<(String, String)>,
    method: Method,
    admin: MaybeAdmin,
    Query(query): Query<BTreeMap<String, String>>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let request = action_request(&method, query, &body)?;
    let mut response = ActionResponse::new();

    let result = state
        .dispatcher()
        .resource_action(&resource_id, &action_name, admin.as_ref(), &request, &mut response)
        .await?;

    Ok(respond(&response, result))
}

/// `GET|POST /api/resources/{resourceId}/records/{recordId}/{action}`
pub async fn record_action(
    State(state): State<AppState>,
    Path((resource_id, record_id, action_name)): Path<(String, String, String)>,
    method: Method,
    admin: MaybeAdmin,
    Query(query): Query<BTreeMap<String, String>>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let request = action_request(&method, query, &body)?;
    let mut response = ActionResponse::new();

    let result = state
        .dispatcher()
        .record_action(
            &resource_id,
            &action_name,
            &record_id,
            admin.as_ref(),
            &request,
            &mut response,
        )
        .await?;

    Ok(respond(&response, result.into_inner()))
}

/// `GET /api/dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    method: Method,
    admin: MaybeAdmin,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Response, ServerError> {
    let request = action_request(&method, query, &[])?;
    let mut response = ActionResponse::new();

    let result = state
        .dispatcher()
        .dashboard(admin.as_ref(), &request, &mut response)
        .await?;

    Ok(respond(&response, result))
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "adminkit",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// =============================================================================
// Helpers
// =============================================================================

fn action_request(
    method: &Method,
    query: BTreeMap<String, String>,
    body: &[u8],
) -> Result<ActionRequest, ServerError> {
    let method = if *method == Method::POST {
        RequestMethod::Post
    } else {
        RequestMethod::Get
    };

    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ServerError::InvalidRequest(format!("body is not valid JSON: {e}")))?;
        Some(value)
    };

    Ok(ActionRequest {
        method,
        query,
        payload,
    })
}

/// Turn a handler result into an HTTP response, applying the status and
/// headers the handler set.
fn respond(response: &ActionResponse, body: Value) -> Response {
    let status = response
        .status()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    let mut headers = HeaderMap::new();
    for (name, value) in response.headers() {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Dropping invalid response header set by handler"),
        }
    }

    (status, headers, Json(body)).into_response()
}
