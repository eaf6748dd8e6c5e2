//! Acting admin extracted from request headers.
//!
//! Identity is established upstream (a proxy or session layer) and passed in
//! as headers. A request without `x-admin-id` has no acting admin.

use adminkit_core::CurrentAdmin;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

pub const ADMIN_ID_HEADER: &str = "x-admin-id";
pub const ADMIN_EMAIL_HEADER: &str = "x-admin-email";
pub const ADMIN_ROLE_HEADER: &str = "x-admin-role";

/// Optional acting admin. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct MaybeAdmin(pub Option<CurrentAdmin>);

impl MaybeAdmin {
    pub fn as_ref(&self) -> Option<&CurrentAdmin> {
        self.0.as_ref()
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for MaybeAdmin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(id) = header(parts, ADMIN_ID_HEADER) else {
            return Ok(MaybeAdmin(None));
        };

        let mut admin = CurrentAdmin::new(id);
        if let Some(email) = header(parts, ADMIN_EMAIL_HEADER) {
            admin = admin.with_email(email);
        }
        if let Some(role) = header(parts, ADMIN_ROLE_HEADER) {
            admin = admin.with_role(role);
        }

        Ok(MaybeAdmin(Some(admin)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> MaybeAdmin {
        let (mut parts, _) = request.into_parts();
        match MaybeAdmin::from_request_parts(&mut parts, &()).await {
            Ok(admin) => admin,
            Err(never) => match never {},
        }
    }

    #[tokio::test]
    async fn test_no_id_header_means_no_admin() {
        let request = Request::builder()
            .header(ADMIN_ROLE_HEADER, "admin")
            .body(())
            .unwrap();

        assert!(extract(request).await.0.is_none());
    }

    #[tokio::test]
    async fn test_headers_build_admin() {
        let request = Request::builder()
            .header(ADMIN_ID_HEADER, "7")
            .header(ADMIN_EMAIL_HEADER, "ann@example.com")
            .header(ADMIN_ROLE_HEADER, "editor")
            .body(())
            .unwrap();

        let admin = extract(request).await.0.unwrap();
        assert_eq!(admin.id, "7");
        assert_eq!(admin.email.as_deref(), Some("ann@example.com"));
        assert!(admin.has_role("editor"));
    }

    #[tokio::test]
    async fn test_blank_id_is_ignored() {
        let request = Request::builder()
            .header(ADMIN_ID_HEADER, "  ")
            .body(())
            .unwrap();

        assert!(extract(request).await.0.is_none());
    }
}
