//! Authorized fetch client.
//!
//! Single point of contact with the API origin. Injects the bearer token
//! from the session, negotiates JSON, and normalizes every failure mode
//! (network, CORS, 4xx, 5xx) into one `RequestError`. One attempt per
//! call; retry policy belongs to the caller.

use crate::config::API_URL;
use crate::web::{HttpClient, HttpMethod};
use cvadmin_shared::{
    AdminListResponse, AdminProfile, CreateAdminRequest, DashboardStats, LoginResponse,
    UserListResponse,
};
use leptos::prelude::*;
use serde::de::DeserializeOwned;

// =========================================================
// Errors
// =========================================================

/// Normalized request failure, uniform across causes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// HTTP status, absent for transport-level failures.
    pub status: Option<u16>,
    pub message: String,
}

impl RequestError {
    fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Whether the server rejected our credentials rather than the request.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status, Some(401) | Some(422))
    }
}

impl core::fmt::Display for RequestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RequestError {}

/// Pull a human-readable message out of a JSON error body.
///
/// The API reports failures as `{"detail": ...}`; a structured detail is
/// stringified, anything unparseable yields `None` so the caller can fall
/// back to the HTTP status text.
pub fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(other) if !other.is_null() => Some(other.to_string()),
        _ => match value {
            serde_json::Value::Object(_) => Some(value.to_string()),
            _ => None,
        },
    }
}

/// Form-encoded credential body for the OAuth2 password flow the login
/// endpoint expects.
pub fn login_form_body(username: &str, password: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("username", username)
        .append_pair("password", password)
        .append_pair("grant_type", "password")
        .finish()
}

// =========================================================
// Client
// =========================================================

enum Body {
    Json(String),
    Form(String),
}

/// API client. Cloneable and cheap; the token is read from the injected
/// signal at call time, so logout immediately affects subsequent requests.
#[derive(Clone, Copy)]
pub struct AdminApi {
    token: Signal<Option<String>>,
}

impl AdminApi {
    pub fn new(token: Signal<Option<String>>) -> Self {
        Self { token }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", API_URL.trim_end_matches('/'), path)
    }

    /// One normalized request. `Ok(None)` is an HTTP 204.
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Body>,
    ) -> Result<Option<String>, RequestError> {
        let url = self.url(path);
        let mut builder = match method {
            HttpMethod::Get => HttpClient::get(&url),
            HttpMethod::Post => HttpClient::post(&url),
            HttpMethod::Delete => HttpClient::delete(&url),
        };

        builder = builder.header("Accept", "application/json");

        if let Some(token) = self.token.get_untracked() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        builder = match body {
            Some(Body::Json(json)) => builder
                .header("Content-Type", "application/json")
                .body(json),
            Some(Body::Form(form)) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(form),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?;

        let status = response.status();
        if !response.ok() {
            let status_text = response.status_text();
            let message = match response.text().await {
                Ok(body) => error_detail(&body).unwrap_or(status_text),
                Err(_) => status_text,
            };
            return Err(RequestError {
                status: Some(status),
                message,
            });
        }

        if status == 204 {
            return Ok(None);
        }

        let text = response
            .text()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?;
        Ok(Some(text))
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Body>,
    ) -> Result<T, RequestError> {
        let text = self
            .request(method, path, body)
            .await?
            .ok_or_else(|| RequestError::transport("unexpected empty response"))?;
        serde_json::from_str(&text)
            .map_err(|e| RequestError::transport(format!("invalid response body: {}", e)))
    }

    // --- Endpoints ---

    /// `POST /auth/admin/login`, form-encoded credentials. The one call
    /// made without a bearer token.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, RequestError> {
        let body = Body::Form(login_form_body(username, password));
        self.request_json(HttpMethod::Post, "/auth/admin/login", Some(body))
            .await
    }

    /// `GET /auth/admin/me`
    pub async fn me(&self) -> Result<AdminProfile, RequestError> {
        self.request_json(HttpMethod::Get, "/auth/admin/me", None)
            .await
    }

    /// `GET /auth/admin/dashboard`
    pub async fn dashboard(&self) -> Result<DashboardStats, RequestError> {
        self.request_json(HttpMethod::Get, "/auth/admin/dashboard", None)
            .await
    }

    /// `GET /auth/admin/list?page&size` (wire page is 1-based).
    pub async fn list_admins(
        &self,
        wire_page: u64,
        size: u64,
    ) -> Result<AdminListResponse, RequestError> {
        let path = format!("/auth/admin/list?page={}&size={}", wire_page, size);
        self.request_json(HttpMethod::Get, &path, None).await
    }

    /// `POST /auth/admin/create`
    pub async fn create_admin(&self, req: &CreateAdminRequest) -> Result<(), RequestError> {
        let json = serde_json::to_string(req)
            .map_err(|e| RequestError::transport(format!("encoding request: {}", e)))?;
        self.request(HttpMethod::Post, "/auth/admin/create", Some(Body::Json(json)))
            .await?;
        Ok(())
    }

    /// `DELETE /auth/admin/{id}`
    pub async fn delete_admin(&self, id: i64) -> Result<(), RequestError> {
        self.request(HttpMethod::Delete, &format!("/auth/admin/{}", id), None)
            .await?;
        Ok(())
    }

    /// `GET /auth/admin/users?page&size` (wire page is 1-based).
    pub async fn list_users(
        &self,
        wire_page: u64,
        size: u64,
    ) -> Result<UserListResponse, RequestError> {
        let path = format!("/auth/admin/users?page={}&size={}", wire_page, size);
        self.request_json(HttpMethod::Get, &path, None).await
    }

    /// `DELETE /auth/admin/users/{id}`; success is HTTP 204.
    pub async fn delete_user(&self, id: i64) -> Result<(), RequestError> {
        self.request(HttpMethod::Delete, &format!("/auth/admin/users/{}", id), None)
            .await?;
        Ok(())
    }
}

/// Fetch the API client from Leptos context.
pub fn use_api() -> AdminApi {
    use_context::<AdminApi>().expect("AdminApi should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_extracts_string_field() {
        assert_eq!(
            error_detail(r#"{"detail":"admin not found"}"#),
            Some("admin not found".to_string())
        );
    }

    #[test]
    fn error_detail_stringifies_structured_detail() {
        let detail = error_detail(r#"{"detail":{"loc":["header"],"msg":"missing token"}}"#);
        assert!(detail.unwrap().contains("missing token"));
    }

    #[test]
    fn error_detail_falls_back_on_garbage() {
        assert_eq!(error_detail("<html>502</html>"), None);
        assert_eq!(error_detail("null"), None);
    }

    #[test]
    fn login_body_is_form_encoded_password_grant() {
        let body = login_form_body("admin", "p&ss word");
        assert!(body.contains("username=admin"));
        assert!(body.contains("grant_type=password"));
        // Reserved characters must be escaped, not passed through.
        assert!(body.contains("password=p%26ss+word"));
    }

    #[test]
    fn auth_shaped_statuses() {
        let unauthorized = RequestError {
            status: Some(401),
            message: String::new(),
        };
        let server_down = RequestError::transport("connection refused");
        assert!(unauthorized.is_auth_error());
        assert!(!server_down.is_auth_error());
    }
}
