//! HTTP bindings for the content and admin API.
//!
//! Thin wrappers over `window.fetch`. Errors are returned as display strings,
//! ready for a toast. Every request sends same-origin credentials so the
//! session cookie set by `/api/login` travels with admin calls.

use folio_core::{Profile, ProfileUpdate, Project, ProjectInput, UploadKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, RequestCredentials, RequestInit, Response};

// =============================================================================
// Public content
// =============================================================================

/// Fetch the site profile; `None` until the owner saves one.
pub async fn get_profile() -> Result<Option<Profile>, String> {
    request("GET", "/api/profile", Body::Empty).await
}

/// Fetch all projects, newest first.
pub async fn list_projects() -> Result<Vec<Project>, String> {
    request("GET", "/api/projects", Body::Empty).await
}

// =============================================================================
// Session
// =============================================================================

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(serde::Deserialize)]
struct SessionStatus {
    authenticated: bool,
}

#[derive(serde::Deserialize)]
struct UploadedFile {
    url: String,
}

/// Sign in as the site admin. The server answers with a session cookie.
pub async fn login(email: &str, password: &str) -> Result<(), String> {
    let body = to_json(&Credentials { email, password })?;
    request::<serde::de::IgnoredAny>("POST", "/api/login", Body::Json(body))
        .await
        .map(|_| ())
}

/// End the current session.
pub async fn logout() -> Result<(), String> {
    request::<serde::de::IgnoredAny>("POST", "/api/logout", Body::Empty)
        .await
        .map(|_| ())
}

/// Whether the browser holds a valid admin session.
pub async fn session_status() -> Result<bool, String> {
    request::<SessionStatus>("GET", "/api/session", Body::Empty)
        .await
        .map(|status| status.authenticated)
}

// =============================================================================
// Admin
// =============================================================================

/// Create or replace the profile.
pub async fn save_profile(update: &ProfileUpdate) -> Result<Profile, String> {
    request("PUT", "/api/admin/profile", Body::Json(to_json(update)?)).await
}

/// Create a project.
pub async fn create_project(input: &ProjectInput) -> Result<Project, String> {
    request("POST", "/api/admin/projects", Body::Json(to_json(input)?)).await
}

/// Replace a project's editable fields.
pub async fn update_project(id: &str, input: &ProjectInput) -> Result<Project, String> {
    let path = project_path(id);
    request("PUT", &path, Body::Json(to_json(input)?)).await
}

/// Delete a project. Deleting a missing project succeeds.
pub async fn delete_project(id: &str) -> Result<(), String> {
    request::<serde::de::IgnoredAny>("DELETE", &project_path(id), Body::Empty)
        .await
        .map(|_| ())
}

/// Upload a file and return its public URL.
pub async fn upload_file(file: &web_sys::File, kind: UploadKind) -> Result<String, String> {
    let form = FormData::new().map_err(|e| js_error(&e, "Could not build upload form"))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| js_error(&e, "Could not attach file"))?;
    form.append_with_str("fileType", &kind.to_string())
        .map_err(|e| js_error(&e, "Could not attach file type"))?;

    request::<UploadedFile>("POST", "/api/upload", Body::Form(form))
        .await
        .map(|uploaded| uploaded.url)
}

fn project_path(id: &str) -> String {
    format!("/api/admin/projects/{id}")
}

// =============================================================================
// Transport
// =============================================================================

enum Body {
    Empty,
    Json(String),
    Form(FormData),
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to encode request: {e}"))
}

async fn request<T: DeserializeOwned>(method: &str, path: &str, body: Body) -> Result<T, String> {
    let window = web_sys::window().ok_or_else(|| "No browser window".to_string())?;

    let init = RequestInit::new();
    init.set_method(method);
    init.set_credentials(RequestCredentials::SameOrigin);
    match body {
        Body::Empty => {}
        Body::Json(json) => {
            let headers = Headers::new().map_err(|e| js_error(&e, "Could not build headers"))?;
            headers
                .set("Content-Type", "application/json")
                .map_err(|e| js_error(&e, "Could not build headers"))?;
            init.set_headers(&headers);
            init.set_body(&JsValue::from_str(&json));
        }
        // the browser writes the multipart boundary header itself
        Body::Form(form) => init.set_body(&form),
    }

    let response = JsFuture::from(window.fetch_with_str_and_init(path, &init))
        .await
        .map_err(|e| js_error(&e, "Network error"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "Unexpected fetch result".to_string())?;

    let body = match response.json() {
        Ok(promise) => JsFuture::from(promise).await,
        Err(e) => Err(e),
    };

    if !response.ok() {
        let message = failure_message(
            response.status(),
            body.ok()
                .and_then(|b| serde_wasm_bindgen::from_value::<ErrorBody>(b).ok())
                .map(|b| b.error),
        );
        leptos::logging::error!("{} {} failed: {}", method, path, message);
        return Err(message);
    }

    let body = body.map_err(|e| js_error(&e, "Invalid JSON response"))?;
    serde_wasm_bindgen::from_value(body).map_err(|e| {
        let msg = format!("Failed to decode {path}: {e}");
        leptos::logging::error!("{}", msg);
        msg
    })
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// The server's `{"error"}` message, or a status line when the body had
/// none (proxy errors, body-limit rejections).
fn failure_message(status: u16, server_message: Option<String>) -> String {
    server_message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| match status {
            401 => "Unauthorized".to_string(),
            413 => "File is too large".to_string(),
            _ => format!("Request failed with status {status}"),
        })
}

fn js_error(value: &JsValue, fallback: &str) -> String {
    value.as_string().unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_prefers_server_text() {
        assert_eq!(
            failure_message(400, Some("Title is required".to_string())),
            "Title is required"
        );
        assert_eq!(failure_message(401, None), "Unauthorized");
        assert_eq!(failure_message(413, Some(" ".to_string())), "File is too large");
        assert_eq!(failure_message(502, None), "Request failed with status 502");
    }

    #[test]
    fn test_request_bodies_use_api_field_names() {
        let json = to_json(&ProjectInput {
            title: "Folio".to_string(),
            github_url: Some("https://github.com/me/folio".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(json.contains(r#""githubUrl":"https://github.com/me/folio""#));

        let json = to_json(&Credentials {
            email: "admin@folio.dev",
            password: "secret",
        })
        .unwrap();
        assert_eq!(json, r#"{"email":"admin@folio.dev","password":"secret"}"#);
    }

    #[test]
    fn test_project_path() {
        assert_eq!(project_path("p-1"), "/api/admin/projects/p-1");
    }
}
