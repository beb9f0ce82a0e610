//! HTTP client for the admin API.
//!
//! A thin fetch/JSON wrapper with no internal state machine: non-2xx
//! responses become [`ApiError::Status`], JSON bodies are decoded, other
//! content comes back as raw text. Failures are logged and propagated,
//! never retried.

use serde::{Deserialize, Serialize};

/// Base URL every request is resolved against.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// System settings resource, camelCase on the wire.
///
/// Every field is optional so a partial update serializes only the fields
/// it touches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_rule: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_rule: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_log: Option<bool>,
}

/// Password-change request body.
///
/// The confirmation field always mirrors the new password; any
/// form-level mismatch check happens before this type is built.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    #[must_use]
    pub fn new(old_password: &str, new_password: &str) -> Self {
        Self {
            old_password: old_password.to_owned(),
            new_password: new_password.to_owned(),
            confirm_password: new_password.to_owned(),
        }
    }
}

/// Decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiPayload {
    Json(serde_json::Value),
    Text(String),
}

/// Failures surfaced by [`ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered outside the 2xx range.
    #[error("request failed with HTTP status {0}")]
    Status(u16),
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body could not be decoded.
    #[error("invalid response payload: {0}")]
    Decode(String),
}

#[cfg(target_arch = "wasm32")]
mod client {
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit};

    use super::{ApiError, ApiPayload, DEFAULT_BASE_URL, PasswordChange, Settings};
    use crate::dom;

    /// Client for the settings and user resource groups.
    pub struct ApiClient {
        base_url: String,
    }

    impl Default for ApiClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
    impl ApiClient {
        #[must_use]
        pub fn new() -> Self {
            Self {
                base_url: DEFAULT_BASE_URL.to_owned(),
            }
        }

        #[must_use]
        pub fn with_base_url(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
            }
        }

        /// GET `/settings`.
        ///
        /// # Errors
        /// Propagates transport failures, non-2xx statuses, and bodies
        /// that do not decode as a settings object.
        pub async fn settings_get(&self) -> Result<Settings, ApiError> {
            match self.request("/settings", "GET", None).await? {
                ApiPayload::Json(value) => {
                    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
                }
                ApiPayload::Text(text) => {
                    Err(ApiError::Decode(format!("expected JSON settings, got: {text}")))
                }
            }
        }

        /// POST `/settings` with a partial or full settings body.
        ///
        /// # Errors
        /// Propagates transport failures and non-2xx statuses.
        pub async fn settings_update(&self, settings: &Settings) -> Result<ApiPayload, ApiError> {
            let body = serde_json::to_string(settings)
                .map_err(|err| ApiError::Decode(err.to_string()))?;
            self.request("/settings", "POST", Some(body)).await
        }

        /// POST `/user/change-password`.
        ///
        /// # Errors
        /// Propagates transport failures and non-2xx statuses (a wrong
        /// old password surfaces as one of the latter).
        pub async fn change_password(
            &self,
            old_password: &str,
            new_password: &str,
        ) -> Result<ApiPayload, ApiError> {
            let body = serde_json::to_string(&PasswordChange::new(old_password, new_password))
                .map_err(|err| ApiError::Decode(err.to_string()))?;
            self.request("/user/change-password", "POST", Some(body)).await
        }

        async fn request(
            &self,
            endpoint: &str,
            method: &str,
            body: Option<String>,
        ) -> Result<ApiPayload, ApiError> {
            let result = self.dispatch(endpoint, method, body).await;
            if let Err(err) = &result {
                log::error!("API request to {endpoint} failed: {err}");
            }
            result
        }

        async fn dispatch(
            &self,
            endpoint: &str,
            method: &str,
            body: Option<String>,
        ) -> Result<ApiPayload, ApiError> {
            let url = format!("{}{endpoint}", self.base_url);
            let init = RequestInit::new();
            init.set_method(method);
            let headers = Headers::new().map_err(to_network)?;
            headers
                .set("Content-Type", "application/json")
                .map_err(to_network)?;
            init.set_headers(&headers);
            if let Some(body) = body {
                init.set_body(&JsValue::from_str(&body));
            }
            let request = Request::new_with_str_and_init(&url, &init).map_err(to_network)?;
            let response = dom::fetch(&request).await.map_err(to_network)?;
            if !response.ok() {
                return Err(ApiError::Status(response.status()));
            }

            let content_type = response
                .headers()
                .get("content-type")
                .ok()
                .flatten()
                .unwrap_or_default();
            if content_type.contains("application/json") {
                let promise = response.json().map_err(to_network)?;
                let value = JsFuture::from(promise).await.map_err(to_network)?;
                let json: serde_json::Value = serde_wasm_bindgen::from_value(value)
                    .map_err(|err| ApiError::Decode(err.to_string()))?;
                Ok(ApiPayload::Json(json))
            } else {
                let promise = response.text().map_err(to_network)?;
                let value = JsFuture::from(promise).await.map_err(to_network)?;
                Ok(ApiPayload::Text(value.as_string().unwrap_or_default()))
            }
        }
    }

    fn to_network(err: JsValue) -> ApiError {
        ApiError::Network(dom::js_error_message(&err))
    }
}

#[cfg(target_arch = "wasm32")]
pub use client::ApiClient;
