// ============================================================================
// API CLIENT - pipeline compartido de request/response
// ============================================================================
// Request: base URL + token bearer del storage.
// Response: clasificación por status; un 401 borra el token guardado y
// emite `SessionExpired`, y aun así devuelve el error al llamador.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::ApiConfig;
use crate::state::reactivity::{Emitter, Subscription};
use crate::utils::storage::TokenVault;

/// Se emite una vez por cada respuesta 401
#[derive(Debug, Clone, PartialEq)]
pub struct SessionExpired {
    pub method: Method,
    pub path: String,
}

/// Pipeline HTTP compartido; los clones comparten transport, vault y listeners
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    timeout_ms: u32,
    transport: Rc<dyn Transport>,
    vault: TokenVault,
    expired: Rc<Emitter<SessionExpired>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, transport: Rc<dyn Transport>, vault: TokenVault) -> Self {
        let base_url = config.base_url().trim_end_matches('/').to_string();
        log::info!(
            "🌐 [API] URL base: {} ({})",
            base_url,
            config.environment.as_str()
        );
        Self {
            base_url: Rc::from(base_url),
            timeout_ms: config.request_timeout_ms,
            transport,
            vault,
            expired: Rc::new(Emitter::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn vault(&self) -> &TokenVault {
        &self.vault
    }

    /// Aviso de sesión invalidada; la navegación la decide el host
    pub fn on_session_expired<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionExpired) + 'static,
    {
        self.expired.subscribe(callback)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::Get, path, None).await?;
        decode(&response)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::Post, path, Some(encode(body)?)).await?;
        decode(&response)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::Put, path, Some(encode(body)?)).await?;
        decode(&response)
    }

    /// PUT sin body (acciones tipo aceptar/rechazar)
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::Put, path, None).await?;
        decode(&response)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::Delete, path, None).await?;
        decode(&response)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(method, path, body);
        let response = self.transport.send(request).await?;
        self.intercept_response(method, path, response)
    }

    fn build_request(&self, method: Method, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.vault.read() {
            headers.push(("Authorization".to_string(), token.bearer_header()));
        }

        HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
            timeout_ms: self.timeout_ms,
        }
    }

    fn intercept_response(
        &self,
        method: Method,
        path: &str,
        response: HttpResponse,
    ) -> Result<HttpResponse, ApiError> {
        if response.ok() {
            return Ok(response);
        }

        let error = ApiError::from_status(response.status, &response.body);
        if error.is_auth() {
            log::warn!("🔒 [API] 401 en {} {}, borrando sesión guardada", method.as_str(), path);
            self.vault.erase();
            self.expired.emit(&SessionExpired {
                method,
                path: path.to_string(),
            });
        } else {
            log::error!("❌ [API] {} {} falló: {}", method.as_str(), path, error);
        }
        Err(error)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(format!("Serialization error: {}", e)))
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    // 204 y bodies vacíos se decodifican como null (sirve para `()` y `Option<_>`)
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
