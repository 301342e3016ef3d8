use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Fallo de una llamada a la API, según hasta dónde llegó el request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Sin respuesta: falla de conexión o timeout del cliente
    #[error("Network error: {0}")]
    Network(String),
    /// 401, la sesión ya no es válida
    #[error("Request failed with status code {status}")]
    Auth { status: u16, detail: Option<String> },
    /// Otro 4xx, el request fue rechazado
    #[error("Request failed with status code {status}")]
    Validation { status: u16, detail: Option<String> },
    /// 5xx
    #[error("Request failed with status code {status}")]
    Server { status: u16, detail: Option<String> },
    #[error("Parse error: {0}")]
    Decode(String),
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = ErrorBody::parse(body).and_then(ErrorBody::into_message);
        match status {
            401 => ApiError::Auth { status, detail },
            400..=499 => ApiError::Validation { status, detail },
            _ => ApiError::Server { status, detail },
        }
    }

    pub fn timeout(ms: u32) -> Self {
        ApiError::Network(format!("timeout of {}ms exceeded", ms))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Texto legible que mandó el servidor, si hay
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Auth { detail, .. }
            | ApiError::Validation { detail, .. }
            | ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// Detalle del servidor si existe, si no `fallback`
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// Detalle del servidor, o la descripción del propio error
    pub fn user_message(&self) -> String {
        match self.detail() {
            Some(detail) => detail.to_string(),
            None => self.to_string(),
        }
    }
}

/// Formas de error del backend: `{"detail": "..."}`, listas de validación
/// de FastAPI `{"detail": [{"msg": "..."}]}` o `{"message": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    fn into_message(self) -> Option<String> {
        let from_detail = match self.detail {
            Some(Value::String(text)) => Some(text),
            Some(Value::Array(items)) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        from_detail
            .or(self.message)
            .filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert!(ApiError::from_status(401, "").is_auth());
        assert!(matches!(
            ApiError::from_status(422, "{}"),
            ApiError::Validation { status: 422, .. }
        ));
        assert!(matches!(
            ApiError::from_status(403, "{}"),
            ApiError::Validation { status: 403, .. }
        ));
        assert!(matches!(
            ApiError::from_status(503, "gateway down"),
            ApiError::Server { status: 503, detail: None }
        ));
    }

    #[test]
    fn reads_string_detail() {
        let err = ApiError::from_status(401, r#"{"detail":"Invalid credentials"}"#);
        assert_eq!(err.detail(), Some("Invalid credentials"));
        assert_eq!(err.detail_or("Login failed"), "Invalid credentials");
    }

    #[test]
    fn flattens_validation_list() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"},{"msg":"bad phone"}]}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.detail(), Some("field required; bad phone"));
    }

    #[test]
    fn falls_back_to_message_field() {
        let err = ApiError::from_status(400, r#"{"message":"Email already registered"}"#);
        assert_eq!(err.detail(), Some("Email already registered"));
    }

    #[test]
    fn user_message_without_detail_uses_description() {
        let err = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(err.user_message(), "Request failed with status code 500");
        assert_eq!(ApiError::timeout(10_000).user_message(), "Network error: timeout of 10000ms exceeded");
    }
}
