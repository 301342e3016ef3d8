use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::{UserProfile, UserRole};

/// Credencial bearer emitida por el backend
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Rechaza valores vacíos o solo espacios
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Nunca imprimir la credencial
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(***{} chars)", self.0.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Respuesta de POST /auth/login
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: Token,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

/// Claves donde distintos despliegues devuelven el token, en orden de preferencia
const REGISTER_TOKEN_KEYS: [&str; 3] = ["access_token", "accessToken", "token"];

/// Respuesta de POST /auth/register. Algunos despliegues emiten credencial
/// de una vez, otros solo devuelven el usuario creado.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RegisterResponse {
    pub access_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl From<Map<String, Value>> for RegisterResponse {
    fn from(mut body: Map<String, Value>) -> Self {
        let access_token = REGISTER_TOKEN_KEYS
            .iter()
            .filter_map(|key| body.get(*key).and_then(Value::as_str))
            .find(|value| !value.trim().is_empty())
            .map(str::to_string);
        let user = body
            .remove("user")
            .and_then(|user| serde_json::from_value(user).ok());

        Self { access_token, user }
    }
}

impl RegisterResponse {
    pub fn issued_token(&self) -> Option<Token> {
        self.access_token.as_deref().and_then(Token::parse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Acuse simple `{"message": ...}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
