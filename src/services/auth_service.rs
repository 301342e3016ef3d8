use super::api_client::ApiClient;
use super::error::ApiError;
use crate::models::auth::{
    LocationUpdate, LoginRequest, MessageResponse, RegisterRequest, RegisterResponse, TokenResponse,
};
use crate::models::user::UserProfile;

/// Endpoints /auth
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Cambia email/contraseña por un token bearer
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("🔐 [AUTH] Iniciando sesión como {}", email);
        self.client.post("/auth/login", &request).await
    }

    pub async fn register(&self, data: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        log::info!("📝 [AUTH] Registrando {} ({:?})", data.email, data.role);
        self.client.post("/auth/register", data).await
    }

    /// Perfil del dueño del token actual
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.client.get("/auth/me").await
    }

    pub async fn update_location(&self, latitude: f64, longitude: f64) -> Result<(), ApiError> {
        let _: Option<MessageResponse> = self
            .client
            .put("/auth/update-location", &LocationUpdate { latitude, longitude })
            .await?;
        Ok(())
    }
}
