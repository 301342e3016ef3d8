use serde::Serialize;

use super::api_client::ApiClient;
use super::error::ApiError;
use crate::models::auth::{LocationUpdate, MessageResponse};
use crate::models::provider::{OnlineStatusUpdate, ServiceProvider};

pub const DEFAULT_PROVIDER_RADIUS_KM: u32 = 50;

/// Endpoints /service-providers
#[derive(Clone)]
pub struct ProviderService {
    client: ApiClient,
}

impl ProviderService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn register<B: Serialize + ?Sized>(&self, data: &B) -> Result<ServiceProvider, ApiError> {
        self.client.post("/service-providers/register", data).await
    }

    /// Listado de admin; cada entrada trae su usuario
    pub async fn list(&self) -> Result<Vec<ServiceProvider>, ApiError> {
        self.client.get("/service-providers/").await
    }

    pub async fn profile(&self) -> Result<ServiceProvider, ApiError> {
        self.client.get("/service-providers/profile").await
    }

    pub async fn update_profile<B: Serialize + ?Sized>(
        &self,
        changes: &B,
    ) -> Result<ServiceProvider, ApiError> {
        self.client.put("/service-providers/profile", changes).await
    }

    pub async fn update_location(&self, latitude: f64, longitude: f64) -> Result<MessageResponse, ApiError> {
        self.client
            .put("/service-providers/location", &LocationUpdate { latitude, longitude })
            .await
    }

    pub async fn set_online(&self, is_online: bool) -> Result<MessageResponse, ApiError> {
        self.client
            .put("/service-providers/online-status", &OnlineStatusUpdate { is_online })
            .await
    }

    /// Proveedores cerca de un punto; radio por defecto 50 km, sin filtro de servicio
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<u32>,
        service_type: Option<&str>,
    ) -> Result<Vec<ServiceProvider>, ApiError> {
        let path = format!(
            "/service-providers/nearby/{}/{}?radius={}&service_type={}",
            latitude,
            longitude,
            radius_km.unwrap_or(DEFAULT_PROVIDER_RADIUS_KM),
            service_type.unwrap_or("")
        );
        self.client.get(&path).await
    }
}
