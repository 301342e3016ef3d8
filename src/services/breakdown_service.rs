use serde::Serialize;

use super::api_client::ApiClient;
use super::error::ApiError;
use crate::models::breakdown::{Breakdown, StatusUpdate};

pub const DEFAULT_NEARBY_RADIUS_KM: u32 = 10;

#[derive(Clone)]
pub struct BreakdownService {
    client: ApiClient,
}

impl BreakdownService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Breakdown>, ApiError> {
        self.client.get("/breakdowns/").await
    }

    pub async fn get(&self, id: i64) -> Result<Breakdown, ApiError> {
        self.client.get(&format!("/breakdowns/{}", id)).await
    }

    /// Reportar una avería
    pub async fn create<B: Serialize + ?Sized>(&self, report: &B) -> Result<Breakdown, ApiError> {
        self.client.post("/breakdowns/", report).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, changes: &B) -> Result<Breakdown, ApiError> {
        self.client.put(&format!("/breakdowns/{}", id), changes).await
    }

    pub async fn update_status(&self, id: i64, status: &str) -> Result<Breakdown, ApiError> {
        let body = StatusUpdate {
            status: status.to_string(),
        };
        self.client.put(&format!("/breakdowns/{}/status", id), &body).await
    }

    /// Averías cerca de un punto; `radius_km` por defecto 10
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<u32>,
    ) -> Result<Vec<Breakdown>, ApiError> {
        let radius = radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
        self.client
            .get(&format!("/breakdowns/nearby/{}/{}?radius={}", latitude, longitude, radius))
            .await
    }
}
