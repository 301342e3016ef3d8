use serde::Serialize;

use super::api_client::ApiClient;
use super::error::ApiError;
use crate::models::auth::MessageResponse;
use crate::models::vehicle::{MileageUpdate, Vehicle};

#[derive(Clone)]
pub struct VehicleService {
    client: ApiClient,
}

impl VehicleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, ApiError> {
        self.client.get("/vehicles/").await
    }

    pub async fn get(&self, id: i64) -> Result<Vehicle, ApiError> {
        self.client.get(&format!("/vehicles/{}", id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, vehicle: &B) -> Result<Vehicle, ApiError> {
        self.client.post("/vehicles/", vehicle).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, changes: &B) -> Result<Vehicle, ApiError> {
        self.client.put(&format!("/vehicles/{}", id), changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<MessageResponse, ApiError> {
        self.client.delete(&format!("/vehicles/{}", id)).await
    }

    pub async fn update_mileage(&self, id: i64, mileage: i64) -> Result<Vehicle, ApiError> {
        self.client
            .put(&format!("/vehicles/{}/mileage", id), &MileageUpdate { mileage })
            .await
    }
}
