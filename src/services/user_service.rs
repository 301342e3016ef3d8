use super::api_client::ApiClient;
use super::error::ApiError;
use crate::models::auth::MessageResponse;
use crate::models::user::{ProfileUpdate, UserProfile, UserStats};

/// Endpoints /users (listado y stats solo para admin en el servidor)
#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.client.get("/users/").await
    }

    pub async fn get(&self, id: i64) -> Result<UserProfile, ApiError> {
        self.client.get(&format!("/users/{}", id)).await
    }

    pub async fn stats(&self) -> Result<UserStats, ApiError> {
        self.client.get("/users/stats/overview").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.client.put("/users/profile", update).await
    }

    pub async fn activate(&self, id: i64) -> Result<MessageResponse, ApiError> {
        self.client.put_empty(&format!("/users/{}/activate", id)).await
    }

    pub async fn deactivate(&self, id: i64) -> Result<MessageResponse, ApiError> {
        self.client.put_empty(&format!("/users/{}/deactivate", id)).await
    }
}
