use serde::Serialize;

use super::api_client::ApiClient;
use super::error::ApiError;
use crate::models::assistance::AssistanceRequest;

#[derive(Clone)]
pub struct AssistanceService {
    client: ApiClient,
}

impl AssistanceService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Solicitudes visibles para el llamador (propias, trabajos propios o todas si es admin)
    pub async fn list(&self) -> Result<Vec<AssistanceRequest>, ApiError> {
        self.client.get("/assistance/").await
    }

    /// Solicitudes sin asignar que un proveedor puede tomar
    pub async fn available(&self) -> Result<Vec<AssistanceRequest>, ApiError> {
        self.client.get("/assistance/available").await
    }

    pub async fn get(&self, id: i64) -> Result<AssistanceRequest, ApiError> {
        self.client.get(&format!("/assistance/{}", id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, request: &B) -> Result<AssistanceRequest, ApiError> {
        self.client.post("/assistance/", request).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: i64,
        changes: &B,
    ) -> Result<AssistanceRequest, ApiError> {
        self.client.put(&format!("/assistance/{}", id), changes).await
    }

    pub async fn accept(&self, id: i64) -> Result<AssistanceRequest, ApiError> {
        log::info!("🚚 [ASSISTANCE] Aceptando solicitud {}", id);
        self.client.put_empty(&format!("/assistance/{}/accept", id)).await
    }

    pub async fn reject(&self, id: i64) -> Result<AssistanceRequest, ApiError> {
        self.client.put_empty(&format!("/assistance/{}/reject", id)).await
    }

    pub async fn complete<B: Serialize + ?Sized>(
        &self,
        id: i64,
        completion: &B,
    ) -> Result<AssistanceRequest, ApiError> {
        log::info!("✅ [ASSISTANCE] Completando solicitud {}", id);
        self.client.put(&format!("/assistance/{}/complete", id), completion).await
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::services::transport::Method;
    use crate::test_utils::{api_client_with, assistance_json, MockTransport};

    #[test]
    fn accept_is_a_bodyless_put() {
        let transport = MockTransport::new();
        transport.respond_json(Method::Put, "/assistance/12/accept", 200, assistance_json(12, "assigned"));
        let service = AssistanceService::new(api_client_with(&transport, None));

        let accepted = block_on(service.accept(12)).unwrap();

        assert!(accepted.is_active());
        let sent = &transport.requests()[0];
        assert_eq!(sent.body, None);
        assert_eq!(sent.header("Content-Type"), None);
    }

    #[test]
    fn complete_carries_final_cost() {
        let transport = MockTransport::new();
        let mut done = assistance_json(12, "completed");
        done["actual_cost"] = json!(150.0);
        transport.respond_json(Method::Put, "/assistance/12/complete", 200, done);
        let service = AssistanceService::new(api_client_with(&transport, None));

        let completed = block_on(service.complete(12, &json!({"actual_cost": 150.0}))).unwrap();

        assert!(completed.is_completed());
        assert_eq!(completed.actual_cost, Some(150.0));
    }

    #[test]
    fn rejected_accept_surfaces_validation_detail() {
        let transport = MockTransport::new();
        transport.respond_json(
            Method::Put,
            "/assistance/12/accept",
            400,
            json!({"detail": "Request already assigned"}),
        );
        let service = AssistanceService::new(api_client_with(&transport, None));

        let error = block_on(service.accept(12)).unwrap_err();
        assert_eq!(error.detail(), Some("Request already assigned"));
        assert!(matches!(error, ApiError::Validation { status: 400, .. }));
    }
}
