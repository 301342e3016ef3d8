use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Estados de asistencia que cuentan como avería abierta
pub const ACTIVE_ASSISTANCE_STATUSES: &[&str] = &["pending", "assigned", "in_progress"];

pub const COMPLETED_STATUS: &str = "completed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistanceRequest {
    pub id: i64,
    #[serde(default)]
    pub requester_id: i64,
    #[serde(default)]
    pub breakdown_id: Option<i64>,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub assigned_provider_id: Option<i64>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub actual_cost: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssistanceRequest {
    pub fn is_active(&self) -> bool {
        ACTIVE_ASSISTANCE_STATUSES.contains(&self.status.as_str())
    }

    pub fn is_completed(&self) -> bool {
        self.status == COMPLETED_STATUS
    }
}
