use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::UserProfile;

fn default_true() -> bool {
    true
}

/// Proveedor de servicio; el listado de admin trae el usuario dueño
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_license: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub base_rate: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OnlineStatusUpdate {
    pub is_online: bool,
}
