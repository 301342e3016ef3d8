use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_BREAKDOWN_STATUS: &str = "reported";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub id: i64,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    /// Falta en averías recién reportadas por backends viejos
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Breakdown {
    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_BREAKDOWN_STATUS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: String,
}
