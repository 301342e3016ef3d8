use serde::{Deserialize, Serialize};

use super::assistance::AssistanceRequest;
use super::breakdown::Breakdown;
use super::user::UserRole;
use super::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Suspended,
    Verified,
    Pending,
}

/// Fila de usuario en las tablas de admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub created_at: Option<String>,
    pub phone: Option<String>,
}

/// Fila de proveedor en las tablas de admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub business_name: String,
    pub contact_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ProviderStatus,
    pub rating: f64,
    pub license: Option<String>,
    pub base_rate: Option<f64>,
    pub services: Vec<String>,
    pub documents: Vec<String>,
    pub completed_jobs: u32,
    pub joined: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_providers: u64,
    pub active_breakdowns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSnapshot {
    /// Todos menos los proveedores de servicio
    pub users: Vec<UserRow>,
    pub all_users: Vec<UserRow>,
    pub providers: Vec<ProviderRow>,
    pub requests: Vec<AssistanceRequest>,
    pub stats: AdminStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub breakdowns: Vec<Breakdown>,
    pub assistance: Vec<AssistanceRequest>,
    pub vehicle_count: usize,
    pub breakdown_count: usize,
    pub assistance_count: usize,
    pub recent_breakdowns: Vec<Breakdown>,
}

/// Solicitud abierta tal como la ve el proveedor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRequestRow {
    pub id: i64,
    pub requester_id: i64,
    pub customer: String,
    pub service: String,
    pub distance: String,
    pub location: String,
    pub status: String,
    pub urgency: String,
    pub estimated_pay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSnapshot {
    pub pending_requests: usize,
    pub completed_jobs: usize,
    pub earnings: f64,
    pub active_requests: Vec<ActiveRequestRow>,
    pub all_jobs: Vec<AssistanceRequest>,
    pub recent_jobs: Vec<AssistanceRequest>,
}
