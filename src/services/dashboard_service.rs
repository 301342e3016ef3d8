// ============================================================================
// DASHBOARD SERVICE - loaders compuestos por rol
// ============================================================================
// Cada loader consulta varios endpoints a la vez y espera a todos.
// Las ramas opcionales que fallan quedan como lista vacía: un endpoint caído
// solo deja en blanco su parte del snapshot. Los campos derivados se calculan
// después del join con lo que haya llegado.
// ============================================================================

use std::future::Future;

use super::api_client::ApiClient;
use super::assistance_service::AssistanceService;
use super::breakdown_service::BreakdownService;
use super::error::ApiError;
use super::provider_service::ProviderService;
use super::user_service::UserService;
use super::vehicle_service::VehicleService;
use crate::models::assistance::AssistanceRequest;
use crate::models::breakdown::Breakdown;
use crate::models::dashboard::{
    AccountStatus, ActiveRequestRow, AdminSnapshot, AdminStats, DriverSnapshot, ProviderRow,
    ProviderSnapshot, ProviderStatus, UserRow,
};
use crate::models::provider::ServiceProvider;
use crate::models::user::{UserProfile, UserRole, UserStats};
use crate::models::vehicle::Vehicle;
use crate::state::cancellation::CancellationToken;
use crate::utils::constants::RECENT_ITEMS_LIMIT;

#[derive(Clone)]
pub struct DashboardService {
    users: UserService,
    vehicles: VehicleService,
    breakdowns: BreakdownService,
    assistance: AssistanceService,
    providers: ProviderService,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            users: UserService::new(client.clone()),
            vehicles: VehicleService::new(client.clone()),
            breakdowns: BreakdownService::new(client.clone()),
            assistance: AssistanceService::new(client.clone()),
            providers: ProviderService::new(client),
        }
    }

    /// Usuarios y stats son obligatorios; asistencias y proveedores pueden fallar
    pub async fn admin_snapshot(&self, cancel: &CancellationToken) -> Result<AdminSnapshot, ApiError> {
        log::info!("📊 [DASHBOARD] Cargando dashboard de admin");
        let (users, stats, requests, providers) = futures::join!(
            self.users.list(),
            self.users.stats(),
            or_empty("assistance", self.assistance.list()),
            or_empty("service providers", self.providers.list()),
        );
        let users = users?;
        let stats = stats?;
        ensure_live(cancel)?;

        Ok(build_admin_snapshot(users, &stats, requests, providers))
    }

    pub async fn driver_snapshot(&self, cancel: &CancellationToken) -> Result<DriverSnapshot, ApiError> {
        log::info!("📊 [DASHBOARD] Cargando dashboard de conductor");
        let (vehicles, breakdowns, assistance) = futures::join!(
            or_empty("vehicles", self.vehicles.list()),
            or_empty("breakdowns", self.breakdowns.list()),
            or_empty("assistance", self.assistance.list()),
        );
        ensure_live(cancel)?;

        Ok(build_driver_snapshot(vehicles, breakdowns, assistance))
    }

    pub async fn provider_snapshot(&self, cancel: &CancellationToken) -> Result<ProviderSnapshot, ApiError> {
        log::info!("📊 [DASHBOARD] Cargando dashboard de proveedor");
        let (available, history) = futures::join!(
            or_empty("available requests", self.assistance.available()),
            or_empty("job history", self.assistance.list()),
        );
        ensure_live(cancel)?;

        Ok(build_provider_snapshot(available, history))
    }
}

async fn or_empty<T, F>(branch: &str, request: F) -> Vec<T>
where
    F: Future<Output = Result<Vec<T>, ApiError>>,
{
    match request.await {
        Ok(items) => items,
        Err(e) => {
            log::warn!("⚠️ [DASHBOARD] Falló la rama '{}', se usa lista vacía: {}", branch, e);
            Vec::new()
        }
    }
}

fn ensure_live(cancel: &CancellationToken) -> Result<(), ApiError> {
    if cancel.is_cancelled() {
        Err(ApiError::Cancelled)
    } else {
        Ok(())
    }
}

fn user_row(user: &UserProfile) -> UserRow {
    UserRow {
        id: user.id,
        name: user.full_name(),
        email: user.email.clone(),
        role: user.role,
        status: if user.is_active {
            AccountStatus::Active
        } else {
            AccountStatus::Inactive
        },
        created_at: user.created_at.clone(),
        phone: user.phone.clone(),
    }
}

fn provider_row(provider: &ServiceProvider) -> ProviderRow {
    let owner = provider.user.as_ref();
    let business_name = provider
        .business_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| match owner {
            Some(user) => format!("{}'s Business", user.first_name),
            None => format!("Provider #{}", provider.id),
        });

    let status = if !provider.is_active {
        ProviderStatus::Suspended
    } else if provider.is_verified {
        ProviderStatus::Verified
    } else {
        ProviderStatus::Pending
    };

    ProviderRow {
        id: provider.id,
        user_id: owner.map(|user| user.id).or(provider.user_id),
        business_name,
        contact_name: owner.map(UserProfile::full_name).unwrap_or_default(),
        email: owner.map(|user| user.email.clone()),
        phone: owner.and_then(|user| user.phone.clone()),
        status,
        rating: provider.average_rating.unwrap_or(0.0),
        license: provider.business_license.clone(),
        base_rate: provider.base_rate,
        services: provider.services.clone(),
        documents: provider.documents.clone(),
        completed_jobs: provider.rating_count.unwrap_or(0),
        joined: provider.created_at.clone(),
    }
}

pub fn build_admin_snapshot(
    users: Vec<UserProfile>,
    stats: &UserStats,
    requests: Vec<AssistanceRequest>,
    providers: Vec<ServiceProvider>,
) -> AdminSnapshot {
    let all_users: Vec<UserRow> = users.iter().map(user_row).collect();
    let non_provider_users = all_users
        .iter()
        .filter(|row| row.role != UserRole::ServiceProvider)
        .cloned()
        .collect();
    let active_breakdowns = requests.iter().filter(|r| r.is_active()).count();

    AdminSnapshot {
        users: non_provider_users,
        all_users,
        providers: providers.iter().map(provider_row).collect(),
        requests,
        stats: AdminStats {
            total_users: stats.total_users,
            total_providers: stats.service_providers,
            active_breakdowns,
        },
    }
}

pub fn build_driver_snapshot(
    vehicles: Vec<Vehicle>,
    breakdowns: Vec<Breakdown>,
    assistance: Vec<AssistanceRequest>,
) -> DriverSnapshot {
    let breakdowns: Vec<Breakdown> = breakdowns
        .into_iter()
        .map(|mut breakdown| {
            let status = breakdown.status_or_default().to_string();
            breakdown.status = Some(status);
            breakdown
        })
        .collect();
    let recent_breakdowns = breakdowns.iter().take(RECENT_ITEMS_LIMIT).cloned().collect();

    DriverSnapshot {
        vehicle_count: vehicles.len(),
        breakdown_count: breakdowns.len(),
        assistance_count: assistance.len(),
        vehicles,
        breakdowns,
        assistance,
        recent_breakdowns,
    }
}

fn active_request_row(request: &AssistanceRequest) -> ActiveRequestRow {
    ActiveRequestRow {
        id: request.id,
        requester_id: request.requester_id,
        customer: format!("Customer #{}", request.requester_id),
        service: request.service_type.replace('_', " ").to_uppercase(),
        distance: "Unknown distance".to_string(),
        location: request
            .address
            .clone()
            .filter(|address| !address.trim().is_empty())
            .unwrap_or_else(|| "Unknown Location".to_string()),
        status: request.status.clone(),
        urgency: request
            .priority
            .clone()
            .filter(|priority| !priority.is_empty())
            .unwrap_or_else(|| "medium".to_string()),
        estimated_pay: request.estimated_cost.unwrap_or(0.0),
    }
}

pub fn build_provider_snapshot(
    available: Vec<AssistanceRequest>,
    history: Vec<AssistanceRequest>,
) -> ProviderSnapshot {
    let active_requests: Vec<ActiveRequestRow> = available.iter().map(active_request_row).collect();
    let completed: Vec<&AssistanceRequest> = history.iter().filter(|job| job.is_completed()).collect();
    let earnings: f64 = completed
        .iter()
        .map(|job| job.actual_cost.unwrap_or(0.0))
        .sum();

    ProviderSnapshot {
        pending_requests: active_requests.len(),
        completed_jobs: completed.len(),
        earnings,
        active_requests,
        recent_jobs: history.iter().take(RECENT_ITEMS_LIMIT).cloned().collect(),
        all_jobs: history,
    }
}
