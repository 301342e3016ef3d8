pub mod error;
pub mod transport;
pub mod api_client;
pub mod auth_service;
pub mod user_service;
pub mod vehicle_service;
pub mod breakdown_service;
pub mod assistance_service;
pub mod provider_service;
pub mod dashboard_service;

pub use error::ApiError;
pub use api_client::{ApiClient, SessionExpired};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
pub use auth_service::AuthService;
pub use user_service::UserService;
pub use vehicle_service::VehicleService;
pub use breakdown_service::BreakdownService;
pub use assistance_service::AssistanceService;
pub use provider_service::ProviderService;
pub use dashboard_service::DashboardService;
