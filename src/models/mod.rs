pub mod auth;
pub mod user;
pub mod vehicle;
pub mod breakdown;
pub mod assistance;
pub mod provider;
pub mod dashboard;

pub use auth::{LoginRequest, RegisterRequest, RegisterResponse, Token, TokenResponse};
pub use user::{UserProfile, UserRole, UserStats};
pub use vehicle::Vehicle;
pub use breakdown::Breakdown;
pub use assistance::AssistanceRequest;
pub use provider::ServiceProvider;
pub use dashboard::{AdminSnapshot, DriverSnapshot, ProviderSnapshot};
