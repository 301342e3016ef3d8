pub mod cache_store;
pub mod session_store;
pub mod dashboard_store;

pub use cache_store::{CacheEntry, CacheStore, LoadOutcome};
pub use session_store::{AuthFailure, RegisterOutcome, SessionStore};
pub use dashboard_store::DashboardStores;
