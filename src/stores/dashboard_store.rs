// ============================================================================
// DASHBOARD STORES - un caché por rol, todos alimentados por DashboardService
// ============================================================================

use std::rc::Rc;

use super::cache_store::{CacheStore, LoadOutcome};
use crate::models::dashboard::{AdminSnapshot, DriverSnapshot, ProviderSnapshot};
use crate::services::api_client::ApiClient;
use crate::services::dashboard_service::DashboardService;
use crate::state::cancellation::CancellationToken;
use crate::utils::clock::Clock;

#[derive(Clone)]
pub struct DashboardStores {
    pub admin: CacheStore<AdminSnapshot>,
    pub driver: CacheStore<DriverSnapshot>,
    pub provider: CacheStore<ProviderSnapshot>,
}

impl DashboardStores {
    pub fn new(client: &ApiClient, clock: Rc<dyn Clock>, ttl_ms: i64) -> Self {
        let service = DashboardService::new(client.clone());

        let admin_service = service.clone();
        let admin = CacheStore::new("admin", clock.clone(), ttl_ms, move |cancel| {
            let service = admin_service.clone();
            async move { service.admin_snapshot(&cancel).await }
        });

        let driver_service = service.clone();
        let driver = CacheStore::new("driver", clock.clone(), ttl_ms, move |cancel| {
            let service = driver_service.clone();
            async move { service.driver_snapshot(&cancel).await }
        });

        let provider = CacheStore::new("provider", clock, ttl_ms, move |cancel| {
            let service = service.clone();
            async move { service.provider_snapshot(&cancel).await }
        });

        Self {
            admin,
            driver,
            provider,
        }
    }

    pub async fn load_admin(&self, force: bool, cancel: &CancellationToken) -> LoadOutcome {
        self.admin.load(force, cancel).await
    }

    pub async fn load_driver(&self, force: bool, cancel: &CancellationToken) -> LoadOutcome {
        self.driver.load(force, cancel).await
    }

    pub async fn load_provider(&self, force: bool, cancel: &CancellationToken) -> LoadOutcome {
        self.provider.load(force, cancel).await
    }

    /// Olvida todos los dashboards en caché (logout)
    pub fn reset_all(&self) {
        log::info!("🧹 [DASHBOARD] Limpiando cachés de dashboard");
        self.admin.reset();
        self.driver.reset();
        self.provider.reset();
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::services::transport::Method;
    use crate::stores::cache_store::CacheEntry;
    use crate::test_utils::{api_client_with, assistance_json, user_json, MockTransport};
    use crate::utils::clock::ManualClock;
    use crate::utils::constants::DASHBOARD_CACHE_TTL_MS;

    fn stores(transport: &MockTransport) -> (Rc<ManualClock>, DashboardStores) {
        let clock = Rc::new(ManualClock::new(1_700_000_000_000));
        let client = api_client_with(transport, None);
        let stores = DashboardStores::new(&client, clock.clone(), DASHBOARD_CACHE_TTL_MS);
        (clock, stores)
    }

    fn script_admin(transport: &MockTransport, providers_status: u16) {
        transport.respond_json(
            Method::Get,
            "/users/",
            200,
            json!([user_json(1, "ana@vbams.co", "driver"), user_json(2, "tow@vbams.co", "service_provider")]),
        );
        transport.respond_json(Method::Get, "/users/stats/overview", 200, json!({"total_users": 2}));
        transport.respond_json(Method::Get, "/assistance/", 200, json!([assistance_json(1, "assigned")]));
        if providers_status == 200 {
            transport.respond_json(
                Method::Get,
                "/service-providers/",
                200,
                json!([{"id": 1, "business_name": "Grúas Ya", "is_verified": true}]),
            );
        } else {
            transport.respond_json(Method::Get, "/service-providers/", providers_status, json!({}));
        }
    }

    #[test]
    fn failing_optional_branch_is_not_an_error() {
        let transport = MockTransport::new();
        script_admin(&transport, 500);
        let (_clock, stores) = stores(&transport);

        let outcome = block_on(stores.load_admin(false, &CancellationToken::new()));

        assert_eq!(outcome, LoadOutcome::Loaded);
        let entry = stores.admin.snapshot();
        assert_eq!(entry.error, None);
        let snapshot = entry.data.unwrap();
        assert!(snapshot.providers.is_empty());
        assert_eq!(snapshot.stats.total_users, 2);
        assert_eq!(snapshot.stats.active_breakdowns, 1);
    }

    #[test]
    fn fresh_admin_dashboard_makes_no_requests() {
        let transport = MockTransport::new();
        script_admin(&transport, 200);
        let (clock, stores) = stores(&transport);
        block_on(stores.load_admin(false, &CancellationToken::new()));
        assert_eq!(transport.requests().len(), 4);

        clock.advance(2 * 60 * 1000);
        let outcome = block_on(stores.load_admin(false, &CancellationToken::new()));

        assert_eq!(outcome, LoadOutcome::Fresh);
        assert_eq!(transport.requests().len(), 4);
    }

    #[test]
    fn forced_reload_hits_every_endpoint_again() {
        let transport = MockTransport::new();
        script_admin(&transport, 200);
        script_admin(&transport, 200);
        let (clock, stores) = stores(&transport);
        block_on(stores.load_admin(false, &CancellationToken::new()));

        clock.advance(1000);
        let outcome = block_on(stores.load_admin(true, &CancellationToken::new()));

        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(transport.requests().len(), 8);
        assert_eq!(stores.admin.snapshot().last_updated, clock.now_ms());
    }

    #[test]
    fn required_branch_failure_keeps_previous_snapshot() {
        let transport = MockTransport::new();
        script_admin(&transport, 200);
        transport.respond_json(Method::Get, "/users/", 403, json!({"detail": "Admins only"}));
        transport.respond_json(Method::Get, "/users/stats/overview", 200, json!({}));
        transport.respond_json(Method::Get, "/assistance/", 200, json!([]));
        transport.respond_json(Method::Get, "/service-providers/", 200, json!([]));
        let (_clock, stores) = stores(&transport);
        block_on(stores.load_admin(false, &CancellationToken::new()));
        let first = stores.admin.data();

        let outcome = block_on(stores.load_admin(true, &CancellationToken::new()));

        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(stores.admin.data(), first);
        assert_eq!(stores.admin.error().as_deref(), Some("Admins only"));
    }

    #[test]
    fn cancelled_driver_load_does_not_commit() {
        let transport = MockTransport::new();
        transport.respond_json(Method::Get, "/vehicles/", 200, json!([]));
        transport.respond_json(Method::Get, "/breakdowns/", 200, json!([]));
        transport.respond_json(Method::Get, "/assistance/", 200, json!([]));
        let (_clock, stores) = stores(&transport);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = block_on(stores.load_driver(false, &cancel));

        assert_eq!(outcome, LoadOutcome::Cancelled);
        assert_eq!(stores.driver.snapshot(), CacheEntry::default());
    }

    #[test]
    fn reset_all_empties_every_store() {
        let transport = MockTransport::new();
        transport.respond_json(Method::Get, "/vehicles/", 200, json!([{"id": 1, "make": "Mazda", "model": "3"}]));
        transport.respond_json(Method::Get, "/breakdowns/", 200, json!([]));
        transport.respond_json(Method::Get, "/assistance/", 200, json!([]));
        transport.respond_json(Method::Get, "/assistance/available", 200, json!([]));
        transport.respond_json(Method::Get, "/assistance/", 200, json!([]));
        let (_clock, stores) = stores(&transport);
        let cancel = CancellationToken::new();
        block_on(stores.load_driver(false, &cancel));
        block_on(stores.load_provider(false, &cancel));
        assert!(stores.driver.data().is_some());
        assert!(stores.provider.data().is_some());

        stores.reset_all();

        assert_eq!(stores.admin.snapshot(), CacheEntry::default());
        assert_eq!(stores.driver.snapshot(), CacheEntry::default());
        assert_eq!(stores.provider.snapshot(), CacheEntry::default());
    }
}
