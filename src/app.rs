// ============================================================================
// APP CONTEXT - dueño del cliente, la sesión y los cachés de dashboard
// ============================================================================
// Todo se conecta aquí de forma explícita; nada se registra al importarse.
// Un logout (explícito o por un 401) vacía todos los cachés de dashboard.
// ============================================================================

use std::rc::Rc;

use crate::config::ApiConfig;
use crate::services::api_client::{ApiClient, SessionExpired};
use crate::services::transport::Transport;
use crate::state::reactivity::Subscription;
use crate::stores::cache_store::LoadOutcome;
use crate::stores::dashboard_store::DashboardStores;
use crate::stores::session_store::SessionStore;
use crate::utils::clock::Clock;
use crate::utils::storage::{MemoryStorage, TokenStorage, TokenVault};

pub struct AppContext {
    config: ApiConfig,
    client: ApiClient,
    session: SessionStore,
    dashboards: DashboardStores,
    _reset_on_logout: Subscription,
}

impl AppContext {
    pub fn new(
        config: ApiConfig,
        transport: Rc<dyn Transport>,
        storage: Option<Rc<dyn TokenStorage>>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        if storage.is_none() {
            log::warn!("⚠️ [APP] Sin almacenamiento disponible, el login no podrá guardar el token");
        }
        let vault = TokenVault::new(storage, config.token_storage_key.clone());
        let client = ApiClient::new(&config, transport, vault);
        let session = SessionStore::new(&client);
        let dashboards = DashboardStores::new(&client, clock, config.cache_ttl_ms);

        let caches = dashboards.clone();
        let reset_on_logout = session.subscribe(move |state| {
            if state.token.is_none() {
                caches.reset_all();
            }
        });

        Self {
            config,
            client,
            session,
            dashboards,
            _reset_on_logout: reset_on_logout,
        }
    }

    /// fetch + localStorage + reloj del sistema
    #[cfg(target_arch = "wasm32")]
    pub fn browser(config: ApiConfig) -> Self {
        use crate::services::transport::GlooTransport;
        use crate::utils::clock::SystemClock;
        use crate::utils::storage::BrowserStorage;

        let storage = BrowserStorage::detect().map(|s| Rc::new(s) as Rc<dyn TokenStorage>);
        Self::new(config, Rc::new(GlooTransport), storage, Rc::new(SystemClock))
    }

    /// Token en memoria: dura lo que dura el proceso
    pub fn in_memory(config: ApiConfig, transport: Rc<dyn Transport>, clock: Rc<dyn Clock>) -> Self {
        let storage: Rc<dyn TokenStorage> = Rc::new(MemoryStorage::new());
        Self::new(config, transport, Some(storage), clock)
    }

    /// reqwest + token en memoria
    #[cfg(not(target_arch = "wasm32"))]
    pub fn native(config: ApiConfig) -> Self {
        use crate::services::transport::ReqwestTransport;
        use crate::utils::clock::SystemClock;

        Self::in_memory(config, Rc::new(ReqwestTransport::new()), Rc::new(SystemClock))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn dashboards(&self) -> &DashboardStores {
        &self.dashboards
    }

    /// Para que el host redirija al login
    pub fn on_session_expired<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionExpired) + 'static,
    {
        self.client.on_session_expired(callback)
    }

    pub async fn load_admin_dashboard(&self, force: bool) -> LoadOutcome {
        let cancel = self.session.cancellation();
        self.dashboards.load_admin(force, &cancel).await
    }

    pub async fn load_driver_dashboard(&self, force: bool) -> LoadOutcome {
        let cancel = self.session.cancellation();
        self.dashboards.load_driver(force, &cancel).await
    }

    pub async fn load_provider_dashboard(&self, force: bool) -> LoadOutcome {
        let cancel = self.session.cancellation();
        self.dashboards.load_provider(force, &cancel).await
    }
}
