// ============================================================================
// CACHE STORE - contenedor reactivo con TTL alrededor de un loader async
// ============================================================================
// Las cargas solapadas no se fusionan: cada `load` no fresco llama al loader.
// Solo la carga emitida más reciente puede confirmar; una anterior que termine
// después se descarta. También se descarta la carga cuyo token de
// cancelación se disparó antes de terminar.
// ============================================================================

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::services::error::ApiError;
use crate::state::cancellation::CancellationToken;
use crate::state::reactivity::{ReactiveState, Subscription};
use crate::utils::clock::Clock;

const FALLBACK_ERROR: &str = "Failed to load data";

pub type Loader<T> = Rc<dyn Fn(CancellationToken) -> LocalBoxFuture<'static, Result<T, ApiError>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    /// Milisegundos desde epoch de la última carga exitosa, 0 si no hubo
    pub last_updated: i64,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            last_updated: 0,
        }
    }
}

impl<T> CacheEntry<T> {
    pub fn is_stale(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms - self.last_updated >= ttl_ms
    }

    /// Tiene datos lo bastante recientes para no recargar
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        self.data.is_some() && !self.is_stale(now_ms, ttl_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Datos frescos; no pasó nada
    Fresh,
    Loaded,
    Failed,
    /// Se emitió una carga más nueva (o un reset) con esta en vuelo
    Superseded,
    Cancelled,
}

struct CacheInner<T> {
    name: String,
    state: ReactiveState<CacheEntry<T>>,
    loader: Loader<T>,
    clock: Rc<dyn Clock>,
    ttl_ms: i64,
    generation: Cell<u64>,
}

pub struct CacheStore<T> {
    inner: Rc<CacheInner<T>>,
}

impl<T> Clone for CacheStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> CacheStore<T> {
    pub fn new<F, Fut>(name: impl Into<String>, clock: Rc<dyn Clock>, ttl_ms: i64, loader: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let loader: Loader<T> = Rc::new(move |cancel| loader(cancel).boxed_local());
        Self {
            inner: Rc::new(CacheInner {
                name: name.into(),
                state: ReactiveState::new(CacheEntry::default()),
                loader,
                clock,
                ttl_ms,
                generation: Cell::new(0),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn snapshot(&self) -> CacheEntry<T> {
        self.inner.state.get()
    }

    pub fn data(&self) -> Option<T> {
        self.inner.state.with(|entry| entry.data.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.with(|entry| entry.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.with(|entry| entry.error.clone())
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&CacheEntry<T>) + 'static,
    {
        self.inner.state.subscribe(callback)
    }

    pub fn is_stale(&self) -> bool {
        let now = self.inner.clock.now_ms();
        self.inner.state.with(|entry| entry.is_stale(now, self.inner.ttl_ms))
    }

    /// Recarga salvo que los datos estén frescos; `force` siempre recarga.
    /// Los datos previos siguen visibles mientras carga y tras un fallo.
    pub async fn load(&self, force: bool, cancel: &CancellationToken) -> LoadOutcome {
        let inner = &self.inner;
        let now = inner.clock.now_ms();
        if !force && inner.state.with(|entry| entry.is_fresh(now, inner.ttl_ms)) {
            log::debug!("📋 [{}] Caché fresco, no se recarga", inner.name);
            return LoadOutcome::Fresh;
        }

        let generation = inner.generation.get() + 1;
        inner.generation.set(generation);
        inner.state.update(|entry| {
            entry.loading = true;
            entry.error = None;
        });

        let result = (inner.loader)(cancel.clone()).await;

        if inner.generation.get() != generation {
            log::debug!("🔁 [{}] Carga reemplazada por otra más nueva, se descarta", inner.name);
            return LoadOutcome::Superseded;
        }
        if cancel.is_cancelled() || matches!(result, Err(ApiError::Cancelled)) {
            log::info!("🛑 [{}] Carga cancelada, resultado descartado", inner.name);
            inner.state.update(|entry| entry.loading = false);
            return LoadOutcome::Cancelled;
        }

        match result {
            Ok(data) => {
                inner.state.set(CacheEntry {
                    data: Some(data),
                    loading: false,
                    error: None,
                    last_updated: inner.clock.now_ms(),
                });
                log::info!("✅ [{}] Datos cargados", inner.name);
                LoadOutcome::Loaded
            }
            Err(e) => {
                let message = normalize_error(&e);
                log::error!("❌ [{}] Error cargando: {}", inner.name, message);
                inner.state.update(|entry| {
                    entry.loading = false;
                    entry.error = Some(message);
                });
                LoadOutcome::Failed
            }
        }
    }

    /// Vuelve al estado vacío; las cargas en vuelo no confirmarán
    pub fn reset(&self) {
        let inner = &self.inner;
        inner.generation.set(inner.generation.get() + 1);
        inner.state.set(CacheEntry::default());
    }
}

fn normalize_error(error: &ApiError) -> String {
    let message = error.user_message();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}
