// ============================================================================
// SESSION STORE - máquina de estados de autenticación
// ============================================================================
// Anonymous -> Authenticating -> Authenticated, y de vuelta a Anonymous con
// `logout`. Cualquier 401 que vea el ApiClient termina la sesión aquí.
// Un logout que realmente cierra la sesión cancela su CancellationToken:
// el trabajo iniciado bajo la sesión anterior nunca se confirma.
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::models::auth::{RegisterRequest, Token};
use crate::models::user::UserProfile;
use crate::services::api_client::ApiClient;
use crate::services::auth_service::AuthService;
use crate::services::error::ApiError;
use crate::state::cancellation::CancellationToken;
use crate::state::reactivity::{ReactiveState, Subscription};
use crate::state::session_state::{Session, SessionPhase};
use crate::utils::storage::TokenVault;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const LOCATION_UPDATE_FAILED: &str = "Location update failed";
const NOT_AUTHENTICATED: &str = "Not authenticated";
const SESSION_ENDED: &str = "Session ended before sign-in completed";

/// Error mostrado a la UI por las operaciones de sesión
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
}

impl AuthFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn from_api(error: &ApiError, fallback: &str) -> Self {
        Self::new(error.detail_or(fallback))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// El backend emitió credencial y el perfil quedó cargado
    SessionEstablished,
    /// Cuenta creada; falta hacer login
    AccountCreated,
}

struct SessionInner {
    auth: AuthService,
    vault: TokenVault,
    state: ReactiveState<Session>,
    cancel: RefCell<CancellationToken>,
    expired: RefCell<Option<Subscription>>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

impl SessionStore {
    pub fn new(client: &ApiClient) -> Self {
        let inner = Rc::new(SessionInner {
            auth: AuthService::new(client.clone()),
            vault: client.vault().clone(),
            state: ReactiveState::new(Session::anonymous()),
            cancel: RefCell::new(CancellationToken::new()),
            expired: RefCell::new(None),
        });

        let weak: Weak<SessionInner> = Rc::downgrade(&inner);
        let subscription = client.on_session_expired(move |event| {
            if let Some(inner) = weak.upgrade() {
                log::warn!("🔒 [SESSION] Sesión expirada ({} {})", event.method.as_str(), event.path);
                SessionStore { inner }.logout();
            }
        });
        *inner.expired.borrow_mut() = Some(subscription);

        Self { inner }
    }

    // ========================================================================
    // Lecturas
    // ========================================================================

    pub fn snapshot(&self) -> Session {
        self.inner.state.get()
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.state.with(Session::phase)
    }

    pub fn token(&self) -> Option<Token> {
        self.inner.state.with(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.state.with(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.with(|s| s.is_authenticated)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Session) + 'static,
    {
        self.inner.state.subscribe(callback)
    }

    /// Token ligado a la sesión actual; lo cancela el próximo logout efectivo
    pub fn cancellation(&self) -> CancellationToken {
        self.inner.cancel.borrow().clone()
    }

    // ========================================================================
    // Transiciones
    // ========================================================================

    /// Restaura la sesión guardada. El token se da por válido hasta que
    /// /auth/me responda; si falla, logout.
    pub async fn hydrate(&self) {
        let Some(token) = self.inner.vault.read() else {
            log::info!("👤 [SESSION] No hay sesión guardada");
            return;
        };

        log::info!("🔄 [SESSION] Restaurando sesión guardada");
        self.inner.state.set(Session {
            token: Some(token),
            user: None,
            is_authenticated: true,
        });
        let cancel = self.cancellation();

        let result = self.inner.auth.me().await;
        if cancel.is_cancelled() {
            log::debug!("🛑 [SESSION] La sesión terminó durante la restauración, se ignora");
            return;
        }
        match result {
            Ok(user) => {
                log::info!("✅ [SESSION] Sesión restaurada para {}", user.email);
                self.inner.state.update(|s| s.user = Some(user));
            }
            Err(e) => {
                log::warn!("⚠️ [SESSION] Sesión guardada rechazada: {}", e);
                self.logout();
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthFailure> {
        let response = self
            .inner
            .auth
            .login(email, password)
            .await
            .map_err(|e| {
                log::error!("❌ [SESSION] Login fallido: {}", e);
                AuthFailure::from_api(&e, LOGIN_FAILED)
            })?;

        self.establish(response.access_token, LOGIN_FAILED).await
    }

    pub async fn register(&self, data: &RegisterRequest) -> Result<RegisterOutcome, AuthFailure> {
        let response = self.inner.auth.register(data).await.map_err(|e| {
            log::error!("❌ [SESSION] Registro fallido: {}", e);
            AuthFailure::from_api(&e, REGISTRATION_FAILED)
        })?;

        match response.issued_token() {
            Some(token) => {
                self.establish(token, REGISTRATION_FAILED).await?;
                Ok(RegisterOutcome::SessionEstablished)
            }
            None => {
                log::info!("📝 [SESSION] Cuenta creada para {}, falta login", data.email);
                Ok(RegisterOutcome::AccountCreated)
            }
        }
    }

    /// Guarda la credencial y carga el perfil. Si el perfil falla se vuelve
    /// a Anonymous.
    async fn establish(&self, token: Token, fallback: &str) -> Result<(), AuthFailure> {
        self.inner.vault.write(&token);
        self.inner.state.set(Session {
            token: Some(token),
            user: None,
            is_authenticated: false,
        });
        // solo protege la carga del perfil de esta credencial
        let cancel = self.cancellation();

        match self.inner.auth.me().await {
            // logout mientras cargaba el perfil; ese logout ya limpió todo
            Ok(_) if cancel.is_cancelled() => Err(AuthFailure::new(SESSION_ENDED)),
            Ok(user) => {
                log::info!("✅ [SESSION] Sesión iniciada como {} ({:?})", user.email, user.role);
                self.inner.state.update(|s| {
                    s.user = Some(user);
                    s.is_authenticated = true;
                });
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [SESSION] Error cargando perfil tras el login: {}", e);
                if !cancel.is_cancelled() {
                    self.logout();
                }
                Err(AuthFailure::from_api(&e, fallback))
            }
        }
    }

    /// Borra el token guardado y vuelve a Anonymous. Idempotente: estando
    /// ya en Anonymous no notifica ni cancela nada.
    pub fn logout(&self) {
        self.inner.vault.erase();
        if self.inner.state.with(|s| *s == Session::anonymous()) {
            return;
        }

        let previous = self.inner.cancel.replace(CancellationToken::new());
        previous.cancel();
        log::info!("👋 [SESSION] Sesión cerrada");
        self.inner.state.set(Session::anonymous());
    }

    pub async fn update_location(&self, latitude: f64, longitude: f64) -> Result<(), AuthFailure> {
        if !self.is_authenticated() {
            return Err(AuthFailure::new(NOT_AUTHENTICATED));
        }

        let cancel = self.cancellation();
        self.inner
            .auth
            .update_location(latitude, longitude)
            .await
            .map_err(|e| {
                log::error!("❌ [SESSION] Error actualizando ubicación: {}", e);
                AuthFailure::from_api(&e, LOCATION_UPDATE_FAILED)
            })?;

        if !cancel.is_cancelled() && self.inner.state.with(|s| s.user.is_some()) {
            self.inner.state.update(|s| {
                if let Some(user) = s.user.as_mut() {
                    user.latitude = latitude;
                    user.longitude = longitude;
                }
            });
        }
        log::info!("📍 [SESSION] Ubicación actualizada a {:.5}, {:.5}", latitude, longitude);
        Ok(())
    }
}
