// ============================================================================
// VBAMS CLIENT - sesión, pipeline de requests y cachés de dashboard
// ============================================================================
// Capas:
// - Services: pipeline HTTP y llamadas tipadas a endpoints
// - State: contenedores reactivos, datos de sesión, cancelación
// - Stores: máquina de estados de sesión y cachés de dashboard con TTL
// - Models: estructuras compartidas con el backend
// ============================================================================

pub mod app;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use app::AppContext;
pub use config::{ApiConfig, Environment, CONFIG};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::AppContext;
    use crate::config::CONFIG;

    const SESSION_EXPIRED_EVENT: &str = "sessionExpired";

    thread_local! {
        static APP: RefCell<Option<Rc<AppContext>>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(Config::default());
        log::info!("🚀 [APP] Iniciando cliente VBAMS ({})", CONFIG.environment.as_str());

        let app = Rc::new(AppContext::browser(CONFIG.clone()));
        app.on_session_expired(|event| {
            log::info!("🔒 [APP] Avisando a la página de sesión expirada ({})", event.path);
            dispatch_session_expired();
        })
        .forget();

        APP.with(|cell| *cell.borrow_mut() = Some(app.clone()));

        wasm_bindgen_futures::spawn_local(async move {
            app.session().hydrate().await;
        });

        Ok(())
    }

    fn current_app() -> Option<Rc<AppContext>> {
        APP.with(|cell| cell.borrow().clone())
    }

    /// La página escucha este evento y navega a su pantalla de login
    fn dispatch_session_expired() {
        let Some(window) = web_sys::window() else {
            return;
        };
        match web_sys::CustomEvent::new(SESSION_EXPIRED_EVENT) {
            Ok(event) => {
                if window.dispatch_event(&event).is_err() {
                    log::warn!("⚠️ [APP] No se pudo despachar el evento {}", SESSION_EXPIRED_EVENT);
                }
            }
            Err(_) => log::warn!("⚠️ [APP] No se pudo crear el evento {}", SESSION_EXPIRED_EVENT),
        }
    }

    #[wasm_bindgen]
    pub fn is_authenticated() -> bool {
        current_app()
            .map(|app| app.session().is_authenticated())
            .unwrap_or(false)
    }

    #[wasm_bindgen]
    pub async fn login(email: String, password: String) -> Result<(), JsValue> {
        let app = current_app().ok_or_else(|| JsValue::from_str("App not initialised"))?;
        app.session()
            .login(&email, &password)
            .await
            .map_err(|e| JsValue::from_str(&e.message))
    }

    #[wasm_bindgen]
    pub fn logout() {
        if let Some(app) = current_app() {
            app.session().logout();
        }
    }
}
