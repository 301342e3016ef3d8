use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::auth::Token;

/// Almacenamiento clave/valor persistente (localStorage en el navegador)
pub trait TokenStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

/// Almacenamiento en memoria, fuera del navegador y en tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.items.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }
}

impl TokenStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::TokenStorage;
    use web_sys::{window, Storage};

    /// window.localStorage
    pub struct BrowserStorage {
        storage: Storage,
    }

    impl BrowserStorage {
        /// None si la página no tiene localStorage usable (modo privado, workers)
        pub fn detect() -> Option<Self> {
            let storage = window()?.local_storage().ok()??;
            Some(Self { storage })
        }
    }

    impl TokenStorage for BrowserStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
            self.storage
                .set_item(key, value)
                .map_err(|_| "Error writing to localStorage".to_string())
        }

        fn remove_item(&self, key: &str) -> Result<(), String> {
            self.storage
                .remove_item(key)
                .map_err(|_| "Error removing from localStorage".to_string())
        }
    }
}

/// La única credencial persistida. Sin backend de storage cada operación
/// es un no-op, igual que fuera del navegador.
#[derive(Clone)]
pub struct TokenVault {
    storage: Option<Rc<dyn TokenStorage>>,
    key: String,
}

impl TokenVault {
    pub fn new(storage: Option<Rc<dyn TokenStorage>>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    pub fn read(&self) -> Option<Token> {
        let raw = self.storage.as_ref()?.get_item(&self.key)?;
        Token::parse(&raw)
    }

    pub fn write(&self, token: &Token) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(&self.key, token.as_str()) {
                log::error!("❌ [STORAGE] No se pudo guardar el token: {}", e);
            }
        }
    }

    pub fn erase(&self) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove_item(&self.key) {
                log::error!("❌ [STORAGE] No se pudo borrar el token: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_round_trips_through_storage() {
        let storage = Rc::new(MemoryStorage::new());
        let vault = TokenVault::new(Some(storage.clone()), "token");

        vault.write(&Token::new("abc"));
        assert_eq!(storage.get_item("token").as_deref(), Some("abc"));
        assert_eq!(vault.read(), Some(Token::new("abc")));

        vault.erase();
        assert_eq!(vault.read(), None);
        // borrar dos veces no hace nada
        vault.erase();
    }

    #[test]
    fn vault_without_storage_is_inert() {
        let vault = TokenVault::new(None, "token");
        vault.write(&Token::new("abc"));
        assert!(!vault.has_storage());
        assert_eq!(vault.read(), None);
    }

    #[test]
    fn blank_stored_value_is_not_a_token() {
        let storage = Rc::new(MemoryStorage::with_item("token", "   "));
        let vault = TokenVault::new(Some(storage), "token");
        assert_eq!(vault.read(), None);
    }
}
