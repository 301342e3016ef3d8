// ============================================================================
// SESSION STATE - datos de autenticación, dueño SessionStore
// ============================================================================

use crate::models::auth::Token;
use crate::models::user::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Sin credencial
    Anonymous,
    /// Con credencial, perfil aún sin cargar (login en curso o restauración)
    Authenticating,
    /// Credencial y perfil
    Authenticated,
}

/// `is_authenticated` implica `token.is_some()`. Al restaurar, la sesión
/// queda autenticada antes de que llegue `user`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<Token>,
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.token, &self.user) {
            (None, _) => SessionPhase::Anonymous,
            (Some(_), Some(_)) if self.is_authenticated => SessionPhase::Authenticated,
            (Some(_), _) => SessionPhase::Authenticating,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.phase() == SessionPhase::Anonymous
    }
}
