// ============================================================================
// STATE MODULE - contenedores reactivos, datos de sesión, cancelación
// ============================================================================

pub mod reactivity;
pub mod session_state;
pub mod cancellation;

pub use reactivity::{Emitter, ReactiveState, Subscription};
pub use session_state::{Session, SessionPhase};
pub use cancellation::CancellationToken;
