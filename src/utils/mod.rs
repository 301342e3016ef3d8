// Utilidades compartidas

pub mod constants;
pub mod storage;
pub mod clock;

pub use constants::*;
pub use storage::{MemoryStorage, TokenStorage, TokenVault};
pub use clock::{Clock, ManualClock, SystemClock};
