use std::cell::Cell;
use std::rc::Rc;

/// Bandera compartida que se revisa justo antes de confirmar un resultado
/// en un store. Los clones ven la misma bandera.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
