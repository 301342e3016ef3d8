// ============================================================================
// REACTIVITY - listas de suscriptores para estado y eventos
// ============================================================================
// Un solo hilo (Rc/RefCell). Los callbacks corren en forma síncrona después
// de confirmar el nuevo valor y reciben una copia: pueden leer o escribir el
// estado que observan sin chocar con un borrow del RefCell.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Callback<T>)>>,
}

impl<T: 'static> Subscribers<T> {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        })
    }

    fn add(self: &Rc<Self>, callback: Callback<T>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, callback));

        let list: Weak<Self> = Rc::downgrade(self);
        Subscription::new(move || {
            if let Some(list) = list.upgrade() {
                list.entries.borrow_mut().retain(|(entry, _)| *entry != id);
            }
        })
    }

    fn notify(&self, value: &T) {
        // Copiar la lista primero: un callback puede (des)suscribirse
        let callbacks: Vec<Callback<T>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Handle que devuelve `subscribe`. Al soltarlo se quita el callback;
/// `forget` lo deja vivo mientras viva la fuente.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn forget(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Valor observable. Cada `set`/`update` es una transición confirmada
/// seguida de una notificación.
pub struct ReactiveState<T> {
    value: RefCell<T>,
    subscribers: Rc<Subscribers<T>>,
}

impl<T: Clone + 'static> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: Subscribers::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Leer sin clonar todo el valor
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.add(Rc::new(callback))
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.get();
        self.subscribers.notify(&snapshot);
    }
}

/// Eventos sin valor retenido
pub struct Emitter<E> {
    subscribers: Rc<Subscribers<E>>,
}

impl<E: 'static> Emitter<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Subscribers::new(),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&E) + 'static,
    {
        self.subscribers.add(Rc::new(callback))
    }

    pub fn emit(&self, event: &E) {
        self.subscribers.notify(event);
    }
}

impl<E: 'static> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_after_commit() {
        let state = Rc::new(ReactiveState::new(1));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let observed = state.clone();
        let log = seen.clone();
        let _sub = state.subscribe(move |value| {
            // dentro del callback ya se ve el valor confirmado
            assert_eq!(observed.get(), *value);
            log.borrow_mut().push(*value);
        });

        state.set(2);
        state.update(|v| *v += 3);

        assert_eq!(*seen.borrow(), vec![2, 5]);
    }

    #[test]
    fn dropping_subscription_detaches() {
        let state = ReactiveState::new(0);
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let sub = state.subscribe(move |_| counter.set(counter.get() + 1));
        state.set(1);
        drop(sub);
        state.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn explicit_unsubscribe_and_forget() {
        let state = ReactiveState::new(0);
        let hits = Rc::new(Cell::new(0));

        let a = hits.clone();
        state.subscribe(move |_| a.set(a.get() + 1)).forget();
        let b = hits.clone();
        let sub = state.subscribe(move |_| b.set(b.get() + 10));
        sub.unsubscribe();

        state.set(1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn callback_may_write_the_state_it_observes() {
        let state = Rc::new(ReactiveState::new(0));
        let inner = state.clone();
        state
            .subscribe(move |value| {
                if *value == 1 {
                    inner.set(2);
                }
            })
            .forget();

        state.set(1);
        assert_eq!(state.get(), 2);
    }

    #[derive(Debug)]
    struct Counted(Rc<Cell<usize>>);

    impl Clone for Counted {
        fn clone(&self) -> Self {
            self.0.set(self.0.get() + 1);
            Counted(self.0.clone())
        }
    }

    #[test]
    fn no_snapshot_without_subscribers() {
        let clones = Rc::new(Cell::new(0));
        let state = ReactiveState::new(Counted(clones.clone()));

        state.set(Counted(clones.clone()));
        state.update(|_| {});
        assert_eq!(clones.get(), 0);

        let _sub = state.subscribe(|_| {});
        state.update(|_| {});
        assert_eq!(clones.get(), 1);
    }

    #[test]
    fn emitter_delivers_to_every_listener() {
        let emitter: Emitter<&'static str> = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = seen.clone();
        let _a = emitter.subscribe(move |e| first.borrow_mut().push(format!("a:{}", e)));
        let second = seen.clone();
        let _b = emitter.subscribe(move |e| second.borrow_mut().push(format!("b:{}", e)));

        emitter.emit(&"expired");
        assert_eq!(*seen.borrow(), vec!["a:expired", "b:expired"]);
    }
}
