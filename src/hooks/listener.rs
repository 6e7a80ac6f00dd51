//! Event listeners with swappable handlers.
//!
//! [`EventTarget`] routes named events to registered handlers. Registration
//! returns a [`Listener`] guard: dropping it unregisters the handler, and
//! [`Listener::set_handler`] replaces the handler in place so a caller can keep
//! its latest closure wired up without unsubscribing and resubscribing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler<E> = Rc<RefCell<Box<dyn FnMut(&E)>>>;

struct Entry<E> {
    id: u64,
    event_type: String,
    handler: Handler<E>,
}

struct Registry<E> {
    next_id: u64,
    entries: Vec<Entry<E>>,
}

/// Dispatches events of type `E` to listeners registered by event name.
///
/// # Example
///
/// ```rust
/// use hooklab::hooks::EventTarget;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let window = EventTarget::<char>::new();
/// let last_key = Rc::new(RefCell::new(None));
///
/// let sink = last_key.clone();
/// let listener = window.add_listener("keydown", move |key| *sink.borrow_mut() = Some(*key));
///
/// window.dispatch("keydown", &'a');
/// assert_eq!(*last_key.borrow(), Some('a'));
///
/// drop(listener);
/// assert_eq!(window.dispatch("keydown", &'b'), 0);
/// ```
pub struct EventTarget<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> EventTarget<E> {
    /// Creates a target with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Registers `handler` for `event_type`.
    ///
    /// The handler stays registered for as long as the returned guard lives.
    #[must_use = "dropping the listener unregisters it immediately"]
    pub fn add_listener(&self, event_type: impl Into<String>, handler: impl FnMut(&E) + 'static) -> Listener<E> {
        let event_type = event_type.into();
        let handler: Handler<E> = Rc::new(RefCell::new(Box::new(handler)));

        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id = registry.next_id.wrapping_add(1);
        registry.entries.push(Entry {
            id,
            event_type: event_type.clone(),
            handler: handler.clone(),
        });
        tracing::trace!(listener = id, event_type = %event_type, "listener added");

        Listener {
            id,
            registry: Rc::downgrade(&self.registry),
            handler,
        }
    }

    /// Invokes every listener registered for `event_type`, in registration
    /// order. Returns how many handlers ran.
    ///
    /// Listeners added or removed by a handler take effect from the next
    /// dispatch. A handler that is already running (re-entrant dispatch) is
    /// skipped.
    pub fn dispatch(&self, event_type: &str, event: &E) -> usize {
        let handlers: Vec<Handler<E>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .map(|entry| entry.handler.clone())
            .collect();

        let mut invoked = 0;
        for handler in handlers {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                let call: &mut dyn FnMut(&E) = &mut **handler;
                call(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Number of registered listeners for `event_type`.
    #[must_use]
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .count()
    }
}

impl<E: 'static> Default for EventTarget<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration guard returned by [`EventTarget::add_listener`].
pub struct Listener<E> {
    id: u64,
    registry: Weak<RefCell<Registry<E>>>,
    handler: Handler<E>,
}

impl<E> Listener<E> {
    /// Replaces the handler without changing the registration.
    ///
    /// # Panics
    ///
    /// Panics if called from inside the handler it replaces.
    pub fn set_handler(&self, handler: impl FnMut(&E) + 'static) {
        *self.handler.borrow_mut() = Box::new(handler);
    }

    /// Unregisters the listener. Equivalent to dropping it.
    pub fn remove(self) {}
}

impl<E> Drop for Listener<E> {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if let Ok(mut registry) = registry.try_borrow_mut() {
            registry.entries.retain(|entry| entry.id != self.id);
            tracing::trace!(listener = self.id, "listener removed");
        };
    }
}
