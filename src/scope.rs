//! Release scopes: the ownership discipline behind teardown.
//!
//! Every DOM mutation the engine performs registers a matching inverse
//! action (detach a node, remove a listener, drop a watch guard) against the
//! scope that owns it. Releasing a scope runs the registered actions in
//! reverse registration order; region scopes owned by dynamic placeholders
//! are drained by actions registered in their parent, so release cascades
//! transitively.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::Rc;

/// A shared handle to a release list.
///
/// Cloning a `Scope` clones the handle, not the list: all clones release the
/// same resources. Release is idempotent and re-entrant — a release action
/// may itself call [`Scope::release`] without deadlocking or double-running
/// anything.
#[derive(Clone, Default)]
pub struct Scope {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    released: Cell<bool>,
    releases: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Scope {
    /// Creates a fresh scope with an empty release list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an inverse action to run when this scope is released.
    ///
    /// Actions run in reverse registration order. Registering against an
    /// already-released scope runs the action immediately, so a resource
    /// acquired while a release is in flight can never leak.
    pub fn register(&self, action: impl FnOnce() + 'static) {
        if self.inner.released.get() {
            action();
            return;
        }
        self.inner.releases.borrow_mut().push(Box::new(action));
    }

    /// Keeps `value` alive until this scope is released.
    ///
    /// Used for watch guards: dropping the guard is the unsubscribe.
    pub fn hold<T: 'static>(&self, value: T) {
        self.register(move || drop(value));
    }

    /// Runs all registered actions in reverse registration order.
    ///
    /// Subsequent calls are no-ops.
    pub fn release(&self) {
        if self.inner.released.replace(true) {
            return;
        }
        let mut actions = self.inner.releases.take();
        while let Some(action) = actions.pop() {
            action();
        }
    }

    /// Returns `true` once [`Scope::release`] has run.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.inner.released.get()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("released", &self.inner.released.get())
            .field("pending", &self.inner.releases.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_in_reverse_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let scope = Scope::new();
        for index in 0..3 {
            let order = Rc::clone(&order);
            scope.register(move || order.borrow_mut().push(index));
        }

        scope.release();
        assert_eq!(&*order.borrow(), &[2, 1, 0]);
    }

    #[test]
    fn release_is_idempotent() {
        let count = Rc::new(Cell::new(0));
        let scope = Scope::new();
        {
            let count = Rc::clone(&count);
            scope.register(move || count.set(count.get() + 1));
        }

        scope.release();
        scope.release();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn register_after_release_runs_immediately() {
        let ran = Rc::new(Cell::new(false));
        let scope = Scope::new();
        scope.release();

        {
            let ran = Rc::clone(&ran);
            scope.register(move || ran.set(true));
        }
        assert!(ran.get());
    }

    #[test]
    fn held_values_drop_on_release() {
        struct Flag(Rc<Cell<bool>>);
        impl Drop for Flag {
            fn drop(&mut self) {
                self.0.set(true);
            }
        }

        let dropped = Rc::new(Cell::new(false));
        let scope = Scope::new();
        scope.hold(Flag(Rc::clone(&dropped)));

        assert!(!dropped.get());
        scope.release();
        assert!(dropped.get());
    }

    #[test]
    fn reentrant_release_is_safe() {
        let scope = Scope::new();
        {
            let scope = scope.clone();
            scope.clone().register(move || scope.release());
        }
        scope.release();
        assert!(scope.is_released());
    }

    #[test]
    fn clones_share_the_release_list() {
        let count = Rc::new(Cell::new(0));
        let scope = Scope::new();
        let alias = scope.clone();
        {
            let count = Rc::clone(&count);
            alias.register(move || count.set(count.get() + 1));
        }

        scope.release();
        assert_eq!(count.get(), 1);
        assert!(alias.is_released());
    }
}
