//! View state for the two pages, kept free of the DOM so it can be driven and
//! tested without a browser.
pub mod admin;
pub mod public;

use std::cell::RefCell;

/// Somewhere a piece of view state lives: a reactive signal in the app, a
/// `RefCell` in tests.
pub trait Store<T> {
    /// Runs `f` against the state. `None` when the state is gone, e.g. the
    /// owning component was unmounted while a request was in flight.
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T> Store<T> for RefCell<T> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T: 'static> Store<T> for leptos::RwSignal<T> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        leptos::SignalUpdate::try_update(self, f)
    }
}
