use std::cell::{Cell, RefCell};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Shared year selection driving the coordinated views
// ---------------------------------------------------------------------------

/// Errors surfaced to the caller of [`SelectionController::set_year`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The requested year is not one of the selectable years.
    #[error("year {0} is not in the selectable range")]
    InvalidYear(i32),
    /// `set_year` was called from inside an observer notification. Nested
    /// updates are rejected; the in-flight fan-out completes untouched.
    #[error("set_year called re-entrantly from an observer")]
    ReentrantUpdate,
}

/// Handle returned by [`SelectionController::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Observer = Box<dyn FnMut(i32)>;

/// Owns the single shared "currently viewed year" and fans changes out to
/// subscribed views. Observers are invoked synchronously, exactly once per
/// accepted `set_year`, in subscription order.
///
/// All operations take `&self`, so the controller can be shared (e.g. behind
/// an `Rc`) between the input control and the views. Single-threaded by
/// design: each operation runs to completion before the next begins, matching
/// the event-loop model of the host UI. The one nesting that can occur — an
/// observer calling `set_year` during fan-out — is rejected with
/// [`SelectionError::ReentrantUpdate`]. Observers must not subscribe or
/// unsubscribe from within a callback; the observer list is borrowed for the
/// duration of the fan-out.
pub struct SelectionController {
    valid_years: Vec<i32>,
    current: Cell<i32>,
    /// Slot per subscription; `None` marks an unsubscribed slot so that
    /// `SubscriptionId` indices stay stable.
    observers: RefCell<Vec<Option<Observer>>>,
    notifying: Cell<bool>,
}

impl SelectionController {
    /// Build a controller over `valid_years` (non-empty, ascending).
    ///
    /// When `initial` is absent, or names a year that is not a member of
    /// `valid_years`, the selection silently falls back to the last (latest)
    /// valid year. That fallback is a documented contract, not an error.
    pub fn new(valid_years: Vec<i32>, initial: Option<i32>) -> Self {
        debug_assert!(!valid_years.is_empty());
        let current = match initial {
            Some(y) if valid_years.contains(&y) => y,
            _ => *valid_years.last().expect("valid_years must be non-empty"),
        };
        Self {
            valid_years,
            current: Cell::new(current),
            observers: RefCell::new(Vec::new()),
            notifying: Cell::new(false),
        }
    }

    /// The currently selected year. Side-effect free.
    pub fn current_year(&self) -> i32 {
        self.current.get()
    }

    /// The years this controller accepts, ascending.
    pub fn valid_years(&self) -> &[i32] {
        &self.valid_years
    }

    /// Register an observer called with the new year on every accepted
    /// `set_year`. Observers run in subscription order.
    pub fn subscribe(&self, observer: impl FnMut(i32) + 'static) -> SubscriptionId {
        let mut observers = self.observers.borrow_mut();
        observers.push(Some(Box::new(observer)));
        SubscriptionId(observers.len() - 1)
    }

    /// Remove a previously registered observer. Unknown or already-removed
    /// handles are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Some(slot) = self.observers.borrow_mut().get_mut(id.0) {
            *slot = None;
        }
    }

    /// Select `year` and notify all observers.
    ///
    /// All-or-nothing: on `InvalidYear` neither the state nor any observer is
    /// touched, so the previous selection stays displayed unchanged. The
    /// re-entrancy check runs before anything else, so a nested call from an
    /// observer fails cleanly while the outer fan-out carries on.
    pub fn set_year(&self, year: i32) -> Result<(), SelectionError> {
        if self.notifying.get() {
            return Err(SelectionError::ReentrantUpdate);
        }
        if !self.valid_years.contains(&year) {
            return Err(SelectionError::InvalidYear(year));
        }

        self.current.set(year);
        log::debug!("year selection changed to {year}");

        self.notifying.set(true);
        for slot in self.observers.borrow_mut().iter_mut() {
            if let Some(observer) = slot {
                observer(year);
            }
        }
        self.notifying.set(false);
        Ok(())
    }
}
