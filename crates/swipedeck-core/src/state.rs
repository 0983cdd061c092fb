//! Observable state cells.
//!
//! A [`MutableState`] notifies its observers through the runtime's UI task
//! queue, so reactions run on the same cooperative scheduler as frame
//! callbacks and animation completions, in the order the writes happened.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::runtime::RuntimeHandle;

type Observer<T> = Rc<dyn Fn(&T, &T) + 'static>;

struct ObserverEntry<T> {
    id: u64,
    observer: Observer<T>,
}

struct StateInner<T> {
    value: RefCell<T>,
    runtime: RuntimeHandle,
    observers: RefCell<SmallVec<[ObserverEntry<T>; 4]>>,
    next_observer_id: Cell<u64>,
}

impl<T> StateInner<T> {
    fn observer(&self, id: u64) -> Option<Observer<T>> {
        self.observers
            .borrow()
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| Rc::clone(&entry.observer))
    }

    fn remove_observer(&self, id: u64) {
        self.observers.borrow_mut().retain(|entry| entry.id != id);
    }
}

pub struct MutableState<T: Clone + PartialEq + 'static> {
    inner: Rc<StateInner<T>>,
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(value),
                runtime,
                observers: RefCell::new(SmallVec::new()),
                next_observer_id: Cell::new(1),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Write a new value. Returns `false` (and notifies nobody) when the value
    /// is unchanged.
    pub fn set(&self, value: T) -> bool {
        let previous = {
            let mut slot = self.inner.value.borrow_mut();
            if *slot == value {
                return false;
            }
            std::mem::replace(&mut *slot, value.clone())
        };
        self.notify(previous, value);
        true
    }

    /// Observe changes. The observer receives `(previous, current)` for every
    /// effective write, delivered as a UI task.
    pub fn subscribe(&self, observer: impl Fn(&T, &T) + 'static) -> Subscription {
        let id = self.inner.next_observer_id.get();
        self.inner.next_observer_id.set(id + 1);
        self.inner.observers.borrow_mut().push(ObserverEntry {
            id,
            observer: Rc::new(observer),
        });
        let weak: Weak<StateInner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.remove_observer(id);
                }
            })),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    fn notify(&self, previous: T, current: T) {
        let ids: SmallVec<[u64; 4]> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|entry| entry.id)
            .collect();
        for id in ids {
            let weak = Rc::downgrade(&self.inner);
            let previous = previous.clone();
            let current = current.clone();
            self.inner.runtime.enqueue_ui_task(Box::new(move || {
                // Observers unsubscribed after the write are skipped.
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if let Some(observer) = inner.observer(id) {
                    observer(&previous, &current);
                }
            }));
        }
    }
}

impl<T: Clone + PartialEq + 'static> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + fmt::Debug + 'static> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &*self.inner.value.borrow())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Observer registration. Dropping it stops further notifications.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
