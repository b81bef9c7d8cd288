//! Broadcast subjects for score and time changes.
//!
//! Delivery is synchronous: `Subject::set` returns after every attached
//! observer has seen the new value.

use std::fmt;

/// Receives values pushed by a `Subject`.
pub trait Observer<T> {
    fn notify(&mut self, value: T);
}

impl<T, F: FnMut(T)> Observer<T> for F {
    fn notify(&mut self, value: T) {
        self(value)
    }
}

/// Holds the latest value of one channel and its observers.
pub struct Subject<T: Copy + 'static> {
    value: T,
    observers: Vec<Box<dyn Observer<T>>>,
}

/// Score channel: total points.
pub type ScoreSubject = Subject<u32>;

/// Time channel: whole seconds elapsed.
pub type TimeSubject = Subject<u64>;

impl<T: Copy + Default + 'static> Subject<T> {
    pub fn new() -> Self {
        Self {
            value: T::default(),
            observers: Vec::new(),
        }
    }
}

impl<T: Copy + 'static> Subject<T> {
    /// Subscribe an observer to every future update.
    pub fn attach(&mut self, observer: impl Observer<T> + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Record a value and broadcast it, even when unchanged.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for observer in &mut self.observers {
            observer.notify(value);
        }
    }

    /// Last value broadcast.
    pub fn value(&self) -> T {
        self.value
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: Copy + Default + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + fmt::Debug + 'static> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}
