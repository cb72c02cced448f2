//! A minimal adaption of the `parking_lot` mutex to the interface used by
//! the rest of the crate.
//!
//! This can be extended to additional types/methods as required.

use parking_lot as pl;

pub(crate) use pl::MutexGuard;

/// Adapter for `parking_lot::Mutex` to the interface of the `std` wrapper.
#[derive(Debug)]
pub(crate) struct Mutex<T>(pl::Mutex<T>);

#[allow(dead_code)]
impl<T> Mutex<T> {
    #[inline]
    pub(crate) fn new(t: T) -> Mutex<T> {
        Mutex(pl::Mutex::new(t))
    }

    #[inline]
    pub(crate) const fn const_new(t: T) -> Mutex<T> {
        Mutex(pl::Mutex::new(t))
    }

    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock()
    }

    #[inline]
    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        self.0.try_lock()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self) -> &mut T {
        self.0.get_mut()
    }

    #[inline]
    pub(crate) fn into_inner(self) -> T {
        self.0.into_inner()
    }
}
