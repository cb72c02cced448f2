use std::sync::{self, MutexGuard, TryLockError};

/// Adapter for `std::sync::Mutex` that removes the poisoning aspects from
/// its api.
#[derive(Debug)]
pub(crate) struct Mutex<T>(sync::Mutex<T>);

#[allow(dead_code)]
impl<T> Mutex<T> {
    #[inline]
    pub(crate) fn new(t: T) -> Mutex<T> {
        Mutex(sync::Mutex::new(t))
    }

    #[inline]
    pub(crate) const fn const_new(t: T) -> Mutex<T> {
        Mutex(sync::Mutex::new(t))
    }

    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        match self.0.lock() {
            Ok(guard) => guard,
            // Ignore poisoning: a panicking critical section releases the
            // lock, it does not taint the value for later holders.
            Err(p_err) => p_err.into_inner(),
        }
    }

    #[inline]
    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        match self.0.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(p_err)) => Some(p_err.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self) -> &mut T {
        match self.0.get_mut() {
            Ok(val) => val,
            Err(p_err) => p_err.into_inner(),
        }
    }

    #[inline]
    pub(crate) fn into_inner(self) -> T {
        match self.0.into_inner() {
            Ok(val) => val,
            Err(p_err) => p_err.into_inner(),
        }
    }
}
