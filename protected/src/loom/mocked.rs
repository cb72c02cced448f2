//! Mocked implementations of the sync primitives using `loom`, so the model
//! checker can explore thread interleavings.

pub(crate) mod sync {
    pub(crate) use loom::sync::MutexGuard;

    /// Adapter for `loom::sync::Mutex` that removes the poisoning aspects
    /// from its api.
    #[derive(Debug)]
    pub(crate) struct Mutex<T>(loom::sync::Mutex<T>);

    #[allow(dead_code)]
    impl<T> Mutex<T> {
        #[inline]
        pub(crate) fn new(t: T) -> Mutex<T> {
            Mutex(loom::sync::Mutex::new(t))
        }

        #[inline]
        pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
            self.0.lock().unwrap()
        }

        #[inline]
        pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
            self.0.try_lock().ok()
        }
    }
}
