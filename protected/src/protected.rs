use crate::loom::sync;

use std::error::Error;
use std::fmt;

/// A value bound to the lock that guards it.
///
/// `Protected<T>` owns the protected value; the only ways to reach it are
/// [`read`], [`mutate`], and the guard returned by [`acquire`]. All of them
/// go through the same underlying lock, so at most one execution context
/// observes or modifies the value at any instant.
///
/// The lock is exclusive, not a reader/writer lock: concurrent `read` calls
/// serialize exactly like `mutate` calls do.
///
/// # Which access mode should you use?
///
/// `read` and `mutate` cover the common case of a critical section spanning
/// a single operation; they cannot leak the lock because the release is tied
/// to the closure returning or unwinding. `acquire` is for extended critical
/// sections spanning multiple operations on the value, at the price of
/// keeping contenders blocked for as long as the guard is live.
///
/// # Examples
///
/// ```
/// use protected::Protected;
/// use std::sync::Arc;
/// use std::thread;
///
/// let count = Arc::new(Protected::new(0));
/// let mut handles = Vec::new();
///
/// for _ in 0..4 {
///     let count = count.clone();
///     handles.push(thread::spawn(move || {
///         for _ in 0..25 {
///             count.mutate(|n| *n += 1);
///         }
///     }));
/// }
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(100, count.read(|n| *n));
/// ```
///
/// A guard cannot outlive the `Protected` it was acquired from:
///
/// ```compile_fail
/// use protected::Protected;
///
/// let guard;
/// {
///     let value = Protected::new(0);
///     guard = value.acquire();
/// }
/// drop(guard);
/// ```
///
/// [`read`]: Protected::read
/// [`mutate`]: Protected::mutate
/// [`acquire`]: Protected::acquire
pub struct Protected<T> {
    #[cfg(feature = "tracing")]
    resource_span: tracing::Span,
    inner: sync::Mutex<T>,
}

/// A handle to a held [`Protected`] value.
///
/// As long as you have this guard, you have exclusive access to the
/// underlying `T` through its `Deref` and `DerefMut` implementations. The
/// guard internally borrows the `Protected`, so the wrapper cannot be
/// dropped while a guard exists.
///
/// The lock is released exactly once, either by [`release`] or when the
/// guard is dropped, at which point blocked contenders proceed and observe
/// every write made through the guard.
///
/// The guard may be moved freely, but it cannot be duplicated; a second
/// live guard for the same acquisition would defeat the single-unlock
/// contract:
///
/// ```compile_fail
/// use protected::Protected;
///
/// struct Token;
///
/// let value = Protected::new(Token);
/// let guard = value.acquire();
/// let duplicate = guard.clone();
/// ```
///
/// Using a guard after releasing it is also rejected at compile time, since
/// [`release`] consumes the guard:
///
/// ```compile_fail
/// use protected::{Protected, ProtectedGuard};
///
/// struct Token;
///
/// let value = Protected::new(Token);
/// let guard = value.acquire();
/// ProtectedGuard::release(guard);
/// let _ = &*guard;
/// ```
///
/// [`release`]: ProtectedGuard::release
#[clippy::has_significant_drop]
#[must_use = "if unused the `Protected` value will immediately unlock"]
pub struct ProtectedGuard<'a, T> {
    #[cfg(feature = "tracing")]
    resource_span: tracing::Span,
    lock: &'a Protected<T>,
    inner: sync::MutexGuard<'a, T>,
}

/// Error returned from [`Protected::try_acquire`].
///
/// A `try_acquire` operation can only fail if the lock is already held.
#[derive(Debug)]
pub struct TryLockError(pub(crate) ());

impl fmt::Display for TryLockError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "operation would block")
    }
}

impl Error for TryLockError {}

#[test]
#[cfg(not(loom))]
fn bounds() {
    fn check_send<T: Send>() {}
    fn check_send_sync<T: Send + Sync>() {}
    fn check_unpin<T: Unpin>() {}
    fn check_sync_val<T: Sync>(_t: T) {}

    check_send::<Protected<u32>>();
    check_send_sync::<Protected<u32>>();
    check_unpin::<Protected<u32>>();

    let protected = Protected::new(1);
    check_sync_val(protected.acquire());
}

impl<T> Protected<T> {
    /// Creates a new `Protected` value in an unlocked state ready for use.
    ///
    /// Ownership of `value` transfers fully into the wrapper; the caller
    /// retains no alias to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    ///
    /// let value = Protected::new(5);
    /// ```
    #[track_caller]
    pub fn new(value: T) -> Protected<T> {
        #[cfg(feature = "tracing")]
        let resource_span = {
            let location = std::panic::Location::caller();

            tracing::trace_span!(
                parent: None,
                "protected.resource",
                kind = "Sync",
                loc.file = location.file(),
                loc.line = location.line(),
                loc.col = location.column(),
            )
        };

        Protected {
            #[cfg(feature = "tracing")]
            resource_span,
            inner: sync::Mutex::new(value),
        }
    }

    /// Creates a new `Protected` value in an unlocked state ready for use.
    ///
    /// When the `tracing` feature is enabled, a value created with
    /// `const_new` is not instrumented. Use [`Protected::new`] where an
    /// instrumented instance is needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    ///
    /// static VALUE: Protected<i32> = Protected::const_new(5);
    /// ```
    #[cfg(not(all(loom, test)))]
    pub const fn const_new(value: T) -> Protected<T> {
        Protected {
            #[cfg(feature = "tracing")]
            resource_span: tracing::Span::none(),
            inner: sync::Mutex::const_new(value),
        }
    }

    /// Acquires the lock, invokes `operation` with shared access to the
    /// value, and releases the lock when the closure returns.
    ///
    /// The closure's result is returned to the caller. No mutation of the
    /// value is possible through this path.
    ///
    /// If `operation` panics, the lock is released before the panic
    /// propagates, and later acquisitions succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    ///
    /// let name = Protected::new(String::from("alice"));
    ///
    /// let len = name.read(|s| s.len());
    /// assert_eq!(5, len);
    /// ```
    pub fn read<F, R>(&self, operation: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.acquire();
        operation(&*guard)
    }

    /// Acquires the lock, invokes `operation` with exclusive access to the
    /// value, and releases the lock when the closure returns.
    ///
    /// The closure may modify the value in place or replace it wholesale;
    /// its result is returned to the caller. Together with a live
    /// [`ProtectedGuard`], this is the only path through which the value
    /// can be mutated.
    ///
    /// If `operation` panics, the lock is released before the panic
    /// propagates, and later acquisitions succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    ///
    /// let name = Protected::new(String::from("alice"));
    ///
    /// let previous = name.mutate(|s| std::mem::replace(s, String::from("bob")));
    /// assert_eq!("alice", previous);
    /// assert_eq!("bob", name.read(|s| s.clone()));
    /// ```
    pub fn mutate<F, R>(&self, operation: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.acquire();
        operation(&mut *guard)
    }

    /// Blocks the calling thread until the lock is free, then acquires it
    /// and returns a guard granting direct access to the value.
    ///
    /// The caller performs an arbitrary sequence of reads and writes
    /// through the returned [`ProtectedGuard`]; every other access path
    /// blocks until the guard is released. There is no timeout: contended
    /// acquisition blocks indefinitely rather than failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    ///
    /// let value = Protected::new(1);
    ///
    /// let mut guard = value.acquire();
    /// *guard += 1;
    /// drop(guard);
    ///
    /// assert_eq!(2, value.read(|n| *n));
    /// ```
    pub fn acquire(&self) -> ProtectedGuard<'_, T> {
        let inner = self.inner.lock();

        #[cfg(feature = "tracing")]
        self.resource_span.in_scope(|| {
            tracing::trace!(
                target: "protected::resource::state_update",
                locked = true,
            );
        });

        ProtectedGuard {
            #[cfg(feature = "tracing")]
            resource_span: self.resource_span.clone(),
            lock: self,
            inner,
        }
    }

    /// Attempts to acquire the lock, and returns [`TryLockError`] if the
    /// lock is currently held somewhere else.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    /// # fn dox() -> Result<(), protected::TryLockError> {
    ///
    /// let value = Protected::new(1);
    ///
    /// let guard = value.try_acquire()?;
    /// assert_eq!(1, *guard);
    /// # Ok(())
    /// # }
    /// ```
    pub fn try_acquire(&self) -> Result<ProtectedGuard<'_, T>, TryLockError> {
        match self.inner.try_lock() {
            Some(inner) => {
                #[cfg(feature = "tracing")]
                self.resource_span.in_scope(|| {
                    tracing::trace!(
                        target: "protected::resource::state_update",
                        locked = true,
                    );
                });

                Ok(ProtectedGuard {
                    #[cfg(feature = "tracing")]
                    resource_span: self.resource_span.clone(),
                    lock: self,
                    inner,
                })
            }
            None => Err(TryLockError(())),
        }
    }

    /// Returns a mutable reference to the underlying value.
    ///
    /// Since this call borrows the `Protected` mutably, no locking needs to
    /// take place -- the mutable borrow statically guarantees no guards
    /// exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    ///
    /// let mut value = Protected::new(1);
    ///
    /// *value.get_mut() = 2;
    /// assert_eq!(2, value.read(|n| *n));
    /// ```
    #[cfg(not(all(loom, test)))]
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    /// Consumes the wrapper, returning the underlying value.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    ///
    /// let value = Protected::new(1);
    ///
    /// assert_eq!(1, value.into_inner());
    /// ```
    #[cfg(not(all(loom, test)))]
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T> From<T> for Protected<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Default for Protected<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for Protected<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Protected");
        match self.try_acquire() {
            Ok(guard) => d.field("data", &&*guard),
            Err(_) => d.field("data", &format_args!("<locked>")),
        };
        d.finish()
    }
}

// === impl ProtectedGuard ===

impl<'a, T> ProtectedGuard<'a, T> {
    /// Releases the guard, unlocking the protected value.
    ///
    /// Calling this is optional: dropping the guard has the same effect.
    /// Since `release` consumes the guard, the unlock still happens exactly
    /// once, and the guard cannot be used afterwards.
    ///
    /// This is an associated function that needs to be used as
    /// `ProtectedGuard::release(...)`. A method would interfere with
    /// methods of the same name on the contents of the protected value.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::{Protected, ProtectedGuard};
    ///
    /// let value = Protected::new(1);
    ///
    /// let mut guard = value.acquire();
    /// *guard = 2;
    /// ProtectedGuard::release(guard);
    ///
    /// assert_eq!(2, value.read(|n| *n));
    /// ```
    #[inline]
    pub fn release(this: Self) {
        drop(this);
    }

    /// Returns a reference to the original [`Protected`] wrapper.
    ///
    /// This is an associated function that needs to be used as
    /// `ProtectedGuard::protected(...)`. A method would interfere with
    /// methods of the same name on the contents of the protected value.
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::{Protected, ProtectedGuard};
    ///
    /// fn unlock_and_relock(guard: ProtectedGuard<'_, u32>) -> ProtectedGuard<'_, u32> {
    ///     let value = ProtectedGuard::protected(&guard);
    ///     ProtectedGuard::release(guard);
    ///     value.acquire()
    /// }
    /// #
    /// # let value = Protected::new(0u32);
    /// # let guard = value.acquire();
    /// # let _guard = unlock_and_relock(guard);
    /// ```
    #[inline]
    pub fn protected(this: &Self) -> &'a Protected<T> {
        this.lock
    }
}

impl<T> Drop for ProtectedGuard<'_, T> {
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        self.resource_span.in_scope(|| {
            tracing::trace!(
                target: "protected::resource::state_update",
                locked = false,
            );
        });
    }
}

impl<T> std::ops::Deref for ProtectedGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl<T> std::ops::DerefMut for ProtectedGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for ProtectedGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: fmt::Display> fmt::Display for ProtectedGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}
