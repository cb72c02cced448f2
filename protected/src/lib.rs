#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unused_must_use)]

//! A mutual-exclusion wrapper that binds a value to its lock.
//!
//! [`Protected`] owns a value together with the mutex that guards it, so the
//! value can never be observed or modified outside a critical section. There
//! are two ways to enter a critical section, both backed by the same lock:
//!
//! - **Closure-scoped access.** [`Protected::read`] and [`Protected::mutate`]
//!   acquire the lock, invoke a closure against the value, and release the
//!   lock when the closure returns. This is the right mode for short
//!   accesses spanning a single operation.
//! - **Guard-scoped access.** [`Protected::acquire`] blocks until the lock
//!   is free and returns a [`ProtectedGuard`], which grants direct read and
//!   write access to the value for an arbitrary span of caller code. The
//!   lock is released exactly once, when the guard is released or dropped.
//!
//! Every access is exclusive: concurrent `read` calls serialize just like
//! `mutate` calls do. The wrapper is not a reader/writer lock.
//!
//! # Examples
//!
//! Closure-scoped access:
//!
//! ```
//! use protected::Protected;
//!
//! let counter = Protected::new(0);
//!
//! counter.mutate(|n| *n += 1);
//! assert_eq!(1, counter.read(|n| *n));
//! ```
//!
//! Guard-scoped access spanning several operations:
//!
//! ```
//! use protected::{Protected, ProtectedGuard};
//!
//! let buffer = Protected::new(String::new());
//!
//! let mut guard = buffer.acquire();
//! guard.push_str("hello");
//! guard.push(' ');
//! guard.push_str("world");
//! ProtectedGuard::release(guard);
//!
//! assert_eq!("hello world", buffer.read(|s| s.clone()));
//! ```
//!
//! # Unwind behavior
//!
//! If a closure passed to `read` or `mutate` panics, the lock is released
//! before the panic propagates, and later acquisitions succeed. Unlike
//! [`std::sync::Mutex`], the lock is not poisoned; if the panic is caught,
//! the value may be left in whatever state the closure produced.
//!
//! # Feature flags
//!
//! - `parking_lot`: use [`parking_lot`] as the underlying lock
//!   implementation instead of the one from `std`.
//! - `tracing`: emit per-instance lock state events through [`tracing`].
//!
//! Waiter ordering under contention is whatever the underlying lock
//! provides; no fairness guarantee is added on top.
//!
//! [`parking_lot`]: https://docs.rs/parking_lot
//! [`tracing`]: https://docs.rs/tracing

mod loom;

mod keyed;

mod protected;
pub use crate::protected::{Protected, ProtectedGuard, TryLockError};

/// Unit tests
#[cfg(test)]
mod tests;
