//! Keyed access for map-valued payloads.
//!
//! When the protected value is a [`HashMap`], the methods in this module
//! offer per-key get/set calls so callers do not have to spell out a
//! closure for the common single-entry cases. They are plain compositions
//! of [`Protected::read`] and [`Protected::mutate`] with no privileged
//! access to the value.
//!
//! # Sequences of calls are not atomic
//!
//! Each call locks, runs, and unlocks on its own. A compound
//! check-then-act sequence such as
//!
//! ```
//! # use protected::Protected;
//! # use std::collections::HashMap;
//! # let visits = Protected::new(HashMap::new());
//! let seen = visits.get_cloned("page").unwrap_or(0);
//! visits.set("page", Some(seen + 1));
//! ```
//!
//! spans two critical sections, and a concurrent writer may run between
//! them, losing one of the updates. Use a single [`Protected::mutate`]
//! call when the whole sequence must be atomic:
//!
//! ```
//! # use protected::Protected;
//! # use std::collections::HashMap;
//! # let visits = Protected::new(HashMap::new());
//! visits.mutate(|map| *map.entry("page").or_insert(0) += 1);
//! ```
//!
//! [`HashMap`]: std::collections::HashMap

use crate::Protected;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

impl<K, V, S> Protected<HashMap<K, V, S>>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns a clone of the value stored under `key`, or `None` if the
    /// key is absent.
    ///
    /// This is a single atomic `read`. A `get_cloned` followed by a
    /// [`set`] spans two critical sections and does not compose into one
    /// atomic step; use [`Protected::mutate`] when it must.
    ///
    /// [`set`]: Protected::set
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    /// use std::collections::HashMap;
    ///
    /// let settings = Protected::new(HashMap::from([("retries", 3)]));
    ///
    /// assert_eq!(Some(3), settings.get_cloned("retries"));
    /// assert_eq!(None, settings.get_cloned("timeout"));
    /// ```
    pub fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.read(|map| map.get(key).cloned())
    }

    /// Stores `value` under `key`, returning the previous value if the key
    /// was present.
    ///
    /// Passing `None` removes the entry. This is a single atomic
    /// `mutate`. A [`get_cloned`] followed by a `set` spans two critical
    /// sections and does not compose into one atomic step; use
    /// [`Protected::mutate`] when it must.
    ///
    /// [`get_cloned`]: Protected::get_cloned
    ///
    /// # Examples
    ///
    /// ```
    /// use protected::Protected;
    /// use std::collections::HashMap;
    ///
    /// let settings = Protected::new(HashMap::new());
    ///
    /// assert_eq!(None, settings.set("retries", Some(3)));
    /// assert_eq!(Some(3), settings.set("retries", Some(5)));
    ///
    /// // storing the absent value removes the entry
    /// assert_eq!(Some(5), settings.set("retries", None));
    /// assert_eq!(None, settings.get_cloned("retries"));
    /// ```
    pub fn set(&self, key: K, value: Option<V>) -> Option<V> {
        self.mutate(|map| match value {
            Some(value) => map.insert(key, value),
            None => map.remove(&key),
        })
    }
}
