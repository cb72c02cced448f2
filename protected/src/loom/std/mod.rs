mod mutex;

#[cfg(feature = "parking_lot")]
mod parking_lot;

pub(crate) mod sync {
    #[cfg(feature = "parking_lot")]
    pub(crate) use crate::loom::std::parking_lot::{Mutex, MutexGuard};

    #[cfg(not(feature = "parking_lot"))]
    pub(crate) use crate::loom::std::mutex::Mutex;
    #[cfg(not(feature = "parking_lot"))]
    pub(crate) use std::sync::MutexGuard;
}
