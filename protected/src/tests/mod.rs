#[cfg(loom)]
mod loom_keyed;

#[cfg(loom)]
mod loom_protected;
