use std::sync::atomic::{AtomicI64, Ordering};

pub mod chat;
pub mod games;
pub mod leagues;
pub mod players;
pub mod teams;
pub mod trades;
pub mod users;

/// Hands out strictly increasing identifiers starting at 1. Ids are never
/// reused, even across failed operations.
pub struct IdSequence(AtomicI64);

impl IdSequence {
    pub fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    pub fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}
