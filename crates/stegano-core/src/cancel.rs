use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SteganoError;
use crate::result::Result;

/// Cooperative cancellation, cloned into a task and checked between chunks of work
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SteganoError::Cancelled)
        } else {
            Ok(())
        }
    }
}
