//! Time and identifier sources
//!
//! Both are injected into the registries so tests can pin timestamps and ids.

use aeroreach_shared::now_ms;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Supplies the current instant
pub trait Clock: Send + Sync {
    /// Milliseconds since Unix epoch
    fn now_ms(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        now_ms()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Supplies unique request identifiers
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Generates `<prefix>-<millis>-<sequence>` ids
///
/// The sequence is process-wide monotonic, so ids stay unique even when the
/// clock stalls or goes backwards.
pub struct SequentialIdGenerator {
    prefix: String,
    clock: Arc<dyn Clock>,
    sequence: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            prefix: prefix.into(),
            clock,
            sequence: AtomicU64::new(0),
        }
    }

    /// Get the next sequence number
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let seq = self.next_sequence();
        format!("{}-{}-{}", self.prefix, self.clock.now_ms(), seq)
    }
}
