use super::*;
use std::sync::atomic::{AtomicU64, Ordering};

/// A thread-safe container for allocation statistics.
#[derive(Debug, Default)]
pub struct AllocStats {
    /// Number of successful `allocate` calls.
    pub allocations: AtomicU64,
    /// Bytes handed out by successful calls.
    pub bytes_allocated: AtomicU64,
    /// Calls the wrapped resource refused.
    pub failed_allocations: AtomicU64,
}

impl AllocStats {
    pub fn allocations(&self) -> u64 {
        self.allocations.load(Ordering::Relaxed)
    }

    pub fn bytes_allocated(&self) -> u64 {
        self.bytes_allocated.load(Ordering::Relaxed)
    }

    pub fn failed_allocations(&self) -> u64 {
        self.failed_allocations.load(Ordering::Relaxed)
    }
}

/// A wrapper around any memory resource that counts allocations.
#[derive(Debug)]
pub struct InstrumentedMemoryResource<M: MemoryResource> {
    inner: M,
    stats: Arc<AllocStats>,
}

impl<M> InstrumentedMemoryResource<M>
where
    M: MemoryResource,
{
    /// Wraps a resource and returns the instrumented version along with a handle
    /// to its statistics.
    pub fn new(inner: M) -> (Self, Arc<AllocStats>) {
        let stats = Arc::new(AllocStats::default());
        (
            Self {
                inner,
                stats: Arc::clone(&stats),
            },
            stats,
        )
    }
}

impl<M> MemoryResource for InstrumentedMemoryResource<M>
where
    M: MemoryResource,
{
    fn allocate(&self, len: usize) -> Result<MutableBuffer> {
        match self.inner.allocate(len) {
            Ok(buffer) => {
                self.stats.allocations.fetch_add(1, Ordering::Relaxed);
                self.stats
                    .bytes_allocated
                    .fetch_add(len as u64, Ordering::Relaxed);
                Ok(buffer)
            }
            Err(err) => {
                self.stats.failed_allocations.fetch_add(1, Ordering::Relaxed);
                Err(err)
            }
        }
    }
}
