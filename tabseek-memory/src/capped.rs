use super::*;

/// Resource that refuses any single allocation above a byte cap.
///
/// Useful for exercising the out-of-memory path without exhausting the host.
#[derive(Clone, Debug)]
pub struct CappedMemoryResource<M: MemoryResource> {
    inner: M,
    max_bytes: usize,
}

impl<M> CappedMemoryResource<M>
where
    M: MemoryResource,
{
    pub fn new(inner: M, max_bytes: usize) -> Self {
        Self { inner, max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}

impl<M> MemoryResource for CappedMemoryResource<M>
where
    M: MemoryResource,
{
    fn allocate(&self, len: usize) -> Result<MutableBuffer> {
        if len > self.max_bytes {
            tracing::debug!(
                requested = len,
                limit = self.max_bytes,
                "capped memory resource refused allocation"
            );
            return Err(Error::ResourceExhausted {
                requested: len,
                limit: self.max_bytes,
            });
        }
        self.inner.allocate(len)
    }
}
