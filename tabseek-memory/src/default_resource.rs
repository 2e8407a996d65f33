use super::*;

/// Largest byte length a single allocation may describe.
const MAX_BUFFER_BYTES: usize = isize::MAX as usize - 63;

/// Heap-backed resource using the global allocator.
///
/// Allocation is fallible: a request the host cannot satisfy comes back as
/// [`Error::ResourceExhausted`] instead of aborting the process. Buffers are
/// backed by 16-byte words, enough alignment for every Arrow native type.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMemoryResource;

impl MemoryResource for DefaultMemoryResource {
    fn allocate(&self, len: usize) -> Result<MutableBuffer> {
        let exhausted = || Error::ResourceExhausted {
            requested: len,
            limit: MAX_BUFFER_BYTES,
        };
        if len > MAX_BUFFER_BYTES {
            return Err(exhausted());
        }

        let words = len.div_ceil(std::mem::size_of::<i128>());
        let mut backing: Vec<i128> = Vec::new();
        if let Err(err) = backing.try_reserve_exact(words) {
            tracing::debug!(
                requested = len,
                error = %err,
                "default memory resource allocation failed"
            );
            return Err(exhausted());
        }
        backing.resize(words, 0);

        let mut buffer = MutableBuffer::from(backing);
        buffer.truncate(len);
        Ok(buffer)
    }
}
