//! Minimal memory-resource trait + in-memory implementations returning Arrow
//! [`MutableBuffer`]s.
//!
//! Search results are written straight into the buffer a resource hands out and
//! then frozen into an Arrow array without copying, so the resource fully decides
//! where result memory comes from. Resources are passed explicitly to every call;
//! there is no process-wide default.

use arrow::buffer::MutableBuffer;
use arrow::datatypes::ArrowNativeType;
use std::sync::Arc;
use tabseek_result::{Error, Result};

pub mod capped;
pub use capped::*;

pub mod default_resource;
pub use default_resource::*;

pub mod instrumented;
pub use instrumented::*;

pub trait MemoryResource: Send + Sync {
    /// Allocate a zero-initialised buffer holding exactly `len` bytes.
    fn allocate(&self, len: usize) -> Result<MutableBuffer>;
}

impl<M: MemoryResource + ?Sized> MemoryResource for &M {
    fn allocate(&self, len: usize) -> Result<MutableBuffer> {
        (**self).allocate(len)
    }
}

impl<M: MemoryResource + ?Sized> MemoryResource for Box<M> {
    fn allocate(&self, len: usize) -> Result<MutableBuffer> {
        (**self).allocate(len)
    }
}

impl<M: MemoryResource + ?Sized> MemoryResource for Arc<M> {
    fn allocate(&self, len: usize) -> Result<MutableBuffer> {
        (**self).allocate(len)
    }
}

/// Allocate room for `len` values of `T` from `resource`.
///
/// The returned buffer's length is `len * size_of::<T>()`, so
/// [`MutableBuffer::typed_data_mut`] yields exactly `len` zeroed slots.
pub fn allocate_typed<T, M>(resource: &M, len: usize) -> Result<MutableBuffer>
where
    T: ArrowNativeType,
    M: MemoryResource + ?Sized,
{
    let bytes = len.checked_mul(std::mem::size_of::<T>()).ok_or_else(|| {
        Error::execution_fault(format_args!("allocation of {len} elements overflows usize"))
    })?;
    let buffer = resource.allocate(bytes)?;
    if buffer.len() != bytes {
        return Err(Error::Internal(format!(
            "memory resource returned {} bytes, {bytes} were requested",
            buffer.len()
        )));
    }
    tracing::trace!(elements = len, bytes, "allocated typed buffer");
    Ok(buffer)
}
