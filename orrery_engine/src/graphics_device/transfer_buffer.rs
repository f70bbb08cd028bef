/// Transfer buffer trait - CPU-writable staging memory

use std::any::Any;
use crate::error::Result;

/// Descriptor for creating a transfer buffer
#[derive(Debug, Clone, Copy)]
pub struct TransferBufferDesc {
    /// Size in bytes
    pub size: u64,
}

/// CPU-writable staging memory used as the source of a copy pass
///
/// Usage is always `map` -> one or more `write` -> `unmap`, then an
/// `upload_to_buffer`/`upload_to_texture` command reading from it.
pub trait TransferBuffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Map for writing
    ///
    /// With `cycle` set, previous contents may be discarded and the backend
    /// may hand out a fresh allocation if a copy from the old one is still
    /// in flight.
    fn map(&self, cycle: bool) -> Result<()>;

    /// Write bytes at `offset`; the buffer must be mapped
    fn write(&self, offset: u64, data: &[u8]) -> Result<()>;

    /// Unmap; written bytes become visible to copy commands
    fn unmap(&self) -> Result<()>;

    /// Backend downcast hook
    fn as_any(&self) -> &dyn Any;
}
