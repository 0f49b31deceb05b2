//! Binary Loader.
//!
//! Raw binary images are copied byte for byte into RAM; there is no header
//! and no relocation. The entry point is the load address.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::soc::memory::{MemoryError, Ram};

/// Failure to load a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("image does not fit in memory: {0}")]
    Memory(#[from] MemoryError),
}

/// Reads a binary file from disk.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads `path` and copies it into `ram` at `addr`.
///
/// # Returns
///
/// The number of bytes loaded.
pub fn load_into(ram: &Ram, path: impl AsRef<Path>, addr: u32) -> Result<usize, LoadError> {
    let image = load_binary(path)?;
    ram.load(addr, &image)?;
    Ok(image.len())
}
