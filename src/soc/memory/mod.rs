//! Main Memory.
//!
//! This module defines the `Memory` trait, the contract between the CPU core
//! and its backing store, and `Ram`, a flat zero-based byte array that
//! implements it.
//!
//! # Alignment
//!
//! Accesses of any width may start at any byte address. Multi-byte values are
//! composed in little-endian order. An access fails only if one of its bytes
//! lies outside the memory.
//!
//! # Sharing
//!
//! All methods take `&self`, so one `Ram` can be shared by several cores on
//! different threads. Each byte is an independent relaxed atomic; a 16 or
//! 32-bit access is not atomic as a whole.

/// Memory timing models used to price cache misses.
pub mod controller;

use std::sync::atomic::{AtomicU8, Ordering};

use thiserror::Error;

/// An access touched bytes outside of the memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{width}-byte access at {addr:#010x} outside of {size:#x}-byte memory")]
pub struct MemoryError {
    /// First byte of the failed access.
    pub addr: u32,
    /// Access width in bytes.
    pub width: u32,
    /// Size of the memory in bytes.
    pub size: u64,
}

/// Byte-addressable memory as seen by the CPU core.
///
/// Implementations must be safe to use from several threads at once and
/// define their own ordering guarantees for concurrent accesses.
pub trait Memory: Send + Sync {
    /// Returns the size of the address space in bytes.
    fn size(&self) -> u64;

    /// Reads a byte.
    fn read8(&self, addr: u32) -> Result<u8, MemoryError>;

    /// Reads a little-endian half-word.
    fn read16(&self, addr: u32) -> Result<u16, MemoryError>;

    /// Reads a little-endian word.
    fn read32(&self, addr: u32) -> Result<u32, MemoryError>;

    /// Writes a byte.
    fn write8(&self, addr: u32, val: u8) -> Result<(), MemoryError>;

    /// Writes a little-endian half-word.
    fn write16(&self, addr: u32, val: u16) -> Result<(), MemoryError>;

    /// Writes a little-endian word.
    fn write32(&self, addr: u32, val: u32) -> Result<(), MemoryError>;

    /// Copies `len` bytes starting at `addr` out of memory.
    ///
    /// Default implementation reads bytes individually.
    fn read_bytes(&self, addr: u32, len: usize) -> Result<Vec<u8>, MemoryError> {
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(self.read8(addr.wrapping_add(i as u32))?);
        }
        Ok(out)
    }

    /// Copies a slice of bytes into memory starting at `addr`.
    ///
    /// Default implementation writes bytes individually.
    fn write_bytes(&self, addr: u32, data: &[u8]) -> Result<(), MemoryError> {
        for (i, byte) in data.iter().enumerate() {
            self.write8(addr.wrapping_add(i as u32), *byte)?;
        }
        Ok(())
    }
}

/// Flat RAM starting at address zero.
pub struct Ram {
    bytes: Box<[AtomicU8]>,
}

impl Ram {
    /// Creates a zero-filled RAM of `size` bytes.
    pub fn new(size: usize) -> Self {
        let bytes = (0..size).map(|_| AtomicU8::new(0)).collect();
        Self { bytes }
    }

    /// Writes a binary image at `addr`.
    pub fn load(&self, addr: u32, data: &[u8]) -> Result<(), MemoryError> {
        self.check(addr, data.len())?;
        log::info!("[Loader] Writing {} bytes to {:#x}", data.len(), addr);
        self.write_bytes(addr, data)
    }

    #[inline]
    fn check(&self, addr: u32, len: usize) -> Result<usize, MemoryError> {
        let end = (addr as u64).checked_add(len as u64);
        if end.map_or(true, |end| end > self.bytes.len() as u64) {
            return Err(MemoryError {
                addr,
                width: u32::try_from(len).unwrap_or(u32::MAX),
                size: self.bytes.len() as u64,
            });
        }
        Ok(addr as usize)
    }

    #[inline]
    fn load_le<const N: usize>(&self, addr: u32) -> Result<[u8; N], MemoryError> {
        let base = self.check(addr, N)?;
        let mut out = [0u8; N];
        for (i, b) in out.iter_mut().enumerate() {
            *b = self.bytes[base + i].load(Ordering::Relaxed);
        }
        Ok(out)
    }

    #[inline]
    fn store_le<const N: usize>(&self, addr: u32, data: [u8; N]) -> Result<(), MemoryError> {
        let base = self.check(addr, N)?;
        for (i, b) in data.iter().enumerate() {
            self.bytes[base + i].store(*b, Ordering::Relaxed);
        }
        Ok(())
    }
}

impl Memory for Ram {
    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read8(&self, addr: u32) -> Result<u8, MemoryError> {
        Ok(self.load_le::<1>(addr)?[0])
    }

    fn read16(&self, addr: u32) -> Result<u16, MemoryError> {
        self.load_le(addr).map(u16::from_le_bytes)
    }

    fn read32(&self, addr: u32) -> Result<u32, MemoryError> {
        self.load_le(addr).map(u32::from_le_bytes)
    }

    fn write8(&self, addr: u32, val: u8) -> Result<(), MemoryError> {
        self.store_le(addr, [val])
    }

    fn write16(&self, addr: u32, val: u16) -> Result<(), MemoryError> {
        self.store_le(addr, val.to_le_bytes())
    }

    fn write32(&self, addr: u32, val: u32) -> Result<(), MemoryError> {
        self.store_le(addr, val.to_le_bytes())
    }

    fn write_bytes(&self, addr: u32, data: &[u8]) -> Result<(), MemoryError> {
        let base = self.check(addr, data.len())?;
        for (i, b) in data.iter().enumerate() {
            self.bytes[base + i].store(*b, Ordering::Relaxed);
        }
        Ok(())
    }
}
