//! Host side of the simulator-routine bridge.
//!
//! Owns the guest file-descriptor table and performs the actual host I/O
//! for the routines in `isa::abi::SimRoutine`. Guest fds 0, 1 and 2 map to
//! host stdin, the configured output stream and host stderr; files opened
//! by the guest get descriptors from 3 upward.
//!
//! Every operation returns `Result<u32, HostError>`; the routine dispatcher
//! turns an error into the guest-visible `-1`.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::{self, DirBuilder, File, Metadata, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{DirBuilderExt, MetadataExt, OpenOptionsExt};
use std::path::PathBuf;

use thiserror::Error;

use crate::isa::abi::{open_flags, whence};
use crate::soc::memory::{Memory, MemoryError};

/// Longest guest path, including the terminating NUL.
pub const MAX_PATH_LEN: u32 = 4096;

const STDIN_FD: u32 = 0;
const STDOUT_FD: u32 = 1;
const STDERR_FD: u32 = 2;
const FIRST_FILE_FD: u32 = 3;

/// Why a host operation failed.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("guest buffer: {0}")]
    Memory(#[from] MemoryError),

    #[error("bad file descriptor {0}")]
    BadFd(u32),

    #[error("unterminated path at {0:#010x}")]
    PathTooLong(u32),

    #[error("invalid whence {0}")]
    InvalidWhence(u32),

    #[error("file offset {0:#x} does not fit in a guest offset")]
    OffsetOverflow(u64),

    #[error("no free file descriptor")]
    TooManyFiles,
}

/// Guest file-descriptor table and output stream.
pub struct HostIo {
    output: Box<dyn Write + Send>,
    output_is_stdout: bool,
    files: HashMap<u32, File>,
}

impl Default for HostIo {
    fn default() -> Self {
        Self::new()
    }
}

impl HostIo {
    /// Creates a table whose guest stdout is the host stdout.
    pub fn new() -> Self {
        Self {
            output: Box::new(io::stdout()),
            output_is_stdout: true,
            files: HashMap::new(),
        }
    }

    /// Redirects guest fd 1 (and `putchar`) to `output`.
    pub fn set_output(&mut self, output: Box<dyn Write + Send>) {
        self.output = output;
        self.output_is_stdout = false;
    }

    /// Closes every guest-opened file.
    pub fn reset(&mut self) {
        self.files.clear();
    }

    /// Number of files currently open by the guest.
    pub fn open_files(&self) -> usize {
        self.files.len()
    }

    pub fn putchar(&mut self, c: u32) -> Result<u32, HostError> {
        self.output.write_all(&[c as u8])?;
        self.output.flush()?;
        Ok(c & 0xff)
    }

    pub fn close(&mut self, fd: u32) -> Result<u32, HostError> {
        if fd < FIRST_FILE_FD {
            return Ok(0);
        }
        self.files.remove(&fd).ok_or(HostError::BadFd(fd))?;
        Ok(0)
    }

    pub fn fstat(&mut self, mem: &dyn Memory, fd: u32, buf: u32) -> Result<u32, HostError> {
        let record = if fd < FIRST_FILE_FD {
            char_device_record()
        } else {
            stat_record(&self.file(fd)?.metadata()?)
        };
        mem.write_bytes(buf, &record)?;
        Ok(0)
    }

    /// Returns 1 if `fd` refers to a terminal, 0 otherwise.
    pub fn isatty(&self, fd: u32) -> u32 {
        let host_fd = match fd {
            STDIN_FD | STDERR_FD => fd as libc::c_int,
            STDOUT_FD if self.output_is_stdout => fd as libc::c_int,
            _ => return 0,
        };
        // SAFETY: isatty only inspects the descriptor.
        let tty = unsafe { libc::isatty(host_fd) };
        (tty == 1) as u32
    }

    pub fn link(&mut self, mem: &dyn Memory, old: u32, new: u32) -> Result<u32, HostError> {
        let old = read_path(mem, old)?;
        let new = read_path(mem, new)?;
        fs::hard_link(old, new)?;
        Ok(0)
    }

    pub fn lseek(&mut self, fd: u32, offset: u32, from: u32) -> Result<u32, HostError> {
        let pos = match from {
            whence::SET => SeekFrom::Start(offset as u64),
            whence::CUR => SeekFrom::Current(offset as i32 as i64),
            whence::END => SeekFrom::End(offset as i32 as i64),
            other => return Err(HostError::InvalidWhence(other)),
        };
        let new_pos = self.file(fd)?.seek(pos)?;
        if new_pos > i32::MAX as u64 {
            return Err(HostError::OffsetOverflow(new_pos));
        }
        Ok(new_pos as u32)
    }

    pub fn mkdir(&mut self, mem: &dyn Memory, path: u32, mode: u32) -> Result<u32, HostError> {
        let path = read_path(mem, path)?;
        DirBuilder::new().mode(mode).create(path)?;
        Ok(0)
    }

    /// Opens a file with newlib-style `flags` and returns the lowest free
    /// guest fd.
    ///
    /// Creation, truncation and exclusivity go straight to the host `open`,
    /// so they work with any access mode.
    pub fn open(
        &mut self,
        mem: &dyn Memory,
        path: u32,
        flags: u32,
        mode: u32,
    ) -> Result<u32, HostError> {
        let path = read_path(mem, path)?;
        let access = flags & open_flags::ACCMODE;

        let mut host_flags = 0;
        for (guest, host) in [
            (open_flags::APPEND, libc::O_APPEND),
            (open_flags::CREAT, libc::O_CREAT),
            (open_flags::TRUNC, libc::O_TRUNC),
            (open_flags::EXCL, libc::O_EXCL),
        ] {
            if flags & guest != 0 {
                host_flags |= host;
            }
        }

        let fd = (FIRST_FILE_FD..=u32::MAX)
            .find(|fd| !self.files.contains_key(fd))
            .ok_or(HostError::TooManyFiles)?;
        let file = OpenOptions::new()
            .read(access == open_flags::RDONLY || access == open_flags::RDWR)
            .write(access == open_flags::WRONLY || access == open_flags::RDWR)
            .custom_flags(host_flags)
            .mode(mode)
            .open(path)?;
        self.files.insert(fd, file);
        Ok(fd)
    }

    pub fn read(&mut self, mem: &dyn Memory, fd: u32, buf: u32, len: u32) -> Result<u32, HostError> {
        check_buffer(mem, buf, len)?;
        let mut data = vec![0u8; len as usize];
        let n = match fd {
            STDIN_FD => io::stdin().read(&mut data)?,
            STDOUT_FD | STDERR_FD => return Err(HostError::BadFd(fd)),
            _ => self.file(fd)?.read(&mut data)?,
        };
        mem.write_bytes(buf, &data[..n])?;
        Ok(n as u32)
    }

    pub fn stat(&mut self, mem: &dyn Memory, path: u32, buf: u32) -> Result<u32, HostError> {
        let path = read_path(mem, path)?;
        let record = stat_record(&fs::metadata(path)?);
        mem.write_bytes(buf, &record)?;
        Ok(0)
    }

    pub fn unlink(&mut self, mem: &dyn Memory, path: u32) -> Result<u32, HostError> {
        fs::remove_file(read_path(mem, path)?)?;
        Ok(0)
    }

    pub fn write(
        &mut self,
        mem: &dyn Memory,
        fd: u32,
        buf: u32,
        len: u32,
    ) -> Result<u32, HostError> {
        check_buffer(mem, buf, len)?;
        let data = mem.read_bytes(buf, len as usize)?;
        match fd {
            STDIN_FD => return Err(HostError::BadFd(fd)),
            STDOUT_FD => {
                self.output.write_all(&data)?;
                self.output.flush()?;
            }
            STDERR_FD => io::stderr().write_all(&data)?,
            _ => self.file(fd)?.write_all(&data)?,
        }
        Ok(len)
    }

    fn file(&mut self, fd: u32) -> Result<&mut File, HostError> {
        self.files.get_mut(&fd).ok_or(HostError::BadFd(fd))
    }
}

/// Fails unless `buf..buf + len` lies inside guest memory.
fn check_buffer(mem: &dyn Memory, buf: u32, len: u32) -> Result<(), HostError> {
    if buf as u64 + len as u64 > mem.size() {
        return Err(MemoryError {
            addr: buf,
            width: len,
            size: mem.size(),
        }
        .into());
    }
    Ok(())
}

/// Reads a NUL-terminated guest path.
fn read_path(mem: &dyn Memory, addr: u32) -> Result<PathBuf, HostError> {
    let mut bytes = Vec::new();
    for i in 0..MAX_PATH_LEN {
        let b = mem.read8(addr.wrapping_add(i))?;
        if b == 0 {
            return Ok(PathBuf::from(OsStr::from_bytes(&bytes)));
        }
        bytes.push(b);
    }
    Err(HostError::PathTooLong(addr))
}

fn encode_record(words: [u32; 8]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Guest stat record: dev, ino, mode, nlink, uid, gid, size, mtime.
fn stat_record(meta: &Metadata) -> Vec<u8> {
    encode_record([
        meta.dev() as u32,
        meta.ino() as u32,
        meta.mode(),
        meta.nlink() as u32,
        meta.uid(),
        meta.gid(),
        meta.size() as u32,
        meta.mtime() as u32,
    ])
}

/// Record reported for the standard streams.
fn char_device_record() -> Vec<u8> {
    const MODE_RW_USER: u32 = 0o620;
    encode_record([0, 0, libc::S_IFCHR as u32 | MODE_RW_USER, 1, 0, 0, 0, 0])
}
