//! Simulator Configuration.
//!
//! Configuration is read from a TOML file. Every section and field has a
//! default, so an empty file (or `Config::default()`) describes the stock
//! machine: 16 MiB of RAM, programs loaded at `0x200`, and two 32-byte-line,
//! 256-line, 4-way LRU caches.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::isa::abi::SIM_ROUTINE_BASE;

const DEFAULT_RAM_SIZE: u32 = 0x0100_0000;
const DEFAULT_LOAD_ADDR: u32 = 0x0000_0200;

const DEFAULT_LINE_BYTES: u32 = 32;
const DEFAULT_NUM_LINES: u32 = 256;
const DEFAULT_WAYS: u32 = 4;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{cache}: {reason}")]
    Cache { cache: &'static str, reason: String },

    #[error("memory: {0}")]
    Memory(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub memory: MemoryConfig,
    pub cache: CacheHierarchyConfig,
}

impl Config {
    /// Reads, parses and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a TOML configuration string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.icache.validate("cache.icache")?;
        self.cache.dcache.validate("cache.dcache")?;

        let ram = self.memory.ram_size;
        if ram == 0 {
            return Err(ConfigError::Memory("ram_size must be non-zero".into()));
        }
        if ram > SIM_ROUTINE_BASE {
            return Err(ConfigError::Memory(format!(
                "ram_size {:#x} overlaps the simulator routine page at {:#x}",
                ram, SIM_ROUTINE_BASE
            )));
        }
        if self.general.load_addr >= ram {
            return Err(ConfigError::Memory(format!(
                "load_addr {:#x} is outside of RAM",
                self.general.load_addr
            )));
        }
        Ok(())
    }

    /// Returns the initial stack pointer: the configured one, or the top of RAM.
    pub fn stack_pointer(&self) -> u32 {
        self.general.stack_pointer.unwrap_or(self.memory.ram_size)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    pub trace_instructions: bool,
    pub load_addr: u32,
    pub stack_pointer: Option<u32>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            load_addr: DEFAULT_LOAD_ADDR,
            stack_pointer: None,
        }
    }
}

/// Memory timing model behind the caches.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryController {
    /// Fixed `row_miss_latency` per miss.
    #[default]
    Simple,
    /// Row-buffer aware timing using `t_cas`, `t_ras` and `t_pre`.
    Dram,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MemoryConfig {
    pub ram_size: u32,
    pub controller: MemoryController,
    pub row_miss_latency: u64,
    pub t_cas: u64,
    pub t_ras: u64,
    pub t_pre: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_size: DEFAULT_RAM_SIZE,
            controller: MemoryController::Simple,
            row_miss_latency: 20,
            t_cas: 14,
            t_ras: 14,
            t_pre: 14,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CacheHierarchyConfig {
    pub icache: CacheConfig,
    pub dcache: CacheConfig,
}

/// Victim selection within a cache set.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementPolicy {
    #[default]
    Lru,
    Fifo,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub line_bytes: u32,
    pub num_lines: u32,
    pub ways: u32,
    pub policy: ReplacementPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            line_bytes: DEFAULT_LINE_BYTES,
            num_lines: DEFAULT_NUM_LINES,
            ways: DEFAULT_WAYS,
            policy: ReplacementPolicy::Lru,
        }
    }
}

impl CacheConfig {
    fn validate(&self, cache: &'static str) -> Result<(), ConfigError> {
        let fail = |reason: String| Err(ConfigError::Cache { cache, reason });
        if !self.line_bytes.is_power_of_two() {
            return fail(format!("line_bytes {} is not a power of two", self.line_bytes));
        }
        if self.num_lines == 0 || self.ways == 0 {
            return fail("num_lines and ways must be non-zero".into());
        }
        if self.num_lines % self.ways != 0 {
            return fail(format!(
                "num_lines {} is not a multiple of ways {}",
                self.num_lines, self.ways
            ));
        }
        Ok(())
    }
}
