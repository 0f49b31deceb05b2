//! MRISC Simulator CLI.
//!
//! Loads a raw binary into RAM, runs it from the load address and exits
//! with the guest's exit code. A simulator fault exits with 255.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use mrisc_sim::config::Config;
use mrisc_sim::core::Cpu;
use mrisc_sim::sim::loader;
use mrisc_sim::soc::memory::Ram;

/// Exit status used when the run ends in a trap.
const FAULT_EXIT_STATUS: i32 = 255;

/// Command-line arguments for the MRISC simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "MRISC32 Instruction Set Simulator")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load (and entry) address; overrides `general.load_addr`.
    #[arg(long, value_parser = parse_u32)]
    load_addr: Option<u32>,

    /// RAM size in bytes; overrides `memory.ram_size`.
    #[arg(long, value_parser = parse_u32)]
    ram_size: Option<u32>,

    /// Trace every executed instruction.
    #[arg(long)]
    trace: bool,

    /// Log informational messages.
    #[arg(short, long)]
    verbose: bool,

    /// Print statistics after the run.
    #[arg(long)]
    stats: bool,

    /// Write statistics as JSON to this file.
    #[arg(long)]
    stats_json: Option<PathBuf>,

    /// Abort the run after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Raw binary to execute.
    binary: PathBuf,
}

/// Parses decimal or `0x`-prefixed hexadecimal numbers.
fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", s, e))
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(addr) = args.load_addr {
        config.general.load_addr = addr;
    }
    if let Some(size) = args.ram_size {
        config.memory.ram_size = size;
    }
    if args.trace {
        config.general.trace_instructions = true;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<i32> {
    let config = build_config(&args)?;

    let ram = Ram::new(config.memory.ram_size as usize);
    let load_addr = config.general.load_addr;
    let size = loader::load_into(&ram, &args.binary, load_addr)
        .with_context(|| format!("loading {}", args.binary.display()))?;
    log::info!(
        "[Loader] {} ({} bytes) @ {:#x}",
        args.binary.display(),
        size,
        load_addr
    );

    let mut cpu = Cpu::new(&ram, &config);

    if let Some(secs) = args.timeout {
        let abort = cpu.abort_handle();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            abort.store(true, Ordering::Relaxed);
        });
    }

    let result = cpu.run(load_addr, config.stack_pointer());

    if args.stats {
        cpu.dump_stats();
    }
    if let Some(path) = &args.stats_json {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &cpu.stats)
            .context("writing statistics")?;
    }

    match result {
        Ok(code) => Ok(code as i32),
        Err(trap) => {
            eprintln!("\n[!] FATAL TRAP: {}", trap);
            cpu.write_regs(&mut io::stderr().lock())
                .context("writing registers")?;
            Ok(FAULT_EXIT_STATUS)
        }
    }
}

fn main() {
    let args = Args::parse();
    let default_filter = if args.trace {
        "trace"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}
