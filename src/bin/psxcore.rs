// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use psxcore::core::config::{self, RunnerConfig};
use psxcore::core::error::{EmulatorError, Result};
use psxcore::core::system::{RunOutcome, System};

/// PlayStation R3000 CPU runner
#[derive(Parser)]
#[command(name = "psxcore")]
#[command(about = "Run a PlayStation BIOS image on the R3000 core", long_about = None)]
struct Args {
    /// Path to PlayStation BIOS file (e.g., SCPH1001.BIN)
    bios_file: Option<PathBuf>,

    /// Number of instructions to execute (default: until a fault)
    #[arg(short = 'n', long)]
    instructions: Option<u64>,

    /// Write an execution trace to FILE
    #[arg(short = 't', long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Stop when PC reaches ADDR (hex, repeatable)
    #[arg(short = 'b', long = "breakpoint", value_name = "ADDR", value_parser = parse_breakpoint)]
    breakpoints: Vec<u32>,

    /// Print COUNT instructions from the reset vector and exit
    #[arg(short = 'd', long, value_name = "COUNT")]
    disassemble: Option<usize>,

    /// TOML configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final register snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn parse_breakpoint(text: &str) -> std::result::Result<u32, String> {
    config::parse_address(text).map_err(|e| e.to_string())
}

/// Merge config file, environment and command line, in that order
fn load_config(args: &Args) -> Result<RunnerConfig> {
    let mut cfg = match &args.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };
    cfg.apply_env()?;

    if let Some(bios) = &args.bios_file {
        cfg.bios = Some(bios.clone());
    }
    if let Some(n) = args.instructions {
        cfg.instructions = Some(n);
    }
    if let Some(trace) = &args.trace {
        cfg.trace = Some(trace.clone());
    }
    cfg.breakpoints.extend(&args.breakpoints);

    Ok(cfg)
}

fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // Only log if the error is NOT "file not found"
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let args = Args::parse();
    let cfg = load_config(&args);

    let default_filter = cfg
        .as_ref()
        .ok()
        .and_then(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("psxcore v{}", env!("CARGO_PKG_VERSION"));

    let cfg = cfg.inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    let Some(bios_path) = cfg.bios.as_ref() else {
        error!(
            "No BIOS given (pass a path, set bios in the config or {})",
            config::ENV_BIOS
        );
        return Err(EmulatorError::Config("missing BIOS path".to_string()));
    };

    info!("Loading BIOS from: {}", bios_path.display());
    let mut system = System::from_bios_file(bios_path)
        .inspect_err(|e| error!("Failed to load BIOS: {}", e))?;

    if let Some(count) = args.disassemble {
        for line in system.disassemble(system.pc(), count)? {
            println!("{}", line);
        }
        return Ok(());
    }

    if let Some(trace) = &cfg.trace {
        system.enable_tracing(trace, 0)?;
    }
    for &address in &cfg.breakpoints {
        system.add_breakpoint(address);
    }

    info!("Starting emulation...");
    let outcome = system.run(cfg.instructions);
    system.disable_tracing();

    match outcome {
        Ok(RunOutcome::Breakpoint(pc)) => info!("Stopped at breakpoint 0x{:08X}", pc),
        Ok(RunOutcome::LimitReached) => info!("Instruction limit reached"),
        Err(e) => {
            let cpu = system.cpu();
            error!("Fault: {}", e);
            match system.instruction_at_current_pc() {
                Some(instruction) => {
                    error!("At PC=0x{:08X}: {}", cpu.current_pc(), instruction)
                }
                None => error!("At PC=0x{:08X}: instruction fetch failed", cpu.current_pc()),
            }
            error!("Instruction count: {}", system.cycles());
            cpu.dump_registers();
            return Err(e);
        }
    }

    info!("Total instructions: {}", system.cycles());
    info!("Final PC: 0x{:08X}", system.pc());

    if args.json {
        let json = serde_json::to_string_pretty(&system.snapshot())?;
        println!("{}", json);
    }

    Ok(())
}
