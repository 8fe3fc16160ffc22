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

//! System integration
//!
//! Couples one CPU with one memory bus and adds the debugger-facing
//! controls on top: instruction counting, bounded and unbounded runs,
//! breakpoints, tracing and disassembly around the current PC.

use std::collections::BTreeSet;
use std::path::Path;

use super::cpu::{
    CpuSnapshot, CpuTracer, DisassembledInstruction, Disassembler, Instruction, CPU,
};
use super::error::Result;
use super::memory::Bus;

/// Why [`System::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// PC reached a breakpoint; the instruction there has not executed
    Breakpoint(u32),
    /// The instruction limit was reached
    LimitReached,
}

/// PlayStation System
///
/// Owns the CPU and the memory bus and drives execution.
///
/// # Example
/// ```
/// use psxcore::core::system::{RunOutcome, System};
///
/// // J 0xBFC00000 followed by a NOP: an endless loop
/// let mut bios = 0x0BF00000u32.to_le_bytes().to_vec();
/// bios.extend_from_slice(&[0; 4]);
///
/// let mut system = System::new(bios).unwrap();
/// assert_eq!(system.run(Some(10)).unwrap(), RunOutcome::LimitReached);
/// assert_eq!(system.cycles(), 10);
/// ```
pub struct System {
    /// CPU instance
    cpu: CPU,
    /// Memory bus
    bus: Bus,
    /// Instructions executed since reset
    cycles: u64,
    /// Addresses that stop [`run`](Self::run)
    breakpoints: BTreeSet<u32>,
    /// CPU tracer for debugging (optional)
    tracer: Option<CpuTracer>,
    /// Maximum instructions to trace (0 = unlimited)
    trace_limit: usize,
    /// Number of instructions traced so far
    trace_count: usize,
}

impl System {
    /// Create a System from a raw BIOS image
    ///
    /// # Errors
    ///
    /// `InvalidBiosSize` if the image is larger than 512KB
    pub fn new(bios: Vec<u8>) -> Result<Self> {
        Ok(Self::with_bus(Bus::new(bios)?))
    }

    /// Create a System around an existing bus, with the CPU at reset
    pub fn with_bus(bus: Bus) -> Self {
        Self {
            cpu: CPU::new(),
            bus,
            cycles: 0,
            breakpoints: BTreeSet::new(),
            tracer: None,
            trace_limit: 0,
            trace_count: 0,
        }
    }

    /// Load BIOS from file and build a System
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psxcore::core::system::System;
    ///
    /// let system = System::from_bios_file("SCPH1001.BIN").unwrap();
    /// assert_eq!(system.pc(), 0xBFC00000);
    /// ```
    pub fn from_bios_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_bus(Bus::from_bios_file(path)?))
    }

    /// Reset the system to initial state
    ///
    /// Clears RAM/scratchpad but preserves the loaded BIOS. Breakpoints
    /// and the tracer are kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.cycles = 0;
        self.trace_count = 0;
    }

    /// Execute one CPU instruction
    ///
    /// # Errors
    /// Returns the CPU fault if the instruction cannot execute
    pub fn step(&mut self) -> Result<()> {
        self.trace_current();
        self.cpu.cycle(&mut self.bus)?;
        self.cycles += 1;
        Ok(())
    }

    /// Execute N instructions
    pub fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Run until a breakpoint, the instruction limit or a fault
    ///
    /// The instruction at the current PC always executes, even when it
    /// carries a breakpoint, so a run stopped at a breakpoint can resume.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum instructions to execute (`None` = unbounded)
    ///
    /// # Errors
    ///
    /// The first CPU fault. State is left as the faulting cycle left it.
    pub fn run(&mut self, limit: Option<u64>) -> Result<RunOutcome> {
        let mut executed = 0u64;

        loop {
            if limit.is_some_and(|limit| executed >= limit) {
                return Ok(RunOutcome::LimitReached);
            }

            let pc = self.cpu.pc();
            if executed > 0 && self.breakpoints.contains(&pc) {
                log::info!("Breakpoint hit at 0x{:08X}", pc);
                return Ok(RunOutcome::Breakpoint(pc));
            }

            self.step()?;
            executed += 1;
        }
    }

    /// Stop [`run`](Self::run) when PC reaches `address`
    pub fn add_breakpoint(&mut self, address: u32) {
        if self.breakpoints.insert(address) {
            log::debug!("Breakpoint set at 0x{:08X}", address);
        }
    }

    /// Remove a breakpoint; returns whether it was set
    pub fn remove_breakpoint(&mut self, address: u32) -> bool {
        self.breakpoints.remove(&address)
    }

    /// Remove all breakpoints
    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Breakpoints in ascending address order
    pub fn breakpoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.breakpoints.iter().copied()
    }

    /// Disassemble `count` instructions starting at `start`
    pub fn disassemble(&self, start: u32, count: usize) -> Result<Vec<DisassembledInstruction>> {
        Disassembler::disassemble_range(&self.bus, start, count)
    }

    /// Disassemble `context` instructions on each side of PC
    ///
    /// The listing holds `2 * context + 1` lines with PC in the middle.
    pub fn disassemble_around_pc(&self, context: usize) -> Result<Vec<DisassembledInstruction>> {
        let back = (context as u32).wrapping_mul(4);
        let start = self.cpu.pc().wrapping_sub(back);
        self.disassemble(start, context * 2 + 1)
    }

    /// Instruction stored at the CPU's current PC
    ///
    /// After a fault this is the faulting instruction. `None` when the
    /// fetch itself faulted because the address is unmapped.
    pub fn instruction_at_current_pc(&self) -> Option<Instruction> {
        self.bus
            .load_word(self.cpu.current_pc())
            .ok()
            .map(Instruction::new)
    }

    /// Register state for display
    pub fn snapshot(&self) -> CpuSnapshot {
        self.cpu.snapshot()
    }

    /// Get current PC value
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Instructions executed since reset
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Get reference to CPU
    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    /// Get mutable reference to CPU
    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    /// Get reference to memory bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get mutable reference to memory bus
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Enable CPU execution tracing to a file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the trace file to write
    /// * `limit` - Maximum number of instructions to trace (0 = unlimited)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psxcore::core::system::System;
    ///
    /// let mut system = System::from_bios_file("SCPH1001.BIN").unwrap();
    /// system.enable_tracing("trace.log", 5000).unwrap(); // Trace first 5000 instructions
    /// ```
    pub fn enable_tracing(&mut self, path: impl AsRef<Path>, limit: usize) -> Result<()> {
        let path = path.as_ref();
        self.tracer = Some(CpuTracer::new(path)?);
        self.trace_limit = limit;
        self.trace_count = 0;
        log::info!(
            "CPU tracing enabled: {} (limit: {})",
            path.display(),
            if limit == 0 {
                "unlimited".to_string()
            } else {
                limit.to_string()
            }
        );
        Ok(())
    }

    /// Disable CPU execution tracing
    ///
    /// Flushes and closes the trace file.
    pub fn disable_tracing(&mut self) {
        if let Some(mut tracer) = self.tracer.take() {
            if let Err(e) = tracer.flush() {
                log::warn!("Failed to flush trace: {}", e);
            }
            log::info!(
                "CPU tracing disabled (traced {} instructions)",
                self.trace_count
            );
            self.trace_limit = 0;
            self.trace_count = 0;
        }
    }

    /// Check if tracing is currently enabled
    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    /// Get the number of instructions traced so far
    pub fn trace_count(&self) -> usize {
        self.trace_count
    }

    /// Write the trace line for the instruction about to execute
    ///
    /// Trace failures are logged and never stop execution.
    fn trace_current(&mut self) {
        let Some(tracer) = self.tracer.as_mut() else {
            return;
        };

        if self.trace_limit != 0 && self.trace_count >= self.trace_limit {
            if self.trace_count == self.trace_limit {
                log::info!(
                    "Trace limit reached ({} instructions), disabling tracer",
                    self.trace_limit
                );
                let _ = tracer.flush();
                tracer.set_enabled(false);
                // Increment to prevent repeated logging
                self.trace_count += 1;
            }
            return;
        }

        if let Err(e) = tracer.trace(&self.cpu, &self.bus) {
            log::warn!("Failed to write trace: {}", e);
        }
        self.trace_count += 1;

        // Flush every 100 instructions to ensure data is written
        if self.trace_count % 100 == 0 {
            let _ = tracer.flush();
        }
    }
}
