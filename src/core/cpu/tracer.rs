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

//! CPU execution tracer for debugging
//!
//! Logs CPU execution state to a file for analysis and debugging.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{Disassembler, CPU};
use crate::core::error::Result;
use crate::core::memory::Bus;

/// CPU execution tracer
///
/// Records CPU state and instruction execution to a file for debugging purposes.
/// Each line in the trace file shows:
/// - Program counter
/// - Raw instruction encoding
/// - Disassembled instruction
/// - Values of selected registers
///
/// Call [`trace`](Self::trace) before each [`CPU::cycle`] to log the
/// instruction about to execute.
///
/// # Example
/// ```no_run
/// use psxcore::core::cpu::{CPU, CpuTracer};
/// use psxcore::core::memory::Bus;
///
/// let mut cpu = CPU::new();
/// let mut bus = Bus::from_bios_file("SCPH1001.BIN").unwrap();
/// let mut tracer = CpuTracer::new("trace.log").unwrap();
///
/// // Execute and trace
/// tracer.trace(&cpu, &bus).unwrap();
/// cpu.cycle(&mut bus).unwrap();
/// ```
pub struct CpuTracer {
    /// Enable/disable tracing
    enabled: bool,
    /// Output file handle
    output: BufWriter<File>,
    /// Lines written so far
    lines: u64,
}

impl CpuTracer {
    /// Registers shown by [`trace`](Self::trace)
    const DEFAULT_REGS: [u8; 3] = [1, 2, 3];

    /// Create a new CPU tracer
    ///
    /// Opens a file for writing trace output. If the file exists, it will be overwritten.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the output trace file
    ///
    /// # Returns
    ///
    /// - `Ok(CpuTracer)` if the file was opened successfully
    /// - `Err(EmulatorError::Io)` if file creation fails
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let output = BufWriter::new(File::create(path)?);
        Ok(Self {
            enabled: true,
            output,
            lines: 0,
        })
    }

    /// Enable or disable tracing
    ///
    /// When disabled, trace() calls will return immediately without writing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if tracing is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of trace lines written
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Trace current CPU state
    ///
    /// Writes a single line containing the PC, the raw word at PC, its
    /// disassembly and registers r1-r3.
    ///
    /// # Errors
    ///
    /// - `Io` if writing fails
    /// - `UnmappedAddress` if PC is unmapped
    pub fn trace(&mut self, cpu: &CPU, bus: &Bus) -> Result<()> {
        self.trace_with_regs(cpu, bus, &Self::DEFAULT_REGS)
    }

    /// Trace with custom register selection
    ///
    /// Like `trace()`, but allows specifying which registers to display.
    ///
    /// # Arguments
    ///
    /// * `cpu` - CPU instance to trace
    /// * `bus` - Memory bus for fetching instructions
    /// * `regs` - Register numbers to display (up to 8 registers)
    pub fn trace_with_regs(&mut self, cpu: &CPU, bus: &Bus, regs: &[u8]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let pc = cpu.pc();
        let instruction = bus.load_word(pc)?;
        let disasm = Disassembler::disassemble(instruction);

        write!(
            self.output,
            "PC=0x{:08X} [0x{:08X}] {:30} |",
            pc, instruction, disasm
        )?;

        for &reg in regs.iter().take(8) {
            write!(self.output, " r{}={:08X}", reg, cpu.reg(reg))?;
        }

        writeln!(self.output)?;
        self.lines += 1;

        Ok(())
    }

    /// Flush the output buffer
    ///
    /// Forces any buffered trace data to be written to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn bios_with(words: &[u32]) -> Bus {
        let bytes = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        Bus::new(bytes).unwrap()
    }

    #[test]
    fn test_tracer_enable_disable() {
        let dir = tempdir().unwrap();
        let mut tracer = CpuTracer::new(dir.path().join("enable.log")).unwrap();
        assert!(tracer.is_enabled());

        tracer.set_enabled(false);
        assert!(!tracer.is_enabled());

        tracer.set_enabled(true);
        assert!(tracer.is_enabled());
    }

    #[test]
    fn test_tracer_basic_trace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.log");
        let cpu = CPU::new();
        let bus = bios_with(&[0x00411820]);

        let mut tracer = CpuTracer::new(&path).unwrap();
        tracer.trace(&cpu, &bus).unwrap();
        tracer.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("PC=0xBFC00000 [0x00411820] ADD     $3, $2, $1"));
        assert!(contents.contains("r1=00000000 r2=00000000 r3=00000000"));
        assert_eq!(tracer.lines_written(), 1);
    }

    #[test]
    fn test_tracer_disabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("disabled.log");
        let cpu = CPU::new();
        let bus = bios_with(&[]);

        let mut tracer = CpuTracer::new(&path).unwrap();
        tracer.set_enabled(false);
        tracer.trace(&cpu, &bus).unwrap();
        tracer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert_eq!(tracer.lines_written(), 0);
    }

    #[test]
    fn test_tracer_with_custom_regs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.log");
        let mut cpu = CPU::new();
        let bus = bios_with(&[]);

        cpu.set_reg(4, 0x12345678);
        cpu.set_reg(5, 0xABCDEF00);

        let mut tracer = CpuTracer::new(&path).unwrap();
        tracer.trace_with_regs(&cpu, &bus, &[4, 5]).unwrap();
        tracer.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("r4=12345678"));
        assert!(contents.contains("r5=ABCDEF00"));
    }

    #[test]
    fn test_tracer_follows_execution() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");
        let mut cpu = CPU::new();
        let mut bus = bios_with(&[0x3C011234, 0x00000000]);

        let mut tracer = CpuTracer::new(&path).unwrap();
        for _ in 0..2 {
            tracer.trace(&cpu, &bus).unwrap();
            cpu.cycle(&mut bus).unwrap();
        }
        tracer.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("LUI     $1, 1234h"));
        assert!(lines[1].starts_with("PC=0xBFC00004"));
        assert!(lines[1].contains("r1=12340000"));
    }
}
