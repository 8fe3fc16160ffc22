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

use std::fmt;

use serde::Serialize;

use crate::core::error::Result;
use crate::core::memory::Bus;

/// CPU (MIPS R3000A) emulation implementation
///
/// # Specifications
/// - Architecture: MIPS I (32-bit)
/// - Registers: 32 general-purpose registers + HI/LO + COP0
/// - One branch delay slot, one load delay slot
///
/// # Example
/// ```
/// use psxcore::core::cpu::CPU;
///
/// let mut cpu = CPU::new();
/// cpu.reset();
/// assert_eq!(cpu.reg(0), 0); // r0 is always 0
/// assert_eq!(cpu.pc(), 0xBFC00000);
/// ```
pub struct CPU {
    /// General purpose registers (r0-r31), double-buffered
    regs: RegisterFile,

    /// Program counter (address of the next instruction to fetch)
    pc: u32,

    /// Next PC (for delay slot handling)
    next_pc: u32,

    /// Address of the instruction executed by the most recent cycle
    current_pc: u32,

    /// HI register (multiplication/division result upper 32 bits)
    hi: u32,

    /// LO register (multiplication/division result lower 32 bits)
    lo: u32,

    /// Coprocessor 0 (System Control Unit)
    cop0: COP0,

    /// Load delay slot management
    ///
    /// On PSX, load instruction results cannot be used in the next instruction
    load_delay: Option<LoadDelay>,

    /// Load committed at the start of the current cycle
    ///
    /// LWL/LWR merge with this value so unaligned pairs work back to back.
    committed_load: Option<LoadDelay>,

    /// Set when the next instruction sits in a branch delay slot
    in_branch_delay: bool,

    /// Current instruction (for debugging)
    current_instruction: Instruction,
}

/// Load delay management structure
///
/// The MIPS R3000A has a load delay slot - the result of a load instruction
/// cannot be used in the immediately following instruction. This structure
/// holds the value until it is committed at the start of the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadDelay {
    /// Target register
    pub reg: u8,
    /// Value to load
    pub value: u32,
}

/// Point-in-time copy of the CPU state for display and serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuSnapshot {
    pub pc: u32,
    pub next_pc: u32,
    pub current_pc: u32,
    pub current_instruction: u32,
    pub hi: u32,
    pub lo: u32,
    pub regs: [u32; 32],
    pub sr: u32,
    pub cause: u32,
    pub epc: u32,
    pub pending_load: Option<LoadDelay>,
}

// Module declarations
mod cop0;
mod decode;
mod disassembler;
mod instruction;
mod instructions;
mod registers;
#[cfg(test)]
mod tests;
mod tracer;

// Re-exports
pub use cop0::StatusFlags;
use cop0::COP0;
pub use decode::Operation;
pub use disassembler::{DisassembledInstruction, Disassembler};
pub use instruction::Instruction;
use registers::RegisterFile;
pub use tracer::CpuTracer;

impl CPU {
    /// Reset vector (BIOS entry point)
    pub const RESET_VECTOR: u32 = 0xBFC00000;

    /// Create a new CPU instance with initial state
    ///
    /// The CPU is initialized with the following state:
    /// - All general purpose registers: 0
    /// - PC: 0xBFC00000 (BIOS entry point)
    /// - next_pc: 0xBFC00004
    /// - COP0 SR: 0x10900000
    /// - COP0 PRID: 0x00000002
    ///
    /// # Returns
    /// Initialized CPU instance
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.reg(0), 0);
    /// assert_eq!(cpu.pc_next(), 0xBFC00004);
    /// ```
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: Self::RESET_VECTOR,
            next_pc: Self::RESET_VECTOR.wrapping_add(4),
            current_pc: Self::RESET_VECTOR,
            hi: 0,
            lo: 0,
            cop0: COP0::new(),
            load_delay: None,
            committed_load: None,
            in_branch_delay: false,
            current_instruction: Instruction::default(),
        }
    }

    /// Reset CPU to initial state
    ///
    /// This mimics the behavior of power-on or hardware reset.
    pub fn reset(&mut self) {
        *self = Self::new();
        log::debug!("CPU reset, PC=0x{:08X}", self.pc);
    }

    /// Read from general purpose register
    ///
    /// Returns the value committed at the end of the last cycle.
    /// r0 always returns 0.
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.reg(0), 0);
    /// ```
    #[inline(always)]
    pub fn reg(&self, index: u8) -> u32 {
        self.regs.read(index & 0x1F)
    }

    /// Inject a register value from outside the CPU (debugger, tests)
    ///
    /// The value is visible immediately. Writes to r0 are ignored.
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg(1, 0x12345678);
    /// assert_eq!(cpu.reg(1), 0x12345678);
    ///
    /// // Writes to r0 are ignored
    /// cpu.set_reg(0, 0xDEADBEEF);
    /// assert_eq!(cpu.reg(0), 0);
    /// ```
    pub fn set_reg(&mut self, index: u8, value: u32) {
        self.regs.inject(index & 0x1F, value);
    }

    /// Stage a register write from the executing instruction
    ///
    /// Becomes visible when the cycle commits.
    #[inline(always)]
    fn write_reg(&mut self, index: u8, value: u32) {
        self.regs.write(index, value);
    }

    /// Write to register with load delay
    ///
    /// The value lands in the register file at the start of the next cycle,
    /// so the instruction after the load still sees the old value.
    /// A new delayed load replaces any pending one.
    fn set_reg_delayed(&mut self, index: u8, value: u32) {
        self.load_delay = Some(LoadDelay { reg: index, value });
    }

    /// Execute exactly one instruction
    ///
    /// This is the main CPU execution step. It performs:
    /// 1. Instruction fetch from memory at PC
    /// 2. PC update (with delay slot handling)
    /// 3. Load delay resolution
    /// 4. Decode and execution
    /// 5. Register commit
    ///
    /// # Arguments
    ///
    /// * `bus` - Memory bus for reading instructions and data
    ///
    /// # Errors
    ///
    /// Any fault raised by the fetch, the decode or the handler. Register
    /// writes staged before the fault (the load committed this cycle) are
    /// still published. A failed fetch only updates `current_pc`.
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::cpu::CPU;
    /// use psxcore::core::memory::Bus;
    ///
    /// let mut cpu = CPU::new();
    /// let mut bus = Bus::new(Vec::new()).unwrap();
    ///
    /// // A zeroed BIOS decodes as NOP (SLL r0, r0, 0)
    /// cpu.cycle(&mut bus).unwrap();
    /// assert_eq!(cpu.pc(), 0xBFC00004);
    /// ```
    pub fn cycle(&mut self, bus: &mut Bus) -> Result<()> {
        let pc = self.pc;
        self.current_pc = pc;

        let instruction = match bus.load_word(pc) {
            Ok(word) => Instruction::new(word),
            Err(err) => {
                log::warn!("Instruction fetch failed at PC=0x{:08X}: {}", pc, err);
                return Err(err);
            }
        };
        self.current_instruction = instruction;

        self.pc = self.next_pc;
        self.next_pc = self.next_pc.wrapping_add(4);

        self.committed_load = self.load_delay.take();
        if let Some(load) = self.committed_load {
            self.regs.write(load.reg, load.value);
        }

        log::trace!("0x{:08X}: {:08X}  {}", pc, instruction.raw(), instruction);

        let result = self.execute_instruction(instruction, bus);
        self.regs.commit();

        if let Err(ref err) = result {
            log::warn!(
                "CPU fault at PC=0x{:08X} (instruction 0x{:08X}): {}",
                pc,
                instruction.raw(),
                err
            );
        }

        result
    }

    /// Check if the next instruction is in a branch delay slot
    pub fn in_delay_slot(&self) -> bool {
        self.in_branch_delay
    }

    /// Get current PC value
    ///
    /// # Returns
    ///
    /// Address of the next instruction to be fetched
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Address fetched after [`pc`](Self::pc)
    pub fn pc_next(&self) -> u32 {
        self.next_pc
    }

    /// Address of the instruction executed (or fetched, when the fetch
    /// faulted) by the most recent cycle
    pub fn current_pc(&self) -> u32 {
        self.current_pc
    }

    /// Instruction executed by the most recent cycle
    pub fn current_instruction(&self) -> Instruction {
        self.current_instruction
    }

    /// HI register
    pub fn hi(&self) -> u32 {
        self.hi
    }

    /// LO register
    pub fn lo(&self) -> u32 {
        self.lo
    }

    /// Read a COP0 register
    pub fn cop0_reg(&self, index: u8) -> u32 {
        self.cop0.regs[(index & 0x1F) as usize]
    }

    /// Write a COP0 register from outside the CPU (debugger, tests)
    pub fn set_cop0_reg(&mut self, index: u8, value: u32) {
        self.cop0.regs[(index & 0x1F) as usize] = value;
    }

    /// Decoded COP0 status register
    pub fn status(&self) -> StatusFlags {
        self.cop0.status()
    }

    /// Load waiting to be committed at the start of the next cycle
    pub fn pending_load(&self) -> Option<LoadDelay> {
        self.load_delay
    }

    /// Capture the architectural state
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg(4, 7);
    /// let snapshot = cpu.snapshot();
    /// assert_eq!(snapshot.regs[4], 7);
    /// assert_eq!(snapshot.sr, 0x10900000);
    /// ```
    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            pc: self.pc,
            next_pc: self.next_pc,
            current_pc: self.current_pc,
            current_instruction: self.current_instruction.raw(),
            hi: self.hi,
            lo: self.lo,
            regs: self.regs.snapshot(),
            sr: self.cop0.regs[COP0::SR],
            cause: self.cop0.regs[COP0::CAUSE],
            epc: self.cop0.regs[COP0::EPC],
            pending_load: self.load_delay,
        }
    }

    /// Dump all CPU registers for debugging
    ///
    /// Prints a formatted dump of all CPU state including:
    /// - Program counter (PC) and next PC
    /// - HI and LO registers
    /// - All 32 general-purpose registers
    /// - COP0 status registers (SR, CAUSE, EPC)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psxcore::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// cpu.dump_registers(); // Print all register values
    /// ```
    pub fn dump_registers(&self) {
        println!("{}", self.snapshot());
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CpuSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CPU Registers:")?;
        writeln!(
            f,
            "PC: 0x{:08X}  Next PC: 0x{:08X}  Current: 0x{:08X} [0x{:08X}]",
            self.pc, self.next_pc, self.current_pc, self.current_instruction
        )?;
        writeln!(f, "HI: 0x{:08X}  LO: 0x{:08X}", self.hi, self.lo)?;
        writeln!(f)?;

        // General-purpose registers in rows of 4
        for (row, values) in self.regs.chunks(4).enumerate() {
            for (col, value) in values.iter().enumerate() {
                write!(f, "r{:2}: 0x{:08X}  ", row * 4 + col, value)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        writeln!(f, "COP0 Registers:")?;
        writeln!(f, "SR:    0x{:08X}", self.sr)?;
        writeln!(f, "CAUSE: 0x{:08X}", self.cause)?;
        write!(f, "EPC:   0x{:08X}", self.epc)?;

        if let Some(load) = self.pending_load {
            write!(f, "\nPending load: r{} <- 0x{:08X}", load.reg, load.value)?;
        }
        Ok(())
    }
}
