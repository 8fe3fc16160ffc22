// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Instruction encoders and program fixtures for CPU tests

use super::super::CPU;
use crate::core::memory::Bus;

/// Base of RAM through KSEG0, used as a data area
pub(super) const RAM: u32 = 0x8000_0000;

/// Encode an R-type (SPECIAL) instruction
pub(super) fn rtype(funct: u32, rs: u32, rt: u32, rd: u32, shamt: u32) -> u32 {
    (rs << 21) | (rt << 16) | (rd << 11) | (shamt << 6) | funct
}

/// Encode an I-type instruction
pub(super) fn itype(opcode: u32, rs: u32, rt: u32, imm: u16) -> u32 {
    (opcode << 26) | (rs << 21) | (rt << 16) | imm as u32
}

/// Encode a J-type instruction
pub(super) fn jtype(opcode: u32, target: u32) -> u32 {
    (opcode << 26) | (target & 0x03FF_FFFF)
}

/// Encode a COP0 move (`selector` in rs)
pub(super) fn cop0(selector: u32, rt: u32, rd: u32) -> u32 {
    (0x10 << 26) | (selector << 21) | (rt << 16) | (rd << 11)
}

/// CPU at the reset vector with `program` at the start of BIOS
pub(super) fn setup(program: &[u32]) -> (CPU, Bus) {
    let bios = program.iter().flat_map(|w| w.to_le_bytes()).collect();
    let bus = Bus::new(bios).unwrap();
    (CPU::new(), bus)
}

/// Execute `n` cycles, panicking on any fault
pub(super) fn run(cpu: &mut CPU, bus: &mut Bus, n: usize) {
    for _ in 0..n {
        cpu.cycle(bus).unwrap();
    }
}

/// Execute a single instruction with the given registers injected
pub(super) fn exec(word: u32, regs: &[(u8, u32)]) -> CPU {
    let (mut cpu, mut bus) = setup(&[word]);
    for &(index, value) in regs {
        cpu.set_reg(index, value);
    }
    cpu.cycle(&mut bus).unwrap();
    cpu
}
