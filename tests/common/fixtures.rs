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

//! Fixtures for building CPUs, buses and systems around test programs

use psxcore::core::cpu::CPU;
use psxcore::core::memory::Bus;
use psxcore::core::system::System;

/// Base of the KSEG0 RAM mirror where test programs are placed
#[allow(dead_code)]
pub const PROGRAM_BASE: u32 = 0x8000_0000;

/// Little-endian BIOS image holding `program` at the reset vector
#[allow(dead_code)]
pub fn bios_image(program: &[u32]) -> Vec<u8> {
    program.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Create a CPU with an empty-BIOS memory bus for testing
#[allow(dead_code)]
pub fn create_cpu_with_bus() -> (CPU, Bus) {
    let cpu = CPU::new();
    let bus = Bus::new(Vec::new()).expect("empty BIOS is valid");
    (cpu, bus)
}

/// System whose BIOS starts with `program`
#[allow(dead_code)]
pub fn create_test_system(program: &[u32]) -> System {
    System::new(bios_image(program)).expect("BIOS fits in 512KB")
}

/// Load a test program into memory at specified address
#[allow(dead_code)]
pub fn load_test_program(bus: &mut Bus, start_addr: u32, program: &[u32]) {
    for (i, &instruction) in program.iter().enumerate() {
        let addr = start_addr + (i as u32 * 4);
        bus.store_word(addr, instruction)
            .expect("Failed to write to memory");
    }
}

/// CPU positioned at `PROGRAM_BASE` with `program` loaded into RAM
///
/// The reset vector jumps through `$26`, which is left holding
/// `PROGRAM_BASE`.
#[allow(dead_code)]
pub fn cpu_running(program: &[u32]) -> (CPU, Bus) {
    let (mut cpu, mut bus) = create_cpu_with_bus();
    load_test_program(&mut bus, PROGRAM_BASE, program);
    // LUI $26, 0x8000; JR $26; NOP
    load_test_program(&mut bus, CPU::RESET_VECTOR, &[0x3C1A8000, 0x03400008, 0]);
    execute_n_instructions(&mut cpu, &mut bus, 3);
    assert_eq!(cpu.pc(), PROGRAM_BASE);
    (cpu, bus)
}

/// Execute N CPU instructions, panicking on any fault
#[allow(dead_code)]
pub fn execute_n_instructions(cpu: &mut CPU, bus: &mut Bus, n: usize) {
    for _ in 0..n {
        cpu.cycle(bus).expect("instruction faulted");
    }
}
