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

//! BIOS Boot Integration Tests
//!
//! These tests run the core against an actual PSX BIOS image.
//!
//! # Requirements
//!
//! These tests require an actual PSX BIOS file. Set the `PSX_BIOS_PATH` environment
//! variable or place a BIOS file named `SCPH1001.BIN` in the project root.
//!
//! # Running
//!
//! ```bash
//! cargo test --test bios_boot -- --ignored --nocapture
//! ```
//!
//! # Legal Notice
//!
//! You must legally own a PlayStation console to use its BIOS for testing.

mod common;

use common::test_roms::get_bios_path;
use psxcore::core::cpu::CPU;
use psxcore::core::memory::Bus;
use psxcore::core::system::{RunOutcome, System};

fn load_system() -> System {
    let bios_path = get_bios_path()
        .expect("Set PSX_BIOS_PATH environment variable or place BIOS in project root");
    System::from_bios_file(&bios_path)
        .unwrap_or_else(|e| panic!("Failed to load BIOS from {}: {}", bios_path, e))
}

/// The reset vector must decode to real instructions
#[test]
#[ignore] // Requires BIOS file - run with: cargo test -- --ignored
fn test_bios_disassembly() {
    let system = load_system();

    let listing = system.disassemble(CPU::RESET_VECTOR, 16).unwrap();
    for line in &listing {
        println!("{}", line);
    }

    assert_eq!(listing.len(), 16);
    let invalid = |m: &str| m.starts_with("Invalid") || m.starts_with("unknown");
    assert!(listing.iter().all(|line| !invalid(&line.mnemonic)));
}

/// Execute the first instructions of the BIOS
///
/// Boot stops at the first unmodeled feature or after the limit; either
/// way the CPU must have left the reset vector.
#[test]
#[ignore] // Requires BIOS file - run with: cargo test -- --ignored
fn test_bios_boot() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();

    let mut system = load_system();
    // Last word of the image is mapped
    let last = CPU::RESET_VECTOR + Bus::BIOS_SIZE as u32 - 4;
    assert!(system.bus().load_word(last).is_ok());

    println!("Initial PC: 0x{:08X}", system.pc());
    match system.run(Some(100_000)) {
        Ok(RunOutcome::LimitReached) => println!("Limit reached"),
        Ok(RunOutcome::Breakpoint(pc)) => unreachable!("no breakpoints set, stopped at {pc:08X}"),
        Err(e) => {
            println!("Stopped by fault: {} ({:?})", e, e.kind());
            system.cpu().dump_registers();
        }
    }

    println!(
        "Executed {} instructions, PC: 0x{:08X}",
        system.cycles(),
        system.pc()
    );
    assert!(system.cycles() > 0);
    assert_ne!(system.pc(), CPU::RESET_VECTOR);
}
