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

//! MIPS instruction disassembler for debugging
//!
//! Converts binary instruction encodings to human-readable assembly mnemonics
//! and produces address/word/mnemonic listings straight from the bus.

use std::fmt;

use serde::Serialize;

use super::Instruction;
use crate::core::error::Result;
use crate::core::memory::Bus;

/// Instruction disassembler
///
/// Converts 32-bit MIPS instruction encodings to human-readable assembly format.
///
/// # Example
/// ```
/// use psxcore::core::cpu::Disassembler;
///
/// assert_eq!(Disassembler::disassemble(0x00411820), "ADD     $3, $2, $1");
/// assert_eq!(Disassembler::disassemble(0x3C011234), "LUI     $1, 1234h");
/// ```
pub struct Disassembler;

/// One line of a disassembly listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisassembledInstruction {
    /// Address the word was fetched from
    pub address: u32,
    /// Raw instruction word
    pub raw: u32,
    /// Rendered mnemonic and operands
    pub mnemonic: String,
}

impl Disassembler {
    /// Disassemble a single instruction to human-readable format
    ///
    /// Never fails: unknown encodings render as a marker string.
    ///
    /// # Arguments
    ///
    /// * `word` - The 32-bit instruction to disassemble
    pub fn disassemble(word: u32) -> String {
        Instruction::new(word).to_string()
    }

    /// Disassemble `count` consecutive words starting at `start`
    ///
    /// Reads through the bus without touching any CPU state. Addresses
    /// wrap around at the top of the address space.
    ///
    /// # Arguments
    ///
    /// * `bus` - Memory bus to read from
    /// * `start` - Address of the first word
    /// * `count` - Number of words
    ///
    /// # Errors
    ///
    /// `UnmappedAddress` if any fetched address is unmapped
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::Disassembler;
    /// use psxcore::core::memory::Bus;
    ///
    /// let bus = Bus::new(vec![0x20, 0x18, 0x41, 0x00]).unwrap();
    /// let listing = Disassembler::disassemble_range(&bus, 0xBFC00000, 2).unwrap();
    ///
    /// assert_eq!(listing[0].to_string(), "BFC00000  00411820  ADD     $3, $2, $1");
    /// assert_eq!(listing[1].address, 0xBFC00004);
    /// ```
    pub fn disassemble_range(
        bus: &Bus,
        start: u32,
        count: usize,
    ) -> Result<Vec<DisassembledInstruction>> {
        (0..count)
            .map(|i| {
                let address = start.wrapping_add((i as u32).wrapping_mul(4));
                let raw = bus.load_word(address)?;
                Ok(DisassembledInstruction {
                    address,
                    raw,
                    mnemonic: Self::disassemble(raw),
                })
            })
            .collect()
    }
}

impl fmt::Display for DisassembledInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}  {:08X}  {}", self.address, self.raw, self.mnemonic)
    }
}
