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

use super::super::{Instruction, CPU};
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    // === Store Instructions ===

    /// SW: Store Word
    ///
    /// Stores a 32-bit word from a register to memory.
    ///
    /// Format: sw rt, offset(rs)
    /// Operation: memory[rs + sign_extend(offset)] = rt
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction
    /// * `bus` - Memory bus for writing data
    ///
    /// # Returns
    ///
    /// Ok(()) on success, or the bus fault for an unmapped address
    pub(in crate::core::cpu) fn op_sw(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        if self.store_suppressed(addr) {
            return Ok(());
        }
        bus.store_word(addr, self.reg(instruction.rt()))
    }

    /// SH: Store Halfword
    ///
    /// Format: sh rt, offset(rs)
    /// Operation: memory16[rs + sign_extend(offset)] = rt & 0xFFFF
    pub(in crate::core::cpu) fn op_sh(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        if self.store_suppressed(addr) {
            return Ok(());
        }
        bus.store_half(addr, self.reg(instruction.rt()) as u16)
    }

    /// SB: Store Byte
    ///
    /// Format: sb rt, offset(rs)
    /// Operation: memory8[rs + sign_extend(offset)] = rt & 0xFF
    pub(in crate::core::cpu) fn op_sb(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        if self.store_suppressed(addr) {
            return Ok(());
        }
        bus.store_byte(addr, self.reg(instruction.rt()) as u8)
    }

    /// SWL: Store Word Left
    ///
    /// Stores the high-order bytes of rt into the aligned word containing
    /// the address. Paired with SWR.
    ///
    /// Format: swl rt, offset(rs)
    ///
    /// | addr & 3 | memory word                    |
    /// |----------|--------------------------------|
    /// | 0        | (mem & 0xFFFFFF00) \| (rt >> 24) |
    /// | 1        | (mem & 0xFFFF0000) \| (rt >> 16) |
    /// | 2        | (mem & 0xFF000000) \| (rt >> 8)  |
    /// | 3        | rt                             |
    pub(in crate::core::cpu) fn op_swl(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        if self.store_suppressed(addr) {
            return Ok(());
        }

        let aligned = addr & !3;
        let memory = bus.load_word(aligned)?;
        let value = self.reg(instruction.rt());

        let merged = match addr & 3 {
            0 => (memory & 0xFFFF_FF00) | (value >> 24),
            1 => (memory & 0xFFFF_0000) | (value >> 16),
            2 => (memory & 0xFF00_0000) | (value >> 8),
            _ => value,
        };

        bus.store_word(aligned, merged)
    }

    /// SWR: Store Word Right
    ///
    /// Stores the low-order bytes of rt into the aligned word containing
    /// the address. Paired with SWL.
    ///
    /// Format: swr rt, offset(rs)
    ///
    /// | addr & 3 | memory word                    |
    /// |----------|--------------------------------|
    /// | 0        | rt                             |
    /// | 1        | (mem & 0x000000FF) \| (rt << 8)  |
    /// | 2        | (mem & 0x0000FFFF) \| (rt << 16) |
    /// | 3        | (mem & 0x00FFFFFF) \| (rt << 24) |
    pub(in crate::core::cpu) fn op_swr(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        if self.store_suppressed(addr) {
            return Ok(());
        }

        let aligned = addr & !3;
        let memory = bus.load_word(aligned)?;
        let value = self.reg(instruction.rt());

        let merged = match addr & 3 {
            0 => value,
            1 => (memory & 0x0000_00FF) | (value << 8),
            2 => (memory & 0x0000_FFFF) | (value << 16),
            _ => (memory & 0x00FF_FFFF) | (value << 24),
        };

        bus.store_word(aligned, merged)
    }

    /// Stores are dropped while the cache is isolated (SR bit 16)
    ///
    /// The BIOS isolates the cache to flush it; those writes must not
    /// reach memory. The cache itself is not modeled.
    fn store_suppressed(&self, addr: u32) -> bool {
        let isolated = self.cop0.cache_isolated();
        if isolated {
            log::debug!(
                "Store to 0x{:08X} ignored (cache isolated) at PC=0x{:08X}",
                addr,
                self.current_pc
            );
        }
        isolated
    }
}
