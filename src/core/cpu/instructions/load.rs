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
    // === Load Instructions ===

    /// LW: Load Word
    ///
    /// Loads a 32-bit word from memory into a register.
    /// The loaded value is not available until after the load delay slot.
    ///
    /// Format: lw rt, offset(rs)
    /// Operation: rt = memory[rs + sign_extend(offset)]
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction
    /// * `bus` - Memory bus for reading data
    ///
    /// # Returns
    ///
    /// Ok(()) on success, or the bus fault for an unmapped address
    pub(in crate::core::cpu) fn op_lw(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = bus.load_word(addr)?;
        self.set_reg_delayed(instruction.rt(), value);
        Ok(())
    }

    /// LH: Load Halfword (sign-extended)
    ///
    /// Format: lh rt, offset(rs)
    /// Operation: rt = sign_extend(memory16[rs + sign_extend(offset)])
    pub(in crate::core::cpu) fn op_lh(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = bus.load_half(addr)? as i16 as i32 as u32;
        self.set_reg_delayed(instruction.rt(), value);
        Ok(())
    }

    /// LHU: Load Halfword Unsigned (zero-extended)
    ///
    /// Format: lhu rt, offset(rs)
    /// Operation: rt = zero_extend(memory16[rs + sign_extend(offset)])
    pub(in crate::core::cpu) fn op_lhu(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = bus.load_half(addr)? as u32;
        self.set_reg_delayed(instruction.rt(), value);
        Ok(())
    }

    /// LB: Load Byte (sign-extended)
    ///
    /// Format: lb rt, offset(rs)
    /// Operation: rt = sign_extend(memory8[rs + sign_extend(offset)])
    pub(in crate::core::cpu) fn op_lb(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = bus.load_byte(addr)? as i8 as i32 as u32;
        self.set_reg_delayed(instruction.rt(), value);
        Ok(())
    }

    /// LBU: Load Byte Unsigned (zero-extended)
    ///
    /// Format: lbu rt, offset(rs)
    /// Operation: rt = zero_extend(memory8[rs + sign_extend(offset)])
    pub(in crate::core::cpu) fn op_lbu(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = bus.load_byte(addr)? as u32;
        self.set_reg_delayed(instruction.rt(), value);
        Ok(())
    }

    /// LWL: Load Word Left
    ///
    /// Loads the high-order bytes of an unaligned word into the upper part
    /// of rt, keeping the remaining low bytes. Paired with LWR.
    ///
    /// Format: lwl rt, offset(rs)
    ///
    /// | addr & 3 | result                        |
    /// |----------|-------------------------------|
    /// | 0        | (rt & 0x00FFFFFF) \| (w << 24) |
    /// | 1        | (rt & 0x0000FFFF) \| (w << 16) |
    /// | 2        | (rt & 0x000000FF) \| (w << 8)  |
    /// | 3        | w                             |
    pub(in crate::core::cpu) fn op_lwl(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let word = bus.load_word(addr & !3)?;
        let current = self.unaligned_merge_base(instruction.rt());

        let value = match addr & 3 {
            0 => (current & 0x00FF_FFFF) | (word << 24),
            1 => (current & 0x0000_FFFF) | (word << 16),
            2 => (current & 0x0000_00FF) | (word << 8),
            _ => word,
        };

        self.set_reg_delayed(instruction.rt(), value);
        Ok(())
    }

    /// LWR: Load Word Right
    ///
    /// Loads the low-order bytes of an unaligned word into the lower part
    /// of rt, keeping the remaining high bytes. Paired with LWL.
    ///
    /// Format: lwr rt, offset(rs)
    ///
    /// | addr & 3 | result                        |
    /// |----------|-------------------------------|
    /// | 0        | w                             |
    /// | 1        | (rt & 0xFF000000) \| (w >> 8)  |
    /// | 2        | (rt & 0xFFFF0000) \| (w >> 16) |
    /// | 3        | (rt & 0xFFFFFF00) \| (w >> 24) |
    pub(in crate::core::cpu) fn op_lwr(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let word = bus.load_word(addr & !3)?;
        let current = self.unaligned_merge_base(instruction.rt());

        let value = match addr & 3 {
            0 => word,
            1 => (current & 0xFF00_0000) | (word >> 8),
            2 => (current & 0xFFFF_0000) | (word >> 16),
            _ => (current & 0xFFFF_FF00) | (word >> 24),
        };

        self.set_reg_delayed(instruction.rt(), value);
        Ok(())
    }

    /// Register value LWL/LWR merge into
    ///
    /// A load to the same register committed at the start of this cycle is
    /// not yet visible through `reg`, but LWL/LWR see it on hardware.
    fn unaligned_merge_base(&self, rt: u8) -> u32 {
        match self.committed_load {
            Some(load) if load.reg == rt => load.value,
            _ => self.reg(rt),
        }
    }
}
