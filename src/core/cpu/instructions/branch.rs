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

impl CPU {
    // === Branch Instructions ===

    /// BEQ: Branch on Equal
    ///
    /// Conditional branch if two registers are equal.
    /// The branch target is relative to `pc_next` at execute time.
    ///
    /// Format: beq rs, rt, offset
    /// Operation: if (rs == rt) pc_next = pc_next + (sign_extend(offset) << 2)
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(in crate::core::cpu) fn op_beq(&mut self, instruction: Instruction) -> Result<()> {
        if self.reg(instruction.rs()) == self.reg(instruction.rt()) {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BNE: Branch on Not Equal
    ///
    /// Format: bne rs, rt, offset
    /// Operation: if (rs != rt) pc_next = pc_next + (sign_extend(offset) << 2)
    pub(in crate::core::cpu) fn op_bne(&mut self, instruction: Instruction) -> Result<()> {
        if self.reg(instruction.rs()) != self.reg(instruction.rt()) {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BLEZ: Branch on Less Than or Equal to Zero (signed)
    ///
    /// Format: blez rs, offset
    /// Operation: if (rs <= 0) pc_next = pc_next + (sign_extend(offset) << 2)
    pub(in crate::core::cpu) fn op_blez(&mut self, instruction: Instruction) -> Result<()> {
        if (self.reg(instruction.rs()) as i32) <= 0 {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BGTZ: Branch on Greater Than Zero (signed)
    ///
    /// Format: bgtz rs, offset
    /// Operation: if (rs > 0) pc_next = pc_next + (sign_extend(offset) << 2)
    pub(in crate::core::cpu) fn op_bgtz(&mut self, instruction: Instruction) -> Result<()> {
        if (self.reg(instruction.rs()) as i32) > 0 {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BLTZ: Branch on Less Than Zero (REGIMM rt = 0x00)
    ///
    /// Format: bltz rs, offset
    pub(in crate::core::cpu) fn op_bltz(&mut self, instruction: Instruction) -> Result<()> {
        if (self.reg(instruction.rs()) as i32) < 0 {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BGEZ: Branch on Greater Than or Equal to Zero (REGIMM rt = 0x01)
    ///
    /// Format: bgez rs, offset
    pub(in crate::core::cpu) fn op_bgez(&mut self, instruction: Instruction) -> Result<()> {
        if (self.reg(instruction.rs()) as i32) >= 0 {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BLTZAL: Branch on Less Than Zero And Link (REGIMM rt = 0x10)
    ///
    /// r31 receives the return address whether or not the branch is taken.
    /// The condition reads rs before the link is staged, so `bltzal $31`
    /// tests the old value.
    ///
    /// Format: bltzal rs, offset
    pub(in crate::core::cpu) fn op_bltzal(&mut self, instruction: Instruction) -> Result<()> {
        self.write_reg(31, self.link_address());
        self.op_bltz(instruction)
    }

    /// BGEZAL: Branch on Greater Than or Equal to Zero And Link (REGIMM rt = 0x11)
    ///
    /// Links unconditionally, like BLTZAL.
    ///
    /// Format: bgezal rs, offset
    pub(in crate::core::cpu) fn op_bgezal(&mut self, instruction: Instruction) -> Result<()> {
        self.write_reg(31, self.link_address());
        self.op_bgez(instruction)
    }

    /// Execute a branch (sets next_pc)
    ///
    /// The counters advance before dispatch, so while a branch at B
    /// executes `next_pc` holds B + 8. The offset is applied to that value.
    ///
    /// # Arguments
    ///
    /// * `instruction` - Branch instruction carrying the 16-bit word offset
    fn branch(&mut self, instruction: Instruction) {
        let offset = instruction.imm16_signed() << 2;
        self.next_pc = self.next_pc.wrapping_add(offset);
    }

    /// Return address written by the linking branches and jumps: `pc_next + 4`
    pub(super) fn link_address(&self) -> u32 {
        self.next_pc.wrapping_add(4)
    }
}
