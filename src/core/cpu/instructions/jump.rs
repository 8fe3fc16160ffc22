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
    // === Jump Instructions ===

    /// J: Jump
    ///
    /// Jumps inside the current 256MB segment. The segment is taken from
    /// `pc_next` at execute time.
    ///
    /// Format: j target
    /// Operation: pc_next = (pc_next & 0xF0000000) | (target << 2)
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(in crate::core::cpu) fn op_j(&mut self, instruction: Instruction) -> Result<()> {
        let pc_high = self.next_pc & 0xF0000000;
        self.next_pc = pc_high | (instruction.target_address() << 2);
        Ok(())
    }

    /// JAL: Jump And Link
    ///
    /// Like J, and saves `pc_next + 4` in r31.
    ///
    /// Format: jal target
    /// Operation: r31 = pc_next + 4; pc_next = (pc_next & 0xF0000000) | (target << 2)
    pub(in crate::core::cpu) fn op_jal(&mut self, instruction: Instruction) -> Result<()> {
        self.write_reg(31, self.link_address());
        self.op_j(instruction)
    }

    /// JR: Jump Register
    ///
    /// Format: jr rs
    /// Operation: pc_next = rs
    pub(in crate::core::cpu) fn op_jr(&mut self, instruction: Instruction) -> Result<()> {
        self.next_pc = self.reg(instruction.rs());
        Ok(())
    }

    /// JALR: Jump And Link Register
    ///
    /// Format: jalr rd, rs
    /// Operation: rd = pc_next + 4; pc_next = rs
    pub(in crate::core::cpu) fn op_jalr(&mut self, instruction: Instruction) -> Result<()> {
        let target = self.reg(instruction.rs());
        self.write_reg(instruction.rd(), self.link_address());
        self.next_pc = target;
        Ok(())
    }
}
