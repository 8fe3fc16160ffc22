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
    // === Logical Instructions ===

    /// LUI: Load Upper Immediate
    ///
    /// Loads a 16-bit immediate value into the upper 16 bits of a register,
    /// setting the lower 16 bits to 0.
    ///
    /// Format: lui rt, imm
    /// Operation: rt = imm << 16
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(in crate::core::cpu) fn op_lui(&mut self, instruction: Instruction) -> Result<()> {
        self.write_reg(instruction.rt(), instruction.imm16() << 16);
        Ok(())
    }

    /// AND: Bitwise AND
    ///
    /// Format: and rd, rs, rt
    /// Operation: rd = rs & rt
    pub(in crate::core::cpu) fn op_and(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rs()) & self.reg(instruction.rt());
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// ANDI: AND Immediate (zero-extended)
    ///
    /// Note: Unlike ADDI, the immediate is ZERO-extended, not sign-extended.
    ///
    /// Format: andi rt, rs, imm
    /// Operation: rt = rs & zero_extend(imm)
    pub(in crate::core::cpu) fn op_andi(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rs()) & instruction.imm16();
        self.write_reg(instruction.rt(), result);
        Ok(())
    }

    /// OR: Bitwise OR
    ///
    /// Format: or rd, rs, rt
    /// Operation: rd = rs | rt
    pub(in crate::core::cpu) fn op_or(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rs()) | self.reg(instruction.rt());
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// ORI: OR Immediate (zero-extended)
    ///
    /// Format: ori rt, rs, imm
    /// Operation: rt = rs | zero_extend(imm)
    pub(in crate::core::cpu) fn op_ori(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rs()) | instruction.imm16();
        self.write_reg(instruction.rt(), result);
        Ok(())
    }

    /// XOR: Bitwise XOR
    ///
    /// Format: xor rd, rs, rt
    /// Operation: rd = rs ^ rt
    pub(in crate::core::cpu) fn op_xor(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rs()) ^ self.reg(instruction.rt());
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// XORI: XOR Immediate (zero-extended)
    ///
    /// Format: xori rt, rs, imm
    /// Operation: rt = rs ^ zero_extend(imm)
    pub(in crate::core::cpu) fn op_xori(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rs()) ^ instruction.imm16();
        self.write_reg(instruction.rt(), result);
        Ok(())
    }

    /// NOR: Bitwise NOR
    ///
    /// Format: nor rd, rs, rt
    /// Operation: rd = !(rs | rt)
    pub(in crate::core::cpu) fn op_nor(&mut self, instruction: Instruction) -> Result<()> {
        let result = !(self.reg(instruction.rs()) | self.reg(instruction.rt()));
        self.write_reg(instruction.rd(), result);
        Ok(())
    }
}
