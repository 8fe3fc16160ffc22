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
    // === Arithmetic Instructions ===

    /// ADD: Add
    ///
    /// Adds two registers. Signed overflow wraps: overflow exceptions are
    /// not modeled, so ADD behaves like ADDU.
    ///
    /// Format: add rd, rs, rt
    /// Operation: rd = rs + rt
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(in crate::core::cpu) fn op_add(&mut self, instruction: Instruction) -> Result<()> {
        self.op_addu(instruction)
    }

    /// ADDU: Add Unsigned (no overflow exception)
    ///
    /// Format: addu rd, rs, rt
    /// Operation: rd = rs + rt
    pub(in crate::core::cpu) fn op_addu(&mut self, instruction: Instruction) -> Result<()> {
        let result = self
            .reg(instruction.rs())
            .wrapping_add(self.reg(instruction.rt()));
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SUB: Subtract
    ///
    /// Wraps on signed overflow, like SUBU.
    ///
    /// Format: sub rd, rs, rt
    /// Operation: rd = rs - rt
    pub(in crate::core::cpu) fn op_sub(&mut self, instruction: Instruction) -> Result<()> {
        self.op_subu(instruction)
    }

    /// SUBU: Subtract Unsigned
    ///
    /// Format: subu rd, rs, rt
    /// Operation: rd = rs - rt
    pub(in crate::core::cpu) fn op_subu(&mut self, instruction: Instruction) -> Result<()> {
        let result = self
            .reg(instruction.rs())
            .wrapping_sub(self.reg(instruction.rt()));
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// ADDI: Add Immediate
    ///
    /// Adds a sign-extended immediate value to a register. Wraps on overflow.
    ///
    /// Format: addi rt, rs, imm
    /// Operation: rt = rs + sign_extend(imm)
    pub(in crate::core::cpu) fn op_addi(&mut self, instruction: Instruction) -> Result<()> {
        self.op_addiu(instruction)
    }

    /// ADDIU: Add Immediate Unsigned (no overflow exception)
    ///
    /// Despite the name "unsigned", the immediate is sign-extended.
    ///
    /// Format: addiu rt, rs, imm
    /// Operation: rt = rs + sign_extend(imm)
    pub(in crate::core::cpu) fn op_addiu(&mut self, instruction: Instruction) -> Result<()> {
        let result = self
            .reg(instruction.rs())
            .wrapping_add(instruction.imm16_signed());
        self.write_reg(instruction.rt(), result);
        Ok(())
    }

    // === Comparison Instructions ===

    /// SLT: Set on Less Than (signed)
    ///
    /// Format: slt rd, rs, rt
    /// Operation: rd = (rs < rt) ? 1 : 0 (signed comparison)
    pub(in crate::core::cpu) fn op_slt(&mut self, instruction: Instruction) -> Result<()> {
        let a = self.reg(instruction.rs()) as i32;
        let b = self.reg(instruction.rt()) as i32;
        self.write_reg(instruction.rd(), (a < b) as u32);
        Ok(())
    }

    /// SLTU: Set on Less Than Unsigned
    ///
    /// Format: sltu rd, rs, rt
    /// Operation: rd = (rs < rt) ? 1 : 0 (unsigned comparison)
    pub(in crate::core::cpu) fn op_sltu(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rs()) < self.reg(instruction.rt());
        self.write_reg(instruction.rd(), result as u32);
        Ok(())
    }

    /// SLTI: Set on Less Than Immediate (signed)
    ///
    /// Format: slti rt, rs, imm
    /// Operation: rt = (rs < sign_extend(imm)) ? 1 : 0 (signed comparison)
    pub(in crate::core::cpu) fn op_slti(&mut self, instruction: Instruction) -> Result<()> {
        let a = self.reg(instruction.rs()) as i32;
        let b = instruction.imm16_signed() as i32;
        self.write_reg(instruction.rt(), (a < b) as u32);
        Ok(())
    }

    /// SLTIU: Set on Less Than Immediate Unsigned
    ///
    /// The immediate is sign-extended first, then compared as unsigned.
    ///
    /// Format: sltiu rt, rs, imm
    /// Operation: rt = (rs < sign_extend(imm)) ? 1 : 0 (unsigned comparison)
    pub(in crate::core::cpu) fn op_sltiu(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rs()) < instruction.imm16_signed();
        self.write_reg(instruction.rt(), result as u32);
        Ok(())
    }
}
