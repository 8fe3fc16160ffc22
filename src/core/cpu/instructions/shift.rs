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
    // === Shift Instructions ===

    /// SLL: Shift Left Logical
    ///
    /// Shifts the value in rt left by shamt bits, storing the result in rd.
    /// Note: SLL with all fields = 0 is NOP.
    ///
    /// Format: sll rd, rt, shamt
    /// Operation: rd = rt << shamt
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(in crate::core::cpu) fn op_sll(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rt()) << instruction.shift_amount();
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SRL: Shift Right Logical (zero-fill)
    ///
    /// Format: srl rd, rt, shamt
    /// Operation: rd = rt >> shamt (zero-fill)
    pub(in crate::core::cpu) fn op_srl(&mut self, instruction: Instruction) -> Result<()> {
        let result = self.reg(instruction.rt()) >> instruction.shift_amount();
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SRA: Shift Right Arithmetic (sign-extend)
    ///
    /// Format: sra rd, rt, shamt
    /// Operation: rd = rt >> shamt (sign-extend)
    pub(in crate::core::cpu) fn op_sra(&mut self, instruction: Instruction) -> Result<()> {
        let result = (self.reg(instruction.rt()) as i32) >> instruction.shift_amount();
        self.write_reg(instruction.rd(), result as u32);
        Ok(())
    }

    /// SLLV: Shift Left Logical Variable
    ///
    /// Only the lower 5 bits of rs are used as the shift amount.
    ///
    /// Format: sllv rd, rt, rs
    /// Operation: rd = rt << (rs & 0x1F)
    pub(in crate::core::cpu) fn op_sllv(&mut self, instruction: Instruction) -> Result<()> {
        let shift = self.reg(instruction.rs()) & 0x1F;
        let result = self.reg(instruction.rt()) << shift;
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SRLV: Shift Right Logical Variable
    ///
    /// Format: srlv rd, rt, rs
    /// Operation: rd = rt >> (rs & 0x1F) (zero-fill)
    pub(in crate::core::cpu) fn op_srlv(&mut self, instruction: Instruction) -> Result<()> {
        let shift = self.reg(instruction.rs()) & 0x1F;
        let result = self.reg(instruction.rt()) >> shift;
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SRAV: Shift Right Arithmetic Variable
    ///
    /// Format: srav rd, rt, rs
    /// Operation: rd = rt >> (rs & 0x1F) (sign-extend)
    pub(in crate::core::cpu) fn op_srav(&mut self, instruction: Instruction) -> Result<()> {
        let shift = self.reg(instruction.rs()) & 0x1F;
        let result = (self.reg(instruction.rt()) as i32) >> shift;
        self.write_reg(instruction.rd(), result as u32);
        Ok(())
    }
}
