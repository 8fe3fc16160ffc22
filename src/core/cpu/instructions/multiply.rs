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
    // === Multiply/Divide Instructions ===

    /// MULT: Multiply (signed)
    ///
    /// Multiplies two 32-bit signed integers and stores the 64-bit result
    /// in the HI and LO registers.
    ///
    /// Format: mult rs, rt
    /// Operation: (HI, LO) = rs * rt (signed 64-bit result)
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction
    ///
    /// # Returns
    ///
    /// Ok(()) on success
    pub(in crate::core::cpu) fn op_mult(&mut self, instruction: Instruction) -> Result<()> {
        let a = self.reg(instruction.rs()) as i32 as i64;
        let b = self.reg(instruction.rt()) as i32 as i64;
        let result = (a * b) as u64;

        self.lo = result as u32;
        self.hi = (result >> 32) as u32;
        Ok(())
    }

    /// MULTU: Multiply Unsigned
    ///
    /// Format: multu rs, rt
    /// Operation: (HI, LO) = rs * rt (unsigned 64-bit result)
    pub(in crate::core::cpu) fn op_multu(&mut self, instruction: Instruction) -> Result<()> {
        let a = self.reg(instruction.rs()) as u64;
        let b = self.reg(instruction.rt()) as u64;
        let result = a * b;

        self.lo = result as u32;
        self.hi = (result >> 32) as u32;
        Ok(())
    }

    /// DIV: Divide (signed)
    ///
    /// Divides two 32-bit signed integers and stores quotient in LO
    /// and remainder in HI.
    ///
    /// Format: div rs, rt
    /// Operation: LO = rs / rt (quotient), HI = rs % rt (remainder)
    ///
    /// # Special Cases
    ///
    /// * Division by zero: LO = 0xFFFFFFFF or 1 (based on sign), HI = numerator
    /// * Overflow (0x80000000 / -1): LO = 0x80000000, HI = 0
    pub(in crate::core::cpu) fn op_div(&mut self, instruction: Instruction) -> Result<()> {
        let numerator = self.reg(instruction.rs()) as i32;
        let denominator = self.reg(instruction.rt()) as i32;

        if denominator == 0 {
            // No trap on divide by zero
            self.lo = if numerator >= 0 { 0xFFFFFFFF } else { 1 };
            self.hi = numerator as u32;
        } else if numerator == i32::MIN && denominator == -1 {
            self.lo = 0x80000000;
            self.hi = 0;
        } else {
            self.lo = (numerator / denominator) as u32;
            self.hi = (numerator % denominator) as u32;
        }
        Ok(())
    }

    /// DIVU: Divide Unsigned
    ///
    /// Format: divu rs, rt
    /// Operation: LO = rs / rt (quotient), HI = rs % rt (remainder)
    ///
    /// # Special Cases
    ///
    /// * Division by zero: LO = 0xFFFFFFFF, HI = numerator
    pub(in crate::core::cpu) fn op_divu(&mut self, instruction: Instruction) -> Result<()> {
        let numerator = self.reg(instruction.rs());
        let denominator = self.reg(instruction.rt());

        if denominator == 0 {
            self.lo = 0xFFFFFFFF;
            self.hi = numerator;
        } else {
            self.lo = numerator / denominator;
            self.hi = numerator % denominator;
        }
        Ok(())
    }

    /// MFHI: Move From HI
    ///
    /// Format: mfhi rd
    /// Operation: rd = HI
    pub(in crate::core::cpu) fn op_mfhi(&mut self, instruction: Instruction) -> Result<()> {
        self.write_reg(instruction.rd(), self.hi);
        Ok(())
    }

    /// MFLO: Move From LO
    ///
    /// Format: mflo rd
    /// Operation: rd = LO
    pub(in crate::core::cpu) fn op_mflo(&mut self, instruction: Instruction) -> Result<()> {
        self.write_reg(instruction.rd(), self.lo);
        Ok(())
    }

    /// MTHI: Move To HI
    ///
    /// Format: mthi rs
    /// Operation: HI = rs
    pub(in crate::core::cpu) fn op_mthi(&mut self, instruction: Instruction) -> Result<()> {
        self.hi = self.reg(instruction.rs());
        Ok(())
    }

    /// MTLO: Move To LO
    ///
    /// Format: mtlo rs
    /// Operation: LO = rs
    pub(in crate::core::cpu) fn op_mtlo(&mut self, instruction: Instruction) -> Result<()> {
        self.lo = self.reg(instruction.rs());
        Ok(())
    }
}
