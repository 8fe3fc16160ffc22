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

//! CPU instruction implementations
//!
//! This module contains all MIPS R3000A instruction implementations,
//! organized by instruction type for better maintainability.

use super::{Instruction, Operation, CPU};
use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Bus;

// Instruction modules organized by type
mod arithmetic;
mod branch;
mod cop0;
mod jump;
mod load;
mod logical;
mod multiply;
mod shift;
mod store;

impl CPU {
    /// Decode and execute one instruction
    ///
    /// The instruction is classified into an [`Operation`] once and then
    /// dispatched with a single exhaustive match.
    ///
    /// # Arguments
    ///
    /// * `instruction` - The fetched instruction
    /// * `bus` - Memory bus for memory operations
    ///
    /// # Returns
    ///
    /// Ok(()) on success, or the fault raised by decode or the handler
    pub(super) fn execute_instruction(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        self.in_branch_delay = false;
        let op = Operation::decode(instruction)?;
        self.in_branch_delay = op.is_branch();

        match op {
            // SPECIAL
            Operation::Sll => self.op_sll(instruction),
            Operation::Srl => self.op_srl(instruction),
            Operation::Sra => self.op_sra(instruction),
            Operation::Sllv => self.op_sllv(instruction),
            Operation::Srlv => self.op_srlv(instruction),
            Operation::Srav => self.op_srav(instruction),
            Operation::Jr => self.op_jr(instruction),
            Operation::Jalr => self.op_jalr(instruction),
            Operation::Syscall => Self::not_implemented("SYSCALL", instruction),
            Operation::Break => Self::not_implemented("BREAK", instruction),
            Operation::Mfhi => self.op_mfhi(instruction),
            Operation::Mthi => self.op_mthi(instruction),
            Operation::Mflo => self.op_mflo(instruction),
            Operation::Mtlo => self.op_mtlo(instruction),
            Operation::Mult => self.op_mult(instruction),
            Operation::Multu => self.op_multu(instruction),
            Operation::Div => self.op_div(instruction),
            Operation::Divu => self.op_divu(instruction),
            Operation::Add => self.op_add(instruction),
            Operation::Addu => self.op_addu(instruction),
            Operation::Sub => self.op_sub(instruction),
            Operation::Subu => self.op_subu(instruction),
            Operation::And => self.op_and(instruction),
            Operation::Or => self.op_or(instruction),
            Operation::Xor => self.op_xor(instruction),
            Operation::Nor => self.op_nor(instruction),
            Operation::Slt => self.op_slt(instruction),
            Operation::Sltu => self.op_sltu(instruction),

            // REGIMM
            Operation::Bltz => self.op_bltz(instruction),
            Operation::Bgez => self.op_bgez(instruction),
            Operation::Bltzal => self.op_bltzal(instruction),
            Operation::Bgezal => self.op_bgezal(instruction),

            Operation::J => self.op_j(instruction),
            Operation::Jal => self.op_jal(instruction),
            Operation::Beq => self.op_beq(instruction),
            Operation::Bne => self.op_bne(instruction),
            Operation::Blez => self.op_blez(instruction),
            Operation::Bgtz => self.op_bgtz(instruction),

            Operation::Addi => self.op_addi(instruction),
            Operation::Addiu => self.op_addiu(instruction),
            Operation::Slti => self.op_slti(instruction),
            Operation::Sltiu => self.op_sltiu(instruction),
            Operation::Andi => self.op_andi(instruction),
            Operation::Ori => self.op_ori(instruction),
            Operation::Xori => self.op_xori(instruction),
            Operation::Lui => self.op_lui(instruction),

            // COP0
            Operation::Mfc0 => self.op_mfc0(instruction),
            Operation::Mtc0 => self.op_mtc0(instruction),
            Operation::Cfc0 | Operation::Ctc0 => Err(EmulatorError::NoControlRegisters {
                instruction: instruction.raw(),
            }),
            Operation::Cop2 => Self::not_implemented("COP2 (GTE)", instruction),

            Operation::Lb => self.op_lb(instruction, bus),
            Operation::Lh => self.op_lh(instruction, bus),
            Operation::Lwl => self.op_lwl(instruction, bus),
            Operation::Lw => self.op_lw(instruction, bus),
            Operation::Lbu => self.op_lbu(instruction, bus),
            Operation::Lhu => self.op_lhu(instruction, bus),
            Operation::Lwr => self.op_lwr(instruction, bus),

            Operation::Sb => self.op_sb(instruction, bus),
            Operation::Sh => self.op_sh(instruction, bus),
            Operation::Swl => self.op_swl(instruction, bus),
            Operation::Sw => self.op_sw(instruction, bus),
            Operation::Swr => self.op_swr(instruction, bus),
        }
    }

    /// Effective address of a load or store: rs + sign_extend(imm)
    #[inline(always)]
    fn effective_address(&self, instruction: Instruction) -> u32 {
        self.reg(instruction.rs()).wrapping_add(instruction.imm16_signed())
    }

    /// Recognized instructions the core deliberately does not model
    ///
    /// SYSCALL and BREAK would raise exceptions, and COP2 is the geometry
    /// engine. Neither is emulated.
    fn not_implemented(feature: &'static str, instruction: Instruction) -> Result<()> {
        Err(EmulatorError::NotImplemented {
            feature,
            instruction: instruction.raw(),
        })
    }
}
