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

//! Instruction classification
//!
//! Turns an [`Instruction`] into an [`Operation`] once, so the executor
//! can dispatch with a single exhaustive match instead of re-masking
//! opcode fields at every call site.

use super::Instruction;
use crate::core::error::{EmulatorError, Result};

/// Every instruction kind the executor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    // SPECIAL (opcode 0x00), keyed by function
    Sll,
    Srl,
    Sra,
    Sllv,
    Srlv,
    Srav,
    Jr,
    Jalr,
    Syscall,
    Break,
    Mfhi,
    Mthi,
    Mflo,
    Mtlo,
    Mult,
    Multu,
    Div,
    Divu,
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,

    // REGIMM (opcode 0x01), keyed by rt
    Bltz,
    Bgez,
    Bltzal,
    Bgezal,

    // Jumps and branches
    J,
    Jal,
    Beq,
    Bne,
    Blez,
    Bgtz,

    // ALU immediate
    Addi,
    Addiu,
    Slti,
    Sltiu,
    Andi,
    Ori,
    Xori,
    Lui,

    // COP0 (opcode 0x10), keyed by rs
    Mfc0,
    Cfc0,
    Mtc0,
    Ctc0,

    /// Any COP2 (GTE) access, including LWC2/SWC2
    Cop2,

    // Loads
    Lb,
    Lh,
    Lwl,
    Lw,
    Lbu,
    Lhu,
    Lwr,

    // Stores
    Sb,
    Sh,
    Swl,
    Sw,
    Swr,
}

impl Operation {
    /// Classify an instruction
    ///
    /// # Errors
    ///
    /// - `InvalidSpecialFunction` for an unknown SPECIAL function
    /// - `InvalidRegimm` for an unknown REGIMM selector
    /// - `InvalidCoprocessorOp` for an unknown COP0 sub-opcode
    /// - `InvalidOpcode` for an unknown primary opcode
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::{Instruction, Operation};
    ///
    /// let op = Operation::decode(Instruction::new(0x00411820)).unwrap();
    /// assert_eq!(op, Operation::Add);
    /// assert!(Operation::decode(Instruction::new(0xFFFFFFFF)).is_err());
    /// ```
    pub fn decode(instruction: Instruction) -> Result<Self> {
        let raw = instruction.raw();

        let op = match instruction.opcode() {
            0x00 => Self::decode_special(instruction)?,
            0x01 => match instruction.rt() {
                0x00 => Self::Bltz,
                0x01 => Self::Bgez,
                0x10 => Self::Bltzal,
                0x11 => Self::Bgezal,
                selector => {
                    return Err(EmulatorError::InvalidRegimm {
                        selector,
                        instruction: raw,
                    })
                }
            },
            0x02 => Self::J,
            0x03 => Self::Jal,
            0x04 => Self::Beq,
            0x05 => Self::Bne,
            0x06 => Self::Blez,
            0x07 => Self::Bgtz,
            0x08 => Self::Addi,
            0x09 => Self::Addiu,
            0x0A => Self::Slti,
            0x0B => Self::Sltiu,
            0x0C => Self::Andi,
            0x0D => Self::Ori,
            0x0E => Self::Xori,
            0x0F => Self::Lui,
            0x10 => match instruction.rs() {
                0x00 => Self::Mfc0,
                0x02 => Self::Cfc0,
                0x04 => Self::Mtc0,
                0x06 => Self::Ctc0,
                selector => {
                    return Err(EmulatorError::InvalidCoprocessorOp {
                        cop: 0,
                        selector,
                        instruction: raw,
                    })
                }
            },
            0x12 | 0x32 | 0x3A => Self::Cop2,
            0x20 => Self::Lb,
            0x21 => Self::Lh,
            0x22 => Self::Lwl,
            0x23 => Self::Lw,
            0x24 => Self::Lbu,
            0x25 => Self::Lhu,
            0x26 => Self::Lwr,
            0x28 => Self::Sb,
            0x29 => Self::Sh,
            0x2A => Self::Swl,
            0x2B => Self::Sw,
            0x2E => Self::Swr,
            opcode => {
                return Err(EmulatorError::InvalidOpcode {
                    opcode,
                    instruction: raw,
                })
            }
        };

        Ok(op)
    }

    fn decode_special(instruction: Instruction) -> Result<Self> {
        let op = match instruction.function() {
            0x00 => Self::Sll,
            0x02 => Self::Srl,
            0x03 => Self::Sra,
            0x04 => Self::Sllv,
            0x06 => Self::Srlv,
            0x07 => Self::Srav,
            0x08 => Self::Jr,
            0x09 => Self::Jalr,
            0x0C => Self::Syscall,
            0x0D => Self::Break,
            0x10 => Self::Mfhi,
            0x11 => Self::Mthi,
            0x12 => Self::Mflo,
            0x13 => Self::Mtlo,
            0x18 => Self::Mult,
            0x19 => Self::Multu,
            0x1A => Self::Div,
            0x1B => Self::Divu,
            0x20 => Self::Add,
            0x21 => Self::Addu,
            0x22 => Self::Sub,
            0x23 => Self::Subu,
            0x24 => Self::And,
            0x25 => Self::Or,
            0x26 => Self::Xor,
            0x27 => Self::Nor,
            0x2A => Self::Slt,
            0x2B => Self::Sltu,
            function => {
                return Err(EmulatorError::InvalidSpecialFunction {
                    function,
                    instruction: instruction.raw(),
                })
            }
        };

        Ok(op)
    }

    /// True for operations that may redirect `pc_next`
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Self::J
                | Self::Jal
                | Self::Jr
                | Self::Jalr
                | Self::Beq
                | Self::Bne
                | Self::Blez
                | Self::Bgtz
                | Self::Bltz
                | Self::Bgez
                | Self::Bltzal
                | Self::Bgezal
        )
    }
}
