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

//! Raw instruction word and its bitfields
//!
//! MIPS instruction formats (all 32-bit):
//!
//! ```text
//! R-type: | op (6) | rs (5) | rt (5) | rd (5) | shamt (5) | funct (6) |
//! I-type: | op (6) | rs (5) | rt (5) |          immediate (16)        |
//! J-type: | op (6) |                 target (26)                     |
//! ```

use std::fmt;

/// One 32-bit MIPS instruction word
///
/// Every accessor is a pure bit extraction of the raw word, so an
/// `Instruction` can be built from any value and never fails.
///
/// # Example
/// ```
/// use psxcore::core::cpu::Instruction;
///
/// let instruction = Instruction::new(0x00411820); // ADD r3, r2, r1
/// assert_eq!(instruction.opcode(), 0x00);
/// assert_eq!(instruction.rs(), 2);
/// assert_eq!(instruction.rt(), 1);
/// assert_eq!(instruction.rd(), 3);
/// assert_eq!(instruction.function(), 0x20);
/// assert_eq!(instruction.to_string(), "ADD     $3, $2, $1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Instruction(u32);

impl Instruction {
    /// Wrap a raw instruction word
    #[inline(always)]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw 32-bit encoding
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Primary opcode, bits [31:26]
    #[inline(always)]
    pub const fn opcode(self) -> u8 {
        ((self.0 >> 26) & 0x3F) as u8
    }

    /// Source register, bits [25:21]
    ///
    /// Also the sub-opcode of coprocessor instructions.
    #[inline(always)]
    pub const fn rs(self) -> u8 {
        ((self.0 >> 21) & 0x1F) as u8
    }

    /// Target register, bits [20:16]
    ///
    /// Also the selector of REGIMM (BCONDZ) instructions.
    #[inline(always)]
    pub const fn rt(self) -> u8 {
        ((self.0 >> 16) & 0x1F) as u8
    }

    /// Destination register, bits [15:11]
    #[inline(always)]
    pub const fn rd(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    /// Shift amount, bits [10:6]
    #[inline(always)]
    pub const fn shift_amount(self) -> u8 {
        ((self.0 >> 6) & 0x1F) as u8
    }

    /// SPECIAL function field, bits [5:0]
    #[inline(always)]
    pub const fn function(self) -> u8 {
        (self.0 & 0x3F) as u8
    }

    /// 16-bit immediate, zero-extended
    #[inline(always)]
    pub const fn imm16(self) -> u32 {
        self.0 & 0xFFFF
    }

    /// 16-bit immediate, sign-extended to 32 bits
    #[inline(always)]
    pub const fn imm16_signed(self) -> u32 {
        (self.0 & 0xFFFF) as u16 as i16 as i32 as u32
    }

    /// 26-bit jump target field (word index, not yet shifted)
    #[inline(always)]
    pub const fn target_address(self) -> u32 {
        self.0 & 0x03FF_FFFF
    }
}

impl From<u32> for Instruction {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Human-readable mnemonic
///
/// Unknown encodings render as a marker string rather than failing.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let i = *self;
        let (rs, rt, rd) = (i.rs(), i.rt(), i.rd());

        match i.opcode() {
            0x00 => match i.function() {
                0x00 => write!(f, "{:<8}${}, ${}, {}", "SLL", rd, rt, i.shift_amount()),
                0x02 => write!(f, "{:<8}${}, ${}, {}", "SRL", rd, rt, i.shift_amount()),
                0x03 => write!(f, "{:<8}${}, ${}, {}", "SRA", rd, rt, i.shift_amount()),
                0x04 => write!(f, "{:<8}${}, ${}, ${}", "SLLV", rd, rt, rs),
                0x06 => write!(f, "{:<8}${}, ${}, ${}", "SRLV", rd, rt, rs),
                0x07 => write!(f, "{:<8}${}, ${}, ${}", "SRAV", rd, rt, rs),
                0x08 => write!(f, "{:<8}${}", "JR", rs),
                0x09 => write!(f, "{:<8}${}, ${}", "JALR", rd, rs),
                0x0C => f.write_str("SYSCALL"),
                0x0D => f.write_str("BREAK"),
                0x10 => write!(f, "{:<8}${}", "MFHI", rd),
                0x11 => write!(f, "{:<8}${}", "MTHI", rs),
                0x12 => write!(f, "{:<8}${}", "MFLO", rd),
                0x13 => write!(f, "{:<8}${}", "MTLO", rs),
                0x18 => write!(f, "{:<8}${}, ${}", "MULT", rs, rt),
                0x19 => write!(f, "{:<8}${}, ${}", "MULTU", rs, rt),
                0x1A => write!(f, "{:<8}${}, ${}", "DIV", rs, rt),
                0x1B => write!(f, "{:<8}${}, ${}", "DIVU", rs, rt),
                funct @ (0x20..=0x27 | 0x2A | 0x2B) => {
                    let name = match funct {
                        0x20 => "ADD",
                        0x21 => "ADDU",
                        0x22 => "SUB",
                        0x23 => "SUBU",
                        0x24 => "AND",
                        0x25 => "OR",
                        0x26 => "XOR",
                        0x27 => "NOR",
                        0x2A => "SLT",
                        _ => "SLTU",
                    };
                    write!(f, "{:<8}${}, ${}, ${}", name, rd, rs, rt)
                }
                funct => write!(f, "Invalid SPECIAL function: {:02X}h", funct),
            },
            0x01 => {
                let name = match rt {
                    0x00 => "BLTZ",
                    0x01 => "BGEZ",
                    0x10 => "BLTZAL",
                    0x11 => "BGEZAL",
                    selector => return write!(f, "Invalid BCOND selector: {:02X}h", selector),
                };
                write!(f, "{:<8}${}, {:X}h", name, rs, i.imm16())
            }
            0x02 => write!(f, "{:<8}{:08X}h", "J", i.target_address() << 2),
            0x03 => write!(f, "{:<8}{:08X}h", "JAL", i.target_address() << 2),
            0x04 => write!(f, "{:<8}${}, ${}, {:X}h", "BEQ", rs, rt, i.imm16()),
            0x05 => write!(f, "{:<8}${}, ${}, {:X}h", "BNE", rs, rt, i.imm16()),
            0x06 => write!(f, "{:<8}${}, {:X}h", "BLEZ", rs, i.imm16()),
            0x07 => write!(f, "{:<8}${}, {:X}h", "BGTZ", rs, i.imm16()),
            0x08 => write!(f, "{:<8}${}, ${}, {:X}h", "ADDI", rt, rs, i.imm16_signed()),
            0x09 => write!(f, "{:<8}${}, ${}, {:X}h", "ADDIU", rt, rs, i.imm16_signed()),
            0x0A => write!(f, "{:<8}${}, ${}, {:X}h", "SLTI", rt, rs, i.imm16_signed()),
            0x0B => write!(f, "{:<8}${}, ${}, {:X}h", "SLTIU", rt, rs, i.imm16_signed()),
            0x0C => write!(f, "{:<8}${}, ${}, {:X}h", "ANDI", rt, rs, i.imm16()),
            0x0D => write!(f, "{:<8}${}, ${}, {:X}h", "ORI", rt, rs, i.imm16()),
            0x0E => write!(f, "{:<8}${}, ${}, {:X}h", "XORI", rt, rs, i.imm16()),
            0x0F => write!(f, "{:<8}${}, {:X}h", "LUI", rt, i.imm16()),
            op @ (0x10 | 0x12) => {
                let cop = op - 0x10;
                let name = match rs {
                    0x00 => "MFC",
                    0x02 => "CFC",
                    0x04 => "MTC",
                    0x06 => "CTC",
                    _ => return write!(f, "COP{}", cop),
                };
                write!(f, "{:<8}${}, ${}", format!("{}{}", name, cop), rt, rd)
            }
            op @ (0x20..=0x26 | 0x28..=0x2B | 0x2E) => {
                let name = match op {
                    0x20 => "LB",
                    0x21 => "LH",
                    0x22 => "LWL",
                    0x23 => "LW",
                    0x24 => "LBU",
                    0x25 => "LHU",
                    0x26 => "LWR",
                    0x28 => "SB",
                    0x29 => "SH",
                    0x2A => "SWL",
                    0x2B => "SW",
                    _ => "SWR",
                };
                write!(f, "{:<8}${}, {:X}h(${})", name, rt, i.imm16_signed(), rs)
            }
            op @ 0x30..=0x33 => write!(f, "LWC{}", op - 0x30),
            op @ 0x38..=0x3B => write!(f, "SWC{}", op - 0x38),
            op => write!(f, "unknown opcode: {:02X}h", op),
        }
    }
}
