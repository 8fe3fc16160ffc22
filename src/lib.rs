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

//! PlayStation 1 CPU core library
//!
//! This library provides an interpreter for the MIPS R3000A CPU of the
//! PlayStation 1, the memory bus it runs against and a disassembler.
//!
//! # Example
//!
//! ```
//! use psxcore::core::cpu::CPU;
//! use psxcore::core::memory::Bus;
//!
//! // LUI r1, 0x1234
//! let mut bus = Bus::new(0x3C011234u32.to_le_bytes().to_vec()).unwrap();
//! let mut cpu = CPU::new();
//!
//! // Execute one instruction
//! cpu.cycle(&mut bus).unwrap();
//! assert_eq!(cpu.reg(1), 0x12340000);
//! ```

pub mod core;
