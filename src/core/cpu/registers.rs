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

//! Double-buffered general purpose register file
//!
//! Reads during a cycle see the state committed at the end of the previous
//! cycle. Writes land in a staging copy and become visible only after
//! [`RegisterFile::commit`], which the CPU calls once per cycle.

/// General purpose registers (r0-r31)
///
/// r0 is hardwired to zero: it is never written in either buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RegisterFile {
    /// Committed values, visible to reads
    visible: [u32; 32],
    /// Values written during the current cycle
    staged: [u32; 32],
}

impl RegisterFile {
    pub(super) fn new() -> Self {
        Self {
            visible: [0u32; 32],
            staged: [0u32; 32],
        }
    }

    /// Read the committed value of a register
    #[inline(always)]
    pub(super) fn read(&self, index: u8) -> u32 {
        self.visible[index as usize]
    }

    /// Stage a write, visible after the next commit
    #[inline(always)]
    pub(super) fn write(&mut self, index: u8, value: u32) {
        if index != 0 {
            self.staged[index as usize] = value;
        }
    }

    /// Write both buffers, making the value visible immediately
    ///
    /// Used for debugger and test injection outside of a cycle.
    pub(super) fn inject(&mut self, index: u8, value: u32) {
        if index != 0 {
            self.visible[index as usize] = value;
            self.staged[index as usize] = value;
        }
    }

    /// Publish this cycle's writes
    #[inline(always)]
    pub(super) fn commit(&mut self) {
        self.visible = self.staged;
    }

    /// Committed values of all registers
    pub(super) fn snapshot(&self) -> [u32; 32] {
        self.visible
    }
}
