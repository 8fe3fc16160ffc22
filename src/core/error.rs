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

/// Emulator error types
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
///
/// Every variant is fatal to the current run. Use [`EmulatorError::kind`]
/// to tell a malformed program apart from a feature the core does not model.
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("Unmapped memory access at 0x{address:08X}")]
    UnmappedAddress { address: u32 },

    #[error("Invalid opcode 0x{opcode:02X} in instruction 0x{instruction:08X}")]
    InvalidOpcode { opcode: u8, instruction: u32 },

    #[error("Invalid SPECIAL function 0x{function:02X} in instruction 0x{instruction:08X}")]
    InvalidSpecialFunction { function: u8, instruction: u32 },

    #[error("Invalid REGIMM selector 0x{selector:02X} in instruction 0x{instruction:08X}")]
    InvalidRegimm { selector: u8, instruction: u32 },

    #[error("Invalid COP{cop} operation 0x{selector:02X} in instruction 0x{instruction:08X}")]
    InvalidCoprocessorOp {
        cop: u8,
        selector: u8,
        instruction: u32,
    },

    #[error("COP0 has no control registers (instruction 0x{instruction:08X})")]
    NoControlRegisters { instruction: u32 },

    #[error("Not implemented: {feature} (instruction 0x{instruction:08X})")]
    NotImplemented {
        feature: &'static str,
        instruction: u32,
    },

    #[error("BIOS file not found: {0}")]
    BiosNotFound(String),

    #[error("Invalid BIOS size: {got} bytes (expected at most {expected})")]
    InvalidBiosSize { expected: usize, got: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of an [`EmulatorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Address outside every memory region
    UnmappedAddress,
    /// Malformed instruction encoding
    InvalidInstruction,
    /// Recognized but deliberately unmodeled (COP2, SYSCALL, BREAK)
    NotImplemented,
    /// Host-side failure (files, configuration, serialization)
    Host,
}

impl EmulatorError {
    /// Classify this error
    ///
    /// # Example
    /// ```
    /// use psxcore::core::error::{EmulatorError, FaultKind};
    ///
    /// let err = EmulatorError::UnmappedAddress { address: 0x5000_0000 };
    /// assert_eq!(err.kind(), FaultKind::UnmappedAddress);
    /// ```
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::UnmappedAddress { .. } => FaultKind::UnmappedAddress,
            Self::InvalidOpcode { .. }
            | Self::InvalidSpecialFunction { .. }
            | Self::InvalidRegimm { .. }
            | Self::InvalidCoprocessorOp { .. }
            | Self::NoControlRegisters { .. } => FaultKind::InvalidInstruction,
            Self::NotImplemented { .. } => FaultKind::NotImplemented,
            Self::BiosNotFound(_)
            | Self::InvalidBiosSize { .. }
            | Self::Io(_)
            | Self::Config(_)
            | Self::Serialization(_) => FaultKind::Host,
        }
    }
}

impl From<toml::de::Error> for EmulatorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
