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

use bitflags::bitflags;

/// Coprocessor 0 (System Control)
///
/// COP0 holds the status, cause and exception registers. No exception
/// vectoring is modeled; the core only consults the isolate-cache bit of
/// the status register.
pub(super) struct COP0 {
    /// COP0 registers (32 registers)
    pub(super) regs: [u32; 32],
}

bitflags! {
    /// Status Register (COP0 r12) bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u32 {
        /// Interrupt enable (current)
        const IEC = 1 << 0;
        /// Kernel/user mode (current)
        const KUC = 1 << 1;
        /// Interrupt enable (previous)
        const IEP = 1 << 2;
        /// Kernel/user mode (previous)
        const KUP = 1 << 3;
        /// Interrupt enable (old)
        const IEO = 1 << 4;
        /// Kernel/user mode (old)
        const KUO = 1 << 5;
        /// Isolate cache: stores target the cache, not memory
        const ISOLATE_CACHE = 1 << 16;
        /// Swap instruction and data caches
        const SWAP_CACHES = 1 << 17;
        /// Boot exception vectors in ROM
        const BEV = 1 << 22;
        /// COP0 usable in user mode
        const CU0 = 1 << 28;
        /// COP2 (GTE) enable
        const CU2 = 1 << 30;

        const _ = !0;
    }
}

impl COP0 {
    /// Status Register
    pub const SR: usize = 12;
    /// Cause Register
    pub const CAUSE: usize = 13;
    /// Exception PC
    pub const EPC: usize = 14;
    /// Processor ID
    pub const PRID: usize = 15;

    /// Status Register value after reset
    const SR_RESET: u32 = 0x10900000;
    /// Processor ID (R3000A identifier)
    const PRID_RESET: u32 = 0x00000002;

    /// Create a new COP0 instance
    ///
    /// # Returns
    /// Initialized COP0 instance with reset values
    pub(super) fn new() -> Self {
        let mut cop0 = Self { regs: [0u32; 32] };
        cop0.reset();
        cop0
    }

    /// Reset COP0 registers to initial state
    pub(super) fn reset(&mut self) {
        self.regs = [0u32; 32];
        self.regs[Self::SR] = Self::SR_RESET;
        self.regs[Self::PRID] = Self::PRID_RESET;
    }

    /// Decoded Status Register
    #[inline(always)]
    pub(super) fn status(&self) -> StatusFlags {
        StatusFlags::from_bits_retain(self.regs[Self::SR])
    }

    /// Whether stores are currently redirected to the (unmodeled) cache
    #[inline(always)]
    pub(super) fn cache_isolated(&self) -> bool {
        self.status().contains(StatusFlags::ISOLATE_CACHE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_values() {
        let cop0 = COP0::new();
        assert_eq!(cop0.regs[COP0::SR], 0x10900000);
        assert_eq!(cop0.regs[COP0::PRID], 0x00000002);
        assert_eq!(cop0.regs[COP0::EPC], 0);
        assert!(!cop0.cache_isolated());
    }

    #[test]
    fn test_isolate_cache_bit() {
        let mut cop0 = COP0::new();
        cop0.regs[COP0::SR] = 0x0001_0000;
        assert!(cop0.cache_isolated());
        assert_eq!(cop0.status(), StatusFlags::ISOLATE_CACHE);

        cop0.regs[COP0::SR] = 0x0002_0000;
        assert!(!cop0.cache_isolated());
        assert!(cop0.status().contains(StatusFlags::SWAP_CACHES));
    }

    #[test]
    fn test_status_retains_unnamed_bits() {
        let mut cop0 = COP0::new();
        cop0.regs[COP0::SR] = 0x8000_0001;
        assert_eq!(cop0.status().bits(), 0x8000_0001);
        assert!(cop0.status().contains(StatusFlags::IEC));
    }
}
