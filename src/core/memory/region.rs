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

//! Memory region identification and address translation
//!
//! This module handles the PlayStation 1's memory segmentation and address translation.
//! The PSX uses MIPS memory segments with different caching behaviors.

use super::Bus;

/// Memory region identification
///
/// Used to identify which backing buffer an address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Main RAM (2MB)
    Ram,
    /// Scratchpad (1KB)
    Scratchpad,
    /// BIOS ROM (512KB)
    Bios,
    /// I/O ports (8KB)
    IoPorts,
    /// Cache Control registers (512B, unmirrored)
    CacheControl,
    /// Expansion Region 1 (8MB)
    Expansion1,
    /// Expansion Region 2 (8KB)
    Expansion2,
    /// Expansion Region 3 (2MB)
    Expansion3,
}

/// Static descriptor of one memory region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    /// First address of the region
    pub base: u32,
    /// Size in bytes
    pub size: u32,
}

impl MemoryRegion {
    /// Create a region descriptor
    pub const fn new(base: u32, size: u32) -> Self {
        Self { base, size }
    }

    /// Check whether `address` lies inside `base..base+size`
    ///
    /// # Example
    /// ```
    /// use psxcore::core::memory::MemoryRegion;
    ///
    /// let region = MemoryRegion::new(0x1F80_0000, 1024);
    /// assert!(region.contains(0x1F80_03FF));
    /// assert!(!region.contains(0x1F80_0400));
    /// ```
    #[inline(always)]
    pub const fn contains(&self, address: u32) -> bool {
        // Widen so regions ending at 4GB cannot overflow
        address >= self.base && (address as u64) < self.base as u64 + self.size as u64
    }

    /// Byte offset of `address` inside the region
    ///
    /// Only meaningful when [`contains`](Self::contains) holds.
    #[inline(always)]
    pub const fn offset(&self, address: u32) -> usize {
        (address - self.base) as usize
    }
}

impl Region {
    /// All regions, in the order [`Bus`] tests them
    pub const ALL: [Region; 8] = [
        Region::CacheControl,
        Region::Ram,
        Region::Scratchpad,
        Region::IoPorts,
        Region::Bios,
        Region::Expansion1,
        Region::Expansion2,
        Region::Expansion3,
    ];

    /// Regions tested after the address is masked to 29 bits, in lookup order
    pub(super) const MASKED: [Region; 7] = [
        Region::Ram,
        Region::Scratchpad,
        Region::IoPorts,
        Region::Bios,
        Region::Expansion1,
        Region::Expansion2,
        Region::Expansion3,
    ];

    /// Address range descriptor of this region
    pub const fn descriptor(self) -> MemoryRegion {
        match self {
            Region::Ram => MemoryRegion::new(0x0000_0000, 2048 * 1024),
            Region::Scratchpad => MemoryRegion::new(0x1F80_0000, 1024),
            Region::Bios => MemoryRegion::new(0x1FC0_0000, 512 * 1024),
            Region::IoPorts => MemoryRegion::new(0x1F80_1000, 8 * 1024),
            Region::CacheControl => MemoryRegion::new(0xFFFE_0000, 512),
            Region::Expansion1 => MemoryRegion::new(0x1F00_0000, 8192 * 1024),
            Region::Expansion2 => MemoryRegion::new(0x1F80_2000, 8 * 1024),
            Region::Expansion3 => MemoryRegion::new(0x1FA0_0000, 2048 * 1024),
        }
    }

    /// Size of the backing buffer in bytes
    pub const fn size(self) -> usize {
        self.descriptor().size as usize
    }
}

impl Bus {
    /// Translate virtual address to physical address
    ///
    /// The PlayStation 1 uses MIPS memory segments:
    /// - KUSEG (0x00000000-0x7FFFFFFF): User space, cached
    /// - KSEG0 (0x80000000-0x9FFFFFFF): Kernel space, cached (mirrors physical memory)
    /// - KSEG1 (0xA0000000-0xBFFFFFFF): Kernel space, uncached (mirrors physical memory)
    ///
    /// # Arguments
    ///
    /// * `vaddr` - Virtual address to translate
    ///
    /// # Returns
    ///
    /// Physical address (with upper 3 bits masked off)
    #[inline(always)]
    pub(super) fn translate_address(vaddr: u32) -> u32 {
        vaddr & 0x1FFF_FFFF
    }

    /// Resolve an address to its region and byte offset
    ///
    /// The cache control region lives above the 29-bit physical space, so it
    /// is matched against the raw address before any masking. All other
    /// regions are matched against the masked address.
    pub(super) fn resolve(vaddr: u32) -> Option<(Region, usize)> {
        let cache_control = Region::CacheControl.descriptor();
        if cache_control.contains(vaddr) {
            return Some((Region::CacheControl, cache_control.offset(vaddr)));
        }

        let paddr = Self::translate_address(vaddr);
        Region::MASKED.iter().find_map(|&region| {
            let desc = region.descriptor();
            desc.contains(paddr).then(|| (region, desc.offset(paddr)))
        })
    }

    /// Identify memory region for an address
    ///
    /// # Arguments
    ///
    /// * `vaddr` - Virtual address
    ///
    /// # Returns
    ///
    /// The region containing this address, or `None` if it is unmapped
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::memory::{Bus, Region};
    ///
    /// assert_eq!(Bus::identify_region(0x0000_0000), Some(Region::Ram));
    /// assert_eq!(Bus::identify_region(0x1F80_0000), Some(Region::Scratchpad));
    /// assert_eq!(Bus::identify_region(0x1F80_1000), Some(Region::IoPorts));
    /// assert_eq!(Bus::identify_region(0xBFC0_0000), Some(Region::Bios));
    /// assert_eq!(Bus::identify_region(0xFFFE_0130), Some(Region::CacheControl));
    /// assert_eq!(Bus::identify_region(0x5000_0000), None);
    /// ```
    pub fn identify_region(vaddr: u32) -> Option<Region> {
        Self::resolve(vaddr).map(|(region, _)| region)
    }
}
