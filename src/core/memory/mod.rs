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

//! Memory bus implementation for PlayStation 1 emulator
//!
//! The Bus is the central component for all memory operations in the emulator.
//! It manages address translation, memory mapping, and routing of load/store
//! operations to the appropriate backing buffer.
//!
//! # Memory Map
//!
//! | Physical Address Range | Region        | Size   |
//! |------------------------|---------------|--------|
//! | 0x00000000-0x001FFFFF  | RAM           | 2MB    |
//! | 0x1F000000-0x1F7FFFFF  | Expansion 1   | 8MB    |
//! | 0x1F800000-0x1F8003FF  | Scratchpad    | 1KB    |
//! | 0x1F801000-0x1F802FFF  | I/O Ports     | 8KB    |
//! | 0x1F802000-0x1F803FFF  | Expansion 2   | 8KB    |
//! | 0x1FA00000-0x1FBFFFFF  | Expansion 3   | 2MB    |
//! | 0x1FC00000-0x1FC7FFFF  | BIOS ROM      | 512KB  |
//! | 0xFFFE0000-0xFFFE01FF  | Cache Control | 512B   |
//!
//! I/O ports are tested before expansion 2, so the shared 4KB window
//! resolves to the I/O port buffer.
//!
//! # Address Translation
//!
//! The PlayStation 1 uses MIPS memory segments:
//! - KUSEG (0x00000000-0x7FFFFFFF): User space, cached
//! - KSEG0 (0x80000000-0x9FFFFFFF): Kernel space, cached (mirrors physical memory)
//! - KSEG1 (0xA0000000-0xBFFFFFFF): Kernel space, uncached (mirrors physical memory)
//!
//! Cache control is the exception: it sits in KSEG2 and is only reachable
//! by its literal address.
//!
//! # Example
//!
//! ```
//! use psxcore::core::memory::Bus;
//!
//! let mut bus = Bus::new(vec![0u8; 512 * 1024]).unwrap();
//!
//! // Write to RAM via KSEG0
//! bus.store_word(0x80000000, 0x12345678).unwrap();
//!
//! // Read from same location via different segment (should mirror)
//! assert_eq!(bus.load_word(0x00000000).unwrap(), 0x12345678);
//! assert_eq!(bus.load_word(0xA0000000).unwrap(), 0x12345678);
//! ```

use crate::core::error::{EmulatorError, Result};
use std::fs;
use std::path::Path;

mod region;

#[cfg(test)]
mod tests;

pub use region::{MemoryRegion, Region};

/// Memory bus managing all memory accesses
///
/// The Bus exclusively owns one zero-initialized buffer per region (BIOS
/// excepted, which holds the loaded image) and mutates them only through
/// its load/store entry points.
pub struct Bus {
    /// Main RAM (2MB)
    ram: Vec<u8>,

    /// Scratchpad (1KB fast RAM)
    scratchpad: Vec<u8>,

    /// BIOS ROM (512KB)
    bios: Vec<u8>,

    /// I/O port window (8KB)
    ///
    /// No devices are attached; the window behaves as plain memory.
    io_ports: Vec<u8>,

    /// Cache Control registers (512B at 0xFFFE0000)
    cache_control: Vec<u8>,

    /// Expansion Region 1 (8MB)
    expansion1: Vec<u8>,

    /// Expansion Region 2 (8KB)
    expansion2: Vec<u8>,

    /// Expansion Region 3 (2MB)
    expansion3: Vec<u8>,
}

impl Bus {
    /// BIOS size (512KB)
    pub const BIOS_SIZE: usize = 512 * 1024;

    /// Create a new Bus from a BIOS image
    ///
    /// Images shorter than 512KB are zero-padded; every other region is
    /// zero-initialized.
    ///
    /// # Arguments
    ///
    /// * `bios` - Raw BIOS image
    ///
    /// # Returns
    ///
    /// - `Ok(Bus)` on success
    /// - `Err(EmulatorError::InvalidBiosSize)` if the image exceeds 512KB
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::memory::Bus;
    ///
    /// let bus = Bus::new(vec![0x0D, 0xF0, 0xAD, 0xDE]).unwrap();
    /// assert_eq!(bus.load_word(0xBFC00000).unwrap(), 0xDEADF00D);
    /// assert_eq!(bus.load_word(0xBFC00004).unwrap(), 0);
    /// ```
    pub fn new(mut bios: Vec<u8>) -> Result<Self> {
        if bios.len() > Self::BIOS_SIZE {
            return Err(EmulatorError::InvalidBiosSize {
                expected: Self::BIOS_SIZE,
                got: bios.len(),
            });
        }

        if bios.len() < Self::BIOS_SIZE {
            log::debug!(
                "Padding {}-byte BIOS image to {} bytes",
                bios.len(),
                Self::BIOS_SIZE
            );
            bios.resize(Self::BIOS_SIZE, 0);
        }

        Ok(Self {
            ram: vec![0u8; Region::Ram.size()],
            scratchpad: vec![0u8; Region::Scratchpad.size()],
            bios,
            io_ports: vec![0u8; Region::IoPorts.size()],
            cache_control: vec![0u8; Region::CacheControl.size()],
            expansion1: vec![0u8; Region::Expansion1.size()],
            expansion2: vec![0u8; Region::Expansion2.size()],
            expansion3: vec![0u8; Region::Expansion3.size()],
        })
    }

    /// Create a new Bus from a BIOS file on disk
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the BIOS image
    ///
    /// # Errors
    ///
    /// - `EmulatorError::BiosNotFound` if the file does not exist
    /// - `EmulatorError::Io` if the file cannot be read
    /// - `EmulatorError::InvalidBiosSize` if the image exceeds 512KB
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psxcore::core::memory::Bus;
    ///
    /// let bus = Bus::from_bios_file("SCPH1001.BIN").unwrap();
    /// ```
    pub fn from_bios_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EmulatorError::BiosNotFound(path.display().to_string()));
        }

        let bios = fs::read(path)?;
        log::info!("Read {} bytes of BIOS from {}", bios.len(), path.display());
        Self::new(bios)
    }

    /// Reset the bus to initial state
    ///
    /// Clears every volatile region to zero, simulating a power-cycle.
    /// BIOS contents are preserved.
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::memory::Bus;
    ///
    /// let mut bus = Bus::new(Vec::new()).unwrap();
    /// bus.store_word(0x80000000, 0x12345678).unwrap();
    /// bus.reset();
    /// assert_eq!(bus.load_word(0x80000000).unwrap(), 0x00000000);
    /// ```
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.scratchpad.fill(0);
        self.io_ports.fill(0);
        self.cache_control.fill(0);
        self.expansion1.fill(0);
        self.expansion2.fill(0);
        self.expansion3.fill(0);
        log::debug!("Bus reset (BIOS preserved)");
    }

    fn buffer(&self, region: Region) -> &[u8] {
        match region {
            Region::Ram => &self.ram,
            Region::Scratchpad => &self.scratchpad,
            Region::Bios => &self.bios,
            Region::IoPorts => &self.io_ports,
            Region::CacheControl => &self.cache_control,
            Region::Expansion1 => &self.expansion1,
            Region::Expansion2 => &self.expansion2,
            Region::Expansion3 => &self.expansion3,
        }
    }

    fn buffer_mut(&mut self, region: Region) -> &mut [u8] {
        match region {
            Region::Ram => &mut self.ram,
            Region::Scratchpad => &mut self.scratchpad,
            Region::Bios => &mut self.bios,
            Region::IoPorts => &mut self.io_ports,
            Region::CacheControl => &mut self.cache_control,
            Region::Expansion1 => &mut self.expansion1,
            Region::Expansion2 => &mut self.expansion2,
            Region::Expansion3 => &mut self.expansion3,
        }
    }

    /// Map an access of `N` bytes to a slice of its backing buffer
    ///
    /// Fails if the address is unmapped or the access would run past the
    /// end of the region it starts in.
    fn map<const N: usize>(&self, vaddr: u32) -> Result<&[u8; N]> {
        let (region, offset) =
            Self::resolve(vaddr).ok_or(EmulatorError::UnmappedAddress { address: vaddr })?;
        log::trace!("load{} {:?}+0x{:X} (0x{:08X})", N * 8, region, offset, vaddr);

        self.buffer(region)
            .get(offset..offset + N)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(EmulatorError::UnmappedAddress { address: vaddr })
    }

    fn map_mut<const N: usize>(&mut self, vaddr: u32) -> Result<&mut [u8; N]> {
        let (region, offset) =
            Self::resolve(vaddr).ok_or(EmulatorError::UnmappedAddress { address: vaddr })?;
        log::trace!("store{} {:?}+0x{:X} (0x{:08X})", N * 8, region, offset, vaddr);

        self.buffer_mut(region)
            .get_mut(offset..offset + N)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(EmulatorError::UnmappedAddress { address: vaddr })
    }

    /// Load 8-bit value from memory
    ///
    /// # Arguments
    ///
    /// * `vaddr` - Virtual address to read from
    ///
    /// # Returns
    ///
    /// - `Ok(u8)` containing the byte value
    /// - `Err(EmulatorError::UnmappedAddress)` if the address is unmapped
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::memory::Bus;
    ///
    /// let mut bus = Bus::new(Vec::new()).unwrap();
    /// bus.store_byte(0x80000000, 0x42).unwrap();
    /// assert_eq!(bus.load_byte(0x80000000).unwrap(), 0x42);
    /// ```
    pub fn load_byte(&self, vaddr: u32) -> Result<u8> {
        let [b0] = *self.map::<1>(vaddr)?;
        Ok(b0)
    }

    /// Load 16-bit value (little-endian) from memory
    ///
    /// No alignment is enforced.
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::memory::Bus;
    ///
    /// let mut bus = Bus::new(Vec::new()).unwrap();
    /// bus.store_half(0x80000000, 0xBEEF).unwrap();
    /// assert_eq!(bus.load_byte(0x80000000).unwrap(), 0xEF);
    /// assert_eq!(bus.load_half(0x80000000).unwrap(), 0xBEEF);
    /// ```
    pub fn load_half(&self, vaddr: u32) -> Result<u16> {
        let [b0, b1] = *self.map::<2>(vaddr)?;
        Ok((b1 as u16) << 8 | b0 as u16)
    }

    /// Load 32-bit value (little-endian) from memory
    ///
    /// No alignment is enforced.
    pub fn load_word(&self, vaddr: u32) -> Result<u32> {
        let [b0, b1, b2, b3] = *self.map::<4>(vaddr)?;
        Ok((b3 as u32) << 24 | (b2 as u32) << 16 | (b1 as u32) << 8 | b0 as u32)
    }

    /// Store 8-bit value to memory
    ///
    /// # Arguments
    ///
    /// * `vaddr` - Virtual address to write to
    /// * `value` - Byte to store
    ///
    /// # Returns
    ///
    /// - `Ok(())` on success
    /// - `Err(EmulatorError::UnmappedAddress)` if the address is unmapped
    pub fn store_byte(&mut self, vaddr: u32, value: u8) -> Result<()> {
        let bytes = self.map_mut::<1>(vaddr)?;
        bytes[0] = value;
        Ok(())
    }

    /// Store 16-bit value (little-endian) to memory
    pub fn store_half(&mut self, vaddr: u32, value: u16) -> Result<()> {
        let bytes = self.map_mut::<2>(vaddr)?;
        bytes[0] = value as u8;
        bytes[1] = (value >> 8) as u8;
        Ok(())
    }

    /// Store 32-bit value (little-endian) to memory
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::memory::Bus;
    ///
    /// let mut bus = Bus::new(Vec::new()).unwrap();
    /// bus.store_word(0x1F800000, 0x11223344).unwrap();
    /// assert_eq!(bus.load_byte(0x1F800003).unwrap(), 0x11);
    /// ```
    pub fn store_word(&mut self, vaddr: u32, value: u32) -> Result<()> {
        let bytes = self.map_mut::<4>(vaddr)?;
        bytes[0] = value as u8;
        bytes[1] = (value >> 8) as u8;
        bytes[2] = (value >> 16) as u8;
        bytes[3] = (value >> 24) as u8;
        Ok(())
    }

    /// Write raw bytes into the BIOS buffer for testing
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset into BIOS
    /// * `data` - Bytes to copy
    #[cfg(test)]
    pub(crate) fn write_bios_for_test(&mut self, offset: usize, data: &[u8]) {
        self.bios[offset..offset + data.len()].copy_from_slice(data);
    }
}
