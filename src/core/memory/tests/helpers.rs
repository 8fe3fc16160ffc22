// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Helper functions for memory tests

use super::*;

/// Creates a Bus with an all-zero BIOS
#[allow(dead_code)]
pub fn create_test_bus() -> Bus {
    Bus::new(vec![0u8; Bus::BIOS_SIZE]).unwrap()
}

/// Sets up a Bus with predefined BIOS values
#[allow(dead_code)]
pub fn create_bus_with_bios_data() -> Bus {
    let mut bus = create_test_bus();
    bus.write_bios_for_test(0, &[0x78, 0x56, 0x34, 0x12]);
    bus
}

/// One address per region, usable for round-trip tests
#[allow(dead_code)]
pub const REGION_SAMPLES: [(Region, u32); 8] = [
    (Region::Ram, 0x0010_0000),
    (Region::Scratchpad, 0x1F80_0100),
    (Region::Bios, 0x1FC4_0000),
    (Region::IoPorts, 0x1F80_1810),
    (Region::CacheControl, 0xFFFE_0130),
    (Region::Expansion1, 0x1F40_0000),
    (Region::Expansion2, 0x1F80_3000),
    (Region::Expansion3, 0x1FB0_0000),
];
