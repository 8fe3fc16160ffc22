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

use super::helpers::*;

#[test]
fn test_jump_executes_delay_slot() {
    // J    0xBFC00100
    // ADD  r1, r2, r3
    let target = 0xBFC00100;
    let (mut cpu, mut bus) = setup(&[jtype(0x02, target >> 2), rtype(0x20, 2, 3, 1, 0)]);
    cpu.set_reg(2, 20);
    cpu.set_reg(3, 22);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.pc(), target);
    assert_eq!(cpu.reg(1), 42);
}

#[test]
fn test_jump_keeps_delay_slot_segment() {
    // Target field only supplies the low 28 bits
    let (mut cpu, mut bus) = setup(&[jtype(0x02, 0x0000_0040), 0]);

    run(&mut cpu, &mut bus, 1);

    assert_eq!(cpu.pc_next(), 0xB000_0100);
}

#[test]
fn test_jal_links_pc_next_plus_four() {
    let (mut cpu, mut bus) = setup(&[jtype(0x03, 0xBFC00100 >> 2), 0]);

    run(&mut cpu, &mut bus, 1);

    // pc_next was 0xBFC00008 while JAL executed
    assert_eq!(cpu.reg(31), 0xBFC0000C);
    assert_eq!(cpu.pc(), 0xBFC00004);
    assert_eq!(cpu.pc_next(), 0xBFC00100);
}

#[test]
fn test_jr_and_jalr() {
    // JR r5
    let (mut cpu, mut bus) = setup(&[rtype(0x08, 5, 0, 0, 0), 0]);
    cpu.set_reg(5, 0x8000_1000);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.pc(), 0x8000_1000);

    // JALR r7, r5
    let (mut cpu, mut bus) = setup(&[rtype(0x09, 5, 0, 7, 0), 0]);
    cpu.set_reg(5, 0x8000_2000);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.pc(), 0x8000_2000);
    assert_eq!(cpu.reg(7), 0xBFC0000C);
}

#[test]
fn test_jalr_same_register_reads_old_value() {
    // JALR r5, r5
    let (mut cpu, mut bus) = setup(&[rtype(0x09, 5, 0, 5, 0), 0]);
    cpu.set_reg(5, 0x8000_3000);

    run(&mut cpu, &mut bus, 1);

    assert_eq!(cpu.pc_next(), 0x8000_3000);
    assert_eq!(cpu.reg(5), 0xBFC0000C);
}

#[test]
fn test_branch_target_relative_to_pc_next() {
    // BEQ r0, r0, +1 at 0xBFC00000 executes with pc_next = 0xBFC00008
    let (mut cpu, mut bus) = setup(&[itype(0x04, 0, 0, 1), 0]);

    run(&mut cpu, &mut bus, 1);

    assert_eq!(cpu.pc(), 0xBFC00004);
    assert_eq!(cpu.pc_next(), 0xBFC0000C);
}

#[test]
fn test_beq_taken_reaches_target_after_delay_slot() {
    // BEQ r0, r0, +3
    let (mut cpu, mut bus) = setup(&[itype(0x04, 0, 0, 3), 0]);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.pc(), 0xBFC00014);
}

#[test]
fn test_backward_branch() {
    // BEQ r0, r0, -2 loops on itself
    let (mut cpu, mut bus) = setup(&[itype(0x04, 0, 0, 0xFFFE), 0]);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.pc(), 0xBFC00000);
}

#[test]
fn test_bne_compares_rs_with_rt() {
    // BNE r1, r2, +3
    let program = [itype(0x05, 1, 2, 3), 0];

    let (mut cpu, mut bus) = setup(&program);
    cpu.set_reg(1, 1);
    cpu.set_reg(2, 2);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.pc(), 0xBFC00014);

    let (mut cpu, mut bus) = setup(&program);
    cpu.set_reg(1, 2);
    cpu.set_reg(2, 2);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.pc(), 0xBFC00008);
}

#[test]
fn test_signed_zero_branches() {
    // (opcode, rt selector, r1 value, taken)
    let cases = [
        (0x06, 0x00, 0u32, true),           // BLEZ 0
        (0x06, 0x00, 0xFFFF_FFFF, true),    // BLEZ -1
        (0x06, 0x00, 1, false),             // BLEZ 1
        (0x07, 0x00, 1, true),              // BGTZ 1
        (0x07, 0x00, 0x8000_0000, false),   // BGTZ MIN
        (0x01, 0x00, 0xFFFF_FFFF, true),    // BLTZ -1
        (0x01, 0x00, 0, false),             // BLTZ 0
        (0x01, 0x01, 0, true),              // BGEZ 0
        (0x01, 0x01, 0x8000_0000, false),   // BGEZ MIN
    ];

    for (opcode, selector, value, taken) in cases {
        let (mut cpu, mut bus) = setup(&[itype(opcode, 1, selector, 3), 0]);
        cpu.set_reg(1, value);

        run(&mut cpu, &mut bus, 2);

        let expected = if taken { 0xBFC00014 } else { 0xBFC00008 };
        assert_eq!(
            cpu.pc(),
            expected,
            "opcode {:02X} selector {:02X} value {:08X}",
            opcode,
            selector,
            value
        );
    }
}

#[test]
fn test_bgezal_links_when_not_taken() {
    // BGEZAL r1, +3 with r1 = -1
    let (mut cpu, mut bus) = setup(&[itype(0x01, 1, 0x11, 3), 0]);
    cpu.set_reg(1, 0xFFFF_FFFF);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.reg(31), 0xBFC0000C);
    assert_eq!(cpu.pc(), 0xBFC00008);
}

#[test]
fn test_bltzal_taken_links() {
    // BLTZAL r1, +3 with r1 = -1
    let (mut cpu, mut bus) = setup(&[itype(0x01, 1, 0x10, 3), 0]);
    cpu.set_reg(1, 0xFFFF_FFFF);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.reg(31), 0xBFC0000C);
    assert_eq!(cpu.pc(), 0xBFC00014);
}

#[test]
fn test_delay_slot_flag() {
    let (mut cpu, mut bus) = setup(&[itype(0x04, 0, 0, 3), 0]);

    run(&mut cpu, &mut bus, 1);
    assert!(cpu.in_delay_slot());

    run(&mut cpu, &mut bus, 1);
    assert!(!cpu.in_delay_slot());
}

#[test]
fn test_untaken_branch_still_has_delay_slot() {
    let (mut cpu, mut bus) = setup(&[itype(0x05, 0, 0, 3), 0]);

    run(&mut cpu, &mut bus, 1);

    assert!(cpu.in_delay_slot());
    assert_eq!(cpu.pc_next(), 0xBFC00008);
}
