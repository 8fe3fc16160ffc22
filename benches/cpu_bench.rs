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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use psxcore::core::cpu::{Disassembler, Instruction, Operation, CPU};
use psxcore::core::memory::Bus;
use std::hint::black_box;

/// ADDIU r1, r1, 1; ORI r2, r1, 0xFF; LW r3, 0(r0); J 0xBFC00000; NOP
const LOOP: [u32; 5] = [0x24210001, 0x342200FF, 0x8C030000, 0x0BF00000, 0x00000000];

fn bus_with(program: &[u32]) -> Bus {
    let bios = program.iter().flat_map(|w| w.to_le_bytes()).collect();
    Bus::new(bios).unwrap()
}

fn cpu_cycle_benchmark(c: &mut Criterion) {
    c.bench_function("cpu_cycle_nop", |b| {
        let mut cpu = CPU::new();
        let mut bus = bus_with(&[]);

        b.iter(|| {
            cpu.reset();
            black_box(cpu.cycle(&mut bus).unwrap());
        });
    });

    c.bench_function("cpu_cycle_loop", |b| {
        let mut cpu = CPU::new();
        let mut bus = bus_with(&LOOP);

        b.iter(|| {
            for _ in 0..LOOP.len() {
                black_box(cpu.cycle(&mut bus).unwrap());
            }
        });
    });
}

fn cpu_register_access_benchmark(c: &mut Criterion) {
    c.bench_function("cpu_register_read", |b| {
        let cpu = CPU::new();
        b.iter(|| {
            for i in 0..32 {
                black_box(cpu.reg(i));
            }
        });
    });

    c.bench_function("cpu_register_write", |b| {
        let mut cpu = CPU::new();
        b.iter(|| {
            for i in 0..32 {
                cpu.set_reg(i, black_box(i as u32 * 100));
            }
        });
    });
}

fn bus_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bus");

    // One address per segment alias plus the unmasked cache control window
    for address in [0x0000_1000u32, 0x8000_1000, 0xA000_1000, 0xBFC0_0000, 0xFFFE_0130] {
        group.bench_with_input(
            BenchmarkId::new("load_word", format!("{:08X}", address)),
            &address,
            |b, &address| {
                let bus = bus_with(&LOOP);
                b.iter(|| black_box(bus.load_word(black_box(address)).unwrap()));
            },
        );
    }

    group.bench_function("store_word_ram", |b| {
        let mut bus = bus_with(&[]);
        b.iter(|| bus.store_word(black_box(0x8000_1000), black_box(0xDEADBEEF)).unwrap());
    });

    group.finish();
}

fn decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    group.bench_function("operation_decode", |b| {
        b.iter(|| {
            for &word in &LOOP {
                black_box(Operation::decode(Instruction::new(black_box(word))).unwrap());
            }
        });
    });

    group.bench_function("disassemble", |b| {
        b.iter(|| {
            for &word in &LOOP {
                black_box(Disassembler::disassemble(black_box(word)));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    cpu_cycle_benchmark,
    cpu_register_access_benchmark,
    bus_benchmark,
    decode_benchmark
);
criterion_main!(benches);
