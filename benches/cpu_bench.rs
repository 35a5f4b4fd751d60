// CPU Benchmarks
// Performance benchmarks for Sharp LR35902 instruction execution.

use criterion::{criterion_group, criterion_main, Criterion};
use gb_rs::{Bus, Cpu};
use std::hint::black_box;

fn bench_cpu_instructions(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_instructions");

    group.bench_function("nop", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();

        for i in 0xC000u16..0xC100 {
            bus.write(i, 0x00); // NOP
        }
        cpu.reset();
        cpu.pc = 0xC000;

        b.iter(|| {
            cpu.step(black_box(&mut bus));
        });
    });

    group.bench_function("ld_a_immediate", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();

        // LD A, $42 (0x3E 0x42)
        for i in (0xC000u16..0xC100).step_by(2) {
            bus.write(i, 0x3E);
            bus.write(i + 1, 0x42);
        }
        cpu.reset();
        cpu.pc = 0xC000;

        b.iter(|| {
            cpu.step(black_box(&mut bus));
        });
    });

    group.bench_function("add_a_immediate", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();

        // ADD A, $01 (0xC6 0x01)
        for i in (0xC000u16..0xC100).step_by(2) {
            bus.write(i, 0xC6);
            bus.write(i + 1, 0x01);
        }
        cpu.reset();
        cpu.pc = 0xC000;

        b.iter(|| {
            cpu.step(black_box(&mut bus));
        });
    });

    group.bench_function("ld_absolute_a", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();

        // LD ($D000), A (0xEA 0x00 0xD0)
        for i in (0xC000u16..0xC0FF).step_by(3) {
            bus.write(i, 0xEA);
            bus.write(i + 1, 0x00);
            bus.write(i + 2, 0xD0);
        }
        cpu.reset();
        cpu.pc = 0xC000;

        b.iter(|| {
            cpu.step(black_box(&mut bus));
        });
    });

    group.bench_function("jp_absolute", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();

        // JP $C000 (0xC3 0x00 0xC0), a tight self-loop.
        bus.write(0xC000, 0xC3);
        bus.write(0xC001, 0x00);
        bus.write(0xC002, 0xC0);

        cpu.reset();
        cpu.pc = 0xC000;

        b.iter(|| {
            cpu.step(black_box(&mut bus));
        });
    });

    group.finish();
}

fn bench_instruction_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("instruction_sequences");

    group.bench_function("typical_sequence", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();

        let mut addr = 0xC000u16;

        // LD A, $00
        bus.write(addr, 0x3E);
        addr += 1;
        bus.write(addr, 0x00);
        addr += 1;

        // LD ($D000), A
        bus.write(addr, 0xEA);
        addr += 1;
        bus.write(addr, 0x00);
        addr += 1;
        bus.write(addr, 0xD0);
        addr += 1;

        // LD B, $05
        bus.write(addr, 0x06);
        addr += 1;
        bus.write(addr, 0x05);
        addr += 1;

        // INC C
        bus.write(addr, 0x0C);
        addr += 1;

        // DEC B
        bus.write(addr, 0x05);
        addr += 1;

        // JR NZ, back to LD A
        bus.write(addr, 0x20);
        addr += 1;
        bus.write(addr, (0xC000i32 - (addr as i32) - 1) as u8);

        cpu.reset();
        cpu.pc = 0xC000;

        b.iter(|| {
            for _ in 0..7 {
                cpu.step(black_box(&mut bus));
            }
        });
    });

    group.finish();
}

fn bench_frame_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_execution");
    group.sample_size(20);

    group.bench_function("70224_t_cycles_one_frame", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();

        for addr in 0xC000u16..=0xDFFF {
            bus.write(addr, 0x00); // NOP
        }
        cpu.reset();
        cpu.pc = 0xC000;

        b.iter(|| {
            let start_cycles = cpu.cycles;
            // 70224 master-clock t-cycles per frame, in M-cycle units.
            while cpu.cycles - start_cycles < 70224 / 4 {
                cpu.step(black_box(&mut bus));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cpu_instructions, bench_instruction_sequence, bench_frame_execution);
criterion_main!(benches);
