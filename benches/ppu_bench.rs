// PPU Benchmarks
// Performance benchmarks for the Game Boy PPU's dot-stepped rendering path.

use criterion::{criterion_group, criterion_main, Criterion};
use gb_rs::{MemoryMappedDevice, Ppu};
use std::hint::black_box;

const DOTS_PER_FRAME: u32 = 70224;

/// Benchmark a full frame of PPU dot-ticks, the main performance-critical
/// path since it runs once per `Bus::step_components` call per t-cycle.
fn bench_ppu_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_rendering");
    group.sample_size(20);

    group.bench_function("full_frame_via_tick", |b| {
        let mut ppu = Ppu::new(false);
        ppu.write(0xFF40, 0x91); // LCDC: LCD + BG on, tile data at $8000

        b.iter(|| {
            for _ in 0..DOTS_PER_FRAME {
                ppu.tick();
            }
            black_box(ppu.frame_buffer());
        });
    });

    group.finish();
}

/// Benchmark PPU dot-ticks at smaller granularities.
fn bench_ppu_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_tick");

    group.bench_function("single_tick", |b| {
        let mut ppu = Ppu::new(false);
        ppu.write(0xFF40, 0x91);

        b.iter(|| {
            black_box(ppu.tick());
        });
    });

    group.bench_function("scanline_456_dots", |b| {
        let mut ppu = Ppu::new(false);
        ppu.write(0xFF40, 0x91);

        b.iter(|| {
            // One scanline is 456 dots (80 OAM search + 172 drawing + 204 HBlank).
            for _ in 0..456 {
                ppu.tick();
            }
        });
    });

    group.finish();
}

/// Benchmark I/O register access patterns through `MemoryMappedDevice`.
fn bench_ppu_registers(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_registers");

    group.bench_function("lcdc_write", |b| {
        let mut ppu = Ppu::new(false);

        b.iter(|| {
            ppu.write(black_box(0xFF40), black_box(0x91));
        });
    });

    group.bench_function("stat_read", |b| {
        let ppu = Ppu::new(false);

        b.iter(|| {
            black_box(ppu.read(0xFF41));
        });
    });

    group.bench_function("vram_write_sequence", |b| {
        let mut ppu = Ppu::new(false);

        b.iter(|| {
            // Write a 16-byte tile's worth of pixel data into VRAM.
            for offset in 0..16u16 {
                ppu.write(0x8000 + offset, offset as u8);
            }
        });
    });

    group.finish();
}

/// Benchmark OAM access patterns, e.g. as driven by a DMA transfer.
fn bench_ppu_oam(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_oam");

    group.bench_function("oam_write", |b| {
        let mut ppu = Ppu::new(false);

        b.iter(|| {
            // Write the full 160-byte OAM region, as `OamDma` does per transfer.
            for i in 0..160u16 {
                ppu.write(0xFE00 + i, i as u8);
            }
        });
    });

    group.bench_function("oam_read", |b| {
        let ppu = Ppu::new(false);

        b.iter(|| {
            black_box(ppu.read(0xFE00));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_ppu_rendering, bench_ppu_tick, bench_ppu_registers, bench_ppu_oam);
criterion_main!(benches);
