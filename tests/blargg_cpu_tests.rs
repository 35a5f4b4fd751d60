// Blargg's Game Boy CPU test suite
//
// These ROMs validate Sharp LR35902 instruction correctness and interrupt
// timing. They are not bundled with the repository (copyrighted test ROMs
// belong to their author); drop `cpu_instrs.gb`, `instr_timing.gb`, and
// `mem_timing.gb` under `tests/gb-test-roms/` to run this suite.

mod common;

use common::run_blargg_style_test;

fn run_cpu_test(rom_path: &str) -> Result<(bool, String), String> {
    run_blargg_style_test(rom_path, 200_000_000)
}

#[test]
#[ignore] // Run with: cargo test --test blargg_cpu_tests -- --ignored --nocapture
fn cpu_instrs_all() {
    let result = run_cpu_test("tests/gb-test-roms/cpu_instrs/cpu_instrs.gb");
    match result {
        Ok((passed, message)) => {
            println!("\n{}", message);
            assert!(passed, "cpu_instrs failed: {}", message);
        }
        Err(e) => panic!("test error: {}", e),
    }
}

#[test]
#[ignore]
fn cpu_instrs_individual() {
    let roms = [
        "01-special.gb",
        "02-interrupts.gb",
        "03-op sp,hl.gb",
        "04-op r,imm.gb",
        "05-op rp.gb",
        "06-ld r,r.gb",
        "07-jr,jp,call,ret,rst.gb",
        "08-misc instrs.gb",
        "09-op r,r.gb",
        "10-bit ops.gb",
        "11-op a,(hl).gb",
    ];

    for rom in roms {
        let path = format!("tests/gb-test-roms/cpu_instrs/individual/{}", rom);
        println!("\nRunning: {}", rom);
        match run_cpu_test(&path) {
            Ok((passed, message)) => {
                println!("{}", message);
                assert!(passed, "{} failed: {}", rom, message);
            }
            Err(e) => panic!("test error in {}: {}", rom, e),
        }
    }
}

#[test]
#[ignore]
fn instr_timing() {
    let result = run_cpu_test("tests/gb-test-roms/instr_timing/instr_timing.gb");
    match result {
        Ok((passed, message)) => {
            println!("\n{}", message);
            assert!(passed, "instr_timing failed: {}", message);
        }
        Err(e) => panic!("test error: {}", e),
    }
}

#[test]
#[ignore]
fn mem_timing() {
    let result = run_cpu_test("tests/gb-test-roms/mem_timing/mem_timing.gb");
    match result {
        Ok((passed, message)) => {
            println!("\n{}", message);
            assert!(passed, "mem_timing failed: {}", message);
        }
        Err(e) => panic!("test error: {}", e),
    }
}

#[test]
#[ignore]
fn mem_timing_2() {
    let result = run_cpu_test("tests/gb-test-roms/mem_timing-2/mem_timing.gb");
    match result {
        Ok((passed, message)) => {
            println!("\n{}", message);
            assert!(passed, "mem_timing-2 failed: {}", message);
        }
        Err(e) => panic!("test error: {}", e),
    }
}
