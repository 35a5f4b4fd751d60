// Blargg's Game Boy APU test suite (dmg_sound / cgb_sound)
//
// Validates length counters, sweep, envelope, and frame sequencer timing
// across all four channels. Drop the corresponding ROMs under
// `tests/gb-test-roms/` to run this suite.

mod common;

use common::run_blargg_style_test;

fn run_apu_test(rom_path: &str) -> Result<(bool, String), String> {
    run_blargg_style_test(rom_path, 300_000_000)
}

#[test]
#[ignore] // Run with: cargo test --test blargg_apu_tests -- --ignored --nocapture
fn dmg_sound_all() {
    let result = run_apu_test("tests/gb-test-roms/dmg_sound/dmg_sound.gb");
    match result {
        Ok((passed, message)) => {
            println!("\n{}", message);
            assert!(passed, "dmg_sound failed: {}", message);
        }
        Err(e) => panic!("test error: {}", e),
    }
}

#[test]
#[ignore]
fn dmg_sound_individual() {
    let roms = [
        "01-registers.gb",
        "02-len ctr.gb",
        "03-trigger.gb",
        "04-sweep.gb",
        "05-sweep details.gb",
        "06-overflow on trigger.gb",
        "07-len sweep period sync.gb",
        "08-len ctr during power.gb",
        "09-wave read while on.gb",
        "10-wave trigger while on.gb",
        "11-regs after power.gb",
        "12-wave write while on.gb",
    ];

    for rom in roms {
        let path = format!("tests/gb-test-roms/dmg_sound/rom_singles/{}", rom);
        println!("\nRunning: {}", rom);
        match run_apu_test(&path) {
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
fn cgb_sound_all() {
    let result = run_apu_test("tests/gb-test-roms/cgb_sound/cgb_sound.gb");
    match result {
        Ok((passed, message)) => {
            println!("\n{}", message);
            assert!(passed, "cgb_sound failed: {}", message);
        }
        Err(e) => panic!("test error: {}", e),
    }
}
