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

//! Disk II integration tests
//!
//! The first test drives the controller from 6502 code the way a boot ROM does.
//! The ignored test boots real firmware and needs ROM images:
//!
//! ```bash
//! A2RX_ROM=apple2e.rom A2RX_DISK_ROM=disk2.rom A2RX_DISK1=dos33.dsk \
//!     cargo test --test disk_boot -- --ignored --nocapture
//! ```

mod common;

use a2rx::core::machine::FRAME_CYCLES;
use a2rx::core::Machine;
use common::assertions::{assert_memory, assert_pc};
use common::fixtures::{create_machine, sector_image, settings_with_rom, write_file};
use common::test_roms::{
    get_system_rom_path, hello_rom, PROLOGUE_DONE, PROLOGUE_ORIGIN, PROLOGUE_PROGRAM,
    PROLOGUE_RESULT,
};
use std::path::PathBuf;
use tempfile::tempdir;

fn machine_with_disk(dir: &std::path::Path) -> Machine {
    let rom = write_file(dir, "test.rom", &hello_rom());
    let disk = write_file(dir, "boot.dsk", &sector_image());

    let mut settings = settings_with_rom(&rom);
    settings.disk_ii.disk1.name = disk.to_string_lossy().into_owned();
    create_machine(&settings)
}

#[test]
fn test_cpu_finds_address_prologue() {
    let dir = tempdir().unwrap();
    let mut machine = machine_with_disk(dir.path());

    machine.load_binary(PROLOGUE_ORIGIN, &PROLOGUE_PROGRAM);
    machine.cpu_mut().set_pc(PROLOGUE_ORIGIN);
    machine.run_cycles(5000);

    assert_pc(&machine, PROLOGUE_DONE);
    // The first field on a track is an address field
    assert_memory(&machine, PROLOGUE_RESULT, &[0x96]);

    let disk_ii = machine.disk_ii().unwrap();
    assert!(disk_ii.borrow().is_motor_on());
}

#[test]
fn test_motor_off_floats_sentinels() {
    let dir = tempdir().unwrap();
    let mut machine = machine_with_disk(dir.path());

    let first = machine.memory_mut().read(0xC0EC);
    let second = machine.memory_mut().read(0xC0EC);
    assert_eq!([first, second], [0x7E, 0x7F]);
}

/// Boot real firmware from drive 1 for a few seconds
#[test]
#[ignore] // Requires ROM images - run with: cargo test -- --ignored
fn test_firmware_boot() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();

    let Some(rom) = get_system_rom_path() else {
        panic!("Set A2RX_ROM or place apple2e.rom in the project root");
    };
    let mut settings = settings_with_rom(&PathBuf::from(rom));
    settings.rom.disk_ii = std::env::var("A2RX_DISK_ROM").ok().map(PathBuf::from);
    if let Ok(disk) = std::env::var("A2RX_DISK1") {
        settings.disk_ii.disk1.name = disk;
    }

    let mut machine = create_machine(&settings);
    println!("Initial PC: ${:04X}", machine.cpu().pc());

    const TEST_FRAMES: u64 = 180;
    for frame in 0..TEST_FRAMES {
        if frame % 30 == 0 {
            println!(
                "Frame {}/{} | PC: ${:04X} | Cycles: {}",
                frame,
                TEST_FRAMES,
                machine.cpu().pc(),
                machine.cycles()
            );
        }
        if let Some(address) = machine.run_frame() {
            panic!("Unexpected breakpoint at ${:04X}", address);
        }
    }

    machine.cpu().dump_registers();
    assert!(!machine.cpu().is_jammed(), "CPU jammed during boot");
    assert_eq!(machine.frame_count(), TEST_FRAMES);
    assert!(machine.cycles() >= TEST_FRAMES * FRAME_CYCLES as u64);
}
