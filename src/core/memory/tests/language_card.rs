// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Language card tests
//!
//! Tests for $C080-$C08F: read source, bank selection and the two-read
//! write enable sequence.

use super::helpers::create_memory_with_rom;
use super::*;

#[test]
fn test_rom_visible_at_power_on() {
    let mut memory = create_memory_with_rom();

    assert_eq!(memory.read(0xD000), 0xD0);
    assert_eq!(memory.read(0xFFFF), 0xFF);
}

#[test]
fn test_power_on_writes_reach_bank2_ram() {
    let mut memory = create_memory_with_rom();

    memory.write(0xD000, 0x42);
    assert_eq!(memory.read(0xD000), 0xD0);

    memory.read(0xC080); // read RAM, write protect
    assert_eq!(memory.read(0xD000), 0x42);
}

#[test]
fn test_two_odd_reads_enable_writing() {
    let mut memory = create_memory_with_rom();
    memory.read(0xC080);
    assert!(!memory.switches().contains(SoftSwitches::LCWRITE));

    memory.read(0xC083);
    assert!(!memory.switches().contains(SoftSwitches::LCWRITE));
    memory.read(0xC083);
    assert!(memory.switches().contains(SoftSwitches::LCWRITE));
    assert!(memory.switches().contains(SoftSwitches::LCRAM));

    memory.write(0xE000, 0x5E);
    assert_eq!(memory.read(0xE000), 0x5E);
}

#[test]
fn test_odd_write_resets_sequence() {
    let mut memory = create_memory_with_rom();
    memory.read(0xC080);

    memory.read(0xC083);
    memory.write(0xC083, 0);
    memory.read(0xC083);

    assert!(!memory.switches().contains(SoftSwitches::LCWRITE));
}

#[test]
fn test_even_access_write_protects() {
    let mut memory = create_memory_with_rom();
    memory.read(0xC08B);
    memory.read(0xC08B);
    assert!(memory.switches().contains(SoftSwitches::LCWRITE));

    memory.read(0xC088);
    assert!(!memory.switches().contains(SoftSwitches::LCWRITE));
    assert_eq!(memory.identify_write_region(0xD000), MemoryRegion::Unmapped);
}

#[test]
fn test_read_rom_write_ram() {
    let mut memory = create_memory_with_rom();
    memory.read(0xC081);
    memory.read(0xC081);

    // ROM readable, bank 2 RAM writable
    memory.write(0xD123, 0x66);
    assert_eq!(memory.read(0xD123), 0xD1);
    assert_eq!(memory.main_ram()[0xD123], 0x66);
}

#[test]
fn test_banks_are_separate() {
    let mut memory = create_memory_with_rom();

    memory.read(0xC083);
    memory.read(0xC083); // bank 2, read/write RAM
    memory.write(0xD000, 0x22);

    memory.read(0xC08B);
    memory.read(0xC08B); // bank 1, read/write RAM
    memory.write(0xD000, 0x11);

    assert_eq!(memory.read(0xD000), 0x11);
    memory.read(0xC083);
    assert_eq!(memory.read(0xD000), 0x22);

    // Bank 1 is stored below $D000
    assert_eq!(memory.main_ram()[0xC000], 0x11);
    assert_eq!(memory.main_ram()[0xD000], 0x22);
}

#[test]
fn test_upper_area_shared_by_both_banks() {
    let mut memory = create_memory_with_rom();

    memory.read(0xC08B);
    memory.read(0xC08B);
    memory.write(0xE800, 0x33);

    memory.read(0xC083);
    assert_eq!(memory.read(0xE800), 0x33);
}

#[test]
fn test_altzp_selects_aux_language_card() {
    let mut memory = create_memory_with_rom();
    memory.read(0xC083);
    memory.read(0xC083);
    memory.write(0xD000, 0x01);

    memory.write(0xC009, 0); // ALTZP on
    memory.write(0xD000, 0x02);

    assert_eq!(memory.main_ram()[0xD000], 0x01);
    assert_eq!(memory.aux_ram()[0xD000], 0x02);
    assert_eq!(memory.identify_region(0xD000), MemoryRegion::Aux);
}

#[test]
fn test_status_registers() {
    let mut memory = create_memory_with_rom();

    memory.read(0xC08B);
    assert_eq!(memory.read(0xC011) & 0x80, 0x00); // bank 1
    assert_eq!(memory.read(0xC012) & 0x80, 0x80); // RAM read

    memory.read(0xC082);
    assert_eq!(memory.read(0xC011) & 0x80, 0x80);
    assert_eq!(memory.read(0xC012) & 0x80, 0x00);
}

#[test]
fn test_reset_restores_rom() {
    let mut memory = create_memory_with_rom();
    memory.read(0xC08B);

    memory.reset();

    assert_eq!(memory.read(0xD000), 0xD0);
    assert!(memory.switches().contains(SoftSwitches::LCBANK2));
    assert!(memory.switches().contains(SoftSwitches::LCWRITE));
}
