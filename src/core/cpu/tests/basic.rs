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

//! Basic CPU tests
//!
//! Tests for CPU initialization, reset, register access and save states.

use super::*;

#[test]
fn test_cpu_initialization() {
    let cpu = CPU::new(CpuVariant::Nmos6502);

    assert_eq!(cpu.a(), 0);
    assert_eq!(cpu.x(), 0);
    assert_eq!(cpu.y(), 0);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.pc(), 0);
    assert!(cpu.status().contains(StatusFlags::INTERRUPT_DISABLE));
    assert!(cpu.status().contains(StatusFlags::UNUSED));
    assert!(!cpu.is_jammed());
}

#[test]
fn test_default_is_65c02() {
    assert_eq!(CPU::default().variant(), CpuVariant::Cmos65C02);
}

#[test]
fn test_reset_loads_vector() {
    let mut memory = memory_with_vectors(0x1111, 0xFA62, 0x3333);
    let mut cpu = CPU::new(CpuVariant::Nmos6502);
    cpu.set_a(0x42);
    cpu.set_sp(0x10);

    cpu.reset(&mut memory);

    assert_eq!(cpu.pc(), 0xFA62);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_reset_decimal_flag_per_variant() {
    let mut memory = memory_with_vectors(0, 0x0300, 0);

    let mut nmos = CPU::new(CpuVariant::Nmos6502);
    nmos.set_status(StatusFlags::DECIMAL);
    nmos.reset(&mut memory);
    assert!(nmos.status().contains(StatusFlags::DECIMAL));

    let mut cmos = CPU::new(CpuVariant::Cmos65C02);
    cmos.set_status(StatusFlags::DECIMAL);
    cmos.reset(&mut memory);
    assert!(!cmos.status().contains(StatusFlags::DECIMAL));
}

#[test]
fn test_set_status_keeps_unused_bit() {
    let mut cpu = CPU::default();

    cpu.set_status(StatusFlags::empty());

    assert_eq!(cpu.status(), StatusFlags::UNUSED);
}

#[test]
fn test_nop_advances_pc() {
    let (mut cpu, mut memory) = setup(CpuVariant::Nmos6502, &[0xEA, 0xEA]);

    assert_eq!(cpu.step(&mut memory), 2);
    assert_eq!(cpu.pc(), 0x0301);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_pc_wraps_at_top_of_memory() {
    let mut memory = Memory::new();
    memory.read(0xC08B);
    memory.read(0xC08B); // language card RAM read/write
    memory.write(0xFFFF, 0xEA);
    let mut cpu = CPU::new(CpuVariant::Nmos6502);
    cpu.set_pc(0xFFFF);

    cpu.step(&mut memory);

    assert_eq!(cpu.pc(), 0x0000);
}

#[test]
fn test_save_and_load_state() {
    let (mut cpu, mut memory) = setup(CpuVariant::Nmos6502, &[0xA9, 0x80, 0x02]);
    run(&mut cpu, &mut memory, 2); // LDA #$80, HLT
    let state = cpu.save_state();

    let mut restored = CPU::new(CpuVariant::Cmos65C02);
    restored.load_state(&state);

    assert_eq!(restored.variant(), CpuVariant::Nmos6502);
    assert_eq!(restored.a(), 0x80);
    assert_eq!(restored.pc(), 0x0302);
    assert_eq!(restored.cycles(), cpu.cycles());
    assert!(restored.status().contains(StatusFlags::NEGATIVE));
    assert!(restored.is_jammed());
}
