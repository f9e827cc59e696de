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

//! Interrupt tests
//!
//! Tests for BRK, RTI, the level-triggered IRQ line and the NMI latch.

use super::*;

const NMI_HANDLER: u16 = 0x0500;
const IRQ_HANDLER: u16 = 0x0400;

fn interrupt_env(variant: CpuVariant, program: &[u8]) -> (CPU, Memory) {
    let mut memory = memory_with_vectors(NMI_HANDLER, PROGRAM_START, IRQ_HANDLER);
    memory.write_main_ram(PROGRAM_START, program);
    memory.write_main_ram(IRQ_HANDLER, &[0x40]); // RTI
    memory.write_main_ram(NMI_HANDLER, &[0x40]); // RTI
    let mut cpu = CPU::new(variant);
    cpu.set_pc(PROGRAM_START);
    (cpu, memory)
}

#[test]
fn test_brk_pushes_state_and_vectors() {
    let (mut cpu, mut memory) = interrupt_env(CpuVariant::Nmos6502, &[0x00, 0xFF, 0xEA]);
    cpu.set_status(StatusFlags::CARRY);

    assert_eq!(cpu.step(&mut memory), 7);

    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert_eq!(cpu.sp(), 0xFA);
    assert_eq!(memory.read(0x01FD), 0x03);
    assert_eq!(memory.read(0x01FC), 0x02);
    assert_eq!(memory.read(0x01FB), 0x31);
    assert!(cpu.status().contains(StatusFlags::INTERRUPT_DISABLE));
}

#[test]
fn test_rti_returns_past_padding_byte() {
    let (mut cpu, mut memory) = interrupt_env(CpuVariant::Nmos6502, &[0x00, 0xFF, 0xEA]);
    cpu.set_status(StatusFlags::CARRY);

    run(&mut cpu, &mut memory, 2);

    assert_eq!(cpu.pc(), 0x0302);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.status(), StatusFlags::CARRY | StatusFlags::UNUSED);
}

#[test]
fn test_brk_decimal_flag_per_variant() {
    let (mut cpu, mut memory) = interrupt_env(CpuVariant::Nmos6502, &[0x00, 0x00]);
    cpu.set_status(StatusFlags::DECIMAL);
    cpu.step(&mut memory);
    assert!(cpu.status().contains(StatusFlags::DECIMAL));

    let (mut cpu, mut memory) = interrupt_env(CpuVariant::Cmos65C02, &[0x00, 0x00]);
    cpu.set_status(StatusFlags::DECIMAL);
    cpu.step(&mut memory);
    assert!(!cpu.status().contains(StatusFlags::DECIMAL));
}

#[test]
fn test_irq_masked_by_interrupt_disable() {
    let (mut cpu, mut memory) = interrupt_env(CpuVariant::Nmos6502, &[0xEA, 0xEA]);
    cpu.set_status(StatusFlags::INTERRUPT_DISABLE);
    cpu.set_irq(true);

    cpu.step(&mut memory);

    assert_eq!(cpu.pc(), 0x0301);
}

#[test]
fn test_irq_serviced_when_enabled() {
    let (mut cpu, mut memory) = interrupt_env(CpuVariant::Nmos6502, &[0xEA, 0xEA]);
    cpu.set_status(StatusFlags::empty());
    cpu.set_irq(true);

    assert_eq!(cpu.step(&mut memory), 7);

    assert_eq!(cpu.pc(), IRQ_HANDLER);
    // B is clear in the copy pushed by a hardware interrupt
    assert_eq!(memory.read(0x01FB) & 0x10, 0x00);
    assert!(cpu.status().contains(StatusFlags::INTERRUPT_DISABLE));

    // Line still asserted, but I is now set: the handler runs
    cpu.step(&mut memory);
    assert_eq!(cpu.pc(), 0x0300);
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let (mut cpu, mut memory) = interrupt_env(CpuVariant::Cmos65C02, &[0xEA, 0xEA]);
    cpu.set_status(StatusFlags::INTERRUPT_DISABLE);
    cpu.request_nmi();

    assert_eq!(cpu.step(&mut memory), 7);
    assert_eq!(cpu.pc(), NMI_HANDLER);

    // Edge triggered: serviced once
    cpu.step(&mut memory);
    assert_eq!(cpu.pc(), 0x0300);
    cpu.step(&mut memory);
    assert_eq!(cpu.pc(), 0x0301);
}
