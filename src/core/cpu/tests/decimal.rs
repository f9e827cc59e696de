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

//! Decimal mode tests
//!
//! BCD results agree between the variants; the flags taken from the binary
//! intermediate on the NMOS part and the extra 65C02 cycle differ.

use super::*;

/// Run SED / LDA #a / (SEC|CLC) / op #m and return the CPU
fn decimal_op(variant: CpuVariant, opcode: u8, a: u8, m: u8, carry: bool) -> (CPU, u32) {
    let carry_op = if carry { 0x38 } else { 0x18 };
    let (mut cpu, mut memory) = setup(variant, &[0xF8, 0xA9, a, carry_op, opcode, m]);
    run(&mut cpu, &mut memory, 3);
    let cycles = cpu.step(&mut memory);
    (cpu, cycles)
}

#[test]
fn test_adc_decimal_digit_carry() {
    for variant in [CpuVariant::Nmos6502, CpuVariant::Cmos65C02] {
        let (cpu, _) = decimal_op(variant, 0x69, 0x09, 0x01, false);
        assert_eq!(cpu.a(), 0x10);
        assert!(!cpu.status().contains(StatusFlags::CARRY));

        let (cpu, _) = decimal_op(variant, 0x69, 0x58, 0x46, true);
        assert_eq!(cpu.a(), 0x05);
        assert!(cpu.status().contains(StatusFlags::CARRY));
    }
}

#[test]
fn test_adc_decimal_zero_flag_differs() {
    let (nmos, _) = decimal_op(CpuVariant::Nmos6502, 0x69, 0x99, 0x01, false);
    assert_eq!(nmos.a(), 0x00);
    assert!(nmos.status().contains(StatusFlags::CARRY));
    // Binary sum is $9A
    assert!(!nmos.status().contains(StatusFlags::ZERO));
    assert!(nmos.status().contains(StatusFlags::NEGATIVE));

    let (cmos, _) = decimal_op(CpuVariant::Cmos65C02, 0x69, 0x99, 0x01, false);
    assert_eq!(cmos.a(), 0x00);
    assert!(cmos.status().contains(StatusFlags::CARRY));
    assert!(cmos.status().contains(StatusFlags::ZERO));
    assert!(!cmos.status().contains(StatusFlags::NEGATIVE));
}

#[test]
fn test_sbc_decimal() {
    for variant in [CpuVariant::Nmos6502, CpuVariant::Cmos65C02] {
        let (cpu, _) = decimal_op(variant, 0xE9, 0x10, 0x01, true);
        assert_eq!(cpu.a(), 0x09);
        assert!(cpu.status().contains(StatusFlags::CARRY));

        let (cpu, _) = decimal_op(variant, 0xE9, 0x00, 0x01, true);
        assert_eq!(cpu.a(), 0x99);
        assert!(!cpu.status().contains(StatusFlags::CARRY));

        let (cpu, _) = decimal_op(variant, 0xE9, 0x46, 0x12, false);
        assert_eq!(cpu.a(), 0x33);
    }
}

#[test]
fn test_cmos_decimal_costs_extra_cycle() {
    let (_, nmos_cycles) = decimal_op(CpuVariant::Nmos6502, 0x69, 0x01, 0x01, false);
    let (_, cmos_cycles) = decimal_op(CpuVariant::Cmos65C02, 0x69, 0x01, 0x01, false);
    assert_eq!(nmos_cycles, 2);
    assert_eq!(cmos_cycles, 3);

    let (_, cmos_sbc) = decimal_op(CpuVariant::Cmos65C02, 0xE9, 0x05, 0x01, true);
    assert_eq!(cmos_sbc, 3);
}

#[test]
fn test_binary_mode_unaffected() {
    let (mut cpu, mut memory) = setup(CpuVariant::Cmos65C02, &[0xD8, 0x18, 0xA9, 0x09, 0x69, 0x01]);
    run(&mut cpu, &mut memory, 3);

    assert_eq!(cpu.step(&mut memory), 2);
    assert_eq!(cpu.a(), 0x0A);
}
