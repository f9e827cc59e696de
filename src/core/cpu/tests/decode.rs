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

//! Instruction decoding tests

use super::*;
use AddressingMode::*;

#[test]
fn test_cmos_table_has_no_illegal_mnemonics() {
    for opcode in 0..=0xFFu8 {
        let instruction = decode(CpuVariant::Cmos65C02, opcode);
        assert!(
            !instruction.mnemonic.is_illegal(),
            "65C02 opcode ${:02X} decodes to {}",
            opcode,
            instruction.mnemonic
        );
    }
}

#[test]
fn test_documented_opcode_counts() {
    let count = |variant| (0..=0xFFu8).filter(|&op| decode(variant, op).legal).count();

    assert_eq!(count(CpuVariant::Nmos6502), 151);
    assert_eq!(count(CpuVariant::Cmos65C02), 178);
}

#[test]
fn test_illegal_mnemonics_are_undocumented() {
    for opcode in 0..=0xFFu8 {
        let instruction = decode(CpuVariant::Nmos6502, opcode);
        if instruction.mnemonic.is_illegal() {
            assert!(!instruction.legal, "opcode ${:02X}", opcode);
        }
    }
}

#[test]
fn test_nmos_table_entries() {
    let cases = [
        (0x00, Mnemonic::Brk, Implied, 7),
        (0x02, Mnemonic::Hlt, Implied, 2),
        (0x6C, Mnemonic::Jmp, AbsoluteIndirect, 5),
        (0x8B, Mnemonic::Xaa, Hex1, 2),
        (0x9D, Mnemonic::Sta, AbsoluteX, 5),
        (0xA9, Mnemonic::Lda, Immediate, 2),
        (0xB3, Mnemonic::Lax, Hex1, 5),
        (0xB6, Mnemonic::Ldx, ZeroPageY, 4),
        (0xD0, Mnemonic::Bne, Relative, 2),
        (0xEB, Mnemonic::Sbc, Hex1, 2),
        (0xFF, Mnemonic::Ins, Hex2, 7),
    ];

    for (opcode, mnemonic, mode, cycles) in cases {
        let instruction = decode(CpuVariant::Nmos6502, opcode);
        assert_eq!(instruction.mnemonic, mnemonic, "opcode ${:02X}", opcode);
        assert_eq!(instruction.mode, mode, "opcode ${:02X}", opcode);
        assert_eq!(instruction.cycles, cycles, "opcode ${:02X}", opcode);
    }
}

#[test]
fn test_cmos_table_entries() {
    let cases = [
        (0x03, Mnemonic::Nop, Implied, 1),
        (0x12, Mnemonic::Ora, ZeroPageIndirect, 5),
        (0x1A, Mnemonic::Inc, Implied, 2),
        (0x5C, Mnemonic::Nop, Hex2, 8),
        (0x7C, Mnemonic::Jmp, AbsoluteIndexedIndirect, 6),
        (0x80, Mnemonic::Bra, Relative, 2),
        (0x89, Mnemonic::Bit, Immediate, 2),
        (0x9C, Mnemonic::Stz, Absolute, 4),
        (0xDA, Mnemonic::Phx, Implied, 3),
        (0xFA, Mnemonic::Plx, Implied, 4),
    ];

    for (opcode, mnemonic, mode, cycles) in cases {
        let instruction = decode(CpuVariant::Cmos65C02, opcode);
        assert_eq!(instruction.mnemonic, mnemonic, "opcode ${:02X}", opcode);
        assert_eq!(instruction.mode, mode, "opcode ${:02X}", opcode);
        assert_eq!(instruction.cycles, cycles, "opcode ${:02X}", opcode);
    }
}

#[test]
fn test_instruction_lengths() {
    assert_eq!(decode(CpuVariant::Nmos6502, 0xEA).length(), 1);
    assert_eq!(decode(CpuVariant::Nmos6502, 0xA9).length(), 2);
    assert_eq!(decode(CpuVariant::Nmos6502, 0x04).length(), 2);
    assert_eq!(decode(CpuVariant::Nmos6502, 0x0C).length(), 3);
    assert_eq!(decode(CpuVariant::Cmos65C02, 0x5C).length(), 3);
    assert_eq!(decode(CpuVariant::Cmos65C02, 0x0B).length(), 1);
}

#[test]
fn test_nmos_raw_operand_modes() {
    let cases = [
        (0x04, ZeroPage),
        (0x07, ZeroPage),
        (0x0B, Immediate),
        (0x0C, Absolute),
        (0x13, ZeroPageIndirectIndexed),
        (0x14, ZeroPageX),
        (0x17, ZeroPageX),
        (0x1B, AbsoluteY),
        (0x1C, AbsoluteX),
        (0x80, Immediate),
        (0x83, ZeroPageIndexedIndirect),
        (0x97, ZeroPageY),
        (0x9F, AbsoluteY),
        (0xB7, ZeroPageY),
        (0xDF, AbsoluteX),
    ];

    for (opcode, expected) in cases {
        let instruction = decode(CpuVariant::Nmos6502, opcode);
        assert_eq!(
            operand_mode(CpuVariant::Nmos6502, opcode, instruction.mode),
            expected,
            "opcode ${:02X}",
            opcode
        );
    }
}

#[test]
fn test_cmos_raw_operand_modes() {
    let mode = |opcode| operand_mode(CpuVariant::Cmos65C02, opcode, decode(CpuVariant::Cmos65C02, opcode).mode);

    assert_eq!(mode(0x02), Immediate);
    assert_eq!(mode(0x44), ZeroPage);
    assert_eq!(mode(0x54), ZeroPageX);
    assert_eq!(mode(0x5C), Absolute);
    assert_eq!(mode(0xDC), Absolute);
}

#[test]
fn test_documented_modes_pass_through() {
    assert_eq!(operand_mode(CpuVariant::Nmos6502, 0xBD, AbsoluteX), AbsoluteX);
    assert_eq!(operand_mode(CpuVariant::Cmos65C02, 0xB2, ZeroPageIndirect), ZeroPageIndirect);
}
