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

//! Opcode decode tables
//!
//! Each CPU variant decodes an opcode byte through two parallel 256-entry tables:
//! one for the mnemonic and one for the addressing mode. A third table gives the
//! base cycle count, and a legality table marks the opcodes that belong to the
//! documented instruction set of that variant.
//!
//! The NMOS tables include the undocumented instructions of the original 6502
//! (ASO, RLA, LSE, ...). Undocumented slots whose operand layout the tables do not
//! name use the raw-operand modes [`AddressingMode::Hex1`] and
//! [`AddressingMode::Hex2`]; [`operand_mode`] maps those to the addressing mode the
//! silicon actually uses.

use super::CpuVariant;

/// Instruction mnemonics for both CPU variants
///
/// The NMOS-only undocumented instructions use their traditional names:
/// ASO (ASL+ORA), RLA (ROL+AND), LSE (LSR+EOR), RRA (ROR+ADC), AXS (store A&X),
/// LAX (LDA+LDX), DCM (DEC+CMP), INS (INC+SBC), ALR, ARR, ANC, XAA, OAL, SAX
/// (X=(A&X)-imm), AXA, TAS, SAY, XAS, LAS and HLT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    Anc,
    And,
    Alr,
    Arr,
    Asl,
    Aso,
    Axa,
    Axs,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dcm,
    Dec,
    Dex,
    Dey,
    Eor,
    Hlt,
    Inc,
    Ins,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Las,
    Lax,
    Lda,
    Ldx,
    Ldy,
    Lse,
    Lsr,
    Nop,
    Oal,
    Ora,
    Pha,
    Php,
    Phx,
    Phy,
    Pla,
    Plp,
    Plx,
    Ply,
    Rla,
    Rol,
    Ror,
    Rra,
    Rti,
    Rts,
    Sax,
    Say,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Stz,
    Tas,
    Tax,
    Tay,
    Trb,
    Tsb,
    Tsx,
    Txa,
    Txs,
    Tya,
    Xaa,
    Xas,
}

impl Mnemonic {
    /// Assembler name of the mnemonic
    pub fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC",
            Anc => "ANC",
            And => "AND",
            Alr => "ALR",
            Arr => "ARR",
            Asl => "ASL",
            Aso => "ASO",
            Axa => "AXA",
            Axs => "AXS",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Bra => "BRA",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dcm => "DCM",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Hlt => "HLT",
            Inc => "INC",
            Ins => "INS",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Las => "LAS",
            Lax => "LAX",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lse => "LSE",
            Lsr => "LSR",
            Nop => "NOP",
            Oal => "OAL",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Phx => "PHX",
            Phy => "PHY",
            Pla => "PLA",
            Plp => "PLP",
            Plx => "PLX",
            Ply => "PLY",
            Rla => "RLA",
            Rol => "ROL",
            Ror => "ROR",
            Rra => "RRA",
            Rti => "RTI",
            Rts => "RTS",
            Sax => "SAX",
            Say => "SAY",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Stz => "STZ",
            Tas => "TAS",
            Tax => "TAX",
            Tay => "TAY",
            Trb => "TRB",
            Tsb => "TSB",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Xaa => "XAA",
            Xas => "XAS",
        }
    }

    /// Whether this is one of the undocumented NMOS instructions
    pub fn is_illegal(self) -> bool {
        use Mnemonic::*;
        matches!(
            self,
            Anc | Alr
                | Arr
                | Aso
                | Axa
                | Axs
                | Dcm
                | Hlt
                | Ins
                | Las
                | Lax
                | Lse
                | Oal
                | Rla
                | Rra
                | Sax
                | Say
                | Tas
                | Xaa
                | Xas
        )
    }

    /// Whether a page-crossing indexed operand costs an extra cycle
    pub(super) fn has_page_cross_penalty(self) -> bool {
        use Mnemonic::*;
        matches!(
            self,
            Adc | And | Bit | Cmp | Eor | Las | Lax | Lda | Ldx | Ldy | Nop | Ora | Sbc
        )
    }

    /// Whether the instruction is a conditional or unconditional relative branch
    pub fn is_branch(self) -> bool {
        use Mnemonic::*;
        matches!(self, Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bra | Bvc | Bvs)
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand addressing modes (16 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand (or accumulator)
    Implied,
    /// `#$nn`
    Immediate,
    /// Signed 8-bit branch offset
    Relative,
    /// `$nn`
    ZeroPage,
    /// `$nn,X`
    ZeroPageX,
    /// `$nn,Y`
    ZeroPageY,
    /// `($nn)` (65C02)
    ZeroPageIndirect,
    /// `($nn,X)`
    ZeroPageIndexedIndirect,
    /// `($nn),Y`
    ZeroPageIndirectIndexed,
    /// `$nnnn`
    Absolute,
    /// `$nnnn,X`
    AbsoluteX,
    /// `$nnnn,Y`
    AbsoluteY,
    /// `($nnnn)`
    AbsoluteIndirect,
    /// `($nnnn,X)` (65C02)
    AbsoluteIndexedIndirect,
    /// One raw operand byte
    Hex1,
    /// Two raw operand bytes
    Hex2,
}

impl AddressingMode {
    /// Instruction length in bytes, opcode included
    pub fn length(self) -> u16 {
        use AddressingMode::*;
        match self {
            Implied => 1,
            Absolute | AbsoluteX | AbsoluteY | AbsoluteIndirect | AbsoluteIndexedIndirect
            | Hex2 => 3,
            _ => 2,
        }
    }
}

/// A fully decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Base cycle count before page-cross and branch penalties
    pub cycles: u8,
    /// Whether the opcode is part of the documented instruction set
    pub legal: bool,
}

impl Instruction {
    /// Instruction length in bytes
    pub fn length(&self) -> u16 {
        self.mode.length()
    }
}

/// Decode an opcode byte for the given CPU variant
///
/// # Example
///
/// ```
/// use a2rx::core::cpu::{decode, AddressingMode, CpuVariant, Mnemonic};
///
/// let instruction = decode(CpuVariant::Nmos6502, 0xA9);
/// assert_eq!(instruction.mnemonic, Mnemonic::Lda);
/// assert_eq!(instruction.mode, AddressingMode::Immediate);
/// assert_eq!(instruction.cycles, 2);
/// ```
pub fn decode(variant: CpuVariant, opcode: u8) -> Instruction {
    let index = opcode as usize;
    match variant {
        CpuVariant::Nmos6502 => Instruction {
            opcode,
            mnemonic: tables::MNEMONIC_NMOS[index],
            mode: tables::MODE_NMOS[index],
            cycles: tables::CYCLES_NMOS[index],
            legal: tables::LEGAL_NMOS[index] != 0,
        },
        CpuVariant::Cmos65C02 => Instruction {
            opcode,
            mnemonic: tables::MNEMONIC_CMOS[index],
            mode: tables::MODE_CMOS[index],
            cycles: tables::CYCLES_CMOS[index],
            legal: tables::LEGAL_CMOS[index] != 0,
        },
    }
}

/// Addressing mode used for execution
///
/// Identical to the table mode except for the raw-operand slots, which are mapped
/// to the operand layout the hardware decodes for them.
pub fn operand_mode(variant: CpuVariant, opcode: u8, mode: AddressingMode) -> AddressingMode {
    use AddressingMode::*;
    if !matches!(mode, Hex1 | Hex2) {
        return mode;
    }

    match variant {
        CpuVariant::Nmos6502 => {
            let store_or_load_row = opcode & 0xC0 == 0x80;
            match opcode & 0x1F {
                0x00 | 0x02 | 0x09 | 0x0B => Immediate,
                0x03 => ZeroPageIndexedIndirect,
                0x04 | 0x07 => ZeroPage,
                0x0C | 0x0F => Absolute,
                0x13 => ZeroPageIndirectIndexed,
                0x14 => ZeroPageX,
                0x17 if store_or_load_row => ZeroPageY,
                0x17 => ZeroPageX,
                0x1B | 0x1E => AbsoluteY,
                0x1C => AbsoluteX,
                0x1F if store_or_load_row => AbsoluteY,
                0x1F => AbsoluteX,
                _ => Implied,
            }
        }
        CpuVariant::Cmos65C02 => match opcode {
            0x44 => ZeroPage,
            0x54 | 0xD4 | 0xF4 => ZeroPageX,
            0x5C | 0xDC | 0xFC => Absolute,
            _ => Immediate,
        },
    }
}

#[rustfmt::skip]
mod tables {
    use super::AddressingMode;
    use super::Mnemonic::{self, *};

    const IMP: AddressingMode = AddressingMode::Implied;
    const IMM: AddressingMode = AddressingMode::Immediate;
    const REL: AddressingMode = AddressingMode::Relative;
    const ZPG: AddressingMode = AddressingMode::ZeroPage;
    const ZPX: AddressingMode = AddressingMode::ZeroPageX;
    const ZPY: AddressingMode = AddressingMode::ZeroPageY;
    const ZPI: AddressingMode = AddressingMode::ZeroPageIndirect;
    const ZIX: AddressingMode = AddressingMode::ZeroPageIndexedIndirect;
    const ZIY: AddressingMode = AddressingMode::ZeroPageIndirectIndexed;
    const ABS: AddressingMode = AddressingMode::Absolute;
    const ABX: AddressingMode = AddressingMode::AbsoluteX;
    const ABY: AddressingMode = AddressingMode::AbsoluteY;
    const ABI: AddressingMode = AddressingMode::AbsoluteIndirect;
    const AIX: AddressingMode = AddressingMode::AbsoluteIndexedIndirect;
    const H_1: AddressingMode = AddressingMode::Hex1;
    const H_2: AddressingMode = AddressingMode::Hex2;

    pub(super) static LEGAL_NMOS: [u8; 256] = [
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 1, 0, 0, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0,
        0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 0, 1, 0, 0,
        1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0,
    ];

    pub(super) static LEGAL_CMOS: [u8; 256] = [
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 0, 1, 1, 0, 1, 1, 1, 0, 0, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 0, 1, 1, 0, 1, 1, 1, 0, 0, 1, 1, 0,
        1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0,
        1, 1, 1, 0, 0, 1, 1, 0, 1, 1, 1, 0, 0, 1, 1, 0,
    ];

    pub(super) static MNEMONIC_NMOS: [Mnemonic; 256] = [
        Brk, Ora, Hlt, Aso, Nop, Ora, Asl, Aso, Php, Ora, Asl, Anc, Nop, Ora, Asl, Aso,
        Bpl, Ora, Hlt, Aso, Nop, Ora, Asl, Aso, Clc, Ora, Nop, Aso, Nop, Ora, Asl, Aso,
        Jsr, And, Hlt, Rla, Bit, And, Rol, Rla, Plp, And, Rol, Anc, Bit, And, Rol, Rla,
        Bmi, And, Hlt, Rla, Nop, And, Rol, Rla, Sec, And, Nop, Rla, Nop, And, Rol, Rla,
        Rti, Eor, Hlt, Lse, Nop, Eor, Lsr, Lse, Pha, Eor, Lsr, Alr, Jmp, Eor, Lsr, Lse,
        Bvc, Eor, Hlt, Lse, Nop, Eor, Lsr, Lse, Cli, Eor, Nop, Lse, Nop, Eor, Lsr, Lse,
        Rts, Adc, Hlt, Rra, Nop, Adc, Ror, Rra, Pla, Adc, Ror, Arr, Jmp, Adc, Ror, Rra,
        Bvs, Adc, Hlt, Rra, Nop, Adc, Ror, Rra, Sei, Adc, Nop, Rra, Nop, Adc, Ror, Rra,
        Nop, Sta, Nop, Axs, Sty, Sta, Stx, Axs, Dey, Nop, Txa, Xaa, Sty, Sta, Stx, Axs,
        Bcc, Sta, Hlt, Axa, Sty, Sta, Stx, Axs, Tya, Sta, Txs, Tas, Say, Sta, Xas, Axa,
        Ldy, Lda, Ldx, Lax, Ldy, Lda, Ldx, Lax, Tay, Lda, Tax, Oal, Ldy, Lda, Ldx, Lax,
        Bcs, Lda, Hlt, Lax, Ldy, Lda, Ldx, Lax, Clv, Lda, Tsx, Las, Ldy, Lda, Ldx, Lax,
        Cpy, Cmp, Nop, Dcm, Cpy, Cmp, Dec, Dcm, Iny, Cmp, Dex, Sax, Cpy, Cmp, Dec, Dcm,
        Bne, Cmp, Hlt, Dcm, Nop, Cmp, Dec, Dcm, Cld, Cmp, Nop, Dcm, Nop, Cmp, Dec, Dcm,
        Cpx, Sbc, Nop, Ins, Cpx, Sbc, Inc, Ins, Inx, Sbc, Nop, Sbc, Cpx, Sbc, Inc, Ins,
        Beq, Sbc, Hlt, Ins, Nop, Sbc, Inc, Ins, Sed, Sbc, Nop, Ins, Nop, Sbc, Inc, Ins,
    ];

    pub(super) static MNEMONIC_CMOS: [Mnemonic; 256] = [
        Brk, Ora, Nop, Nop, Tsb, Ora, Asl, Nop, Php, Ora, Asl, Nop, Tsb, Ora, Asl, Nop,
        Bpl, Ora, Ora, Nop, Trb, Ora, Asl, Nop, Clc, Ora, Inc, Nop, Trb, Ora, Asl, Nop,
        Jsr, And, Nop, Nop, Bit, And, Rol, Nop, Plp, And, Rol, Nop, Bit, And, Rol, Nop,
        Bmi, And, And, Nop, Bit, And, Rol, Nop, Sec, And, Dec, Nop, Bit, And, Rol, Nop,
        Rti, Eor, Nop, Nop, Nop, Eor, Lsr, Nop, Pha, Eor, Lsr, Nop, Jmp, Eor, Lsr, Nop,
        Bvc, Eor, Eor, Nop, Nop, Eor, Lsr, Nop, Cli, Eor, Phy, Nop, Nop, Eor, Lsr, Nop,
        Rts, Adc, Nop, Nop, Stz, Adc, Ror, Nop, Pla, Adc, Ror, Nop, Jmp, Adc, Ror, Nop,
        Bvs, Adc, Adc, Nop, Stz, Adc, Ror, Nop, Sei, Adc, Ply, Nop, Jmp, Adc, Ror, Nop,
        Bra, Sta, Nop, Nop, Sty, Sta, Stx, Nop, Dey, Bit, Txa, Nop, Sty, Sta, Stx, Nop,
        Bcc, Sta, Sta, Nop, Sty, Sta, Stx, Nop, Tya, Sta, Txs, Nop, Stz, Sta, Stz, Nop,
        Ldy, Lda, Ldx, Nop, Ldy, Lda, Ldx, Nop, Tay, Lda, Tax, Nop, Ldy, Lda, Ldx, Nop,
        Bcs, Lda, Lda, Nop, Ldy, Lda, Ldx, Nop, Clv, Lda, Tsx, Nop, Ldy, Lda, Ldx, Nop,
        Cpy, Cmp, Nop, Nop, Cpy, Cmp, Dec, Nop, Iny, Cmp, Dex, Nop, Cpy, Cmp, Dec, Nop,
        Bne, Cmp, Cmp, Nop, Nop, Cmp, Dec, Nop, Cld, Cmp, Phx, Nop, Nop, Cmp, Dec, Nop,
        Cpx, Sbc, Nop, Nop, Cpx, Sbc, Inc, Nop, Inx, Sbc, Nop, Nop, Cpx, Sbc, Inc, Nop,
        Beq, Sbc, Sbc, Nop, Nop, Sbc, Inc, Nop, Sed, Sbc, Plx, Nop, Nop, Sbc, Inc, Nop,
    ];

    pub(super) static MODE_NMOS: [AddressingMode; 256] = [
        IMP, ZIX, IMP, H_1, H_1, ZPG, ZPG, H_1, IMP, IMM, IMP, H_1, H_2, ABS, ABS, H_2,
        REL, ZIY, IMP, H_1, H_1, ZPX, ZPX, H_1, IMP, ABY, IMP, H_2, H_2, ABX, ABX, H_2,
        ABS, ZIX, IMP, H_1, ZPG, ZPG, ZPG, H_1, IMP, IMM, IMP, H_1, ABS, ABS, ABS, H_2,
        REL, ZIY, IMP, H_1, H_1, ZPX, ZPX, H_1, IMP, ABY, IMP, H_2, H_2, ABX, ABX, H_2,
        IMP, ZIX, IMP, H_1, H_1, ZPG, ZPG, H_1, IMP, IMM, IMP, H_1, ABS, ABS, ABS, H_2,
        REL, ZIY, IMP, H_1, H_1, ZPX, ZPX, H_1, IMP, ABY, IMP, H_2, H_2, ABX, ABX, H_2,
        IMP, ZIX, IMP, H_1, H_1, ZPG, ZPG, H_1, IMP, IMM, IMP, H_1, ABI, ABS, ABS, H_2,
        REL, ZIY, IMP, H_1, H_1, ZPX, ZPX, H_1, IMP, ABY, IMP, H_2, H_2, ABX, ABX, H_2,
        H_1, ZIX, H_1, H_1, ZPG, ZPG, ZPG, H_1, IMP, H_1, IMP, H_1, ABS, ABS, ABS, H_2,
        REL, ZIY, IMP, H_1, ZPX, ZPX, ZPY, H_1, IMP, ABY, IMP, H_2, H_2, ABX, H_2, H_2,
        IMM, ZIX, IMM, H_1, ZPG, ZPG, ZPG, H_1, IMP, IMM, IMP, H_1, ABS, ABS, ABS, H_2,
        REL, ZIY, IMP, H_1, ZPX, ZPX, ZPY, H_1, IMP, ABY, IMP, H_2, ABX, ABX, ABY, H_2,
        IMM, ZIX, H_1, H_1, ZPG, ZPG, ZPG, H_1, IMP, IMM, IMP, H_1, ABS, ABS, ABS, H_2,
        REL, ZIY, IMP, H_1, H_1, ZPX, ZPX, H_1, IMP, ABY, IMP, H_2, H_2, ABX, ABX, H_2,
        IMM, ZIX, H_1, H_1, ZPG, ZPG, ZPG, H_1, IMP, IMM, IMP, H_1, ABS, ABS, ABS, H_2,
        REL, ZIY, IMP, H_1, H_1, ZPX, ZPX, H_1, IMP, ABY, IMP, H_2, H_2, ABX, ABX, H_2,
    ];

    pub(super) static MODE_CMOS: [AddressingMode; 256] = [
        IMP, ZIX, H_1, IMP, ZPG, ZPG, ZPG, IMP, IMP, IMM, IMP, IMP, ABS, ABS, ABS, IMP,
        REL, ZIY, ZPI, IMP, ZPG, ZPX, ZPX, IMP, IMP, ABY, IMP, IMP, ABS, ABX, ABX, IMP,
        ABS, ZIX, H_1, IMP, ZPG, ZPG, ZPG, IMP, IMP, IMM, IMP, IMP, ABS, ABS, ABS, IMP,
        REL, ZIY, ZPI, IMP, ZPX, ZPX, ZPX, IMP, IMP, ABY, IMP, IMP, ABX, ABX, ABX, IMP,
        IMP, ZIX, H_1, IMP, H_1, ZPG, ZPG, IMP, IMP, IMM, IMP, IMP, ABS, ABS, ABS, IMP,
        REL, ZIY, ZPI, IMP, H_1, ZPX, ZPX, IMP, IMP, ABY, IMP, IMP, H_2, ABX, ABX, IMP,
        IMP, ZIX, H_1, IMP, ZPG, ZPG, ZPG, IMP, IMP, IMM, IMP, IMP, ABI, ABS, ABS, IMP,
        REL, ZIY, ZPI, IMP, ZPX, ZPX, ZPX, IMP, IMP, ABY, IMP, IMP, AIX, ABX, ABX, IMP,
        REL, ZIX, H_1, IMP, ZPG, ZPG, ZPG, IMP, IMP, IMM, IMP, IMP, ABS, ABS, ABS, IMP,
        REL, ZIY, ZPI, IMP, ZPX, ZPX, ZPY, IMP, IMP, ABY, IMP, IMP, ABS, ABX, ABX, IMP,
        IMM, ZIX, IMM, IMP, ZPG, ZPG, ZPG, IMP, IMP, IMM, IMP, IMP, ABS, ABS, ABS, IMP,
        REL, ZIY, ZPI, IMP, ZPX, ZPX, ZPY, IMP, IMP, ABY, IMP, IMP, ABX, ABX, ABY, IMP,
        IMM, ZIX, H_1, IMP, ZPG, ZPG, ZPG, IMP, IMP, IMM, IMP, IMP, ABS, ABS, ABS, IMP,
        REL, ZIY, ZPI, IMP, H_1, ZPX, ZPX, IMP, IMP, ABY, IMP, IMP, H_2, ABX, ABX, IMP,
        IMM, ZIX, H_1, IMP, ZPG, ZPG, ZPG, IMP, IMP, IMM, IMP, IMP, ABS, ABS, ABS, IMP,
        REL, ZIY, ZPI, IMP, H_1, ZPX, ZPX, IMP, IMP, ABY, IMP, IMP, H_2, ABX, ABX, IMP,
    ];

    pub(super) static CYCLES_NMOS: [u8; 256] = [
        7, 6, 2, 8, 3, 3, 5, 5, 3, 2, 2, 2, 4, 4, 6, 6,
        2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
        6, 6, 2, 8, 3, 3, 5, 5, 4, 2, 2, 2, 4, 4, 6, 6,
        2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
        6, 6, 2, 8, 3, 3, 5, 5, 3, 2, 2, 2, 3, 4, 6, 6,
        2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
        6, 6, 2, 8, 3, 3, 5, 5, 4, 2, 2, 2, 5, 4, 6, 6,
        2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
        2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4,
        2, 6, 2, 6, 4, 4, 4, 4, 2, 5, 2, 5, 5, 5, 5, 5,
        2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4,
        2, 5, 2, 5, 4, 4, 4, 4, 2, 4, 2, 4, 4, 4, 4, 4,
        2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6,
        2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
        2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6,
        2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7,
    ];

    pub(super) static CYCLES_CMOS: [u8; 256] = [
        7, 6, 2, 1, 5, 3, 5, 1, 3, 2, 2, 1, 6, 4, 6, 1,
        2, 5, 5, 1, 5, 4, 6, 1, 2, 4, 2, 1, 6, 4, 6, 1,
        6, 6, 2, 1, 3, 3, 5, 1, 4, 2, 2, 1, 4, 4, 6, 1,
        2, 5, 5, 1, 4, 4, 6, 1, 2, 4, 2, 1, 4, 4, 6, 1,
        6, 6, 2, 1, 3, 3, 5, 1, 3, 2, 2, 1, 3, 4, 6, 1,
        2, 5, 5, 1, 4, 4, 6, 1, 2, 4, 3, 1, 8, 4, 6, 1,
        6, 6, 2, 1, 3, 3, 5, 1, 4, 2, 2, 1, 6, 4, 6, 1,
        2, 5, 5, 1, 4, 4, 6, 1, 2, 4, 4, 1, 6, 4, 6, 1,
        2, 6, 2, 1, 3, 3, 3, 1, 2, 2, 2, 1, 4, 4, 4, 1,
        2, 6, 5, 1, 4, 4, 4, 1, 2, 5, 2, 1, 4, 5, 5, 1,
        2, 6, 2, 1, 3, 3, 3, 1, 2, 2, 2, 1, 4, 4, 4, 1,
        2, 5, 5, 1, 4, 4, 4, 1, 2, 4, 2, 1, 4, 4, 4, 1,
        2, 6, 2, 1, 3, 3, 5, 1, 2, 2, 2, 1, 4, 4, 6, 1,
        2, 5, 5, 1, 4, 4, 6, 1, 2, 4, 3, 1, 4, 4, 7, 1,
        2, 6, 2, 1, 3, 3, 5, 1, 2, 2, 2, 1, 4, 4, 6, 1,
        2, 5, 5, 1, 4, 4, 6, 1, 2, 4, 4, 1, 4, 4, 7, 1,
    ];
}
