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

//! CPU instruction implementations
//!
//! This module contains all 6502/65C02 instruction implementations, organized by
//! instruction type. Dispatch goes through the decoded mnemonic; the addressing
//! mode has already been resolved to an [`Operand`] by then.

use super::addressing::Operand;
use super::opcodes::{operand_mode, AddressingMode, Instruction, Mnemonic};
use super::{CpuVariant, CPU};
use crate::core::memory::Memory;

// Instruction modules organized by type
mod arithmetic;
mod branch;
mod flags;
mod illegal;
mod load_store;
mod logical;
mod shift;
mod stack;

impl CPU {
    /// Execute a decoded instruction
    ///
    /// Resolves the operand, applies the page-cross penalty for indexed reads and
    /// dispatches to the handler for the mnemonic.
    ///
    /// # Arguments
    ///
    /// * `instruction` - Decoded opcode
    /// * `memory` - Address space for operand traffic
    pub(super) fn execute_instruction(&mut self, instruction: Instruction, memory: &mut Memory) {
        let mode = operand_mode(self.variant, instruction.opcode, instruction.mode);
        let operand = self.resolve_operand(mode, memory);

        if self.page_crossed && instruction.mnemonic.has_page_cross_penalty() {
            self.extra_cycles += 1;
        }

        use Mnemonic::*;
        match instruction.mnemonic {
            // Load/store and transfers
            Lda => self.op_lda(operand, memory),
            Ldx => self.op_ldx(operand, memory),
            Ldy => self.op_ldy(operand, memory),
            Sta => self.op_sta(operand, memory),
            Stx => self.op_stx(operand, memory),
            Sty => self.op_sty(operand, memory),
            Stz => self.op_stz(operand, memory),
            Tax => self.op_tax(),
            Tay => self.op_tay(),
            Txa => self.op_txa(),
            Tya => self.op_tya(),
            Tsx => self.op_tsx(),
            Txs => self.op_txs(),

            // Arithmetic
            Adc => self.op_adc(operand, memory),
            Sbc => self.op_sbc(operand, memory),
            Cmp => self.op_cmp(operand, memory),
            Cpx => self.op_cpx(operand, memory),
            Cpy => self.op_cpy(operand, memory),
            Inc => self.op_inc(operand, memory),
            Dec => self.op_dec(operand, memory),
            Inx => self.op_inx(),
            Iny => self.op_iny(),
            Dex => self.op_dex(),
            Dey => self.op_dey(),

            // Logical
            And => self.op_and(operand, memory),
            Ora => self.op_ora(operand, memory),
            Eor => self.op_eor(operand, memory),
            Bit => self.op_bit(operand, memory),
            Trb => self.op_trb(operand, memory),
            Tsb => self.op_tsb(operand, memory),

            // Shifts
            Asl => self.op_asl(operand, memory, mode),
            Lsr => self.op_lsr(operand, memory, mode),
            Rol => self.op_rol(operand, memory, mode),
            Ror => self.op_ror(operand, memory, mode),

            // Branches, jumps and interrupts
            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bra | Bvc | Bvs => {
                self.op_branch(instruction.mnemonic, operand)
            }
            Jmp => self.op_jmp(operand),
            Jsr => self.op_jsr(operand, memory),
            Rts => self.op_rts(memory),
            Rti => self.op_rti(memory),
            Brk => self.op_brk(memory),

            // Stack
            Pha => self.op_pha(memory),
            Php => self.op_php(memory),
            Phx => self.op_phx(memory),
            Phy => self.op_phy(memory),
            Pla => self.op_pla(memory),
            Plp => self.op_plp(memory),
            Plx => self.op_plx(memory),
            Ply => self.op_ply(memory),

            // Flags
            Clc => self.op_clc(),
            Cld => self.op_cld(),
            Cli => self.op_cli(),
            Clv => self.op_clv(),
            Sec => self.op_sec(),
            Sed => self.op_sed(),
            Sei => self.op_sei(),

            Nop => self.op_nop(operand, memory),

            // Undocumented NMOS instructions
            Aso => self.op_aso(operand, memory),
            Rla => self.op_rla(operand, memory),
            Lse => self.op_lse(operand, memory),
            Rra => self.op_rra(operand, memory),
            Axs => self.op_axs(operand, memory),
            Lax => self.op_lax(operand, memory),
            Dcm => self.op_dcm(operand, memory),
            Ins => self.op_ins(operand, memory),
            Anc => self.op_anc(operand, memory),
            Alr => self.op_alr(operand, memory),
            Arr => self.op_arr(operand, memory),
            Xaa => self.op_xaa(operand, memory),
            Oal => self.op_oal(operand, memory),
            Sax => self.op_sax(operand, memory),
            Axa => self.op_axa(operand, memory),
            Tas => self.op_tas(operand, memory),
            Say => self.op_say(operand, memory),
            Xas => self.op_xas(operand, memory),
            Las => self.op_las(operand, memory),
            Hlt => self.op_hlt(),
        }
    }

    /// Read the operand value (the accumulator for implied operands)
    #[inline(always)]
    pub(super) fn load(&mut self, operand: Operand, memory: &mut Memory) -> u8 {
        match operand {
            Operand::Implied => self.a,
            Operand::Address(address) => memory.read(address),
        }
    }

    /// Write a value to the operand address
    #[inline(always)]
    pub(super) fn store(&mut self, operand: Operand, memory: &mut Memory, value: u8) {
        match operand {
            Operand::Implied => self.a = value,
            Operand::Address(address) => memory.write(address, value),
        }
    }

    /// Read-modify-write cycle
    ///
    /// The NMOS part writes the unmodified value back before the result, which is
    /// visible to soft switches. Returns the result written.
    pub(super) fn modify(
        &mut self,
        operand: Operand,
        memory: &mut Memory,
        f: impl FnOnce(&mut Self, u8) -> u8,
    ) -> u8 {
        match operand {
            Operand::Implied => {
                let value = self.a;
                let result = f(self, value);
                self.a = result;
                result
            }
            Operand::Address(address) => {
                let value = memory.read(address);
                if self.variant == CpuVariant::Nmos6502 {
                    memory.write(address, value);
                }
                let result = f(self, value);
                memory.write(address, result);
                result
            }
        }
    }

    /// Extra cycle for 65C02 shifts on abs,X that cross a page
    #[inline(always)]
    pub(super) fn shift_page_penalty(&mut self, mode: AddressingMode) {
        if self.variant == CpuVariant::Cmos65C02
            && mode == AddressingMode::AbsoluteX
            && self.page_crossed
        {
            self.extra_cycles += 1;
        }
    }
}
