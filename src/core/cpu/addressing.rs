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

//! Effective address computation
//!
//! All arithmetic wraps: zero-page modes stay within page $00 and absolute modes
//! wrap modulo 65536.

use super::{AddressingMode, CpuVariant, CPU};
use crate::core::memory::Memory;

/// Resolved operand of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Operand {
    /// No memory operand (implied or accumulator)
    Implied,
    /// Effective address (immediate operands point at the operand byte)
    Address(u16),
}

impl CPU {
    /// Read the byte at PC and advance PC
    #[inline(always)]
    pub(super) fn fetch_byte(&mut self, memory: &mut Memory) -> u8 {
        let value = memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Read the little-endian word at PC and advance PC
    #[inline(always)]
    pub(super) fn fetch_word(&mut self, memory: &mut Memory) -> u16 {
        let low = self.fetch_byte(memory) as u16;
        let high = self.fetch_byte(memory) as u16;
        (high << 8) | low
    }

    /// Read a little-endian word
    pub(super) fn read_word(&self, memory: &mut Memory, address: u16) -> u16 {
        let low = memory.read(address) as u16;
        let high = memory.read(address.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    /// Read a pointer from the zero page (the high byte wraps within page $00)
    fn read_zero_page_word(&self, memory: &mut Memory, address: u8) -> u16 {
        let low = memory.read(address as u16) as u16;
        let high = memory.read(address.wrapping_add(1) as u16) as u16;
        (high << 8) | low
    }

    /// Add an index to a base address, recording a page crossing
    fn index_absolute(&mut self, base: u16, index: u8) -> u16 {
        let address = base.wrapping_add(index as u16);
        self.page_crossed = (base ^ address) & 0xFF00 != 0;
        address
    }

    /// Compute the effective address for an addressing mode
    ///
    /// Consumes the operand bytes and sets `page_crossed` for indexed modes and
    /// relative branches.
    pub(super) fn resolve_operand(&mut self, mode: AddressingMode, memory: &mut Memory) -> Operand {
        use AddressingMode::*;
        match mode {
            Implied => Operand::Implied,
            Immediate | Hex1 => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                Operand::Address(address)
            }
            Relative => {
                let offset = self.fetch_byte(memory) as i8;
                let target = self.pc.wrapping_add(offset as u16);
                self.page_crossed = (self.pc ^ target) & 0xFF00 != 0;
                Operand::Address(target)
            }
            ZeroPage => Operand::Address(self.fetch_byte(memory) as u16),
            ZeroPageX => {
                let base = self.fetch_byte(memory);
                Operand::Address(base.wrapping_add(self.x) as u16)
            }
            ZeroPageY => {
                let base = self.fetch_byte(memory);
                Operand::Address(base.wrapping_add(self.y) as u16)
            }
            ZeroPageIndirect => {
                let pointer = self.fetch_byte(memory);
                Operand::Address(self.read_zero_page_word(memory, pointer))
            }
            ZeroPageIndexedIndirect => {
                let pointer = self.fetch_byte(memory).wrapping_add(self.x);
                Operand::Address(self.read_zero_page_word(memory, pointer))
            }
            ZeroPageIndirectIndexed => {
                let pointer = self.fetch_byte(memory);
                let base = self.read_zero_page_word(memory, pointer);
                Operand::Address(self.index_absolute(base, self.y))
            }
            Absolute | Hex2 => Operand::Address(self.fetch_word(memory)),
            AbsoluteX => {
                let base = self.fetch_word(memory);
                Operand::Address(self.index_absolute(base, self.x))
            }
            AbsoluteY => {
                let base = self.fetch_word(memory);
                Operand::Address(self.index_absolute(base, self.y))
            }
            AbsoluteIndirect => {
                let pointer = self.fetch_word(memory);
                let target = match self.variant {
                    // The NMOS part never carries into the high byte of the pointer
                    CpuVariant::Nmos6502 => {
                        let low = memory.read(pointer) as u16;
                        let high_address = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
                        let high = memory.read(high_address) as u16;
                        (high << 8) | low
                    }
                    CpuVariant::Cmos65C02 => self.read_word(memory, pointer),
                };
                Operand::Address(target)
            }
            AbsoluteIndexedIndirect => {
                let pointer = self.fetch_word(memory).wrapping_add(self.x as u16);
                Operand::Address(self.read_word(memory, pointer))
            }
        }
    }
}
