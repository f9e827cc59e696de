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

use super::super::addressing::Operand;
use super::super::{CpuVariant, StatusFlags, CPU};
use crate::core::memory::Memory;

impl CPU {
    // === Arithmetic Instructions ===

    /// ADC: Add with Carry
    ///
    /// Operation: A = A + M + C (BCD when D is set)
    pub(crate) fn op_adc(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.add_with_carry(value);
        self.decimal_penalty();
    }

    /// SBC: Subtract with Borrow
    ///
    /// Operation: A = A - M - !C (BCD when D is set)
    pub(crate) fn op_sbc(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.subtract_with_borrow(value);
        self.decimal_penalty();
    }

    /// The 65C02 spends one more cycle fixing up decimal results
    fn decimal_penalty(&mut self) {
        if self.variant == CpuVariant::Cmos65C02 && self.p.contains(StatusFlags::DECIMAL) {
            self.extra_cycles += 1;
        }
    }

    /// Shared ADC core (also used by RRA)
    pub(crate) fn add_with_carry(&mut self, value: u8) {
        if self.p.contains(StatusFlags::DECIMAL) {
            self.add_decimal(value);
        } else {
            self.add_with_carry_binary(value);
        }
    }

    /// Shared SBC core (also used by INS)
    pub(crate) fn subtract_with_borrow(&mut self, value: u8) {
        if self.p.contains(StatusFlags::DECIMAL) {
            self.subtract_decimal(value);
        } else {
            self.add_with_carry_binary(!value);
        }
    }

    fn add_with_carry_binary(&mut self, value: u8) {
        let a = self.a;
        let sum = a as u16 + value as u16 + self.carry_in();
        let result = sum as u8;

        self.p.set(StatusFlags::CARRY, sum > 0xFF);
        self.p
            .set(StatusFlags::OVERFLOW, (a ^ result) & (value ^ result) & 0x80 != 0);
        self.p.set_zn(result);
        self.a = result;
    }

    #[inline(always)]
    fn carry_in(&self) -> u16 {
        self.p.contains(StatusFlags::CARRY) as u16
    }

    /// Decimal-mode addition
    ///
    /// The NMOS part takes Z from the binary sum and N/V from the intermediate
    /// high nibble; the 65C02 derives N/Z from the corrected result.
    fn add_decimal(&mut self, value: u8) {
        let a = self.a as u16;
        let m = value as u16;
        let carry = self.carry_in();

        let mut low = (a & 0x0F) + (m & 0x0F) + carry;
        if low > 0x09 {
            low += 0x06;
        }
        let mut high = (a & 0xF0) + (m & 0xF0) + if low > 0x0F { 0x10 } else { 0 };

        let overflow = (a ^ high) & !(a ^ m) & 0x80 != 0;
        let negative = high & 0x80 != 0;
        if high > 0x90 {
            high += 0x60;
        }

        self.p.set(StatusFlags::OVERFLOW, overflow);
        self.p.set(StatusFlags::CARRY, high > 0xFF);
        self.a = ((high & 0xF0) | (low & 0x0F)) as u8;

        match self.variant {
            CpuVariant::Nmos6502 => {
                let binary = (a + m + carry) as u8;
                self.p.set(StatusFlags::ZERO, binary == 0);
                self.p.set(StatusFlags::NEGATIVE, negative);
            }
            CpuVariant::Cmos65C02 => self.p.set_zn(self.a),
        }
    }

    /// Decimal-mode subtraction
    ///
    /// C and V always follow the binary subtraction. The NMOS part also keeps the
    /// binary N/Z flags.
    fn subtract_decimal(&mut self, value: u8) {
        let a = self.a as i16;
        let m = value as i16;
        let borrow = 1 - self.carry_in() as i16;

        let binary = a - m - borrow;
        let binary_result = binary as u8;
        self.p.set(StatusFlags::CARRY, binary >= 0);
        self.p.set(
            StatusFlags::OVERFLOW,
            (self.a ^ value) & (self.a ^ binary_result) & 0x80 != 0,
        );

        let low = (a & 0x0F) - (m & 0x0F) - borrow;
        match self.variant {
            CpuVariant::Nmos6502 => {
                let mut low = low;
                let mut high = (a >> 4) - (m >> 4);
                if low < 0 {
                    low -= 0x06;
                    high -= 1;
                }
                if high < 0 {
                    high -= 0x06;
                }
                self.a = ((high << 4) | (low & 0x0F)) as u8;
                self.p.set_zn(binary_result);
            }
            CpuVariant::Cmos65C02 => {
                let mut result = binary;
                if result < 0 {
                    result -= 0x60;
                }
                if low < 0 {
                    result -= 0x06;
                }
                self.a = result as u8;
                self.p.set_zn(self.a);
            }
        }
    }

    // === Comparisons ===

    /// Set C/Z/N as for `register - value`
    pub(crate) fn compare(&mut self, register: u8, value: u8) {
        self.p.set(StatusFlags::CARRY, register >= value);
        self.p.set_zn(register.wrapping_sub(value));
    }

    /// CMP: Compare Accumulator
    pub(crate) fn op_cmp(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.compare(self.a, value);
    }

    /// CPX: Compare X
    pub(crate) fn op_cpx(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.compare(self.x, value);
    }

    /// CPY: Compare Y
    pub(crate) fn op_cpy(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.compare(self.y, value);
    }

    // === Increments and decrements ===

    /// INC: Increment memory (or A on the 65C02)
    pub(crate) fn op_inc(&mut self, operand: Operand, memory: &mut Memory) {
        self.modify(operand, memory, |cpu, value| {
            let result = value.wrapping_add(1);
            cpu.p.set_zn(result);
            result
        });
    }

    /// DEC: Decrement memory (or A on the 65C02)
    pub(crate) fn op_dec(&mut self, operand: Operand, memory: &mut Memory) {
        self.modify(operand, memory, |cpu, value| {
            let result = value.wrapping_sub(1);
            cpu.p.set_zn(result);
            result
        });
    }

    pub(crate) fn op_inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.p.set_zn(self.x);
    }

    pub(crate) fn op_iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.p.set_zn(self.y);
    }

    pub(crate) fn op_dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.p.set_zn(self.x);
    }

    pub(crate) fn op_dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.p.set_zn(self.y);
    }
}
