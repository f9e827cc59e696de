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
use super::super::{AddressingMode, StatusFlags, CPU};
use crate::core::memory::Memory;

impl CPU {
    // === Shift Instructions ===
    //
    // Implied operands shift the accumulator.

    /// ASL: Arithmetic Shift Left
    pub(crate) fn op_asl(&mut self, operand: Operand, memory: &mut Memory, mode: AddressingMode) {
        self.shift_page_penalty(mode);
        self.modify(operand, memory, Self::asl);
    }

    /// LSR: Logical Shift Right
    pub(crate) fn op_lsr(&mut self, operand: Operand, memory: &mut Memory, mode: AddressingMode) {
        self.shift_page_penalty(mode);
        self.modify(operand, memory, Self::lsr);
    }

    /// ROL: Rotate Left through carry
    pub(crate) fn op_rol(&mut self, operand: Operand, memory: &mut Memory, mode: AddressingMode) {
        self.shift_page_penalty(mode);
        self.modify(operand, memory, Self::rol);
    }

    /// ROR: Rotate Right through carry
    pub(crate) fn op_ror(&mut self, operand: Operand, memory: &mut Memory, mode: AddressingMode) {
        self.shift_page_penalty(mode);
        self.modify(operand, memory, Self::ror);
    }

    pub(crate) fn asl(&mut self, value: u8) -> u8 {
        let result = value << 1;
        self.p.set(StatusFlags::CARRY, value & 0x80 != 0);
        self.p.set_zn(result);
        result
    }

    pub(crate) fn lsr(&mut self, value: u8) -> u8 {
        let result = value >> 1;
        self.p.set(StatusFlags::CARRY, value & 0x01 != 0);
        self.p.set_zn(result);
        result
    }

    pub(crate) fn rol(&mut self, value: u8) -> u8 {
        let carry = self.p.contains(StatusFlags::CARRY) as u8;
        let result = (value << 1) | carry;
        self.p.set(StatusFlags::CARRY, value & 0x80 != 0);
        self.p.set_zn(result);
        result
    }

    pub(crate) fn ror(&mut self, value: u8) -> u8 {
        let carry = (self.p.contains(StatusFlags::CARRY) as u8) << 7;
        let result = (value >> 1) | carry;
        self.p.set(StatusFlags::CARRY, value & 0x01 != 0);
        self.p.set_zn(result);
        result
    }
}
