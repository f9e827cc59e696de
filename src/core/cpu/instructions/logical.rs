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
use super::super::{StatusFlags, CPU};
use crate::core::memory::Memory;

impl CPU {
    // === Logical Instructions ===

    /// AND: Logical AND with Accumulator
    pub(crate) fn op_and(&mut self, operand: Operand, memory: &mut Memory) {
        self.a &= self.load(operand, memory);
        self.p.set_zn(self.a);
    }

    /// ORA: Logical OR with Accumulator
    pub(crate) fn op_ora(&mut self, operand: Operand, memory: &mut Memory) {
        self.a |= self.load(operand, memory);
        self.p.set_zn(self.a);
    }

    /// EOR: Exclusive OR with Accumulator
    pub(crate) fn op_eor(&mut self, operand: Operand, memory: &mut Memory) {
        self.a ^= self.load(operand, memory);
        self.p.set_zn(self.a);
    }

    /// BIT: Test bits
    ///
    /// Z reflects `A & M`. N and V copy bits 7 and 6 of M, except for the
    /// 65C02 immediate form (opcode $89), which only touches Z.
    pub(crate) fn op_bit(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.p.set(StatusFlags::ZERO, self.a & value == 0);
        if self.current_opcode != 0x89 {
            self.p.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
            self.p.set(StatusFlags::OVERFLOW, value & 0x40 != 0);
        }
    }

    /// TRB: Test and Reset Bits (65C02)
    pub(crate) fn op_trb(&mut self, operand: Operand, memory: &mut Memory) {
        self.modify(operand, memory, |cpu, value| {
            cpu.p.set(StatusFlags::ZERO, cpu.a & value == 0);
            value & !cpu.a
        });
    }

    /// TSB: Test and Set Bits (65C02)
    pub(crate) fn op_tsb(&mut self, operand: Operand, memory: &mut Memory) {
        self.modify(operand, memory, |cpu, value| {
            cpu.p.set(StatusFlags::ZERO, cpu.a & value == 0);
            value | cpu.a
        });
    }
}
