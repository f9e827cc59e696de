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
use super::super::{CpuVariant, Mnemonic, StatusFlags, CPU, IRQ_VECTOR};
use crate::core::memory::Memory;

impl CPU {
    // === Branch Instructions ===

    /// Bxx/BRA: Relative branch
    ///
    /// A taken branch costs one extra cycle, plus one more if the target is on a
    /// different page than the next instruction.
    pub(crate) fn op_branch(&mut self, mnemonic: Mnemonic, operand: Operand) {
        let p = self.p;
        let taken = match mnemonic {
            Mnemonic::Bcc => !p.contains(StatusFlags::CARRY),
            Mnemonic::Bcs => p.contains(StatusFlags::CARRY),
            Mnemonic::Bne => !p.contains(StatusFlags::ZERO),
            Mnemonic::Beq => p.contains(StatusFlags::ZERO),
            Mnemonic::Bpl => !p.contains(StatusFlags::NEGATIVE),
            Mnemonic::Bmi => p.contains(StatusFlags::NEGATIVE),
            Mnemonic::Bvc => !p.contains(StatusFlags::OVERFLOW),
            Mnemonic::Bvs => p.contains(StatusFlags::OVERFLOW),
            _ => true,
        };

        if let (true, Operand::Address(target)) = (taken, operand) {
            self.extra_cycles += 1;
            if self.page_crossed {
                self.extra_cycles += 1;
            }
            self.pc = target;
        }
    }

    // === Jump Instructions ===

    /// JMP: Jump (absolute, indirect, or 65C02 indexed indirect)
    pub(crate) fn op_jmp(&mut self, operand: Operand) {
        if let Operand::Address(target) = operand {
            self.pc = target;
        }
    }

    /// JSR: Jump to Subroutine
    ///
    /// Pushes the address of the last operand byte.
    pub(crate) fn op_jsr(&mut self, operand: Operand, memory: &mut Memory) {
        if let Operand::Address(target) = operand {
            let return_address = self.pc.wrapping_sub(1);
            self.push_word(memory, return_address);
            self.pc = target;
        }
    }

    /// RTS: Return from Subroutine
    pub(crate) fn op_rts(&mut self, memory: &mut Memory) {
        self.pc = self.pull_word(memory).wrapping_add(1);
    }

    /// RTI: Return from Interrupt
    pub(crate) fn op_rti(&mut self, memory: &mut Memory) {
        let status = self.pull(memory);
        self.p = StatusFlags::from_pulled(status);
        self.pc = self.pull_word(memory);
    }

    /// BRK: Software interrupt
    ///
    /// Skips the padding byte, pushes PC and P (with B set) and jumps through the
    /// IRQ vector. The 65C02 also clears decimal mode.
    pub(crate) fn op_brk(&mut self, memory: &mut Memory) {
        let return_address = self.pc.wrapping_add(1);
        self.push_word(memory, return_address);
        let status = self.p.to_pushed(true);
        self.push(memory, status);
        self.p.insert(StatusFlags::INTERRUPT_DISABLE);
        if self.variant == CpuVariant::Cmos65C02 {
            self.p.remove(StatusFlags::DECIMAL);
        }
        self.pc = self.read_word(memory, IRQ_VECTOR);
    }
}
