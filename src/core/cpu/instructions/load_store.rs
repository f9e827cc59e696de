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
use super::super::CPU;
use crate::core::memory::Memory;

impl CPU {
    // === Loads ===

    /// LDA: Load Accumulator
    pub(crate) fn op_lda(&mut self, operand: Operand, memory: &mut Memory) {
        self.a = self.load(operand, memory);
        self.p.set_zn(self.a);
    }

    /// LDX: Load X
    pub(crate) fn op_ldx(&mut self, operand: Operand, memory: &mut Memory) {
        self.x = self.load(operand, memory);
        self.p.set_zn(self.x);
    }

    /// LDY: Load Y
    pub(crate) fn op_ldy(&mut self, operand: Operand, memory: &mut Memory) {
        self.y = self.load(operand, memory);
        self.p.set_zn(self.y);
    }

    // === Stores ===

    /// STA: Store Accumulator
    pub(crate) fn op_sta(&mut self, operand: Operand, memory: &mut Memory) {
        self.store(operand, memory, self.a);
    }

    /// STX: Store X
    pub(crate) fn op_stx(&mut self, operand: Operand, memory: &mut Memory) {
        self.store(operand, memory, self.x);
    }

    /// STY: Store Y
    pub(crate) fn op_sty(&mut self, operand: Operand, memory: &mut Memory) {
        self.store(operand, memory, self.y);
    }

    /// STZ: Store Zero (65C02)
    pub(crate) fn op_stz(&mut self, operand: Operand, memory: &mut Memory) {
        self.store(operand, memory, 0);
    }

    // === Register transfers ===

    pub(crate) fn op_tax(&mut self) {
        self.x = self.a;
        self.p.set_zn(self.x);
    }

    pub(crate) fn op_tay(&mut self) {
        self.y = self.a;
        self.p.set_zn(self.y);
    }

    pub(crate) fn op_txa(&mut self) {
        self.a = self.x;
        self.p.set_zn(self.a);
    }

    pub(crate) fn op_tya(&mut self) {
        self.a = self.y;
        self.p.set_zn(self.a);
    }

    pub(crate) fn op_tsx(&mut self) {
        self.x = self.sp;
        self.p.set_zn(self.x);
    }

    /// TXS: Transfer X to Stack pointer (flags unaffected)
    pub(crate) fn op_txs(&mut self) {
        self.sp = self.x;
    }
}
