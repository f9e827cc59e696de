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
    // === Flag Instructions ===

    pub(crate) fn op_clc(&mut self) {
        self.p.remove(StatusFlags::CARRY);
    }

    pub(crate) fn op_cld(&mut self) {
        self.p.remove(StatusFlags::DECIMAL);
    }

    pub(crate) fn op_cli(&mut self) {
        self.p.remove(StatusFlags::INTERRUPT_DISABLE);
    }

    pub(crate) fn op_clv(&mut self) {
        self.p.remove(StatusFlags::OVERFLOW);
    }

    pub(crate) fn op_sec(&mut self) {
        self.p.insert(StatusFlags::CARRY);
    }

    pub(crate) fn op_sed(&mut self) {
        self.p.insert(StatusFlags::DECIMAL);
    }

    pub(crate) fn op_sei(&mut self) {
        self.p.insert(StatusFlags::INTERRUPT_DISABLE);
    }

    /// NOP: No Operation
    ///
    /// Multi-byte forms still perform their operand read, which matters when the
    /// operand is a soft switch.
    pub(crate) fn op_nop(&mut self, operand: Operand, memory: &mut Memory) {
        if let Operand::Address(address) = operand {
            memory.read(address);
        }
    }
}
