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

use super::super::{StatusFlags, CPU};
use crate::core::memory::Memory;

/// Base address of the hardware stack page
const STACK_PAGE: u16 = 0x0100;

impl CPU {
    /// Push a byte onto the stack
    pub(crate) fn push(&mut self, memory: &mut Memory, value: u8) {
        memory.write(STACK_PAGE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pull a byte from the stack
    pub(crate) fn pull(&mut self, memory: &mut Memory) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        memory.read(STACK_PAGE | self.sp as u16)
    }

    /// Push a word, high byte first
    pub(crate) fn push_word(&mut self, memory: &mut Memory, value: u16) {
        self.push(memory, (value >> 8) as u8);
        self.push(memory, value as u8);
    }

    /// Pull a word, low byte first
    pub(crate) fn pull_word(&mut self, memory: &mut Memory) -> u16 {
        let low = self.pull(memory) as u16;
        let high = self.pull(memory) as u16;
        (high << 8) | low
    }

    // === Stack Instructions ===

    pub(crate) fn op_pha(&mut self, memory: &mut Memory) {
        self.push(memory, self.a);
    }

    /// PHP: Push Processor status (B and bit 5 set in the pushed copy)
    pub(crate) fn op_php(&mut self, memory: &mut Memory) {
        let status = self.p.to_pushed(true);
        self.push(memory, status);
    }

    pub(crate) fn op_phx(&mut self, memory: &mut Memory) {
        self.push(memory, self.x);
    }

    pub(crate) fn op_phy(&mut self, memory: &mut Memory) {
        self.push(memory, self.y);
    }

    pub(crate) fn op_pla(&mut self, memory: &mut Memory) {
        self.a = self.pull(memory);
        self.p.set_zn(self.a);
    }

    pub(crate) fn op_plp(&mut self, memory: &mut Memory) {
        let status = self.pull(memory);
        self.p = StatusFlags::from_pulled(status);
    }

    pub(crate) fn op_plx(&mut self, memory: &mut Memory) {
        self.x = self.pull(memory);
        self.p.set_zn(self.x);
    }

    pub(crate) fn op_ply(&mut self, memory: &mut Memory) {
        self.y = self.pull(memory);
        self.p.set_zn(self.y);
    }
}
