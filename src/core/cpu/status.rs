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

//! Processor status register

use bitflags::bitflags;

bitflags! {
    /// Processor status flags (P register)
    ///
    /// Bit 5 is unused and always reads as 1. The break flag only exists in the
    /// copy of P pushed by BRK/PHP; it is never stored in the live register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0x01;
        const ZERO = 0x02;
        const INTERRUPT_DISABLE = 0x04;
        const DECIMAL = 0x08;
        const BREAK = 0x10;
        const UNUSED = 0x20;
        const OVERFLOW = 0x40;
        const NEGATIVE = 0x80;
    }
}

impl StatusFlags {
    /// Update Z and N from a result byte
    #[inline(always)]
    pub fn set_zn(&mut self, value: u8) {
        self.set(StatusFlags::ZERO, value == 0);
        self.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    /// Value pushed on the stack by PHP/BRK (B set) or by IRQ/NMI (B clear)
    pub fn to_pushed(self, brk: bool) -> u8 {
        let mut value = self | StatusFlags::UNUSED;
        value.set(StatusFlags::BREAK, brk);
        value.bits()
    }

    /// Status restored by PLP/RTI
    pub fn from_pulled(value: u8) -> Self {
        (StatusFlags::from_bits_retain(value) - StatusFlags::BREAK) | StatusFlags::UNUSED
    }

    /// Compact `NV-BDIZC` rendering used by register dumps and traces
    pub fn to_flag_string(self) -> String {
        const NAMES: [(StatusFlags, char); 8] = [
            (StatusFlags::NEGATIVE, 'N'),
            (StatusFlags::OVERFLOW, 'V'),
            (StatusFlags::UNUSED, '-'),
            (StatusFlags::BREAK, 'B'),
            (StatusFlags::DECIMAL, 'D'),
            (StatusFlags::INTERRUPT_DISABLE, 'I'),
            (StatusFlags::ZERO, 'Z'),
            (StatusFlags::CARRY, 'C'),
        ];
        NAMES
            .iter()
            .map(|&(flag, name)| if self.contains(flag) { name } else { '.' })
            .collect()
    }
}
