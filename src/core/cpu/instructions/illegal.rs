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

//! Undocumented NMOS 6502 instructions
//!
//! These only decode on the NMOS tables. The unstable "magic constant" opcodes
//! (XAA, OAL) use $EE, and the high-byte stores (AXA, TAS, SAY, XAS) corrupt
//! their target address on a page crossing the way the silicon does.

use super::super::addressing::Operand;
use super::super::{StatusFlags, CPU};
use crate::core::memory::Memory;

/// Constant ORed into A by the unstable XAA/OAL opcodes
const MAGIC: u8 = 0xEE;

impl CPU {
    // === Read-modify-write combinations ===

    /// ASO (SLO): ASL memory, then ORA
    pub(crate) fn op_aso(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.modify(operand, memory, Self::asl);
        self.a |= value;
        self.p.set_zn(self.a);
    }

    /// RLA: ROL memory, then AND
    pub(crate) fn op_rla(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.modify(operand, memory, Self::rol);
        self.a &= value;
        self.p.set_zn(self.a);
    }

    /// LSE (SRE): LSR memory, then EOR
    pub(crate) fn op_lse(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.modify(operand, memory, Self::lsr);
        self.a ^= value;
        self.p.set_zn(self.a);
    }

    /// RRA: ROR memory, then ADC
    pub(crate) fn op_rra(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.modify(operand, memory, Self::ror);
        self.add_with_carry(value);
    }

    /// DCM (DCP): DEC memory, then CMP
    pub(crate) fn op_dcm(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.modify(operand, memory, |_, value| value.wrapping_sub(1));
        self.compare(self.a, value);
    }

    /// INS (ISC): INC memory, then SBC
    pub(crate) fn op_ins(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.modify(operand, memory, |_, value| value.wrapping_add(1));
        self.subtract_with_borrow(value);
    }

    // === Loads and stores ===

    /// AXS: store A & X
    pub(crate) fn op_axs(&mut self, operand: Operand, memory: &mut Memory) {
        self.store(operand, memory, self.a & self.x);
    }

    /// LAX: load A and X
    pub(crate) fn op_lax(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.a = value;
        self.x = value;
        self.p.set_zn(value);
    }

    /// LAS: A = X = S = M & S
    pub(crate) fn op_las(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory) & self.sp;
        self.a = value;
        self.x = value;
        self.sp = value;
        self.p.set_zn(value);
    }

    /// AXA (SHA): store A & X & (H+1)
    pub(crate) fn op_axa(&mut self, operand: Operand, memory: &mut Memory) {
        self.store_high_and(operand, memory, self.a & self.x);
    }

    /// TAS (SHS): S = A & X, then store S & (H+1)
    pub(crate) fn op_tas(&mut self, operand: Operand, memory: &mut Memory) {
        self.sp = self.a & self.x;
        self.store_high_and(operand, memory, self.sp);
    }

    /// SAY (SHY): store Y & (H+1)
    pub(crate) fn op_say(&mut self, operand: Operand, memory: &mut Memory) {
        self.store_high_and(operand, memory, self.y);
    }

    /// XAS (SHX): store X & (H+1)
    pub(crate) fn op_xas(&mut self, operand: Operand, memory: &mut Memory) {
        self.store_high_and(operand, memory, self.x);
    }

    /// Store `value & (H+1)`, where H is the high byte of the unindexed base
    ///
    /// When indexing crossed a page the stored value also replaces the high byte
    /// of the target address.
    fn store_high_and(&mut self, operand: Operand, memory: &mut Memory, value: u8) {
        if let Operand::Address(address) = operand {
            let high = (address >> 8) as u8;
            let base_high_plus_one = if self.page_crossed {
                high
            } else {
                high.wrapping_add(1)
            };
            let result = value & base_high_plus_one;
            let target = if self.page_crossed {
                ((result as u16) << 8) | (address & 0x00FF)
            } else {
                address
            };
            memory.write(target, result);
        }
    }

    // === Immediate combinations ===

    /// ANC: AND #imm, then copy N into C
    pub(crate) fn op_anc(&mut self, operand: Operand, memory: &mut Memory) {
        self.a &= self.load(operand, memory);
        self.p.set_zn(self.a);
        self.p
            .set(StatusFlags::CARRY, self.p.contains(StatusFlags::NEGATIVE));
    }

    /// ALR (ASR): AND #imm, then LSR A
    pub(crate) fn op_alr(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.a & self.load(operand, memory);
        self.a = self.lsr(value);
    }

    /// ARR: AND #imm, then ROR A with the adder's C/V behavior
    pub(crate) fn op_arr(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.a & self.load(operand, memory);
        let carry = self.p.contains(StatusFlags::CARRY);
        let mut result = (value >> 1) | ((carry as u8) << 7);

        if !self.p.contains(StatusFlags::DECIMAL) {
            self.p.set_zn(result);
            self.p.set(StatusFlags::CARRY, result & 0x40 != 0);
            self.p
                .set(StatusFlags::OVERFLOW, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);
            self.a = result;
            return;
        }

        self.p.set(StatusFlags::NEGATIVE, carry);
        self.p.set(StatusFlags::ZERO, result == 0);
        self.p
            .set(StatusFlags::OVERFLOW, (value ^ result) & 0x40 != 0);

        if (value & 0x0F) + (value & 0x01) > 0x05 {
            result = (result & 0xF0) | (result.wrapping_add(0x06) & 0x0F);
        }
        let high_fix = (value & 0xF0) as u16 + (value & 0x10) as u16 > 0x50;
        if high_fix {
            result = result.wrapping_add(0x60);
        }
        self.p.set(StatusFlags::CARRY, high_fix);
        self.a = result;
    }

    /// XAA (ANE): A = (A | $EE) & X & imm
    pub(crate) fn op_xaa(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.a = (self.a | MAGIC) & self.x & value;
        self.p.set_zn(self.a);
    }

    /// OAL (LXA): A = X = (A | $EE) & imm
    pub(crate) fn op_oal(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        self.a = (self.a | MAGIC) & value;
        self.x = self.a;
        self.p.set_zn(self.a);
    }

    /// SAX (SBX): X = (A & X) - imm, carry as for CMP
    pub(crate) fn op_sax(&mut self, operand: Operand, memory: &mut Memory) {
        let value = self.load(operand, memory);
        let base = self.a & self.x;
        self.compare(base, value);
        self.x = base.wrapping_sub(value);
    }

    /// HLT (KIL): jam the CPU
    ///
    /// PC is left on the HLT opcode; only a reset clears the jam.
    pub(crate) fn op_hlt(&mut self) {
        self.pc = self.pc.wrapping_sub(1);
        self.jammed = true;
        log::warn!("CPU jammed by HLT ${:02X} at ${:04X}", self.current_opcode, self.pc);
    }
}
