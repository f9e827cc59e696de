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

//! 6502/65C02 disassembler for debugging
//!
//! Converts instruction bytes in the address space to assembler text and
//! exports annotated source listings. All reads go through
//! [`Memory::peek`], so disassembling never triggers soft switches.

use super::opcodes::{decode, AddressingMode, Instruction};
use super::CpuVariant;
use crate::core::memory::{DebugFlags, Memory};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Longest ASC run emitted on one listing line
const MAX_ASC_RUN: usize = 16;

/// Shortest printable run emitted as ASC instead of HEX
const MIN_ASC_RUN: usize = 5;

/// Instruction disassembler
///
/// # Example
/// ```
/// use a2rx::core::cpu::{CpuVariant, Disassembler};
/// use a2rx::core::memory::Memory;
///
/// let mut memory = Memory::new();
/// memory.write_main_ram(0x0300, &[0xA9, 0x01]); // LDA #$01
///
/// let (text, length) = Disassembler::disassemble(&memory, 0x0300, CpuVariant::Nmos6502);
/// assert_eq!(text, "LDA #$01");
/// assert_eq!(length, 2);
/// ```
pub struct Disassembler;

impl Disassembler {
    /// Disassemble the instruction at an address
    ///
    /// # Arguments
    ///
    /// * `memory` - Address space to read from (side-effect free)
    /// * `address` - Address of the opcode byte
    /// * `variant` - Opcode tables to decode with
    ///
    /// # Returns
    ///
    /// Assembler text and instruction length in bytes
    ///
    /// # Example
    /// ```
    /// use a2rx::core::cpu::{CpuVariant, Disassembler};
    /// use a2rx::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.write_main_ram(0x0300, &[0xD0, 0xFE]); // BNE to itself
    ///
    /// let (text, _) = Disassembler::disassemble(&memory, 0x0300, CpuVariant::Cmos65C02);
    /// assert_eq!(text, "BNE $0300");
    /// ```
    pub fn disassemble(memory: &Memory, address: u16, variant: CpuVariant) -> (String, u16) {
        let instruction = decode(variant, memory.peek(address));
        let text = Self::format(memory, address, instruction, false);
        (text, instruction.length())
    }

    /// Disassemble `count` consecutive instructions starting at an address
    ///
    /// Each line holds the address, raw bytes and assembler text.
    pub fn disassemble_range(
        memory: &Memory,
        start: u16,
        count: usize,
        variant: CpuVariant,
    ) -> Vec<String> {
        let mut address = start;
        let mut lines = Vec::with_capacity(count);
        for _ in 0..count {
            let (text, length) = Self::disassemble(memory, address, variant);
            let bytes = Self::raw_bytes(memory, address, length);
            lines.push(format!("{:04X}: {:<9} {}", address, bytes, text));
            address = address.wrapping_add(length);
        }
        lines
    }

    /// Raw instruction bytes as space-separated hex
    pub fn raw_bytes(memory: &Memory, address: u16, length: u16) -> String {
        (0..length)
            .map(|i| format!("{:02X}", memory.peek(address.wrapping_add(i))))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Format one instruction, either with `$` addresses or `L_xxxx` labels
    fn format(memory: &Memory, address: u16, instruction: Instruction, labels: bool) -> String {
        use AddressingMode::*;

        let low = memory.peek(address.wrapping_add(1));
        let high = memory.peek(address.wrapping_add(2));
        let word = u16::from_le_bytes([low, high]);
        let zero_page = if labels {
            format!("L_{:04X}", low)
        } else {
            format!("${:02X}", low)
        };
        let absolute = |value: u16| {
            if labels {
                format!("L_{:04X}", value)
            } else {
                format!("${:04X}", value)
            }
        };

        let operand = match instruction.mode {
            Implied => String::new(),
            Immediate => format!("#${:02X}", low),
            Relative => absolute(branch_target(address, low)),
            ZeroPage => zero_page,
            ZeroPageX => format!("{},X", zero_page),
            ZeroPageY => format!("{},Y", zero_page),
            ZeroPageIndirect => format!("({})", zero_page),
            ZeroPageIndexedIndirect => format!("({},X)", zero_page),
            ZeroPageIndirectIndexed => format!("({}),Y", zero_page),
            Absolute => absolute(word),
            AbsoluteX => format!("{},X", absolute(word)),
            AbsoluteY => format!("{},Y", absolute(word)),
            AbsoluteIndirect => format!("({})", absolute(word)),
            AbsoluteIndexedIndirect => format!("({},X)", absolute(word)),
            Hex1 => format!("{:02X}", low),
            Hex2 => format!("{:02X} {:02X}", low, high),
        };

        if operand.is_empty() {
            instruction.mnemonic.name().to_string()
        } else {
            format!("{} {}", instruction.mnemonic, operand)
        }
    }

    /// Export an assembler source listing of an address range
    ///
    /// Addresses fetched as opcodes (or holding a documented opcode other than
    /// BRK) are disassembled. Other bytes become `ASC` runs when at least five
    /// consecutive bytes are printable, `HEX` otherwise. Operands of fetched
    /// opcodes get `L_xxxx` labels; labels outside the range are declared with
    /// `EQU` after the `ORG` line.
    ///
    /// # Example
    /// ```
    /// use a2rx::core::cpu::{CpuVariant, Disassembler};
    /// use a2rx::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.write_main_ram(0x0300, &[0x20, 0xED, 0xFD, 0x60]); // JSR $FDED / RTS
    /// memory.set_instrumentation(true);
    /// memory.read_opcode(0x0300);
    /// memory.read_opcode(0x0303);
    ///
    /// let listing = Disassembler::export_listing(&memory, 0x0300, 0x0303, CpuVariant::Nmos6502);
    /// assert!(listing.starts_with(" ORG $0300\n"));
    /// assert!(listing.contains("L_FDED EQU $FDED"));
    /// assert!(listing.contains(" JSR L_FDED"));
    /// ```
    pub fn export_listing(memory: &Memory, start: u16, end: u16, variant: CpuVariant) -> String {
        let labels = Self::collect_labels(memory, start, end, variant);
        let in_range = |address: u16| address >= start && address <= end;

        let mut listing = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(listing, " ORG ${:04X}", start);
        for &label in labels.iter().filter(|&&label| !in_range(label)) {
            let _ = writeln!(listing, "L_{:04X} EQU ${:04X}", label, label);
        }

        let mut address = start as u32;
        let end = end as u32;
        while address <= end {
            let current = address as u16;
            if labels.contains(&current) {
                let _ = write!(listing, "L_{:04X}", current);
            }

            let opcode = memory.peek(current);
            let instruction = decode(variant, opcode);
            let is_code = is_opcode(memory, current) || (opcode != 0x00 && instruction.legal);

            if is_code {
                let text = Self::format(memory, current, instruction, true);
                let _ = write!(listing, " {}", text);
                address += instruction.length() as u32;
            } else {
                let run = Self::printable_run(memory, current, end);
                if run >= MIN_ASC_RUN {
                    let text: String = (0..run)
                        .map(|i| memory.peek(current.wrapping_add(i as u16)) as char)
                        .collect();
                    let _ = write!(listing, " ASC '{}'", text);
                    address += run as u32;
                } else {
                    let _ = write!(listing, " HEX {:02X}", opcode);
                    address += 1;
                }
            }
            listing.push('\n');
        }
        listing
    }

    /// Operand addresses of every opcode fetched inside the range
    fn collect_labels(memory: &Memory, start: u16, end: u16, variant: CpuVariant) -> BTreeSet<u16> {
        use AddressingMode::*;

        let mut labels = BTreeSet::new();
        let mut address = start as u32;
        while address <= end as u32 {
            let current = address as u16;
            if !is_opcode(memory, current) {
                address += 1;
                continue;
            }

            let instruction = decode(variant, memory.peek(current));
            let low = memory.peek(current.wrapping_add(1));
            let high = memory.peek(current.wrapping_add(2));
            match instruction.mode {
                Relative => {
                    labels.insert(branch_target(current, low));
                }
                ZeroPage | ZeroPageX | ZeroPageY | ZeroPageIndirect | ZeroPageIndexedIndirect
                | ZeroPageIndirectIndexed => {
                    labels.insert(low as u16);
                }
                Absolute | AbsoluteX | AbsoluteY | AbsoluteIndirect | AbsoluteIndexedIndirect => {
                    labels.insert(u16::from_le_bytes([low, high]));
                }
                _ => {}
            }
            address += instruction.length() as u32;
        }
        labels
    }

    /// Length of the printable run at an address, stopping at code
    fn printable_run(memory: &Memory, address: u16, end: u32) -> usize {
        let mut length = 0;
        loop {
            let offset = address as u32 + length as u32;
            if offset > end || length == MAX_ASC_RUN {
                break;
            }
            let current = offset as u16;
            if length > 0 && is_opcode(memory, current) {
                break;
            }
            if !(0x20..=0x5D).contains(&memory.peek(current)) {
                break;
            }
            length += 1;
        }
        length
    }
}

/// Target of a relative branch whose offset byte is `offset`
fn branch_target(address: u16, offset: u8) -> u16 {
    address.wrapping_add(2).wrapping_add(offset as i8 as u16)
}

fn is_opcode(memory: &Memory, address: u16) -> bool {
    memory.debug_info(address).flags.contains(DebugFlags::OPCODE)
}
