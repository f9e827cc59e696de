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

//! Test ROM builders and small 6502 programs

use a2rx::core::memory::Memory;

/// Where [`HELLO_PROGRAM`] lives in ROM
#[allow(dead_code)]
pub const HELLO_ORIGIN: u16 = 0xD000;

/// Address of the final `JMP *` in [`HELLO_PROGRAM`]
#[allow(dead_code)]
pub const HELLO_DONE: u16 = 0xD00E;

/// Copies "HELLO" (high-bit ASCII) to the text page, then spins
#[allow(dead_code)]
pub const HELLO_PROGRAM: [u8; 24] = [
    0xA2, 0x00, //       LDX #$00
    0xBD, 0x12, 0xD0, // loop: LDA $D012,X
    0xF0, 0x07, //       BEQ done
    0x9D, 0x00, 0x04, // STA $0400,X
    0xE8, //             INX
    0x4C, 0x02, 0xD0, // JMP loop
    0x4C, 0x0E, 0xD0, // done: JMP done
    0xEA, //
    0xC8, 0xC5, 0xCC, 0xCC, 0xCF, 0x00, // "HELLO"
];

/// Where [`PROLOGUE_PROGRAM`] is loaded
#[allow(dead_code)]
pub const PROLOGUE_ORIGIN: u16 = 0x0300;

/// Address of the final `JMP *` in [`PROLOGUE_PROGRAM`]
#[allow(dead_code)]
pub const PROLOGUE_DONE: u16 = 0x0320;

/// Where [`PROLOGUE_PROGRAM`] stores the byte after `D5 AA`
#[allow(dead_code)]
pub const PROLOGUE_RESULT: u16 = 0x0280;

/// Spins the slot 6 drive, waits for a `D5 AA` prologue and stores the byte
/// that follows it
#[allow(dead_code)]
pub const PROLOGUE_PROGRAM: [u8; 35] = [
    0xAD, 0xE9, 0xC0, // LDA $C0E9        motor on
    0xAD, 0xEE, 0xC0, // LDA $C0EE        read mode
    0xAD, 0xEC, 0xC0, // sync: LDA $C0EC
    0x10, 0xFB, //       BPL sync
    0xC9, 0xD5, //       CMP #$D5
    0xD0, 0xF7, //       BNE sync
    0xAD, 0xEC, 0xC0, // second: LDA $C0EC
    0x10, 0xFB, //       BPL second
    0xC9, 0xAA, //       CMP #$AA
    0xD0, 0xEE, //       BNE sync
    0xAD, 0xEC, 0xC0, // third: LDA $C0EC
    0x10, 0xFB, //       BPL third
    0x8D, 0x80, 0x02, // STA $0280
    0x4C, 0x20, 0x03, // done: JMP done
];

/// 16K system ROM with `program` at `origin` and the reset vector pointing at it
#[allow(dead_code)]
pub fn rom_with_program(origin: u16, program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0xEA; Memory::ROM_SIZE];
    let offset = (origin - 0xC000) as usize;
    rom[offset..offset + program.len()].copy_from_slice(program);
    rom[0x3FFC..0x3FFE].copy_from_slice(&origin.to_le_bytes());
    rom
}

/// [`HELLO_PROGRAM`] as a bootable ROM
#[allow(dead_code)]
pub fn hello_rom() -> Vec<u8> {
    rom_with_program(HELLO_ORIGIN, &HELLO_PROGRAM)
}

/// System ROM path for real-ROM tests
#[allow(dead_code)]
pub fn get_system_rom_path() -> Option<String> {
    std::env::var("A2RX_ROM").ok().or_else(|| {
        let default_path = "apple2e.rom";
        if std::path::Path::new(default_path).exists() {
            Some(default_path.to_string())
        } else {
            None
        }
    })
}
