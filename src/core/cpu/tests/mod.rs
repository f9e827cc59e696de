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

//! CPU test modules
//!
//! Tests are organized into the following categories:
//! - `basic`: CPU initialization, reset, register access, save states
//! - `decode`: Opcode table decoding for both variants
//! - `instructions`: Documented instruction execution
//! - `interrupts`: BRK, IRQ, NMI and RTI
//! - `decimal`: BCD arithmetic on both variants
//! - `illegal`: Undocumented NMOS instructions and HLT
//! - `cmos`: 65C02 additions and undefined-opcode NOPs
//! - `timing`: Cycle counts and penalties

use super::*;
use crate::core::memory::Memory;

/// Where test programs are loaded
const PROGRAM_START: u16 = 0x0300;

/// Create a CPU with `program` at $0300 and PC pointing at it
fn setup(variant: CpuVariant, program: &[u8]) -> (CPU, Memory) {
    let mut memory = Memory::new();
    memory.write_main_ram(PROGRAM_START, program);
    let mut cpu = CPU::new(variant);
    cpu.set_pc(PROGRAM_START);
    (cpu, memory)
}

/// Memory whose ROM holds the given NMI, reset and IRQ vectors
fn memory_with_vectors(nmi: u16, reset: u16, irq: u16) -> Memory {
    let mut rom = vec![0u8; Memory::ROM_SIZE];
    let vectors = [nmi.to_le_bytes(), reset.to_le_bytes(), irq.to_le_bytes()].concat();
    rom[0x3FFA..].copy_from_slice(&vectors);

    let mut memory = Memory::new();
    memory.load_rom_bytes(&rom).unwrap();
    memory
}

/// Execute `count` instructions, returning the total cycles
fn run(cpu: &mut CPU, memory: &mut Memory, count: usize) -> u32 {
    (0..count).map(|_| cpu.step(memory)).sum()
}

mod basic;
mod decimal;
mod decode;
mod interrupts;
