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

use crate::core::memory::Memory;
use crate::core::save_state::CpuState;

/// CPU (MOS 6502 / WDC 65C02) emulation implementation
///
/// # Specifications
/// - Architecture: 8-bit, 16-bit address bus
/// - Clock frequency: 1.0205 MHz (NTSC Apple IIe)
/// - Registers: A, X, Y, S, P and a 16-bit program counter
///
/// The variant flag selects between the NMOS decode tables (with the
/// undocumented instructions) and the CMOS 65C02 tables.
///
/// # Example
/// ```
/// use a2rx::core::cpu::{CpuVariant, CPU};
///
/// let cpu = CPU::new(CpuVariant::Cmos65C02);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU {
    /// Accumulator
    a: u8,

    /// X index register
    x: u8,

    /// Y index register
    y: u8,

    /// Stack pointer (offset into page $01)
    sp: u8,

    /// Program counter
    pc: u16,

    /// Processor status
    p: StatusFlags,

    /// Total cycles executed (wraps at 2^64)
    cycles: u64,

    /// Decode table selection
    variant: CpuVariant,

    /// IRQ line level (serviced while I is clear)
    irq_line: bool,

    /// Latched NMI edge
    nmi_pending: bool,

    /// Set by HLT; only reset recovers
    jammed: bool,

    /// Opcode being executed (for handlers and debugging)
    current_opcode: u8,

    /// Whether the current indexed operand crossed a page boundary
    page_crossed: bool,

    /// Penalty cycles accumulated by the current instruction
    extra_cycles: u32,
}

/// CPU model selecting the opcode tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuVariant {
    /// Original NMOS 6502 (Apple II, II+, unenhanced IIe)
    Nmos6502,
    /// CMOS 65C02 (enhanced IIe, IIc)
    #[default]
    Cmos65C02,
}

impl CpuVariant {
    /// Display name of the variant
    pub fn name(self) -> &'static str {
        match self {
            CpuVariant::Nmos6502 => "6502",
            CpuVariant::Cmos65C02 => "65C02",
        }
    }
}

// Module declarations
mod addressing;
mod disassembler;
mod instructions;
mod opcodes;
mod status;
#[cfg(test)]
mod tests;
mod tracer;

// Re-exports
pub use disassembler::Disassembler;
pub use opcodes::{decode, operand_mode, AddressingMode, Instruction, Mnemonic};
pub use status::StatusFlags;
pub use tracer::CpuTracer;

/// NMI vector address
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector address
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector address
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles taken to enter an interrupt or reset sequence
const INTERRUPT_CYCLES: u32 = 7;

impl CPU {
    /// Create a new CPU instance
    ///
    /// Registers start cleared with SP=$FD and I set, as after a reset. The program
    /// counter is 0 until [`reset`](Self::reset) loads the reset vector.
    ///
    /// # Arguments
    ///
    /// * `variant` - Which opcode tables to decode with
    pub fn new(variant: CpuVariant) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            p: StatusFlags::UNUSED | StatusFlags::INTERRUPT_DISABLE,
            cycles: 0,
            variant,
            irq_line: false,
            nmi_pending: false,
            jammed: false,
            current_opcode: 0,
            page_crossed: false,
            extra_cycles: 0,
        }
    }

    /// Reset the CPU
    ///
    /// Loads PC from the reset vector, sets SP to $FD and masks interrupts. The
    /// 65C02 also clears decimal mode. A/X/Y and the cycle counter are preserved,
    /// matching the hardware reset sequence.
    ///
    /// # Arguments
    ///
    /// * `memory` - Address space to read the reset vector from
    pub fn reset(&mut self, memory: &mut Memory) {
        self.sp = 0xFD;
        self.p.insert(StatusFlags::INTERRUPT_DISABLE | StatusFlags::UNUSED);
        if self.variant == CpuVariant::Cmos65C02 {
            self.p.remove(StatusFlags::DECIMAL);
        }
        self.irq_line = false;
        self.nmi_pending = false;
        self.jammed = false;
        self.pc = self.read_word(memory, RESET_VECTOR);
        self.cycles = self.cycles.wrapping_add(INTERRUPT_CYCLES as u64);

        log::info!(
            "CPU reset ({}): PC=${:04X}",
            self.variant.name(),
            self.pc
        );
    }

    /// Execute a single instruction
    ///
    /// Services a pending NMI or unmasked IRQ first; otherwise fetches, decodes and
    /// executes the instruction at PC.
    ///
    /// # Arguments
    ///
    /// * `memory` - Address space for all memory traffic
    ///
    /// # Returns
    ///
    /// Cycles consumed: the opcode's base count plus page-cross, branch and
    /// decimal-mode penalties
    ///
    /// # Example
    ///
    /// ```
    /// use a2rx::core::cpu::{CpuVariant, CPU};
    /// use a2rx::core::memory::Memory;
    ///
    /// let mut cpu = CPU::new(CpuVariant::Nmos6502);
    /// let mut memory = Memory::new();
    /// memory.write(0x0300, 0xEA); // NOP
    /// cpu.set_pc(0x0300);
    ///
    /// assert_eq!(cpu.step(&mut memory), 2);
    /// assert_eq!(cpu.pc(), 0x0301);
    /// ```
    pub fn step(&mut self, memory: &mut Memory) -> u32 {
        memory.set_cycle(self.cycles);

        if self.jammed {
            self.cycles = self.cycles.wrapping_add(1);
            return 1;
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            return self.interrupt(memory, NMI_VECTOR);
        }
        if self.irq_line && !self.p.contains(StatusFlags::INTERRUPT_DISABLE) {
            return self.interrupt(memory, IRQ_VECTOR);
        }

        let opcode = memory.read_opcode(self.pc);
        self.pc = self.pc.wrapping_add(1);
        self.current_opcode = opcode;

        let instruction = decode(self.variant, opcode);
        self.page_crossed = false;
        self.extra_cycles = 0;
        self.execute_instruction(instruction, memory);

        let cycles = instruction.cycles as u32 + self.extra_cycles;
        self.cycles = self.cycles.wrapping_add(cycles as u64);
        cycles
    }

    /// Push PC and P and jump through an interrupt vector
    fn interrupt(&mut self, memory: &mut Memory, vector: u16) -> u32 {
        self.push_word(memory, self.pc);
        let status = self.p.to_pushed(false);
        self.push(memory, status);
        self.p.insert(StatusFlags::INTERRUPT_DISABLE);
        if self.variant == CpuVariant::Cmos65C02 {
            self.p.remove(StatusFlags::DECIMAL);
        }
        self.pc = self.read_word(memory, vector);
        self.cycles = self.cycles.wrapping_add(INTERRUPT_CYCLES as u64);

        log::trace!("Interrupt via ${:04X} -> PC=${:04X}", vector, self.pc);
        INTERRUPT_CYCLES
    }

    /// Drive the IRQ line (level triggered, masked by I)
    pub fn set_irq(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    /// Latch an NMI (edge triggered, serviced before the next instruction)
    pub fn request_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Get accumulator
    #[inline(always)]
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Get X register
    #[inline(always)]
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Get Y register
    #[inline(always)]
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Get stack pointer
    #[inline(always)]
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Get program counter
    #[inline(always)]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Get processor status
    #[inline(always)]
    pub fn status(&self) -> StatusFlags {
        self.p
    }

    /// Total cycles executed
    #[inline(always)]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Active decode tables
    pub fn variant(&self) -> CpuVariant {
        self.variant
    }

    /// Whether a HLT opcode has jammed the CPU
    pub fn is_jammed(&self) -> bool {
        self.jammed
    }

    /// Set accumulator
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Set X register
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Set Y register
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Set stack pointer
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Set program counter
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Replace the status register (bit 5 always reads back set)
    pub fn set_status(&mut self, value: StatusFlags) {
        self.p = value | StatusFlags::UNUSED;
    }

    /// Switch decode tables (takes effect at the next instruction)
    pub fn set_variant(&mut self, variant: CpuVariant) {
        self.variant = variant;
    }

    /// Capture registers for a save state
    pub fn save_state(&self) -> CpuState {
        CpuState {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            p: self.p.bits(),
            cycles: self.cycles,
            is_65c02: self.variant == CpuVariant::Cmos65C02,
            irq_line: self.irq_line,
            nmi_pending: self.nmi_pending,
            jammed: self.jammed,
        }
    }

    /// Restore registers from a save state
    pub fn load_state(&mut self, state: &CpuState) {
        self.a = state.a;
        self.x = state.x;
        self.y = state.y;
        self.sp = state.sp;
        self.pc = state.pc;
        self.p = StatusFlags::from_bits_retain(state.p) | StatusFlags::UNUSED;
        self.cycles = state.cycles;
        self.variant = if state.is_65c02 {
            CpuVariant::Cmos65C02
        } else {
            CpuVariant::Nmos6502
        };
        self.irq_line = state.irq_line;
        self.nmi_pending = state.nmi_pending;
        self.jammed = state.jammed;
    }

    /// Dump all register values to stdout
    ///
    /// # Example
    ///
    /// ```no_run
    /// use a2rx::core::cpu::CPU;
    ///
    /// let cpu = CPU::default();
    /// cpu.dump_registers();
    /// ```
    pub fn dump_registers(&self) {
        println!("CPU Registers ({}):", self.variant.name());
        println!("PC: ${:04X}  SP: ${:02X}", self.pc, self.sp);
        println!("A:  ${:02X}    X:  ${:02X}  Y: ${:02X}", self.a, self.x, self.y);
        println!("P:  ${:02X}    [{}]", self.p.bits(), self.p.to_flag_string());
        println!("Cycles: {}", self.cycles);
        if self.jammed {
            println!("CPU is jammed (HLT)");
        }
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new(CpuVariant::default())
    }
}
