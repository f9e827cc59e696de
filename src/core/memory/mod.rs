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

//! Bank-switched address space for the Apple IIe
//!
//! Memory is the central component for all CPU traffic. It owns the RAM and ROM
//! banks, the soft-switch state and the motherboard peripherals, and routes slot
//! windows to the peripheral cards.
//!
//! # Memory Map
//!
//! | Address Range | Region                          | Banking                  |
//! |---------------|---------------------------------|--------------------------|
//! | $0000-$01FF   | Zero page and stack             | ALTZP                    |
//! | $0200-$BFFF   | RAM                             | RAMRD/RAMWRT, 80STORE    |
//! | $C000-$C0FF   | Soft switches, slot I/O         | -                        |
//! | $C100-$CFFF   | Slot ROM / internal ROM         | INTCXROM, SLOTC3ROM      |
//! | $D000-$DFFF   | ROM or language card bank 1/2   | LCRAM/LCBANK2/LCWRITE    |
//! | $E000-$FFFF   | ROM or language card RAM        | LCRAM/LCWRITE            |
//!
//! # Example
//!
//! ```
//! use a2rx::core::memory::Memory;
//!
//! let mut memory = Memory::new();
//! memory.write(0x2000, 0x12);
//! assert_eq!(memory.read(0x2000), 0x12);
//!
//! // RAMWRT sends writes to auxiliary memory; reads still see main memory
//! memory.write(0xC005, 0);
//! memory.write(0x2000, 0x34);
//! assert_eq!(memory.read(0x2000), 0x12);
//! ```

mod debug;
mod io_device;
mod region;
mod slots;
mod soft_switches;

#[cfg(test)]
mod tests;

pub use debug::{DebugFlags, DebugInfo};
pub use io_device::{EmptySlot, PeripheralCard};
pub use region::MemoryRegion;
pub use slots::{SlotCard, SLOT_COUNT};
pub use soft_switches::SoftSwitches;

use crate::core::error::{EmulatorError, Result, SaveStateError};
use crate::core::peripherals::{video, GamePort, Keyboard, Speaker};
use crate::core::save_state::MemoryState;
use debug::ADDRESS_SPACE;
use region::Page;
use std::fs::File;
use std::io::Read;

/// Apple IIe address space
///
/// Holds 64K of main RAM, 64K of auxiliary RAM and a 16K ROM image covering
/// $C000-$FFFF. Reads and writes are resolved through per-page maps rebuilt on
/// every banking change.
pub struct Memory {
    /// Main RAM (64K, language card bank 1 at $C000-$CFFF)
    main: Vec<u8>,

    /// Auxiliary RAM (64K, same layout)
    aux: Vec<u8>,

    /// System ROM for $C000-$FFFF ($C000-$C0FF is never visible)
    rom: Vec<u8>,

    /// Soft switch state
    switches: SoftSwitches,

    /// First odd language card read seen (second one enables writing)
    lc_prewrite: bool,

    /// Slot owning $C800-$CFFF
    expansion_slot: Option<usize>,

    /// Peripheral cards by slot number
    slots: [Option<SlotCard>; SLOT_COUNT],

    /// Read page map
    read_map: [Page; 256],

    /// Write page map
    write_map: [Page; 256],

    keyboard: Keyboard,
    speaker: Speaker,
    game_port: GamePort,

    /// Per-address debug metadata
    debug: Vec<DebugInfo>,

    /// Count accesses into `debug`
    instrumentation: bool,

    /// CPU cycle at the start of the current instruction
    cycle: u64,
}

impl Memory {
    /// RAM bank size (64K)
    pub const RAM_SIZE: usize = 0x10000;

    /// Full ROM image size ($C000-$FFFF)
    pub const ROM_SIZE: usize = 0x4000;

    /// ROM image without the internal $C100-$CFFF firmware ($D000-$FFFF)
    pub const ROM_SIZE_12K: usize = 0x3000;

    /// Create a new address space
    ///
    /// RAM and ROM are zero-filled and the soft switches are in their power-on
    /// state (text mode, ROM readable, language card bank 2 write-enabled).
    ///
    /// # Example
    ///
    /// ```
    /// use a2rx::core::memory::{Memory, SoftSwitches};
    ///
    /// let memory = Memory::new();
    /// assert!(memory.switches().contains(SoftSwitches::TEXT));
    /// ```
    pub fn new() -> Self {
        let mut memory = Self {
            main: vec![0u8; Self::RAM_SIZE],
            aux: vec![0u8; Self::RAM_SIZE],
            rom: vec![0u8; Self::ROM_SIZE],
            switches: SoftSwitches::power_on(),
            lc_prewrite: false,
            expansion_slot: None,
            slots: std::array::from_fn(|_| None),
            read_map: [Page::Unmapped; 256],
            write_map: [Page::Unmapped; 256],
            keyboard: Keyboard::new(),
            speaker: Speaker::new(),
            game_port: GamePort::new(),
            debug: vec![DebugInfo::default(); ADDRESS_SPACE],
            instrumentation: false,
            cycle: 0,
        };
        memory.map_pages();
        memory
    }

    /// Apply a machine reset
    ///
    /// Clears the banking switches and restores the language card to ROM reads
    /// with bank 2 write-enabled. RAM contents survive.
    pub fn reset(&mut self) {
        self.switches.reset();
        self.lc_prewrite = false;
        self.expansion_slot = None;
        self.map_pages();
        log::info!("Memory reset");
    }

    /// Load the system ROM from a file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a 12K ($D000-$FFFF) or 16K ($C000-$FFFF) image
    ///
    /// # Errors
    ///
    /// - `EmulatorError::RomNotFound` if the file cannot be opened
    /// - `EmulatorError::InvalidRomSize` for any other image size
    pub fn load_rom(&mut self, path: &str) -> Result<()> {
        let mut file = File::open(path).map_err(|_| EmulatorError::RomNotFound(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        self.load_rom_bytes(&data)?;
        log::info!("Loaded system ROM {} ({} bytes)", path, data.len());
        Ok(())
    }

    /// Load the system ROM from memory
    ///
    /// # Example
    ///
    /// ```
    /// use a2rx::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// let mut rom = vec![0xEA; 0x3000];
    /// rom[0x2FFC] = 0x62; // reset vector $FA62
    /// rom[0x2FFD] = 0xFA;
    /// memory.load_rom_bytes(&rom).unwrap();
    ///
    /// assert_eq!(memory.read(0xFFFC), 0x62);
    /// assert!(memory.load_rom_bytes(&[0; 100]).is_err());
    /// ```
    pub fn load_rom_bytes(&mut self, data: &[u8]) -> Result<()> {
        match data.len() {
            Self::ROM_SIZE => self.rom.copy_from_slice(data),
            Self::ROM_SIZE_12K => {
                log::warn!("12K ROM image: internal $C100-$CFFF firmware is missing");
                self.rom[..Self::ROM_SIZE - Self::ROM_SIZE_12K].fill(0);
                self.rom[Self::ROM_SIZE - Self::ROM_SIZE_12K..].copy_from_slice(data);
            }
            got => {
                return Err(EmulatorError::InvalidRomSize {
                    expected: Self::ROM_SIZE,
                    got,
                })
            }
        }
        Ok(())
    }

    /// Read a byte as the CPU would
    ///
    /// Soft switches touched by the access take effect before it returns.
    pub fn read(&mut self, address: u16) -> u8 {
        if self.instrumentation {
            self.record_read(address);
        }
        self.read_mapped(address)
    }

    /// Read an opcode byte (marks the address as code for the debugger)
    pub fn read_opcode(&mut self, address: u16) -> u8 {
        if self.instrumentation {
            self.record_opcode(address);
        }
        self.read_mapped(address)
    }

    /// Write a byte as the CPU would
    ///
    /// Writes to ROM or write-protected language card RAM are dropped.
    pub fn write(&mut self, address: u16, value: u8) {
        if self.instrumentation {
            self.record_write(address);
        }

        match self.write_map[(address >> 8) as usize] {
            Page::Main(page) => self.main[page_offset(page, address)] = value,
            Page::Aux(page) => self.aux[page_offset(page, address)] = value,
            Page::Io if address < 0xC100 => self.write_soft_switch(address, value),
            Page::Io => self.write_slot_rom(address),
            Page::Rom(_) | Page::Unmapped => {
                log::trace!("Dropped write to ${:04X} = ${:02X}", address, value);
            }
        }
    }

    #[inline(always)]
    fn read_mapped(&mut self, address: u16) -> u8 {
        match self.read_map[(address >> 8) as usize] {
            Page::Main(page) => self.main[page_offset(page, address)],
            Page::Aux(page) => self.aux[page_offset(page, address)],
            Page::Rom(page) => self.rom[page_offset(page, address)],
            Page::Io if address < 0xC100 => self.read_soft_switch(address),
            Page::Io => self.read_slot_rom(address),
            Page::Unmapped => self.read_floating_bus(),
        }
    }

    /// Read without side effects
    ///
    /// Soft switches are not triggered and no counters change. The I/O page
    /// shows the keyboard and status registers; other device addresses read 0.
    pub fn peek(&self, address: u16) -> u8 {
        match self.read_map[(address >> 8) as usize] {
            Page::Main(page) => self.main[page_offset(page, address)],
            Page::Aux(page) => self.aux[page_offset(page, address)],
            Page::Rom(page) => self.rom[page_offset(page, address)],
            Page::Io => self.peek_io(address),
            Page::Unmapped => 0,
        }
    }

    fn peek_io(&self, address: u16) -> u8 {
        let internal_cx = self.switches.contains(SoftSwitches::INTCXROM);
        match address {
            0xC000..=0xC00F => self.keyboard.read_data(),
            0xC011..=0xC01F => self.read_status(address),
            0xC000..=0xC0FF => 0,
            0xC300..=0xC3FF if !self.switches.contains(SoftSwitches::SLOTC3ROM) => {
                self.rom_byte(address)
            }
            0xC100..=0xC7FF if internal_cx => self.rom_byte(address),
            0xC100..=0xC7FF => {
                let slot = ((address >> 8) & 0x07) as usize;
                self.slots[slot]
                    .as_ref()
                    .and_then(|card| card.borrow().read_rom(address as u8))
                    .unwrap_or(0)
            }
            _ if internal_cx || self.switches.contains(SoftSwitches::INTC8ROM) => {
                self.rom_byte(address)
            }
            _ => self
                .expansion_slot
                .and_then(|slot| self.slots[slot].as_ref())
                .and_then(|card| card.borrow().read_expansion_rom(address - 0xC800))
                .unwrap_or(0),
        }
    }

    /// Byte the video circuitry is fetching from main RAM right now
    ///
    /// Returned for reads of addresses nothing drives.
    pub fn read_floating_bus(&self) -> u8 {
        let address = video::fetch_address(self.cycle, self.switches.display_mode());
        self.main[address as usize]
    }

    /// Copy bytes into main RAM, bypassing banking and soft switches
    ///
    /// Addresses wrap at $FFFF. Used for loading binaries.
    pub fn write_main_ram(&mut self, address: u16, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            let target = address.wrapping_add(i as u16) as usize;
            self.main[target] = byte;
        }
    }

    /// Record the CPU cycle for timing-dependent reads
    #[inline(always)]
    pub fn set_cycle(&mut self, cycle: u64) {
        self.cycle = cycle;
    }

    #[inline(always)]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn switches(&self) -> SoftSwitches {
        self.switches
    }

    pub fn main_ram(&self) -> &[u8] {
        &self.main
    }

    pub fn aux_ram(&self) -> &[u8] {
        &self.aux
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    pub fn speaker_mut(&mut self) -> &mut Speaker {
        &mut self.speaker
    }

    pub fn game_port(&self) -> &GamePort {
        &self.game_port
    }

    pub fn game_port_mut(&mut self) -> &mut GamePort {
        &mut self.game_port
    }

    /// Capture RAM and switch state for a save state
    pub fn save_state(&self) -> MemoryState {
        MemoryState {
            main: self.main.clone(),
            aux: self.aux.clone(),
            switches: self.switches.bits(),
            lc_prewrite: self.lc_prewrite,
            expansion_slot: self.expansion_slot.map(|slot| slot as u8),
            keyboard_latch: self.keyboard.latch(),
            keyboard_strobe: self.keyboard.strobe(),
        }
    }

    /// Restore RAM and switch state
    ///
    /// The state is validated first; on error nothing is changed.
    pub fn load_state(&mut self, state: &MemoryState) -> std::result::Result<(), SaveStateError> {
        state.validate()?;

        self.main.copy_from_slice(&state.main);
        self.aux.copy_from_slice(&state.aux);
        self.switches = SoftSwitches::from_bits_truncate(state.switches);
        self.lc_prewrite = state.lc_prewrite;
        self.expansion_slot = state.expansion_slot.map(|slot| slot as usize);
        self.keyboard.restore(state.keyboard_latch, state.keyboard_strobe);
        self.map_pages();
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Index into a 64K bank or the ROM image
#[inline(always)]
fn page_offset(page: u8, address: u16) -> usize {
    ((page as usize) << 8) | (address as usize & 0xFF)
}
