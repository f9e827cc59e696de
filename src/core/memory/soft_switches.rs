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

//! IIe soft switches ($C000-$C08F)
//!
//! This module decodes the motherboard I/O page: memory banking switches, the
//! display mode, keyboard, speaker, game port and the language card. Slot device
//! select ranges ($C090-$C0FF) are forwarded to the slot cards.
//!
//! Every switch change that affects banking rebuilds the page maps before the
//! access returns, so the new configuration applies from the next access on.

use super::Memory;
use crate::core::peripherals::video;
use bitflags::bitflags;

bitflags! {
    /// Soft switch state
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SoftSwitches: u32 {
        /// 80STORE: PAGE2 banks display memory instead of flipping pages
        const STORE80 = 1 << 0;
        /// Read $0200-$BFFF from auxiliary RAM
        const RAMRD = 1 << 1;
        /// Write $0200-$BFFF to auxiliary RAM
        const RAMWRT = 1 << 2;
        /// Internal ROM at $C100-$CFFF
        const INTCXROM = 1 << 3;
        /// Auxiliary zero page, stack and language card
        const ALTZP = 1 << 4;
        /// Slot 3 ROM instead of the internal 80-column firmware
        const SLOTC3ROM = 1 << 5;
        const COL80 = 1 << 6;
        const ALTCHRSET = 1 << 7;
        const TEXT = 1 << 8;
        const MIXED = 1 << 9;
        const PAGE2 = 1 << 10;
        const HIRES = 1 << 11;
        const AN0 = 1 << 12;
        const AN1 = 1 << 13;
        const AN2 = 1 << 14;
        const AN3 = 1 << 15;
        /// Language card RAM readable at $D000-$FFFF
        const LCRAM = 1 << 16;
        /// Language card bank 2 at $D000-$DFFF
        const LCBANK2 = 1 << 17;
        /// Language card RAM writable
        const LCWRITE = 1 << 18;
        /// Internal ROM at $C800-$CFFF (set by a slot 3 ROM access)
        const INTC8ROM = 1 << 19;
    }
}

/// Switches cleared by a reset
const RESET_CLEARED: SoftSwitches = SoftSwitches::STORE80
    .union(SoftSwitches::RAMRD)
    .union(SoftSwitches::RAMWRT)
    .union(SoftSwitches::INTCXROM)
    .union(SoftSwitches::ALTZP)
    .union(SoftSwitches::SLOTC3ROM)
    .union(SoftSwitches::COL80)
    .union(SoftSwitches::ALTCHRSET)
    .union(SoftSwitches::INTC8ROM)
    .union(SoftSwitches::LCRAM);

/// Off/on write pairs at $C000-$C00F, indexed by `(address >> 1) & 7`
const WRITE_PAIRS: [SoftSwitches; 8] = [
    SoftSwitches::STORE80,
    SoftSwitches::RAMRD,
    SoftSwitches::RAMWRT,
    SoftSwitches::INTCXROM,
    SoftSwitches::ALTZP,
    SoftSwitches::SLOTC3ROM,
    SoftSwitches::COL80,
    SoftSwitches::ALTCHRSET,
];

/// Display switch pairs at $C050-$C057
const DISPLAY_PAIRS: [SoftSwitches; 4] = [
    SoftSwitches::TEXT,
    SoftSwitches::MIXED,
    SoftSwitches::PAGE2,
    SoftSwitches::HIRES,
];

/// Annunciator pairs at $C058-$C05F
const ANNUNCIATOR_PAIRS: [SoftSwitches; 4] = [
    SoftSwitches::AN0,
    SoftSwitches::AN1,
    SoftSwitches::AN2,
    SoftSwitches::AN3,
];

impl SoftSwitches {
    /// Power-on state: text mode, language card reading ROM with bank 2 writable
    pub fn power_on() -> Self {
        SoftSwitches::TEXT | SoftSwitches::LCBANK2 | SoftSwitches::LCWRITE
    }

    /// Apply a machine reset
    pub fn reset(&mut self) {
        self.remove(RESET_CLEARED);
        self.insert(SoftSwitches::LCBANK2 | SoftSwitches::LCWRITE);
    }

    /// Display switches for the video scanner
    pub fn display_mode(self) -> video::DisplayMode {
        video::DisplayMode {
            text: self.contains(SoftSwitches::TEXT),
            mixed: self.contains(SoftSwitches::MIXED),
            page2: self.contains(SoftSwitches::PAGE2),
            hires: self.contains(SoftSwitches::HIRES),
            store80: self.contains(SoftSwitches::STORE80),
        }
    }
}

impl Memory {
    /// Read $C000-$C0FF
    pub(super) fn read_soft_switch(&mut self, address: u16) -> u8 {
        match address & 0xFF {
            0x00..=0x0F => self.keyboard.read_data(),
            0x10 => self.keyboard.clear_strobe(),
            0x11..=0x1F => self.read_status(address),
            0x30..=0x3F => {
                self.speaker.toggle(self.cycle);
                self.read_floating_bus()
            }
            0x50..=0x5F => {
                self.access_display_switch(address);
                self.read_floating_bus()
            }
            0x61..=0x63 => {
                let button = (address & 0x03) as usize - 1;
                self.game_port.read_button(button) | (self.read_floating_bus() & 0x7F)
            }
            0x64..=0x67 => {
                let paddle = (address & 0x03) as usize;
                self.game_port.read_paddle(paddle, self.cycle) | (self.read_floating_bus() & 0x7F)
            }
            0x70 => {
                self.game_port.trigger_paddles(self.cycle);
                self.read_floating_bus()
            }
            0x80..=0x8F => {
                self.access_language_card(address, true);
                self.read_floating_bus()
            }
            0x90..=0xFF => self.read_slot_io(address),
            _ => self.read_floating_bus(),
        }
    }

    /// Write $C000-$C0FF
    pub(super) fn write_soft_switch(&mut self, address: u16, value: u8) {
        match address & 0xFF {
            0x00..=0x0F => {
                let switch = WRITE_PAIRS[((address >> 1) & 0x07) as usize];
                self.set_switch(switch, address & 1 != 0);
            }
            0x10..=0x1F => {
                self.keyboard.clear_strobe();
            }
            0x30..=0x3F => self.speaker.toggle(self.cycle),
            0x50..=0x5F => self.access_display_switch(address),
            0x70 => self.game_port.trigger_paddles(self.cycle),
            0x80..=0x8F => self.access_language_card(address, false),
            0x90..=0xFF => self.write_slot_io(address, value),
            _ => log::trace!("Ignored soft switch write ${:04X} = ${:02X}", address, value),
        }
    }

    /// Status reads at $C011-$C01F: flag in bit 7, keyboard latch below
    pub(super) fn read_status(&self, address: u16) -> u8 {
        let switches = self.switches;
        let flag = match address & 0x0F {
            0x1 => switches.contains(SoftSwitches::LCBANK2),
            0x2 => switches.contains(SoftSwitches::LCRAM),
            0x3 => switches.contains(SoftSwitches::RAMRD),
            0x4 => switches.contains(SoftSwitches::RAMWRT),
            0x5 => switches.contains(SoftSwitches::INTCXROM),
            0x6 => switches.contains(SoftSwitches::ALTZP),
            0x7 => switches.contains(SoftSwitches::SLOTC3ROM),
            0x8 => switches.contains(SoftSwitches::STORE80),
            0x9 => !video::is_vertical_blank(self.cycle),
            0xA => switches.contains(SoftSwitches::TEXT),
            0xB => switches.contains(SoftSwitches::MIXED),
            0xC => switches.contains(SoftSwitches::PAGE2),
            0xD => switches.contains(SoftSwitches::HIRES),
            0xE => switches.contains(SoftSwitches::ALTCHRSET),
            _ => switches.contains(SoftSwitches::COL80),
        };
        (if flag { 0x80 } else { 0x00 }) | self.keyboard.latch()
    }

    /// $C050-$C05F: display mode and annunciators (read or write)
    fn access_display_switch(&mut self, address: u16) {
        let on = address & 1 != 0;
        let index = ((address >> 1) & 0x03) as usize;
        if address & 0x08 == 0 {
            self.set_switch(DISPLAY_PAIRS[index], on);
        } else {
            self.set_switch(ANNUNCIATOR_PAIRS[index], on);
        }
    }

    /// $C080-$C08F: language card control
    ///
    /// Bit 3 selects bank 1, bits 0-1 equal to 0 or 3 read RAM. Even addresses
    /// write-protect the RAM. Two successive odd reads enable writing; an odd write
    /// only resets the sequence.
    fn access_language_card(&mut self, address: u16, is_read: bool) {
        let offset = address & 0x0F;
        let mut switches = self.switches;

        switches.set(SoftSwitches::LCBANK2, offset & 0x08 == 0);
        let read_select = offset & 0x03;
        switches.set(SoftSwitches::LCRAM, read_select == 0 || read_select == 3);

        if offset & 1 == 0 {
            switches.remove(SoftSwitches::LCWRITE);
            self.lc_prewrite = false;
        } else if is_read {
            if self.lc_prewrite {
                switches.insert(SoftSwitches::LCWRITE);
            }
            self.lc_prewrite = true;
        } else {
            self.lc_prewrite = false;
        }

        log::trace!(
            "Language card ${:04X}: bank{} read {} write {}",
            address,
            if switches.contains(SoftSwitches::LCBANK2) { 2 } else { 1 },
            if switches.contains(SoftSwitches::LCRAM) { "RAM" } else { "ROM" },
            switches.contains(SoftSwitches::LCWRITE)
        );
        self.update_switches(switches);
    }

    /// Set or clear one switch and remap if anything changed
    pub(super) fn set_switch(&mut self, switch: SoftSwitches, on: bool) {
        let mut switches = self.switches;
        switches.set(switch, on);
        self.update_switches(switches);
    }

    /// Replace the switch state, rebuilding the page maps on change
    pub(super) fn update_switches(&mut self, switches: SoftSwitches) {
        if switches != self.switches {
            log::trace!(
                "Soft switches {:#07X} -> {:#07X}",
                self.switches.bits(),
                switches.bits()
            );
            self.switches = switches;
            self.map_pages();
        }
    }
}
