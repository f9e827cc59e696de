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

//! Slot card dispatch
//!
//! # Windows
//! - $C090-$C0FF: device select, 16 registers per slot
//! - $C100-$C7FF: I/O select ROM, one page per slot
//! - $C800-$CFFF: expansion ROM of the last slot whose ROM page was touched;
//!   any access to $CFFF releases it
//!
//! INTCXROM replaces the whole $C100-$CFFF range with internal ROM. With
//! SLOTC3ROM off, the slot 3 page shows the internal 80-column firmware and
//! touching it also maps the internal $C800-$CFFF ROM (INTC8ROM).

use super::io_device::PeripheralCard;
use super::{Memory, SoftSwitches};
use crate::core::error::{EmulatorError, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Number of slot positions (slot 0 is never populated on the IIe)
pub const SLOT_COUNT: usize = 8;

/// Shared handle to a slot card
pub type SlotCard = Rc<RefCell<dyn PeripheralCard>>;

/// Last address of the expansion ROM window; any access deselects it
const EXPANSION_ROM_RELEASE: u16 = 0xCFFF;

impl Memory {
    /// Plug a card into a slot
    ///
    /// # Arguments
    ///
    /// * `slot` - Slot number, 1-7
    /// * `card` - Card shared with the machine
    ///
    /// # Returns
    ///
    /// - `Ok(())` on success
    /// - `Err(EmulatorError::InvalidSlot)` for slot 0 or slots past 7
    ///
    /// # Example
    ///
    /// ```
    /// use a2rx::core::memory::{Memory, EmptySlot};
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let mut memory = Memory::new();
    /// memory.set_slot(4, Rc::new(RefCell::new(EmptySlot))).unwrap();
    /// assert!(memory.set_slot(8, Rc::new(RefCell::new(EmptySlot))).is_err());
    /// ```
    pub fn set_slot(&mut self, slot: usize, card: SlotCard) -> Result<()> {
        if slot == 0 || slot >= SLOT_COUNT {
            return Err(EmulatorError::InvalidSlot(slot));
        }
        log::debug!("Slot {}: {}", slot, card.borrow().name());
        self.slots[slot] = Some(card);
        Ok(())
    }

    /// Remove the card from a slot
    pub fn clear_slot(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
        if self.expansion_slot == Some(slot) {
            self.expansion_slot = None;
        }
    }

    /// Card currently in a slot
    pub fn slot(&self, slot: usize) -> Option<SlotCard> {
        self.slots.get(slot).and_then(|card| card.clone())
    }

    /// Populated slots in ascending order
    pub fn cards(&self) -> impl Iterator<Item = (usize, &SlotCard)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, card)| card.as_ref().map(|card| (slot, card)))
    }

    /// Slot owning the expansion ROM window
    pub fn expansion_slot(&self) -> Option<usize> {
        self.expansion_slot
    }

    /// Device select read ($C090-$C0FF)
    pub(super) fn read_slot_io(&mut self, address: u16) -> u8 {
        let slot = ((address >> 4) & 0x07) as usize;
        let offset = (address & 0x0F) as u8;
        let value = self.slots[slot]
            .as_ref()
            .and_then(|card| card.borrow_mut().read_io(offset));
        value.unwrap_or_else(|| self.read_floating_bus())
    }

    /// Device select write ($C090-$C0FF)
    pub(super) fn write_slot_io(&mut self, address: u16, value: u8) {
        let slot = ((address >> 4) & 0x07) as usize;
        let offset = (address & 0x0F) as u8;
        if let Some(card) = &self.slots[slot] {
            card.borrow_mut().write_io(offset, value);
        }
    }

    /// Read $C100-$CFFF
    pub(super) fn read_slot_rom(&mut self, address: u16) -> u8 {
        let value = if address < 0xC800 {
            self.read_io_select(address)
        } else {
            self.read_io_strobe(address)
        };

        if address == EXPANSION_ROM_RELEASE {
            self.release_expansion_rom();
        }
        value
    }

    /// Write $C100-$CFFF: ROM is not writable, but the access still selects
    pub(super) fn write_slot_rom(&mut self, address: u16) {
        if address < 0xC800 {
            self.select_slot_rom(address);
        } else if address == EXPANSION_ROM_RELEASE {
            self.release_expansion_rom();
        }
    }

    /// $Cs00-$CsFF
    fn read_io_select(&mut self, address: u16) -> u8 {
        let internal = self.select_slot_rom(address);
        if internal {
            return self.rom_byte(address);
        }

        let slot = ((address >> 8) & 0x07) as usize;
        let value = self.slots[slot]
            .as_ref()
            .and_then(|card| card.borrow().read_rom(address as u8));
        value.unwrap_or_else(|| self.read_floating_bus())
    }

    /// $C800-$CFFF
    fn read_io_strobe(&mut self, address: u16) -> u8 {
        if self
            .switches
            .intersects(SoftSwitches::INTCXROM | SoftSwitches::INTC8ROM)
        {
            return self.rom_byte(address);
        }

        let value = self.expansion_slot.and_then(|slot| {
            self.slots[slot]
                .as_ref()
                .and_then(|card| card.borrow().read_expansion_rom(address - 0xC800))
        });
        value.unwrap_or_else(|| self.read_floating_bus())
    }

    /// Track slot ROM selection for an access to $Cs00-$CsFF
    ///
    /// # Returns
    ///
    /// true when the page is served by internal ROM
    fn select_slot_rom(&mut self, address: u16) -> bool {
        let slot = ((address >> 8) & 0x07) as usize;

        if self.switches.contains(SoftSwitches::INTCXROM) {
            return true;
        }
        if slot == 3 && !self.switches.contains(SoftSwitches::SLOTC3ROM) {
            if !self.switches.contains(SoftSwitches::INTC8ROM) {
                log::trace!("Internal $C800 ROM selected by ${:04X}", address);
                self.switches.insert(SoftSwitches::INTC8ROM);
            }
            return true;
        }

        if self.expansion_slot != Some(slot) {
            log::debug!("Expansion ROM: slot {} selected", slot);
            self.expansion_slot = Some(slot);
        }
        false
    }

    fn release_expansion_rom(&mut self) {
        if self.expansion_slot.is_some() {
            log::debug!("Expansion ROM released");
        }
        self.expansion_slot = None;
        self.switches.remove(SoftSwitches::INTC8ROM);
    }

    /// Byte of the 16K system ROM image for $C000-$FFFF
    #[inline(always)]
    pub(super) fn rom_byte(&self, address: u16) -> u8 {
        self.rom[(address - 0xC000) as usize]
    }
}
