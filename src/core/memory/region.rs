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

//! Page maps and region identification
//!
//! Banking is resolved once per soft-switch change into two 256-entry tables
//! (read and write), one entry per 256-byte page. Language card bank 1 at
//! $D000-$DFFF is stored in the otherwise unused $C000-$CFFF range of each 64K
//! RAM bank.

use super::{Memory, SoftSwitches};

/// Memory region identification
///
/// Used to identify which backing store an address currently resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRegion {
    /// Main 64K RAM
    Main,
    /// Auxiliary 64K RAM
    Aux,
    /// System ROM
    Rom,
    /// I/O page, slot ROM and expansion ROM ($C000-$CFFF)
    Io,
    /// Write-protected (writes are dropped)
    Unmapped,
}

/// Resolved page: backing store and physical page within it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Page {
    Main(u8),
    Aux(u8),
    Rom(u8),
    Io,
    Unmapped,
}

impl Page {
    fn region(self) -> MemoryRegion {
        match self {
            Page::Main(_) => MemoryRegion::Main,
            Page::Aux(_) => MemoryRegion::Aux,
            Page::Rom(_) => MemoryRegion::Rom,
            Page::Io => MemoryRegion::Io,
            Page::Unmapped => MemoryRegion::Unmapped,
        }
    }
}

/// Pick a RAM bank for a physical page
#[inline(always)]
fn bank(aux: bool, page: u8) -> Page {
    if aux {
        Page::Aux(page)
    } else {
        Page::Main(page)
    }
}

impl Memory {
    /// Rebuild both page maps from the current soft switches
    pub(super) fn map_pages(&mut self) {
        let switches = self.switches;
        let altzp = switches.contains(SoftSwitches::ALTZP);
        let store80 = switches.contains(SoftSwitches::STORE80);
        let page2 = switches.contains(SoftSwitches::PAGE2);
        let hires = switches.contains(SoftSwitches::HIRES);

        for page in 0..=0xFFu8 {
            let (read, write) = match page {
                0x00..=0x01 => (bank(altzp, page), bank(altzp, page)),
                0x04..=0x07 if store80 => (bank(page2, page), bank(page2, page)),
                0x20..=0x3F if store80 && hires => (bank(page2, page), bank(page2, page)),
                0x02..=0xBF => (
                    bank(switches.contains(SoftSwitches::RAMRD), page),
                    bank(switches.contains(SoftSwitches::RAMWRT), page),
                ),
                0xC0..=0xCF => (Page::Io, Page::Io),
                _ => {
                    // $D000-$DFFF bank 1 lives at $C000-$CFFF
                    let ram_page = if page < 0xE0 && !switches.contains(SoftSwitches::LCBANK2) {
                        page - 0x10
                    } else {
                        page
                    };
                    let read = if switches.contains(SoftSwitches::LCRAM) {
                        bank(altzp, ram_page)
                    } else {
                        Page::Rom(page - 0xC0)
                    };
                    let write = if switches.contains(SoftSwitches::LCWRITE) {
                        bank(altzp, ram_page)
                    } else {
                        Page::Unmapped
                    };
                    (read, write)
                }
            };
            self.read_map[page as usize] = read;
            self.write_map[page as usize] = write;
        }

        log::debug!(
            "Remapped pages: RAMRD={} RAMWRT={} ALTZP={} 80STORE={} LC={}{}{}",
            switches.contains(SoftSwitches::RAMRD),
            switches.contains(SoftSwitches::RAMWRT),
            altzp,
            store80,
            if switches.contains(SoftSwitches::LCRAM) { "R" } else { "-" },
            if switches.contains(SoftSwitches::LCWRITE) { "W" } else { "-" },
            if switches.contains(SoftSwitches::LCBANK2) { "2" } else { "1" },
        );
    }

    /// Identify where a read of an address currently goes
    ///
    /// # Example
    ///
    /// ```
    /// use a2rx::core::memory::{Memory, MemoryRegion};
    ///
    /// let mut memory = Memory::new();
    /// assert_eq!(memory.identify_region(0x0800), MemoryRegion::Main);
    /// assert_eq!(memory.identify_region(0xC030), MemoryRegion::Io);
    /// assert_eq!(memory.identify_region(0xF800), MemoryRegion::Rom);
    ///
    /// memory.write(0xC003, 0); // RAMRD on
    /// assert_eq!(memory.identify_region(0x0800), MemoryRegion::Aux);
    /// ```
    pub fn identify_region(&self, address: u16) -> MemoryRegion {
        self.read_map[(address >> 8) as usize].region()
    }

    /// Identify where a write to an address currently goes
    pub fn identify_write_region(&self, address: u16) -> MemoryRegion {
        self.write_map[(address >> 8) as usize].region()
    }
}
