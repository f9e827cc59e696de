// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Helper functions for memory tests

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Creates a Memory whose ROM bytes equal the low byte of their page
///
/// $D000-$FFFF reads back $D0-$FF, $C100-$CFFF reads back $C1-$CF.
pub fn create_memory_with_rom() -> Memory {
    let mut memory = Memory::new();
    let rom: Vec<u8> = (0..Memory::ROM_SIZE)
        .map(|offset| (0xC0 + (offset >> 8)) as u8)
        .collect();
    memory.load_rom_bytes(&rom).unwrap();
    memory
}

/// Card that records register traffic and serves fixed ROM bytes
#[derive(Default)]
pub struct TestCard {
    pub reads: Vec<u8>,
    pub writes: Vec<(u8, u8)>,
    pub resets: usize,
}

impl PeripheralCard for TestCard {
    fn name(&self) -> &'static str {
        "test"
    }

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn read_io(&mut self, offset: u8) -> Option<u8> {
        self.reads.push(offset);
        Some(0x40 | offset)
    }

    fn write_io(&mut self, offset: u8, value: u8) {
        self.writes.push((offset, value));
    }

    fn read_rom(&self, offset: u8) -> Option<u8> {
        Some(offset)
    }

    fn read_expansion_rom(&self, offset: u16) -> Option<u8> {
        Some(0xA0 | (offset >> 8) as u8)
    }
}

/// Plug a TestCard into a slot and return the shared handle
pub fn install_test_card(memory: &mut Memory, slot: usize) -> Rc<RefCell<TestCard>> {
    let card = Rc::new(RefCell::new(TestCard::default()));
    memory.set_slot(slot, card.clone()).unwrap();
    card
}
