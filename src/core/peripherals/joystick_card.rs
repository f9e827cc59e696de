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

//! 4play digital joystick card
//!
//! Each of the four ports reads back as one byte at device-select offsets 0-3.
//! The host sets port states; the card never drives the expansion ROM window.

use crate::core::memory::PeripheralCard;
use bitflags::bitflags;

bitflags! {
    /// State byte of one joystick port (all bits active high)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct JoystickState: u8 {
        const UP = 0x01;
        const DOWN = 0x02;
        const LEFT = 0x04;
        const RIGHT = 0x08;
        const TRIGGER3 = 0x10;
        /// Always reads high
        const NOT_USED = 0x20;
        const TRIGGER2 = 0x40;
        const TRIGGER1 = 0x80;
    }
}

/// Number of joystick ports on the card
pub const PORT_COUNT: usize = 4;

/// 4play joystick card
///
/// # Example
/// ```
/// use a2rx::core::memory::PeripheralCard;
/// use a2rx::core::peripherals::{JoystickCard, JoystickState};
///
/// let mut card = JoystickCard::new();
/// card.set_port(0, JoystickState::UP | JoystickState::TRIGGER1);
///
/// assert_eq!(card.read_io(0), Some(0xA1));
/// assert_eq!(card.read_io(1), Some(0x20));
/// assert_eq!(card.read_io(4), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JoystickCard {
    ports: [JoystickState; PORT_COUNT],
}

impl JoystickCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state of one port (out-of-range ports are ignored)
    pub fn set_port(&mut self, port: usize, state: JoystickState) {
        if let Some(slot) = self.ports.get_mut(port) {
            *slot = state;
        }
    }

    pub fn port(&self, port: usize) -> JoystickState {
        self.ports.get(port).copied().unwrap_or_default()
    }
}

impl PeripheralCard for JoystickCard {
    fn name(&self) -> &'static str {
        "4play"
    }

    fn reset(&mut self) {
        self.ports = [JoystickState::empty(); PORT_COUNT];
    }

    fn read_io(&mut self, offset: u8) -> Option<u8> {
        match offset & 0x0F {
            port @ 0..=3 => Some((self.ports[port as usize] | JoystickState::NOT_USED).bits()),
            _ => None,
        }
    }

    fn write_io(&mut self, _offset: u8, _value: u8) {}
}
