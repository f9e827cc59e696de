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

//! Keyboard latch
//!
//! The IIe keyboard presents a 7-bit ASCII latch with a strobe in bit 7 at
//! $C000-$C00F. Any access to $C010 clears the strobe and reports whether a key is
//! still held down.

/// Keyboard data latch and strobe
///
/// # Example
/// ```
/// use a2rx::core::peripherals::Keyboard;
///
/// let mut keyboard = Keyboard::new();
/// keyboard.press_key(b'A');
/// assert_eq!(keyboard.read_data(), 0xC1);
///
/// // Clearing the strobe keeps the latched character
/// assert_eq!(keyboard.clear_strobe(), 0xC1);
/// assert_eq!(keyboard.read_data(), 0x41);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    /// Last key code (7-bit ASCII)
    latch: u8,

    /// Set when a key was pressed and not yet acknowledged
    strobe: bool,

    /// Host reports a key held down
    any_key_down: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a key press from the host
    ///
    /// # Arguments
    ///
    /// * `key` - ASCII code (bit 7 is ignored)
    pub fn press_key(&mut self, key: u8) {
        self.latch = key & 0x7F;
        self.strobe = true;
        self.any_key_down = true;
        log::trace!("Key pressed: ${:02X}", self.latch);
    }

    /// Host released all keys
    pub fn release_key(&mut self) {
        self.any_key_down = false;
    }

    /// $C000-$C00F read: latch with strobe in bit 7
    pub fn read_data(&self) -> u8 {
        self.latch | if self.strobe { 0x80 } else { 0x00 }
    }

    /// $C010 access: clear the strobe
    ///
    /// # Returns
    ///
    /// Latch in bits 0-6 and the any-key-down flag in bit 7
    pub fn clear_strobe(&mut self) -> u8 {
        self.strobe = false;
        self.latch | if self.any_key_down { 0x80 } else { 0x00 }
    }

    /// Latched key code without the strobe
    #[inline(always)]
    pub fn latch(&self) -> u8 {
        self.latch
    }

    pub fn strobe(&self) -> bool {
        self.strobe
    }

    pub fn is_key_down(&self) -> bool {
        self.any_key_down
    }

    /// Restore the latch from a save state
    pub(crate) fn restore(&mut self, latch: u8, strobe: bool) {
        self.latch = latch & 0x7F;
        self.strobe = strobe;
        self.any_key_down = false;
    }
}
