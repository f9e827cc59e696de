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

//! Game port: push buttons and paddle timers
//!
//! # Register Map
//! - $C061-$C063: push buttons 0-2 (bit 7)
//! - $C064-$C067: paddle timers 0-3 (bit 7 high while the 558 timer runs)
//! - $C070: trigger all paddle timers
//!
//! A paddle at position `p` keeps its timer running for roughly `p * 11` cycles
//! after the trigger.

/// Cycles per paddle position unit
pub const PADDLE_CYCLES_PER_UNIT: u64 = 11;

/// Number of paddle inputs
pub const PADDLE_COUNT: usize = 4;

/// Number of push buttons
pub const BUTTON_COUNT: usize = 3;

/// Buttons and paddles
#[derive(Debug, Clone)]
pub struct GamePort {
    buttons: [bool; BUTTON_COUNT],
    paddles: [u8; PADDLE_COUNT],

    /// CPU cycle of the last $C070 access
    trigger_cycle: u64,
}

impl GamePort {
    /// Create a game port with centered paddles and released buttons
    pub fn new() -> Self {
        Self {
            buttons: [false; BUTTON_COUNT],
            paddles: [0x80; PADDLE_COUNT],
            trigger_cycle: 0,
        }
    }

    /// Set a push button state (out-of-range indices are ignored)
    pub fn set_button(&mut self, index: usize, pressed: bool) {
        if let Some(button) = self.buttons.get_mut(index) {
            *button = pressed;
        }
    }

    /// Set a paddle position, 0-255 (out-of-range indices are ignored)
    pub fn set_paddle(&mut self, index: usize, position: u8) {
        if let Some(paddle) = self.paddles.get_mut(index) {
            *paddle = position;
        }
    }

    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    pub fn paddle(&self, index: usize) -> u8 {
        self.paddles.get(index).copied().unwrap_or(0)
    }

    /// Button state as bit 7
    pub fn read_button(&self, index: usize) -> u8 {
        if self.button(index) {
            0x80
        } else {
            0x00
        }
    }

    /// Start all paddle timers
    pub fn trigger_paddles(&mut self, cycle: u64) {
        self.trigger_cycle = cycle;
        log::trace!("Paddle timers triggered at cycle {}", cycle);
    }

    /// Paddle timer state as bit 7
    ///
    /// # Arguments
    ///
    /// * `index` - Paddle number
    /// * `cycle` - Current CPU cycle
    pub fn read_paddle(&self, index: usize, cycle: u64) -> u8 {
        let elapsed = cycle.wrapping_sub(self.trigger_cycle);
        let duration = self.paddle(index) as u64 * PADDLE_CYCLES_PER_UNIT;
        if elapsed < duration {
            0x80
        } else {
            0x00
        }
    }
}

impl Default for GamePort {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons() {
        let mut port = GamePort::new();
        assert_eq!(port.read_button(0), 0x00);

        port.set_button(0, true);
        port.set_button(7, true);
        assert_eq!(port.read_button(0), 0x80);
        assert_eq!(port.read_button(1), 0x00);
        assert!(!port.button(7));
    }

    #[test]
    fn test_paddle_timer_discharges() {
        let mut port = GamePort::new();
        port.set_paddle(1, 10);
        port.trigger_paddles(1000);

        assert_eq!(port.read_paddle(1, 1000), 0x80);
        assert_eq!(port.read_paddle(1, 1000 + 10 * PADDLE_CYCLES_PER_UNIT - 1), 0x80);
        assert_eq!(port.read_paddle(1, 1000 + 10 * PADDLE_CYCLES_PER_UNIT), 0x00);
    }

    #[test]
    fn test_paddle_at_zero_never_runs() {
        let mut port = GamePort::new();
        port.set_paddle(0, 0);
        port.trigger_paddles(50);
        assert_eq!(port.read_paddle(0, 50), 0x00);
    }
}
