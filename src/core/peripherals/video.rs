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

//! Video scanner position
//!
//! The video circuitry reads main RAM on every cycle. Nothing here renders; the
//! scanner only answers which byte is on the data bus at a given cycle, which is
//! what a read of an undriven I/O address returns.
//!
//! # Timing (NTSC)
//! - 65 cycles per scan line, the first 25 in horizontal blanking
//! - 262 lines per frame, lines 192-261 in vertical blanking
//! - 17030 cycles per frame

/// CPU cycles per scan line
pub const CYCLES_PER_LINE: u64 = 65;

/// Scan lines per frame
pub const LINES_PER_FRAME: u64 = 262;

/// CPU cycles per frame
pub const CYCLES_PER_FRAME: u64 = CYCLES_PER_LINE * LINES_PER_FRAME;

/// Visible scan lines
pub const VISIBLE_LINES: u64 = 192;

/// Horizontal blanking cycles at the start of each line
pub const HBLANK_CYCLES: u64 = 25;

/// First scan line that shows text in mixed mode
const MIXED_TEXT_LINE: u64 = 160;

/// Display soft switches that affect video fetch addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayMode {
    pub text: bool,
    pub mixed: bool,
    pub page2: bool,
    pub hires: bool,
    pub store80: bool,
}

/// Scanner position for a cycle count
///
/// # Returns
///
/// `(line, column)` where line is 0-261 and column is 0-64
///
/// # Example
/// ```
/// use a2rx::core::peripherals::video::scanner_position;
///
/// assert_eq!(scanner_position(0), (0, 0));
/// assert_eq!(scanner_position(65 * 3 + 7), (3, 7));
/// assert_eq!(scanner_position(17030), (0, 0));
/// ```
pub fn scanner_position(cycle: u64) -> (u64, u64) {
    let position = cycle % CYCLES_PER_FRAME;
    (position / CYCLES_PER_LINE, position % CYCLES_PER_LINE)
}

/// Whether the beam is in vertical blanking
pub fn is_vertical_blank(cycle: u64) -> bool {
    scanner_position(cycle).0 >= VISIBLE_LINES
}

/// Address the video circuitry fetches at the given cycle
///
/// PAGE2 selects the second display page unless 80STORE repurposes it as a bank
/// switch. Mixed mode shows text on the bottom four rows.
pub fn fetch_address(cycle: u64, mode: DisplayMode) -> u16 {
    let (line, column) = scanner_position(cycle);

    // During blanking the counters keep addressing memory below the row start
    let column = if column >= HBLANK_CYCLES {
        column - HBLANK_CYCLES
    } else {
        column + CYCLES_PER_LINE - HBLANK_CYCLES
    };

    let row_offset = (((line >> 3) & 0x07) << 7) + ((line >> 6) & 0x03) * 40;
    let page2 = mode.page2 && !mode.store80;
    let graphics_line = !(mode.mixed && line >= MIXED_TEXT_LINE && line < VISIBLE_LINES);

    if mode.hires && !mode.text && graphics_line {
        let base: u64 = if page2 { 0x4000 } else { 0x2000 };
        let offset = ((line & 0x07) << 10) | ((row_offset + column) & 0x03FF);
        (base + offset) as u16
    } else {
        let base: u64 = if page2 { 0x0800 } else { 0x0400 };
        (base + ((row_offset + column) & 0x03FF)) as u16
    }
}
