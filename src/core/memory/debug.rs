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

//! Per-address debug instrumentation
//!
//! One [`DebugInfo`] entry per address of the 64K logical space. Counters and the
//! last-access cycle are only updated while instrumentation is enabled;
//! breakpoint flags work regardless. Nothing here affects dispatch.

use super::Memory;
use crate::core::error::Result;
use bitflags::bitflags;
use serde::Serialize;

/// Size of the logical address space
pub(super) const ADDRESS_SPACE: usize = 0x10000;

bitflags! {
    /// Per-address markers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DebugFlags: u8 {
        /// Fetched as an opcode at least once
        const OPCODE = 0x01;
        /// Execution stops before this address
        const BREAKPOINT = 0x02;
    }
}

/// Access statistics for one address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugInfo {
    pub reads: u32,
    pub writes: u32,
    pub executions: u32,
    /// CPU cycle of the most recent access
    pub last_cycle: u64,
    pub flags: DebugFlags,
}

impl DebugInfo {
    fn is_touched(&self) -> bool {
        self.reads != 0 || self.writes != 0 || self.executions != 0
    }
}

/// JSON record for one touched address
#[derive(Debug, Serialize)]
struct DebugRecord {
    address: u16,
    reads: u32,
    writes: u32,
    executions: u32,
    last_cycle: u64,
    opcode: bool,
    breakpoint: bool,
}

impl Memory {
    /// Enable or disable access counting
    pub fn set_instrumentation(&mut self, enabled: bool) {
        self.instrumentation = enabled;
        log::debug!(
            "Memory instrumentation {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    pub fn instrumentation(&self) -> bool {
        self.instrumentation
    }

    /// Statistics for an address
    pub fn debug_info(&self, address: u16) -> &DebugInfo {
        &self.debug[address as usize]
    }

    /// Reset all counters, keeping breakpoints
    pub fn clear_debug_info(&mut self) {
        for info in self.debug.iter_mut() {
            let breakpoint = info.flags & DebugFlags::BREAKPOINT;
            *info = DebugInfo {
                flags: breakpoint,
                ..DebugInfo::default()
            };
        }
    }

    #[inline(always)]
    pub(super) fn record_read(&mut self, address: u16) {
        let info = &mut self.debug[address as usize];
        info.reads = info.reads.wrapping_add(1);
        info.last_cycle = self.cycle;
    }

    #[inline(always)]
    pub(super) fn record_write(&mut self, address: u16) {
        let info = &mut self.debug[address as usize];
        info.writes = info.writes.wrapping_add(1);
        info.last_cycle = self.cycle;
    }

    #[inline(always)]
    pub(super) fn record_opcode(&mut self, address: u16) {
        let info = &mut self.debug[address as usize];
        info.executions = info.executions.wrapping_add(1);
        info.last_cycle = self.cycle;
        info.flags.insert(DebugFlags::OPCODE);
    }

    // === Breakpoints ===

    pub fn set_breakpoint(&mut self, address: u16) {
        self.debug[address as usize].flags.insert(DebugFlags::BREAKPOINT);
        log::debug!("Breakpoint set at ${:04X}", address);
    }

    pub fn clear_breakpoint(&mut self, address: u16) {
        self.debug[address as usize].flags.remove(DebugFlags::BREAKPOINT);
    }

    /// Flip a breakpoint
    ///
    /// # Returns
    ///
    /// Whether a breakpoint is now set
    pub fn toggle_breakpoint(&mut self, address: u16) -> bool {
        let flags = &mut self.debug[address as usize].flags;
        flags.toggle(DebugFlags::BREAKPOINT);
        flags.contains(DebugFlags::BREAKPOINT)
    }

    #[inline(always)]
    pub fn is_breakpoint(&self, address: u16) -> bool {
        self.debug[address as usize]
            .flags
            .contains(DebugFlags::BREAKPOINT)
    }

    /// All breakpoint addresses in ascending order
    pub fn breakpoints(&self) -> Vec<u16> {
        self.debug
            .iter()
            .enumerate()
            .filter(|(_, info)| info.flags.contains(DebugFlags::BREAKPOINT))
            .map(|(address, _)| address as u16)
            .collect()
    }

    pub fn clear_breakpoints(&mut self) {
        for info in self.debug.iter_mut() {
            info.flags.remove(DebugFlags::BREAKPOINT);
        }
    }

    /// Dump touched addresses in a range as a JSON array
    ///
    /// # Arguments
    ///
    /// * `start` - First address (inclusive)
    /// * `end` - Last address (inclusive)
    ///
    /// # Example
    ///
    /// ```
    /// use a2rx::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.set_instrumentation(true);
    /// memory.write(0x0300, 0x42);
    ///
    /// let json = memory.debug_json(0x0300, 0x03FF).unwrap();
    /// assert!(json.contains("\"address\":768"));
    /// assert!(json.contains("\"writes\":1"));
    /// ```
    pub fn debug_json(&self, start: u16, end: u16) -> Result<String> {
        let records: Vec<DebugRecord> = (start..=end)
            .filter_map(|address| {
                let info = &self.debug[address as usize];
                (info.is_touched() || info.flags.contains(DebugFlags::BREAKPOINT)).then(|| {
                    DebugRecord {
                        address,
                        reads: info.reads,
                        writes: info.writes,
                        executions: info.executions,
                        last_cycle: info.last_cycle,
                        opcode: info.flags.contains(DebugFlags::OPCODE),
                        breakpoint: info.flags.contains(DebugFlags::BREAKPOINT),
                    }
                })
            })
            .collect();
        Ok(serde_json::to_string(&records)?)
    }
}
