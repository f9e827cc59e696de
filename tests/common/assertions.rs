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

//! Custom assertions for machine-level testing

use a2rx::core::Machine;

/// Assert the CPU PC is at the expected address
#[allow(dead_code)]
pub fn assert_pc(machine: &Machine, expected: u16) {
    let actual = machine.cpu().pc();
    assert_eq!(
        actual, expected,
        "PC mismatch: expected ${:04X}, got ${:04X}",
        expected, actual
    );
}

/// Assert memory at `address` holds `expected`, read without side effects
#[allow(dead_code)]
pub fn assert_memory(machine: &Machine, address: u16, expected: &[u8]) {
    for (offset, &byte) in expected.iter().enumerate() {
        let at = address.wrapping_add(offset as u16);
        let actual = machine.memory().peek(at);
        assert_eq!(
            actual, byte,
            "Memory at ${:04X} mismatch: expected ${:02X}, got ${:02X}",
            at, byte, actual
        );
    }
}
