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

//! Machine test modules
//!
//! - `lifecycle`: construction from settings, reset, shutdown
//! - `events`: periodic events, frames, speaker flushing
//! - `debug`: breakpoints, stepping, tracing and listings
//! - `state`: save state capture and restore
//! - `control`: threaded runner and pause/resume/stop

use super::*;

/// Where test programs are loaded
const PROGRAM_START: u16 = 0x0300;

/// `JMP $0300`
const SPIN_LOOP: [u8; 3] = [0x4C, 0x00, 0x03];

fn test_settings() -> MachineSettings {
    let mut settings = MachineSettings::default();
    settings.cpu.is_throttled = false;
    settings
}

/// Machine with `program` at $0300 and PC pointing at it
fn machine_with_program(program: &[u8]) -> Machine {
    let mut machine = Machine::new(&test_settings());
    machine.load_binary(PROGRAM_START, program);
    machine.cpu_mut().set_pc(PROGRAM_START);
    machine
}

/// 16K system ROM whose reset vector points at `reset`
fn rom_with_reset_vector(reset: u16) -> Vec<u8> {
    let mut rom = vec![0u8; Memory::ROM_SIZE];
    rom[0x3FFC..0x3FFE].copy_from_slice(&reset.to_le_bytes());
    rom
}

mod debug;
mod events;
mod state;
