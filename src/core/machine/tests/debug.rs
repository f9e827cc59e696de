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

//! Breakpoints, stepping and debug output

use super::*;

/// INX, INX, JMP $0300
const COUNT_LOOP: [u8; 5] = [0xE8, 0xE8, 0x4C, 0x00, 0x03];

#[test]
fn test_breakpoint_stops_step() {
    let mut machine = machine_with_program(&SPIN_LOOP);
    machine.set_breakpoint(PROGRAM_START);

    assert_eq!(machine.step(), StepResult::Breakpoint(PROGRAM_START));
    assert_eq!(machine.cycles(), 0);

    // Single-stepping executes the flagged instruction
    assert_eq!(machine.single_step(), 3);
    assert_eq!(machine.step(), StepResult::Breakpoint(PROGRAM_START));

    machine.clear_breakpoint(PROGRAM_START);
    assert_eq!(machine.step(), StepResult::Executed(3));
}

#[test]
fn test_run_cycles_stops_at_breakpoint() {
    let mut machine = machine_with_program(&COUNT_LOOP);
    machine.set_breakpoint(0x0302);

    assert_eq!(machine.run_cycles(1000), (4, Some(0x0302)));
    assert_eq!(machine.cpu().x(), 2);
    assert_eq!(machine.cpu().pc(), 0x0302);
}

#[test]
fn test_run_frame_stops_at_breakpoint() {
    let mut machine = machine_with_program(&COUNT_LOOP);
    machine.set_breakpoint(0x0301);

    assert_eq!(machine.run_frame(), Some(0x0301));
    assert_eq!(machine.frame_count(), 0);
    assert_eq!(machine.cpu().x(), 1);
}

#[test]
fn test_run_cycles_overshoots_by_one_instruction() {
    let mut machine = machine_with_program(&SPIN_LOOP);
    assert_eq!(machine.run_cycles(10), (12, None));
}

#[test]
fn test_disassemble() {
    let machine = machine_with_program(&[0xA9, 0x01]);
    assert_eq!(machine.disassemble(PROGRAM_START), ("LDA #$01".to_string(), 2));
}

#[test]
fn test_export_listing() {
    let machine = machine_with_program(&COUNT_LOOP);
    let listing = machine.export_listing(0x0300, 0x0304);

    assert!(listing.contains("L_0300"));
    assert!(listing.contains("INX"));
}

#[test]
fn test_tracing_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.log");
    let mut machine = machine_with_program(&COUNT_LOOP);

    machine.enable_tracing(&path, Some(2)).unwrap();
    assert!(machine.is_tracing());
    for _ in 0..5 {
        machine.single_step();
    }
    machine.disable_tracing();
    assert!(!machine.is_tracing());

    let trace = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = trace.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("0300"));
    assert!(lines[1].starts_with("0301"));
}

#[test]
fn test_debug_json() {
    let mut settings = test_settings();
    settings.debug.instrumentation = true;
    let mut machine = Machine::new(&settings);
    machine.load_binary(PROGRAM_START, &SPIN_LOOP);
    machine.cpu_mut().set_pc(PROGRAM_START);

    machine.single_step();
    machine.single_step();

    let json = machine.debug_json(0x0300, 0x0302).unwrap();
    assert!(json.contains("\"address\":768"));
    assert!(json.contains("\"executions\":2"));
}

#[test]
fn test_input_setters() {
    let mut machine = Machine::new(&test_settings());

    machine.press_key(b'A' | 0x80);
    assert_eq!(machine.memory_mut().read(0xC000), 0xC1);
    machine.release_key();

    machine.set_button(0, true);
    assert_eq!(machine.memory_mut().read(0xC061) & 0x80, 0x80);

    machine.set_paddle(2, 0);
    assert_eq!(machine.memory().game_port().paddle(2), 0);
}
