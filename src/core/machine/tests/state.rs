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

//! Save state capture and restore

use super::*;
use crate::core::disk::{Drive, NIBBLE_IMAGE_SIZE};
use tempfile::NamedTempFile;

/// INX, JMP $0300
const COUNT_LOOP: [u8; 4] = [0xE8, 0x4C, 0x00, 0x03];

fn running_machine() -> Machine {
    let mut machine = machine_with_program(&COUNT_LOOP);
    machine
        .disk_ii()
        .unwrap()
        .borrow_mut()
        .insert_disk(1, "raw.nib", &vec![0x96; NIBBLE_IMAGE_SIZE], true)
        .unwrap();
    machine.run_cycles(20_000);
    machine
}

#[test]
fn test_state_round_trip() {
    let mut machine = running_machine();
    let state = machine.save_state();

    let mut restored = Machine::new(&test_settings());
    restored.load_state(&state).unwrap();

    assert_eq!(restored.cpu().save_state(), machine.cpu().save_state());
    assert_eq!(restored.memory().main_ram(), machine.memory().main_ram());
    assert_eq!(restored.frame_count(), 1);
    assert_eq!(restored.events().pending(), machine.events().pending());

    let disk_ii = restored.disk_ii().unwrap();
    assert!(disk_ii.borrow().drive(1).unwrap().has_disk());
    assert!(disk_ii.borrow().drive(1).unwrap().is_write_protected());

    // Both continue identically
    machine.run_cycles(5000);
    restored.run_cycles(5000);
    assert_eq!(restored.cpu().save_state(), machine.cpu().save_state());
    assert_eq!(
        restored
            .events()
            .find_pending_delay(MachineEvent::VerticalBlank),
        machine.events().find_pending_delay(MachineEvent::VerticalBlank)
    );
}

#[test]
fn test_state_file_round_trip() {
    let file = NamedTempFile::new().unwrap();
    let machine = running_machine();
    machine.save_state_to_file(file.path()).unwrap();

    let mut restored = Machine::new(&test_settings());
    restored.load_state_from_file(file.path()).unwrap();

    assert_eq!(restored.cpu().pc(), machine.cpu().pc());
    assert_eq!(restored.cpu().x(), machine.cpu().x());
}

#[test]
fn test_invalid_state_leaves_machine_untouched() {
    let mut state = running_machine().save_state();
    state.memory.main.truncate(16);

    let mut machine = machine_with_program(&SPIN_LOOP);
    assert!(matches!(
        machine.load_state(&state),
        Err(SaveStateError::Corrupt(_))
    ));
    assert_eq!(machine.cpu().pc(), PROGRAM_START);
    assert_eq!(machine.cpu().x(), 0);
    assert_eq!(machine.frame_count(), 0);
}

#[test]
fn test_negative_event_delay_is_rejected() {
    let mut state = running_machine().save_state();
    state.events.pending[0].0 = -5;

    let mut machine = machine_with_program(&SPIN_LOOP);
    let pending = machine.events().pending();
    assert!(matches!(
        machine.load_state(&state),
        Err(SaveStateError::Corrupt(_))
    ));
    assert_eq!(machine.cpu().pc(), PROGRAM_START);
    assert_eq!(machine.cpu().x(), 0);
    assert_eq!(machine.events().pending(), pending);
    assert_eq!(machine.memory().main_ram()[0x0300], SPIN_LOOP[0]);
}

#[test]
fn test_version_mismatch() {
    let mut state = running_machine().save_state();
    state.version = "0.0.1-alpha".to_string();

    let mut machine = Machine::new(&test_settings());
    assert!(matches!(
        machine.load_state(&state),
        Err(SaveStateError::VersionMismatch { .. })
    ));
}

#[test]
fn test_signature_mismatch_from_file() {
    let file = NamedTempFile::new().unwrap();
    let mut state = running_machine().save_state();
    state.signature = "NOPE".to_string();
    state.save_to_file(file.path()).unwrap();

    let mut machine = Machine::new(&test_settings());
    assert!(matches!(
        machine.load_state_from_file(file.path()),
        Err(EmulatorError::SaveState(SaveStateError::SignatureMismatch { .. }))
    ));
}

#[test]
fn test_card_configuration_mismatch() {
    let state = running_machine().save_state();

    let mut settings = test_settings();
    settings.disk_ii.slot = 0;
    let mut machine = Machine::new(&settings);

    assert!(machine.load_state(&state).is_err());
}
