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

//! Periodic machine events

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Sink that keeps every toggle it is handed
struct RecordingSink(Rc<RefCell<Vec<u64>>>);

impl AudioSink for RecordingSink {
    fn flush(&mut self, toggles: &[u64], _level: bool) {
        self.0.borrow_mut().extend_from_slice(toggles);
    }
}

#[test]
fn test_periodic_events_scheduled() {
    let machine = Machine::new(&test_settings());
    let events = machine.events();

    assert_eq!(events.len(), 2);
    assert_eq!(events.find_pending_delay(MachineEvent::VerticalBlank), 17030);
    assert_eq!(events.find_pending_delay(MachineEvent::FlushSpeaker), 8515);
}

#[test]
fn test_run_frame() {
    let mut machine = machine_with_program(&SPIN_LOOP);

    assert_eq!(machine.run_frame(), None);
    assert_eq!(machine.frame_count(), 1);
    assert!(machine.cycles() >= FRAME_CYCLES as u64);

    // The next vertical blank is a frame after the previous one, minus overshoot
    let next = machine
        .events()
        .find_pending_delay(MachineEvent::VerticalBlank);
    assert!((FRAME_CYCLES - 2..=FRAME_CYCLES).contains(&next), "{next}");

    machine.run_frame();
    assert_eq!(machine.frame_count(), 2);
    assert_eq!(machine.events().len(), 2);
}

#[test]
fn test_frames_stay_aligned() {
    let mut machine = machine_with_program(&SPIN_LOOP);

    for _ in 0..10 {
        machine.run_frame();
    }

    // Lateness carries over instead of accumulating
    let cycles = machine.cycles();
    assert!(cycles >= 10 * FRAME_CYCLES as u64);
    assert!(cycles < 10 * FRAME_CYCLES as u64 + 3);
}

#[test]
fn test_speaker_flush_reaches_sink() {
    let toggles = Rc::new(RefCell::new(Vec::new()));
    let mut machine = machine_with_program(&[
        0xAD, 0x30, 0xC0, // LDA $C030
        0x4C, 0x00, 0x03, // JMP $0300
    ]);
    machine.set_audio_sink(Box::new(RecordingSink(toggles.clone())));

    machine.run_cycles(SPEAKER_FLUSH_CYCLES as u64 + 7);

    let toggles = toggles.borrow();
    assert!(toggles.len() > 1000, "{} toggles", toggles.len());
    assert!(toggles.windows(2).all(|pair| pair[1] - pair[0] == 7));
    assert!(machine.memory().speaker().pending().len() <= 2);
}

#[test]
fn test_speaker_toggles_wait_for_flush() {
    let mut machine = machine_with_program(&[0xAD, 0x30, 0xC0, 0x4C, 0x00, 0x03]);

    machine.run_cycles(700);

    assert_eq!(machine.memory().speaker().pending().len(), 100);
    assert_eq!(machine.memory().speaker().total_toggles(), 100);
}
