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

//! Speaker toggle recorder
//!
//! Any access to $C030-$C03F flips the speaker cone. The emulator only records
//! the cycle of each flip; turning those stamps into samples is the job of an
//! [`AudioSink`] supplied by the host.

/// Receiver of speaker toggle batches
///
/// Called from the machine thread at every speaker flush event.
pub trait AudioSink {
    /// Consume the toggle stamps recorded since the previous flush
    ///
    /// # Arguments
    ///
    /// * `toggles` - CPU cycle of each toggle, in increasing order
    /// * `level` - Speaker level after the last toggle
    fn flush(&mut self, toggles: &[u64], level: bool);
}

/// Audio sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn flush(&mut self, _toggles: &[u64], _level: bool) {}
}

/// Speaker state
#[derive(Debug, Clone, Default)]
pub struct Speaker {
    /// Current cone position
    level: bool,

    /// Toggle cycles since the last flush
    toggles: Vec<u64>,

    /// Lifetime toggle count
    total_toggles: u64,
}

impl Speaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the speaker at the given CPU cycle
    pub fn toggle(&mut self, cycle: u64) {
        self.level = !self.level;
        self.toggles.push(cycle);
        self.total_toggles += 1;
    }

    /// Hand pending toggles to a sink and clear them
    pub fn flush(&mut self, sink: &mut dyn AudioSink) {
        sink.flush(&self.toggles, self.level);
        self.toggles.clear();
    }

    /// Toggles waiting for the next flush
    pub fn pending(&self) -> &[u64] {
        &self.toggles
    }

    pub fn level(&self) -> bool {
        self.level
    }

    pub fn total_toggles(&self) -> u64 {
        self.total_toggles
    }

    pub(crate) fn restore(&mut self, level: bool) {
        self.level = level;
        self.toggles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        batches: Vec<Vec<u64>>,
    }

    impl AudioSink for RecordingSink {
        fn flush(&mut self, toggles: &[u64], _level: bool) {
            self.batches.push(toggles.to_vec());
        }
    }

    #[test]
    fn test_toggle_and_flush() {
        let mut speaker = Speaker::new();
        speaker.toggle(10);
        speaker.toggle(25);
        assert!(!speaker.level());
        assert_eq!(speaker.pending(), &[10, 25]);

        let mut sink = RecordingSink::default();
        speaker.flush(&mut sink);
        assert_eq!(sink.batches, vec![vec![10, 25]]);
        assert!(speaker.pending().is_empty());
        assert_eq!(speaker.total_toggles(), 2);
    }
}
