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

//! Save state serialization
//!
//! A save state captures everything needed to resume the machine exactly where
//! it stopped: CPU registers, both 64K RAM banks with the soft switch state, the
//! pending event queue, the Disk II controller with its drives and media, and
//! the speaker level.
//!
//! # Format
//!
//! States are encoded with bincode. The stream starts with the signature
//! [`SAVE_STATE_SIGNATURE`] followed by the crate version string; both are
//! checked before the rest of the stream is decoded, so a foreign or
//! incompatible file fails without touching the machine.
//!
//! # Example
//!
//! ```no_run
//! use a2rx::core::save_state::SaveState;
//! use a2rx::core::{Machine, MachineSettings};
//!
//! let mut machine = Machine::new(&MachineSettings::default());
//! machine.run_frame();
//!
//! let state = machine.save_state();
//! state.save_to_file("save.a2s").unwrap();
//!
//! let loaded = SaveState::load_from_file("save.a2s").unwrap();
//! machine.load_state(&loaded).unwrap();
//! ```

use crate::core::disk::{DiskFormat, DRIVE_COUNT, HALF_TRACK_MAX, NIBBLE_IMAGE_SIZE, TRACK_NIBBLES};
use crate::core::error::SaveStateError;
use crate::core::machine::MachineEvent;
use crate::core::memory::Memory;
use bincode::{config, Decode, Encode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Leading tag of every save state
pub const SAVE_STATE_SIGNATURE: &str = "A2RX";

/// Format version, tied to the crate version
pub const SAVE_STATE_VERSION: &str = env!("CARGO_PKG_VERSION");

type StateResult<T> = std::result::Result<T, SaveStateError>;

/// Complete machine save state
///
/// Field order is the stream order.
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct SaveState {
    pub signature: String,
    pub version: String,
    pub metadata: SaveStateMetadata,
    pub cpu: CpuState,
    pub memory: MemoryState,
    pub events: EventState,
    /// Absent when no Disk II card is installed
    pub disk_ii: Option<DiskIIState>,
    pub speaker: SpeakerState,
}

/// When the state was taken
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode)]
#[bincode(encode_bounds = "", decode_bounds = "")]
pub struct SaveStateMetadata {
    #[bincode(with_serde)]
    pub timestamp: DateTime<Utc>,

    /// Frames emulated since power-on
    pub frame_count: u64,
}

/// CPU registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    /// Status register bits
    pub p: u8,
    pub cycles: u64,
    pub is_65c02: bool,
    pub irq_line: bool,
    pub nmi_pending: bool,
    pub jammed: bool,
}

/// RAM banks and soft switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct MemoryState {
    /// Main 64K bank, including language card RAM
    pub main: Vec<u8>,
    /// Auxiliary 64K bank
    pub aux: Vec<u8>,
    /// [`SoftSwitches`](crate::core::memory::SoftSwitches) bits
    pub switches: u32,
    pub lc_prewrite: bool,
    pub expansion_slot: Option<u8>,
    pub keyboard_latch: u8,
    pub keyboard_strobe: bool,
}

impl MemoryState {
    pub fn validate(&self) -> StateResult<()> {
        if self.main.len() != Memory::RAM_SIZE || self.aux.len() != Memory::RAM_SIZE {
            return Err(SaveStateError::Corrupt(format!(
                "RAM banks are {}/{} bytes, expected {}",
                self.main.len(),
                self.aux.len(),
                Memory::RAM_SIZE
            )));
        }
        if let Some(slot) = self.expansion_slot {
            if slot == 0 || slot > 7 {
                return Err(SaveStateError::Corrupt(format!(
                    "Expansion ROM slot {} out of range",
                    slot
                )));
            }
        }
        Ok(())
    }
}

/// Pending events as absolute delays, head first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct EventState {
    pub pending: Vec<(i32, MachineEvent)>,
    pub frame_count: u64,
}

impl EventState {
    pub fn validate(&self) -> StateResult<()> {
        if self.pending.is_empty() {
            return Err(SaveStateError::Corrupt("Event queue is empty".to_string()));
        }
        if let Some((delay, event)) = self.pending.iter().find(|(delay, _)| *delay < 0) {
            return Err(SaveStateError::Corrupt(format!(
                "Event {:?} has negative delay {}",
                event, delay
            )));
        }
        if self.pending.windows(2).any(|pair| pair[0].0 > pair[1].0) {
            return Err(SaveStateError::Corrupt(
                "Event queue is out of order".to_string(),
            ));
        }
        Ok(())
    }
}

/// Disk II controller registers and both drives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct DiskIIState {
    pub latch: u8,
    pub phases: u8,
    pub motor_on: bool,
    pub drive: u8,
    pub load_mode: bool,
    pub write_mode: bool,
    pub drive_spin: bool,
    pub drives: Vec<DriveState>,
}

impl DiskIIState {
    pub fn validate(&self) -> StateResult<()> {
        if self.drives.len() != DRIVE_COUNT {
            return Err(SaveStateError::Corrupt(format!(
                "Disk II state has {} drives, expected {}",
                self.drives.len(),
                DRIVE_COUNT
            )));
        }
        if self.drive as usize >= DRIVE_COUNT {
            return Err(SaveStateError::Corrupt(format!(
                "Selected drive {} out of range",
                self.drive
            )));
        }
        if self.phases > 0x0F {
            return Err(SaveStateError::Corrupt(format!(
                "Invalid phase bitmap {:#04X}",
                self.phases
            )));
        }
        self.drives.iter().try_for_each(DriveState::validate)
    }
}

/// Head position and media of one drive
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct DriveState {
    pub half_track: u8,
    pub offset: u32,
    pub media: Option<DiskMediaState>,
}

impl DriveState {
    pub fn validate(&self) -> StateResult<()> {
        if self.half_track > HALF_TRACK_MAX {
            return Err(SaveStateError::Corrupt(format!(
                "Half-track {} out of range",
                self.half_track
            )));
        }
        if self.offset as usize >= TRACK_NIBBLES {
            return Err(SaveStateError::Corrupt(format!(
                "Track offset {} out of range",
                self.offset
            )));
        }
        match &self.media {
            Some(media) if media.nibbles.len() != NIBBLE_IMAGE_SIZE => {
                Err(SaveStateError::Corrupt(format!(
                    "Disk {} has {} nibbles, expected {}",
                    media.name,
                    media.nibbles.len(),
                    NIBBLE_IMAGE_SIZE
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Inserted disk, stored as nibbles so unflushed writes survive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct DiskMediaState {
    pub name: String,
    pub format: DiskFormat,
    pub write_protected: bool,
    pub nibbles: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct SpeakerState {
    pub level: bool,
}

impl SaveState {
    /// Check the header and every component before anything is applied
    pub fn validate(&self) -> StateResult<()> {
        Self::check_header(&self.signature, &self.version)?;
        self.memory.validate()?;
        self.events.validate()?;
        if let Some(disk_ii) = &self.disk_ii {
            disk_ii.validate()?;
        }
        Ok(())
    }

    /// Encode into a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> StateResult<()> {
        let encoded = bincode::encode_to_vec(self, config::standard())?;
        writer.write_all(&encoded)?;
        log::debug!("Encoded save state: {} bytes", encoded.len());
        Ok(())
    }

    /// Decode from a reader
    ///
    /// # Errors
    ///
    /// - `SignatureMismatch` if the stream is not an a2rx save state
    /// - `VersionMismatch` if it was written by another crate version
    /// - `Decode` if the stream is truncated or malformed
    pub fn read_from<R: Read>(reader: &mut R) -> StateResult<Self> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;

        let ((signature, version), _): ((String, String), usize) =
            bincode::decode_from_slice(&buffer, config::standard())?;
        Self::check_header(&signature, &version)?;

        let (state, _): (SaveState, usize) =
            bincode::decode_from_slice(&buffer, config::standard())?;
        Ok(state)
    }

    fn check_header(signature: &str, version: &str) -> StateResult<()> {
        if signature != SAVE_STATE_SIGNATURE {
            return Err(SaveStateError::SignatureMismatch {
                expected: SAVE_STATE_SIGNATURE.to_string(),
                found: signature.to_string(),
            });
        }
        if version != SAVE_STATE_VERSION {
            return Err(SaveStateError::VersionMismatch {
                expected: SAVE_STATE_VERSION.to_string(),
                found: version.to_string(),
            });
        }
        Ok(())
    }

    /// Write the state to a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use a2rx::core::{Machine, MachineSettings};
    /// # let machine = Machine::new(&MachineSettings::default());
    /// machine.save_state().save_to_file("save.a2s").unwrap();
    /// ```
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> StateResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a state from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StateResult<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }
}
