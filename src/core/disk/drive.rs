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

//! 5.25" drive model
//!
//! A [`Drive525`] holds the inserted disk as 35 nibble tracks and streams the
//! current track past the read/write head one nibble per access. The track
//! under the head is buffered; writes go to the buffer and reach the media on
//! [`Drive::flush_track`].
//!
//! # Head Positioning
//!
//! The stepper has four magnets. The head sits on half-track `n` when magnet
//! `n & 3` holds it; energizing the next magnet pulls it in one half-track,
//! energizing the previous one pulls it out.

use super::nibble;
use crate::core::error::DiskError;
use crate::core::save_state::{DiskMediaState, DriveState};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TRACK_COUNT: usize = 35;
pub const SECTOR_COUNT: usize = 16;
pub const SECTOR_SIZE: usize = 256;

/// Nibbles per track
pub const TRACK_NIBBLES: usize = 6656;

/// Size of a DSK/DO/PO image
pub const SECTOR_IMAGE_SIZE: usize = TRACK_COUNT * SECTOR_COUNT * SECTOR_SIZE;

/// Size of a NIB image
pub const NIBBLE_IMAGE_SIZE: usize = TRACK_COUNT * TRACK_NIBBLES;

/// Outermost reachable half-track
pub const HALF_TRACK_MAX: u8 = 69;

/// Volume number written into nibblized address fields
pub const DEFAULT_VOLUME: u8 = 254;

/// Value read with no disk in the drive
const NO_DISK: u8 = 0xFF;

/// Physical sector to DOS 3.3 image sector
const DOS_ORDER: [usize; SECTOR_COUNT] = [0, 7, 14, 6, 13, 5, 12, 4, 11, 3, 10, 2, 9, 1, 8, 15];

/// Physical sector to ProDOS image sector
const PRODOS_ORDER: [usize; SECTOR_COUNT] = [0, 8, 1, 9, 2, 10, 3, 11, 4, 12, 5, 13, 6, 14, 7, 15];

/// Disk image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum DiskFormat {
    /// DOS 3.3 sector order (.dsk, .do)
    Dos33,
    /// ProDOS sector order (.po)
    ProDos,
    /// Raw nibble tracks (.nib)
    Nibble,
}

impl DiskFormat {
    /// Pick the format from a file name extension
    ///
    /// # Example
    ///
    /// ```
    /// use a2rx::core::disk::DiskFormat;
    ///
    /// assert_eq!(DiskFormat::from_name("Games.DSK").unwrap(), DiskFormat::Dos33);
    /// assert_eq!(DiskFormat::from_name("system.po").unwrap(), DiskFormat::ProDos);
    /// assert!(DiskFormat::from_name("notes.txt").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self, DiskError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| extension.to_ascii_lowercase());

        match extension.as_deref() {
            Some("dsk") | Some("do") => Ok(DiskFormat::Dos33),
            Some("po") => Ok(DiskFormat::ProDos),
            Some("nib") => Ok(DiskFormat::Nibble),
            _ => Err(DiskError::UnsupportedFormat(name.to_string())),
        }
    }

    /// Expected image file size
    pub fn image_size(self) -> usize {
        match self {
            DiskFormat::Dos33 | DiskFormat::ProDos => SECTOR_IMAGE_SIZE,
            DiskFormat::Nibble => NIBBLE_IMAGE_SIZE,
        }
    }

    fn sector_order(self) -> Option<&'static [usize; SECTOR_COUNT]> {
        match self {
            DiskFormat::Dos33 => Some(&DOS_ORDER),
            DiskFormat::ProDos => Some(&PRODOS_ORDER),
            DiskFormat::Nibble => None,
        }
    }
}

/// A drive attached to the Disk II controller
pub trait Drive {
    /// Nibble under the head; advances the disk
    fn read(&mut self) -> u8;

    /// Write a nibble under the head; advances the disk
    fn write(&mut self, value: u8);

    /// React to the controller's stepper magnet bitmap (bit n = phase n)
    fn apply_phase_change(&mut self, phases: u8);

    /// Write the buffered track back to the media
    fn flush_track(&mut self);

    fn is_write_protected(&self) -> bool;

    /// Insert a disk image
    ///
    /// # Arguments
    ///
    /// * `name` - File name; its extension selects the format
    /// * `data` - Image contents
    /// * `write_protected` - Whether writes are refused
    fn insert_disk(&mut self, name: &str, data: &[u8], write_protected: bool)
        -> Result<(), DiskError>;

    fn has_disk(&self) -> bool {
        false
    }

    fn eject(&mut self) {}

    /// Current media in its original file format
    fn export_image(&mut self) -> Result<Vec<u8>, DiskError> {
        Err(DiskError::UnsupportedFormat(
            "drive does not support image export".to_string(),
        ))
    }

    fn save_state(&self) -> DriveState {
        DriveState::default()
    }

    /// Restore from a state that has already been validated
    fn load_state(&mut self, _state: &DriveState) {}
}

/// Inserted disk
#[derive(Debug, Clone)]
struct Disk {
    name: String,
    format: DiskFormat,
    write_protected: bool,
    /// All tracks, `TRACK_COUNT * TRACK_NIBBLES` nibbles
    nibbles: Vec<u8>,
}

/// Disk II 5.25" drive
#[derive(Debug, Clone)]
pub struct Drive525 {
    disk: Option<Disk>,

    /// Head position in half-tracks (0-69)
    half_track: u8,

    /// Nibble under the head within the track
    offset: usize,

    /// Buffer of the track under the head
    track: Vec<u8>,

    /// Track currently held in `track`
    loaded_track: Option<usize>,

    /// `track` differs from the media
    dirty: bool,
}

impl Drive525 {
    pub fn new() -> Self {
        Self {
            disk: None,
            half_track: 0,
            offset: 0,
            track: vec![0; TRACK_NIBBLES],
            loaded_track: None,
            dirty: false,
        }
    }

    /// Head position in half-tracks
    pub fn half_track(&self) -> u8 {
        self.half_track
    }

    /// Whole track under the head
    pub fn track_number(&self) -> usize {
        (self.half_track / 2) as usize
    }

    /// Name of the inserted disk
    pub fn disk_name(&self) -> Option<&str> {
        self.disk.as_ref().map(|disk| disk.name.as_str())
    }

    pub fn format(&self) -> Option<DiskFormat> {
        self.disk.as_ref().map(|disk| disk.format)
    }

    /// Whether the track buffer holds unflushed writes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Make sure the track under the head is buffered
    fn load_track(&mut self) -> bool {
        let track = self.track_number();
        if self.loaded_track == Some(track) {
            return true;
        }
        let Some(disk) = &self.disk else {
            return false;
        };

        let start = track * TRACK_NIBBLES;
        self.track
            .copy_from_slice(&disk.nibbles[start..start + TRACK_NIBBLES]);
        self.loaded_track = Some(track);
        log::trace!("Drive: track {} loaded", track);
        true
    }

    fn advance(&mut self) {
        self.offset = (self.offset + 1) % TRACK_NIBBLES;
    }

    /// Media contents including unflushed writes
    fn current_nibbles(&self) -> Option<Vec<u8>> {
        let disk = self.disk.as_ref()?;
        let mut nibbles = disk.nibbles.clone();
        if let (true, Some(track)) = (self.dirty, self.loaded_track) {
            let start = track * TRACK_NIBBLES;
            nibbles[start..start + TRACK_NIBBLES].copy_from_slice(&self.track);
        }
        Some(nibbles)
    }
}

impl Default for Drive525 {
    fn default() -> Self {
        Self::new()
    }
}

impl Drive for Drive525 {
    fn read(&mut self) -> u8 {
        if !self.load_track() {
            return NO_DISK;
        }
        let value = self.track[self.offset];
        self.advance();
        value
    }

    fn write(&mut self, value: u8) {
        if self.is_write_protected() || !self.load_track() {
            log::trace!("Drive: write ${:02X} ignored", value);
            return;
        }
        self.track[self.offset] = value;
        self.dirty = true;
        self.advance();
    }

    fn apply_phase_change(&mut self, phases: u8) {
        let position = self.half_track;
        let mut direction = 0i8;
        if phases & (1 << ((position + 1) & 3)) != 0 {
            direction += 1;
        }
        if phases & (1 << ((position + 3) & 3)) != 0 {
            direction -= 1;
        }
        if direction == 0 {
            return;
        }

        let target = (position as i8 + direction).clamp(0, HALF_TRACK_MAX as i8) as u8;
        if target != position {
            if target / 2 != position / 2 {
                self.flush_track();
                self.loaded_track = None;
            }
            self.half_track = target;
            log::trace!("Drive: head at half-track {}", target);
        }
    }

    fn flush_track(&mut self) {
        if !self.dirty {
            return;
        }
        if let (Some(disk), Some(track)) = (self.disk.as_mut(), self.loaded_track) {
            let start = track * TRACK_NIBBLES;
            disk.nibbles[start..start + TRACK_NIBBLES].copy_from_slice(&self.track);
            log::debug!("Drive: flushed track {} of {}", track, disk.name);
        }
        self.dirty = false;
    }

    fn is_write_protected(&self) -> bool {
        self.disk.as_ref().is_some_and(|disk| disk.write_protected)
    }

    fn insert_disk(
        &mut self,
        name: &str,
        data: &[u8],
        write_protected: bool,
    ) -> Result<(), DiskError> {
        let format = DiskFormat::from_name(name)?;
        let expected = format.image_size();
        if data.len() != expected {
            return Err(DiskError::InvalidImageSize {
                name: name.to_string(),
                expected,
                got: data.len(),
            });
        }

        let nibbles = match format.sector_order() {
            Some(order) => nibblize(data, order),
            None => data.to_vec(),
        };

        self.flush_track();
        self.disk = Some(Disk {
            name: name.to_string(),
            format,
            write_protected,
            nibbles,
        });
        self.loaded_track = None;
        self.dirty = false;

        log::debug!(
            "Drive: inserted {} ({:?}{})",
            name,
            format,
            if write_protected { ", write protected" } else { "" }
        );
        Ok(())
    }

    fn has_disk(&self) -> bool {
        self.disk.is_some()
    }

    fn eject(&mut self) {
        self.flush_track();
        if let Some(disk) = self.disk.take() {
            log::debug!("Drive: ejected {}", disk.name);
        }
        self.loaded_track = None;
    }

    fn export_image(&mut self) -> Result<Vec<u8>, DiskError> {
        self.flush_track();
        let Some(disk) = &self.disk else {
            return Err(DiskError::UnsupportedFormat("no disk inserted".to_string()));
        };

        match disk.format.sector_order() {
            Some(order) => denibblize(&disk.nibbles, order),
            None => Ok(disk.nibbles.clone()),
        }
    }

    fn save_state(&self) -> DriveState {
        let media = self.disk.as_ref().zip(self.current_nibbles()).map(|(disk, nibbles)| {
            DiskMediaState {
                name: disk.name.clone(),
                format: disk.format,
                write_protected: disk.write_protected,
                nibbles,
            }
        });

        DriveState {
            half_track: self.half_track,
            offset: self.offset as u32,
            media,
        }
    }

    fn load_state(&mut self, state: &DriveState) {
        self.half_track = state.half_track;
        self.offset = state.offset as usize;
        self.disk = state.media.as_ref().map(|media| Disk {
            name: media.name.clone(),
            format: media.format,
            write_protected: media.write_protected,
            nibbles: media.nibbles.clone(),
        });
        self.loaded_track = None;
        self.dirty = false;
    }
}

/// Encode a whole sector image into nibble tracks
fn nibblize(data: &[u8], order: &[usize; SECTOR_COUNT]) -> Vec<u8> {
    let track_bytes = SECTOR_COUNT * SECTOR_SIZE;
    data.chunks(track_bytes)
        .enumerate()
        .flat_map(|(track, sectors)| {
            nibble::encode_track(sectors, track as u8, DEFAULT_VOLUME, order)
        })
        .collect()
}

/// Decode nibble tracks back into a sector image
fn denibblize(nibbles: &[u8], order: &[usize; SECTOR_COUNT]) -> Result<Vec<u8>, DiskError> {
    let mut image = Vec::with_capacity(SECTOR_IMAGE_SIZE);
    for (track, nibbles) in nibbles.chunks(TRACK_NIBBLES).enumerate() {
        image.extend(nibble::decode_track(nibbles, track, order)?);
    }
    Ok(image)
}
