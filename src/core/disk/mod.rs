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

//! Disk II controller
//!
//! The controller is a slot card driving two 5.25" drives through sixteen
//! device select registers:
//!
//! | Offset | Read/write effect |
//! |--------|-------------------|
//! | 0-7    | Stepper phase `offset >> 1` off (even) or on (odd) |
//! | 8 / 9  | Motor off / on |
//! | A / B  | Select drive 1 / 2 |
//! | C      | Shift: read a nibble, or commit the latch in write mode |
//! | D      | Load: sense write protect, or load the latch in write mode |
//! | E / F  | Read mode / write mode |
//!
//! Even offsets return the data latch while the motor runs. With the motor off
//! they alternate between $7E and $7F, which keeps DOS's drive-spin check from
//! hanging. Odd offsets leave the bus floating.
//!
//! Stepper magnet 1 doubles as a write-protect line on this hardware, so
//! committed writes are suppressed while it is energized.

mod drive;
mod nibble;

pub use drive::{
    DiskFormat, Drive, Drive525, DEFAULT_VOLUME, HALF_TRACK_MAX, NIBBLE_IMAGE_SIZE,
    SECTOR_IMAGE_SIZE, TRACK_COUNT, TRACK_NIBBLES,
};

use crate::core::error::{DiskError, EmulatorError, Result, SaveStateError};
use crate::core::memory::PeripheralCard;
use crate::core::save_state::DiskIIState;
use std::path::Path;

/// Number of drives on one controller
pub const DRIVE_COUNT: usize = 2;

/// Size of the controller's boot ROM ($Cs00-$CsFF)
pub const BOOT_ROM_SIZE: usize = 256;

/// Stepper magnet 1 (also forces write protect)
const PHASE1_ON: u8 = 1 << 1;

/// Values returned by even offsets while the motor is off
const SPIN_SENTINELS: [u8; 2] = [0x7F, 0x7E];

/// Disk II controller card
///
/// # Example
///
/// ```
/// use a2rx::core::disk::DiskIIController;
/// use a2rx::core::memory::PeripheralCard;
///
/// let mut controller = DiskIIController::new();
/// controller.read_io(0x9); // motor on
/// assert!(controller.is_motor_on());
/// controller.read_io(0x8); // motor off
/// assert!(!controller.is_motor_on());
/// ```
pub struct DiskIIController {
    drives: [Box<dyn Drive>; DRIVE_COUNT],

    /// 256-byte boot ROM, if loaded
    rom: Option<Vec<u8>>,

    /// Data latch
    latch: u8,

    /// Stepper magnet bitmap (bit n = phase n)
    phases: u8,

    motor_on: bool,

    /// Selected drive (0 or 1)
    drive: usize,

    /// Sequencer in load (as opposed to shift) mode
    load_mode: bool,

    write_mode: bool,

    /// Alternates on motor-off reads
    drive_spin: bool,
}

impl DiskIIController {
    /// Controller with two empty 5.25" drives
    pub fn new() -> Self {
        Self::with_drives(Box::new(Drive525::new()), Box::new(Drive525::new()))
    }

    /// Controller with caller-supplied drives
    pub fn with_drives(drive1: Box<dyn Drive>, drive2: Box<dyn Drive>) -> Self {
        Self {
            drives: [drive1, drive2],
            rom: None,
            latch: 0,
            phases: 0,
            motor_on: false,
            drive: 0,
            load_mode: false,
            write_mode: false,
            drive_spin: false,
        }
    }

    /// Load the 256-byte boot ROM
    ///
    /// # Returns
    ///
    /// - `Ok(())` on success
    /// - `Err(EmulatorError::InvalidRomSize)` if `data` is not 256 bytes
    pub fn load_rom(&mut self, data: &[u8]) -> Result<()> {
        if data.len() != BOOT_ROM_SIZE {
            return Err(EmulatorError::InvalidRomSize {
                expected: BOOT_ROM_SIZE,
                got: data.len(),
            });
        }
        self.rom = Some(data.to_vec());
        log::debug!("Disk II boot ROM loaded");
        Ok(())
    }

    /// Load the boot ROM from a file
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|_| EmulatorError::RomNotFound(path.display().to_string()))?;
        self.load_rom(&data)
    }

    pub fn has_rom(&self) -> bool {
        self.rom.is_some()
    }

    /// Insert a disk image held in memory
    ///
    /// # Arguments
    ///
    /// * `drive` - Drive index, 0 or 1
    /// * `name` - File name; the extension selects DSK/DO/PO/NIB
    /// * `data` - Image contents
    /// * `write_protected` - Refuse writes to the disk
    pub fn insert_disk(
        &mut self,
        drive: usize,
        name: &str,
        data: &[u8],
        write_protected: bool,
    ) -> std::result::Result<(), DiskError> {
        self.drive_mut(drive)?
            .insert_disk(name, data, write_protected)
    }

    /// Insert a disk image from a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use a2rx::core::disk::DiskIIController;
    ///
    /// let mut controller = DiskIIController::new();
    /// controller.insert_disk_file(0, "dos33.dsk", false).unwrap();
    /// ```
    pub fn insert_disk_file<P: AsRef<Path>>(
        &mut self,
        drive: usize,
        path: P,
        write_protected: bool,
    ) -> std::result::Result<(), DiskError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.insert_disk(drive, &name, &data, write_protected)
    }

    /// Remove the disk from a drive, flushing pending writes first
    pub fn eject(&mut self, drive: usize) -> std::result::Result<(), DiskError> {
        self.drive_mut(drive)?.eject();
        Ok(())
    }

    /// Current contents of a drive's disk in its original image format
    pub fn export_image(&mut self, drive: usize) -> std::result::Result<Vec<u8>, DiskError> {
        let media = self.drive_mut(drive)?;
        if !media.has_disk() {
            return Err(DiskError::NoDisk { drive });
        }
        media.export_image()
    }

    pub fn drive(&self, drive: usize) -> Option<&dyn Drive> {
        self.drives.get(drive).map(|drive| &**drive)
    }

    fn drive_mut(&mut self, drive: usize) -> std::result::Result<&mut dyn Drive, DiskError> {
        match self.drives.get_mut(drive) {
            Some(media) => Ok(&mut **media),
            None => Err(DiskError::InvalidDrive(drive)),
        }
    }

    pub fn is_motor_on(&self) -> bool {
        self.motor_on
    }

    /// Selected drive index
    pub fn active_drive(&self) -> usize {
        self.drive
    }

    /// Stepper magnet bitmap
    pub fn phases(&self) -> u8 {
        self.phases
    }

    pub fn latch(&self) -> u8 {
        self.latch
    }

    pub fn is_write_mode(&self) -> bool {
        self.write_mode
    }

    /// Flush the selected drive's track buffer
    pub fn flush(&mut self) {
        self.drives[self.drive].flush_track();
    }

    fn set_phase(&mut self, offset: u8) {
        let phase = (offset >> 1) & 0x03;
        let on = offset & 1;
        self.phases = (self.phases & !(1 << phase)) | (on << phase);
        log::trace!("Disk II: phases {:04b}", self.phases);

        if self.motor_on {
            self.drives[self.drive].apply_phase_change(self.phases);
        }
    }

    fn set_motor(&mut self, on: bool) {
        if self.motor_on && !on {
            self.flush();
        }
        if self.motor_on != on {
            log::trace!("Disk II: motor {}", if on { "on" } else { "off" });
        }
        self.motor_on = on;
    }

    fn select_drive(&mut self, drive: usize) {
        if self.drive != drive {
            self.flush();
            self.drive = drive;
            log::trace!("Disk II: drive {} selected", drive + 1);
        }
    }

    /// Hand the latch to the drive unless magnet 1 forces write protect
    fn write_latch(&mut self) {
        if self.phases & PHASE1_ON == 0 {
            self.drives[self.drive].write(self.latch);
        }
    }

    /// Offsets shared by reads and writes
    fn access_switch(&mut self, offset: u8) {
        match offset {
            0x0..=0x7 => self.set_phase(offset),
            0x8 => self.set_motor(false),
            0x9 => self.set_motor(true),
            0xA => self.select_drive(0),
            0xB => self.select_drive(1),
            0xC => self.load_mode = false,
            0xD => self.load_mode = true,
            0xE => self.write_mode = false,
            _ => self.write_mode = true,
        }
    }

    /// Capture controller and drive state
    pub fn save_state(&self) -> DiskIIState {
        DiskIIState {
            latch: self.latch,
            phases: self.phases,
            motor_on: self.motor_on,
            drive: self.drive as u8,
            load_mode: self.load_mode,
            write_mode: self.write_mode,
            drive_spin: self.drive_spin,
            drives: self.drives.iter().map(|drive| drive.save_state()).collect(),
        }
    }

    /// Restore controller and drive state
    ///
    /// The state is validated before anything is changed.
    pub fn load_state(&mut self, state: &DiskIIState) -> std::result::Result<(), SaveStateError> {
        state.validate()?;

        self.latch = state.latch;
        self.phases = state.phases;
        self.motor_on = state.motor_on;
        self.drive = state.drive as usize;
        self.load_mode = state.load_mode;
        self.write_mode = state.write_mode;
        self.drive_spin = state.drive_spin;
        for (drive, drive_state) in self.drives.iter_mut().zip(&state.drives) {
            drive.load_state(drive_state);
        }
        Ok(())
    }
}

impl Default for DiskIIController {
    fn default() -> Self {
        Self::new()
    }
}

impl PeripheralCard for DiskIIController {
    fn name(&self) -> &'static str {
        "Disk II"
    }

    fn reset(&mut self) {
        self.phases = 0;
        self.set_motor(false);
        self.select_drive(0);
        self.load_mode = false;
        self.write_mode = false;
    }

    fn uninitialize(&mut self) {
        self.flush();
    }

    fn read_io(&mut self, offset: u8) -> Option<u8> {
        let offset = offset & 0x0F;
        self.access_switch(offset);

        match offset {
            0xC if self.motor_on => {
                if !self.write_mode {
                    self.latch = self.drives[self.drive].read();
                    return Some(self.latch);
                }
                self.write_latch();
            }
            0xD if self.motor_on && !self.write_mode => {
                self.latch &= 0x7F;
                if self.drives[self.drive].is_write_protected() || self.phases & PHASE1_ON != 0 {
                    self.latch |= 0x80;
                }
            }
            _ => {}
        }

        if offset & 1 != 0 {
            return None;
        }
        if self.motor_on {
            return Some(self.latch);
        }
        self.drive_spin = !self.drive_spin;
        Some(SPIN_SENTINELS[self.drive_spin as usize])
    }

    fn write_io(&mut self, offset: u8, value: u8) {
        let offset = offset & 0x0F;
        self.access_switch(offset);

        if offset == 0xC && self.write_mode {
            self.write_latch();
        }
        if self.motor_on && self.write_mode && self.load_mode {
            self.latch = value;
        }
    }

    fn read_rom(&self, offset: u8) -> Option<u8> {
        self.rom.as_ref().map(|rom| rom[offset as usize])
    }
}
