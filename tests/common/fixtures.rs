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

//! Test fixtures for machine-level scenarios

use a2rx::core::disk::SECTOR_IMAGE_SIZE;
use a2rx::core::{Machine, MachineSettings};
use std::path::{Path, PathBuf};

/// Write `data` to `dir/name`
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("Failed to write fixture file");
    path
}

/// A DOS-order disk image with a recognizable byte pattern
#[allow(dead_code)]
pub fn sector_image() -> Vec<u8> {
    (0..SECTOR_IMAGE_SIZE).map(|i| (i * 13 % 251) as u8).collect()
}

/// Unthrottled settings booting `rom`
#[allow(dead_code)]
pub fn settings_with_rom(rom: &Path) -> MachineSettings {
    let mut settings = MachineSettings::default();
    settings.cpu.is_throttled = false;
    settings.rom.system = Some(rom.to_path_buf());
    settings
}

/// Build a machine from settings, panicking with the error on failure
#[allow(dead_code)]
pub fn create_machine(settings: &MachineSettings) -> Machine {
    Machine::from_settings(settings).unwrap_or_else(|e| panic!("Machine setup failed: {}", e))
}
