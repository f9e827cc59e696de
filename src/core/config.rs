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

//! Machine settings
//!
//! Settings are stored as TOML. Every section and field is optional; anything
//! missing takes its default, so an empty file describes a stock enhanced IIe
//! with a Disk II card in slot 6.
//!
//! ```toml
//! [cpu]
//! is_65c02 = true
//! is_throttled = true
//!
//! [rom]
//! system = "roms/apple2e-enhanced.rom"
//! disk_ii = "roms/disk2.rom"
//!
//! [disk_ii]
//! slot = 6
//! disk1 = { name = "disks/dos33.dsk", is_write_protected = false }
//!
//! [joystick_card]
//! slot = 4
//!
//! [debug]
//! instrumentation = false
//! trace_file = "trace.log"
//! trace_limit = 100000
//! ```

use crate::core::error::{EmulatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Slot the Disk II card occupies unless configured otherwise
pub const DEFAULT_DISK_II_SLOT: usize = 6;

/// Complete machine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    pub cpu: CpuSettings,
    pub rom: RomSettings,
    pub disk_ii: DiskIISettings,
    pub joystick_card: JoystickCardSettings,
    pub debug: DebugSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuSettings {
    /// Enhanced IIe (65C02) instead of the original 6502
    pub is_65c02: bool,
    /// Pace emulation to real time
    pub is_throttled: bool,
}

impl Default for CpuSettings {
    fn default() -> Self {
        Self {
            is_65c02: true,
            is_throttled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RomSettings {
    /// 12K or 16K system ROM image for $C000/$D000-$FFFF
    pub system: Option<PathBuf>,
    /// 256-byte Disk II boot ROM
    pub disk_ii: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskIISettings {
    /// Slot 1-7, or 0 to leave the card out
    pub slot: usize,
    pub disk1: DiskSettings,
    pub disk2: DiskSettings,
}

impl Default for DiskIISettings {
    fn default() -> Self {
        Self {
            slot: DEFAULT_DISK_II_SLOT,
            disk1: DiskSettings::default(),
            disk2: DiskSettings::default(),
        }
    }
}

/// Image to insert at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskSettings {
    /// Image path; empty for no disk
    pub name: String,
    pub is_write_protected: bool,
}

impl DiskSettings {
    pub fn path(&self) -> Option<&Path> {
        (!self.name.is_empty()).then(|| Path::new(&self.name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickCardSettings {
    /// Slot 1-7; no card when absent
    pub slot: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Count memory accesses per address
    pub instrumentation: bool,
    /// Write a CPU trace to this file
    pub trace_file: Option<PathBuf>,
    /// Stop tracing after this many instructions
    pub trace_limit: Option<u64>,
}

impl MachineSettings {
    /// Read settings from a TOML file
    ///
    /// # Returns
    ///
    /// - `Ok(MachineSettings)` with defaults for anything the file leaves out
    /// - `Err(EmulatorError::Io)` if the file cannot be read
    /// - `Err(EmulatorError::Config)` if it is not valid settings TOML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&text)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from TOML text
    ///
    /// # Example
    ///
    /// ```
    /// use a2rx::core::MachineSettings;
    ///
    /// let settings = MachineSettings::from_toml_str("[cpu]\nis_65c02 = false\n").unwrap();
    /// assert!(!settings.cpu.is_65c02);
    /// assert!(settings.cpu.is_throttled);
    /// assert_eq!(settings.disk_ii.slot, 6);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(text).map_err(|e| EmulatorError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EmulatorError::Config(e.to_string()))
    }

    /// Write settings to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_toml_string()?)?;
        log::info!("Saved settings to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject slot assignments the machine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.disk_ii.slot > 7 {
            return Err(EmulatorError::Config(format!(
                "Disk II slot {} out of range (0-7)",
                self.disk_ii.slot
            )));
        }
        if let Some(slot) = self.joystick_card.slot {
            if slot == 0 || slot > 7 {
                return Err(EmulatorError::Config(format!(
                    "Joystick card slot {} out of range (1-7)",
                    slot
                )));
            }
            if slot == self.disk_ii.slot {
                return Err(EmulatorError::Config(format!(
                    "Joystick card and Disk II both configured for slot {}",
                    slot
                )));
            }
        }
        Ok(())
    }
}
