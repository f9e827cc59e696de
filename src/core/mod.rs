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

//! Core emulation components
//!
//! This module contains all hardware emulation components:
//! - CPU (MOS 6502 / WDC 65C02)
//! - Memory (bank-switched IIe address space and soft switches)
//! - Disk II controller and 5.25" drives
//! - Peripherals (keyboard, speaker, game port, video scanner, slot cards)
//! - Event scheduling
//! - Machine integration

pub mod config;
pub mod cpu;
pub mod disk;
pub mod error;
pub mod machine;
pub mod memory;
pub mod peripherals;
pub mod save_state;
pub mod timing;

// Re-export commonly used types
pub use config::MachineSettings;
pub use cpu::{CpuVariant, CPU};
pub use disk::DiskIIController;
pub use error::{DiskError, EmulatorError, Result, SaveStateError};
pub use machine::{Machine, MachineControl, MachineRunner, MachineState};
pub use memory::Memory;
pub use timing::EventQueue;
