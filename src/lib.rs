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

//! Apple IIe emulator core library
//!
//! This library provides the core emulation components for an Apple IIe class
//! machine: the 6502/65C02 CPU, the bank-switched address space, the Disk II
//! controller and the event scheduler that ties their timing together.
//!
//! # Example
//!
//! ```
//! use a2rx::core::cpu::{CpuVariant, CPU};
//! use a2rx::core::memory::Memory;
//!
//! let mut cpu = CPU::new(CpuVariant::Nmos6502);
//! let mut memory = Memory::new();
//!
//! // LDA #$42
//! memory.write(0x0300, 0xA9);
//! memory.write(0x0301, 0x42);
//! cpu.set_pc(0x0300);
//!
//! let cycles = cpu.step(&mut memory);
//! assert_eq!(cycles, 2);
//! assert_eq!(cpu.a(), 0x42);
//! ```

pub mod core;
