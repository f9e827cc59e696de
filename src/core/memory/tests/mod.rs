// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Memory Tests
//!
//! Tests for the IIe address space, organized into logical categories:
//!
//! - `banking`: Auxiliary memory, ALTZP and 80STORE display banking
//! - `language_card`: $C080-$C08F bank switching and write enable sequence
//! - `slots`: Card dispatch, expansion ROM selection and internal ROM
//! - `io`: Keyboard, speaker, game port and status registers
//! - `debug`: Access counters and breakpoints
//! - `helpers`: Common test utilities

use super::*;

mod debug;
mod helpers;
mod language_card;
