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

/// Emulator error types
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("ROM file not found: {0}")]
    RomNotFound(String),

    #[error("Invalid ROM size: {got} bytes (expected {expected})")]
    InvalidRomSize { expected: usize, got: usize },

    #[error("Invalid slot number: {0} (valid range: 1-7)")]
    InvalidSlot(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Disk error: {0}")]
    Disk(#[from] DiskError),

    #[error("Save state error: {0}")]
    SaveState(#[from] SaveStateError),

    #[error("Machine thread panicked")]
    ThreadPanic,
}

/// Disk-specific error types
#[derive(Error, Debug)]
pub enum DiskError {
    #[error("No disk inserted in drive {drive}")]
    NoDisk { drive: usize },

    #[error("Invalid drive number: {0} (valid range: 0-1)")]
    InvalidDrive(usize),

    #[error("Invalid disk image size for {name}: {got} bytes (expected {expected})")]
    InvalidImageSize {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Unsupported disk image format: {0}")]
    UnsupportedFormat(String),

    #[error("Unreadable sector {sector} on track {track}")]
    UnreadableSector { track: usize, sector: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Save state error types
#[derive(Error, Debug)]
pub enum SaveStateError {
    #[error("Invalid save state signature: expected {expected:?}, found {found:?}")]
    SignatureMismatch { expected: String, found: String },

    #[error("Incompatible save state version: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },

    #[error("Corrupt save state: {0}")]
    Corrupt(String),

    #[error("Encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
