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

//! GCR track encoding for 16-sector disks
//!
//! Sector images are stored on the emulated media as nibble tracks: each
//! physical sector gets a 4-and-4 encoded address field and a 6-and-2 encoded
//! data field, separated by self-sync gaps.
//!
//! # Track Layout
//!
//! ```text
//! gap1 (48 x $FF)
//! 16 x [ D5 AA 96 | vol trk sec sum | DE AA EB | gap2 (6 x $FF)
//!        D5 AA AD | 342 data + 1 checksum | DE AA EB | gap3 (27 x $FF) ]
//! padding ($FF) to 6656 nibbles
//! ```

use super::drive::{SECTOR_COUNT, SECTOR_SIZE, TRACK_NIBBLES};
use crate::core::error::DiskError;

const ADDRESS_PROLOGUE: [u8; 3] = [0xD5, 0xAA, 0x96];
const DATA_PROLOGUE: [u8; 3] = [0xD5, 0xAA, 0xAD];
const EPILOGUE: [u8; 3] = [0xDE, 0xAA, 0xEB];

const GAP1: usize = 48;
const GAP2: usize = 6;
const GAP3: usize = 27;
const SYNC: u8 = 0xFF;

/// Length of an address field including prologue and epilogue
const ADDRESS_FIELD_LEN: usize = 14;

/// 6-bit values split into the auxiliary and primary buffers
const AUX_LEN: usize = 86;
const ENCODED_LEN: usize = 342;

/// How far past an address field the data prologue is searched for
const DATA_SEARCH_WINDOW: usize = 64;

/// 6-and-2 write translate table
const WRITE_TABLE: [u8; 64] = [
    0x96, 0x97, 0x9A, 0x9B, 0x9D, 0x9E, 0x9F, 0xA6, 0xA7, 0xAB, 0xAC, 0xAD, 0xAE, 0xAF, 0xB2, 0xB3,
    0xB4, 0xB5, 0xB6, 0xB7, 0xB9, 0xBA, 0xBB, 0xBC, 0xBD, 0xBE, 0xBF, 0xCB, 0xCD, 0xCE, 0xCF, 0xD3,
    0xD6, 0xD7, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE, 0xDF, 0xE5, 0xE6, 0xE7, 0xE9, 0xEA, 0xEB, 0xEC,
    0xED, 0xEE, 0xEF, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF9, 0xFA, 0xFB, 0xFC, 0xFD, 0xFE, 0xFF,
];

/// Marker for nibbles outside the write table
const INVALID: u8 = 0xFF;

/// Inverse of [`WRITE_TABLE`]
const READ_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < WRITE_TABLE.len() {
        table[WRITE_TABLE[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Encode one track of sector data
///
/// # Arguments
///
/// * `sectors` - 16 sectors of 256 bytes, in image order
/// * `track` - Track number written into the address fields
/// * `volume` - Volume number written into the address fields
/// * `order` - Image sector stored at each physical sector
pub(super) fn encode_track(
    sectors: &[u8],
    track: u8,
    volume: u8,
    order: &[usize; SECTOR_COUNT],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(TRACK_NIBBLES);
    out.resize(GAP1, SYNC);

    for (physical, &logical) in order.iter().enumerate() {
        let sector = physical as u8;
        out.extend_from_slice(&ADDRESS_PROLOGUE);
        for value in [volume, track, sector, volume ^ track ^ sector] {
            out.extend_from_slice(&encode_4and4(value));
        }
        out.extend_from_slice(&EPILOGUE);
        out.resize(out.len() + GAP2, SYNC);

        out.extend_from_slice(&DATA_PROLOGUE);
        let start = logical * SECTOR_SIZE;
        encode_6and2(&sectors[start..start + SECTOR_SIZE], &mut out);
        out.extend_from_slice(&EPILOGUE);
        out.resize(out.len() + GAP3, SYNC);
    }

    out.resize(TRACK_NIBBLES, SYNC);
    out
}

/// Decode one nibble track back to sector data in image order
///
/// The track is scanned circularly, so a sector split across the end of the
/// buffer is still found.
///
/// # Errors
///
/// `DiskError::UnreadableSector` for the first sector without a valid address
/// and data field
pub(super) fn decode_track(
    nibbles: &[u8],
    track: usize,
    order: &[usize; SECTOR_COUNT],
) -> Result<Vec<u8>, DiskError> {
    let len = nibbles.len();
    let at = |index: usize| nibbles[index % len];
    let has_pattern = |index: usize, pattern: &[u8; 3]| {
        (0..3).all(|offset| at(index + offset) == pattern[offset])
    };

    let mut sectors = vec![0u8; SECTOR_COUNT * SECTOR_SIZE];
    let mut found = [false; SECTOR_COUNT];

    let mut index = 0;
    while index < len && found.iter().any(|&done| !done) {
        if !has_pattern(index, &ADDRESS_PROLOGUE) {
            index += 1;
            continue;
        }

        let field = |n: usize| decode_4and4(at(index + 3 + 2 * n), at(index + 4 + 2 * n));
        let (volume, track_field, sector, checksum) = (field(0), field(1), field(2), field(3));
        let sector = sector as usize;

        if volume ^ track_field ^ sector as u8 == checksum && sector < SECTOR_COUNT {
            let search = index + ADDRESS_FIELD_LEN;
            let data = (search..search + DATA_SEARCH_WINDOW).find(|&i| has_pattern(i, &DATA_PROLOGUE));
            if let Some(data) = data {
                let raw: Vec<u8> = (0..=ENCODED_LEN).map(|k| at(data + 3 + k)).collect();
                if let Some(bytes) = decode_6and2(&raw) {
                    let start = order[sector] * SECTOR_SIZE;
                    sectors[start..start + SECTOR_SIZE].copy_from_slice(&bytes);
                    found[sector] = true;
                }
            }
        }
        index += ADDRESS_FIELD_LEN;
    }

    match found.iter().position(|&done| !done) {
        Some(sector) => Err(DiskError::UnreadableSector { track, sector }),
        None => Ok(sectors),
    }
}

#[inline]
fn encode_4and4(value: u8) -> [u8; 2] {
    [(value >> 1) | 0xAA, value | 0xAA]
}

#[inline]
fn decode_4and4(odd: u8, even: u8) -> u8 {
    ((odd << 1) | 0x01) & even
}

/// Encode 256 bytes as 342 translated 6-bit values plus a checksum nibble
fn encode_6and2(data: &[u8], out: &mut Vec<u8>) {
    let mut buffer = [0u8; ENCODED_LEN];
    for (i, &value) in data.iter().enumerate() {
        let swapped = ((value & 0x01) << 1) | ((value & 0x02) >> 1);
        buffer[i % AUX_LEN] |= swapped << (2 * (i / AUX_LEN));
        buffer[AUX_LEN + i] = value >> 2;
    }

    let mut previous = 0;
    for &value in buffer.iter() {
        out.push(WRITE_TABLE[(value ^ previous) as usize]);
        previous = value;
    }
    out.push(WRITE_TABLE[previous as usize]);
}

/// Decode 343 data nibbles, verifying the checksum
fn decode_6and2(nibbles: &[u8]) -> Option<[u8; SECTOR_SIZE]> {
    let mut buffer = [0u8; ENCODED_LEN];
    let mut previous = 0u8;
    for (slot, &nibble) in buffer.iter_mut().zip(nibbles) {
        let value = READ_TABLE[nibble as usize];
        if value == INVALID {
            return None;
        }
        previous ^= value;
        *slot = previous;
    }

    let checksum = READ_TABLE[*nibbles.get(ENCODED_LEN)? as usize];
    if checksum != previous {
        return None;
    }

    let mut data = [0u8; SECTOR_SIZE];
    for (i, byte) in data.iter_mut().enumerate() {
        let bits = (buffer[i % AUX_LEN] >> (2 * (i / AUX_LEN))) & 0x03;
        let low = ((bits & 0x01) << 1) | ((bits & 0x02) >> 1);
        *byte = (buffer[AUX_LEN + i] << 2) | low;
    }
    Some(data)
}
