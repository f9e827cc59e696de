// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Peripheral card trait
//!
//! Slot cards plug into the address space through this trait. The memory
//! dispatcher owns one trait object per slot and routes the slot's windows to it:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                Memory                       │
//! ├─────────────────────────────────────────────┤
//! │  slots: [Option<Rc<RefCell<dyn Card>>>; 8]  │
//! │                                             │
//! │  $C0n0-$C0nF  (n = slot + 8) → read_io      │
//! │  $Cs00-$CsFF  (s = slot)     → read_rom     │
//! │  $C800-$CFFF  (last slot)    → expansion    │
//! └─────────────────────────────────────────────┘
//!           ▲                   ▲
//!           │                   │
//!    ┌──────┴──────┐    ┌──────┴──────┐
//!    │  Disk II    │    │  Joystick   │
//!    └─────────────┘    └─────────────┘
//! ```
//!
//! A handler returning `None` leaves the data bus undriven, and the dispatcher
//! answers with the floating-bus byte.
//!
//! # Example
//!
//! ```
//! use a2rx::core::memory::PeripheralCard;
//!
//! struct Latch {
//!     value: u8,
//! }
//!
//! impl PeripheralCard for Latch {
//!     fn name(&self) -> &'static str {
//!         "Latch"
//!     }
//!
//!     fn read_io(&mut self, offset: u8) -> Option<u8> {
//!         (offset == 0).then_some(self.value)
//!     }
//!
//!     fn write_io(&mut self, offset: u8, value: u8) {
//!         if offset == 0 {
//!             self.value = value;
//!         }
//!     }
//! }
//! ```

/// Peripheral card occupying one of slots 1-7
///
/// Implementations do not need to be `Send`: cards live on the machine thread and
/// are shared with the machine through `Rc<RefCell<_>>`.
pub trait PeripheralCard {
    /// Display name used in logs
    fn name(&self) -> &'static str;

    /// Called once after the machine is assembled
    fn initialize(&mut self) {}

    /// Called on machine reset
    fn reset(&mut self) {}

    /// Called when the machine shuts down; flush anything buffered
    fn uninitialize(&mut self) {}

    /// Device select read ($C080 + slot * $10 + offset)
    ///
    /// # Arguments
    ///
    /// * `offset` - Register offset, 0-15
    ///
    /// # Returns
    ///
    /// The driven byte, or `None` for the floating bus
    fn read_io(&mut self, offset: u8) -> Option<u8>;

    /// Device select write
    fn write_io(&mut self, offset: u8, value: u8);

    /// I/O select ROM read ($Cs00-$CsFF)
    fn read_rom(&self, _offset: u8) -> Option<u8> {
        None
    }

    /// I/O strobe expansion ROM read ($C800-$CFFF)
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset from $C800, 0-$7FF
    fn read_expansion_rom(&self, _offset: u16) -> Option<u8> {
        None
    }
}

/// Card for an unused slot: every read floats, every write is ignored
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySlot;

impl PeripheralCard for EmptySlot {
    fn name(&self) -> &'static str {
        "Empty"
    }

    fn read_io(&mut self, _offset: u8) -> Option<u8> {
        None
    }

    fn write_io(&mut self, _offset: u8, _value: u8) {}
}
