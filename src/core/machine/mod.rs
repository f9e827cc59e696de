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

//! Machine integration
//!
//! Ties the CPU, the address space, the slot cards and the event queue into a
//! complete Apple IIe and provides the emulation loop.
//!
//! # Execution model
//!
//! Everything runs on one thread. Each [`Machine::step`] executes one
//! instruction, advances the event queue by the cycles it consumed and
//! dispatches every event that became due before returning. Breakpoints are
//! consulted before the fetch; [`Machine::single_step`] executes regardless.
//!
//! Two periodic events keep the queue populated:
//! - [`MachineEvent::VerticalBlank`] once per 17030-cycle frame
//! - [`MachineEvent::FlushSpeaker`] twice per frame, handing speaker toggles to
//!   the [`AudioSink`]
//!
//! Cross-thread control lives in [`control`].

pub mod control;

#[cfg(test)]
mod tests;

pub use control::{MachineControl, MachineRunner, MachineState, Pacer, RunOptions, RunSummary};

use crate::core::config::MachineSettings;
use crate::core::cpu::{CpuTracer, CpuVariant, Disassembler, CPU};
use crate::core::disk::DiskIIController;
use crate::core::error::{EmulatorError, Result, SaveStateError};
use crate::core::memory::{Memory, SlotCard};
use crate::core::peripherals::video::CYCLES_PER_FRAME;
use crate::core::peripherals::{AudioSink, JoystickCard, JoystickState, NullAudioSink};
use crate::core::save_state::{
    EventState, SaveState, SaveStateMetadata, SpeakerState, SAVE_STATE_SIGNATURE,
    SAVE_STATE_VERSION,
};
use crate::core::timing::{EventQueue, TickCount};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Cycles between vertical blank events
pub const FRAME_CYCLES: TickCount = CYCLES_PER_FRAME as TickCount;

/// Cycles between speaker flushes
pub const SPEAKER_FLUSH_CYCLES: TickCount = FRAME_CYCLES / 2;

/// Scheduled machine events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum MachineEvent {
    /// Start of vertical blank; counts frames
    VerticalBlank,
    /// Hand recorded speaker toggles to the audio sink
    FlushSpeaker,
}

/// Outcome of [`Machine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// One instruction ran, consuming this many cycles
    Executed(u32),
    /// Execution stopped before the breakpoint at this address
    Breakpoint(u16),
}

/// Apple IIe
///
/// # Example
/// ```
/// use a2rx::core::{Machine, MachineSettings};
///
/// let mut machine = Machine::new(&MachineSettings::default());
/// machine.load_binary(0x0300, &[0xA9, 0x01, 0x69, 0x01, 0x8D, 0x00, 0x20]);
/// machine.cpu_mut().set_pc(0x0300);
///
/// let cycles = machine.run_cycles(8);
/// assert_eq!(cycles, (8, None));
/// assert_eq!(machine.memory().peek(0x2000), 0x02);
/// ```
pub struct Machine {
    cpu: CPU,
    memory: Memory,
    events: EventQueue<MachineEvent>,

    /// Disk II card, if installed
    disk_ii: Option<Rc<RefCell<DiskIIController>>>,

    /// Joystick card, if installed
    joystick_card: Option<Rc<RefCell<JoystickCard>>>,

    audio: Box<dyn AudioSink>,

    /// CPU tracer for debugging (optional)
    tracer: Option<CpuTracer>,

    /// Vertical blanks since power-on
    frame_count: u64,

    /// Pace to real time (read by the runner)
    is_throttled: bool,
}

impl Machine {
    /// Assemble a machine from settings without touching the file system
    ///
    /// Cards are installed in their configured slots, but no ROM or disk is
    /// loaded; use [`from_settings`](Self::from_settings) for that.
    pub fn new(settings: &MachineSettings) -> Self {
        let variant = if settings.cpu.is_65c02 {
            CpuVariant::Cmos65C02
        } else {
            CpuVariant::Nmos6502
        };

        let mut machine = Self {
            cpu: CPU::new(variant),
            memory: Memory::new(),
            events: EventQueue::new(),
            disk_ii: None,
            joystick_card: None,
            audio: Box::new(NullAudioSink),
            tracer: None,
            frame_count: 0,
            is_throttled: settings.cpu.is_throttled,
        };
        machine.schedule_periodic_events();
        machine
            .memory
            .set_instrumentation(settings.debug.instrumentation);

        if settings.disk_ii.slot != 0 {
            let disk_ii = Rc::new(RefCell::new(DiskIIController::new()));
            if machine.install_card(settings.disk_ii.slot, disk_ii.clone()) {
                machine.disk_ii = Some(disk_ii);
            }
        }
        if let Some(slot) = settings.joystick_card.slot {
            let joystick = Rc::new(RefCell::new(JoystickCard::new()));
            if machine.install_card(slot, joystick.clone()) {
                machine.joystick_card = Some(joystick);
            }
        }

        log::info!("Machine created: {}", machine.cpu.variant().name());
        machine
    }

    /// Build a machine and load everything the settings name
    ///
    /// Loads the system ROM, the Disk II boot ROM and both disks, opens the
    /// tracer, then initializes and resets the machine.
    ///
    /// # Errors
    ///
    /// The first ROM, disk or trace file that fails to load.
    pub fn from_settings(settings: &MachineSettings) -> Result<Self> {
        settings.validate()?;
        let mut machine = Self::new(settings);

        if let Some(path) = &settings.rom.system {
            machine.memory.load_rom(&path.to_string_lossy())?;
        }

        match &machine.disk_ii {
            Some(disk_ii) => {
                let mut disk_ii = disk_ii.borrow_mut();
                if let Some(path) = &settings.rom.disk_ii {
                    disk_ii.load_rom_file(path)?;
                }
                for (drive, disk) in [&settings.disk_ii.disk1, &settings.disk_ii.disk2]
                    .into_iter()
                    .enumerate()
                {
                    if let Some(path) = disk.path() {
                        disk_ii.insert_disk_file(drive, path, disk.is_write_protected)?;
                    }
                }
            }
            None => {
                if settings.disk_ii.disk1.path().is_some() || settings.disk_ii.disk2.path().is_some() {
                    log::warn!("Disks configured but no Disk II card is installed");
                }
            }
        }

        if let Some(path) = &settings.debug.trace_file {
            machine.enable_tracing(path, settings.debug.trace_limit)?;
        }

        machine.initialize();
        Ok(machine)
    }

    fn install_card(&mut self, slot: usize, card: SlotCard) -> bool {
        match self.memory.set_slot(slot, card) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Card not installed: {}", e);
                false
            }
        }
    }

    fn schedule_periodic_events(&mut self) {
        self.events.clear();
        self.events.schedule(FRAME_CYCLES, MachineEvent::VerticalBlank);
        self.events
            .schedule(SPEAKER_FLUSH_CYCLES, MachineEvent::FlushSpeaker);
    }

    /// Initialize the cards and reset the machine
    pub fn initialize(&mut self) {
        for (_, card) in self.memory.cards() {
            card.borrow_mut().initialize();
        }
        log::info!("Machine initialized");
        self.reset();
    }

    /// Press the reset key
    ///
    /// Resets banking, every card and the CPU. RAM contents, disks and the
    /// event schedule survive.
    pub fn reset(&mut self) {
        self.memory.reset();
        for (_, card) in self.memory.cards() {
            card.borrow_mut().reset();
        }
        self.cpu.reset(&mut self.memory);
        log::info!("Machine reset: PC=${:04X}", self.cpu.pc());
    }

    /// Shut the machine down, flushing disk writes and the trace file
    pub fn uninitialize(&mut self) {
        for (_, card) in self.memory.cards() {
            card.borrow_mut().uninitialize();
        }
        if let Some(tracer) = &mut self.tracer {
            if let Err(e) = tracer.flush() {
                log::warn!("Failed to flush trace: {}", e);
            }
        }
        log::info!("Machine uninitialized after {} frames", self.frame_count);
    }

    /// Execute one instruction unless a breakpoint is set at PC
    pub fn step(&mut self) -> StepResult {
        let pc = self.cpu.pc();
        if self.memory.is_breakpoint(pc) {
            log::info!("Breakpoint hit at ${:04X}", pc);
            return StepResult::Breakpoint(pc);
        }
        StepResult::Executed(self.single_step())
    }

    /// Execute one instruction, ignoring breakpoints
    ///
    /// # Returns
    ///
    /// Cycles consumed
    pub fn single_step(&mut self) -> u32 {
        if let Some(tracer) = &mut self.tracer {
            if let Err(e) = tracer.trace(&self.cpu, &self.memory) {
                log::warn!("Failed to write trace, tracing disabled: {}", e);
                self.tracer = None;
            }
        }

        let cycles = self.cpu.step(&mut self.memory);
        self.events.advance(cycles as TickCount);
        while let Some(event) = self.events.pop_due() {
            self.handle_event(event);
        }
        cycles
    }

    fn handle_event(&mut self, event: MachineEvent) {
        match event {
            MachineEvent::VerticalBlank => {
                self.frame_count += 1;
                self.events.schedule(FRAME_CYCLES, MachineEvent::VerticalBlank);
                log::trace!("Vertical blank: frame {}", self.frame_count);
            }
            MachineEvent::FlushSpeaker => {
                self.memory.speaker_mut().flush(self.audio.as_mut());
                self.events
                    .schedule(SPEAKER_FLUSH_CYCLES, MachineEvent::FlushSpeaker);
            }
        }
    }

    /// Run for at least `cycles` cycles
    ///
    /// # Returns
    ///
    /// Cycles actually run, and the breakpoint address if one stopped execution
    /// early
    pub fn run_cycles(&mut self, cycles: u64) -> (u64, Option<u16>) {
        let mut elapsed = 0;
        while elapsed < cycles {
            match self.step() {
                StepResult::Executed(consumed) => elapsed += consumed as u64,
                StepResult::Breakpoint(pc) => return (elapsed, Some(pc)),
            }
        }
        (elapsed, None)
    }

    /// Run until the next vertical blank
    ///
    /// # Returns
    ///
    /// The breakpoint address if one stopped execution early
    pub fn run_frame(&mut self) -> Option<u16> {
        let frame = self.frame_count;
        while self.frame_count == frame {
            if let StepResult::Breakpoint(pc) = self.step() {
                return Some(pc);
            }
        }
        None
    }

    /// Copy a binary into main RAM
    pub fn load_binary(&mut self, address: u16, data: &[u8]) {
        self.memory.write_main_ram(address, data);
        log::debug!("Loaded {} bytes at ${:04X}", data.len(), address);
    }

    // === Save states ===

    /// Capture the complete machine state
    pub fn save_state(&self) -> SaveState {
        SaveState {
            signature: SAVE_STATE_SIGNATURE.to_string(),
            version: SAVE_STATE_VERSION.to_string(),
            metadata: SaveStateMetadata {
                timestamp: chrono::Utc::now(),
                frame_count: self.frame_count,
            },
            cpu: self.cpu.save_state(),
            memory: self.memory.save_state(),
            events: EventState {
                pending: self.events.pending(),
                frame_count: self.frame_count,
            },
            disk_ii: self
                .disk_ii
                .as_ref()
                .map(|disk_ii| disk_ii.borrow().save_state()),
            speaker: SpeakerState {
                level: self.memory.speaker().level(),
            },
        }
    }

    /// Restore a captured state
    ///
    /// The whole state is validated first; on error the machine is unchanged.
    pub fn load_state(&mut self, state: &SaveState) -> std::result::Result<(), SaveStateError> {
        state.validate()?;
        if state.disk_ii.is_some() != self.disk_ii.is_some() {
            return Err(SaveStateError::Corrupt(
                "Disk II card configuration differs from the saved machine".to_string(),
            ));
        }

        self.memory.load_state(&state.memory)?;
        if let (Some(disk_ii), Some(disk_state)) = (&self.disk_ii, &state.disk_ii) {
            disk_ii.borrow_mut().load_state(disk_state)?;
        }
        self.cpu.load_state(&state.cpu);
        self.events.restore(&state.events.pending);
        self.frame_count = state.events.frame_count;
        self.memory.speaker_mut().restore(state.speaker.level);

        log::info!(
            "Loaded save state from {} (frame {})",
            state.metadata.timestamp,
            state.metadata.frame_count
        );
        Ok(())
    }

    pub fn save_state_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_state().save_to_file(path.as_ref())?;
        log::info!("Saved state to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_state_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let state = SaveState::load_from_file(path)?;
        self.load_state(&state)?;
        Ok(())
    }

    // === Debugging ===

    /// Write a trace line per instruction to `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Trace file, overwritten
    /// * `limit` - Stop after this many instructions (None for unbounded)
    pub fn enable_tracing<P: AsRef<Path>>(&mut self, path: P, limit: Option<u64>) -> Result<()> {
        let mut tracer = CpuTracer::new(&path.as_ref().to_string_lossy())?;
        tracer.set_limit(limit);
        self.tracer = Some(tracer);
        Ok(())
    }

    pub fn disable_tracing(&mut self) {
        if let Some(mut tracer) = self.tracer.take() {
            if let Err(e) = tracer.flush() {
                log::warn!("Failed to flush trace: {}", e);
            }
            log::info!("CPU tracing disabled after {} instructions", tracer.count());
        }
    }

    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    pub fn set_breakpoint(&mut self, address: u16) {
        self.memory.set_breakpoint(address);
    }

    pub fn clear_breakpoint(&mut self, address: u16) {
        self.memory.clear_breakpoint(address);
    }

    /// Disassemble one instruction without side effects
    ///
    /// # Returns
    ///
    /// The instruction text and its length in bytes
    pub fn disassemble(&self, address: u16) -> (String, u16) {
        Disassembler::disassemble(&self.memory, address, self.cpu.variant())
    }

    /// Assembly listing of `start..=end` with labels at branch targets
    pub fn export_listing(&self, start: u16, end: u16) -> String {
        Disassembler::export_listing(&self.memory, start, end, self.cpu.variant())
    }

    /// JSON dump of touched addresses in `start..=end`
    pub fn debug_json(&self, start: u16, end: u16) -> Result<String> {
        self.memory.debug_json(start, end)
    }

    // === Input ===

    pub fn press_key(&mut self, key: u8) {
        self.memory.keyboard_mut().press_key(key);
    }

    pub fn release_key(&mut self) {
        self.memory.keyboard_mut().release_key();
    }

    pub fn set_button(&mut self, index: usize, pressed: bool) {
        self.memory.game_port_mut().set_button(index, pressed);
    }

    pub fn set_paddle(&mut self, index: usize, position: u8) {
        self.memory.game_port_mut().set_paddle(index, position);
    }

    /// Set one joystick card port
    ///
    /// # Errors
    ///
    /// `EmulatorError::Config` if no joystick card is installed
    pub fn set_joystick(&mut self, port: usize, state: JoystickState) -> Result<()> {
        let card = self
            .joystick_card
            .as_ref()
            .ok_or_else(|| EmulatorError::Config("No joystick card installed".to_string()))?;
        card.borrow_mut().set_port(port, state);
        Ok(())
    }

    // === Accessors ===

    pub fn set_audio_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.audio = sink;
    }

    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Shared handle to the Disk II card
    pub fn disk_ii(&self) -> Option<Rc<RefCell<DiskIIController>>> {
        self.disk_ii.clone()
    }

    pub fn events(&self) -> &EventQueue<MachineEvent> {
        &self.events
    }

    /// Total CPU cycles since power-on
    pub fn cycles(&self) -> u64 {
        self.cpu.cycles()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_throttled(&self) -> bool {
        self.is_throttled
    }
}
