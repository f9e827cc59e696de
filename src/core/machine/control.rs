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

//! Cross-thread machine control
//!
//! The machine is `!Send`: its slot cards are shared through `Rc<RefCell<_>>`.
//! [`MachineRunner`] therefore builds the machine on its own thread from a `Send`
//! factory closure, and other threads steer it through a cloneable
//! [`MachineControl`].
//!
//! Requests are cooperative and only observed between instructions:
//!
//! ```text
//!   Stopped ──spawn──► Starting ──factory ok──► Running ◄──────┐
//!                                                 │   ▲         │
//!                                 pause/breakpoint│   │resume   │
//!                                                 ▼   │         │
//!                                   Pausing ──► Paused ─────────┘
//!
//!   any state ──stop──► Stopping ──loop exits──► Stopped
//! ```

use super::{Machine, StepResult};
use crate::core::error::{EmulatorError, Result};
use crate::core::save_state::SaveState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Real-time length of one frame (59.92 Hz)
pub const FRAME_DURATION: Duration = Duration::from_nanos(16_688_918);

/// Execution state seen by the controlling thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Stopped,
    Starting,
    Running,
    /// Pause requested, not yet observed by the machine thread
    Pausing,
    Paused,
    /// Stop requested, not yet observed by the machine thread
    Stopping,
}

struct Shared {
    state: Mutex<MachineState>,
    changed: Condvar,
    /// Set whenever the machine thread has to look at `state`
    attention: AtomicBool,
}

/// Handle for pausing, resuming and stopping a running machine
///
/// # Example
/// ```
/// use a2rx::core::{MachineControl, MachineState};
///
/// let control = MachineControl::new();
/// assert_eq!(control.state(), MachineState::Stopped);
///
/// // Nothing is running, so there is nothing to pause
/// control.pause();
/// assert_eq!(control.state(), MachineState::Stopped);
/// ```
#[derive(Clone)]
pub struct MachineControl {
    shared: Arc<Shared>,
}

impl MachineControl {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(MachineState::Stopped),
                changed: Condvar::new(),
                attention: AtomicBool::new(false),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MachineState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `next` and wake every waiter
    fn transition(&self, state: &mut MutexGuard<'_, MachineState>, next: MachineState) {
        log::debug!("Machine state {:?} -> {:?}", **state, next);
        **state = next;
        self.shared.attention.store(true, Ordering::Release);
        self.shared.changed.notify_all();
    }

    pub fn state(&self) -> MachineState {
        *self.lock()
    }

    /// Ask a running machine to pause after the current instruction
    pub fn pause(&self) {
        let mut state = self.lock();
        if *state == MachineState::Running {
            self.transition(&mut state, MachineState::Pausing);
        }
    }

    /// Let a paused (or pausing) machine continue
    pub fn resume(&self) {
        let mut state = self.lock();
        if matches!(*state, MachineState::Paused | MachineState::Pausing) {
            self.transition(&mut state, MachineState::Running);
        }
    }

    /// Ask the machine thread to exit
    pub fn stop(&self) {
        let mut state = self.lock();
        if !matches!(*state, MachineState::Stopped | MachineState::Stopping) {
            self.transition(&mut state, MachineState::Stopping);
        }
    }

    /// Block until `done` accepts the state or `timeout` elapses
    ///
    /// # Returns
    ///
    /// The state when waiting ended
    pub fn wait_until<F>(&self, timeout: Duration, mut done: F) -> MachineState
    where
        F: FnMut(MachineState) -> bool,
    {
        let state = self.lock();
        let (state, _) = self
            .shared
            .changed
            .wait_timeout_while(state, timeout, |state| !done(*state))
            .unwrap_or_else(PoisonError::into_inner);
        *state
    }

    // === Machine thread side ===

    pub(crate) fn set_state(&self, next: MachineState) {
        let mut state = self.lock();
        self.transition(&mut state, next);
    }

    /// Starting -> Running, unless a stop arrived in the meantime
    pub(crate) fn mark_started(&self) {
        let mut state = self.lock();
        if *state == MachineState::Starting {
            self.transition(&mut state, MachineState::Running);
        }
    }

    /// Park after a breakpoint until resumed or stopped
    pub(crate) fn enter_breakpoint(&self) {
        let mut state = self.lock();
        if *state == MachineState::Running {
            self.transition(&mut state, MachineState::Paused);
        }
    }

    /// Instruction-boundary check
    ///
    /// Blocks while paused.
    ///
    /// # Returns
    ///
    /// false once the machine should stop
    pub(crate) fn checkpoint(&self) -> bool {
        if !self.shared.attention.load(Ordering::Acquire) {
            return true;
        }

        let mut state = self.lock();
        loop {
            match *state {
                MachineState::Pausing => {
                    self.transition(&mut state, MachineState::Paused);
                    log::info!("Machine paused");
                }
                MachineState::Paused => {
                    state = self
                        .shared
                        .changed
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                MachineState::Stopping | MachineState::Stopped => return false,
                MachineState::Running | MachineState::Starting => {
                    self.shared.attention.store(false, Ordering::Release);
                    return true;
                }
            }
        }
    }
}

impl Default for MachineControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleeps away the rest of each frame to hold real-time speed
#[derive(Debug)]
pub struct Pacer {
    frame: Duration,
    time: Instant,
}

impl Pacer {
    pub fn new() -> Self {
        Self::with_frame(FRAME_DURATION)
    }

    pub fn with_frame(frame: Duration) -> Self {
        Self {
            frame,
            time: Instant::now(),
        }
    }

    /// Sleep until one frame has passed since the previous call
    pub fn wait(&mut self) {
        std::thread::sleep(self.frame.saturating_sub(self.time.elapsed()));
        self.time = Instant::now();
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

/// How long and how fast the runner executes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Pace frames to real time
    pub throttled: bool,
    /// Stop after this many frames
    pub frame_limit: Option<u64>,
    /// Stop after this many cycles
    pub cycle_limit: Option<u64>,
}

/// What the machine thread leaves behind
///
/// The machine itself cannot leave its thread, so the runner hands back a save
/// state of its final condition.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Frames run by this runner
    pub frames: u64,
    /// Cycles run by this runner
    pub cycles: u64,
    pub state: SaveState,
}

/// Runs a machine on a dedicated thread
///
/// # Example
/// ```no_run
/// use a2rx::core::{Machine, MachineRunner, MachineSettings};
/// use a2rx::core::machine::RunOptions;
///
/// let runner = MachineRunner::spawn(
///     || Machine::from_settings(&MachineSettings::default()),
///     RunOptions { throttled: true, ..RunOptions::default() },
/// );
///
/// runner.control().pause();
/// runner.control().resume();
/// runner.control().stop();
/// let summary = runner.join().unwrap();
/// println!("Ran {} frames", summary.frames);
/// ```
pub struct MachineRunner {
    control: MachineControl,
    handle: JoinHandle<Result<RunSummary>>,
}

impl MachineRunner {
    /// Start a thread that builds a machine with `factory` and runs it
    pub fn spawn<F>(factory: F, options: RunOptions) -> Self
    where
        F: FnOnce() -> Result<Machine> + Send + 'static,
    {
        let control = MachineControl::new();
        control.set_state(MachineState::Starting);

        let thread_control = control.clone();
        let handle = std::thread::spawn(move || {
            let result = factory().map(|mut machine| {
                thread_control.mark_started();
                log::info!("Machine thread running");
                let summary = run(&mut machine, &thread_control, options);
                machine.uninitialize();
                summary
            });
            if let Err(e) = &result {
                log::error!("Machine thread failed to start: {}", e);
            }
            thread_control.set_state(MachineState::Stopped);
            result
        });

        Self { control, handle }
    }

    pub fn control(&self) -> &MachineControl {
        &self.control
    }

    /// Wait for the machine thread to finish
    pub fn join(self) -> Result<RunSummary> {
        self.handle
            .join()
            .map_err(|_| EmulatorError::ThreadPanic)?
    }
}

/// Execution loop of the machine thread
fn run(machine: &mut Machine, control: &MachineControl, options: RunOptions) -> RunSummary {
    let mut pacer = options.throttled.then(Pacer::new);
    let start_frame = machine.frame_count();
    let start_cycle = machine.cycles();
    let mut at_breakpoint = false;

    while control.checkpoint() {
        let frame = machine.frame_count();

        if at_breakpoint {
            // Resumed: run the flagged instruction before consulting breakpoints again
            machine.single_step();
            at_breakpoint = false;
        } else if let StepResult::Breakpoint(_) = machine.step() {
            at_breakpoint = true;
            control.enter_breakpoint();
            continue;
        }

        if machine.frame_count() != frame {
            if let Some(pacer) = &mut pacer {
                pacer.wait();
            }
        }

        let frames = machine.frame_count() - start_frame;
        let cycles = machine.cycles().wrapping_sub(start_cycle);
        if options.frame_limit.is_some_and(|limit| frames >= limit)
            || options.cycle_limit.is_some_and(|limit| cycles >= limit)
        {
            log::info!("Run limit reached after {} frames", frames);
            break;
        }
    }

    RunSummary {
        frames: machine.frame_count() - start_frame,
        cycles: machine.cycles().wrapping_sub(start_cycle),
        state: machine.save_state(),
    }
}
