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

use a2rx::core::config::DiskSettings;
use a2rx::core::cpu::CPU;
use a2rx::core::error::{EmulatorError, Result};
use a2rx::core::machine::{MachineRunner, MachineState, Pacer, RunOptions, RunSummary};
use a2rx::core::{Machine, MachineSettings};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Frames run when no length is given
const DEFAULT_FRAMES: u64 = 600;

/// Apple IIe emulator (headless)
#[derive(Parser)]
#[command(name = "a2rx")]
#[command(about = "Apple IIe emulator", long_about = None)]
struct Args {
    /// System ROM image (12K or 16K)
    rom: Option<PathBuf>,

    /// Machine settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disk image for drive 1 (.dsk, .do, .po, .nib)
    #[arg(long)]
    disk1: Option<PathBuf>,

    /// Disk image for drive 2
    #[arg(long)]
    disk2: Option<PathBuf>,

    /// Insert disks write-protected
    #[arg(long)]
    write_protect: bool,

    /// Emulate the original 6502 instead of the 65C02
    #[arg(long)]
    nmos: bool,

    /// Number of cycles to run
    #[arg(long, conflicts_with = "frames")]
    cycles: Option<u64>,

    /// Number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Run as fast as possible
    #[arg(long)]
    unthrottled: bool,

    /// Write a CPU trace to this file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Stop tracing after this many instructions
    #[arg(long, requires = "trace")]
    trace_limit: Option<u64>,

    /// Restore a save state before running
    #[arg(long)]
    load_state: Option<PathBuf>,

    /// Write a save state after running
    #[arg(long)]
    save_state: Option<PathBuf>,

    /// Stop before executing this address (hex, e.g. C600 or $C600)
    #[arg(long = "breakpoint", value_parser = parse_address)]
    breakpoints: Vec<u16>,

    /// Dump per-address access counters as JSON
    #[arg(long)]
    dump_debug: Option<PathBuf>,

    /// Disassemble COUNT instructions from START (hex) after running
    #[arg(long, value_name = "START:COUNT", value_parser = parse_disassembly)]
    disassemble: Option<(u16, usize)>,

    /// Run the machine on its own thread
    #[arg(long)]
    threaded: bool,
}

fn parse_address(text: &str) -> std::result::Result<u16, String> {
    let digits = text
        .trim_start_matches('$')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address {:?}: {}", text, e))
}

fn parse_disassembly(text: &str) -> std::result::Result<(u16, usize), String> {
    let (start, count) = text
        .split_once(':')
        .ok_or_else(|| format!("expected START:COUNT, got {:?}", text))?;
    let count = count
        .parse()
        .map_err(|e| format!("invalid count {:?}: {}", count, e))?;
    Ok((parse_address(start)?, count))
}

fn main() -> ExitCode {
    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("a2rx v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = build_settings(args)?;

    let options = RunOptions {
        throttled: settings.cpu.is_throttled,
        frame_limit: match args.cycles {
            Some(_) => None,
            None => Some(args.frames.unwrap_or(DEFAULT_FRAMES)),
        },
        cycle_limit: args.cycles,
    };

    if args.threaded {
        run_threaded(args, settings, options)
    } else {
        run_headless(args, &settings, options)
    }
}

/// Settings file, then environment, then command line
fn build_settings(args: &Args) -> Result<MachineSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            MachineSettings::load(path)?
        }
        None => MachineSettings::default(),
    };

    if let Ok(rom) = std::env::var("A2RX_ROM") {
        settings.rom.system = Some(PathBuf::from(rom));
    }
    if let Ok(disk) = std::env::var("A2RX_DISK1") {
        settings.disk_ii.disk1.name = disk;
    }
    if let Ok(disk) = std::env::var("A2RX_DISK2") {
        settings.disk_ii.disk2.name = disk;
    }

    if let Some(rom) = &args.rom {
        settings.rom.system = Some(rom.clone());
    }
    for (disk, path) in [
        (&mut settings.disk_ii.disk1, &args.disk1),
        (&mut settings.disk_ii.disk2, &args.disk2),
    ] {
        if let Some(path) = path {
            *disk = DiskSettings {
                name: path.to_string_lossy().into_owned(),
                is_write_protected: args.write_protect,
            };
        } else if args.write_protect {
            disk.is_write_protected = true;
        }
    }

    if args.nmos {
        settings.cpu.is_65c02 = false;
    }
    if args.unthrottled {
        settings.cpu.is_throttled = false;
    }
    if let Some(trace) = &args.trace {
        settings.debug.trace_file = Some(trace.clone());
        settings.debug.trace_limit = args.trace_limit;
    }
    if args.dump_debug.is_some() {
        settings.debug.instrumentation = true;
    }

    if settings.rom.system.is_none() {
        return Err(EmulatorError::Config(
            "No system ROM given (pass a ROM path or set A2RX_ROM)".to_string(),
        ));
    }
    settings.validate()?;
    Ok(settings)
}

/// Build the machine and apply the debug options that precede a run
fn prepare_machine(args: &Args, settings: &MachineSettings) -> Result<Machine> {
    let mut machine = Machine::from_settings(settings)?;

    if let Some(path) = &args.load_state {
        info!("Loading state from: {}", path.display());
        machine.load_state_from_file(path)?;
    }
    for &address in &args.breakpoints {
        machine.set_breakpoint(address);
    }
    Ok(machine)
}

fn run_headless(args: &Args, settings: &MachineSettings, options: RunOptions) -> Result<()> {
    let mut machine = prepare_machine(args, settings)?;
    let mut pacer = options.throttled.then(Pacer::new);

    info!("Starting emulation...");
    if let Some(cycles) = options.cycle_limit {
        let (ran, breakpoint) = machine.run_cycles(cycles);
        info!("Ran {} cycles", ran);
        if let Some(address) = breakpoint {
            info!("Breakpoint hit at ${:04X}", address);
        }
    } else {
        let frames = options.frame_limit.unwrap_or(DEFAULT_FRAMES);
        for _ in 0..frames {
            if let Some(address) = machine.run_frame() {
                info!("Breakpoint hit at ${:04X}", address);
                break;
            }
            if let Some(pacer) = &mut pacer {
                pacer.wait();
            }
        }
    }

    info!(
        "Emulation finished after {} frames, {} cycles",
        machine.frame_count(),
        machine.cycles()
    );

    if let Some((start, count)) = args.disassemble {
        print_disassembly(&machine, start, count);
    }
    if let Some(path) = &args.dump_debug {
        std::fs::write(path, machine.debug_json(0x0000, 0xFFFF)?)?;
        info!("Debug counters written to: {}", path.display());
    }
    if let Some(path) = &args.save_state {
        machine.save_state_to_file(path)?;
    }

    machine.uninitialize();
    machine.cpu().dump_registers();
    Ok(())
}

fn run_threaded(args: &Args, settings: MachineSettings, options: RunOptions) -> Result<()> {
    if args.disassemble.is_some() || args.dump_debug.is_some() {
        warn!("--disassemble and --dump-debug are ignored with --threaded");
    }

    let factory_args = FactoryArgs {
        load_state: args.load_state.clone(),
        breakpoints: args.breakpoints.clone(),
    };
    let runner = MachineRunner::spawn(
        move || {
            let mut machine = Machine::from_settings(&settings)?;
            if let Some(path) = &factory_args.load_state {
                machine.load_state_from_file(path)?;
            }
            for &address in &factory_args.breakpoints {
                machine.set_breakpoint(address);
            }
            Ok(machine)
        },
        options,
    );

    let control = runner.control().clone();
    loop {
        let state = control.wait_until(Duration::from_secs(1), |state| {
            matches!(state, MachineState::Paused | MachineState::Stopped)
        });
        match state {
            MachineState::Paused => {
                info!("Machine paused at a breakpoint, stopping");
                control.stop();
                break;
            }
            MachineState::Stopped => break,
            _ => {}
        }
    }

    let summary = runner.join()?;
    report(&summary);

    if let Some(path) = &args.save_state {
        summary.state.save_to_file(path)?;
        info!("Saved state to {}", path.display());
    }
    Ok(())
}

/// Owned copies of the options the machine thread needs
struct FactoryArgs {
    load_state: Option<PathBuf>,
    breakpoints: Vec<u16>,
}

fn report(summary: &RunSummary) {
    info!(
        "Machine thread ran {} frames, {} cycles",
        summary.frames, summary.cycles
    );
    let mut cpu = CPU::default();
    cpu.load_state(&summary.state.cpu);
    cpu.dump_registers();
}

fn print_disassembly(machine: &Machine, start: u16, count: usize) {
    let mut address = start;
    for _ in 0..count {
        let (text, length) = machine.disassemble(address);
        println!("{:04X}  {}", address, text);
        address = address.wrapping_add(length);
    }
}
