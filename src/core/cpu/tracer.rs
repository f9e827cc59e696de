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

//! Instruction trace files

use super::{Disassembler, CPU};
use crate::core::error::Result;
use crate::core::memory::Memory;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Per-instruction trace writer
///
/// Lines read `PC  BYTES  DISASSEMBLY | A= X= Y= SP= P= | CYC=`, captured
/// before the instruction executes.
///
/// Tracing stops by itself once the optional instruction limit is reached.
///
/// # Example
/// ```no_run
/// use a2rx::core::cpu::{CpuTracer, CPU};
/// use a2rx::core::memory::Memory;
///
/// let mut cpu = CPU::default();
/// let mut memory = Memory::new();
/// let mut tracer = CpuTracer::new("trace.log").unwrap();
///
/// // Execute and trace
/// tracer.trace(&cpu, &memory).unwrap();
/// cpu.step(&mut memory);
/// ```
pub struct CpuTracer {
    enabled: bool,
    output: BufWriter<File>,
    /// Stop after this many lines
    limit: Option<u64>,
    count: u64,
}

impl CpuTracer {
    /// Start a trace in `path`, truncating any existing file
    pub fn new(path: &str) -> Result<Self> {
        let output = BufWriter::new(File::create(path)?);
        log::info!("CPU trace: writing to {}", path);
        Ok(Self {
            enabled: true,
            output,
            limit: None,
            count: 0,
        })
    }

    /// Stop tracing after `limit` instructions (None for unbounded)
    pub fn set_limit(&mut self, limit: Option<u64>) {
        self.limit = limit;
    }

    /// Suspend or resume writing without closing the file
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the next `trace` call writes a line
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.limit.is_none_or(|limit| self.count < limit)
    }

    /// Number of instructions traced
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Write one line for the instruction at PC
    ///
    /// Memory is read with `peek`, so tracing never disturbs soft switches.
    pub fn trace(&mut self, cpu: &CPU, memory: &Memory) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let pc = cpu.pc();
        let (disasm, length) = Disassembler::disassemble(memory, pc, cpu.variant());
        let bytes = Disassembler::raw_bytes(memory, pc, length);

        writeln!(
            self.output,
            "{:04X}  {:<8}  {:<16} | A={:02X} X={:02X} Y={:02X} SP={:02X} P={} | CYC={}",
            pc,
            bytes,
            disasm,
            cpu.a(),
            cpu.x(),
            cpu.y(),
            cpu.sp(),
            cpu.status().to_flag_string(),
            cpu.cycles()
        )?;

        self.count += 1;
        if self.limit == Some(self.count) {
            log::info!("CPU trace limit reached after {} instructions", self.count);
            self.output.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cpu::CpuVariant;

    fn trace_path(dir: &tempfile::TempDir) -> String {
        dir.path().join("trace.log").to_string_lossy().into_owned()
    }

    #[test]
    fn test_tracer_enable_disable() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracer = CpuTracer::new(&trace_path(&dir)).unwrap();
        assert!(tracer.is_enabled());

        tracer.set_enabled(false);
        assert!(!tracer.is_enabled());

        tracer.set_enabled(true);
        assert!(tracer.is_enabled());
    }

    #[test]
    fn test_tracer_basic_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = trace_path(&dir);
        let mut cpu = CPU::new(CpuVariant::Nmos6502);
        let mut memory = Memory::new();
        memory.write_main_ram(0x0300, &[0xA9, 0x42]); // LDA #$42
        cpu.set_pc(0x0300);
        cpu.set_x(0x12);

        let mut tracer = CpuTracer::new(&path).unwrap();
        tracer.trace(&cpu, &memory).unwrap();
        tracer.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("0300  A9 42"));
        assert!(contents.contains("LDA #$42"));
        assert!(contents.contains("X=12"));
        assert!(contents.contains("CYC=0"));
    }

    #[test]
    fn test_tracer_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = trace_path(&dir);
        let cpu = CPU::default();
        let memory = Memory::new();

        let mut tracer = CpuTracer::new(&path).unwrap();
        tracer.set_enabled(false);
        tracer.trace(&cpu, &memory).unwrap();
        tracer.flush().unwrap();

        assert_eq!(tracer.count(), 0);
        assert!(std::fs::read_to_string(&path).unwrap().is_empty());
    }

    #[test]
    fn test_tracer_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = trace_path(&dir);
        let mut cpu = CPU::new(CpuVariant::Nmos6502);
        let mut memory = Memory::new();
        memory.write_main_ram(0x0300, &[0xEA; 8]);
        cpu.set_pc(0x0300);

        let mut tracer = CpuTracer::new(&path).unwrap();
        tracer.set_limit(Some(3));
        for _ in 0..8 {
            tracer.trace(&cpu, &memory).unwrap();
            cpu.step(&mut memory);
        }
        tracer.flush().unwrap();

        assert_eq!(tracer.count(), 3);
        assert!(!tracer.is_enabled());
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
    }
}
