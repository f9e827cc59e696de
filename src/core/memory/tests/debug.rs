// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Debug instrumentation tests

use super::*;

#[test]
fn test_counters_idle_without_instrumentation() {
    let mut memory = Memory::new();

    memory.write(0x0300, 1);
    memory.read(0x0300);
    memory.read_opcode(0x0300);

    assert_eq!(*memory.debug_info(0x0300), DebugInfo::default());
}

#[test]
fn test_counters_with_instrumentation() {
    let mut memory = Memory::new();
    memory.set_instrumentation(true);

    memory.set_cycle(10);
    memory.write(0x0300, 1);
    memory.read(0x0300);
    memory.set_cycle(20);
    memory.read_opcode(0x0300);

    let info = memory.debug_info(0x0300);
    assert_eq!(info.writes, 1);
    assert_eq!(info.reads, 1);
    assert_eq!(info.executions, 1);
    assert_eq!(info.last_cycle, 20);
    assert!(info.flags.contains(DebugFlags::OPCODE));
}

#[test]
fn test_breakpoints_work_without_instrumentation() {
    let mut memory = Memory::new();

    memory.set_breakpoint(0x0800);
    assert!(memory.is_breakpoint(0x0800));
    assert!(!memory.is_breakpoint(0x0801));

    assert!(memory.toggle_breakpoint(0x0400));
    assert_eq!(memory.breakpoints(), vec![0x0400, 0x0800]);

    assert!(!memory.toggle_breakpoint(0x0400));
    memory.clear_breakpoint(0x0800);
    assert!(memory.breakpoints().is_empty());
}

#[test]
fn test_clear_debug_info_keeps_breakpoints() {
    let mut memory = Memory::new();
    memory.set_instrumentation(true);
    memory.set_breakpoint(0x0300);
    memory.read(0x0300);

    memory.clear_debug_info();

    let info = memory.debug_info(0x0300);
    assert_eq!(info.reads, 0);
    assert!(info.flags.contains(DebugFlags::BREAKPOINT));

    memory.clear_breakpoints();
    assert!(!memory.is_breakpoint(0x0300));
}

#[test]
fn test_debug_json_lists_touched_addresses() {
    let mut memory = Memory::new();
    memory.set_instrumentation(true);
    memory.read(0x1000);
    memory.set_breakpoint(0x1002);

    let json = memory.debug_json(0x1000, 0x10FF).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["address"], 0x1000);
    assert_eq!(records[0]["reads"], 1);
    assert_eq!(records[1]["address"], 0x1002);
    assert_eq!(records[1]["breakpoint"], true);
}
