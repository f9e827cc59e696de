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

//! Event Scheduling
//!
//! This module implements the machine's single event queue. Every peripheral that
//! needs to do something "N cycles from now" schedules an action here instead of
//! polling on each instruction.
//!
//! # Architecture
//!
//! The queue is a delta queue: pending entries are kept in firing order, and each
//! entry stores its delay *relative to the entry before it*. Advancing time only
//! touches the head, so the cost of a time step does not depend on how many events
//! are pending.
//!
//! ```text
//! absolute delays:  10   25   25   40
//! stored deltas:    10   15    0   15
//! ```
//!
//! Nodes live in a pooled `Vec` and are linked by index. Retired nodes go onto a
//! free list and are reused by later `schedule` calls, so steady-state execution
//! does not allocate.
//!
//! Firing is pull based: call [`EventQueue::advance`] with the elapsed cycle count,
//! then drain [`EventQueue::pop_due`] until it returns `None`. Handlers may call
//! [`EventQueue::schedule`] between pops, and newly scheduled work that is already
//! due is returned by the same drain loop.
//!
//! # Example
//!
//! ```
//! use a2rx::core::timing::EventQueue;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Event {
//!     Tick,
//! }
//!
//! let mut events = EventQueue::new();
//! events.schedule(1000, Event::Tick);
//!
//! events.advance(999);
//! assert_eq!(events.pop_due(), None);
//!
//! events.advance(1);
//! assert_eq!(events.pop_due(), Some(Event::Tick));
//! assert_eq!(events.pop_due(), None);
//! ```

/// Tick count type (relative time in CPU cycles)
pub type TickCount = i32;

/// Pool index of a queue node
type NodeIndex = usize;

/// A single pooled queue node
#[derive(Debug, Clone, Copy)]
struct EventNode<A> {
    /// Delay relative to the previous node (the head's delta may go negative once due)
    delta: TickCount,

    /// Action token returned when the node fires
    action: A,

    /// Next node in firing order (or next free node while pooled)
    next: Option<NodeIndex>,
}

/// Delta-encoded event queue
///
/// Generic over a small `Copy` action token; the machine uses an enum of event
/// kinds and dispatches on it after each [`pop_due`](Self::pop_due).
///
/// # Invariants
///
/// - The sum of deltas from the head to any node equals that node's scheduled
///   delay minus the cycles consumed since it was scheduled.
/// - Only the head may carry a delta `<= 0`, and only once it is due.
#[derive(Debug, Clone)]
pub struct EventQueue<A> {
    /// Node storage (live and pooled)
    nodes: Vec<EventNode<A>>,

    /// First node in firing order
    head: Option<NodeIndex>,

    /// Head of the free list
    free: Option<NodeIndex>,

    /// Head node whose action was handed out by `pop_due` and is retired lazily
    fired: Option<NodeIndex>,

    /// Number of live (scheduled) nodes
    len: usize,
}

impl<A: Copy + PartialEq> EventQueue<A> {
    /// Create an empty event queue
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            free: None,
            fired: None,
            len: 0,
        }
    }

    /// Schedule an action to fire after `delay` cycles
    ///
    /// Walks from the head, subtracting each traversed node's delta, and splices the
    /// new node in before the first node whose delta exceeds the remaining delay.
    /// That node's delta is reduced by the new node's delta so every later entry
    /// keeps its absolute firing time. Entries with equal delays fire in scheduling
    /// order.
    ///
    /// # Arguments
    ///
    /// * `delay` - Cycles from now until the action fires (0 fires on the next advance)
    /// * `action` - Action token returned by `pop_due` when the delay elapses
    ///
    /// # Panics
    ///
    /// Panics if `delay` is negative: a negative delay is a scheduling bug that would
    /// corrupt every later event's timing.
    pub fn schedule(&mut self, delay: TickCount, action: A) {
        assert!(delay >= 0, "cannot schedule an event with negative delay {delay}");

        let mut delta = delay;
        let mut prev: Option<NodeIndex> = None;
        let mut current = self.head;

        while let Some(index) = current {
            let node = &mut self.nodes[index];
            if delta < node.delta {
                node.delta -= delta;
                break;
            }
            if node.delta > 0 {
                delta -= node.delta;
            }
            prev = current;
            current = node.next;
        }

        let index = self.allocate(delta, action, current);
        match prev {
            Some(prev) => self.nodes[prev].next = Some(index),
            None => self.head = Some(index),
        }
        self.len += 1;

        log::trace!("Scheduled event in {} cycles (node {})", delay, index);
    }

    /// Consume `elapsed` cycles
    ///
    /// Decrements the head's delta. Entries that became due are then returned one at
    /// a time by [`pop_due`](Self::pop_due).
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty: the machine always keeps at least one periodic
    /// event pending, so an empty queue means scheduling has gone wrong.
    pub fn advance(&mut self, elapsed: TickCount) {
        self.retire_fired();
        let Some(head) = self.head else {
            panic!("advance({elapsed}) called on an empty event queue");
        };
        self.nodes[head].delta -= elapsed;
    }

    /// Take the next due action, if any
    ///
    /// Returns the head's action if its delta is `<= 0`. The node is retired on the
    /// next call into the queue, at which point its (possibly negative) residual is
    /// added to the following node so lateness carries over instead of being lost.
    pub fn pop_due(&mut self) -> Option<A> {
        self.retire_fired();
        let head = self.head?;
        let node = &self.nodes[head];
        if node.delta <= 0 {
            self.fired = Some(head);
            Some(node.action)
        } else {
            None
        }
    }

    /// Total delay until the first pending entry matching `action`
    ///
    /// Sums deltas from the head up to and including the first match. Returns 0 if no
    /// entry matches.
    pub fn find_pending_delay(&self, action: A) -> TickCount {
        let mut delay = 0;
        let mut current = self.head;
        while let Some(index) = current {
            let node = &self.nodes[index];
            delay += node.delta;
            if node.action == action {
                return delay;
            }
            current = node.next;
        }
        0
    }

    /// Number of entries still scheduled
    pub fn len(&self) -> usize {
        self.len - usize::from(self.fired.is_some())
    }

    /// Whether no entries are scheduled
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of pending entries as `(absolute delay, action)` in firing order
    pub fn pending(&self) -> Vec<(TickCount, A)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut delay = 0;
        let mut current = self.head;
        while let Some(index) = current {
            let node = &self.nodes[index];
            delay += node.delta;
            if self.fired != Some(index) {
                entries.push((delay.max(0), node.action));
            }
            current = node.next;
        }
        entries
    }

    /// Replace the queue contents with previously captured entries
    ///
    /// Entries must be in firing order, as produced by [`pending`](Self::pending).
    pub fn restore(&mut self, entries: &[(TickCount, A)]) {
        self.clear();
        for &(delay, action) in entries {
            self.schedule(delay, action);
        }
    }

    /// Drop every pending entry, returning all nodes to the pool
    pub fn clear(&mut self) {
        self.retire_fired();
        while let Some(index) = self.head {
            self.head = self.nodes[index].next;
            self.release(index);
        }
        self.len = 0;
    }

    /// Retire the head handed out by the last `pop_due`
    fn retire_fired(&mut self) {
        let Some(index) = self.fired.take() else {
            return;
        };
        debug_assert_eq!(self.head, Some(index));

        let EventNode { delta, next, .. } = self.nodes[index];
        if let Some(next) = next {
            self.nodes[next].delta += delta;
        }
        self.head = next;
        self.release(index);
        self.len -= 1;
    }

    fn allocate(&mut self, delta: TickCount, action: A, next: Option<NodeIndex>) -> NodeIndex {
        match self.free {
            Some(index) => {
                self.free = self.nodes[index].next;
                self.nodes[index] = EventNode {
                    delta,
                    action,
                    next,
                };
                index
            }
            None => {
                self.nodes.push(EventNode {
                    delta,
                    action,
                    next,
                });
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, index: NodeIndex) {
        self.nodes[index].next = self.free;
        self.free = Some(index);
    }

    /// Number of nodes ever allocated (live plus pooled)
    #[cfg(test)]
    fn pool_size(&self) -> usize {
        self.nodes.len()
    }
}

impl<A: Copy + PartialEq> Default for EventQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum TestEvent {
        A,
        B,
        C,
        D,
    }

    fn drain(queue: &mut EventQueue<TestEvent>) -> Vec<TestEvent> {
        let mut fired = Vec::new();
        while let Some(event) = queue.pop_due() {
            fired.push(event);
        }
        fired
    }

    #[test]
    fn test_queue_initialization() {
        let queue: EventQueue<TestEvent> = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_single_event_fires_when_due() {
        let mut queue = EventQueue::new();
        queue.schedule(100, TestEvent::A);

        queue.advance(99);
        assert!(drain(&mut queue).is_empty());

        queue.advance(1);
        assert_eq!(drain(&mut queue), vec![TestEvent::A]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_fire_in_delay_order() {
        let mut queue = EventQueue::new();
        // Scheduled out of order on purpose
        queue.schedule(30, TestEvent::C);
        queue.schedule(10, TestEvent::A);
        queue.schedule(20, TestEvent::B);
        // keep the queue non-empty after the others fire
        queue.schedule(1000, TestEvent::D);

        let mut fired = Vec::new();
        for _ in 0..60 {
            queue.advance(1);
            fired.extend(drain(&mut queue));
        }

        assert_eq!(fired, vec![TestEvent::A, TestEvent::B, TestEvent::C]);
    }

    #[test]
    fn test_single_large_advance_fires_all_in_order() {
        let mut queue = EventQueue::new();
        queue.schedule(5, TestEvent::A);
        queue.schedule(12, TestEvent::B);
        queue.schedule(40, TestEvent::C);

        queue.advance(5 + 12 + 40);
        assert_eq!(
            drain(&mut queue),
            vec![TestEvent::A, TestEvent::B, TestEvent::C]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut queue = EventQueue::new();
        queue.schedule(0, TestEvent::A);

        queue.advance(0);
        assert_eq!(drain(&mut queue), vec![TestEvent::A]);
    }

    #[test]
    fn test_zero_delay_fires_before_pending_events() {
        let mut queue = EventQueue::new();
        queue.schedule(50, TestEvent::B);
        queue.schedule(0, TestEvent::A);

        queue.advance(1);
        assert_eq!(drain(&mut queue), vec![TestEvent::A]);
        assert_eq!(queue.find_pending_delay(TestEvent::B), 49);
    }

    #[test]
    fn test_equal_delays_fire_in_schedule_order() {
        let mut queue = EventQueue::new();
        queue.schedule(10, TestEvent::B);
        queue.schedule(10, TestEvent::A);

        queue.advance(10);
        assert_eq!(drain(&mut queue), vec![TestEvent::B, TestEvent::A]);
    }

    #[test]
    fn test_late_residual_carries_to_next_event() {
        let mut queue = EventQueue::new();
        queue.schedule(10, TestEvent::A);
        queue.schedule(25, TestEvent::B);

        // Overshoot the first event by 7 cycles
        queue.advance(17);
        assert_eq!(drain(&mut queue), vec![TestEvent::A]);

        // B was due at 25, so only 8 cycles remain
        assert_eq!(queue.find_pending_delay(TestEvent::B), 8);
        queue.advance(8);
        assert_eq!(drain(&mut queue), vec![TestEvent::B]);
    }

    #[test]
    fn test_reschedule_from_handler() {
        let mut queue = EventQueue::new();
        queue.schedule(10, TestEvent::A);
        queue.schedule(100, TestEvent::D);

        let mut fired = Vec::new();
        for _ in 0..4 {
            queue.advance(10);
            while let Some(event) = queue.pop_due() {
                fired.push(event);
                if event == TestEvent::A {
                    // Periodic event rescheduling itself
                    queue.schedule(10, TestEvent::A);
                }
            }
        }

        assert_eq!(fired, vec![TestEvent::A; 4]);
        assert_eq!(queue.find_pending_delay(TestEvent::D), 60);
    }

    #[test]
    fn test_reschedule_overdue_fires_in_same_drain() {
        let mut queue = EventQueue::new();
        queue.schedule(10, TestEvent::A);

        // 25 cycles late: rescheduling with delay 10 is still overdue
        queue.advance(35);
        let mut fired = Vec::new();
        while let Some(event) = queue.pop_due() {
            fired.push(event);
            if fired.len() < 3 {
                queue.schedule(10, TestEvent::A);
            }
        }

        assert_eq!(fired.len(), 3);
    }

    #[test]
    fn test_find_pending_delay() {
        let mut queue = EventQueue::new();
        queue.schedule(10, TestEvent::A);
        queue.schedule(25, TestEvent::B);

        assert_eq!(queue.find_pending_delay(TestEvent::A), 10);
        assert_eq!(queue.find_pending_delay(TestEvent::B), 25);

        queue.advance(4);
        assert_eq!(queue.find_pending_delay(TestEvent::B), 21);
    }

    #[test]
    fn test_find_pending_delay_unscheduled_is_zero() {
        let mut queue = EventQueue::new();
        assert_eq!(queue.find_pending_delay(TestEvent::C), 0);

        queue.schedule(10, TestEvent::A);
        assert_eq!(queue.find_pending_delay(TestEvent::C), 0);
    }

    #[test]
    fn test_nodes_are_recycled() {
        let mut queue = EventQueue::new();
        queue.schedule(1000, TestEvent::D);

        for _ in 0..100 {
            queue.schedule(1, TestEvent::A);
            queue.advance(1);
            assert_eq!(drain(&mut queue), vec![TestEvent::A]);
        }

        assert!(queue.pool_size() <= 2);
    }

    #[test]
    fn test_pending_and_restore() {
        let mut queue = EventQueue::new();
        queue.schedule(10, TestEvent::A);
        queue.schedule(30, TestEvent::B);
        queue.advance(5);

        let pending = queue.pending();
        assert_eq!(pending, vec![(5, TestEvent::A), (25, TestEvent::B)]);

        let mut restored = EventQueue::new();
        restored.schedule(7, TestEvent::C);
        restored.restore(&pending);
        assert_eq!(restored.pending(), pending);
        assert_eq!(restored.find_pending_delay(TestEvent::C), 0);
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new();
        queue.schedule(10, TestEvent::A);
        queue.schedule(20, TestEvent::B);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.find_pending_delay(TestEvent::A), 0);
    }

    #[test]
    #[should_panic(expected = "negative delay")]
    fn test_negative_delay_panics() {
        let mut queue = EventQueue::new();
        queue.schedule(-1, TestEvent::A);
    }

    #[test]
    #[should_panic(expected = "empty event queue")]
    fn test_advance_empty_queue_panics() {
        let mut queue: EventQueue<TestEvent> = EventQueue::new();
        queue.advance(1);
    }

    proptest! {
        #[test]
        fn prop_events_fire_in_nondecreasing_delay_order(
            delays in proptest::collection::vec(0i32..500, 1..40),
            step in 1i32..50,
        ) {
            let mut queue = EventQueue::new();
            for (i, &delay) in delays.iter().enumerate() {
                queue.schedule(delay, i);
            }

            let mut fired: Vec<usize> = Vec::new();
            while !queue.is_empty() {
                queue.advance(step);
                while let Some(i) = queue.pop_due() {
                    fired.push(i);
                }
            }

            prop_assert_eq!(fired.len(), delays.len());
            for pair in fired.windows(2) {
                prop_assert!(delays[pair[0]] <= delays[pair[1]]);
            }
        }
    }
}
