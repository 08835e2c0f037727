use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

pub type ScheduledCallback = Box<dyn FnOnce()>;

/// Host clock that runs deferred callbacks on tick boundaries.
pub trait Scheduler {
    fn current_tick(&self) -> u64;

    /// Runs `callback` once, on the first boundary at least `delay` ticks away.
    fn schedule_at(&mut self, delay: u64, callback: ScheduledCallback);

    /// Moves the clock forward one tick and fires everything now due.
    fn advance(&mut self);

    fn pending(&self) -> usize;
}

/// Deterministic in-process scheduler. Callbacks due on the same tick fire
/// in scheduling order.
#[derive(Default)]
pub struct TickScheduler {
    now: u64,
    next_sequence: u64,
    queue: BinaryHeap<Reverse<(u64, u64)>>,
    callbacks: HashMap<u64, ScheduledCallback>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for TickScheduler {
    fn current_tick(&self) -> u64 {
        self.now
    }

    fn schedule_at(&mut self, delay: u64, callback: ScheduledCallback) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue
            .push(Reverse((self.now.saturating_add(delay), sequence)));
        self.callbacks.insert(sequence, callback);
    }

    fn advance(&mut self) {
        self.now += 1;
        while let Some(Reverse((due, sequence))) = self.queue.peek().copied() {
            if due > self.now {
                break;
            }
            self.queue.pop();
            if let Some(callback) = self.callbacks.remove(&sequence) {
                callback();
            }
        }
    }

    fn pending(&self) -> usize {
        self.callbacks.len()
    }
}
