//! Time-ordered action queue (earliest first, ties in file order)

use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::config::Action;

pub struct ActionQueue {
    /// Priority queue keyed by insertion sequence (Reverse for min-heap)
    queue: PriorityQueue<usize, Reverse<(u64, usize)>>,
    actions: HashMap<usize, Action>,
    next_seq: usize,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            actions: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, action: Action) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(seq, Reverse((action.at, seq)));
        self.actions.insert(seq, action);
    }

    /// Pop the earliest action
    pub fn pop(&mut self) -> Option<Action> {
        let (seq, _priority) = self.queue.pop()?;
        self.actions.remove(&seq)
    }

    pub fn peek(&self) -> Option<&Action> {
        let (seq, _priority) = self.queue.peek()?;
        self.actions.get(seq)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// One queue per pool name
pub fn by_pool(actions: &[Action]) -> HashMap<String, ActionQueue> {
    let mut queues: HashMap<String, ActionQueue> = HashMap::new();
    for action in actions {
        queues.entry(action.pool.clone()).or_default().push(action.clone());
    }
    queues
}
