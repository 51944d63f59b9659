// Step history for reverse execution

use std::collections::VecDeque;

/// Machine state captured right before one step.
///
/// A step writes at most the cell under the data pointer it starts from, so that
/// one cell plus the two pointers and the I/O positions is enough to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub instruction_pointer: usize,
    pub data_pointer: usize,
    pub cell: u8,
    /// Bytes of input consumed before the step
    pub input_position: u64,
    /// Bytes of output produced before the step
    pub output_len: usize,
}

/// Bounded history of snapshots. When full, the oldest entry is dropped, so
/// stepping backward can only go as far back as the limit allows.
#[derive(Debug)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    max_snapshots: usize,
    dropped: usize,
}

impl History {
    pub fn new(max_snapshots: usize) -> Self {
        History {
            snapshots: VecDeque::new(),
            max_snapshots,
            dropped: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.max_snapshots == 0 {
            self.dropped += 1;
            return;
        }
        if self.snapshots.len() == self.max_snapshots {
            self.snapshots.pop_front();
            self.dropped += 1;
        }
        self.snapshots.push_back(snapshot);
    }

    /// Remove and return the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of snapshots evicted because the limit was reached
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(ip: usize) -> Snapshot {
        Snapshot {
            instruction_pointer: ip,
            data_pointer: 0,
            cell: 0,
            input_position: 0,
            output_len: 0,
        }
    }

    #[test]
    fn test_push_pop_order() {
        let mut history = History::new(8);
        history.push(snap(1));
        history.push(snap(2));
        assert_eq!(history.pop().map(|s| s.instruction_pointer), Some(2));
        assert_eq!(history.pop().map(|s| s.instruction_pointer), Some(1));
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::new(2);
        for ip in 0..5 {
            history.push(snap(ip));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.dropped(), 3);
        let remaining: Vec<usize> = std::iter::from_fn(|| history.pop())
            .map(|s| s.instruction_pointer)
            .collect();
        assert_eq!(remaining, vec![4, 3]);
    }

    #[test]
    fn test_zero_limit_keeps_nothing() {
        let mut history = History::new(0);
        history.push(snap(0));
        assert!(history.is_empty());
        assert_eq!(history.dropped(), 1);
    }
}
