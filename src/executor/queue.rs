//! Task Queue
//!
//! Pull-based distribution of input files among mapper threads. A single cursor behind
//! a mutex is the only piece of state any two mappers ever write; the critical section
//! is exactly one test-and-increment, never any file I/O.

use std::sync::{Mutex, PoisonError};

/// Hands out every index in `[0, total)` exactly once across all callers.
#[derive(Debug)]
pub struct TaskQueue {
    cursor: Mutex<usize>,
    total: usize,
}

impl TaskQueue {
    pub fn new(total: usize) -> Self {
        Self {
            cursor: Mutex::new(0),
            total,
        }
    }

    /// Claims the next unprocessed file index, or `None` once every file is taken.
    pub fn next_file_index(&self) -> Option<usize> {
        // The guarded section cannot panic, so a poisoned lock still holds a valid cursor.
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        if *cursor >= self.total {
            return None;
        }

        let index = *cursor;
        *cursor += 1;
        Some(index)
    }
}
