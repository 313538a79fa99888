//! Phase Gate
//!
//! Countdown latch between the two pools in barrier mode. Mappers arrive once each when
//! they are done writing; reducers block until every mapper has arrived. Unlike
//! `std::sync::Barrier` the gate can be aborted, which releases every waiting reducer
//! with an error instead of leaving it blocked on arrivals that will never come (a
//! mapper that failed to spawn or panicked).

use anyhow::{Result, bail};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct GateState {
    arrived: usize,
    aborted: bool,
}

#[derive(Debug)]
pub struct PhaseGate {
    expected: usize,
    state: Mutex<GateState>,
    opened: Condvar,
}

impl PhaseGate {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            state: Mutex::new(GateState::default()),
            opened: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        // Only counters live behind the lock; they stay consistent across a poisoning panic.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one finished mapper. Never blocks.
    pub fn arrive(&self) {
        let mut state = self.lock();
        state.arrived += 1;
        if state.arrived >= self.expected {
            self.opened.notify_all();
        }
    }

    /// Releases every current and future waiter with an error.
    pub fn abort(&self) {
        let mut state = self.lock();
        state.aborted = true;
        self.opened.notify_all();
    }

    /// Blocks until all expected arrivals happened, or fails once the gate is aborted.
    pub fn wait(&self) -> Result<()> {
        let state = self
            .opened
            .wait_while(self.lock(), |state| {
                !state.aborted && state.arrived < self.expected
            })
            .unwrap_or_else(PoisonError::into_inner);

        if state.aborted {
            bail!("Map phase aborted, reducer not started");
        }
        Ok(())
    }
}
