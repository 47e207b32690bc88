use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Coarse lifecycle of the loop guarded by a [`PauseGate`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// Constructed; no loop has been started.
    Idle,
    /// A loop has been started and not stopped.
    Running,
    /// Terminal.
    Stopped,
}

/// Why [`PauseGate::await_tick`] returned.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Wake {
    /// The wait ran its full course; the next tick is due.
    Elapsed,
    /// A resume happened during the wait; the tick baseline was reset to the
    /// resume instant.
    Resumed,
    /// The gate was stopped.
    Stopped,
}

#[derive(Debug)]
struct GateState {
    phase: Phase,
    paused: bool,
    last_tick: Instant,
    /// Bumped by every effective `resume`.
    resumes: u64,
}

/// Pause/resume/stop rendezvous between the frame loop and external callers.
///
/// One mutex guards `{phase, paused, last_tick}` and doubles as the condvar's
/// wait point. Every state change notifies while still holding the lock, so a
/// waiter can never miss a wake.
#[derive(Debug)]
pub struct PauseGate {
    state: Mutex<GateState>,
    wake: Condvar,
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                phase: Phase::Idle,
                paused: false,
                last_tick: Instant::now(),
                resumes: 0,
            }),
            wake: Condvar::new(),
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// `Idle → Running`. Returns the phase observed; only `Idle` means the caller
    /// now owns the start.
    pub fn begin(&self) -> Phase {
        let mut st = self.state.lock();
        let observed = st.phase;
        if observed == Phase::Idle {
            st.phase = Phase::Running;
            st.last_tick = Instant::now();
            self.wake.notify_all();
        }
        observed
    }

    /// Moves to `Stopped` and wakes every waiter. Returns the phase observed
    /// before the call; `Stopped` means this call was a no-op.
    pub fn stop(&self) -> Phase {
        let mut st = self.state.lock();
        let observed = st.phase;
        if observed != Phase::Stopped {
            st.phase = Phase::Stopped;
            self.wake.notify_all();
        }
        observed
    }

    /// Requests a pause. Returns `false` if already paused or stopped.
    pub fn pause(&self) -> bool {
        let mut st = self.state.lock();
        if st.paused || st.phase == Phase::Stopped {
            return false;
        }
        st.paused = true;
        self.wake.notify_all();
        true
    }

    /// Lifts a pause and restarts the tick interval from now. Returns `false` if
    /// not paused or stopped.
    pub fn resume(&self) -> bool {
        let mut st = self.state.lock();
        if !st.paused || st.phase == Phase::Stopped {
            return false;
        }
        st.paused = false;
        st.last_tick = Instant::now();
        st.resumes = st.resumes.wrapping_add(1);
        self.wake.notify_all();
        true
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    /// Phase and pause flag read under one lock.
    pub fn status(&self) -> (Phase, bool) {
        let st = self.state.lock();
        (st.phase, st.paused && st.phase != Phase::Stopped)
    }

    pub fn is_paused(&self) -> bool {
        let st = self.state.lock();
        st.paused && st.phase != Phase::Stopped
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().phase == Phase::Stopped
    }

    /// Baseline the next tick deadline is measured from.
    pub fn last_tick(&self) -> Instant {
        self.state.lock().last_tick
    }

    /// Overwrites the tick baseline.
    pub fn reset_baseline(&self, at: Instant) {
        self.state.lock().last_tick = at;
    }

    // ── waiting ───────────────────────────────────────────────────────────

    /// Blocks until the next tick is due.
    ///
    /// - paused: blocks until `resume` or `stop`, ignoring `max_wait`
    /// - running: blocks at most `max_wait`, returning early on resume or stop
    ///
    /// On [`Wake::Elapsed`], `next_baseline` becomes the new `last_tick` in the same
    /// critical section, so a concurrent `resume` cannot be overwritten. Spurious
    /// wake-ups and `pause` notifications just continue the wait.
    pub fn await_tick(&self, max_wait: Duration, next_baseline: Instant) -> Wake {
        let deadline = Instant::now().checked_add(max_wait);
        let mut st = self.state.lock();
        let resumes = st.resumes;

        loop {
            if st.phase == Phase::Stopped {
                return Wake::Stopped;
            }
            if st.resumes != resumes {
                return Wake::Resumed;
            }
            if st.paused {
                self.wake.wait(&mut st);
                continue;
            }
            match deadline {
                Some(deadline) if Instant::now() >= deadline => {
                    st.last_tick = next_baseline;
                    return Wake::Elapsed;
                }
                Some(deadline) => {
                    self.wake.wait_until(&mut st, deadline);
                }
                None => self.wake.wait(&mut st),
            }
        }
    }
}
