//! Lead-in countdown before each rally
//!
//! A countdown is a single task value holding two schedules: a once-per-second
//! decrement for display, and one terminal deadline. Completion comes from the
//! deadline alone, so late or bunched-up frames can neither skip nor repeat it.
//!
//! Time is whatever millisecond clock the caller polls with (the
//! requestAnimationFrame timestamp in the browser).

use crate::consts::{COUNTDOWN_SECONDS, COUNTDOWN_STEP_MS};

/// Output of polling a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownSignal {
    /// Displayed value changed (0 is "GO!")
    Tick(i32),
    /// Lead-in over; the rally may start
    Finished,
}

/// Handle for one running countdown
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownTask {
    id: u64,
    value: i32,
    next_step_at: f64,
    deadline: f64,
    cancelled: bool,
}

impl CountdownTask {
    fn new(id: u64, now: f64) -> Self {
        Self {
            id,
            value: COUNTDOWN_SECONDS,
            next_step_at: now + COUNTDOWN_STEP_MS,
            // Value runs 3, 2, 1, 0 ("GO!") and finishes one step after 0
            deadline: now + (COUNTDOWN_SECONDS + 1) as f64 * COUNTDOWN_STEP_MS,
            cancelled: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn deadline(&self) -> f64 {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop both schedules. Cancelling twice is a no-op.
    pub fn cancel(&mut self) -> bool {
        let was_live = !self.cancelled;
        self.cancelled = true;
        was_live
    }

    fn poll(&mut self, now: f64, out: &mut Vec<CountdownSignal>) -> bool {
        if self.cancelled {
            return false;
        }
        while self.value > 0 && now >= self.next_step_at {
            self.value -= 1;
            self.next_step_at += COUNTDOWN_STEP_MS;
            out.push(CountdownSignal::Tick(self.value));
        }
        if now >= self.deadline {
            self.cancelled = true;
            out.push(CountdownSignal::Finished);
            return true;
        }
        false
    }
}

/// Owns at most one countdown task
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    task: Option<CountdownTask>,
    next_id: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh countdown, cancelling any in flight. Returns the initial tick.
    pub fn start(&mut self, now: f64) -> CountdownSignal {
        if self.cancel() {
            log::debug!("Restarting countdown; previous task cancelled");
        }
        self.next_id += 1;
        let task = CountdownTask::new(self.next_id, now);
        let value = task.value;
        self.task = Some(task);
        CountdownSignal::Tick(value)
    }

    /// Cancel the running countdown, if any. Returns whether one was live.
    pub fn cancel(&mut self) -> bool {
        self.task.take().is_some_and(|mut task| task.cancel())
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Currently displayed value
    pub fn value(&self) -> Option<i32> {
        self.task
            .as_ref()
            .filter(|t| !t.is_cancelled())
            .map(|t| t.value())
    }

    pub fn task(&self) -> Option<&CountdownTask> {
        self.task.as_ref()
    }

    /// Fire whatever is due at `now`, in order
    pub fn poll(&mut self, now: f64) -> Vec<CountdownSignal> {
        let mut out = Vec::new();
        let finished = match self.task.as_mut() {
            Some(task) => task.poll(now, &mut out),
            None => false,
        };
        if finished {
            self.task = None;
        }
        out
    }
}
