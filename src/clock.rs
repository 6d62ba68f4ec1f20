use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Millisecond time source for round timing
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall clock measured from the moment it was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_millis(&self, millis: u64) {
        self.now.set(millis);
    }

    pub fn advance_millis(&self, millis: u64) {
        self.now.set(self.now.get() + millis);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance_millis(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

/// Sleeps away whatever is left of the frame budget. A frame that overruns
/// is not made up for; the next one simply starts late.
#[derive(Debug)]
pub struct FrameLimiter {
    frame_budget: Duration,
    last_tick: Instant,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_budget: Self::budget_for(target_fps),
            last_tick: Instant::now(),
        }
    }

    pub fn budget_for(target_fps: u32) -> Duration {
        Duration::from_secs(1) / target_fps.max(1)
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Blocks until the current frame has used its budget, then starts the next
    pub fn tick(&mut self) {
        let spent = self.last_tick.elapsed();
        if spent < self.frame_budget {
            std::thread::sleep(self.frame_budget - spent);
        }
        self.last_tick = Instant::now();
    }
}
