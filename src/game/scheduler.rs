//! Cancellable timers for the spawn schedulers and the frame loop
//!
//! Nothing here re-arms itself. The owner decides when to schedule, the host
//! pumps with its current timestamp, and cancelling drops the pending
//! deadline so a stale one can never fire.

/// One-shot deadline timer
#[derive(Debug, Clone)]
pub struct Scheduler {
    name: &'static str,
    deadline: Option<f64>,
}

impl Scheduler {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            deadline: None,
        }
    }

    /// Arm the timer to fire `delay_ms` after `now`, replacing any pending arm
    pub fn schedule(&mut self, now: f64, delay_ms: f64) {
        self.deadline = Some(now + delay_ms.max(0.0));
        log::trace!("{} scheduled in {:.0}ms", self.name, delay_ms);
    }

    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            log::trace!("{} cancelled", self.name);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Consume the pending arm if its deadline has passed
    pub fn take_due(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Game loop driver handle
///
/// Armed while the loop should keep running. Every display refresh the
/// host delivers while armed runs exactly one simulation step.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    armed: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once() {
        let mut timer = Scheduler::new("test");
        timer.schedule(1000.0, 500.0);
        assert!(!timer.take_due(1499.0));
        assert!(timer.take_due(1500.0));
        assert!(!timer.take_due(2000.0));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timer = Scheduler::new("test");
        timer.schedule(0.0, 100.0);
        timer.cancel();
        assert!(!timer.take_due(1_000.0));
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut timer = Scheduler::new("test");
        timer.schedule(0.0, 100.0);
        timer.schedule(0.0, 300.0);
        assert_eq!(timer.deadline(), Some(300.0));
        assert!(!timer.take_due(150.0));
        assert!(timer.take_due(300.0));
    }

    #[test]
    fn test_negative_delay_fires_immediately() {
        let mut timer = Scheduler::new("test");
        timer.schedule(50.0, -10.0);
        assert!(timer.take_due(50.0));
    }

    #[test]
    fn test_frame_loop_arm_and_cancel() {
        let mut frame_loop = FrameLoop::new();
        assert!(!frame_loop.is_armed());
        frame_loop.arm();
        assert!(frame_loop.is_armed());
        frame_loop.cancel();
        assert!(!frame_loop.is_armed());
    }
}
