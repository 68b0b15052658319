//! Periodic tick source for the simulation loop.
//!
//! The simulation never reads a wall clock. The host advances a
//! scheduler's clock (frame time in the desktop app, fixed durations in
//! tests) and the simulation fires at most one tick per advance. Ticks
//! missed during a long stall coalesce into that one.

use std::time::Duration;

use crate::error::{LifeError, LifeResult};

/// Identifies one repeating registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

pub trait Scheduler {
    /// Register a repeating tick. Only one registration may be active;
    /// the caller must cancel the previous handle first.
    fn schedule_repeating(&mut self, period: Duration) -> LifeResult<TickHandle>;

    /// Cancel immediately. Ticks that were due but not yet drained are dropped.
    fn cancel(&mut self, handle: TickHandle);

    fn is_active(&self, handle: TickHandle) -> bool;

    /// Move the clock forward
    fn elapse(&mut self, elapsed: Duration);

    /// Whether a tick came due for `handle`. Consumes it along with any
    /// backlog of missed periods.
    fn take_due(&mut self, handle: TickHandle) -> bool;
}

#[derive(Debug)]
struct Interval {
    handle: TickHandle,
    period: Duration,
    accumulated: Duration,
}

/// Fixed-period scheduler driven by an externally advanced clock
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    next_id: u64,
    active: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any registration is active
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> LifeResult<TickHandle> {
        if period.is_zero() {
            return Err(LifeError::scheduler("tick period must be non-zero"));
        }
        if let Some(active) = &self.active {
            return Err(LifeError::scheduler(format!(
                "tick {:?} is still active",
                active.handle
            )));
        }

        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.active = Some(Interval {
            handle,
            period,
            accumulated: Duration::ZERO,
        });
        Ok(handle)
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.is_active(handle) {
            self.active = None;
        }
    }

    fn is_active(&self, handle: TickHandle) -> bool {
        self.active.as_ref().is_some_and(|active| active.handle == handle)
    }

    fn elapse(&mut self, elapsed: Duration) {
        if let Some(active) = &mut self.active {
            active.accumulated += elapsed;
        }
    }

    fn take_due(&mut self, handle: TickHandle) -> bool {
        let Some(active) = self.active.as_mut().filter(|active| active.handle == handle) else {
            return false;
        };
        if active.accumulated < active.period {
            return false;
        }
        // Keep the phase within the current period, drop whole periods
        let phase = active.accumulated.as_nanos() % active.period.as_nanos();
        active.accumulated = Duration::from_nanos(u64::try_from(phase).unwrap_or(0));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn test_ticks_come_due_per_period() {
        let mut scheduler = IntervalScheduler::new();
        let handle = scheduler.schedule_repeating(PERIOD).unwrap();

        scheduler.elapse(Duration::from_millis(99));
        assert!(!scheduler.take_due(handle));
        scheduler.elapse(Duration::from_millis(1));
        assert!(scheduler.take_due(handle));
        assert!(!scheduler.take_due(handle));
        scheduler.elapse(Duration::from_millis(150));
        assert!(scheduler.take_due(handle));
        // 50ms carried over
        scheduler.elapse(Duration::from_millis(50));
        assert!(scheduler.take_due(handle));
    }

    #[test]
    fn test_missed_periods_coalesce() {
        let mut scheduler = IntervalScheduler::new();
        let handle = scheduler.schedule_repeating(PERIOD).unwrap();

        scheduler.elapse(PERIOD * 50 + Duration::from_millis(30));
        assert!(scheduler.take_due(handle));
        assert!(!scheduler.take_due(handle));
        // Only the 30ms phase survives the stall
        scheduler.elapse(Duration::from_millis(69));
        assert!(!scheduler.take_due(handle));
        scheduler.elapse(Duration::from_millis(1));
        assert!(scheduler.take_due(handle));
    }

    #[test]
    fn test_second_registration_rejected() {
        let mut scheduler = IntervalScheduler::new();
        let first = scheduler.schedule_repeating(PERIOD).unwrap();
        assert!(matches!(
            scheduler.schedule_repeating(PERIOD),
            Err(LifeError::Scheduler(_))
        ));

        scheduler.cancel(first);
        let second = scheduler.schedule_repeating(PERIOD).unwrap();
        assert_ne!(first, second);
        assert!(!scheduler.is_active(first));
        assert!(scheduler.is_active(second));
    }

    #[test]
    fn test_cancel_drops_pending_ticks() {
        let mut scheduler = IntervalScheduler::new();
        let handle = scheduler.schedule_repeating(PERIOD).unwrap();
        scheduler.elapse(Duration::from_millis(500));
        scheduler.cancel(handle);
        assert!(!scheduler.take_due(handle));
        assert!(!scheduler.has_active());
    }

    #[test]
    fn test_stale_handle_ignored() {
        let mut scheduler = IntervalScheduler::new();
        let old = scheduler.schedule_repeating(PERIOD).unwrap();
        scheduler.cancel(old);
        let current = scheduler.schedule_repeating(PERIOD).unwrap();
        scheduler.elapse(PERIOD);

        scheduler.cancel(old);
        assert!(scheduler.is_active(current));
        assert!(!scheduler.take_due(old));
        assert!(scheduler.take_due(current));
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut scheduler = IntervalScheduler::new();
        assert!(scheduler.schedule_repeating(Duration::ZERO).is_err());
    }
}
