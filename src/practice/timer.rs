//! Repeating timer driven by host-supplied timestamps.
//!
//! The timer never reads a clock. The host passes the current time to
//! [`IntervalTimer::fire`], which fires at most once per call: deadlines
//! missed while the host was not polling collapse into a single tick, the
//! way a suspended interval timer resumes. Dropping the timer cancels it.

#[derive(Debug)]
pub(crate) struct IntervalTimer {
    period_ms: f64,
    next_due_ms: f64,
}

impl IntervalTimer {
    /// Start a timer whose first tick is one period after `now_ms`.
    pub(crate) fn start(now_ms: f64, period_ms: f64) -> Self {
        let period_ms = period_ms.max(1.0);
        Self { period_ms, next_due_ms: now_ms + period_ms }
    }

    pub(crate) fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Fire if a deadline has elapsed at `now_ms`, returning the latest
    /// elapsed deadline. The next deadline is the first one after `now_ms`.
    /// Non-finite timestamps never fire.
    pub(crate) fn fire(&mut self, now_ms: f64) -> Option<f64> {
        if !now_ms.is_finite() || now_ms < self.next_due_ms {
            return None;
        }
        let missed = ((now_ms - self.next_due_ms) / self.period_ms).floor();
        if missed > 0.0 {
            log::debug!("timer skipped {missed} missed ticks");
        }
        let due = self.next_due_ms + missed * self.period_ms;
        self.next_due_ms = due + self.period_ms;
        Some(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_elapsed_period() {
        let mut timer = IntervalTimer::start(100.0, 250.0);
        assert_eq!(timer.fire(349.0), None);
        assert_eq!(timer.fire(350.0), Some(350.0));
        assert_eq!(timer.fire(350.0), None);
        assert_eq!(timer.fire(600.0), Some(600.0));
    }

    #[test]
    fn late_call_collapses_missed_deadlines() {
        let mut timer = IntervalTimer::start(100.0, 250.0);
        assert_eq!(timer.fire(900.0), Some(850.0));
        assert_eq!(timer.fire(900.0), None);
        assert_eq!(timer.fire(1099.0), None);
        assert_eq!(timer.fire(1100.0), Some(1100.0));
    }

    #[test]
    fn non_finite_time_never_fires() {
        let mut timer = IntervalTimer::start(0.0, 500.0);
        assert_eq!(timer.fire(f64::INFINITY), None);
        assert_eq!(timer.fire(f64::NAN), None);
        assert_eq!(timer.fire(500.0), Some(500.0));
    }
}
