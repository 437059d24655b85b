use std::time::{Duration, Instant};

use crate::constants::{CYCLE_INTERVAL, TIMER_INTERVAL};

/// What the timers should do at a given moment
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerDue {
    /// Not yet time to tick
    Idle,
    /// Tick once
    Tick,
    /// Tick once; the timers had fallen more than a tick behind and were re-anchored to now
    Lagged,
}

/// # Scheduler
/// Tracks two independent deadlines: the next instruction cycle and the next timer tick.
///
/// Cycle deadlines are set relative to when a cycle actually ran, so a slow cycle
/// just delays the next one. Timer deadlines advance by a fixed interval from the
/// previous deadline so the timer rate doesn't drift with instruction throughput.
pub struct Scheduler {
    next_cycle: Instant,
    next_tick: Instant,
    timer_interval: Duration,
}

impl Scheduler {
    pub fn new(start: Instant) -> Self {
        Self::with_timer_interval(start, TIMER_INTERVAL)
    }

    pub fn with_timer_interval(start: Instant, timer_interval: Duration) -> Self {
        Scheduler {
            next_cycle: start,
            next_tick: start + timer_interval,
            timer_interval,
        }
    }

    pub fn cycle_due(&self, now: Instant) -> bool {
        now >= self.next_cycle
    }

    /// Records that a cycle ran at `now`; the next one is due after `wait`
    pub fn cycle_done(&mut self, now: Instant, wait: Duration) {
        self.next_cycle = now + wait;
    }

    /// Records a regular cycle
    pub fn cycle_ran(&mut self, now: Instant) {
        self.cycle_done(now, CYCLE_INTERVAL);
    }

    pub fn timer(&mut self, now: Instant) -> TimerDue {
        if now < self.next_tick {
            return TimerDue::Idle;
        }
        if now - self.next_tick >= self.timer_interval {
            self.next_tick = now + self.timer_interval;
            return TimerDue::Lagged;
        }
        self.next_tick += self.timer_interval;
        TimerDue::Tick
    }

    /// The earliest moment anything is due
    pub fn next_wake(&self) -> Instant {
        self.next_cycle.min(self.next_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_cycle_is_due_immediately() {
        let start = Instant::now();
        let scheduler = Scheduler::new(start);
        assert!(scheduler.cycle_due(start));
    }

    #[test]
    fn test_cycle_waits_after_running() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(start);
        scheduler.cycle_ran(start);
        assert!(!scheduler.cycle_due(start + ms(1)));
        assert!(scheduler.cycle_due(start + ms(2)));
    }

    #[test]
    fn test_cycle_done_with_longer_wait() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(start);
        scheduler.cycle_done(start, ms(100));
        assert!(!scheduler.cycle_due(start + ms(99)));
        assert!(scheduler.cycle_due(start + ms(100)));
    }

    #[test]
    fn test_timer_ticks_on_fixed_cadence() {
        let start = Instant::now();
        let mut scheduler = Scheduler::with_timer_interval(start, ms(10));
        assert_eq!(scheduler.timer(start + ms(9)), TimerDue::Idle);
        assert_eq!(scheduler.timer(start + ms(12)), TimerDue::Tick);
        // the next deadline is 20ms from the start, not 10ms from the late tick
        assert_eq!(scheduler.timer(start + ms(19)), TimerDue::Idle);
        assert_eq!(scheduler.timer(start + ms(20)), TimerDue::Tick);
        assert_eq!(scheduler.timer(start + ms(20)), TimerDue::Idle);
    }

    #[test]
    fn test_timer_is_independent_of_cycles() {
        let start = Instant::now();
        let mut scheduler = Scheduler::with_timer_interval(start, ms(10));
        let mut ticks = 0;
        let mut now = start;
        while now < start + ms(100) {
            if scheduler.cycle_due(now) {
                scheduler.cycle_ran(now);
            }
            if scheduler.timer(now) != TimerDue::Idle {
                ticks += 1;
            }
            now += Duration::from_micros(500);
        }
        assert_eq!(ticks, 9);
    }

    #[test]
    fn test_timer_reanchors_when_far_behind() {
        let start = Instant::now();
        let mut scheduler = Scheduler::with_timer_interval(start, ms(10));
        assert_eq!(scheduler.timer(start + ms(55)), TimerDue::Lagged);
        assert_eq!(scheduler.timer(start + ms(64)), TimerDue::Idle);
        assert_eq!(scheduler.timer(start + ms(65)), TimerDue::Tick);
    }

    #[test]
    fn test_next_wake_is_earliest_deadline() {
        let start = Instant::now();
        let mut scheduler = Scheduler::with_timer_interval(start, ms(10));
        scheduler.cycle_done(start, ms(100));
        assert_eq!(scheduler.next_wake(), start + ms(10));
        scheduler.cycle_ran(start);
        assert_eq!(scheduler.next_wake(), start + ms(2));
    }
}
