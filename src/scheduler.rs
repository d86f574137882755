//! Deferred callbacks for the session: unflip delays, countdown ticks, redeals.
//!
//! A scheduled callback is data, not a closure. Scheduling returns a
//! [`TimerHandle`]; the driver pulls due [`Fired`] events one at a time with
//! [`Scheduler::next_due`] and hands each to the session, which ignores any
//! handle it no longer owns.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};

/// Cancellable reference to a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// What a scheduled callback does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Turn a mismatched pair back over and release the lock.
    Unflip,
    /// Countdown decrement (timed mode).
    CountdownTick,
    /// Deal a fresh session after a mid-game reset.
    Redeal,
}

/// A due event, delivered in deadline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fired {
    /// Handle returned when the event was scheduled.
    pub handle: TimerHandle,
    /// The scheduled event.
    pub event: TimerEvent,
}

/// Clock and scheduler collaborator.
///
/// All callbacks are delivered on the caller's thread through
/// [`next_due`](Scheduler::next_due); nothing runs concurrently with the session.
pub trait Scheduler {
    /// Time elapsed since the scheduler's epoch.
    fn now(&self) -> Duration;

    /// Schedules `event` once, `delay` from now.
    fn after(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle;

    /// Schedules `event` every `interval`, first firing one interval from now.
    fn every(&mut self, interval: Duration, event: TimerEvent) -> TimerHandle;

    /// Cancels a scheduled event. Cancelling an unknown handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);

    /// Pops the earliest event whose deadline has elapsed, if any.
    fn next_due(&mut self) -> Option<Fired>;
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    event: TimerEvent,
    due: Duration,
    interval: Option<Duration>,
}

/// Deadline-ordered queue shared by the scheduler implementations.
#[derive(Debug, Clone, Default)]
struct TimerQueue {
    entries: Vec<Entry>,
    next_id: u64,
}

impl TimerQueue {
    fn push(&mut self, due: Duration, interval: Option<Duration>, event: TimerEvent) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            event,
            due,
            interval,
        });
        handle
    }

    fn remove(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        before != self.entries.len()
    }

    fn pop_due(&mut self, now: Duration) -> Option<Fired> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle))
            .map(|(idx, _)| idx)?;

        let fired = Fired {
            handle: self.entries[idx].handle,
            event: self.entries[idx].event,
        };

        match self.entries[idx].interval {
            Some(interval) => self.entries[idx].due += interval,
            None => {
                self.entries.remove(idx);
            }
        }
        Some(fired)
    }

    fn contains(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Scheduler driven by a logical clock that only moves on [`advance`](Self::advance).
///
/// Records every cancellation, so tests can check which handles were released.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    queue: TimerQueue,
    cancelled: Vec<TimerHandle>,
}

impl ManualScheduler {
    /// Creates a scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the logical clock forward.
    #[instrument(skip(self))]
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        trace!(now_ms = self.now.as_millis() as u64, "Clock advanced");
    }

    /// Handles passed to [`Scheduler::cancel`], in call order.
    pub fn cancelled(&self) -> &[TimerHandle] {
        &self.cancelled
    }

    /// Returns true if the handle is still scheduled.
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.queue.contains(handle)
    }

    /// Number of scheduled events.
    pub fn scheduled_count(&self) -> usize {
        self.queue.len()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn after(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        let handle = self.queue.push(self.now + delay, None, event);
        debug!(?handle, ?event, delay_ms = delay.as_millis() as u64, "Scheduled timeout");
        handle
    }

    fn every(&mut self, interval: Duration, event: TimerEvent) -> TimerHandle {
        let handle = self.queue.push(self.now + interval, Some(interval), event);
        debug!(?handle, ?event, interval_ms = interval.as_millis() as u64, "Scheduled interval");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.push(handle);
        if self.queue.remove(handle) {
            debug!(?handle, "Cancelled timer");
        }
    }

    fn next_due(&mut self) -> Option<Fired> {
        self.queue.pop_due(self.now)
    }
}

/// Scheduler backed by the wall clock, polled from an event loop.
#[derive(Debug, Clone)]
pub struct RealtimeScheduler {
    epoch: Instant,
    queue: TimerQueue,
}

impl RealtimeScheduler {
    /// Creates a scheduler whose epoch is now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            queue: TimerQueue::default(),
        }
    }

    /// Time until the earliest deadline, if anything is scheduled.
    pub fn until_next(&self) -> Option<Duration> {
        let now = self.now();
        self.queue
            .entries
            .iter()
            .map(|e| e.due.saturating_sub(now))
            .min()
    }
}

impl Default for RealtimeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RealtimeScheduler {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn after(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        let due = self.now() + delay;
        self.queue.push(due, None, event)
    }

    fn every(&mut self, interval: Duration, event: TimerEvent) -> TimerHandle {
        let due = self.now() + interval;
        self.queue.push(due, Some(interval), event)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.remove(handle);
    }

    fn next_due(&mut self) -> Option<Fired> {
        let now = self.now();
        self.queue.pop_due(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut scheduler = ManualScheduler::new();
        scheduler.after(ms(750), TimerEvent::Unflip);
        scheduler.advance(ms(749));
        assert_eq!(scheduler.next_due(), None);
        scheduler.advance(ms(1));
        assert!(matches!(
            scheduler.next_due(),
            Some(Fired {
                event: TimerEvent::Unflip,
                ..
            })
        ));
        assert_eq!(scheduler.next_due(), None);
    }

    #[test]
    fn test_events_fire_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.after(ms(900), TimerEvent::Redeal);
        let early = scheduler.after(ms(100), TimerEvent::Unflip);
        scheduler.advance(ms(1000));
        assert_eq!(scheduler.next_due().map(|f| f.handle), Some(early));
        assert_eq!(scheduler.next_due().map(|f| f.handle), Some(late));
    }

    #[test]
    fn test_interval_fires_once_per_period() {
        let mut scheduler = ManualScheduler::new();
        let tick = scheduler.every(ms(1000), TimerEvent::CountdownTick);
        scheduler.advance(ms(3500));
        let mut fired = 0;
        while let Some(f) = scheduler.next_due() {
            assert_eq!(f.handle, tick);
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert!(scheduler.is_scheduled(tick));
    }

    #[test]
    fn test_cancel_removes_and_records() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.after(ms(10), TimerEvent::Unflip);
        scheduler.cancel(handle);
        scheduler.advance(ms(20));
        assert_eq!(scheduler.next_due(), None);
        assert_eq!(scheduler.cancelled(), &[handle]);
        assert_eq!(scheduler.scheduled_count(), 0);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.after(ms(1), TimerEvent::Unflip);
        scheduler.cancel(a);
        let b = scheduler.after(ms(1), TimerEvent::Unflip);
        assert_ne!(a, b);
    }
}
