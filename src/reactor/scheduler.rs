use super::event::Event;
use super::queue::EventQueue;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

struct ScheduledEvent {
	emit_at: Instant,
	event: Event,
}

impl PartialEq for ScheduledEvent {
	fn eq(&self, other: &Self) -> bool {
		self.emit_at == other.emit_at
	}
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for ScheduledEvent {
	fn cmp(&self, other: &Self) -> Ordering {
		other.emit_at.cmp(&self.emit_at)
	}
}

/// Delay scheduler on an explicit clock, so tests can run on fabricated instants.
pub struct Scheduler {
	pending: BinaryHeap<ScheduledEvent>,
}

impl Scheduler {
	pub fn new() -> Self {
		Self {
			pending: BinaryHeap::new(),
		}
	}

	/// Schedule an event to fire `delay` after `now`
	pub fn schedule(&mut self, event: Event, delay: Duration, now: Instant) {
		self.pending.push(ScheduledEvent {
			emit_at: now + delay,
			event,
		});
	}

	/// Drain events due at `now` into the queue
	pub fn tick(&mut self, queue: &mut EventQueue, now: Instant) {
		while let Some(scheduled) = self.pending.peek() {
			if scheduled.emit_at <= now {
				let scheduled = self.pending.pop().unwrap();
				queue.push(scheduled.event);
			} else {
				break;
			}
		}
	}
}

impl Default for Scheduler {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactor::event::TickerEvent;

	#[test]
	fn fires_only_once_due() {
		let mut scheduler = Scheduler::new();
		let mut queue = EventQueue::new();
		let t0 = Instant::now();

		scheduler.schedule(
			Event::Ticker(TickerEvent::NextSlide),
			Duration::from_millis(500),
			t0,
		);

		scheduler.tick(&mut queue, t0 + Duration::from_millis(499));
		assert!(queue.pop().is_none());

		scheduler.tick(&mut queue, t0 + Duration::from_millis(500));
		assert_eq!(queue.pop(), Some(Event::Ticker(TickerEvent::NextSlide)));
		assert!(queue.pop().is_none());
	}

	#[test]
	fn drains_in_due_order() {
		let mut scheduler = Scheduler::new();
		let mut queue = EventQueue::new();
		let t0 = Instant::now();

		scheduler.schedule(
			Event::Ticker(TickerEvent::NextSlide),
			Duration::from_secs(2),
			t0,
		);
		scheduler.schedule(Event::Ticker(TickerEvent::Start), Duration::from_secs(1), t0);

		scheduler.tick(&mut queue, t0 + Duration::from_secs(3));
		assert_eq!(queue.pop(), Some(Event::Ticker(TickerEvent::Start)));
		assert_eq!(queue.pop(), Some(Event::Ticker(TickerEvent::NextSlide)));
	}
}
