use super::event::Event;
use std::collections::VecDeque;

/// Priority event queue with 3 priority levels
pub struct EventQueue {
	queues: [VecDeque<Event>; 3],
}

impl EventQueue {
	pub fn new() -> Self {
		Self {
			queues: [
				VecDeque::new(), // High
				VecDeque::new(), // Normal
				VecDeque::new(), // Low
			],
		}
	}

	/// Push an event to the appropriate priority queue
	pub fn push(&mut self, event: Event) {
		let priority = event.priority();
		self.queues[priority.as_index()].push_back(event);
	}

	/// Pop the highest priority event available
	pub fn pop(&mut self) -> Option<Event> {
		for queue in &mut self.queues {
			if let Some(event) = queue.pop_front() {
				return Some(event);
			}
		}
		None
	}

	pub fn is_empty(&self) -> bool {
		self.queues.iter().all(|q| q.is_empty())
	}
}

impl Default for EventQueue {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactor::event::{SlideEvent, TickerEvent, VideoEvent};
	use crate::slide::SlideId;

	#[test]
	fn pops_higher_priority_first() {
		let mut queue = EventQueue::new();
		queue.push(Event::Video(VideoEvent::TimeUpdate {
			slide: SlideId(0),
		}));
		queue.push(Event::Ticker(TickerEvent::NextSlide));

		assert_eq!(queue.pop(), Some(Event::Ticker(TickerEvent::NextSlide)));
		assert_eq!(
			queue.pop(),
			Some(Event::Video(VideoEvent::TimeUpdate {
				slide: SlideId(0)
			}))
		);
		assert_eq!(queue.pop(), None);
	}

	#[test]
	fn preserves_fifo_within_a_priority() {
		let mut queue = EventQueue::new();
		queue.push(Event::Slide(SlideEvent::LeftActive {
			slide: SlideId(0),
		}));
		queue.push(Event::Slide(SlideEvent::BecameActive {
			slide: SlideId(1),
		}));

		assert_eq!(
			queue.pop(),
			Some(Event::Slide(SlideEvent::LeftActive {
				slide: SlideId(0)
			}))
		);
		assert_eq!(
			queue.pop(),
			Some(Event::Slide(SlideEvent::BecameActive {
				slide: SlideId(1)
			}))
		);
	}
}
