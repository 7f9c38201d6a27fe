use crate::slide::SlideId;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
	Ticker(TickerEvent),
	Slide(SlideEvent),
	Video(VideoEvent),
}

impl Event {
	pub fn priority(&self) -> Priority {
		match self {
			Event::Ticker(_) => Priority::High,
			Event::Slide(_) => Priority::Normal,
			Event::Video(VideoEvent::PauseAfterTransition { .. }) => Priority::Normal,
			Event::Video(VideoEvent::TimeUpdate { .. }) => Priority::Low,
		}
	}

	/// Whether a subscriber may veto this event, stopping the dispatch walk.
	pub fn cancelable(&self) -> bool {
		matches!(self, Event::Ticker(TickerEvent::NextSlide))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
	High = 0,
	Normal = 1,
	Low = 2,
}

impl Priority {
	pub fn as_index(&self) -> usize {
		*self as usize
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickerEvent {
	/// Kick the ticker: activate the first slide and arm the advance timer.
	Start,
	/// Advance requested. Cancelable; the hold gate sees it before the ticker.
	NextSlide,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SlideEvent {
	/// A slide just became the visible one.
	BecameActive { slide: SlideId },
	/// A slide just stopped being the visible one.
	LeftActive { slide: SlideId },
}

#[derive(Clone, Debug, PartialEq)]
pub enum VideoEvent {
	/// Playback position of a playing video moved.
	TimeUpdate { slide: SlideId },
	/// Deferred pause for a slide that left the active state.
	PauseAfterTransition { slide: SlideId },
}

/// Whether dispatch continues to later subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
	Continue,
	Veto,
}

/// Side effects requested by a subscriber while handling an event.
#[derive(Default)]
pub struct Reaction {
	/// Events to dispatch on this tick
	pub events: Vec<Event>,
	/// Events to schedule (event, delay)
	pub scheduled: Vec<(Event, Duration)>,
}

impl Reaction {
	pub fn emit(&mut self, event: Event) {
		self.events.push(event);
	}

	pub fn schedule(&mut self, event: Event, delay: Duration) {
		self.scheduled.push((event, delay));
	}
}
