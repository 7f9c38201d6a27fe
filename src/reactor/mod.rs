pub mod event;
pub mod queue;
pub mod scheduler;

pub use event::{Event, Propagation, Reaction, SlideEvent, TickerEvent, VideoEvent};
pub use queue::EventQueue;
pub use scheduler::Scheduler;

use crate::settings::ChannelConfig;
use crate::slide::SlideDeck;
use crate::sync::VideoHoldSync;
use crate::ticker::Ticker;
use std::time::{Duration, Instant};

/// A component reacting to lifecycle events in subscription order.
pub trait Subscriber {
	fn on_event(
		&mut self,
		event: &Event,
		deck: &mut SlideDeck,
		reaction: &mut Reaction,
	) -> Propagation;
}

/// Single-threaded lifecycle bus driving the deck at a fixed timestep.
///
/// Events are dispatched to subscribers in subscription order, and a veto on
/// a cancelable event stops the walk. The hold gate is subscribed before the
/// ticker so it can veto an advance before the default handler sees it; that
/// ordering is a hard precondition of the hold feature.
pub struct Reactor {
	queue: EventQueue,
	scheduler: Scheduler,
	deck: SlideDeck,
	subscribers: Vec<Box<dyn Subscriber>>,
}

impl Reactor {
	pub fn new(deck: SlideDeck, channel: &ChannelConfig) -> Self {
		log::info!(
			"Initializing reactor: {} slides, {:.1}s per slide, {:.1}s fade",
			deck.len(),
			channel.slide_duration.as_secs_f64(),
			channel.transition_duration.as_secs_f64()
		);
		Self {
			queue: EventQueue::new(),
			scheduler: Scheduler::new(),
			deck,
			// Gate before ticker; see the struct docs
			subscribers: vec![
				Box::new(VideoHoldSync::new(channel.transition_duration)),
				Box::new(Ticker::new(channel.slide_duration)),
			],
		}
	}

	/// Kick off the slideshow on the next tick
	pub fn start(&mut self) {
		self.queue.push(Event::Ticker(TickerEvent::Start));
	}

	pub fn publish(&mut self, event: Event) {
		self.queue.push(event);
	}

	pub fn deck(&self) -> &SlideDeck {
		&self.deck
	}

	pub fn deck_mut(&mut self) -> &mut SlideDeck {
		&mut self.deck
	}

	/// One driver step: release due timers, move playback clocks by `dt`,
	/// then drain the event queue.
	pub fn tick(&mut self, now: Instant, dt: Duration) {
		self.scheduler.tick(&mut self.queue, now);

		for event in self.deck.advance(dt) {
			self.queue.push(event);
		}

		let mut iterations = 0;
		while let Some(event) = self.queue.pop() {
			log::trace!("Processing event: {:?}", event);
			let reaction = self.dispatch(&event);
			for e in reaction.events {
				self.queue.push(e);
			}
			for (e, delay) in reaction.scheduled {
				self.scheduler.schedule(e, delay, now);
			}

			iterations += 1;
			if iterations > 1000 {
				log::warn!("Event loop exceeded 1000 iterations, breaking");
				break;
			}
		}
	}

	fn dispatch(&mut self, event: &Event) -> Reaction {
		let mut reaction = Reaction::default();
		for subscriber in &mut self.subscribers {
			match subscriber.on_event(event, &mut self.deck, &mut reaction) {
				Propagation::Continue => {}
				Propagation::Veto => {
					if event.cancelable() {
						log::debug!("Event vetoed: {:?}", event);
						break;
					}
					log::warn!("Veto ignored for non-cancelable event: {:?}", event);
				}
			}
		}
		reaction
	}
}
