use crate::reactor::event::{Event, Propagation, Reaction, SlideEvent, TickerEvent};
use crate::reactor::Subscriber;
use crate::slide::SlideDeck;
use std::time::Duration;

/// Cycles the deck, publishing slide lifecycle events and re-arming its own
/// advance timer. Subscribed after the hold gate, so a vetoed advance never
/// reaches it.
pub struct Ticker {
	slide_duration: Duration,
}

impl Ticker {
	pub fn new(slide_duration: Duration) -> Self {
		Self { slide_duration }
	}

	fn start(&mut self, deck: &mut SlideDeck, reaction: &mut Reaction) {
		let Some(first) = deck.first() else {
			log::warn!("[Ticker] Empty deck, nothing to show");
			return;
		};
		log::info!("[Ticker] Starting with {} slides", deck.len());
		deck.set_active(Some(first));
		reaction.emit(Event::Slide(SlideEvent::BecameActive { slide: first }));
		reaction.schedule(Event::Ticker(TickerEvent::NextSlide), self.slide_duration);
	}

	fn advance(&mut self, deck: &mut SlideDeck, reaction: &mut Reaction) {
		let Some(current) = deck.active() else {
			return;
		};
		let Some(next) = deck.next_after(current) else {
			return;
		};

		let from = deck.get(current).map(|s| s.name.clone()).unwrap_or_default();
		let to = deck.get(next).map(|s| s.name.clone()).unwrap_or_default();
		log::info!("[Ticker] Advancing '{from}' -> '{to}'");

		deck.set_active(Some(next));
		reaction.emit(Event::Slide(SlideEvent::LeftActive { slide: current }));
		reaction.emit(Event::Slide(SlideEvent::BecameActive { slide: next }));
		reaction.schedule(Event::Ticker(TickerEvent::NextSlide), self.slide_duration);
	}
}

impl Subscriber for Ticker {
	fn on_event(
		&mut self,
		event: &Event,
		deck: &mut SlideDeck,
		reaction: &mut Reaction,
	) -> Propagation {
		match event {
			Event::Ticker(TickerEvent::Start) => self.start(deck, reaction),
			Event::Ticker(TickerEvent::NextSlide) => self.advance(deck, reaction),
			_ => {}
		}
		Propagation::Continue
	}
}
