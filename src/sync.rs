use crate::reactor::event::{
	Event, Propagation, Reaction, SlideEvent, TickerEvent, VideoEvent,
};
use crate::reactor::Subscriber;
use crate::slide::{SlideDeck, SlideId};
use std::time::Duration;

/// Checks if playback has come within one transition of its end point.
///
/// An end point that is unset, zero, or beyond the media's length falls back
/// to the media's own end.
pub fn almost_ended(position: f64, duration: f64, end: Option<f64>, transition: Duration) -> bool {
	let effective_end = match end {
		Some(end) if end > 0.0 && end <= duration => end,
		_ => duration,
	};
	position >= effective_end - transition.as_secs_f64()
}

/// Watcher state for the one active video slide
struct PlaybackSession {
	slide: SlideId,
	/// Whether time updates are being monitored to release a held transition
	watcher: bool,
}

/// Gates the ticker's advance while a video background configured to hold is
/// still playing, and drives play/pause/mute of the media element in step
/// with slide activation.
///
/// Must be subscribed before the ticker so its veto reaches the advance
/// handler; `Reactor::new` takes care of that.
pub struct VideoHoldSync {
	/// Visual fade length between slides, reused as the almost-ended tolerance
	transition: Duration,
	session: Option<PlaybackSession>,
}

impl VideoHoldSync {
	pub fn new(transition: Duration) -> Self {
		Self {
			transition,
			session: None,
		}
	}

	/// Decide whether a next-slide request may proceed.
	fn gate(&mut self, deck: &mut SlideDeck) -> Propagation {
		let Some((id, slide)) = deck.active_slide_mut() else {
			return Propagation::Continue;
		};
		let name = slide.name.clone();
		let Some(bg) = slide.video_background_mut() else {
			return Propagation::Continue;
		};
		if !bg.settings.hold_until_end {
			return Propagation::Continue;
		}

		let position = bg.media.position();
		if position <= 0.0 {
			// Not playing yet (initial render); never hold on a video that
			// has not started
			return Propagation::Continue;
		}

		if almost_ended(position, bg.media.duration(), bg.settings.end, self.transition) {
			log::debug!("[Sync] '{name}' almost ended at {position:.2}s, letting advance through");
			return Propagation::Continue;
		}

		log::info!("[Sync] Holding '{name}' at {position:.2}s, watching for the end");
		self.install_watcher(id);
		Propagation::Veto
	}

	/// At most one watcher per session; installing again is a no-op rearm
	fn install_watcher(&mut self, id: SlideId) {
		match &mut self.session {
			Some(session) if session.slide == id => session.watcher = true,
			_ => {
				self.session = Some(PlaybackSession {
					slide: id,
					watcher: true,
				});
			}
		}
	}

	fn activate(&mut self, id: SlideId, deck: &mut SlideDeck) {
		let Some(slide) = deck.get_mut(id) else {
			return;
		};
		let name = slide.name.clone();
		let Some(bg) = slide.video_background_mut() else {
			return;
		};

		// Fresh session; any watcher left over from a previous activation of
		// this slide is dropped
		self.session = Some(PlaybackSession {
			slide: id,
			watcher: false,
		});

		if !bg.settings.output_sound {
			bg.media.set_muted(true);
		}
		bg.media.seek(bg.settings.start);
		bg.media.play();
		log::info!(
			"[Sync] '{}' active, playing from {:.2}s (muted={})",
			name,
			bg.settings.start,
			bg.media.is_muted()
		);
	}

	fn deactivate(&mut self, id: SlideId, deck: &mut SlideDeck, reaction: &mut Reaction) {
		let Some(slide) = deck.get(id) else {
			return;
		};
		if slide.video_background().is_none() {
			return;
		}

		// Watcher goes right away; the pause waits for the fade to finish
		if self.session.as_ref().is_some_and(|s| s.slide == id) {
			self.session = None;
		}
		log::debug!("[Sync] '{}' left active, pausing after fade", slide.name);
		reaction.schedule(
			Event::Video(VideoEvent::PauseAfterTransition { slide: id }),
			self.transition,
		);
	}

	fn time_update(&mut self, id: SlideId, deck: &mut SlideDeck, reaction: &mut Reaction) {
		let watching = self
			.session
			.as_ref()
			.is_some_and(|s| s.slide == id && s.watcher);
		if !watching {
			return;
		}
		let Some(bg) = deck.get(id).and_then(|slide| slide.video_background()) else {
			return;
		};

		if almost_ended(
			bg.media.position(),
			bg.media.duration(),
			bg.settings.end,
			self.transition,
		) {
			log::info!("[Sync] Hold released at {:.2}s, requesting next slide", bg.media.position());
			if let Some(session) = &mut self.session {
				session.watcher = false;
			}
			reaction.emit(Event::Ticker(TickerEvent::NextSlide));
		}
	}

	fn pause_after_transition(&mut self, id: SlideId, deck: &mut SlideDeck) {
		if deck.active() == Some(id) {
			// Re-activated during the fade; leave it playing
			return;
		}
		if let Some(bg) = deck.get_mut(id).and_then(|slide| slide.video_background_mut()) {
			bg.media.pause();
		}
	}
}

impl Subscriber for VideoHoldSync {
	fn on_event(
		&mut self,
		event: &Event,
		deck: &mut SlideDeck,
		reaction: &mut Reaction,
	) -> Propagation {
		match event {
			Event::Ticker(TickerEvent::NextSlide) => return self.gate(deck),
			Event::Slide(SlideEvent::BecameActive { slide }) => self.activate(*slide, deck),
			Event::Slide(SlideEvent::LeftActive { slide }) => {
				self.deactivate(*slide, deck, reaction)
			}
			Event::Video(VideoEvent::TimeUpdate { slide }) => {
				self.time_update(*slide, deck, reaction)
			}
			Event::Video(VideoEvent::PauseAfterTransition { slide }) => {
				self.pause_after_transition(*slide, deck)
			}
			_ => {}
		}
		Propagation::Continue
	}
}
