use crate::media::MediaElement;
use crate::reactor::event::{Event, VideoEvent};
use indexmap::IndexMap;
use std::fmt;
use std::time::Duration;

/// Position of a slide in its deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideId(pub usize);

impl fmt::Display for SlideId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Playback options of a video background, read once when the slide is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSettings {
	/// Playback start offset in seconds
	pub start: f64,
	/// Playback end point in seconds; unset means the media's own end
	pub end: Option<f64>,
	/// Suppress the next-slide transition until playback nears the end point
	pub hold_until_end: bool,
	/// Play audio; muted when false
	pub output_sound: bool,
}

impl Default for VideoSettings {
	fn default() -> Self {
		Self {
			start: 0.0,
			end: None,
			hold_until_end: false,
			output_sound: false,
		}
	}
}

pub struct VideoBackground {
	pub settings: VideoSettings,
	pub media: Box<dyn MediaElement>,
}

pub enum Background {
	/// Inert background; nothing to drive
	Image,
	Video(VideoBackground),
}

pub struct Slide {
	pub name: String,
	pub background: Background,
}

impl Slide {
	pub fn image(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			background: Background::Image,
		}
	}

	pub fn video(
		name: impl Into<String>,
		settings: VideoSettings,
		media: Box<dyn MediaElement>,
	) -> Self {
		Self {
			name: name.into(),
			background: Background::Video(VideoBackground { settings, media }),
		}
	}

	pub fn video_background(&self) -> Option<&VideoBackground> {
		match &self.background {
			Background::Video(bg) => Some(bg),
			Background::Image => None,
		}
	}

	pub fn video_background_mut(&mut self) -> Option<&mut VideoBackground> {
		match &mut self.background {
			Background::Video(bg) => Some(bg),
			Background::Image => None,
		}
	}
}

/// Ordered set of slides with at most one active at a time.
pub struct SlideDeck {
	slides: IndexMap<SlideId, Slide>,
	active: Option<SlideId>,
}

impl SlideDeck {
	pub fn new(slides: Vec<Slide>) -> Self {
		let slides = slides
			.into_iter()
			.enumerate()
			.map(|(index, slide)| (SlideId(index), slide))
			.collect();
		Self {
			slides,
			active: None,
		}
	}

	pub fn len(&self) -> usize {
		self.slides.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slides.is_empty()
	}

	pub fn get(&self, id: SlideId) -> Option<&Slide> {
		self.slides.get(&id)
	}

	pub fn get_mut(&mut self, id: SlideId) -> Option<&mut Slide> {
		self.slides.get_mut(&id)
	}

	pub fn first(&self) -> Option<SlideId> {
		self.slides.keys().next().copied()
	}

	/// The slide shown after `id`, wrapping at the end of the deck
	pub fn next_after(&self, id: SlideId) -> Option<SlideId> {
		if self.slides.is_empty() {
			return None;
		}
		let index = self.slides.get_index_of(&id)?;
		let next = (index + 1) % self.slides.len();
		self.slides.get_index(next).map(|(id, _)| *id)
	}

	pub fn active(&self) -> Option<SlideId> {
		self.active
	}

	pub fn set_active(&mut self, id: Option<SlideId>) {
		self.active = id;
	}

	pub fn active_slide_mut(&mut self) -> Option<(SlideId, &mut Slide)> {
		let id = self.active?;
		self.slides.get_mut(&id).map(|slide| (id, slide))
	}

	/// Move every playing video forward by `dt`, reporting a time update for
	/// each one that was playing. A video reaching its end this tick still
	/// reports its final position once.
	pub fn advance(&mut self, dt: Duration) -> Vec<Event> {
		let mut events = Vec::new();
		for (id, slide) in &mut self.slides {
			if let Some(bg) = slide.video_background_mut() {
				if bg.media.is_playing() {
					bg.media.advance(dt);
					events.push(Event::Video(VideoEvent::TimeUpdate { slide: *id }));
				}
			}
		}
		events
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::media::SimVideo;

	fn deck() -> SlideDeck {
		SlideDeck::new(vec![
			Slide::image("welcome"),
			Slide::video("trailer", VideoSettings::default(), Box::new(SimVideo::new(10.0))),
			Slide::image("menu"),
		])
	}

	#[test]
	fn next_after_wraps() {
		let deck = deck();
		assert_eq!(deck.next_after(SlideId(0)), Some(SlideId(1)));
		assert_eq!(deck.next_after(SlideId(2)), Some(SlideId(0)));
	}

	#[test]
	fn advance_reports_playing_videos_only() {
		let mut deck = deck();
		assert!(deck.advance(Duration::from_millis(100)).is_empty());

		deck.get_mut(SlideId(1))
			.unwrap()
			.video_background_mut()
			.unwrap()
			.media
			.play();
		let events = deck.advance(Duration::from_millis(100));
		assert_eq!(
			events,
			vec![Event::Video(VideoEvent::TimeUpdate {
				slide: SlideId(1)
			})]
		);
	}

	#[test]
	fn advance_reports_the_final_position_once() {
		let mut deck = SlideDeck::new(vec![Slide::video(
			"short",
			VideoSettings::default(),
			Box::new(SimVideo::new(1.0)),
		)]);
		deck.get_mut(SlideId(0))
			.unwrap()
			.video_background_mut()
			.unwrap()
			.media
			.play();

		assert_eq!(deck.advance(Duration::from_secs(2)).len(), 1);
		// Ended; no further updates
		assert!(deck.advance(Duration::from_secs(1)).is_empty());
	}
}
