use std::time::Duration;

/// Playback surface of a slide's video element.
///
/// The synchronizer only ever touches the element of the currently active
/// slide, and it is the sole writer of play/pause/mute/position state.
pub trait MediaElement {
	/// Media length in seconds
	fn duration(&self) -> f64;
	/// Current playback position in seconds
	fn position(&self) -> f64;
	fn seek(&mut self, position: f64);
	fn play(&mut self);
	fn pause(&mut self);
	fn is_playing(&self) -> bool;
	fn set_muted(&mut self, muted: bool);
	fn is_muted(&self) -> bool;

	/// Clock hook for players without their own clock. Self-clocking
	/// implementations keep the default no-op.
	fn advance(&mut self, dt: Duration) {
		let _ = dt;
	}
}

/// Clock-driven video stand-in used by the headless driver and the tests.
pub struct SimVideo {
	duration: f64,
	position: f64,
	playing: bool,
	muted: bool,
}

impl SimVideo {
	pub fn new(duration: f64) -> Self {
		Self {
			duration,
			position: 0.0,
			playing: false,
			muted: false,
		}
	}
}

impl MediaElement for SimVideo {
	fn duration(&self) -> f64 {
		self.duration
	}

	fn position(&self) -> f64 {
		self.position
	}

	fn seek(&mut self, position: f64) {
		self.position = position.clamp(0.0, self.duration);
	}

	fn play(&mut self) {
		self.playing = true;
	}

	fn pause(&mut self) {
		self.playing = false;
	}

	fn is_playing(&self) -> bool {
		self.playing
	}

	fn set_muted(&mut self, muted: bool) {
		self.muted = muted;
	}

	fn is_muted(&self) -> bool {
		self.muted
	}

	fn advance(&mut self, dt: Duration) {
		if !self.playing {
			return;
		}
		self.position += dt.as_secs_f64();
		if self.position >= self.duration {
			// Ended; the element stays at its final position
			self.position = self.duration;
			self.playing = false;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn advances_only_while_playing() {
		let mut vid = SimVideo::new(10.0);
		vid.advance(Duration::from_secs(1));
		assert_eq!(vid.position(), 0.0);

		vid.play();
		vid.advance(Duration::from_secs(1));
		assert_eq!(vid.position(), 1.0);

		vid.pause();
		vid.advance(Duration::from_secs(1));
		assert_eq!(vid.position(), 1.0);
	}

	#[test]
	fn stops_at_end() {
		let mut vid = SimVideo::new(2.0);
		vid.play();
		vid.advance(Duration::from_secs(5));
		assert_eq!(vid.position(), 2.0);
		assert!(!vid.is_playing());
	}

	#[test]
	fn seek_clamps_to_media_length() {
		let mut vid = SimVideo::new(8.0);
		vid.seek(12.0);
		assert_eq!(vid.position(), 8.0);
		vid.seek(-1.0);
		assert_eq!(vid.position(), 0.0);
	}
}
