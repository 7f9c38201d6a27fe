use crate::media::SimVideo;
use crate::slide::{Slide, SlideDeck, VideoSettings};
use anyhow::{Context, bail};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Channel configuration consumed by the reactor and the driver.
pub struct ChannelConfig {
	/// Visual fade length between slides (ε)
	pub transition_duration: Duration,
	/// How long the ticker shows each slide
	pub slide_duration: Duration,
	/// Driver timestep
	pub tick: Duration,
	pub slides: Vec<SlideSpec>,
}

pub enum SlideSpec {
	Image {
		name: String,
	},
	Video {
		name: String,
		url: String,
		settings: VideoSettings,
		/// Media length in seconds, for the simulated player
		media_length: f64,
	},
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChannel {
	#[serde(default = "default_transition")]
	transition_duration: f64,
	#[serde(default = "default_slide_duration")]
	slide_duration: f64,
	#[serde(default = "default_tick")]
	tick: f64,
	#[serde(default)]
	slides: Vec<RawSlide>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RawSlide {
	Image {
		name: String,
	},
	Video {
		name: String,
		url: String,
		#[serde(default)]
		start: f64,
		end: Option<f64>,
		#[serde(default)]
		hold_until_end: bool,
		#[serde(default)]
		output_sound: bool,
		#[serde(default = "default_media_length")]
		duration: f64,
	},
}

fn default_transition() -> f64 {
	0.5
}

fn default_slide_duration() -> f64 {
	8.0
}

fn default_tick() -> f64 {
	0.05
}

fn default_media_length() -> f64 {
	30.0
}

impl ChannelConfig {
	/// Load from an explicit path, or the per-user config dir when none is given.
	pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
		let path = match path {
			Some(path) => path.to_path_buf(),
			None => default_config_path().context("no config path and no user config dir")?,
		};
		log::info!("Loading channel config from {}", path.display());
		let text = std::fs::read_to_string(&path)
			.with_context(|| format!("reading {}", path.display()))?;
		Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
	}

	pub fn parse(text: &str) -> anyhow::Result<Self> {
		let raw: RawChannel = toml::from_str(text)?;
		if raw.transition_duration < 0.0 {
			bail!("transition_duration must not be negative");
		}
		if raw.slide_duration <= 0.0 {
			bail!("slide_duration must be positive");
		}
		if raw.tick <= 0.0 {
			bail!("tick must be positive");
		}

		let slides = raw
			.slides
			.into_iter()
			.map(|slide| match slide {
				RawSlide::Image { name } => Ok(SlideSpec::Image { name }),
				RawSlide::Video {
					name,
					url,
					start,
					end,
					hold_until_end,
					output_sound,
					duration,
				} => {
					if start < 0.0 {
						bail!("slide '{name}': start must not be negative");
					}
					if duration <= 0.0 {
						bail!("slide '{name}': duration must be positive");
					}
					Ok(SlideSpec::Video {
						name,
						url,
						settings: VideoSettings {
							start,
							end,
							hold_until_end,
							output_sound,
						},
						media_length: duration,
					})
				}
			})
			.collect::<anyhow::Result<Vec<_>>>()?;

		Ok(Self {
			transition_duration: Duration::from_secs_f64(raw.transition_duration),
			slide_duration: Duration::from_secs_f64(raw.slide_duration),
			tick: Duration::from_secs_f64(raw.tick),
			slides,
		})
	}

	/// Deck with a simulated player behind every video slide.
	pub fn build_deck(&self) -> SlideDeck {
		let slides = self
			.slides
			.iter()
			.map(|spec| match spec {
				SlideSpec::Image { name } => Slide::image(name.clone()),
				SlideSpec::Video {
					name,
					url,
					settings,
					media_length,
				} => {
					log::debug!("[Settings] Video slide '{name}' backed by {url}");
					Slide::video(
						name.clone(),
						settings.clone(),
						Box::new(SimVideo::new(*media_length)),
					)
				}
			})
			.collect();
		SlideDeck::new(slides)
	}
}

fn default_config_path() -> Option<PathBuf> {
	let dirs = ProjectDirs::from("", "", "signage")?;
	Some(dirs.config_dir().join("channel.toml"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_a_full_channel() {
		let config = ChannelConfig::parse(
			r#"
			transition_duration = 1.0
			slide_duration = 12.0

			[[slides]]
			kind = "image"
			name = "welcome"

			[[slides]]
			kind = "video"
			name = "trailer"
			url = "https://example.com/trailer.mp4"
			start = 2.0
			end = 30.0
			hold_until_end = true
			output_sound = true
			duration = 42.0
			"#,
		)
		.unwrap();

		assert_eq!(config.transition_duration, Duration::from_secs(1));
		assert_eq!(config.slide_duration, Duration::from_secs(12));
		assert_eq!(config.slides.len(), 2);
		match &config.slides[1] {
			SlideSpec::Video {
				settings,
				media_length,
				..
			} => {
				assert_eq!(settings.start, 2.0);
				assert_eq!(settings.end, Some(30.0));
				assert!(settings.hold_until_end);
				assert!(settings.output_sound);
				assert_eq!(*media_length, 42.0);
			}
			SlideSpec::Image { .. } => panic!("expected a video slide"),
		}
	}

	#[test]
	fn video_fields_default_like_unset_admin_fields() {
		let config = ChannelConfig::parse(
			r#"
			[[slides]]
			kind = "video"
			name = "loop"
			url = "file:///loop.mp4"
			"#,
		)
		.unwrap();

		assert_eq!(config.transition_duration, Duration::from_millis(500));
		match &config.slides[0] {
			SlideSpec::Video { settings, .. } => {
				assert_eq!(settings.start, 0.0);
				assert_eq!(settings.end, None);
				assert!(!settings.hold_until_end);
				assert!(!settings.output_sound);
			}
			SlideSpec::Image { .. } => panic!("expected a video slide"),
		}
	}

	#[test]
	fn rejects_nonsense_timing() {
		assert!(ChannelConfig::parse("slide_duration = 0.0").is_err());
		assert!(ChannelConfig::parse("transition_duration = -1.0").is_err());
	}

	#[test]
	fn rejects_unknown_slide_kinds() {
		let result = ChannelConfig::parse(
			r#"
			[[slides]]
			kind = "pdf"
			name = "brochure"
			"#,
		);
		assert!(result.is_err());
	}

	#[test]
	fn build_deck_matches_the_slide_list() {
		let config = ChannelConfig::parse(
			r#"
			[[slides]]
			kind = "image"
			name = "a"

			[[slides]]
			kind = "video"
			name = "b"
			url = "file:///b.mp4"
			duration = 10.0
			"#,
		)
		.unwrap();

		let deck = config.build_deck();
		assert_eq!(deck.len(), 2);
		assert!(
			deck.get(crate::slide::SlideId(1))
				.unwrap()
				.video_background()
				.is_some()
		);
	}
}
