//! Presenter configuration.
//!
//! Every knob has a default in [`defaults`]; a TOML file only needs to name
//! the values it changes. Durations are written as integer milliseconds:
//!
//! ```toml
//! [timing]
//! dismiss_delay_ms = 4000
//!
//! [drag]
//! fling_velocity = 650.0
//!
//! [replacement]
//! tier = "rich"
//! ```

pub mod defaults;
mod error;

use std::path::Path;
use std::time::Duration;

pub use error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

use crate::toast::PresentationStyle;

/// Complete configuration for one [`Presenter`](crate::Presenter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
	/// Auto-dismiss and entry/exit timing.
	pub timing: TimingConfig,
	/// Drag classification thresholds.
	pub drag: DragConfig,
	/// Replacement choreography timing.
	pub replacement: ReplacementConfig,
	/// Dismiss-handler registry bounds.
	pub registry: RegistryConfig,
	/// Identity-keyed duplicate suppression.
	pub debounce: DebounceConfig,
}

impl PresenterConfig {
	/// Parses and validates a configuration from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a configuration file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}

	/// Checks that every value is inside its accepted range.
	pub fn validate(&self) -> Result<()> {
		let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

		if self.timing.dismiss_delay.is_zero() {
			return invalid("timing.dismiss_delay_ms", "must be greater than zero");
		}
		if self.timing.compact_dismiss_delay.is_zero() {
			return invalid("timing.compact_dismiss_delay_ms", "must be greater than zero");
		}
		if !(self.drag.fling_velocity.is_finite() && self.drag.fling_velocity > 0.0) {
			return invalid("drag.fling_velocity", "must be a positive number");
		}
		if !(self.drag.distance_ratio > 0.0 && self.drag.distance_ratio <= 1.0) {
			return invalid("drag.distance_ratio", "must be in (0, 1]");
		}
		if !(self.drag.min_distance.is_finite() && self.drag.min_distance > 0.0) {
			return invalid("drag.min_distance", "must be a positive number");
		}
		if !(self.drag.edge_tolerance >= 0.0 && self.drag.reversal_tolerance >= 0.0) {
			return invalid("drag.edge_tolerance", "tolerances must not be negative");
		}
		if self.registry.soft_cap < 2 {
			return invalid("registry.soft_cap", "must be at least 2");
		}
		Ok(())
	}

	/// Auto-dismiss delay preset for a presentation style.
	pub fn dismiss_delay_for(&self, style: PresentationStyle) -> Duration {
		match style {
			PresentationStyle::Standard => self.timing.dismiss_delay,
			PresentationStyle::Compact => self.timing.compact_dismiss_delay,
		}
	}
}

/// Auto-dismiss and entry/exit timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
	#[serde(rename = "dismiss_delay_ms", with = "millis")]
	pub dismiss_delay: Duration,
	#[serde(rename = "compact_dismiss_delay_ms", with = "millis")]
	pub compact_dismiss_delay: Duration,
	/// Host rendering pass awaited before the entry animation starts.
	#[serde(rename = "layout_pass_ms", with = "millis")]
	pub layout_pass: Duration,
	#[serde(rename = "entry_duration_ms", with = "millis")]
	pub entry_duration: Duration,
	#[serde(rename = "exit_duration_ms", with = "millis")]
	pub exit_duration: Duration,
}

impl Default for TimingConfig {
	fn default() -> Self {
		Self {
			dismiss_delay: defaults::DISMISS_DELAY,
			compact_dismiss_delay: defaults::COMPACT_DISMISS_DELAY,
			layout_pass: defaults::LAYOUT_PASS,
			entry_duration: defaults::ENTRY_DURATION,
			exit_duration: defaults::EXIT_DURATION,
		}
	}
}

/// Drag classification thresholds. Distances share the unit of the measured extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
	pub fling_velocity: f32,
	pub distance_ratio: f32,
	pub min_distance: f32,
	pub edge_tolerance: f32,
	pub reversal_tolerance: f32,
	#[serde(rename = "cooldown_ms", with = "millis")]
	pub cooldown: Duration,
}

impl Default for DragConfig {
	fn default() -> Self {
		Self {
			fling_velocity: defaults::FLING_VELOCITY,
			distance_ratio: defaults::DISTANCE_RATIO,
			min_distance: defaults::MIN_DISTANCE,
			edge_tolerance: defaults::EDGE_TOLERANCE,
			reversal_tolerance: defaults::REVERSAL_TOLERANCE,
			cooldown: defaults::GESTURE_COOLDOWN,
		}
	}
}

/// Visual-style tier; richer tiers spend longer on the outgoing fade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualTier {
	#[default]
	Standard,
	Rich,
}

/// Replacement choreography timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacementConfig {
	pub tier: VisualTier,
	#[serde(rename = "incoming_delay_ms", with = "millis")]
	pub incoming_delay: Duration,
	#[serde(rename = "incoming_duration_ms", with = "millis")]
	pub incoming_duration: Duration,
	#[serde(rename = "settle_buffer_ms", with = "millis")]
	pub settle_buffer: Duration,
	#[serde(rename = "idle_buffer_ms", with = "millis")]
	pub idle_buffer: Duration,
}

impl ReplacementConfig {
	/// Outgoing fade length for the configured tier.
	pub fn outgoing_duration(&self) -> Duration {
		match self.tier {
			VisualTier::Standard => defaults::OUTGOING_STANDARD,
			VisualTier::Rich => defaults::OUTGOING_RICH,
		}
	}

	/// Time from job start until both phases have visually ended.
	pub fn animation_span(&self) -> Duration {
		self.outgoing_duration().max(self.incoming_delay + self.incoming_duration)
	}
}

impl Default for ReplacementConfig {
	fn default() -> Self {
		Self {
			tier: VisualTier::default(),
			incoming_delay: defaults::INCOMING_DELAY,
			incoming_duration: defaults::INCOMING_DURATION,
			settle_buffer: defaults::SETTLE_BUFFER,
			idle_buffer: defaults::IDLE_BUFFER,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
	pub soft_cap: usize,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			soft_cap: defaults::REGISTRY_SOFT_CAP,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
	#[serde(rename = "window_ms", with = "millis")]
	pub window: Duration,
}

impl Default for DebounceConfig {
	fn default() -> Self {
		Self {
			window: defaults::DEBOUNCE_WINDOW,
		}
	}
}

/// `Duration` as integer milliseconds.
mod millis {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}
