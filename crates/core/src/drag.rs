//! Drag progress tracking.
//!
//! Converts pointer or scroll offsets into [`RevealProgress`] and classifies a
//! release as either a snap back or a committed dismissal. Offsets are
//! measured from the fully shown position, positive toward the hidden side,
//! in the same unit as the measured content extent.
//!
//! Every gesture resolves to exactly one outcome: a direction reversal
//! resolves it early as [`DragOutcome::SnapBack`], and later samples or a
//! release of that same gesture are ignored.

use std::time::Duration;

use crate::config::DragConfig;
use crate::progress::RevealProgress;
use crate::state::Edge;

/// One offset observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
	pub offset: f32,
	pub at: Duration,
}

/// How a gesture resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
	/// Return to fully visible and resume the dismiss timer.
	SnapBack,
	/// Dismiss; the exit animation starts from `release`.
	Commit { release: RevealProgress },
}

/// Result of feeding one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleUpdate {
	/// Raw progress (overshoot preserved) and edge for the render layer.
	Tracking { progress: RevealProgress, edge: Edge },
	/// The user reversed a dismiss gesture; it resolved as a snap back.
	Reversed,
	/// No gesture is active, the gesture already resolved, or nothing is measured.
	Ignored,
}

/// Correction suggested for an offset reported outside a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeCorrection {
	Dismiss,
	SnapBack,
}

#[derive(Debug, Clone)]
struct Gesture {
	reference: RevealProgress,
	min_progress: f32,
	prev: Option<DragSample>,
	last: Option<DragSample>,
	resolved: bool,
}

#[derive(Debug, Clone)]
pub struct DragTracker {
	config: DragConfig,
	extent: f32,
	stored: RevealProgress,
	gesture: Option<Gesture>,
	cooldown_until: Option<Duration>,
}

impl DragTracker {
	pub fn new(config: DragConfig) -> Self {
		Self {
			config,
			extent: 0.0,
			stored: RevealProgress::HIDDEN,
			gesture: None,
			cooldown_until: None,
		}
	}

	/// Records the rendered extent of the active notification.
	pub fn measure(&mut self, extent: f32) {
		if extent.is_finite() && extent >= 0.0 {
			self.extent = extent;
		}
	}

	pub fn extent(&self) -> f32 {
		self.extent
	}

	/// Last stored progress, clamped to `[0, 1]`.
	pub fn stored_progress(&self) -> RevealProgress {
		self.stored
	}

	pub fn set_stored_progress(&mut self, progress: RevealProgress) {
		self.stored = progress.clamped();
	}

	pub fn is_active(&self) -> bool {
		self.gesture.as_ref().is_some_and(|g| !g.resolved)
	}

	pub fn in_cooldown(&self, now: Duration) -> bool {
		self.cooldown_until.is_some_and(|until| now < until)
	}

	/// Starts a gesture, snapshotting `current` as its reference point.
	pub fn begin(&mut self, current: RevealProgress) {
		let reference = current.clamped();
		self.gesture = Some(Gesture {
			reference,
			min_progress: reference.value(),
			prev: None,
			last: None,
			resolved: false,
		});
		self.stored = reference;
	}

	/// Abandons the current gesture without an outcome.
	pub fn cancel(&mut self) {
		self.gesture = None;
	}

	/// Normalised progress for an offset: `1 - offset / extent`.
	pub fn progress_for(&self, offset: f32) -> Option<RevealProgress> {
		(self.extent > 0.0).then(|| RevealProgress::raw(1.0 - offset / self.extent))
	}

	/// Classifies an offset against the viewport edge with the configured tolerance.
	pub fn edge_for(&self, offset: f32) -> Edge {
		let tolerance = self.config.edge_tolerance;
		if offset <= tolerance {
			Edge::AtTop
		} else if offset >= self.extent - tolerance {
			Edge::AtBottom
		} else {
			Edge::InTransit
		}
	}

	/// Feeds one sample of the active gesture.
	pub fn sample(&mut self, sample: DragSample) -> SampleUpdate {
		let Some(progress) = self.progress_for(sample.offset) else {
			return SampleUpdate::Ignored;
		};
		let edge = self.edge_for(sample.offset);
		let reversal_slack = self.config.reversal_tolerance / self.extent;
		let Some(gesture) = self.gesture.as_mut().filter(|g| !g.resolved) else {
			return SampleUpdate::Ignored;
		};

		let dismissing = gesture.min_progress < gesture.reference.value();
		if dismissing && progress.value() > gesture.min_progress + reversal_slack {
			tracing::trace!(progress = progress.value(), min = gesture.min_progress, "Dismiss gesture reversed");
			gesture.resolved = true;
			self.stored = RevealProgress::SHOWN;
			return SampleUpdate::Reversed;
		}

		gesture.min_progress = gesture.min_progress.min(progress.value());
		gesture.prev = gesture.last.replace(sample);
		self.stored = progress.clamped();
		tracing::trace!(offset = sample.offset, progress = progress.value(), ?edge, "Drag sample");
		SampleUpdate::Tracking { progress, edge }
	}

	/// Ends the gesture and classifies its intent.
	///
	/// `velocity` is the host-reported release velocity in the dismiss
	/// direction; when absent it is estimated from the last two samples.
	/// Returns `None` if no unresolved gesture was active.
	pub fn release(&mut self, at: Duration, velocity: Option<f32>) -> Option<DragOutcome> {
		let gesture = self.gesture.take()?;
		self.cooldown_until = Some(at.saturating_add(self.config.cooldown));
		if gesture.resolved {
			return None;
		}

		let Some(last) = gesture.last else {
			self.stored = RevealProgress::SHOWN;
			return Some(DragOutcome::SnapBack);
		};
		let velocity = velocity.unwrap_or_else(|| estimate_velocity(gesture.prev, last));
		let reference_offset = (1.0 - gesture.reference.value()) * self.extent;
		let distance = last.offset - reference_offset;

		let outcome = if self.commits(velocity, distance) {
			DragOutcome::Commit {
				release: self.progress_for(last.offset).unwrap_or(self.stored),
			}
		} else {
			self.stored = RevealProgress::SHOWN;
			DragOutcome::SnapBack
		};
		tracing::debug!(velocity, distance, extent = self.extent, ?outcome, "Drag released");
		Some(outcome)
	}

	/// Any one threshold is sufficient to commit.
	pub fn commits(&self, velocity: f32, distance: f32) -> bool {
		velocity > self.config.fling_velocity
			|| distance > self.extent * self.config.distance_ratio
			|| distance > self.config.min_distance
	}

	/// Suggests a correction for an offset the scroll surface settled on by itself.
	///
	/// Silent during a gesture and during the post-release cooldown, so it
	/// never fights the animation a release just started.
	pub fn edge_correction(&self, offset: f32, now: Duration) -> Option<EdgeCorrection> {
		if self.is_active() || self.in_cooldown(now) || self.extent <= 0.0 {
			return None;
		}
		match self.edge_for(offset) {
			Edge::AtTop => None,
			Edge::AtBottom => Some(EdgeCorrection::Dismiss),
			Edge::InTransit => Some(EdgeCorrection::SnapBack),
		}
	}
}

fn estimate_velocity(prev: Option<DragSample>, last: DragSample) -> f32 {
	let Some(prev) = prev else {
		return 0.0;
	};
	let dt = last.at.saturating_sub(prev.at).as_secs_f32();
	if dt <= f32::EPSILON {
		return 0.0;
	}
	(last.offset - prev.offset) / dt
}
