//! Reveal progress and its programmatic animations.
//!
//! Progress is `1.0` when the notification is fully shown and `0.0` when it is
//! fully hidden. Raw values may overshoot either end while a drag stretches
//! the content; only the stored value is clamped.

use std::time::Duration;

/// How "shown" the notification currently is.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct RevealProgress(f32);

impl RevealProgress {
	pub const HIDDEN: Self = Self(0.0);
	pub const SHOWN: Self = Self(1.0);

	/// Wraps a raw value, preserving overshoot.
	pub const fn raw(value: f32) -> Self {
		Self(value)
	}

	/// Raw value, possibly outside `[0, 1]`.
	pub const fn value(self) -> f32 {
		self.0
	}

	/// Value clamped into `[0, 1]` for storage.
	pub fn clamped(self) -> Self {
		Self(self.0.clamp(0.0, 1.0))
	}

	pub fn is_shown(self) -> bool {
		self.0 >= 1.0
	}

	pub fn is_hidden(self) -> bool {
		self.0 <= 0.0
	}
}

/// Easing curve applied to animation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
	/// Constant speed.
	Linear,
	/// `1 - (1-t)³`: fast start, soft landing.
	#[default]
	EaseOutCubic,
	/// `t³`: soft start, fast exit.
	EaseInCubic,
}

impl Easing {
	/// Applies the curve to linear progress; input is clamped to `[0, 1]`.
	#[inline]
	pub fn apply(self, t: f32) -> f32 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Easing::Linear => t,
			Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
			Easing::EaseInCubic => t * t * t,
		}
	}
}

/// Time-based tween of reveal progress, evaluated against host time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
	pub from: RevealProgress,
	pub to: RevealProgress,
	pub started_at: Duration,
	pub duration: Duration,
	pub easing: Easing,
}

impl ProgressAnimation {
	pub fn new(from: RevealProgress, to: RevealProgress, started_at: Duration, duration: Duration) -> Self {
		Self {
			from,
			to,
			started_at,
			duration,
			easing: Easing::default(),
		}
	}

	#[must_use]
	pub fn with_easing(mut self, easing: Easing) -> Self {
		self.easing = easing;
		self
	}

	/// Linear time fraction in `[0, 1]`.
	pub fn fraction(&self, now: Duration) -> f32 {
		if self.duration.is_zero() {
			return 1.0;
		}
		let elapsed = now.saturating_sub(self.started_at).as_secs_f32();
		(elapsed / self.duration.as_secs_f32()).min(1.0)
	}

	/// Interpolated progress at `now`.
	pub fn value(&self, now: Duration) -> RevealProgress {
		let t = self.easing.apply(self.fraction(now));
		RevealProgress(self.from.0 + (self.to.0 - self.from.0) * t)
	}

	pub fn is_complete(&self, now: Duration) -> bool {
		self.fraction(now) >= 1.0
	}

	pub fn ends_at(&self) -> Duration {
		self.started_at.saturating_add(self.duration)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamping_only_affects_storage_copy() {
		let overshoot = RevealProgress::raw(1.2);
		assert_eq!(overshoot.value(), 1.2);
		assert_eq!(overshoot.clamped(), RevealProgress::SHOWN);
		assert_eq!(RevealProgress::raw(-0.1).clamped(), RevealProgress::HIDDEN);
	}

	#[test]
	fn easing_endpoints_are_fixed() {
		for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInCubic] {
			assert_eq!(easing.apply(0.0), 0.0);
			assert_eq!(easing.apply(1.0), 1.0);
		}
		assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
		assert!(Easing::EaseInCubic.apply(0.5) < 0.5);
	}

	#[test]
	fn animation_interpolates_from_release_point() {
		let anim = ProgressAnimation::new(RevealProgress::raw(0.6), RevealProgress::HIDDEN, Duration::from_millis(100), Duration::from_millis(200))
			.with_easing(Easing::Linear);

		assert_eq!(anim.value(Duration::from_millis(50)).value(), 0.6);
		assert!((anim.value(Duration::from_millis(200)).value() - 0.3).abs() < 1e-5);
		assert!(anim.is_complete(Duration::from_millis(300)));
		assert_eq!(anim.value(Duration::from_millis(400)), RevealProgress::HIDDEN);
		assert_eq!(anim.ends_at(), Duration::from_millis(300));
	}

	#[test]
	fn zero_duration_animation_is_immediately_complete() {
		let anim = ProgressAnimation::new(RevealProgress::HIDDEN, RevealProgress::SHOWN, Duration::ZERO, Duration::ZERO);
		assert!(anim.is_complete(Duration::ZERO));
		assert_eq!(anim.value(Duration::ZERO), RevealProgress::SHOWN);
	}
}
