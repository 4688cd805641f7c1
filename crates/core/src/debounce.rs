//! Duplicate suppression for identity-keyed presentations.
//!
//! Upstream state can emit the same "new item" signal several times in quick
//! succession. A show for an identity that was presented less than one window
//! ago is dropped. Suppression depends only on identity and time: suppressed
//! requests do not refresh the timestamp, and the pending queue is never
//! consulted.

use std::hash::{Hash, Hasher};
use std::time::Duration;

use rustc_hash::FxHasher;

/// Hashed identity of a logical payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey(u64);

impl ItemKey {
	pub fn of<K: Hash + ?Sized>(identity: &K) -> Self {
		let mut hasher = FxHasher::default();
		identity.hash(&mut hasher);
		Self(hasher.finish())
	}
}

#[derive(Debug)]
pub struct Debouncer {
	window: Duration,
	last: Option<(ItemKey, Duration)>,
}

impl Debouncer {
	pub fn new(window: Duration) -> Self {
		Self { window, last: None }
	}

	/// Returns true when a show for `key` at `now` must be dropped.
	pub fn is_duplicate(&self, key: ItemKey, now: Duration) -> bool {
		matches!(self.last, Some((last, at)) if last == key && now.saturating_sub(at) < self.window)
	}

	/// Records an accepted presentation.
	pub fn record(&mut self, key: ItemKey, now: Duration) {
		self.last = Some((key, now));
	}

	/// Checks and records in one step. Returns true if the show was accepted.
	pub fn admit(&mut self, key: ItemKey, now: Duration) -> bool {
		if self.is_duplicate(key, now) {
			tracing::debug!(?key, ?now, "Suppressing duplicate identity-keyed show");
			return false;
		}
		self.record(key, now);
		true
	}

	pub fn reset(&mut self) {
		self.last = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const WINDOW: Duration = Duration::from_secs(1);

	#[test]
	fn same_identity_inside_window_is_suppressed() {
		let mut debouncer = Debouncer::new(WINDOW);
		let key = ItemKey::of("upload-complete");
		assert!(debouncer.admit(key, Duration::from_millis(0)));
		assert!(!debouncer.admit(key, Duration::from_millis(400)));
		assert!(!debouncer.admit(key, Duration::from_millis(999)));
	}

	#[test]
	fn suppressed_request_does_not_extend_window() {
		let mut debouncer = Debouncer::new(WINDOW);
		let key = ItemKey::of(&7u32);
		assert!(debouncer.admit(key, Duration::ZERO));
		assert!(!debouncer.admit(key, Duration::from_millis(900)));
		assert!(debouncer.admit(key, Duration::from_millis(1_000)));
	}

	#[test]
	fn different_identity_is_admitted() {
		let mut debouncer = Debouncer::new(WINDOW);
		assert!(debouncer.admit(ItemKey::of("a"), Duration::ZERO));
		assert!(debouncer.admit(ItemKey::of("b"), Duration::from_millis(10)));
		assert!(debouncer.admit(ItemKey::of("a"), Duration::from_millis(20)));
	}

	#[test]
	fn reset_forgets_last_identity() {
		let mut debouncer = Debouncer::new(WINDOW);
		let key = ItemKey::of("x");
		debouncer.record(key, Duration::ZERO);
		debouncer.reset();
		assert!(!debouncer.is_duplicate(key, Duration::from_millis(1)));
	}
}
