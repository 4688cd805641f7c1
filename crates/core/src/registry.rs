//! Dismiss-handler registry.
//!
//! Maps presentation tokens to their completion callbacks. A callback is
//! removed before it is invoked, so it runs at most once. Past the soft cap the
//! oldest half is evicted without firing; delivery is exactly-once only for
//! entries that were never evicted.

use std::fmt;

use smallvec::SmallVec;

use crate::state::DismissReason;
use crate::token::PresentationToken;

/// Completion callback registered with a presentation.
pub type DismissCallback = Box<dyn FnOnce(DismissReason) + Send + 'static>;

struct Handler {
	token: PresentationToken,
	callback: DismissCallback,
}

/// Token → callback registry with exactly-once retirement.
pub struct DismissRegistry {
	handlers: Vec<Handler>,
	soft_cap: usize,
	evicted: u64,
}

impl fmt::Debug for DismissRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DismissRegistry")
			.field("tokens", &self.handlers.iter().map(|h| h.token).collect::<Vec<_>>())
			.field("soft_cap", &self.soft_cap)
			.field("evicted", &self.evicted)
			.finish()
	}
}

impl DismissRegistry {
	pub fn new(soft_cap: usize) -> Self {
		Self {
			handlers: Vec::new(),
			soft_cap: soft_cap.max(2),
			evicted: 0,
		}
	}

	/// Appends a handler, evicting the oldest half first when at the soft cap.
	pub fn register(&mut self, token: PresentationToken, callback: DismissCallback) {
		if self.handlers.len() >= self.soft_cap {
			let count = self.handlers.len() / 2;
			self.handlers.drain(..count);
			self.evicted += count as u64;
			tracing::warn!(count, soft_cap = self.soft_cap, "Dismiss registry over soft cap; evicted oldest handlers without firing");
		}
		self.handlers.push(Handler { token, callback });
	}

	/// Removes and fires every handler bound to `token`. Returns the number fired.
	pub fn retire(&mut self, token: PresentationToken, reason: DismissReason) -> usize {
		self.take_where(|t| t == token, reason)
	}

	/// Retires every handler except the one bound to `excluding`.
	pub fn flush(&mut self, excluding: Option<PresentationToken>, reason: DismissReason) -> usize {
		self.take_where(|t| Some(t) != excluding, reason)
	}

	pub fn contains(&self, token: PresentationToken) -> bool {
		self.handlers.iter().any(|h| h.token == token)
	}

	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}

	/// Total handlers dropped by soft-cap eviction.
	pub fn evicted(&self) -> u64 {
		self.evicted
	}

	fn take_where(&mut self, mut pred: impl FnMut(PresentationToken) -> bool, reason: DismissReason) -> usize {
		let mut taken: SmallVec<[Handler; 2]> = SmallVec::new();
		let mut i = 0;
		while i < self.handlers.len() {
			if pred(self.handlers[i].token) {
				taken.push(self.handlers.remove(i));
			} else {
				i += 1;
			}
		}

		let fired = taken.len();
		for handler in taken {
			tracing::debug!(token = %handler.token, ?reason, "Firing dismiss handler");
			(handler.callback)(reason);
		}
		fired
	}
}
