//! Presentation tokens.
//!
//! A token names one presentation instance. Tokens compare by issue order and
//! are never reused, so any delayed work captured for an older token can be
//! recognised as stale by comparing it with the presenter's active token.

use std::fmt;

/// Identifier of one presentation instance, ordered by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PresentationToken(u64);

impl PresentationToken {
	/// Returns the raw generation number.
	pub const fn generation(self) -> u64 {
		self.0
	}
}

impl fmt::Display for PresentationToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Monotonic token source owned by one presenter.
#[derive(Debug, Default)]
pub struct TokenIssuer {
	last: u64,
}

impl TokenIssuer {
	/// Creates an issuer whose first token has generation 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues the next token.
	pub fn issue(&mut self) -> PresentationToken {
		self.last = self.last.checked_add(1).unwrap_or(u64::MAX);
		PresentationToken(self.last)
	}

	/// Returns the most recently issued token, if any.
	pub fn last_issued(&self) -> Option<PresentationToken> {
		(self.last > 0).then_some(PresentationToken(self.last))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokens_are_unique_and_ordered() {
		let mut issuer = TokenIssuer::new();
		let a = issuer.issue();
		let b = issuer.issue();
		let c = issuer.issue();
		assert!(a < b && b < c);
		assert_eq!(a.generation(), 1);
		assert_eq!(issuer.last_issued(), Some(c));
	}

	#[test]
	fn fresh_issuer_has_issued_nothing() {
		assert_eq!(TokenIssuer::new().last_issued(), None);
	}

	#[test]
	fn display_is_compact() {
		let mut issuer = TokenIssuer::new();
		assert_eq!(issuer.issue().to_string(), "#1");
	}
}
