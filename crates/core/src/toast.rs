//! Payload types and per-show options.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::registry::DismissCallback;
use crate::state::DismissReason;
use crate::token::PresentationToken;

/// Presentation style; selects the default auto-dismiss preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationStyle {
	#[default]
	Standard,
	/// Short single-line toast with the shorter dismiss preset.
	Compact,
}

/// Default payload: a message with an optional title.
///
/// Delay presets are chosen per show through [`ShowOptions::style`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Toast {
	pub title: Option<String>,
	pub message: String,
}

impl Toast {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			title: None,
			message: message.into(),
		}
	}

	#[must_use]
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}

/// Options for one show request.
#[derive(Default)]
pub struct ShowOptions {
	/// Overrides the style preset.
	pub dismiss_delay: Option<Duration>,
	pub style: PresentationStyle,
	pub on_dismiss: Option<DismissCallback>,
	/// Tear down any existing presentation first instead of replacing it.
	pub force: bool,
}

impl ShowOptions {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn dismiss_after(mut self, delay: Duration) -> Self {
		self.dismiss_delay = Some(delay);
		self
	}

	#[must_use]
	pub fn style(mut self, style: PresentationStyle) -> Self {
		self.style = style;
		self
	}

	/// Shorthand for the [`PresentationStyle::Compact`] preset.
	#[must_use]
	pub fn compact(self) -> Self {
		self.style(PresentationStyle::Compact)
	}

	#[must_use]
	pub fn on_dismiss(mut self, callback: impl FnOnce(DismissReason) + Send + 'static) -> Self {
		self.on_dismiss = Some(Box::new(callback));
		self
	}

	#[must_use]
	pub fn forcing(mut self) -> Self {
		self.force = true;
		self
	}
}

impl fmt::Debug for ShowOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ShowOptions")
			.field("dismiss_delay", &self.dismiss_delay)
			.field("style", &self.style)
			.field("on_dismiss", &self.on_dismiss.is_some())
			.field("force", &self.force)
			.finish()
	}
}

/// Caller-owned "current item" reference for identity-keyed presentation.
///
/// The presenter binds it when an item is shown and releases it when that
/// presentation ends, but only if no later presentation has rebound it.
#[derive(Debug)]
pub struct ItemSlot<K> {
	inner: Arc<Mutex<Option<Bound<K>>>>,
}

#[derive(Debug)]
struct Bound<K> {
	item: K,
	token: Option<PresentationToken>,
}

impl<K> Clone for ItemSlot<K> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<K> Default for ItemSlot<K> {
	fn default() -> Self {
		Self {
			inner: Arc::new(Mutex::new(None)),
		}
	}
}

impl<K: Clone> ItemSlot<K> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self) -> Option<K> {
		self.inner.lock().as_ref().map(|bound| bound.item.clone())
	}

	/// Sets the item without tying it to a presentation.
	pub fn set(&self, item: K) {
		*self.inner.lock() = Some(Bound { item, token: None });
	}

	pub fn clear(&self) {
		*self.inner.lock() = None;
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_none()
	}

	pub(crate) fn bind(&self, item: K, token: PresentationToken) {
		*self.inner.lock() = Some(Bound { item, token: Some(token) });
	}

	/// Clears the slot if it is still bound to `token`. Returns true when cleared.
	pub(crate) fn release(&self, token: PresentationToken) -> bool {
		let mut slot = self.inner.lock();
		if slot.as_ref().is_some_and(|bound| bound.token == Some(token)) {
			*slot = None;
			true
		} else {
			false
		}
	}
}
