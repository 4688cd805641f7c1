//! Presentation state and the read-model handed to the render layer.

use std::time::Duration;

use crate::progress::{ProgressAnimation, RevealProgress};
use crate::token::PresentationToken;

/// What the render layer shows. Exactly one value exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationState {
	#[default]
	Hidden,
	Visible,
	/// User-driven dismissal in progress, not yet committed.
	DismissingInteractive,
	/// Replacement job running its exit animation.
	ReplacingOutgoing,
	/// Replacement job running its entry animation.
	ReplacingIncoming,
}

impl PresentationState {
	/// True while any content is on screen.
	pub fn is_presenting(self) -> bool {
		!matches!(self, Self::Hidden)
	}

	pub fn is_replacing(self) -> bool {
		matches!(self, Self::ReplacingOutgoing | Self::ReplacingIncoming)
	}
}

/// Why a completion callback fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
	/// The auto-dismiss timer expired.
	Expired,
	/// An explicit `dismiss()` call.
	Dismissed,
	/// A drag gesture committed to dismissal.
	Dragged,
	/// A replacement settled and this presentation was the outgoing one.
	Replaced,
	/// A newer command pre-empted this presentation before it settled.
	Superseded,
	/// The host overlay was torn down.
	Removed,
	/// The replacement this presentation belonged to was cancelled.
	Cancelled,
}

/// Where the rendered extent sits relative to the host viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Edge {
	/// Fully within the viewport: completely revealed.
	#[default]
	AtTop,
	/// Fully past the viewport edge: completely hidden.
	AtBottom,
	InTransit,
}

/// Everything the render layer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
	pub state: PresentationState,
	pub active: Option<PresentationToken>,
	/// Token bound to incoming content while a replacement runs.
	pub incoming: Option<PresentationToken>,
	/// Progress at the host time the snapshot was taken.
	pub progress: RevealProgress,
	/// Running entry or exit animation, for interpolating between snapshots.
	pub animation: Option<ProgressAnimation>,
	pub edge: Edge,
	/// Animating a replacement or a dismissal; new commands are queued.
	pub busy: bool,
	/// A command is waiting for the presenter to become idle.
	pub pending: bool,
	/// The host overlay exists.
	pub attached: bool,
}

impl Default for Snapshot {
	fn default() -> Self {
		Self {
			state: PresentationState::Hidden,
			active: None,
			incoming: None,
			progress: RevealProgress::HIDDEN,
			animation: None,
			edge: Edge::AtBottom,
			busy: false,
			pending: false,
			attached: false,
		}
	}
}

impl Snapshot {
	/// Reveal progress at host time `now`, following the running animation.
	pub fn progress_at(&self, now: Duration) -> RevealProgress {
		match &self.animation {
			Some(animation) => animation.value(now),
			None => self.progress,
		}
	}
}
