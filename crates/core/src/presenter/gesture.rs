//! Interactive dismissal.

use super::Presenter;
use crate::drag::{DragOutcome, DragSample, EdgeCorrection, SampleUpdate};
use crate::progress::RevealProgress;
use crate::state::{DismissReason, Edge, PresentationState};

impl<P> Presenter<P> {
	/// Starts a drag gesture on the visible presentation.
	///
	/// Pauses the dismiss timer and snapshots the current reveal progress as
	/// the gesture's reference. Returns false if nothing draggable is showing.
	pub fn drag_begin(&mut self) -> bool {
		if self.state != PresentationState::Visible || self.is_busy() || self.drag.is_active() {
			return false;
		}
		self.timer.cancel(&mut self.queue);
		let current = self.reveal_progress().clamped();
		self.animation = None;
		self.progress = current;
		self.drag.begin(current);
		self.drag_edge = if current.is_shown() { Edge::AtTop } else { Edge::InTransit };
		self.state = PresentationState::DismissingInteractive;
		tracing::trace!(token = ?self.active, reference = current.value(), "Drag started");
		true
	}

	/// Feeds the offset of the active gesture, measured from the shown position.
	pub fn drag_sample(&mut self, offset: f32) -> SampleUpdate {
		if self.state != PresentationState::DismissingInteractive {
			return SampleUpdate::Ignored;
		}
		let update = self.drag.sample(DragSample { offset, at: self.now });
		match update {
			SampleUpdate::Tracking { progress, edge } => {
				self.progress = progress;
				self.drag_edge = edge;
			}
			SampleUpdate::Reversed => self.snap_back(),
			SampleUpdate::Ignored => {}
		}
		update
	}

	/// Ends the gesture.
	///
	/// `velocity` is the release velocity toward the hidden side; when `None`
	/// it is estimated from the last samples. Returns `None` if the gesture
	/// had already resolved (a reversal) or none was running.
	pub fn drag_release(&mut self, velocity: Option<f32>) -> Option<DragOutcome> {
		let outcome = self.drag.release(self.now, velocity)?;
		if self.state != PresentationState::DismissingInteractive {
			return None;
		}
		match outcome {
			DragOutcome::SnapBack => self.snap_back(),
			DragOutcome::Commit { release } => {
				self.dismiss_now(DismissReason::Dragged, Some(release));
			}
		}
		Some(outcome)
	}

	/// Reports an offset the scroll surface settled on outside any gesture.
	///
	/// After the post-release cooldown, an offset past the hidden edge commits
	/// a dismissal and one stuck in transit snaps back. Only a settled,
	/// fully revealed presentation is corrected.
	pub fn observe_offset(&mut self, offset: f32) -> Option<EdgeCorrection> {
		let settled = self.animation.is_none() && self.progress.is_shown();
		if self.state != PresentationState::Visible || self.is_busy() || !settled {
			return None;
		}
		let correction = self.drag.edge_correction(offset, self.now)?;
		tracing::debug!(offset, ?correction, "Edge correction");
		match correction {
			EdgeCorrection::Dismiss => {
				let from = self.drag.progress_for(offset).unwrap_or(RevealProgress::HIDDEN);
				self.dismiss_now(DismissReason::Dragged, Some(from));
			}
			EdgeCorrection::SnapBack => self.snap_back(),
		}
		Some(correction)
	}
}
