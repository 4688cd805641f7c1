use toastline_core::{Presenter, ShowOptions};

/// Deferred mutation applied by the driver task.
pub(crate) type Apply<P> = Box<dyn FnOnce(&mut Presenter<P>) + Send + 'static>;

/// Commands sent from a [`ToastHandle`](crate::ToastHandle) to the driver.
pub(crate) enum Command<P> {
	Show { payload: P, options: ShowOptions },
	Dismiss,
	Pause,
	Resume,
	Measure(f32),
	DragBegin,
	DragSample(f32),
	DragRelease(Option<f32>),
	ObserveOffset(f32),
	CancelReplacement,
	Remove,
	Apply(Apply<P>),
}

impl<P> Command<P> {
	pub(crate) fn apply(self, presenter: &mut Presenter<P>) {
		match self {
			Self::Show { payload, options } => {
				presenter.show_with(payload, options);
			}
			Self::Dismiss => presenter.dismiss(),
			Self::Pause => presenter.pause(),
			Self::Resume => presenter.resume(),
			Self::Measure(extent) => presenter.measure(extent),
			Self::DragBegin => {
				presenter.drag_begin();
			}
			Self::DragSample(offset) => {
				presenter.drag_sample(offset);
			}
			Self::DragRelease(velocity) => {
				presenter.drag_release(velocity);
			}
			Self::ObserveOffset(offset) => {
				presenter.observe_offset(offset);
			}
			Self::CancelReplacement => {
				presenter.cancel_replacement();
			}
			Self::Remove => presenter.remove(),
			Self::Apply(apply) => apply(presenter),
		}
	}

	pub(crate) fn name(&self) -> &'static str {
		match self {
			Self::Show { .. } => "show",
			Self::Dismiss => "dismiss",
			Self::Pause => "pause",
			Self::Resume => "resume",
			Self::Measure(_) => "measure",
			Self::DragBegin => "drag_begin",
			Self::DragSample(_) => "drag_sample",
			Self::DragRelease(_) => "drag_release",
			Self::ObserveOffset(_) => "observe_offset",
			Self::CancelReplacement => "cancel_replacement",
			Self::Remove => "remove",
			Self::Apply(_) => "apply",
		}
	}
}
