use std::hash::Hash;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use toastline_core::{ItemSlot, Presenter, PresenterConfig, ShowOptions, Snapshot};

use crate::command::Command;
use crate::driver;

/// Cloneable, `Send` handle to a presenter running on a tokio task.
///
/// Every method is fire-and-forget. A disconnected handle, or one whose
/// driver has stopped, drops commands silently.
pub struct ToastHandle<P> {
	tx: Option<mpsc::UnboundedSender<Command<P>>>,
}

impl<P> Clone for ToastHandle<P> {
	fn clone(&self) -> Self {
		Self { tx: self.tx.clone() }
	}
}

impl<P> std::fmt::Debug for ToastHandle<P> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ToastHandle")
			.field("connected", &self.is_connected())
			.finish()
	}
}

/// Spawns a presenter on the current tokio runtime.
///
/// Returns a disconnected handle, and a receiver that only ever holds the
/// default snapshot, when called outside a runtime.
pub fn spawn_presenter<P>(config: PresenterConfig) -> (ToastHandle<P>, watch::Receiver<Snapshot>)
where
	P: Send + 'static,
{
	let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());
	let Ok(runtime) = tokio::runtime::Handle::try_current() else {
		tracing::warn!("No tokio runtime available; toast presenter is disconnected");
		return (ToastHandle::disconnected(), snapshot_rx);
	};

	let (tx, rx) = mpsc::unbounded_channel();
	runtime.spawn(driver::run(Presenter::new(config), rx, snapshot_tx));
	(ToastHandle { tx: Some(tx) }, snapshot_rx)
}

impl<P> ToastHandle<P> {
	/// A handle with no presenter behind it.
	pub fn disconnected() -> Self {
		Self { tx: None }
	}

	/// True while a driver task is receiving commands.
	pub fn is_connected(&self) -> bool {
		self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
	}

	fn send(&self, command: Command<P>) {
		let Some(tx) = &self.tx else {
			return;
		};
		if let Err(mpsc::error::SendError(command)) = tx.send(command) {
			tracing::trace!(command = command.name(), "Toast presenter stopped; dropping command");
		}
	}

	pub fn dismiss(&self) {
		self.send(Command::Dismiss);
	}

	pub fn pause(&self) {
		self.send(Command::Pause);
	}

	pub fn resume(&self) {
		self.send(Command::Resume);
	}

	/// Reports the rendered extent of the active content.
	pub fn measure(&self, extent: f32) {
		self.send(Command::Measure(extent));
	}

	pub fn drag_begin(&self) {
		self.send(Command::DragBegin);
	}

	pub fn drag_sample(&self, offset: f32) {
		self.send(Command::DragSample(offset));
	}

	pub fn drag_release(&self, velocity: Option<f32>) {
		self.send(Command::DragRelease(velocity));
	}

	pub fn observe_offset(&self, offset: f32) {
		self.send(Command::ObserveOffset(offset));
	}

	pub fn cancel_replacement(&self) {
		self.send(Command::CancelReplacement);
	}

	/// Tears down the overlay; the next show re-attaches.
	pub fn remove(&self) {
		self.send(Command::Remove);
	}
}

impl<P: Send + 'static> ToastHandle<P> {
	pub fn show(&self, payload: P) {
		self.show_with(payload, ShowOptions::default());
	}

	pub fn show_with(&self, payload: P, options: ShowOptions) {
		self.send(Command::Show { payload, options });
	}

	/// Shows `payload` for `delay`, overriding the style preset.
	pub fn show_for(&self, payload: P, delay: Duration) {
		self.show_with(payload, ShowOptions::new().dismiss_after(delay));
	}

	pub fn force_show(&self, payload: P, options: ShowOptions) {
		self.show_with(payload, options.forcing());
	}

	/// Identity-keyed show; see [`Presenter::show_item`].
	pub fn show_item<K>(&self, slot: &ItemSlot<K>, item: K, payload: P, options: ShowOptions)
	where
		K: Hash + Clone + Send + 'static,
	{
		let slot = slot.clone();
		self.send(Command::Apply(Box::new(move |presenter| {
			presenter.show_item(&slot, item, payload, options);
		})));
	}
}
