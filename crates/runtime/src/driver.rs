use std::future;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use toastline_core::{Presenter, Snapshot};

use crate::command::Command;

/// Publish cadence while an entry or exit animation is running.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Owns the presenter until every handle is dropped.
///
/// Host time is the elapsed time since the driver started. The loop wakes on
/// a command, on the presenter's next deadline, or once per frame while an
/// animation runs. It advances the presenter to the current instant and
/// publishes the snapshot when it changed. A deadline too far out to
/// represent as an [`Instant`] never wakes the loop.
pub(crate) async fn run<P>(
	mut presenter: Presenter<P>,
	mut commands: mpsc::UnboundedReceiver<Command<P>>,
	snapshots: watch::Sender<Snapshot>,
) {
	let origin = Instant::now();
	tracing::debug!("Toast presenter driver started");

	loop {
		let mut deadline = presenter.next_deadline().and_then(|at| origin.checked_add(at));
		if presenter.is_animating() {
			let frame = Instant::now() + FRAME_INTERVAL;
			deadline = Some(deadline.map_or(frame, |at| at.min(frame)));
		}
		let wake = async {
			match deadline {
				Some(at) => tokio::time::sleep_until(at).await,
				None => future::pending::<()>().await,
			}
		};

		tokio::select! {
			biased;
			command = commands.recv() => {
				let Some(command) = command else {
					break;
				};
				presenter.advance_to(origin.elapsed());
				tracing::trace!(command = command.name(), "Applying toast command");
				command.apply(&mut presenter);
			}
			() = wake => {
				presenter.advance_to(origin.elapsed());
			}
		}

		let next = presenter.snapshot();
		snapshots.send_if_modified(|current| {
			if *current == next {
				return false;
			}
			*current = next;
			true
		});
	}

	tracing::debug!("Toast presenter driver stopped");
}
