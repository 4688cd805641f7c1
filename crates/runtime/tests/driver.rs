use std::time::Duration;

use tokio::sync::mpsc;
use toastline_core::{DismissReason, PresentationState, PresenterConfig, ShowOptions, Toast};
use toastline_runtime::{ToastHandle, spawn_presenter};

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn reporting(tx: &mpsc::UnboundedSender<(&'static str, DismissReason)>, name: &'static str) -> ShowOptions {
	let tx = tx.clone();
	ShowOptions::new().on_dismiss(move |reason| {
		let _ = tx.send((name, reason));
	})
}

#[tokio::test(start_paused = true)]
async fn timer_expiry_is_driven_by_tokio_time() {
	init_tracing();
	let (handle, mut snapshots) = spawn_presenter::<Toast>(PresenterConfig::default());
	let (tx, mut rx) = mpsc::unbounded_channel();

	handle.show_with(Toast::new("Saved"), reporting(&tx, "saved").dismiss_after(Duration::from_secs(2)));
	snapshots.changed().await.unwrap();
	assert_eq!(snapshots.borrow().state, PresentationState::Visible);
	assert!(snapshots.borrow().attached);

	tokio::time::sleep(Duration::from_millis(2_500)).await;
	assert_eq!(rx.recv().await, Some(("saved", DismissReason::Expired)));
	assert_eq!(snapshots.borrow().state, PresentationState::Hidden);
}

#[tokio::test(start_paused = true)]
async fn second_show_replaces_after_settle() {
	let (handle, snapshots) = spawn_presenter::<Toast>(PresenterConfig::default());
	let (tx, mut rx) = mpsc::unbounded_channel();

	handle.show_with(Toast::new("first"), reporting(&tx, "first"));
	handle.show_with(Toast::new("second"), reporting(&tx, "second"));
	tokio::time::sleep(Duration::from_millis(100)).await;
	assert!(snapshots.borrow().state.is_replacing());
	assert!(rx.try_recv().is_err());

	tokio::time::sleep(Duration::from_secs(1)).await;
	let snapshot = *snapshots.borrow();
	assert_eq!(snapshot.state, PresentationState::Visible);
	assert!(!snapshot.busy);
	assert_eq!(rx.recv().await, Some(("first", DismissReason::Replaced)));
}

#[tokio::test(start_paused = true)]
async fn pause_holds_until_resume() {
	let (handle, snapshots) = spawn_presenter::<&'static str>(PresenterConfig::default());

	handle.show_for("hover me", Duration::from_secs(1));
	handle.pause();
	tokio::time::sleep(Duration::from_secs(5)).await;
	assert_eq!(snapshots.borrow().state, PresentationState::Visible);

	handle.resume();
	tokio::time::sleep(Duration::from_millis(1_100)).await;
	assert_eq!(snapshots.borrow().state, PresentationState::Hidden);
}

#[tokio::test(start_paused = true)]
async fn remove_fires_pending_callbacks_and_detaches() {
	let (handle, snapshots) = spawn_presenter::<Toast>(PresenterConfig::default());
	let (tx, mut rx) = mpsc::unbounded_channel();

	handle.show_with(Toast::new("bye"), reporting(&tx, "bye"));
	handle.remove();
	assert_eq!(rx.recv().await, Some(("bye", DismissReason::Removed)));
	tokio::time::sleep(Duration::from_millis(10)).await;
	assert!(!snapshots.borrow().attached);
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_driver() {
	let (handle, mut snapshots) = spawn_presenter::<Toast>(PresenterConfig::default());
	let clone = handle.clone();
	assert!(clone.is_connected());

	drop(handle);
	drop(clone);
	assert!(snapshots.changed().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn unbounded_dismiss_delay_keeps_the_driver_alive() {
	let (handle, snapshots) = spawn_presenter::<&'static str>(PresenterConfig::default());

	handle.show_for("sticky", Duration::MAX);
	tokio::time::sleep(Duration::from_secs(1)).await;
	assert!(handle.is_connected());
	assert_eq!(snapshots.borrow().state, PresentationState::Visible);

	handle.dismiss();
	tokio::time::sleep(Duration::from_millis(400)).await;
	assert!(handle.is_connected());
	let snapshot = *snapshots.borrow();
	assert_eq!(snapshot.state, PresentationState::Hidden);
	assert!(!snapshot.busy);
}

#[tokio::test(start_paused = true)]
async fn entry_animation_is_published_frame_by_frame() {
	let (handle, snapshots) = spawn_presenter::<&'static str>(PresenterConfig::default());

	handle.show("a");
	let mut seen: Vec<f32> = Vec::new();
	for _ in 0..40 {
		tokio::time::sleep(Duration::from_millis(10)).await;
		let progress = snapshots.borrow().progress.value();
		if seen.last() != Some(&progress) {
			seen.push(progress);
		}
	}

	assert!(seen.len() > 5, "published progress values: {seen:?}");
	assert!(seen.windows(2).all(|w| w[0] <= w[1]), "progress went backwards: {seen:?}");
	assert_eq!(seen.last(), Some(&1.0));
	assert_eq!(snapshots.borrow().animation, None);
}

#[tokio::test(start_paused = true)]
async fn compact_preset_shortens_toast_delay() {
	let (handle, snapshots) = spawn_presenter::<Toast>(PresenterConfig::default());

	handle.show_with(Toast::new("Copied"), ShowOptions::new().compact());
	tokio::time::sleep(Duration::from_millis(3_500)).await;
	assert_eq!(snapshots.borrow().state, PresentationState::Hidden);
}

#[test]
fn outside_a_runtime_the_handle_is_disconnected() {
	let (handle, snapshots) = spawn_presenter::<Toast>(PresenterConfig::default());
	assert!(!handle.is_connected());
	handle.show(Toast::new("nowhere"));
	handle.dismiss();
	assert_eq!(snapshots.borrow().state, PresentationState::Hidden);

	let manual: ToastHandle<Toast> = ToastHandle::disconnected();
	manual.remove();
	assert!(!manual.is_connected());
}
