use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use proptest::prelude::*;
use toastline_core::{
	DismissReason, DragOutcome, ItemSlot, PresentationState, Presenter, PresenterConfig, RevealProgress, SampleUpdate,
	ShowOptions,
};

type Log = Arc<Mutex<Vec<(usize, DismissReason)>>>;

fn ms(v: u64) -> Duration {
	Duration::from_millis(v)
}

fn recorded(log: &Log, id: usize) -> ShowOptions {
	let log = Arc::clone(log);
	ShowOptions::new().on_dismiss(move |reason| log.lock().push((id, reason)))
}

fn reasons(log: &Log, id: usize) -> Vec<DismissReason> {
	log.lock().iter().filter(|(i, _)| *i == id).map(|(_, r)| *r).collect()
}

#[test]
fn shown_toast_expires_after_its_delay() {
	let log: Log = Arc::default();
	let mut presenter = Presenter::new(PresenterConfig::default());
	presenter.show_with("A", recorded(&log, 0).dismiss_after(ms(2_000)));

	presenter.advance_to(ms(2_500));
	assert_eq!(presenter.state(), PresentationState::Hidden);
	assert_eq!(reasons(&log, 0), vec![DismissReason::Expired]);
}

#[test]
fn immediate_second_show_replaces_at_settle() {
	let log: Log = Arc::default();
	let mut presenter = Presenter::new(PresenterConfig::default());
	presenter.show_with("A", recorded(&log, 0));
	let b = presenter.show_with("B", recorded(&log, 1));

	assert!(presenter.state().is_replacing());
	assert!(reasons(&log, 0).is_empty());

	presenter.advance_to(ms(699));
	assert!(reasons(&log, 0).is_empty());
	presenter.advance_to(ms(700));
	assert_eq!(presenter.state(), PresentationState::Visible);
	assert_eq!(presenter.active_token(), Some(b));
	assert_eq!(reasons(&log, 0), vec![DismissReason::Replaced]);
	assert!(reasons(&log, 1).is_empty());
}

#[test]
fn drag_to_a_fifth_then_back_snaps_to_visible() {
	let log: Log = Arc::default();
	let mut presenter = Presenter::new(PresenterConfig::default());
	presenter.measure(200.0);
	presenter.show_with("A", recorded(&log, 0));
	presenter.advance_to(ms(400));

	presenter.drag_begin();
	presenter.drag_sample(80.0);
	presenter.advance_to(ms(450));
	presenter.drag_sample(160.0);
	presenter.advance_to(ms(600));
	assert_eq!(presenter.drag_sample(30.0), SampleUpdate::Reversed);
	presenter.advance_to(ms(700));
	assert_eq!(presenter.drag_release(Some(40.0)), None);

	assert_eq!(presenter.state(), PresentationState::Visible);
	assert_eq!(presenter.reveal_progress(), RevealProgress::SHOWN);
	assert_eq!(presenter.next_deadline(), Some(ms(600 + 6_500)));
	assert!(reasons(&log, 0).is_empty());
}

#[test]
fn short_slow_release_resumes_timer() {
	let log: Log = Arc::default();
	let mut presenter = Presenter::new(PresenterConfig::default());
	presenter.measure(200.0);
	presenter.show_with("A", recorded(&log, 0));
	presenter.advance_to(ms(400));

	presenter.drag_begin();
	presenter.drag_sample(8.0);
	presenter.advance_to(ms(600));
	presenter.drag_sample(16.0);
	assert_eq!(presenter.drag_release(Some(40.0)), Some(DragOutcome::SnapBack));

	assert_eq!(presenter.state(), PresentationState::Visible);
	assert_eq!(presenter.reveal_progress(), RevealProgress::SHOWN);
	assert_eq!(presenter.next_deadline(), Some(ms(600 + 6_500)));
	assert!(reasons(&log, 0).is_empty());
}

#[test]
fn retired_token_timer_is_inert() {
	let log: Log = Arc::default();
	let mut presenter = Presenter::new(PresenterConfig::default());
	presenter.show_with("A", recorded(&log, 0).dismiss_after(ms(1_000)));
	presenter.advance_to(ms(500));
	presenter.dismiss();
	presenter.advance_to(ms(600));
	let b = presenter.show_with("B", recorded(&log, 1).dismiss_after(ms(5_000)));

	presenter.advance_to(ms(1_500));
	assert_eq!(presenter.state(), PresentationState::Visible);
	assert_eq!(presenter.active_token(), Some(b));
	assert_eq!(reasons(&log, 0), vec![DismissReason::Dismissed]);
	assert!(reasons(&log, 1).is_empty());
}

#[derive(Debug, Clone)]
enum Op {
	Show(u64),
	ShowItem(u8),
	Force,
	Dismiss,
	Pause,
	Resume,
	Advance(u64),
	DragBegin,
	DragSample(f32),
	DragRelease(f32),
	Observe(f32),
	Cancel,
	Remove,
}

fn arb_op() -> impl Strategy<Value = Op> {
	prop_oneof![
		3 => (500u64..4_000).prop_map(Op::Show),
		2 => (0u8..3).prop_map(Op::ShowItem),
		1 => Just(Op::Force),
		2 => Just(Op::Dismiss),
		1 => Just(Op::Pause),
		1 => Just(Op::Resume),
		4 => (0u64..1_500).prop_map(Op::Advance),
		1 => Just(Op::DragBegin),
		2 => (-20.0f32..200.0).prop_map(Op::DragSample),
		1 => (0.0f32..2_000.0).prop_map(Op::DragRelease),
		1 => (0.0f32..180.0).prop_map(Op::Observe),
		1 => Just(Op::Cancel),
		1 => Just(Op::Remove),
	]
}

struct Harness {
	presenter: Presenter<usize>,
	slot: ItemSlot<u8>,
	log: Log,
	issued: Vec<usize>,
	next_id: usize,
}

impl Harness {
	fn new() -> Self {
		let mut presenter = Presenter::new(PresenterConfig::default());
		presenter.measure(180.0);
		Self {
			presenter,
			slot: ItemSlot::new(),
			log: Arc::default(),
			issued: Vec::new(),
			next_id: 0,
		}
	}

	fn apply(&mut self, op: &Op) {
		let id = self.next_id;
		self.next_id += 1;
		let options = recorded(&self.log, id);
		let p = &mut self.presenter;
		match *op {
			Op::Show(delay) => {
				p.show_with(id, options.dismiss_after(ms(delay)));
				self.issued.push(id);
			}
			Op::ShowItem(item) => {
				if p.show_item(&self.slot, item, id, options).is_some() {
					self.issued.push(id);
				}
			}
			Op::Force => {
				p.force_show(id, options);
				self.issued.push(id);
			}
			Op::Dismiss => p.dismiss(),
			Op::Pause => p.pause(),
			Op::Resume => p.resume(),
			Op::Advance(delta) => p.tick(ms(delta)),
			Op::DragBegin => {
				p.drag_begin();
			}
			Op::DragSample(offset) => {
				p.drag_sample(offset);
			}
			Op::DragRelease(velocity) => {
				p.drag_release(Some(velocity));
			}
			Op::Observe(offset) => {
				p.observe_offset(offset);
			}
			Op::Cancel => {
				p.cancel_replacement();
			}
			Op::Remove => p.remove(),
		}
	}

	fn fire_counts(&self) -> BTreeMap<usize, usize> {
		let mut counts = BTreeMap::new();
		for (id, _) in self.log.lock().iter() {
			*counts.entry(*id).or_insert(0) += 1;
		}
		counts
	}
}

proptest! {
	/// Every accepted show fires its callback at most once while running, and
	/// exactly once once the overlay is torn down.
	#[test]
	fn prop_callbacks_fire_exactly_once(ops in prop::collection::vec(arb_op(), 1..40)) {
		let mut harness = Harness::new();
		for op in &ops {
			harness.apply(op);
			for (id, count) in harness.fire_counts() {
				prop_assert!(count <= 1, "callback {} fired {} times after {:?}", id, count, op);
			}
		}

		harness.presenter.tick(ms(60_000));
		let snapshot = harness.presenter.snapshot();
		if snapshot.state == PresentationState::Hidden && !snapshot.busy && !snapshot.pending {
			prop_assert_eq!(harness.presenter.registered_handlers(), 0);
		}

		harness.presenter.remove();
		let counts = harness.fire_counts();
		for id in &harness.issued {
			prop_assert_eq!(counts.get(id).copied(), Some(1), "callback {} did not fire exactly once", id);
		}
	}

	/// The state, active token and replacement job always agree.
	#[test]
	fn prop_state_and_tokens_agree(ops in prop::collection::vec(arb_op(), 1..40)) {
		let mut harness = Harness::new();
		for op in &ops {
			harness.apply(op);
			let snapshot = harness.presenter.snapshot();
			prop_assert_eq!(snapshot.state == PresentationState::Hidden, snapshot.active.is_none());
			prop_assert_eq!(snapshot.incoming.is_some(), snapshot.state.is_replacing());
			if snapshot.state.is_replacing() {
				prop_assert!(snapshot.busy);
			}
		}
	}

	/// A superseded timer never dismisses the presentation that replaced it.
	#[test]
	fn prop_superseded_timer_is_inert(first in 100u64..3_000, gap in 0u64..3_000) {
		prop_assume!(gap < first);
		let log: Log = Arc::default();
		let mut presenter = Presenter::new(PresenterConfig::default());
		presenter.show_with(0usize, recorded(&log, 0).dismiss_after(ms(first)));
		presenter.advance_to(ms(gap));
		let second = presenter.show_with(1usize, recorded(&log, 1).dismiss_after(ms(30_000)));

		presenter.advance_to(ms(first + 5_000));
		prop_assert_eq!(presenter.active_token(), Some(second));
		prop_assert_eq!(reasons(&log, 0), vec![DismissReason::Replaced]);
		prop_assert!(reasons(&log, 1).is_empty());
	}

	/// Reversing a dismiss gesture always ends fully visible with a live timer.
	#[test]
	fn prop_reversal_restores_visible(steps in prop::collection::vec(1.0f32..30.0, 1..6), back in 5.0f32..400.0) {
		let mut presenter = Presenter::new(PresenterConfig::default());
		presenter.measure(180.0);
		presenter.show(0usize);
		presenter.advance_to(ms(400));
		prop_assert!(presenter.drag_begin());

		let mut offset = 0.0;
		for step in &steps {
			offset += step;
			presenter.tick(ms(10));
			prop_assert!(matches!(presenter.drag_sample(offset), SampleUpdate::Tracking { .. }), "expected Tracking sample");
		}
		presenter.tick(ms(10));
		prop_assert_eq!(presenter.drag_sample(offset - back), SampleUpdate::Reversed);
		let now = presenter.now();
		prop_assert_eq!(presenter.drag_release(None), None);

		prop_assert_eq!(presenter.state(), PresentationState::Visible);
		prop_assert_eq!(presenter.reveal_progress(), RevealProgress::SHOWN);
		prop_assert_eq!(presenter.next_deadline(), Some(now + ms(6_500)));
	}

	/// Two shows of one identity inside the window yield one presentation.
	#[test]
	fn prop_duplicate_identity_is_debounced(gap in 0u64..1_000) {
		let log: Log = Arc::default();
		let slot = ItemSlot::new();
		let mut presenter = Presenter::new(PresenterConfig::default());

		prop_assert!(presenter.show_item(&slot, "upload", 0usize, recorded(&log, 0)).is_some());
		presenter.advance_to(ms(gap));
		prop_assert!(presenter.show_item(&slot, "upload", 1usize, recorded(&log, 1)).is_none());
		prop_assert_eq!(presenter.state(), PresentationState::Visible);
		prop_assert_eq!(presenter.content(), Some(&0));

		presenter.dismiss();
		presenter.advance_to(ms(60_000));
		prop_assert_eq!(log.lock().len(), 1);
	}
}
