//! Presentation manager.
//!
//! [`Presenter`] is the only owner of the presentation state and the active
//! token. Timers, the drag tracker and the replacement choreographer only
//! advise; every transition is applied here.
//!
//! The presenter never reads a clock. Hosts report elapsed time through
//! [`Presenter::advance_to`] or [`Presenter::tick`], and delayed actions whose
//! deadline has passed run inside that call, each revalidated against the
//! token it was captured for.

mod gesture;

use std::hash::Hash;
use std::time::Duration;

use crate::config::PresenterConfig;
use crate::debounce::{Debouncer, ItemKey};
use crate::drag::DragTracker;
use crate::progress::{Easing, ProgressAnimation, RevealProgress};
use crate::registry::{DismissCallback, DismissRegistry};
use crate::replacement::{ChoreoPhase, Choreographer, ReplacementJob, ReplacementStep};
use crate::state::{DismissReason, Edge, PresentationState, Snapshot};
use crate::timer::{DelayedQueue, DismissTimer, Fired, revalidate};
use crate::toast::{ItemSlot, ShowOptions};
use crate::token::{PresentationToken, TokenIssuer};

/// Content bound to the token that names it.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation<P> {
	pub token: PresentationToken,
	pub payload: P,
	pub dismiss_delay: Duration,
}

/// Delayed work scheduled on the presenter's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
	/// Auto-dismiss timer expiry.
	Expire,
	/// Host finished a layout pass; start the entry animation.
	LayoutPass,
	/// Dismissal animation finished.
	ExitFinished,
	Replacement(ReplacementStep),
}

/// Command deferred while the presenter is busy.
#[derive(Debug)]
enum Pending<P> {
	Show(Presentation<P>),
	Dismiss,
}

/// Single-toast presentation manager.
///
/// `P` is the payload type handed back to the render layer untouched.
#[derive(Debug)]
pub struct Presenter<P> {
	config: PresenterConfig,
	now: Duration,
	issuer: TokenIssuer,
	state: PresentationState,
	active: Option<PresentationToken>,
	/// Visible content. Moved into the replacement job while one runs.
	current: Option<Presentation<P>>,
	queue: DelayedQueue<Action>,
	timer: DismissTimer,
	drag: DragTracker,
	drag_edge: Edge,
	choreo: Choreographer<Presentation<P>>,
	registry: DismissRegistry,
	debouncer: Debouncer,
	pending: Option<Pending<P>>,
	progress: RevealProgress,
	animation: Option<ProgressAnimation>,
	/// Token whose dismissal animation is still running.
	exiting: Option<PresentationToken>,
	/// Host called [`Presenter::pause`]; only [`Presenter::resume`] restarts the timer.
	held: bool,
	attached: bool,
}

impl<P> Default for Presenter<P> {
	fn default() -> Self {
		Self::new(PresenterConfig::default())
	}
}

impl<P> Presenter<P> {
	/// Creates a hidden, detached presenter.
	pub fn new(config: PresenterConfig) -> Self {
		Self {
			issuer: TokenIssuer::new(),
			now: Duration::ZERO,
			state: PresentationState::Hidden,
			active: None,
			current: None,
			queue: DelayedQueue::new(),
			timer: DismissTimer::new(),
			drag: DragTracker::new(config.drag.clone()),
			drag_edge: Edge::AtTop,
			choreo: Choreographer::new(config.replacement.clone()),
			registry: DismissRegistry::new(config.registry.soft_cap),
			debouncer: Debouncer::new(config.debounce.window),
			pending: None,
			progress: RevealProgress::HIDDEN,
			animation: None,
			exiting: None,
			held: false,
			attached: false,
			config,
		}
	}

	/// Configuration the presenter was built with.
	pub fn config(&self) -> &PresenterConfig {
		&self.config
	}

	/// Host time of the last advance.
	pub fn now(&self) -> Duration {
		self.now
	}

	/// Current presentation state.
	pub fn state(&self) -> PresentationState {
		self.state
	}

	/// Token of the presentation the timer and gestures act on.
	pub fn active_token(&self) -> Option<PresentationToken> {
		self.active
	}

	/// Content the render layer should draw as current.
	///
	/// While a replacement runs this is the outgoing content.
	pub fn content(&self) -> Option<&P> {
		self.current
			.as_ref()
			.or_else(|| self.choreo.job().map(|job| &job.outgoing))
			.map(|presentation| &presentation.payload)
	}

	/// Incoming content of a running replacement, once bound.
	pub fn incoming(&self) -> Option<&P> {
		self.choreo
			.job()
			.and_then(|job| job.incoming.as_ref())
			.map(|presentation| &presentation.payload)
	}

	/// Reveal progress at the current host time. May overshoot during a drag.
	pub fn reveal_progress(&self) -> RevealProgress {
		match &self.animation {
			Some(animation) => animation.value(self.now),
			None => self.progress,
		}
	}

	/// Where the rendered extent sits against the viewport edge.
	pub fn edge(&self) -> Edge {
		if self.state == PresentationState::DismissingInteractive {
			return self.drag_edge;
		}
		let progress = self.reveal_progress();
		if progress.is_shown() {
			Edge::AtTop
		} else if progress.is_hidden() {
			Edge::AtBottom
		} else {
			Edge::InTransit
		}
	}

	/// Animating a replacement or a dismissal.
	pub fn is_busy(&self) -> bool {
		!self.choreo.is_idle() || self.exiting.is_some()
	}

	/// The host overlay exists.
	pub fn is_attached(&self) -> bool {
		self.attached
	}

	/// True while an entry or exit animation is running.
	pub fn is_animating(&self) -> bool {
		self.animation.is_some()
	}

	/// True while the host holds the dismiss timer with [`pause`](Self::pause).
	pub fn is_paused(&self) -> bool {
		self.held
	}

	/// Phase of the replacement choreographer.
	pub fn replacement_phase(&self) -> ChoreoPhase {
		self.choreo.phase()
	}

	/// Completion callbacks still waiting to fire.
	pub fn registered_handlers(&self) -> usize {
		self.registry.len()
	}

	/// Read model for the render layer at the current host time.
	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			state: self.state,
			active: self.active,
			incoming: self.choreo.job_token(),
			progress: self.reveal_progress(),
			animation: self.animation,
			edge: self.edge(),
			busy: self.is_busy(),
			pending: self.pending.is_some(),
			attached: self.attached,
		}
	}

	/// Earliest host time at which calling [`advance_to`](Self::advance_to)
	/// would change anything.
	pub fn next_deadline(&self) -> Option<Duration> {
		let animation_end = self
			.animation
			.as_ref()
			.map(ProgressAnimation::ends_at)
			.filter(|end| *end > self.now);
		match (self.queue.next_deadline(), animation_end) {
			(Some(action), Some(animation)) => Some(action.min(animation)),
			(action, animation) => action.or(animation),
		}
	}

	/// Runs every delayed action due at `now`, in deadline order.
	///
	/// Each action observes the presenter at its own deadline, so chained
	/// work (a settle scheduling the idle buffer) lands where it would have
	/// with a continuous clock. Time never moves backwards.
	pub fn advance_to(&mut self, now: Duration) {
		let target = now.max(self.now);
		while let Some(fired) = self.queue.pop_due(target) {
			self.now = self.now.max(fired.deadline);
			self.run(fired);
		}
		self.now = target;
		if let Some(done) = self.animation.take_if(|animation| animation.is_complete(target)) {
			self.progress = done.to;
		}
	}

	/// Advances host time by `delta`.
	pub fn tick(&mut self, delta: Duration) {
		self.advance_to(self.now.saturating_add(delta));
	}

	/// Shows `payload` with default options.
	pub fn show(&mut self, payload: P) -> PresentationToken {
		self.show_with(payload, ShowOptions::default())
	}

	/// Shows `payload`, replacing whatever is visible.
	///
	/// While the presenter is busy the request waits in the pending slot,
	/// superseding any request already waiting there.
	pub fn show_with(&mut self, payload: P, options: ShowOptions) -> PresentationToken {
		let ShowOptions {
			dismiss_delay,
			style,
			on_dismiss,
			force,
		} = options;
		let token = self.issuer.issue();
		let presentation = Presentation {
			token,
			payload,
			dismiss_delay: dismiss_delay.unwrap_or_else(|| self.config.dismiss_delay_for(style)),
		};
		if let Some(callback) = on_dismiss {
			self.registry.register(token, callback);
		}
		self.attach();

		if force {
			tracing::debug!(%token, "Forced show; tearing down existing presentation");
			self.teardown(DismissReason::Superseded, Some(token));
			self.present(presentation);
		} else {
			self.submit(presentation);
		}
		token
	}

	/// Tears down everything first, then shows `payload`.
	pub fn force_show(&mut self, payload: P, options: ShowOptions) -> PresentationToken {
		self.show_with(payload, options.forcing())
	}

	/// Identity-keyed show.
	///
	/// A request for the identity presented less than one debounce window ago
	/// is dropped and returns `None`. Otherwise `slot` is bound to `item` and
	/// released again when this presentation ends, unless a later
	/// presentation has rebound it by then.
	pub fn show_item<K>(&mut self, slot: &ItemSlot<K>, item: K, payload: P, mut options: ShowOptions) -> Option<PresentationToken>
	where
		K: Hash + Clone + Send + 'static,
	{
		if !self.debouncer.admit(ItemKey::of(&item), self.now) {
			return None;
		}
		let callback = options.on_dismiss.take();
		let token = self.show_with(payload, options);
		slot.bind(item, token);

		let slot = slot.clone();
		let release: DismissCallback = Box::new(move |reason| {
			slot.release(token);
			if let Some(callback) = callback {
				callback(reason);
			}
		});
		self.registry.register(token, release);
		Some(token)
	}

	/// Dismisses the visible presentation.
	///
	/// No-op while hidden, including during the exit animation of an earlier
	/// dismissal. While busy the dismissal is queued behind the running
	/// animation, superseding any queued show.
	pub fn dismiss(&mut self) {
		if self.state == PresentationState::Hidden && self.pending.is_none() {
			return;
		}
		if self.is_busy() {
			self.enqueue(Pending::Dismiss);
			return;
		}
		self.dismiss_now(DismissReason::Dismissed, None);
	}

	/// Stops the dismiss timer without changing state.
	///
	/// The hold lasts until [`resume`](Self::resume) or until new content
	/// is presented; gestures and edge corrections do not lift it.
	pub fn pause(&mut self) {
		if self.active.is_some() {
			self.held = true;
		}
		if let Some(token) = self.timer.cancel(&mut self.queue) {
			tracing::trace!(%token, "Dismiss timer paused");
		}
	}

	/// Restarts the full dismiss delay. No-op unless visible.
	pub fn resume(&mut self) {
		self.held = false;
		self.restart_timer();
	}

	fn restart_timer(&mut self) {
		if self.state != PresentationState::Visible {
			return;
		}
		if let Some(current) = &self.current {
			self.timer
				.start(&mut self.queue, self.now, current.dismiss_delay, current.token, Action::Expire);
			tracing::trace!(token = %current.token, "Dismiss timer resumed");
		}
	}

	/// Starts a replacement and returns the token for the incoming content.
	///
	/// Returns `None` unless visible and idle; callers fall back to
	/// [`show`](Self::show). Bind content with
	/// [`bind_incoming`](Self::bind_incoming) before the job settles, or the
	/// job commits to hidden.
	pub fn begin_replacement(&mut self) -> Option<PresentationToken> {
		if self.state != PresentationState::Visible || self.is_busy() {
			return None;
		}
		let token = self.issuer.issue();
		self.start_replacement(token).then_some(token)
	}

	/// Binds incoming content to the replacement started for `token`.
	///
	/// Returns false (dropping the options' callback unfired) if `token` does
	/// not name the running job or content is already bound.
	pub fn bind_incoming(&mut self, token: PresentationToken, payload: P, options: ShowOptions) -> bool {
		let presentation = Presentation {
			token,
			payload,
			dismiss_delay: options
				.dismiss_delay
				.unwrap_or_else(|| self.config.dismiss_delay_for(options.style)),
		};
		if self.choreo.bind(token, presentation).is_err() {
			return false;
		}
		if let Some(callback) = options.on_dismiss {
			self.registry.register(token, callback);
		}
		true
	}

	/// Commits a running replacement.
	///
	/// The incoming token becomes active, the dismiss timer restarts and the
	/// outgoing token is retired with [`DismissReason::Replaced`]. Normally
	/// driven by the settle step; returns false when no job is running.
	pub fn complete_replacement(&mut self) -> bool {
		let Some(job) = self.choreo.settle() else {
			return false;
		};
		let token = job.token;
		self.queue
			.cancel_where(|bound, action| bound == token && matches!(action, Action::Replacement(_)));
		let ReplacementJob { outgoing, incoming, .. } = job;

		match incoming {
			Some(incoming) => {
				self.active = Some(token);
				self.state = PresentationState::Visible;
				self.progress = RevealProgress::SHOWN;
				self.held = false;
				self.timer
					.start(&mut self.queue, self.now, incoming.dismiss_delay, token, Action::Expire);
				self.current = Some(incoming);
				tracing::debug!(%token, replaced = %outgoing.token, "Replacement committed");
			}
			None => {
				self.active = None;
				self.held = false;
				self.state = PresentationState::Hidden;
				self.progress = RevealProgress::HIDDEN;
				tracing::debug!(%token, "Replacement settled without incoming content");
				self.registry.retire(token, DismissReason::Cancelled);
			}
		}
		self.animation = None;
		self.queue
			.schedule(self.now, self.choreo.idle_buffer(), token, Action::Replacement(ReplacementStep::Idle));
		self.registry.retire(outgoing.token, DismissReason::Replaced);
		true
	}

	/// Tears down a running replacement without committing it.
	///
	/// Both tokens are retired with [`DismissReason::Cancelled`] and the
	/// presenter ends hidden with no active token.
	pub fn cancel_replacement(&mut self) -> bool {
		let Some(job) = self.choreo.cancel() else {
			return false;
		};
		self.queue.cancel_token(job.token);
		self.active = None;
		self.held = false;
		self.current = None;
		self.state = PresentationState::Hidden;
		self.progress = RevealProgress::HIDDEN;
		self.animation = None;
		self.registry.retire(job.outgoing.token, DismissReason::Cancelled);
		self.registry.retire(job.token, DismissReason::Cancelled);
		self.drain_pending();
		true
	}

	/// Tears down the host overlay.
	///
	/// Every registered callback fires with [`DismissReason::Removed`]. The
	/// next show re-attaches.
	pub fn remove(&mut self) {
		self.teardown(DismissReason::Removed, None);
		self.debouncer.reset();
		if std::mem::replace(&mut self.attached, false) {
			tracing::debug!("Presenter detached");
		}
	}

	/// Records the rendered extent of the active content.
	pub fn measure(&mut self, extent: f32) {
		self.drag.measure(extent);
	}

	fn attach(&mut self) {
		if !std::mem::replace(&mut self.attached, true) {
			tracing::debug!("Presenter attached");
		}
	}

	/// Routes a show that is not forced.
	fn submit(&mut self, presentation: Presentation<P>) {
		if self.is_busy() {
			self.enqueue(Pending::Show(presentation));
			return;
		}
		match self.state {
			PresentationState::Hidden => self.present(presentation),
			PresentationState::Visible => self.replace(presentation),
			PresentationState::DismissingInteractive => {
				self.drag.cancel();
				self.state = PresentationState::Visible;
				self.progress = RevealProgress::SHOWN;
				self.replace(presentation);
			}
			PresentationState::ReplacingOutgoing | PresentationState::ReplacingIncoming => {
				self.enqueue(Pending::Show(presentation));
			}
		}
	}

	/// Shows into a hidden, idle presenter.
	fn present(&mut self, presentation: Presentation<P>) {
		let token = presentation.token;
		self.active = Some(token);
		self.state = PresentationState::Visible;
		self.progress = RevealProgress::HIDDEN;
		self.animation = None;
		self.held = false;
		self.timer
			.start(&mut self.queue, self.now, presentation.dismiss_delay, token, Action::Expire);
		self.queue
			.schedule(self.now, self.config.timing.layout_pass, token, Action::LayoutPass);
		tracing::debug!(%token, delay = ?presentation.dismiss_delay, "Presenting");
		self.current = Some(presentation);
	}

	fn replace(&mut self, incoming: Presentation<P>) {
		let token = incoming.token;
		if !self.start_replacement(token) {
			self.enqueue(Pending::Show(incoming));
			return;
		}
		let bound = self.choreo.bind(token, incoming);
		debug_assert!(bound.is_ok(), "fresh replacement job rejected its incoming content");
	}

	fn start_replacement(&mut self, token: PresentationToken) -> bool {
		if self.state != PresentationState::Visible || !self.choreo.is_idle() {
			return false;
		}
		let Some(outgoing) = self.current.take() else {
			return false;
		};
		self.timer.cancel(&mut self.queue);
		self.queue.cancel_token(outgoing.token);

		let plan = match self.choreo.begin(token, outgoing) {
			Ok(plan) => plan,
			Err(outgoing) => {
				self.current = Some(outgoing);
				return false;
			}
		};
		self.queue.schedule(
			self.now,
			plan.begin_incoming,
			token,
			Action::Replacement(ReplacementStep::BeginIncoming),
		);
		self.queue
			.schedule(self.now, plan.settle, token, Action::Replacement(ReplacementStep::Settle));
		self.state = PresentationState::ReplacingOutgoing;
		self.progress = RevealProgress::SHOWN;
		self.animation = None;
		true
	}

	/// Hides the visible presentation and retires its token with `reason`.
	///
	/// The exit animation starts from `from`, or from the current progress.
	fn dismiss_now(&mut self, reason: DismissReason, from: Option<RevealProgress>) -> bool {
		let Some(token) = self.active else {
			return false;
		};
		if !matches!(
			self.state,
			PresentationState::Visible | PresentationState::DismissingInteractive
		) {
			return false;
		}
		self.timer.cancel(&mut self.queue);
		self.queue.cancel_token(token);
		self.drag.cancel();

		let from = from.unwrap_or_else(|| self.reveal_progress()).clamped();
		let exit = self.config.timing.exit_duration;
		self.current = None;
		self.active = None;
		self.held = false;
		self.state = PresentationState::Hidden;
		self.progress = RevealProgress::HIDDEN;
		self.animation =
			Some(ProgressAnimation::new(from, RevealProgress::HIDDEN, self.now, exit).with_easing(Easing::EaseInCubic));
		self.exiting = Some(token);
		self.queue.schedule(self.now, exit, token, Action::ExitFinished);

		tracing::debug!(%token, ?reason, "Dismissed");
		self.registry.retire(token, reason);
		true
	}

	/// Resets to fully visible and makes sure the dismiss timer runs, unless
	/// the host is holding it.
	fn snap_back(&mut self) {
		self.state = PresentationState::Visible;
		self.progress = RevealProgress::SHOWN;
		self.animation = None;
		self.drag.set_stored_progress(RevealProgress::SHOWN);
		if !self.timer.is_running() && !self.held {
			self.restart_timer();
		}
	}

	/// Parks a command until idle. The newest command wins.
	fn enqueue(&mut self, command: Pending<P>) {
		if let Some(Pending::Show(previous)) = self.pending.replace(command) {
			tracing::debug!(token = %previous.token, "Queued show superseded");
			self.registry.retire(previous.token, DismissReason::Superseded);
		}
	}

	fn drain_pending(&mut self) {
		if self.is_busy() {
			return;
		}
		match self.pending.take() {
			Some(Pending::Show(presentation)) => self.submit(presentation),
			Some(Pending::Dismiss) => {
				self.dismiss_now(DismissReason::Dismissed, None);
			}
			None => {}
		}
	}

	/// Drops every presentation, job, timer and queued command.
	fn teardown(&mut self, reason: DismissReason, keep: Option<PresentationToken>) {
		self.timer.cancel(&mut self.queue);
		self.queue.clear();
		self.choreo.reset();
		self.drag.cancel();
		self.pending = None;
		self.exiting = None;
		self.held = false;
		self.animation = None;
		self.current = None;
		self.active = None;
		self.state = PresentationState::Hidden;
		self.progress = RevealProgress::HIDDEN;
		self.registry.flush(keep, reason);
	}

	fn run(&mut self, fired: Fired<Action>) {
		let Fired {
			handle, token, action, ..
		} = fired;
		let live = match action {
			Action::Expire => {
				revalidate(token, self.active) && self.state == PresentationState::Visible && self.timer.fired(handle)
			}
			Action::LayoutPass => revalidate(token, self.active) && self.state == PresentationState::Visible,
			Action::ExitFinished => revalidate(token, self.exiting),
			Action::Replacement(ReplacementStep::BeginIncoming | ReplacementStep::Settle) => {
				revalidate(token, self.choreo.job_token())
			}
			Action::Replacement(ReplacementStep::Idle) => revalidate(token, self.choreo.cooling_token()),
		};
		if !live {
			tracing::trace!(%token, ?action, "Discarding stale delayed action");
			return;
		}

		match action {
			Action::Expire => {
				tracing::debug!(%token, "Dismiss timer expired");
				self.dismiss_now(DismissReason::Expired, None);
			}
			Action::LayoutPass => {
				self.animation = Some(ProgressAnimation::new(
					self.progress,
					RevealProgress::SHOWN,
					self.now,
					self.config.timing.entry_duration,
				));
			}
			Action::ExitFinished => {
				self.exiting = None;
				self.animation = None;
				self.progress = RevealProgress::HIDDEN;
				self.drain_pending();
			}
			Action::Replacement(ReplacementStep::BeginIncoming) => {
				if self.choreo.begin_incoming() {
					self.state = PresentationState::ReplacingIncoming;
				}
			}
			Action::Replacement(ReplacementStep::Settle) => {
				self.complete_replacement();
			}
			Action::Replacement(ReplacementStep::Idle) => {
				self.choreo.finish(token);
				tracing::trace!(%token, "Replacement idle");
				self.drain_pending();
			}
		}
	}
}
