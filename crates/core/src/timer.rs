//! Cancellable delayed actions and the dismiss timer.
//!
//! Time is an elapsed [`Duration`] supplied by the host; nothing here reads a
//! clock. Every delayed action is bound to a [`PresentationToken`] and must be
//! passed through [`revalidate`] before it is allowed to act.

use std::time::Duration;

use crate::token::PresentationToken;

/// Handle of one scheduled delayed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// Returns true when a delayed action captured for `bound` may still act.
///
/// `current` is whatever token the owner currently treats as authoritative
/// for that kind of action (the active token for dismiss timers, the in-flight
/// job token for replacement waits). A mismatch means the action was
/// superseded and must be discarded silently.
#[inline]
pub fn revalidate(bound: PresentationToken, current: Option<PresentationToken>) -> bool {
	current == Some(bound)
}

#[derive(Debug)]
struct Entry<A> {
	handle: TimerHandle,
	deadline: Duration,
	token: PresentationToken,
	action: A,
}

/// A delayed action whose deadline has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<A> {
	pub handle: TimerHandle,
	pub token: PresentationToken,
	pub deadline: Duration,
	pub action: A,
}

/// Single-threaded queue of token-bound delayed actions.
///
/// Cancellation removes the entry immediately, so a cancelled action can never
/// be observed by a later [`pop_due`](Self::pop_due).
#[derive(Debug)]
pub struct DelayedQueue<A> {
	entries: Vec<Entry<A>>,
	next_handle: u64,
}

impl<A> Default for DelayedQueue<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A> DelayedQueue<A> {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			next_handle: 0,
		}
	}

	/// Schedules `action` to fire `delay` after `now`.
	pub fn schedule(&mut self, now: Duration, delay: Duration, token: PresentationToken, action: A) -> TimerHandle {
		self.next_handle = self.next_handle.wrapping_add(1);
		let handle = TimerHandle(self.next_handle);
		self.entries.push(Entry {
			handle,
			deadline: now.saturating_add(delay),
			token,
			action,
		});
		handle
	}

	/// Cancels one action. Returns false if it already fired or was cancelled.
	pub fn cancel(&mut self, handle: TimerHandle) -> bool {
		let before = self.entries.len();
		self.entries.retain(|e| e.handle != handle);
		self.entries.len() != before
	}

	/// Cancels every action bound to `token`.
	pub fn cancel_token(&mut self, token: PresentationToken) -> usize {
		self.cancel_where(|bound, _| bound == token)
	}

	/// Cancels every action matching `pred`.
	pub fn cancel_where(&mut self, mut pred: impl FnMut(PresentationToken, &A) -> bool) -> usize {
		let before = self.entries.len();
		self.entries.retain(|e| !pred(e.token, &e.action));
		before - self.entries.len()
	}

	/// Returns the deadline of a live action.
	pub fn deadline(&self, handle: TimerHandle) -> Option<Duration> {
		self.entries.iter().find(|e| e.handle == handle).map(|e| e.deadline)
	}

	/// Earliest pending deadline.
	pub fn next_deadline(&self) -> Option<Duration> {
		self.entries.iter().map(|e| e.deadline).min()
	}

	/// Removes and returns the earliest action due at `now`.
	///
	/// Ties are broken by scheduling order.
	pub fn pop_due(&mut self, now: Duration) -> Option<Fired<A>> {
		let index = self
			.entries
			.iter()
			.enumerate()
			.filter(|(_, e)| e.deadline <= now)
			.min_by_key(|(_, e)| (e.deadline, e.handle))
			.map(|(i, _)| i)?;
		let entry = self.entries.swap_remove(index);
		Some(Fired {
			handle: entry.handle,
			token: entry.token,
			deadline: entry.deadline,
			action: entry.action,
		})
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}

/// Owner of the single live auto-dismiss timer.
///
/// Starting a timer always cancels the previous one; at most one exists.
#[derive(Debug, Default)]
pub struct DismissTimer {
	armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
	handle: TimerHandle,
	token: PresentationToken,
}

impl DismissTimer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Arms the timer for `token`, replacing any live timer.
	pub fn start<A>(&mut self, queue: &mut DelayedQueue<A>, now: Duration, delay: Duration, token: PresentationToken, action: A) -> TimerHandle {
		self.cancel(queue);
		let handle = queue.schedule(now, delay, token, action);
		self.armed = Some(Armed { handle, token });
		handle
	}

	/// Cancels the live timer, if any. Returns the token it was bound to.
	pub fn cancel<A>(&mut self, queue: &mut DelayedQueue<A>) -> Option<PresentationToken> {
		let armed = self.armed.take()?;
		queue.cancel(armed.handle);
		Some(armed.token)
	}

	/// Forgets a timer whose action has just fired.
	///
	/// Only clears the slot when `handle` is the live timer, so a stale firing
	/// can never disarm a newer one.
	pub fn fired(&mut self, handle: TimerHandle) -> bool {
		if self.armed.is_some_and(|a| a.handle == handle) {
			self.armed = None;
			true
		} else {
			false
		}
	}

	pub fn is_running(&self) -> bool {
		self.armed.is_some()
	}

	/// Token the live timer is bound to.
	pub fn token(&self) -> Option<PresentationToken> {
		self.armed.map(|a| a.token)
	}

	/// Deadline of the live timer.
	pub fn deadline<A>(&self, queue: &DelayedQueue<A>) -> Option<Duration> {
		self.armed.and_then(|a| queue.deadline(a.handle))
	}
}
