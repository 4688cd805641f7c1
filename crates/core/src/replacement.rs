//! Replacement choreography.
//!
//! When new content supersedes visible content, the outgoing content fades
//! while the incoming content reveals. The choreographer owns the single
//! in-flight [`ReplacementJob`] and computes when each phase boundary falls;
//! the presenter schedules those boundaries as token-bound delayed actions
//! and commits state only when told the job has settled.
//!
//! Lifecycle: `Idle → Outgoing → Incoming → (settle) → Cooling → Idle`.
//! Cooling is the short buffer after the commit during which no new job may
//! start, so the presenter's own commit has applied before queued work runs.

use std::time::Duration;

use crate::config::ReplacementConfig;
use crate::token::PresentationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobPhase {
	Outgoing,
	Incoming,
	Settled,
}

/// Phase boundary the presenter schedules for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplacementStep {
	BeginIncoming,
	Settle,
	Idle,
}

/// Choreographer status as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoreoPhase {
	Idle,
	Running(JobPhase),
	Cooling,
}

/// One outgoing/incoming pair in flight.
#[derive(Debug)]
pub struct ReplacementJob<C> {
	/// Token bound to the incoming content.
	pub token: PresentationToken,
	pub outgoing: C,
	/// Incoming content, bound after the job starts.
	pub incoming: Option<C>,
	pub phase: JobPhase,
}

/// Offsets from job start at which each step fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementPlan {
	pub begin_incoming: Duration,
	pub settle: Duration,
}

#[derive(Debug)]
pub struct Choreographer<C> {
	config: ReplacementConfig,
	job: Option<ReplacementJob<C>>,
	cooling: Option<PresentationToken>,
}

impl<C> Choreographer<C> {
	pub fn new(config: ReplacementConfig) -> Self {
		Self {
			config,
			job: None,
			cooling: None,
		}
	}

	pub fn phase(&self) -> ChoreoPhase {
		match (&self.job, self.cooling) {
			(Some(job), _) => ChoreoPhase::Running(job.phase),
			(None, Some(_)) => ChoreoPhase::Cooling,
			(None, None) => ChoreoPhase::Idle,
		}
	}

	pub fn is_idle(&self) -> bool {
		self.job.is_none() && self.cooling.is_none()
	}

	/// Timing of the phase boundaries for the configured tier.
	pub fn plan(&self) -> ReplacementPlan {
		ReplacementPlan {
			begin_incoming: self.config.incoming_delay,
			settle: self.config.animation_span() + self.config.settle_buffer,
		}
	}

	/// Delay between the settle commit and returning to idle.
	pub fn idle_buffer(&self) -> Duration {
		self.config.idle_buffer
	}

	/// Starts a job. Refuses (returning the content) unless idle.
	pub fn begin(&mut self, token: PresentationToken, outgoing: C) -> Result<ReplacementPlan, C> {
		if !self.is_idle() {
			return Err(outgoing);
		}
		self.job = Some(ReplacementJob {
			token,
			outgoing,
			incoming: None,
			phase: JobPhase::Outgoing,
		});
		tracing::debug!(%token, "Replacement outgoing phase started");
		Ok(self.plan())
	}

	/// Binds incoming content to the running job.
	///
	/// Fails (returning the content) if `token` is not the running job's token
	/// or content is already bound.
	pub fn bind(&mut self, token: PresentationToken, incoming: C) -> Result<(), C> {
		match self.job.as_mut() {
			Some(job) if job.token == token && job.incoming.is_none() => {
				job.incoming = Some(incoming);
				Ok(())
			}
			_ => Err(incoming),
		}
	}

	/// Advances the running job into its incoming phase.
	pub fn begin_incoming(&mut self) -> bool {
		match self.job.as_mut() {
			Some(job) if job.phase == JobPhase::Outgoing => {
				job.phase = JobPhase::Incoming;
				tracing::debug!(token = %job.token, "Replacement incoming phase started");
				true
			}
			_ => false,
		}
	}

	/// Marks the job settled and hands it back for commit; enters cooling.
	pub fn settle(&mut self) -> Option<ReplacementJob<C>> {
		let mut job = self.job.take()?;
		job.phase = JobPhase::Settled;
		self.cooling = Some(job.token);
		tracing::debug!(token = %job.token, "Replacement settled");
		Some(job)
	}

	/// Leaves cooling for the job identified by `token`.
	pub fn finish(&mut self, token: PresentationToken) -> bool {
		if self.cooling == Some(token) {
			self.cooling = None;
			true
		} else {
			false
		}
	}

	/// Tears down a running job without settling it.
	pub fn cancel(&mut self) -> Option<ReplacementJob<C>> {
		let job = self.job.take()?;
		tracing::debug!(token = %job.token, phase = ?job.phase, "Replacement cancelled");
		Some(job)
	}

	/// Drops every trace of in-flight or cooling work.
	pub fn reset(&mut self) -> Option<ReplacementJob<C>> {
		self.cooling = None;
		self.job.take()
	}

	pub fn job(&self) -> Option<&ReplacementJob<C>> {
		self.job.as_ref()
	}

	pub fn job_token(&self) -> Option<PresentationToken> {
		self.job.as_ref().map(|job| job.token)
	}

	pub fn cooling_token(&self) -> Option<PresentationToken> {
		self.cooling
	}
}
