//! Default values for every tunable in [`PresenterConfig`](super::PresenterConfig).
//!
//! Several of these numbers drifted across earlier revisions of the engine
//! (fling velocity, distance ratio, debounce window). The values here are the
//! single chosen set; hosts tune them through configuration.

use std::time::Duration;

/// Auto-dismiss delay for the standard presentation style.
pub const DISMISS_DELAY: Duration = Duration::from_millis(6_500);

/// Auto-dismiss delay for the compact presentation style.
pub const COMPACT_DISMISS_DELAY: Duration = Duration::from_millis(3_000);

/// Yield before entry so the host can measure content once.
pub const LAYOUT_PASS: Duration = Duration::from_millis(16);

/// Reveal animation length after a fresh show.
pub const ENTRY_DURATION: Duration = Duration::from_millis(350);

/// Hide animation length after a committed dismissal.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

// ==========================================================================
// Drag
// ==========================================================================

/// Release velocity (units per second, dismiss direction) that commits a dismissal.
pub const FLING_VELOCITY: f32 = 800.0;

/// Fraction of the content extent that commits a dismissal when dragged past.
pub const DISTANCE_RATIO: f32 = 1.0 / 3.0;

/// Absolute drag distance that commits a dismissal regardless of extent.
pub const MIN_DISTANCE: f32 = 50.0;

/// Slack when classifying the rendered extent against the viewport edge.
pub const EDGE_TOLERANCE: f32 = 1.0;

/// Backtrack distance that counts as reversing a dismiss gesture.
pub const REVERSAL_TOLERANCE: f32 = 1.0;

/// Window after a release during which edge corrections are ignored.
pub const GESTURE_COOLDOWN: Duration = Duration::from_millis(250);

// ==========================================================================
// Replacement
// ==========================================================================

/// Outgoing fade for the standard visual tier.
pub const OUTGOING_STANDARD: Duration = Duration::from_millis(300);

/// Outgoing fade for the rich visual tier (blur and scale).
pub const OUTGOING_RICH: Duration = Duration::from_millis(380);

/// Delay between the outgoing and incoming phases.
pub const INCOMING_DELAY: Duration = Duration::ZERO;

/// Incoming reveal length.
pub const INCOMING_DURATION: Duration = Duration::from_millis(350);

/// Wait after both phases end before committing the replacement.
pub const SETTLE_BUFFER: Duration = Duration::from_millis(350);

/// Wait after the commit before the choreographer accepts more work.
pub const IDLE_BUFFER: Duration = Duration::from_millis(100);

// ==========================================================================
// Registry / debounce
// ==========================================================================

/// Handler count that triggers eviction of the oldest half.
pub const REGISTRY_SOFT_CAP: usize = 100;

/// Window in which a repeated identity-keyed show is suppressed.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1_000);

const _: () = {
	assert!(DISMISS_DELAY.as_millis() > COMPACT_DISMISS_DELAY.as_millis());
	assert!(COMPACT_DISMISS_DELAY.as_millis() > 0);
	assert!(OUTGOING_RICH.as_millis() > OUTGOING_STANDARD.as_millis());
	assert!(FLING_VELOCITY > 0.0);
	assert!(DISTANCE_RATIO > 0.0 && DISTANCE_RATIO <= 1.0);
	assert!(MIN_DISTANCE > 0.0);
	assert!(REGISTRY_SOFT_CAP >= 2);
};
