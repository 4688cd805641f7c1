//! Single-toast presentation engine: tokens, timers, drag tracking and
//! replacement choreography driven by host-supplied time.

/// Presenter configuration and defaults.
pub mod config;
/// Identity-keyed duplicate suppression.
pub mod debounce;
/// Drag offset to reveal progress conversion and release classification.
pub mod drag;
/// Reveal progress values and their animations.
pub mod progress;
/// The presentation manager.
pub mod presenter;
/// Token-keyed completion callbacks.
pub mod registry;
/// Outgoing/incoming replacement sequencing.
pub mod replacement;
/// Presentation state, dismissal reasons and the render snapshot.
pub mod state;
/// Token-bound delayed actions and the dismiss timer.
pub mod timer;
/// Payloads, show options and the current-item slot.
pub mod toast;
/// Presentation tokens.
pub mod token;

pub use config::{ConfigError, PresenterConfig};
pub use debounce::ItemKey;
pub use drag::{DragOutcome, EdgeCorrection, SampleUpdate};
pub use presenter::{Presentation, Presenter};
pub use progress::{Easing, ProgressAnimation, RevealProgress};
pub use registry::DismissCallback;
pub use replacement::ChoreoPhase;
pub use state::{DismissReason, Edge, PresentationState, Snapshot};
pub use toast::{ItemSlot, PresentationStyle, ShowOptions, Toast};
pub use token::PresentationToken;
