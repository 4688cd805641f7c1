//! Tokio driver and imperative command handle for the toastline presenter.
//!
//! [`spawn_presenter`] moves a [`Presenter`](toastline_core::Presenter) onto a
//! task that owns it exclusively. Callers talk to it through a cloneable
//! [`ToastHandle`] and observe it through a `watch` channel of
//! [`Snapshot`](toastline_core::Snapshot)s. Without a tokio runtime the handle
//! comes back disconnected and every call is a silent no-op.

mod command;
mod driver;
mod handle;
mod shared;

pub use handle::{ToastHandle, spawn_presenter};
pub use shared::{install_shared, shared};
