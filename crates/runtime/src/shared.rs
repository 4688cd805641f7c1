//! Process-wide convenience handle.
//!
//! Applications that own a [`ToastHandle`] should pass it around instead;
//! this exists for call sites with no route to one.

use std::sync::OnceLock;

use toastline_core::Toast;

use crate::ToastHandle;

static SHARED: OnceLock<ToastHandle<Toast>> = OnceLock::new();

/// Installs the process-wide handle. Returns false if one was already installed.
pub fn install_shared(handle: ToastHandle<Toast>) -> bool {
	let installed = SHARED.set(handle).is_ok();
	if !installed {
		tracing::debug!("Shared toast handle already installed");
	}
	installed
}

/// The process-wide handle, or a disconnected one before installation.
pub fn shared() -> ToastHandle<Toast> {
	SHARED.get().cloned().unwrap_or_else(ToastHandle::disconnected)
}
