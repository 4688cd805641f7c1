use toastline_core::{PresenterConfig, Toast};
use toastline_runtime::{install_shared, shared, spawn_presenter};

#[tokio::test]
async fn shared_handle_is_installed_once() {
	assert!(!shared().is_connected());
	shared().show(Toast::new("dropped silently"));

	let (first, _first_snapshots) = spawn_presenter::<Toast>(PresenterConfig::default());
	let (second, _second_snapshots) = spawn_presenter::<Toast>(PresenterConfig::default());
	assert!(install_shared(first));
	assert!(!install_shared(second));
	assert!(shared().is_connected());
}
