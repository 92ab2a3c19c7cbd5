//! Backend location and endpoint construction.

use leptos::prelude::use_context;

/// Base URL used when `FELLOWSHIP_API_BASE` is not set at build time.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Runtime configuration, provided to the component tree as context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
	api_base: String,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self::new(DEFAULT_API_BASE)
	}
}

impl DashboardConfig {
	/// Build a config pointing at `api_base`. Trailing slashes are dropped.
	pub fn new(api_base: impl Into<String>) -> Self {
		let api_base: String = api_base.into();
		Self {
			api_base: api_base.trim_end_matches('/').to_owned(),
		}
	}

	/// Config baked in at compile time. The browser has no process
	/// environment, so the override is read by `option_env!`.
	pub fn from_build_env() -> Self {
		match option_env!("FELLOWSHIP_API_BASE") {
			Some(base) if !base.trim().is_empty() => Self::new(base.trim()),
			_ => Self::default(),
		}
	}

	/// Backend base URL without trailing slash.
	pub fn api_base(&self) -> &str {
		&self.api_base
	}

	/// `POST` target for ticket planning.
	pub fn plan_url(&self) -> String {
		format!("{}/ticket/plan", self.api_base)
	}

	/// Structured audit log for a ticket.
	pub fn audit_log_url(&self, ticket_id: &str) -> String {
		format!("{}/audit_log/{ticket_id}", self.api_base)
	}

	/// Rendered (PDF) audit log for a ticket.
	pub fn audit_log_pdf_url(&self, ticket_id: &str) -> String {
		format!("{}/audit_log_pdf/{ticket_id}", self.api_base)
	}

	/// Agent registry listing.
	pub fn agents_url(&self) -> String {
		format!("{}/agents", self.api_base)
	}

	/// Feedback submission.
	pub fn feedback_url(&self) -> String {
		format!("{}/agents/feedback", self.api_base)
	}

	/// Capability sheet upload.
	pub fn capability_upload_url(&self) -> String {
		format!("{}/agents/upload_capability_sheet", self.api_base)
	}
}

/// Config from the component tree, falling back to the default backend.
///
/// Call during component setup; context is gone once inside async tasks.
pub fn use_config() -> DashboardConfig {
	use_context::<DashboardConfig>().unwrap_or_default()
}
