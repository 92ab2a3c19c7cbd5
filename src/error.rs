//! Error type shared by the API client, exports and browser adapters.

use wasm_bindgen::JsValue;

/// Everything that can go wrong while talking to the backend or the browser.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
	/// The request never produced a response.
	#[error("request failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// The backend answered with a non-success status.
	#[error("{url} returned HTTP {status}")]
	Status {
		/// Endpoint that was requested
		url: String,
		/// HTTP status code
		status: u16,
	},

	/// The backend refused the request and said why.
	#[error("{detail}")]
	Rejected {
		/// HTTP status code
		status: u16,
		/// Backend-provided message
		detail: String,
	},

	/// A body could not be decoded as the expected JSON.
	#[error("invalid JSON: {0}")]
	Decode(#[from] serde_json::Error),

	/// A browser API call threw.
	#[error("browser error: {0}")]
	Browser(String),
}

impl From<JsValue> for DashboardError {
	fn from(value: JsValue) -> Self {
		Self::Browser(
			value
				.as_string()
				.unwrap_or_else(|| format!("{value:?}")),
		)
	}
}

/// Convenience alias used across the crate.
pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
