//! HTTP client for the planning backend.

mod capabilities;
mod types;

pub use capabilities::{DEFAULT_CAPABILITY, extract_capabilities};
pub use types::{AgentSummary, FeedbackRequest, PlanResponse, PlanResult, RepairTicket};

use log::{debug, error};
use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::components::fellowship_graph::AuditSource;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};

/// Thin wrapper over [`reqwest::Client`] bound to one backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
	http: reqwest::Client,
	config: DashboardConfig,
}

impl ApiClient {
	/// Client for the backend described by `config`.
	pub fn new(config: DashboardConfig) -> Self {
		Self {
			http: reqwest::Client::new(),
			config,
		}
	}

	/// Backend configuration in use.
	pub fn config(&self) -> &DashboardConfig {
		&self.config
	}

	/// Submit a ticket and decode the planner's answer.
	pub async fn plan(&self, ticket: &RepairTicket) -> Result<PlanResponse> {
		let raw: serde_json::Value = self.post_json(&self.config.plan_url(), ticket).await?;
		Ok(PlanResponse::decode(raw)?)
	}

	/// Registered agents, for the feedback picker.
	pub async fn agents(&self) -> Result<Vec<AgentSummary>> {
		let url = self.config.agents_url();
		let resp = self.http.get(&url).send().await?;
		decode(ensure_success(resp, &url).await?).await
	}

	/// Post feedback and return the backend's reply untouched.
	pub async fn submit_feedback(&self, feedback: &FeedbackRequest) -> Result<serde_json::Value> {
		self.post_json(&self.config.feedback_url(), feedback).await
	}

	/// Upload a capability sheet as multipart field `file`.
	pub async fn upload_capability_sheet(
		&self,
		file_name: &str,
		bytes: Vec<u8>,
	) -> Result<serde_json::Value> {
		let url = self.config.capability_upload_url();
		let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_owned());
		let form = reqwest::multipart::Form::new().part("file", part);
		let resp = self.http.post(&url).multipart(form).send().await?;
		decode(ensure_success(resp, &url).await?).await
	}

	async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
		debug!("POST {url}");
		let resp = self.http.post(url).json(body).send().await?;
		decode(ensure_success(resp, url).await?).await
	}
}

impl AuditSource for ApiClient {
	async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
		debug!("GET {url}");
		let resp = self.http.get(url).send().await?;
		let resp = ensure_success(resp, url).await?;
		Ok(resp.bytes().await?.to_vec())
	}
}

/// Turn a non-2xx response into an error, preferring the backend's `detail`.
async fn ensure_success(resp: Response, url: &str) -> Result<Response> {
	let status = resp.status();
	if status.is_success() {
		return Ok(resp);
	}
	let detail = resp
		.json::<serde_json::Value>()
		.await
		.ok()
		.and_then(|body| detail_of(&body));
	error!("{url} failed with {status}");
	Err(match detail {
		Some(detail) => DashboardError::Rejected {
			status: status.as_u16(),
			detail,
		},
		None => DashboardError::Status {
			url: url.to_owned(),
			status: status.as_u16(),
		},
	})
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
	let bytes = resp.bytes().await?;
	Ok(serde_json::from_slice(&bytes)?)
}

/// FastAPI puts its error message in `detail`, as a string or a list.
fn detail_of(body: &serde_json::Value) -> Option<String> {
	match body.get("detail")? {
		serde_json::Value::String(s) => Some(s.clone()),
		serde_json::Value::Null => None,
		other => Some(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn detail_prefers_string_message() {
		assert_eq!(
			detail_of(&json!({ "detail": "public_key is required" })).as_deref(),
			Some("public_key is required")
		);
	}

	#[test]
	fn structured_detail_is_serialized() {
		let detail = detail_of(&json!({ "detail": [{ "loc": ["body"], "msg": "field required" }] }));
		assert_eq!(
			detail.as_deref(),
			Some(r#"[{"loc":["body"],"msg":"field required"}]"#)
		);
	}

	#[test]
	fn missing_detail_is_none() {
		assert_eq!(detail_of(&json!({ "message": "ok" })), None);
		assert_eq!(detail_of(&json!({ "detail": null })), None);
	}

	#[test]
	fn client_keeps_config() {
		let client = ApiClient::new(DashboardConfig::new("http://backend:9000/"));
		assert_eq!(client.config().plan_url(), "http://backend:9000/ticket/plan");
	}
}
