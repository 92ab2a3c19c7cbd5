//! Audit trail export.
//!
//! Both exports are single-attempt pass-throughs: the backend body is handed
//! to the sink unchanged under `audit_log_<ticket_id>.{json,pdf}`.

use log::info;
use serde::de::IgnoredAny;

use super::model::GraphModel;
use crate::config::DashboardConfig;
use crate::error::Result;

/// Which audit log rendering to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditFormat {
	/// Structured log from `/audit_log/{ticket_id}`.
	Json,
	/// Rendered log from `/audit_log_pdf/{ticket_id}`.
	Pdf,
}

impl AuditFormat {
	/// Backend endpoint serving this format for `ticket_id`.
	pub fn url(self, config: &DashboardConfig, ticket_id: &str) -> String {
		match self {
			Self::Json => config.audit_log_url(ticket_id),
			Self::Pdf => config.audit_log_pdf_url(ticket_id),
		}
	}

	/// Name the downloaded file is saved under.
	pub fn file_name(self, ticket_id: &str) -> String {
		match self {
			Self::Json => format!("audit_log_{ticket_id}.json"),
			Self::Pdf => format!("audit_log_{ticket_id}.pdf"),
		}
	}

	/// Content type of the downloaded file.
	pub fn mime(self) -> &'static str {
		match self {
			Self::Json => "application/json",
			Self::Pdf => "application/pdf",
		}
	}

	fn label(self) -> &'static str {
		match self {
			Self::Json => "JSON",
			Self::Pdf => "PDF",
		}
	}
}

/// Last failure message per export format.
///
/// The two exports run independently, so a success only clears the notice
/// left by its own format.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportNotices {
	json: Option<String>,
	pdf: Option<String>,
}

impl ExportNotices {
	fn slot(&mut self, format: AuditFormat) -> &mut Option<String> {
		match format {
			AuditFormat::Json => &mut self.json,
			AuditFormat::Pdf => &mut self.pdf,
		}
	}

	/// Record the outcome of one export of `format`.
	pub fn record<T>(&mut self, format: AuditFormat, outcome: &Result<T>) {
		*self.slot(format) = outcome.as_ref().err().map(|err| {
			format!("Could not download the audit log ({}): {err}", format.label())
		});
	}

	/// Messages to show, JSON first.
	pub fn messages(&self) -> Vec<String> {
		self.json.iter().chain(&self.pdf).cloned().collect()
	}
}

/// A file ready to hand to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
	/// Suggested file name.
	pub file_name: String,
	/// Content type.
	pub mime: &'static str,
	/// Body exactly as received.
	pub bytes: Vec<u8>,
}

/// Where audit bodies come from.
#[allow(async_fn_in_trait)]
pub trait AuditSource {
	/// `GET` `url` and return the raw body of a successful response.
	async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Where finished artifacts go.
pub trait ArtifactSink {
	/// Hand `artifact` to the user.
	fn deliver(&self, artifact: &Artifact) -> Result<()>;
}

/// Fetches audit logs from a source and delivers them to a sink.
pub struct AuditTrailClient<S, D> {
	config: DashboardConfig,
	source: S,
	sink: D,
}

impl<S: AuditSource, D: ArtifactSink> AuditTrailClient<S, D> {
	/// Client reading from `source` and writing to `sink`.
	pub fn new(config: DashboardConfig, source: S, sink: D) -> Self {
		Self { config, source, sink }
	}

	/// Fetch and deliver the audit log for the graph's ticket.
	///
	/// Returns the delivered file name, or `None` without issuing a request
	/// when the graph has no nodes to derive a ticket id from.
	pub async fn export(&self, model: &GraphModel, format: AuditFormat) -> Result<Option<String>> {
		let Some(ticket_id) = model.ticket_id() else {
			return Ok(None);
		};
		let url = format.url(&self.config, ticket_id);
		let bytes = self.source.fetch_bytes(&url).await?;
		if format == AuditFormat::Json {
			serde_json::from_slice::<IgnoredAny>(&bytes)?;
		}

		let artifact = Artifact {
			file_name: format.file_name(ticket_id),
			mime: format.mime(),
			bytes,
		};
		self.sink.deliver(&artifact)?;
		info!("exported {} ({} bytes)", artifact.file_name, artifact.bytes.len());
		Ok(Some(artifact.file_name))
	}

	/// The sink artifacts are delivered to.
	pub fn sink(&self) -> &D {
		&self.sink
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::collections::HashMap;

	use futures::executor::block_on;

	use super::super::model::fixtures::{edge, node};
	use super::super::types::WorkflowGraph;
	use super::*;
	use crate::error::DashboardError;

	#[derive(Default)]
	struct MockSource {
		bodies: HashMap<String, Vec<u8>>,
		requests: RefCell<Vec<String>>,
	}

	impl MockSource {
		fn with(mut self, url: &str, body: &[u8]) -> Self {
			self.bodies.insert(url.to_owned(), body.to_vec());
			self
		}
	}

	impl AuditSource for MockSource {
		async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
			self.requests.borrow_mut().push(url.to_owned());
			self.bodies.get(url).cloned().ok_or(DashboardError::Status {
				url: url.to_owned(),
				status: 404,
			})
		}
	}

	#[derive(Default)]
	struct RecordingSink {
		delivered: RefCell<Vec<Artifact>>,
	}

	impl ArtifactSink for RecordingSink {
		fn deliver(&self, artifact: &Artifact) -> Result<()> {
			self.delivered.borrow_mut().push(artifact.clone());
			Ok(())
		}
	}

	fn chain() -> GraphModel {
		GraphModel::new(WorkflowGraph {
			nodes: vec![node("a", "diagnosis"), node("b", "repair")],
			edges: vec![edge("a", "b", "escalation")],
		})
	}

	#[test]
	fn json_body_is_passed_through_unchanged() {
		let body = br#"{"ticket_id":"ticket","entries":[{"b":1,"a":2}]}"#;
		let source = MockSource::default().with("http://127.0.0.1:8000/audit_log/ticket", body);
		let client = AuditTrailClient::new(DashboardConfig::default(), source, RecordingSink::default());

		let name = block_on(client.export(&chain(), AuditFormat::Json)).unwrap();
		assert_eq!(name.as_deref(), Some("audit_log_ticket.json"));

		let delivered = client.sink().delivered.borrow();
		assert_eq!(delivered.len(), 1);
		assert_eq!(delivered[0].bytes, body.to_vec());
		assert_eq!(delivered[0].mime, "application/json");
	}

	#[test]
	fn pdf_uses_rendering_endpoint() {
		let pdf = b"%PDF-1.4\n\x00\xff binary";
		let source = MockSource::default().with("http://127.0.0.1:8000/audit_log_pdf/ticket", pdf);
		let client = AuditTrailClient::new(DashboardConfig::default(), source, RecordingSink::default());

		let name = block_on(client.export(&chain(), AuditFormat::Pdf)).unwrap();
		assert_eq!(name.as_deref(), Some("audit_log_ticket.pdf"));
		let delivered = client.sink().delivered.borrow();
		assert_eq!(delivered[0].bytes, pdf.to_vec());
		assert_eq!(delivered[0].mime, "application/pdf");
	}

	#[test]
	fn empty_graph_issues_no_request() {
		let client = AuditTrailClient::new(
			DashboardConfig::default(),
			MockSource::default(),
			RecordingSink::default(),
		);
		let empty = GraphModel::default();

		assert_eq!(block_on(client.export(&empty, AuditFormat::Json)).unwrap(), None);
		assert_eq!(block_on(client.export(&empty, AuditFormat::Pdf)).unwrap(), None);
		assert!(client.source.requests.borrow().is_empty());
		assert!(client.sink().delivered.borrow().is_empty());
	}

	#[test]
	fn fetch_failure_delivers_nothing() {
		let client = AuditTrailClient::new(
			DashboardConfig::default(),
			MockSource::default(),
			RecordingSink::default(),
		);
		let err = block_on(client.export(&chain(), AuditFormat::Json)).unwrap_err();
		assert!(matches!(err, DashboardError::Status { status: 404, .. }));
		assert_eq!(client.source.requests.borrow().len(), 1);
		assert!(client.sink().delivered.borrow().is_empty());
	}

	#[test]
	fn non_json_body_is_rejected() {
		let source =
			MockSource::default().with("http://127.0.0.1:8000/audit_log/ticket", b"<html>oops</html>");
		let client = AuditTrailClient::new(DashboardConfig::default(), source, RecordingSink::default());
		let err = block_on(client.export(&chain(), AuditFormat::Json)).unwrap_err();
		assert!(matches!(err, DashboardError::Decode(_)));
		assert!(client.sink().delivered.borrow().is_empty());
	}

	#[test]
	fn success_clears_only_its_own_notice() {
		let mut notices = ExportNotices::default();
		notices.record::<()>(AuditFormat::Json, &Err(DashboardError::Browser("offline".into())));
		notices.record(AuditFormat::Pdf, &Ok(()));
		assert_eq!(notices.messages(), ["Could not download the audit log (JSON): offline"]);

		notices.record::<()>(AuditFormat::Pdf, &Err(DashboardError::Browser("timeout".into())));
		notices.record(AuditFormat::Json, &Ok(()));
		assert_eq!(notices.messages(), ["Could not download the audit log (PDF): timeout"]);
	}

	#[test]
	fn both_failures_are_kept() {
		let mut notices = ExportNotices::default();
		notices.record::<()>(AuditFormat::Pdf, &Err(DashboardError::Browser("b".into())));
		notices.record::<()>(AuditFormat::Json, &Err(DashboardError::Browser("a".into())));
		assert_eq!(notices.messages().len(), 2);
		assert!(notices.messages()[0].contains("(JSON): a"));

		notices.record(AuditFormat::Json, &Ok(()));
		notices.record(AuditFormat::Pdf, &Ok(()));
		assert_eq!(notices, ExportNotices::default());
	}

	#[test]
	fn hyphenated_ticket_ids_are_truncated() {
		let mut first = node("a", "diagnosis");
		first.step_id = "ticket-1700000000000-diagnosis".into();
		let model = GraphModel::new(WorkflowGraph {
			nodes: vec![first],
			edges: vec![],
		});
		let source = MockSource::default().with("http://127.0.0.1:8000/audit_log/ticket", b"[]");
		let client = AuditTrailClient::new(DashboardConfig::default(), source, RecordingSink::default());
		block_on(client.export(&model, AuditFormat::Json)).unwrap();
		assert_eq!(
			client.source.requests.borrow().as_slice(),
			["http://127.0.0.1:8000/audit_log/ticket"]
		);
	}
}
