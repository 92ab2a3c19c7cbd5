//! End-to-end checks of the workflow graph pipeline: decode a planner
//! payload, lay it out, and inspect provenance, contracts and audit export.

use std::cell::Cell;

use fellowship_dashboard::DashboardError;
use fellowship_dashboard::api::PlanResponse;
use fellowship_dashboard::config::DashboardConfig;
use fellowship_dashboard::fellowship_graph::{
	Artifact, ArtifactSink, AuditFormat, AuditSource, AuditTrailClient, ContractView, GraphLayout,
	GraphModel, ProvenanceRecord, StructuralVerdict,
};
use futures::executor::block_on;
use serde_json::json;

fn plan_payload() -> serde_json::Value {
	json!({
		"workflow_agents": [
			{ "name": "ThermoFix AI", "location": "Germany", "capabilities": ["diagnosis"], "trust_score": 0.92 },
			{ "name": "CoolRepair", "location": "EU", "capabilities": ["repair"] }
		],
		"total_cost": 400.0,
		"fellowship_graph": {
			"nodes": [
				{
					"id": "A", "role": "diagnosis", "name": "ThermoFix AI", "location": "Germany",
					"trust_score": 0.92, "cost_per_task": 250.0,
					"step_id": "ticket-1700000000000-diagnosis", "agent_id": "agent-003",
					"signature": "f".repeat(64),
					"data_contract": {
						"applicable_regulations": [], "permitted_fields": [],
						"expiry_hours": 48, "policy": "Only diagnosis data allowed"
					}
				},
				{
					"id": "B", "role": "repair", "name": "CoolRepair", "location": "EU",
					"cost_per_task": 150.0,
					"step_id": "ticket-1700000000000-repair", "agent_id": "agent-001",
					"signature": "short"
				}
			],
			"edges": [
				{ "from": "A", "to": "B", "handoff": "escalation",
				  "step_id": "ticket-1700000000000-handoff", "agent_id": "agent-001" },
				{ "from": "B", "to": "Z", "handoff": "dangling",
				  "step_id": "ticket-1700000000000-lost", "agent_id": "agent-009",
				  "signature": "0".repeat(64) }
			]
		}
	})
}

fn decoded_model() -> GraphModel {
	let plan = PlanResponse::decode(plan_payload()).expect("payload decodes");
	assert_eq!(plan.result.workflow_agents.len(), 2);
	GraphModel::from_optional(plan.result.fellowship_graph)
}

#[test]
fn two_node_chain_lays_out_and_drops_dangling_edge() {
	let model = decoded_model();
	let layout = GraphLayout::compute(&model);

	assert_eq!(layout.width, 700.0);
	assert!((layout.nodes[0].x - 233.333).abs() < 0.001);
	assert!((layout.nodes[1].x - 466.666).abs() < 0.001);
	assert_eq!(layout.nodes[0].y, layout.nodes[1].y);

	assert_eq!(model.edges().len(), 1);
	assert_eq!(model.skipped_edges(), 1);
	assert_eq!(model.edges()[0].edge.handoff, "escalation");
	assert!((layout.edges[0].midpoint.x - 350.0).abs() < 1e-9);
}

#[test]
fn provenance_panels_report_structural_verdicts() {
	let model = decoded_model();

	let a = ProvenanceRecord::from_node(&model.nodes()[0]);
	assert_eq!(a.structural_verdict(), StructuralVerdict::WellFormed);
	assert_eq!(a.ticket_id, "ticket");

	let b = ProvenanceRecord::from_node(&model.nodes()[1]);
	assert_eq!(b.structural_verdict(), StructuralVerdict::Malformed);

	let handoff = ProvenanceRecord::from_edge(&model.edges()[0].edge);
	assert_eq!(handoff.role, "escalation");
	assert_eq!(handoff.structural_verdict(), StructuralVerdict::Malformed);
}

#[test]
fn contract_panel_keeps_empty_list_semantics() {
	let model = decoded_model();
	let view = ContractView::project(model.nodes()[0].data_contract.as_ref()).unwrap();
	assert_eq!(view.regulations, "None");
	assert_eq!(view.permitted_fields, "All");
	assert!(ContractView::project(model.nodes()[1].data_contract.as_ref()).is_none());
}

struct CountingSource(Cell<usize>);

impl AuditSource for CountingSource {
	async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, DashboardError> {
		self.0.set(self.0.get() + 1);
		Err(DashboardError::Status {
			url: url.to_owned(),
			status: 503,
		})
	}
}

struct NoSink;

impl ArtifactSink for NoSink {
	fn deliver(&self, artifact: &Artifact) -> Result<(), DashboardError> {
		panic!("nothing should be delivered, got {}", artifact.file_name);
	}
}

#[test]
fn graphless_plan_exports_nothing() {
	let plan = PlanResponse::decode(json!({ "workflow_agents": [], "total_cost": 0 })).unwrap();
	let model = GraphModel::from_optional(plan.result.fellowship_graph);
	assert!(model.is_empty());

	let client = AuditTrailClient::new(DashboardConfig::default(), CountingSource(Cell::new(0)), NoSink);
	assert_eq!(block_on(client.export(&model, AuditFormat::Json)).unwrap(), None);
	assert_eq!(block_on(client.export(&model, AuditFormat::Pdf)).unwrap(), None);
}

#[test]
fn backend_failure_surfaces_as_error() {
	let source = CountingSource(Cell::new(0));
	let client = AuditTrailClient::new(DashboardConfig::default(), source, NoSink);
	let err = block_on(client.export(&decoded_model(), AuditFormat::Pdf)).unwrap_err();
	assert!(matches!(err, DashboardError::Status { status: 503, .. }));
}
