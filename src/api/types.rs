use serde::{Deserialize, Serialize};

use crate::components::fellowship_graph::WorkflowGraph;

/// Repair request sent to `/ticket/plan`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RepairTicket {
	pub ticket_id: String,
	pub customer_location: String,
	pub issue: String,
	pub max_budget: f64,
	pub max_days: u32,
	pub required_capabilities: Vec<String>,
	pub data_constraints: Vec<String>,
	pub max_hops: u32,
}

impl RepairTicket {
	pub const MAX_DAYS: u32 = 3;
	pub const MAX_HOPS: u32 = 2;

	/// Ticket stamped with `now_ms`; the location doubles as the data constraint.
	pub fn new(now_ms: u64, location: &str, issue: &str, max_budget: f64) -> Self {
		Self {
			ticket_id: format!("ticket-{now_ms}"),
			customer_location: location.to_owned(),
			issue: issue.to_owned(),
			max_budget,
			max_days: Self::MAX_DAYS,
			required_capabilities: super::extract_capabilities(issue),
			data_constraints: vec![location.to_owned()],
			max_hops: Self::MAX_HOPS,
		}
	}
}

/// Agent summary as listed in plan results and the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
	#[serde(default)]
	pub id: Option<String>,
	pub name: String,
	#[serde(default)]
	pub location: String,
	#[serde(default)]
	pub capabilities: Vec<String>,
	#[serde(default)]
	pub trust_score: Option<f64>,
}

/// Planner response. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PlanResult {
	#[serde(default)]
	pub workflow_agents: Vec<AgentSummary>,
	#[serde(default)]
	pub total_cost: Option<f64>,
	#[serde(default)]
	pub fellowship_graph: Option<WorkflowGraph>,
}

/// Decoded plan alongside the raw body, which is shown when no agents came back.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanResponse {
	pub result: PlanResult,
	pub raw: serde_json::Value,
}

impl PlanResponse {
	pub fn decode(raw: serde_json::Value) -> Result<Self, serde_json::Error> {
		let result = serde_json::from_value(raw.clone())?;
		Ok(Self { result, raw })
	}
}

/// Body of `POST /agents/feedback`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeedbackRequest {
	pub agent_id: String,
	pub rating: f64,
	pub comment: String,
}
