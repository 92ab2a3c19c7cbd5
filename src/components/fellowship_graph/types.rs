use serde::{Deserialize, Serialize};

/// Fellowship graph exactly as the planner returns it.
///
/// Both lists are required: a graph object missing either is rejected at
/// decode time rather than coerced to empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
	/// Agent steps in planner order.
	pub nodes: Vec<WorkflowNode>,
	/// Hand-offs between steps, referencing node ids.
	pub edges: Vec<WorkflowEdge>,
}

/// One agent step in the workflow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
	/// Node id, unique within the graph.
	pub id: String,
	/// Free-form role text; see [`Role::from_label`].
	pub role: String,
	/// Agent display name.
	pub name: String,
	/// Where the agent operates.
	pub location: String,
	/// Planner trust score; shown as "N/A" when absent.
	#[serde(default)]
	pub trust_score: Option<f64>,
	/// Price of one task.
	pub cost_per_task: f64,
	/// Contact number, if published.
	#[serde(default)]
	pub phone: Option<String>,
	/// `<ticket>-<...>` id of the step this node performed.
	pub step_id: String,
	/// Agent that performed the step.
	pub agent_id: String,
	/// Step signature; only its shape is ever checked.
	#[serde(default)]
	pub signature: Option<String>,
	/// Contract for data shared with this agent.
	#[serde(default)]
	pub data_contract: Option<DataContract>,
}

/// A hand-off between two agents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEdge {
	/// Source node id.
	pub from: String,
	/// Target node id.
	pub to: String,
	/// Label drawn at the segment midpoint.
	pub handoff: String,
	/// Step id of the hand-off itself.
	pub step_id: String,
	/// Agent responsible for the hand-off.
	pub agent_id: String,
	/// Hand-off signature; only its shape is ever checked.
	#[serde(default)]
	pub signature: Option<String>,
}

/// Data-sharing contract attached to a node.
///
/// The two lists have opposite empty semantics: no regulations means none
/// apply, no permitted fields means every field is permitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataContract {
	/// Regulations governing the shared data.
	#[serde(default)]
	pub applicable_regulations: Vec<String>,
	/// Fields the agent may receive; empty permits all.
	#[serde(default)]
	pub permitted_fields: Vec<String>,
	/// How long the grant lasts.
	pub expiry_hours: f64,
	/// Free-text policy statement.
	#[serde(default)]
	pub policy: String,
}

/// Workflow roles with a dedicated palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
	/// `"diagnosis"`
	Diagnosis,
	/// `"logistics"`
	Logistics,
	/// `"repair"`
	Repair,
	/// `"billing"`
	Billing,
	/// Any role without its own colour.
	Default,
}

impl Role {
	/// Map the planner's free-form role text onto a known role.
	pub fn from_label(label: &str) -> Self {
		match label {
			"diagnosis" => Self::Diagnosis,
			"logistics" => Self::Logistics,
			"repair" => Self::Repair,
			"billing" => Self::Billing,
			_ => Self::Default,
		}
	}

	/// Fill colour for nodes of this role.
	pub fn color(self) -> &'static str {
		match self {
			Self::Diagnosis => "#457b9d",
			Self::Logistics => "#f4a261",
			Self::Repair => "#2a9d8f",
			Self::Billing => "#e76f51",
			Self::Default => "#bcbcbc",
		}
	}
}

/// Tooltip text for an optional trust score.
pub fn trust_label(score: Option<f64>) -> String {
	score.map_or_else(|| "N/A".to_owned(), |s| s.to_string())
}

/// First hyphen-delimited segment of a step id.
///
/// Ticket ids that themselves contain a hyphen come back truncated
/// (`"ticket-1700000000000-diagnosis"` yields `"ticket"`). Callers rely on
/// this exact behaviour for audit endpoints, so it is kept as is.
pub fn ticket_id_of(step_id: &str) -> &str {
	step_id.split('-').next().unwrap_or(step_id)
}
