//! Provenance records and the signature shape check.
//!
//! The check here only confirms that a signature *looks* like a 64-character
//! digest. It does not recompute or authenticate anything against a key, and
//! a [`StructuralVerdict::WellFormed`] result must never be treated as proof
//! of who performed a step.

use super::types::{WorkflowEdge, WorkflowNode, ticket_id_of};

/// Length of a well-formed signature string, in UTF-16 code units.
pub const SIGNATURE_LEN: usize = 64;

/// Provenance of one step, built when a panel opens and dropped when it closes.
#[derive(Clone, Debug, PartialEq)]
pub struct ProvenanceRecord {
	/// Step the record describes.
	pub step_id: String,
	/// Agent that performed the step.
	pub agent_id: String,
	/// Signature as sent by the backend, if any.
	pub signature: Option<String>,
	/// Node role, or the hand-off label for an edge.
	pub role: String,
	/// Derived from `step_id`; informational only.
	pub ticket_id: String,
}

impl ProvenanceRecord {
	/// Record for a node's step.
	pub fn from_node(node: &WorkflowNode) -> Self {
		Self::build(&node.step_id, &node.agent_id, node.signature.as_deref(), &node.role)
	}

	/// Record for a hand-off edge.
	pub fn from_edge(edge: &WorkflowEdge) -> Self {
		Self::build(&edge.step_id, &edge.agent_id, edge.signature.as_deref(), &edge.handoff)
	}

	fn build(step_id: &str, agent_id: &str, signature: Option<&str>, role: &str) -> Self {
		Self {
			step_id: step_id.to_owned(),
			agent_id: agent_id.to_owned(),
			signature: signature.map(str::to_owned),
			role: role.to_owned(),
			ticket_id: ticket_id_of(step_id).to_owned(),
		}
	}

	/// Shape check of the signature. Recomputed on every call.
	pub fn structural_verdict(&self) -> StructuralVerdict {
		check_signature_shape(self.signature.as_deref())
	}
}

/// Outcome of [`check_signature_shape`]. Not an authentication result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructuralVerdict {
	/// Present and of the expected length.
	WellFormed,
	/// Missing or of any other length.
	Malformed,
}

impl StructuralVerdict {
	/// `true` for [`StructuralVerdict::WellFormed`].
	pub fn is_well_formed(self) -> bool {
		self == Self::WellFormed
	}

	/// Glyph shown next to the signature.
	pub fn mark(self) -> &'static str {
		match self {
			Self::WellFormed => "✔",
			Self::Malformed => "✖",
		}
	}

	/// Class for styling the glyph.
	pub fn css_class(self) -> &'static str {
		match self {
			Self::WellFormed => "valid",
			Self::Malformed => "invalid",
		}
	}
}

/// `WellFormed` iff the signature is present and exactly [`SIGNATURE_LEN`]
/// long, measured in UTF-16 code units as the browser measures strings.
pub fn check_signature_shape(signature: Option<&str>) -> StructuralVerdict {
	match signature {
		Some(sig) if sig.encode_utf16().count() == SIGNATURE_LEN => StructuralVerdict::WellFormed,
		_ => StructuralVerdict::Malformed,
	}
}
