//! Fellowship workflow graph: model, layout, provenance, contracts, audit export
//! and the canvas component that ties them together.

mod audit;
mod component;
mod contract;
mod frame_loop;
mod layout;
mod model;
mod panels;
mod provenance;
mod render;
mod state;
mod types;

pub use audit::{
	Artifact, ArtifactSink, AuditFormat, AuditSource, AuditTrailClient, ExportNotices,
};
pub use component::FellowshipGraph;
pub use contract::ContractView;
pub use layout::{
	CANVAS_HEIGHT, EdgeGeometry, GraphLayout, MIN_WIDTH, NODE_RADIUS, PER_NODE_WIDTH, Point,
	canvas_width, node_positions,
};
pub use model::{GraphModel, ResolvedEdge};
pub use provenance::{ProvenanceRecord, SIGNATURE_LEN, StructuralVerdict, check_signature_shape};
pub use types::{DataContract, Role, WorkflowEdge, WorkflowGraph, WorkflowNode, ticket_id_of, trust_label};
